//! Caption timeline: when and how captions slide in and out

use crate::{Ease, Error, Result};
use serde::{Deserialize, Serialize};

/// Width of the enter and exit windows as a fraction of the scroll region
pub const DEFAULT_FADE: f64 = 0.05;

/// Widest accepted fade: enter and exit windows may not exceed half the region
pub const MAX_FADE: f64 = 0.5;

/// Studio line shown above every caption
pub const STUDIO: &str = "DOZE STD";

/// A caption shown while the scrubber is between two frame positions
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CaptionEntry {
    /// Frame position where the caption starts entering
    pub start: u32,
    /// Frame position where the caption has fully left
    pub end: u32,
    /// Year shown in the heading line
    pub year: u16,
    /// Caption body
    pub text: String,
}

impl CaptionEntry {
    /// Creates a new caption entry
    pub fn new(start: u32, end: u32, year: u16, text: impl Into<String>) -> Self {
        Self {
            start,
            end,
            year,
            text: text.into(),
        }
    }

    /// Heading line rendered above the caption text
    pub fn heading(&self) -> String {
        format!("\u{a9} {} {}", self.year, STUDIO)
    }

    /// Checks if `frame` lies inside this caption's range
    pub fn contains(&self, frame: u32) -> bool {
        frame >= self.start && frame < self.end
    }

    /// Returns the length of this caption's range in frames
    pub fn duration(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }
}

/// Scroll offsets (fractions of the scroll region) bounding a caption's tweens
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptionWindow {
    pub enter_start: f64,
    pub enter_end: f64,
    pub exit_start: f64,
    pub exit_end: f64,
}

impl CaptionWindow {
    /// Computes the window for `entry` in a sequence of `frame_count` frames
    pub fn new(entry: &CaptionEntry, frame_count: u32, fade: f64) -> Self {
        let count = frame_count.max(1) as f64;
        let start = entry.start as f64 / count;
        let end = entry.end as f64 / count;
        Self {
            enter_start: start,
            enter_end: start + fade,
            exit_start: end - fade,
            exit_end: end,
        }
    }

    /// Eased visibility in `[0, 1]` at a scroll offset
    pub fn visibility(&self, offset: f64) -> f64 {
        let entered = Ease::Power3Out.apply(tween_progress(offset, self.enter_start, self.enter_end));
        let exited = Ease::Power3In.apply(tween_progress(offset, self.exit_start, self.exit_end));
        entered.min(1.0 - exited)
    }
}

fn tween_progress(offset: f64, start: f64, end: f64) -> f64 {
    if end <= start {
        return if offset >= end { 1.0 } else { 0.0 };
    }
    ((offset - start) / (end - start)).clamp(0.0, 1.0)
}

/// Rendered state of one caption
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaptionState {
    pub opacity: f64,
    /// Horizontal translation as a percentage of the caption's own width;
    /// 100 is fully off-screen to the right, 0 is in place
    pub offset_x_percent: f64,
}

impl CaptionState {
    pub const HIDDEN: Self = Self {
        opacity: 0.0,
        offset_x_percent: 100.0,
    };

    fn from_visibility(visibility: f64) -> Self {
        Self {
            opacity: visibility,
            offset_x_percent: 100.0 * (1.0 - visibility),
        }
    }

    pub fn is_visible(&self) -> bool {
        self.opacity > 0.0
    }
}

/// The full caption table for a frame sequence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionTimeline {
    pub entries: Vec<CaptionEntry>,
    /// Number of frames the caption positions are relative to
    pub frame_count: u32,
    /// Enter/exit window width as a fraction of the scroll region
    #[serde(default = "default_fade")]
    pub fade: f64,
}

fn default_fade() -> f64 {
    DEFAULT_FADE
}

impl Default for CaptionTimeline {
    fn default() -> Self {
        Self::new(default_captions(), 1345)
    }
}

impl CaptionTimeline {
    /// Creates a new caption timeline with the default fade width
    pub fn new(entries: Vec<CaptionEntry>, frame_count: u32) -> Self {
        Self {
            entries,
            frame_count,
            fade: DEFAULT_FADE,
        }
    }

    /// Rejects captions that can never be shown. Overlapping ranges are
    /// allowed and only reported.
    pub fn validate(&self) -> Result<()> {
        if !self.fade.is_finite() || self.fade <= 0.0 || self.fade > MAX_FADE {
            return Err(Error::InvalidSetting {
                name: "caption_fade",
                value: self.fade,
            });
        }
        for (index, entry) in self.entries.iter().enumerate() {
            if entry.start >= entry.end {
                return Err(Error::InvalidCaption {
                    index,
                    reason: format!("start {} is not before end {}", entry.start, entry.end),
                });
            }
            if entry.end > self.frame_count {
                return Err(Error::InvalidCaption {
                    index,
                    reason: format!("end {} is past frame count {}", entry.end, self.frame_count),
                });
            }
        }

        for (a, b) in self.overlapping_pairs() {
            tracing::warn!(first = a, second = b, "caption ranges overlap");
        }
        Ok(())
    }

    /// Index pairs of captions whose ranges intersect
    pub fn overlapping_pairs(&self) -> Vec<(usize, usize)> {
        let mut pairs = Vec::new();
        for (i, a) in self.entries.iter().enumerate() {
            for (j, b) in self.entries.iter().enumerate().skip(i + 1) {
                if a.start < b.end && b.start < a.end {
                    pairs.push((i, j));
                }
            }
        }
        pairs
    }

    /// Scroll window of the caption at `index`
    pub fn window(&self, index: usize) -> Option<CaptionWindow> {
        self.entries
            .get(index)
            .map(|entry| CaptionWindow::new(entry, self.frame_count, self.fade))
    }

    /// State of every caption at a scroll offset, in table order
    pub fn states_at(&self, offset: f64) -> Vec<CaptionState> {
        self.entries
            .iter()
            .map(|entry| {
                let window = CaptionWindow::new(entry, self.frame_count, self.fade);
                CaptionState::from_visibility(window.visibility(offset))
            })
            .collect()
    }

    /// Captions at least partially visible at a scroll offset
    pub fn visible_at(&self, offset: f64) -> Vec<(&CaptionEntry, CaptionState)> {
        self.entries
            .iter()
            .zip(self.states_at(offset))
            .filter(|(_, state)| state.is_visible())
            .collect()
    }
}

/// The six captions of the original page
pub fn default_captions() -> Vec<CaptionEntry> {
    vec![
        CaptionEntry::new(0, 180, 2000, "INNOVATING VISUAL EXPERIENCES"),
        CaptionEntry::new(200, 380, 2001, "TRANSFORMING IDEAS INTO MOTION"),
        CaptionEntry::new(400, 580, 2002, "CRAFTING STORIES THROUGH DESIGN"),
        CaptionEntry::new(600, 780, 2003, "BRINGING BRANDS TO LIFE"),
        CaptionEntry::new(800, 980, 2004, "INSPIRING MOTION DESIGN"),
        CaptionEntry::new(1000, 1345, 2005, "TURNING CONCEPTS INTO MOTION"),
    ]
}
