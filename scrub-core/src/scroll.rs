//! Scroll position to frame index mapping

use crate::FrameSequence;

/// Pixel geometry of the scroll region relative to the document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollGeometry {
    /// Document offset of the region's top edge
    pub region_top: f64,
    /// Full height of the scroll region
    pub region_height: f64,
    /// Height of the viewport
    pub viewport_height: f64,
}

impl ScrollGeometry {
    pub fn new(region_top: f64, region_height: f64, viewport_height: f64) -> Self {
        Self {
            region_top,
            region_height,
            viewport_height,
        }
    }

    /// Geometry for a region `height_vh` viewport heights tall at the top of the page
    pub fn from_viewport(viewport_height: f64, height_vh: f64) -> Self {
        Self::new(0.0, viewport_height * height_vh / 100.0, viewport_height)
    }

    /// Scroll distance over which frames are scrubbed: from the region's top
    /// at the viewport top to the region's bottom at the viewport bottom
    pub fn scrub_distance(&self) -> f64 {
        (self.region_height - self.viewport_height).max(0.0)
    }

    /// Normalized scrub progress in `[0, 1]` for a document scroll offset
    pub fn progress(&self, scroll_y: f64) -> f64 {
        let travelled = scroll_y - self.region_top;
        let distance = self.scrub_distance();
        if distance <= 0.0 {
            return if travelled > 0.0 { 1.0 } else { 0.0 };
        }
        (travelled / distance).clamp(0.0, 1.0)
    }

    /// Fraction of the region's height that has scrolled past the viewport
    /// top, in `[0, 1]`. Caption windows are expressed in this unit.
    pub fn trigger_offset(&self, scroll_y: f64) -> f64 {
        if self.region_height <= 0.0 {
            return 0.0;
        }
        ((scroll_y - self.region_top) / self.region_height).clamp(0.0, 1.0)
    }
}

/// Maps scrub progress linearly onto a frame index in `[0, count - 1]`
pub fn frame_for_progress(progress: f64, count: u32) -> u32 {
    if count <= 1 || !progress.is_finite() {
        return 0;
    }
    let last = (count - 1) as f64;
    let index = (progress.clamp(0.0, 1.0) * last).floor();
    index.clamp(0.0, last) as u32
}

/// Tracks the frame currently shown by the view
#[derive(Debug, Clone)]
pub struct FrameCursor {
    count: u32,
    current: u32,
}

impl FrameCursor {
    pub fn new(sequence: &FrameSequence) -> Self {
        Self {
            count: sequence.count,
            current: 0,
        }
    }

    /// Index of the frame last selected
    pub fn current(&self) -> u32 {
        self.current
    }

    /// Recomputes the frame index for `progress`. Returns the new index when it
    /// differs from the current one.
    pub fn update(&mut self, progress: f64) -> Option<u32> {
        let index = frame_for_progress(progress, self.count);
        if index == self.current {
            return None;
        }
        tracing::trace!(from = self.current, to = index, "frame changed");
        self.current = index;
        Some(index)
    }
}
