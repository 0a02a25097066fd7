//! Frame sequence data structures and the asset naming convention

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Describes how frame files are named on disk or on the web server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FramePattern {
    /// Directory or URL prefix the frames live under
    pub base: String,
    /// File name prefix before the number
    pub prefix: String,
    /// Zero-padding width of the frame number
    pub digits: usize,
    /// File extension without the dot
    pub extension: String,
    /// Number used in the file name of index 0
    pub first_number: u32,
}

impl Default for FramePattern {
    fn default() -> Self {
        Self {
            base: "/compressed_images".to_string(),
            prefix: "frame_".to_string(),
            digits: 4,
            extension: "jpg".to_string(),
            first_number: 1,
        }
    }
}

impl FramePattern {
    /// Returns the file name for a zero-based frame index
    pub fn file_name(&self, index: u32) -> String {
        format!(
            "{}{:0width$}.{}",
            self.prefix,
            index + self.first_number,
            self.extension,
            width = self.digits
        )
    }

    /// Returns the full path or URL for a zero-based frame index
    pub fn path(&self, index: u32) -> String {
        let name = self.file_name(index);
        if self.base.is_empty() {
            name
        } else {
            format!("{}/{}", self.base.trim_end_matches('/'), name)
        }
    }

    /// Parses a file name back into its zero-based frame index
    pub fn parse_file_name(&self, name: &str) -> Option<u32> {
        let number = name
            .strip_prefix(self.prefix.as_str())?
            .strip_suffix(self.extension.as_str())?
            .strip_suffix('.')?;
        if number.is_empty() || !number.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        number.parse::<u32>().ok()?.checked_sub(self.first_number)
    }
}

/// An ordered sequence of frames, indexed `0..count`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameSequence {
    /// Number of frames (the page's `maxIndex`)
    pub count: u32,
    /// Naming convention for the frame files
    #[serde(default)]
    pub pattern: FramePattern,
}

impl Default for FrameSequence {
    fn default() -> Self {
        Self {
            count: 1345,
            pattern: FramePattern::default(),
        }
    }
}

impl FrameSequence {
    /// Creates a new frame sequence
    pub fn new(count: u32, pattern: FramePattern) -> Result<Self> {
        if count == 0 {
            return Err(Error::EmptySequence);
        }
        Ok(Self { count, pattern })
    }

    /// Returns the highest valid frame index
    pub fn last_index(&self) -> u32 {
        self.count.saturating_sub(1)
    }

    /// Clamps any index, including negative ones, into `[0, count - 1]`
    pub fn clamp_index(&self, index: i64) -> u32 {
        index.clamp(0, self.last_index() as i64) as u32
    }

    /// Returns the path of the frame at `index`, clamped into range
    pub fn path(&self, index: u32) -> String {
        self.pattern.path(index.min(self.last_index()))
    }

    /// Iterates over every frame index with its path
    pub fn paths(&self) -> impl Iterator<Item = (u32, String)> + '_ {
        (0..self.count).map(move |index| (index, self.pattern.path(index)))
    }
}
