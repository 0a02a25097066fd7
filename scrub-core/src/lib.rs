//! Scrub Core Library
//!
//! This library provides the platform-free model behind the scroll scrubber:
//! the frame sequence naming convention, scroll-to-frame mapping, smooth
//! scrolling, aspect-fit geometry, the caption timeline and the view state
//! that binds them together.

pub mod ease;
pub mod frames;
pub mod geometry;
pub mod manifest;
pub mod scroll;
pub mod smooth;
pub mod timeline;
pub mod view;

pub use ease::Ease;
pub use frames::{FramePattern, FrameSequence};
pub use geometry::{fit_contain, Placement, Size};
pub use manifest::SceneManifest;
pub use scroll::{FrameCursor, ScrollGeometry};
pub use smooth::{SmoothScroll, SmoothScrollConfig, WheelDeltaMode};
pub use timeline::{CaptionEntry, CaptionState, CaptionTimeline, CaptionWindow};
pub use view::{ScrubView, ViewUpdate};

/// Result type for scrub-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for scrub-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Manifest error: {0}")]
    Manifest(#[from] serde_json::Error),

    #[error("Frame sequence must contain at least one frame")]
    EmptySequence,

    #[error("Invalid caption {index}: {reason}")]
    InvalidCaption { index: usize, reason: String },

    #[error("Invalid scroll height: {0}")]
    InvalidScrollHeight(f64),

    #[error("Invalid {name}: {value}")]
    InvalidSetting { name: &'static str, value: f64 },
}
