//! Scrub Render Library
//!
//! This library decodes frame sequences from disk and renders them onto a
//! viewport-sized surface the same way the web canvas does.

pub mod frame_loader;
pub mod frame_renderer;
pub mod frame_store;
pub mod progress_tracker;

pub use frame_renderer::FrameRenderer;
pub use frame_store::FrameStore;
pub use progress_tracker::ProgressTracker;

/// Result type for scrub-render operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for scrub-render operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Scrub core error: {0}")]
    Core(#[from] scrub_core::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
}
