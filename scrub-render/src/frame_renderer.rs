//! Aspect-fit frame renderer

use crate::FrameStore;
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};
use scrub_core::scroll::frame_for_progress;
use scrub_core::{fit_contain, Size};

/// Page background behind the canvas
pub const DEFAULT_BACKGROUND: Rgba<u8> = Rgba([0x18, 0x18, 0x1b, 0xff]);

/// Renders frames onto a viewport-sized surface
#[derive(Debug, Clone)]
pub struct FrameRenderer {
    surface: Size,
    background: Rgba<u8>,
    filter: FilterType,
}

impl FrameRenderer {
    /// Creates a renderer for a `width` x `height` surface
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            surface: Size::new(width, height),
            background: DEFAULT_BACKGROUND,
            filter: FilterType::Lanczos3,
        }
    }

    pub fn with_background(mut self, background: Rgba<u8>) -> Self {
        self.background = background;
        self
    }

    pub fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }

    pub fn surface(&self) -> Size {
        self.surface
    }

    /// Resizes the surface, e.g. when the viewport changes
    pub fn resize(&mut self, width: u32, height: u32) {
        self.surface = Size::new(width, height);
    }

    /// Draws the frame at `index`. Returns `None` if the surface is empty or
    /// the frame is not loaded.
    pub fn render(&self, store: &FrameStore, index: u32) -> Option<RgbaImage> {
        let frame = store.get(index)?;
        self.draw(frame)
    }

    /// Draws the frame selected by scrub progress `progress`
    pub fn render_progress(&self, store: &FrameStore, progress: f64) -> Option<RgbaImage> {
        let index = frame_for_progress(progress, store.len() as u32);
        self.render(store, index)
    }

    /// Clears the surface and draws `frame` scaled to fit and centered
    pub fn draw(&self, frame: &RgbaImage) -> Option<RgbaImage> {
        let (frame_width, frame_height) = frame.dimensions();
        let placement = fit_contain(self.surface, Size::new(frame_width, frame_height))?;

        let width = (placement.width.round() as u32).clamp(1, self.surface.width);
        let height = (placement.height.round() as u32).clamp(1, self.surface.height);
        let x = i64::from((self.surface.width - width) / 2);
        let y = i64::from((self.surface.height - height) / 2);

        let mut surface =
            RgbaImage::from_pixel(self.surface.width, self.surface.height, self.background);
        let scaled = if (width, height) == (frame_width, frame_height) {
            frame.clone()
        } else {
            imageops::resize(frame, width, height, self.filter)
        };
        // frames are opaque, so a plain copy is enough
        imageops::replace(&mut surface, &scaled, x, y);

        tracing::trace!(width, height, x, y, scale = placement.scale, "frame drawn");
        Some(surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);

    fn store_with(frames: &[RgbaImage]) -> FrameStore {
        let mut store = FrameStore::empty(frames.len() as u32);
        for (index, frame) in frames.iter().enumerate() {
            store.insert(index as u32, frame.clone());
        }
        store
    }

    #[test]
    fn test_letterboxed_frame_is_centered() {
        let renderer = FrameRenderer::new(200, 100).with_filter(FilterType::Nearest);
        let frame = RgbaImage::from_pixel(50, 50, RED);
        let surface = renderer.draw(&frame).unwrap();

        assert_eq!(surface.dimensions(), (200, 100));
        assert_eq!(*surface.get_pixel(0, 50), DEFAULT_BACKGROUND);
        assert_eq!(*surface.get_pixel(49, 50), DEFAULT_BACKGROUND);
        assert_eq!(*surface.get_pixel(50, 0), RED);
        assert_eq!(*surface.get_pixel(149, 99), RED);
        assert_eq!(*surface.get_pixel(150, 50), DEFAULT_BACKGROUND);
    }

    #[test]
    fn test_exact_fit_covers_surface() {
        let renderer = FrameRenderer::new(64, 36).with_filter(FilterType::Nearest);
        let frame = RgbaImage::from_pixel(128, 72, RED);
        let surface = renderer.draw(&frame).unwrap();
        assert!(surface.pixels().all(|pixel| *pixel == RED));
    }

    #[test]
    fn test_frame_pixels_are_copied_not_blended() {
        let renderer = FrameRenderer::new(40, 20).with_filter(FilterType::Nearest);
        let translucent = Rgba([10, 200, 30, 128]);
        let surface = renderer.draw(&RgbaImage::from_pixel(20, 20, translucent)).unwrap();
        assert_eq!(*surface.get_pixel(20, 10), translucent);
        assert_eq!(*surface.get_pixel(5, 10), DEFAULT_BACKGROUND);
    }

    #[test]
    fn test_missing_frame_is_noop() {
        let renderer = FrameRenderer::new(64, 36);
        let store = FrameStore::empty(3);
        assert!(renderer.render(&store, 1).is_none());
        assert!(renderer.render(&store, 99).is_none());
    }

    #[test]
    fn test_empty_surface_is_noop() {
        let renderer = FrameRenderer::new(0, 36);
        let store = store_with(&[RgbaImage::from_pixel(4, 4, RED)]);
        assert!(renderer.render(&store, 0).is_none());
    }

    #[test]
    fn test_render_progress_picks_frame() {
        let blue = Rgba([0, 0, 255, 255]);
        let frames = [
            RgbaImage::from_pixel(4, 4, RED),
            RgbaImage::from_pixel(4, 4, RED),
            RgbaImage::from_pixel(4, 4, blue),
        ];
        let store = store_with(&frames);
        let renderer = FrameRenderer::new(4, 4);

        let start = renderer.render_progress(&store, 0.0).unwrap();
        let end = renderer.render_progress(&store, 1.0).unwrap();
        assert_eq!(*start.get_pixel(2, 2), RED);
        assert_eq!(*end.get_pixel(2, 2), blue);
    }

    #[test]
    fn test_custom_background() {
        let background = Rgba([1, 2, 3, 255]);
        let renderer = FrameRenderer::new(10, 4).with_background(background);
        let surface = renderer.draw(&RgbaImage::from_pixel(4, 4, RED)).unwrap();
        assert_eq!(*surface.get_pixel(0, 0), background);
    }

    #[test]
    fn test_resize() {
        let mut renderer = FrameRenderer::new(10, 10);
        renderer.resize(30, 20);
        assert_eq!(renderer.surface(), Size::new(30, 20));
    }
}
