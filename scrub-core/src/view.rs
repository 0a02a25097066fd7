//! View state of a mounted scrubber
//!
//! Platform front-ends feed scroll geometry, wheel input and animation-frame
//! timestamps into [`ScrubView`] and get back the frame to draw and the
//! caption states to apply. The view keeps asking for the current frame
//! until the front-end reports it drawn, so a frame that was still loading
//! when the cursor reached it is drawn as soon as it arrives.

use crate::smooth::{normalize_wheel_delta, WheelDeltaMode};
use crate::{
    CaptionState, CaptionTimeline, FrameCursor, SceneManifest, ScrollGeometry, SmoothScroll,
};

/// Result of one view update
#[derive(Debug, Clone, PartialEq)]
pub struct ViewUpdate {
    /// Frame that should be drawn, if the canvas does not show it yet
    pub frame: Option<u32>,
    /// Caption states in table order
    pub captions: Vec<CaptionState>,
}

#[derive(Debug, Clone)]
pub struct ScrubView {
    cursor: FrameCursor,
    timeline: CaptionTimeline,
    smooth: SmoothScroll,
    drawn: Option<u32>,
}

impl ScrubView {
    pub fn new(manifest: &SceneManifest) -> Self {
        Self {
            cursor: FrameCursor::new(&manifest.frames),
            timeline: manifest.timeline(),
            smooth: SmoothScroll::new(manifest.smooth, 0.0),
            drawn: None,
        }
    }

    /// Index selected by the last update
    pub fn current_frame(&self) -> u32 {
        self.cursor.current()
    }

    /// Index currently on the canvas
    pub fn drawn_frame(&self) -> Option<u32> {
        self.drawn
    }

    pub fn smooth(&self) -> &SmoothScroll {
        &self.smooth
    }

    /// Recomputes frame and caption state for a document scroll offset
    pub fn update(&mut self, geometry: &ScrollGeometry, scroll_y: f64) -> ViewUpdate {
        self.cursor.update(geometry.progress(scroll_y));
        let current = self.cursor.current();
        ViewUpdate {
            frame: (self.drawn != Some(current)).then_some(current),
            captions: self.timeline.states_at(geometry.trigger_offset(scroll_y)),
        }
    }

    /// Records that `index` is now on the canvas
    pub fn mark_drawn(&mut self, index: u32) {
        self.drawn = Some(index);
    }

    /// Forgets the drawn frame, e.g. after the canvas was resized
    pub fn invalidate(&mut self) {
        self.drawn = None;
    }

    /// Called once the first frame has loaded. Returns frame 0 when it should
    /// be drawn: the cursor sits on it, or the cursor's own frame is not
    /// loaded yet and frame 0 stands in until it is.
    pub fn first_frame_loaded(&self, current_loaded: bool) -> Option<u32> {
        let current = self.cursor.current();
        if self.drawn == Some(current) {
            return None;
        }
        (current == 0 || !current_loaded).then_some(0)
    }

    /// Advances smooth scrolling. Returns the offset to scroll the document to.
    pub fn tick(&mut self, time_ms: f64) -> Option<f64> {
        self.smooth.tick(time_ms)
    }

    pub fn on_wheel(&mut self, delta_y: f64, mode: WheelDeltaMode, viewport_height: f64) {
        self.smooth
            .on_wheel(normalize_wheel_delta(delta_y, mode, viewport_height));
    }

    /// Native scroll (scrollbar, keyboard, anchors). Only followed while the
    /// driver is idle; during an animation the event is the driver's own.
    pub fn on_native_scroll(&mut self, scroll_y: f64) {
        if !self.smooth.is_animating() {
            self.smooth.sync(scroll_y);
        }
    }

    /// New maximum scroll offset after a resize. The canvas is resized on the
    /// next draw, so the current frame is redrawn.
    pub fn on_resize(&mut self, scroll_limit: f64) {
        self.smooth.set_limit(scroll_limit);
        self.invalidate();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: f64 = 1000.0;

    fn mounted() -> (ScrubView, ScrollGeometry) {
        let manifest = SceneManifest::default();
        let geometry = ScrollGeometry::from_viewport(VIEWPORT, manifest.scroll_height_vh);
        let mut view = ScrubView::new(&manifest);
        view.on_resize(geometry.region_height - VIEWPORT);
        (view, geometry)
    }

    #[test]
    fn test_scroll_selects_frame_and_captions() {
        let (mut view, geometry) = mounted();

        let update = view.update(&geometry, 6500.0);
        assert_eq!(update.frame, Some(672));
        assert_eq!(view.current_frame(), 672);
        assert_eq!(update.captions.len(), 6);

        let update = view.update(&geometry, 0.0);
        assert_eq!(update.frame, Some(0));
        assert_eq!(update.captions[0], CaptionState::HIDDEN);
    }

    #[test]
    fn test_undrawn_frame_is_requested_again() {
        let (mut view, geometry) = mounted();

        assert_eq!(view.update(&geometry, 6500.0).frame, Some(672));
        // image not loaded yet, nothing drawn
        assert_eq!(view.update(&geometry, 6501.0).frame, Some(672));

        view.mark_drawn(672);
        assert_eq!(view.update(&geometry, 6502.0).frame, None);
        assert_eq!(view.drawn_frame(), Some(672));
    }

    #[test]
    fn test_resize_requests_redraw() {
        let (mut view, geometry) = mounted();
        view.update(&geometry, 6500.0);
        view.mark_drawn(672);

        view.on_resize(12_000.0);
        assert_eq!(view.update(&geometry, 6500.0).frame, Some(672));
    }

    #[test]
    fn test_first_frame_load() {
        let (mut view, geometry) = mounted();
        assert_eq!(view.first_frame_loaded(false), Some(0));
        assert_eq!(view.first_frame_loaded(true), Some(0));

        // reloaded halfway down the page
        view.update(&geometry, 6500.0);
        assert_eq!(view.first_frame_loaded(false), Some(0));
        assert_eq!(view.first_frame_loaded(true), None);

        // the placeholder does not satisfy the cursor
        view.mark_drawn(0);
        assert_eq!(view.update(&geometry, 6500.0).frame, Some(672));
    }

    #[test]
    fn test_native_scroll_followed_only_when_idle() {
        let (mut view, _) = mounted();

        view.on_native_scroll(2500.0);
        assert_eq!(view.smooth().current(), 2500.0);

        view.tick(0.0);
        view.on_wheel(3.0, WheelDeltaMode::Line, VIEWPORT);
        assert_eq!(view.smooth().target(), 2548.0);

        let offset = view.tick(16.0).unwrap();
        view.on_native_scroll(offset.round());
        assert_eq!(view.smooth().target(), 2548.0);
        assert!(view.smooth().is_animating());

        let mut time = 16.0;
        while view.tick(time).is_some() {
            time += 16.0;
        }
        view.on_native_scroll(100.0);
        assert_eq!(view.smooth().current(), 100.0);
    }

    #[test]
    fn test_page_wheel_scrolls_one_viewport() {
        let (mut view, _) = mounted();
        view.on_wheel(1.0, WheelDeltaMode::Page, VIEWPORT);
        assert_eq!(view.smooth().target(), VIEWPORT);
    }
}
