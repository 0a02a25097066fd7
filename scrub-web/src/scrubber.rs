//! Scroll-driven scrubber: binds the DOM to a `ScrubView`

use crate::canvas::CanvasRenderer;
use crate::captions::CaptionOverlay;
use crate::preload::FrameImages;
use crate::util::web;
use scrub_core::{SceneManifest, ScrollGeometry, ScrubView, WheelDeltaMode};
use web_sys::HtmlElement;

pub struct Scrubber {
    container: HtmlElement,
    renderer: CanvasRenderer,
    images: Option<FrameImages>,
    captions: CaptionOverlay,
    view: ScrubView,
}

impl Scrubber {
    pub fn new(
        manifest: &SceneManifest,
        container: HtmlElement,
        renderer: CanvasRenderer,
        captions: CaptionOverlay,
    ) -> Self {
        let mut scrubber = Self {
            container,
            renderer,
            images: None,
            captions,
            view: ScrubView::new(manifest),
        };
        scrubber.on_resize();
        scrubber.view.on_native_scroll(web::scroll_y());
        scrubber
    }

    pub fn set_images(&mut self, images: FrameImages) {
        self.images = Some(images);
    }

    /// Index of the frame the scroll position selects
    pub fn current_frame(&self) -> u32 {
        self.view.current_frame()
    }

    fn geometry(&self) -> ScrollGeometry {
        let (_, viewport_height) = web::viewport_size();
        let region_top = self.container.get_bounding_client_rect().top() + web::scroll_y();
        ScrollGeometry::new(
            region_top,
            self.container.offset_height() as f64,
            viewport_height,
        )
    }

    /// Draws frame `index` if its image has loaded and records it as drawn
    fn draw(&mut self, index: u32) {
        let Some(image) = self.images.as_ref().and_then(|images| images.get(index)) else {
            return;
        };
        if self.renderer.draw(image) {
            self.view.mark_drawn(index);
        }
    }

    /// Frame 0 finished loading
    pub fn on_first_frame(&mut self) {
        let current_loaded = self
            .images
            .as_ref()
            .is_some_and(|images| images.get(self.view.current_frame()).is_some());
        if let Some(index) = self.view.first_frame_loaded(current_loaded) {
            self.draw(index);
        }
    }

    /// Recomputes frame and caption state for the document's scroll offset
    pub fn update(&mut self) {
        let update = self.view.update(&self.geometry(), web::scroll_y());
        if let Some(index) = update.frame {
            self.draw(index);
        }
        self.captions.apply(&update.captions);
    }

    /// Animation frame callback: advances smooth scrolling, then updates
    pub fn on_animation_frame(&mut self, time_ms: f64) {
        if let Some(offset) = self.view.tick(time_ms) {
            web::window().scroll_to_with_x_and_y(0.0, offset);
        }
        self.update();
    }

    pub fn on_wheel(&mut self, delta_y: f64, delta_mode: u32) {
        let (_, viewport_height) = web::viewport_size();
        self.view
            .on_wheel(delta_y, WheelDeltaMode::from_dom(delta_mode), viewport_height);
    }

    pub fn on_scroll(&mut self) {
        self.view.on_native_scroll(web::scroll_y());
    }

    pub fn on_resize(&mut self) {
        let (_, viewport_height) = web::viewport_size();
        let document_height = web::document()
            .document_element()
            .map(|root| root.scroll_height() as f64)
            .unwrap_or(0.0);
        self.view.on_resize(document_height - viewport_height);
    }
}
