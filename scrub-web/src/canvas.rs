//! Canvas frame drawing

use crate::util::web;
use scrub_core::{fit_contain, Size};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

pub struct CanvasRenderer {
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasRenderer {
    /// Acquires the 2d context of `canvas`. Returns `None` if the browser
    /// cannot provide one.
    pub fn new(canvas: HtmlCanvasElement) -> Option<Self> {
        let context = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { canvas, context })
    }

    /// Resizes the canvas to the viewport, clears it and draws `image` scaled
    /// to fit and centered. Returns `false` if nothing was drawn because the
    /// viewport or image is empty or the browser refused the draw.
    pub fn draw(&self, image: &HtmlImageElement) -> bool {
        let (width, height) = web::viewport_size();
        let surface = Size::new(width as u32, height as u32);
        self.canvas.set_width(surface.width);
        self.canvas.set_height(surface.height);

        let image_size = Size::new(image.natural_width(), image.natural_height());
        let Some(placement) = fit_contain(surface, image_size) else {
            return false;
        };

        self.context
            .clear_rect(0.0, 0.0, surface.width as f64, surface.height as f64);
        self.context.set_image_smoothing_enabled(true);
        // not exposed as a typed setter on every web-sys version
        if let Err(err) = js_sys::Reflect::set(
            &self.context,
            &JsValue::from_str("imageSmoothingQuality"),
            &JsValue::from_str("high"),
        ) {
            log::warn!("imageSmoothingQuality not set: {err:?}");
        }

        match self.context.draw_image_with_html_image_element_and_dw_and_dh(
            image,
            placement.x,
            placement.y,
            placement.width,
            placement.height,
        ) {
            Ok(()) => true,
            Err(err) => {
                log::warn!("drawImage failed: {err:?}");
                false
            }
        }
    }
}
