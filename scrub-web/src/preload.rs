//! Eager image preloading

use scrub_core::FrameSequence;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlImageElement;

/// One `<img>` handle per frame. Loads are fire-and-forget; a frame that
/// fails to load simply never draws.
pub struct FrameImages {
    images: Vec<HtmlImageElement>,
}

impl FrameImages {
    /// Starts loading every frame of `sequence`. `on_first_loaded` runs once
    /// the first frame has arrived, for the initial draw.
    pub fn preload(
        sequence: &FrameSequence,
        on_first_loaded: impl FnOnce() + 'static,
    ) -> Result<Self, JsValue> {
        let mut images = Vec::with_capacity(sequence.count as usize);
        let mut on_first_loaded = Some(on_first_loaded);

        for (index, src) in sequence.paths() {
            let image = HtmlImageElement::new()?;
            if index == 0 {
                if let Some(callback) = on_first_loaded.take() {
                    let onload = Closure::once(callback);
                    image.set_onload(Some(onload.as_ref().unchecked_ref()));
                    onload.forget();
                }
            }
            image.set_src(&src);
            images.push(image);
        }

        log::info!("preloading {} frames", images.len());
        Ok(Self { images })
    }

    /// Returns the image at `index` if it has finished loading
    pub fn get(&self, index: u32) -> Option<&HtmlImageElement> {
        self.images
            .get(index as usize)
            .filter(|image| image.complete() && image.natural_width() > 0)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }
}
