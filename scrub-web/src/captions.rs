//! Caption overlay elements

use crate::util::web;
use scrub_core::{CaptionState, CaptionTimeline};
use wasm_bindgen::JsValue;
use web_sys::{Element, HtmlElement};

/// One absolutely positioned block per caption entry
pub struct CaptionOverlay {
    elements: Vec<HtmlElement>,
}

impl CaptionOverlay {
    /// Builds the caption blocks inside `stage`, all starting off-screen
    pub fn mount(stage: &Element, timeline: &CaptionTimeline) -> Result<Self, JsValue> {
        let mut elements = Vec::with_capacity(timeline.entries.len());
        for entry in &timeline.entries {
            let block: HtmlElement = web::create_element("div", "scrub-caption")?;
            web::set_styles(
                &block,
                &[
                    ("position", "absolute"),
                    ("z-index", "2"),
                    ("bottom", "2.5rem"),
                    ("left", "4.5rem"),
                    ("width", "50%"),
                    ("color", "white"),
                    ("will-change", "transform, opacity"),
                ],
            )?;

            let heading: HtmlElement = web::create_element("h1", "scrub-caption-year")?;
            web::set_styles(&heading, &[("font-weight", "100"), ("font-size", "1.875rem")])?;
            heading.set_text_content(Some(entry.heading().as_str()));

            let text: HtmlElement = web::create_element("h1", "scrub-caption-text")?;
            web::set_styles(&text, &[("font-size", "1.875rem")])?;
            text.set_text_content(Some(entry.text.as_str()));

            block.append_child(&heading)?;
            block.append_child(&text)?;
            stage.append_child(&block)?;
            elements.push(block);
        }

        let overlay = Self { elements };
        overlay.apply(&vec![CaptionState::HIDDEN; timeline.entries.len()]);
        Ok(overlay)
    }

    /// Writes caption states to the DOM, in table order
    pub fn apply(&self, states: &[CaptionState]) {
        for (element, state) in self.elements.iter().zip(states) {
            let style = element.style();
            if let Err(err) = style.set_property("opacity", &opacity_css(state.opacity)) {
                log::warn!("caption opacity not applied: {err:?}");
            }
            if let Err(err) = style.set_property("transform", &transform_css(state.offset_x_percent)) {
                log::warn!("caption transform not applied: {err:?}");
            }
        }
    }
}

fn opacity_css(opacity: f64) -> String {
    format!("{:.4}", opacity.clamp(0.0, 1.0))
}

fn transform_css(offset_x_percent: f64) -> String {
    format!("translateX({:.3}%)", offset_x_percent)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_css_values() {
        assert_eq!(opacity_css(1.0), "1.0000");
        assert_eq!(opacity_css(-0.2), "0.0000");
        assert_eq!(transform_css(100.0), "translateX(100.000%)");
        assert_eq!(transform_css(12.5), "translateX(12.500%)");
    }

    #[test]
    fn test_hidden_state_css() {
        let hidden = CaptionState::HIDDEN;
        assert_eq!(opacity_css(hidden.opacity), "0.0000");
        assert_eq!(transform_css(hidden.offset_x_percent), "translateX(100.000%)");
    }
}
