use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Document, HtmlElement, Window};

#[inline]
pub fn window() -> Window {
    web_sys::window().unwrap_or_else(|| panic!("window does not exist"))
}

#[inline]
pub fn document() -> Document {
    window()
        .document()
        .unwrap_or_else(|| panic!("window has no document"))
}

/// Looks up an element by id and casts it to `T`
pub fn get_element_by_id<T: JsCast>(id: &str) -> Option<T> {
    document().get_element_by_id(id)?.dyn_into::<T>().ok()
}

/// Creates an element with the given tag and class names
pub fn create_element<T: JsCast>(tag: &str, class_name: &str) -> Result<T, JsValue> {
    let element = document().create_element(tag)?;
    element.set_class_name(class_name);
    element
        .dyn_into::<T>()
        .map_err(|_| JsValue::from_str(&format!("<{tag}> has an unexpected element type")))
}

/// Sets several inline style properties at once
pub fn set_styles(element: &HtmlElement, styles: &[(&str, &str)]) -> Result<(), JsValue> {
    let style = element.style();
    for (name, value) in styles {
        style.set_property(name, value)?;
    }
    Ok(())
}

/// Current viewport size in CSS pixels
pub fn viewport_size() -> (f64, f64) {
    let window = window();
    let width = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    let height = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
    (width, height)
}

/// Vertical document scroll offset
pub fn scroll_y() -> f64 {
    window().scroll_y().unwrap_or(0.0)
}
