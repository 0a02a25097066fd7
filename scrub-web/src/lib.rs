//! Scrub Web
//!
//! Mounts the scroll scrubber on a page: a tall scroll container with a sticky
//! canvas stage, caption overlays, frame preloading and smooth scrolling.

use std::cell::RefCell;
use std::rc::Rc;

use scrub_core::SceneManifest;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{AddEventListenerOptions, HtmlCanvasElement, HtmlElement, WheelEvent};

pub mod canvas;
pub mod captions;
pub mod preload;
pub mod scrubber;
pub mod util;

use canvas::CanvasRenderer;
use captions::CaptionOverlay;
use preload::FrameImages;
use scrubber::Scrubber;
use util::{init, web};

/// Mounts the scrubber into the element with id `root_id`. `manifest` is a
/// scene manifest object, or `undefined` for the built-in scene.
#[wasm_bindgen]
pub fn start(root_id: &str, manifest: JsValue) -> Result<(), JsValue> {
    init::set_panic_hook();
    init::set_logger(None);

    let manifest = parse_manifest(manifest)?;
    let root: HtmlElement = web::get_element_by_id(root_id)
        .ok_or_else(|| JsValue::from_str(&format!("no element with id {root_id}")))?;

    let (container, stage, canvas) = build_layout(&root, &manifest)?;
    let Some(renderer) = CanvasRenderer::new(canvas) else {
        log::warn!("canvas has no 2d context, scrubber not started");
        return Ok(());
    };
    let captions = CaptionOverlay::mount(&stage, &manifest.timeline())?;

    let scrubber = Rc::new(RefCell::new(Scrubber::new(
        &manifest, container, renderer, captions,
    )));

    let images = {
        let scrubber = scrubber.clone();
        FrameImages::preload(&manifest.frames, move || {
            scrubber.borrow_mut().on_first_frame();
        })?
    };
    scrubber.borrow_mut().set_images(images);

    install_listeners(&scrubber)?;
    start_animation_loop(scrubber);
    log::info!("scrubber mounted on #{root_id}");
    Ok(())
}

fn parse_manifest(value: JsValue) -> Result<SceneManifest, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(SceneManifest::default());
    }
    let manifest: SceneManifest = serde_wasm_bindgen::from_value(value)?;
    manifest
        .validate()
        .map_err(|err| JsValue::from_str(&err.to_string()))?;
    Ok(manifest)
}

/// Scroll container (`scroll_height_vh` tall) holding a sticky, one-viewport
/// stage with the canvas
fn build_layout(
    root: &HtmlElement,
    manifest: &SceneManifest,
) -> Result<(HtmlElement, HtmlElement, HtmlCanvasElement), JsValue> {
    web::set_styles(root, &[("width", "100%"), ("background-color", "#18181b")])?;

    let container: HtmlElement = web::create_element("div", "scroll-container")?;
    let height = format!("{}vh", manifest.scroll_height_vh);
    web::set_styles(
        &container,
        &[("position", "relative"), ("width", "100%"), ("height", height.as_str())],
    )?;

    let stage: HtmlElement = web::create_element("div", "scrub-stage")?;
    web::set_styles(
        &stage,
        &[
            ("position", "sticky"),
            ("top", "0"),
            ("left", "0"),
            ("width", "100%"),
            ("height", "100vh"),
            ("overflow", "hidden"),
        ],
    )?;

    let canvas: HtmlCanvasElement = web::create_element("canvas", "scrub-canvas")?;
    web::set_styles(&canvas, &[("width", "100%"), ("height", "100vh")])?;

    stage.append_child(&canvas)?;
    container.append_child(&stage)?;
    root.append_child(&container)?;
    Ok((container, stage, canvas))
}

fn install_listeners(scrubber: &Rc<RefCell<Scrubber>>) -> Result<(), JsValue> {
    let window = web::window();

    // Wheel: must be non-passive so the native scroll can be replaced.
    // Ctrl+wheel is left to the browser for zooming.
    {
        let scrubber = scrubber.clone();
        let wheel = Closure::<dyn FnMut(_)>::new(move |e: WheelEvent| {
            if e.ctrl_key() {
                return;
            }
            e.prevent_default();
            scrubber.borrow_mut().on_wheel(e.delta_y(), e.delta_mode());
        });
        let options = AddEventListenerOptions::new();
        options.set_passive(false);
        window.add_event_listener_with_callback_and_add_event_listener_options(
            "wheel",
            wheel.as_ref().unchecked_ref(),
            &options,
        )?;
        wheel.forget();
    }

    // Scroll
    {
        let scrubber = scrubber.clone();
        let scroll = Closure::<dyn FnMut()>::new(move || {
            scrubber.borrow_mut().on_scroll();
        });
        window.add_event_listener_with_callback("scroll", scroll.as_ref().unchecked_ref())?;
        scroll.forget();
    }

    // Resize
    {
        let scrubber = scrubber.clone();
        let resize = Closure::<dyn FnMut()>::new(move || {
            scrubber.borrow_mut().on_resize();
        });
        window.add_event_listener_with_callback("resize", resize.as_ref().unchecked_ref())?;
        resize.forget();
    }

    Ok(())
}

/// Runs `Scrubber::on_animation_frame` on every animation frame for the
/// lifetime of the page
fn start_animation_loop(scrubber: Rc<RefCell<Scrubber>>) {
    let callback: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
    let next = callback.clone();

    *callback.borrow_mut() = Some(Closure::new(move |time: f64| {
        scrubber.borrow_mut().on_animation_frame(time);
        if let Some(closure) = next.borrow().as_ref() {
            request_animation_frame(closure);
        }
    }));

    if let Some(closure) = callback.borrow().as_ref() {
        request_animation_frame(closure);
    };
}

fn request_animation_frame(closure: &Closure<dyn FnMut(f64)>) {
    if let Err(err) = web::window().request_animation_frame(closure.as_ref().unchecked_ref()) {
        log::error!("requestAnimationFrame failed: {err:?}");
    }
}
