//! WebAssembly entry point and browser host.

use crate::app::{AppConfig, HostEffect, SketchApp};
use crate::params::UrlParams;
use crate::shortcuts::ShortcutRegistry;
use crate::ui::{ControlKind, TOOLBAR, toolbar_action};
use kurbo::Point;
use sketchpad_core::{
    Instant, Modifiers, MousePhase, PointerEvent, SurfaceError, SurfaceSettings, TimerId, TouchPhase,
};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::time::Duration;
use thiserror::Error;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{Clamped, JsCast};
use web_sys::{
    AddEventListenerOptions, CanvasRenderingContext2d, Document, Event, EventTarget, HtmlCanvasElement,
    HtmlInputElement, ImageData, KeyboardEvent, MouseEvent, TouchEvent, WheelEvent, Window,
};

/// Errors raised by the browser host.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("JavaScript error: {0}")]
    Js(String),
    #[error("Missing DOM object: {0}")]
    Missing(&'static str),
    #[error(transparent)]
    Surface(#[from] SurfaceError),
}

impl From<JsValue> for HostError {
    fn from(value: JsValue) -> Self {
        HostError::Js(value.as_string().unwrap_or_else(|| format!("{:?}", value)))
    }
}

type SharedHost = Rc<RefCell<WebHost>>;

/// Browser-side state: the app plus the DOM objects it draws into.
struct WebHost {
    app: SketchApp,
    window: Window,
    document: Document,
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    /// Browser handles of scheduled long-press timers.
    timers: HashMap<TimerId, i32>,
}

impl WebHost {
    /// Screen position of the untransformed canvas top-left corner.
    fn canvas_origin(&self) -> Point {
        let rect = self.canvas.get_bounding_client_rect();
        let camera = self.app.surface().camera();
        Point::new(
            rect.left() - camera.zoom * camera.offset.x,
            rect.top() - camera.zoom * camera.offset.y,
        )
    }

    /// Blit the raster onto the canvas.
    fn present(&self) -> Result<(), HostError> {
        let Some(raster) = self.app.surface().raster() else {
            return Ok(());
        };
        let rgba = raster.to_rgba();
        let image = ImageData::new_with_u8_clamped_array_and_sh(Clamped(&rgba), raster.width(), raster.height())?;
        self.ctx.put_image_data(&image, 0.0, 0.0)?;
        Ok(())
    }

    fn apply_transform(&self, css: &str) -> Result<(), HostError> {
        let style = self.canvas.style();
        style.set_property("transform-origin", "0 0")?;
        style.set_property("transform", css)?;
        Ok(())
    }

    fn download(&self, file_name: &str, bytes: &[u8], mime: &str) -> Result<(), HostError> {
        download_binary_file(&self.document, file_name, bytes, mime)
    }
}

/// Initialize and run the WASM application.
#[wasm_bindgen(start)]
pub fn run_wasm() {
    // Set up panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(log::Level::Info).expect("Failed to initialize logger");

    log::info!("Starting Sketchpad (WASM)");
    ShortcutRegistry::log_all();

    if let Err(e) = start() {
        log::error!("Failed to start Sketchpad: {}", e);
    }
}

fn start() -> Result<(), HostError> {
    let window = web_sys::window().ok_or(HostError::Missing("window"))?;
    let document = window.document().ok_or(HostError::Missing("document"))?;

    let mut config = AppConfig::default();
    let canvas = document
        .get_element_by_id(&config.canvas_id)
        .ok_or(HostError::Missing("canvas element"))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| HostError::Missing("canvas element"))?;

    if let Some(json) = canvas.get_attribute("data-settings") {
        match SurfaceSettings::from_json(&json) {
            Ok(settings) => config.settings = settings,
            Err(e) => log::warn!("Ignoring data-settings: {}", e),
        }
    }

    let params = url_params(&window);
    if !params.is_empty() {
        log::info!("Tool overrides from URL: {:?}", params);
    }
    config.tools = params.apply(config.tools);

    let width = canvas.offset_width().max(1) as u32;
    let height = canvas.offset_height().max(1) as u32;
    canvas.set_width(width);
    canvas.set_height(height);

    let ctx = canvas
        .get_context("2d")?
        .ok_or(HostError::Missing("2d context"))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| HostError::Missing("2d context"))?;

    let host = Rc::new(RefCell::new(WebHost {
        app: SketchApp::new(config),
        window,
        document,
        canvas,
        ctx,
        timers: HashMap::new(),
    }));

    let effects = host.borrow_mut().app.mount(width, height)?;
    apply_effects(&host, effects);

    install_canvas_listeners(&host)?;
    install_key_listener(&host)?;
    bind_toolbar(&host)?;
    Ok(())
}

/// Read tool overrides from the query string, then the hash fragment.
fn url_params(window: &Window) -> UrlParams {
    let location = window.location();
    let query = location.search().map(|s| UrlParams::parse(&s)).unwrap_or_default();
    let hash = location.hash().map(|s| UrlParams::parse(&s)).unwrap_or_default();
    query.or(hash)
}

/// Register `handler` for events of type `E` on `target`.
fn listen<E, F>(target: &EventTarget, event_type: &str, passive: bool, mut handler: F) -> Result<(), HostError>
where
    E: JsCast + 'static,
    F: FnMut(E) + 'static,
{
    let closure = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        if let Ok(event) = event.dyn_into::<E>() {
            handler(event);
        }
    });
    let options = AddEventListenerOptions::new();
    options.set_passive(passive);
    target.add_event_listener_with_callback_and_add_event_listener_options(
        event_type,
        closure.as_ref().unchecked_ref(),
        &options,
    )?;
    closure.forget();
    Ok(())
}

fn mouse_point(event: &MouseEvent) -> Point {
    Point::new(event.client_x() as f64, event.client_y() as f64)
}

fn touch_points(event: &TouchEvent) -> Vec<Point> {
    let touches = event.touches();
    (0..touches.length())
        .filter_map(|i| touches.get(i))
        .map(|t| Point::new(t.client_x() as f64, t.client_y() as f64))
        .collect()
}

fn install_canvas_listeners(host: &SharedHost) -> Result<(), HostError> {
    let target: EventTarget = host.borrow().canvas.clone().into();

    for (event_type, phase) in [
        ("mousedown", MousePhase::Down),
        ("mousemove", MousePhase::Move),
        ("mouseup", MousePhase::Up),
        ("mouseleave", MousePhase::Leave),
    ] {
        let host = host.clone();
        listen(&target, event_type, true, move |event: MouseEvent| {
            dispatch_pointer(&host, PointerEvent::from_mouse(phase, mouse_point(&event)));
        })?;
    }

    for (event_type, phase) in [
        ("touchstart", TouchPhase::Start),
        ("touchmove", TouchPhase::Move),
        ("touchend", TouchPhase::End),
        ("touchcancel", TouchPhase::Cancel),
    ] {
        let host = host.clone();
        listen(&target, event_type, false, move |event: TouchEvent| {
            event.prevent_default();
            if let Some(pointer) = PointerEvent::from_touches(phase, &touch_points(&event)) {
                dispatch_pointer(&host, pointer);
            }
        })?;
    }

    let wheel_host = host.clone();
    listen(&target, "wheel", false, move |event: WheelEvent| {
        event.prevent_default();
        dispatch_pointer(&wheel_host, PointerEvent::wheel(event.delta_y()));
    })?;

    Ok(())
}

fn install_key_listener(host: &SharedHost) -> Result<(), HostError> {
    let target: EventTarget = host.borrow().window.clone().into();
    let host = host.clone();
    listen(&target, "keydown", false, move |event: KeyboardEvent| {
        let modifiers = Modifiers {
            shift: event.shift_key(),
            ctrl: event.ctrl_key(),
            alt: event.alt_key(),
            meta: event.meta_key(),
        };
        let effects = host.borrow_mut().app.handle_key(&event.key(), modifiers);
        if let Some(effects) = effects {
            event.prevent_default();
            apply_effects(&host, effects);
        }
    })
}

/// Wire up whichever toolbar controls exist on the page.
fn bind_toolbar(host: &SharedHost) -> Result<(), HostError> {
    let document = host.borrow().document.clone();
    let tools = *host.borrow().app.tools();

    for control in TOOLBAR {
        let Some(element) = document.get_element_by_id(control.element_id) else {
            log::debug!("No toolbar control #{}", control.element_id);
            continue;
        };
        let element_id = control.element_id;
        let host = host.clone();

        match control.kind {
            ControlKind::Button => {
                listen(&element, "click", true, move |_: Event| {
                    if let Some(action) = toolbar_action(element_id, "") {
                        let effects = host.borrow_mut().app.apply(action);
                        apply_effects(&host, effects);
                    }
                })?;
            }
            ControlKind::Color | ControlKind::Range => {
                let Ok(input) = element.dyn_into::<HtmlInputElement>() else {
                    log::warn!("Toolbar control #{} is not an input", element_id);
                    continue;
                };
                match element_id {
                    "stroke-color" => input.set_value(&tools.stroke_color.to_hex()),
                    "background-color" => input.set_value(&tools.background_color.to_hex()),
                    "stroke-width" => input.set_value(&tools.stroke_width.to_string()),
                    _ => {}
                }
                let source = input.clone();
                listen(&input, "input", true, move |_: Event| {
                    if let Some(action) = toolbar_action(element_id, &source.value()) {
                        let effects = host.borrow_mut().app.apply(action);
                        apply_effects(&host, effects);
                    }
                })?;
            }
        }
    }
    Ok(())
}

fn dispatch_pointer(host: &SharedHost, event: PointerEvent) {
    let effects = {
        let mut host = host.borrow_mut();
        let origin = host.canvas_origin();
        host.app.set_screen_origin(origin);
        host.app.handle_pointer(event, Instant::now())
    };
    apply_effects(host, effects);
}

/// Carry out effects in order. Failures are logged and do not stop the rest.
fn apply_effects(host: &SharedHost, effects: Vec<HostEffect>) {
    for effect in effects {
        if let Err(e) = apply_effect(host, effect) {
            log::error!("Host effect failed: {}", e);
        }
    }
}

fn apply_effect(host: &SharedHost, effect: HostEffect) -> Result<(), HostError> {
    match effect {
        HostEffect::ScheduleTimer { id, delay } => schedule_timer(host, id, delay),
        HostEffect::CancelTimer(id) => {
            let mut host = host.borrow_mut();
            if let Some(handle) = host.timers.remove(&id) {
                host.window.clear_timeout_with_handle(handle);
            }
            Ok(())
        }
        HostEffect::Download { file_name, mime, bytes } => host.borrow().download(&file_name, &bytes, mime),
        HostEffect::Redraw => host.borrow().present(),
        HostEffect::ApplyTransform(css) => host.borrow().apply_transform(&css),
    }
}

fn schedule_timer(host: &SharedHost, id: TimerId, delay: Duration) -> Result<(), HostError> {
    let weak = Rc::downgrade(host);
    let callback = Closure::once_into_js(move || {
        let Some(host) = weak.upgrade() else {
            return;
        };
        let effects = {
            let mut host = host.borrow_mut();
            host.timers.remove(&id);
            host.app.on_timer(id)
        };
        apply_effects(&host, effects);
    });

    let millis = i32::try_from(delay.as_millis()).unwrap_or(i32::MAX);
    let mut host = host.borrow_mut();
    let handle = host
        .window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis)?;
    host.timers.insert(id, handle);
    Ok(())
}

fn download_binary_file(document: &Document, file_name: &str, data: &[u8], mime_type: &str) -> Result<(), HostError> {
    // Create Uint8Array from data
    let uint8_array = js_sys::Uint8Array::from(data);
    let blob_parts = js_sys::Array::new();
    blob_parts.push(&uint8_array);

    let options = web_sys::BlobPropertyBag::new();
    options.set_type(mime_type);

    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&blob_parts, &options)?;

    // Create download URL
    let url = web_sys::Url::create_object_url_with_blob(&blob)?;

    // Create and click download link
    let a = document
        .create_element("a")?
        .dyn_into::<web_sys::HtmlAnchorElement>()
        .map_err(|_| HostError::Missing("anchor element"))?;

    a.set_href(&url);
    a.set_download(file_name);
    a.click();

    // Clean up
    web_sys::Url::revoke_object_url(&url).ok();
    log::info!("Downloaded {} ({} bytes)", file_name, data.len());
    Ok(())
}
