//! Browser host for the constellation sphere.
//!
//! Owns the `<canvas>`, the overlay element references, the animation frame
//! loop and the resize listener. All geometry lives in the `constellation`
//! crate; this crate only wires it to the DOM.

use console_error_panic_hook::set_once;
use std::cell::RefCell;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::{HtmlElement, Window};

use constellation::{Animator, ConstellationConfig, Viewport};
use runtime::Frame;

mod canvas;
mod dom;
mod frame_loop;
mod report;
mod view;

use canvas::CanvasSurface;
use dom::DomStyleSink;
use frame_loop::{FrameLoop, ResizeListener};
use view::ViewState;

pub use report::{AnalysisReport, ReportError, Verdict, parse_response};

const CANVAS_ID: &str = "constellation-canvas";
const ANCHOR_SELECTOR: &str = "[data-constellation-anchor]";
const ANALYZE_ENDPOINT: &str = "/api/analyze";

struct App {
    animator: Animator<HtmlElement>,
    surface: Option<CanvasSurface>,
    sink: DomStyleSink,
}

impl App {
    fn tick(&mut self, frame: Frame) {
        self.animator
            .tick(frame, self.surface.as_mut(), &mut self.sink);
    }
}

thread_local! {
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
    static FRAME_LOOP: RefCell<Option<FrameLoop>> = const { RefCell::new(None) };
    static RESIZE: RefCell<Option<ResizeListener>> = const { RefCell::new(None) };
}

fn with_app<F, R>(f: F) -> R
where
    F: FnOnce(&mut App) -> R,
    R: Default,
{
    APP.try_with(|app| app.borrow_mut().as_mut().map(f).unwrap_or_default())
        .unwrap_or_default()
}

fn log(msg: &str) {
    web_sys::console::log_1(&JsValue::from_str(msg));
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no window"))
}

fn window_viewport(window: &Window) -> Result<Viewport, JsValue> {
    let width = window.inner_width()?.as_f64().unwrap_or(0.0);
    let height = window.inner_height()?.as_f64().unwrap_or(0.0);
    Ok(Viewport::new(width, height))
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    set_once();
    Ok(())
}

/// Starts (or restarts) the animation.
///
/// `config_json` is an optional, possibly partial, JSON configuration.
/// A page without the canvas still animates its overlays, and a page without
/// overlays still draws the sphere.
#[wasm_bindgen]
pub fn start_constellation(config_json: Option<String>) -> Result<(), JsValue> {
    stop_constellation();

    let config = match config_json.as_deref() {
        Some(text) if !text.trim().is_empty() => ConstellationConfig::from_json(text)
            .map_err(|e| JsValue::from_str(&e.to_string()))?,
        _ => ConstellationConfig::default(),
    };

    let window = window()?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let viewport = window_viewport(&window)?;

    let surface = match CanvasSurface::from_document(&document, CANVAS_ID) {
        Ok(Some(surface)) => Some(surface),
        Ok(None) => {
            log(&format!("#{CANVAS_ID} not found; sphere rendering disabled"));
            None
        }
        Err(err) => {
            log(&format!("canvas init error: {:?}", err));
            None
        }
    };

    let anchors = dom::collect_anchors(&document, ANCHOR_SELECTOR)?;
    if anchors.is_empty() {
        log("no overlay anchors found");
    }

    let mut animator = Animator::new(config, viewport, anchors)
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
    view::gate_overlays(&mut animator, view::remembered());

    APP.with(|app| {
        *app.borrow_mut() = Some(App {
            animator,
            surface,
            sink: DomStyleSink::new(),
        });
    });

    let resize_window = window.clone();
    let listener = ResizeListener::attach(&window, move || {
        match window_viewport(&resize_window) {
            Ok(viewport) => with_app(|app| app.animator.resize(viewport)),
            Err(err) => log(&format!("resize: {:?}", err)),
        }
    })?;
    RESIZE.with(|r| *r.borrow_mut() = Some(listener));

    let frame_loop = FrameLoop::start(&window, |frame| with_app(|app| app.tick(frame)))?;
    FRAME_LOOP.with(|l| *l.borrow_mut() = Some(frame_loop));

    Ok(())
}

/// Stops the frame loop and detaches from the page.
///
/// Overlay elements keep whatever style they had last.
#[wasm_bindgen]
pub fn stop_constellation() {
    if let Some(frame_loop) = FRAME_LOOP.with(|l| l.borrow_mut().take()) {
        frame_loop.stop();
    }
    RESIZE.with(|r| r.borrow_mut().take());
    if let Some(app) = APP.with(|app| app.borrow_mut().take()) {
        let failures = app.sink.failures();
        if failures > 0 {
            log(&format!("constellation stopped; {failures} overlay style writes failed"));
        }
    }
}

#[wasm_bindgen]
pub fn is_constellation_running() -> bool {
    FRAME_LOOP.with(|l| l.borrow().as_ref().is_some_and(FrameLoop::is_running))
}

/// Switches the visible panel (`landing`, `analyzing`, `results`).
///
/// The choice is remembered across `stop_constellation` / `start_constellation`
/// and may be made before the first start.
#[wasm_bindgen]
pub fn set_view(name: &str) -> Result<(), JsValue> {
    apply_view(ViewState::from_str(name))
}

#[wasm_bindgen]
pub fn current_view() -> String {
    view::remembered().as_str().to_string()
}

fn apply_view(next: ViewState) -> Result<(), JsValue> {
    let document = window()?
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    view::remember(next);
    view::show_view(&document, next);
    with_app(|app| view::gate_overlays(&mut app.animator, next));
    Ok(())
}

/// Cumulative frame metrics as JSON.
#[wasm_bindgen]
pub fn constellation_metrics() -> Result<String, JsValue> {
    let metrics = with_app(|app| Some(app.animator.metrics().clone()))
        .ok_or_else(|| JsValue::from_str("constellation not started"))?;
    serde_json::to_string(&metrics).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Uploads `file` for analysis; resolves with the report JSON.
///
/// Moves to the analyzing panel while the request is in flight and to the
/// results panel when it resolves, back to landing on failure.
#[wasm_bindgen]
pub fn analyze_image(file: web_sys::File) -> js_sys::Promise {
    future_to_promise(async move {
        apply_view(ViewState::Analyzing)?;
        match report::upload_image(ANALYZE_ENDPOINT, &file).await {
            Ok(report) => {
                apply_view(ViewState::Results)?;
                let json = serde_json::to_string(&report)
                    .map_err(|e| JsValue::from_str(&e.to_string()))?;
                Ok(JsValue::from_str(&json))
            }
            Err(err) => {
                web_sys::console::error_1(&JsValue::from_str(&err.to_string()));
                apply_view(ViewState::Landing)?;
                Err(JsValue::from_str(&err.to_string()))
            }
        }
    })
}
