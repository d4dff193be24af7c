use runtime::{CancelToken, Frame, TickLoop};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::Window;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// `requestAnimationFrame` driver: one tick per display refresh, re-armed
/// from inside the callback until stopped.
///
/// The callback holds a reference to its own closure so it can re-arm;
/// [`FrameLoop::stop`] (or drop) breaks that cycle.
pub struct FrameLoop {
    window: Window,
    token: CancelToken,
    pending: Rc<Cell<Option<i32>>>,
    callback: FrameCallback,
}

impl FrameLoop {
    pub fn start<F>(window: &Window, mut tick: F) -> Result<Self, JsValue>
    where
        F: FnMut(Frame) + 'static,
    {
        let mut ticks = TickLoop::new(Frame::first());
        let token = ticks.cancel_token();
        let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
        let callback: FrameCallback = Rc::new(RefCell::new(None));

        let rearm = {
            let window = window.clone();
            let pending = Rc::clone(&pending);
            let callback = Rc::clone(&callback);
            move || {
                if let Some(cb) = callback.borrow().as_ref() {
                    match window.request_animation_frame(cb.as_ref().unchecked_ref()) {
                        Ok(id) => pending.set(Some(id)),
                        Err(err) => web_sys::console::error_1(&JsValue::from_str(&format!(
                            "requestAnimationFrame failed: {:?}",
                            err
                        ))),
                    }
                }
            }
        };

        let closure = {
            let pending = Rc::clone(&pending);
            Closure::<dyn FnMut(f64)>::new(move |_timestamp_ms: f64| {
                pending.set(None);
                if ticks.step(&mut tick) {
                    rearm();
                }
            })
        };
        *callback.borrow_mut() = Some(closure);

        let id = {
            let cb = callback.borrow();
            let cb = cb
                .as_ref()
                .ok_or_else(|| JsValue::from_str("frame callback missing"))?;
            window.request_animation_frame(cb.as_ref().unchecked_ref())?
        };
        pending.set(Some(id));

        Ok(Self {
            window: window.clone(),
            token,
            pending,
            callback,
        })
    }

    pub fn is_running(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Cancels the pending frame and releases the callback registration.
    pub fn stop(&self) {
        self.token.cancel();
        if let Some(id) = self.pending.take() {
            let _ = self.window.cancel_animation_frame(id);
        }
        self.callback.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.stop();
    }
}

/// `resize` listener on the window, removed again on drop.
pub struct ResizeListener {
    window: Window,
    closure: Closure<dyn FnMut(web_sys::Event)>,
}

impl ResizeListener {
    pub fn attach<F>(window: &Window, mut on_resize: F) -> Result<Self, JsValue>
    where
        F: FnMut() + 'static,
    {
        let closure = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event: web_sys::Event| {
            on_resize();
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        Ok(Self {
            window: window.clone(),
            closure,
        })
    }
}

impl Drop for ResizeListener {
    fn drop(&mut self) {
        let _ = self
            .window
            .remove_event_listener_with_callback("resize", self.closure.as_ref().unchecked_ref());
    }
}
