use std::cell::{Cell, RefCell};
use std::rc::Rc;
use tactile_core::{RuntimeHandle, NANOS_PER_MILLI};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};

type FrameLoop = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Drains the runtime once per `requestAnimationFrame`.
///
/// The loop stops when the driver is dropped.
pub struct WebFrameDriver {
    running: Rc<Cell<bool>>,
    frame_loop: FrameLoop,
}

impl WebFrameDriver {
    pub fn start(runtime: RuntimeHandle) -> Result<Self, JsValue> {
        let running = Rc::new(Cell::new(true));
        let frame_loop: FrameLoop = Rc::new(RefCell::new(None));

        let loop_ref = Rc::clone(&frame_loop);
        let flag = Rc::clone(&running);
        *frame_loop.borrow_mut() = Some(Closure::wrap(Box::new(move |timestamp_millis: f64| {
            if !flag.get() || !runtime.is_alive() {
                return;
            }
            runtime.drain_frame_callbacks(frame_nanos(timestamp_millis));
            if let Some(callback) = loop_ref.borrow().as_ref() {
                if let Err(err) = request_animation_frame(callback) {
                    log::error!("requestAnimationFrame failed: {err:?}");
                }
            }
        }) as Box<dyn FnMut(f64)>));

        if let Some(callback) = frame_loop.borrow().as_ref() {
            request_animation_frame(callback)?;
        }

        Ok(Self {
            running,
            frame_loop,
        })
    }

    pub fn is_running(&self) -> bool {
        self.running.get()
    }
}

impl Drop for WebFrameDriver {
    fn drop(&mut self) {
        self.running.set(false);
        // Breaks the closure's self-reference.
        self.frame_loop.borrow_mut().take();
    }
}

fn frame_nanos(timestamp_millis: f64) -> u64 {
    if timestamp_millis.is_finite() && timestamp_millis > 0.0 {
        (timestamp_millis * NANOS_PER_MILLI as f64) as u64
    } else {
        0
    }
}

fn request_animation_frame(callback: &Closure<dyn FnMut(f64)>) -> Result<i32, JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no global window exists"))?;
    window.request_animation_frame(callback.as_ref().unchecked_ref())
}
