//! Browser animation loop
//!
//! Holds at most one pending `requestAnimationFrame` and the `TickHandle`
//! the callbacks run with. Cancelling drops both, so a callback that fires
//! after a pause finds nothing to tick.

use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;

use super::FrameTimer;
use crate::sim::TickHandle;

/// A scheduled animation frame callback
#[derive(Debug)]
pub struct FrameRequest {
    id: i32,
}

impl FrameRequest {
    /// Ask the browser to call `callback` with the frame timestamp (ms)
    pub fn schedule(callback: impl FnOnce(f64) + 'static) -> Option<Self> {
        let window = web_sys::window()?;
        let closure = Closure::once_into_js(callback);
        match window.request_animation_frame(closure.unchecked_ref()) {
            Ok(id) => Some(Self { id }),
            Err(e) => {
                log::error!("requestAnimationFrame failed: {:?}", e);
                None
            }
        }
    }

    pub fn cancel(self) {
        if let Some(window) = web_sys::window() {
            let _ = window.cancel_animation_frame(self.id);
        }
    }
}

#[derive(Debug, Default)]
pub struct AnimationLoop {
    pending: Option<FrameRequest>,
    handle: Option<TickHandle>,
    timer: FrameTimer,
}

impl AnimationLoop {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a fresh run with `handle`, dropping any previous one
    pub fn arm(&mut self, handle: TickHandle) {
        self.cancel();
        self.handle = Some(handle);
        self.timer.restart();
    }

    /// Cancel the pending callback and forget the handle
    pub fn cancel(&mut self) {
        if let Some(request) = self.pending.take() {
            request.cancel();
        }
        self.handle = None;
    }

    pub fn handle(&self) -> Option<TickHandle> {
        self.handle
    }

    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }

    pub fn set_pending(&mut self, request: Option<FrameRequest>) {
        self.pending = request;
    }

    /// Called at the top of a frame callback: the request has fired, so it
    /// is no longer pending. Returns the real seconds since the last frame.
    pub fn frame_dt(&mut self, now_ms: f64) -> f32 {
        self.pending = None;
        self.timer.delta(now_ms)
    }
}
