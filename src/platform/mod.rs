//! Platform abstraction layer
//!
//! Frame timing is shared; the browser animation loop lives in `web`.

#[cfg(target_arch = "wasm32")]
pub mod web;

use crate::consts::SIM_DT;

/// Turns animation-frame timestamps (milliseconds) into frame deltas
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FrameTimer {
    last_ms: Option<f64>,
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the last timestamp. The next delta is one `SIM_DT`.
    pub fn restart(&mut self) {
        self.last_ms = None;
    }

    /// Seconds since the previous timestamp
    pub fn delta(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0).max(0.0) as f32,
            None => SIM_DT,
        };
        self.last_ms = Some(now_ms);
        dt
    }
}
