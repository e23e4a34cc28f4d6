//! Playground Energy - energy transformations on playground apparatuses
//!
//! Core modules:
//! - `sim`: Deterministic simulation (energy laws, poses, animation clock)
//! - `renderer`: SVG scene building and the DOM frame sink
//! - `platform`: Browser animation loop
//! - `persistence`: LocalStorage access
//! - `quiz` / `progress`: Per-apparatus questions and the persisted score

pub mod content;
pub mod error;
pub mod persistence;
pub mod platform;
pub mod progress;
pub mod quiz;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::SimError;
pub use progress::Progress;
pub use settings::{PlaybackPreset, Settings};

use glam::Vec2;

/// Simulation configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;
    /// Longest real frame gap fed into the accumulator (seconds)
    pub const MAX_FRAME_DT: f32 = 0.1;

    /// Square viewport all poses are expressed in (y grows downward)
    pub const VIEWPORT_SIZE: f32 = 200.0;

    /// Slider range
    pub const CONTROL_MIN: f32 = 0.0;
    pub const CONTROL_MAX: f32 = 100.0;

    /// Every energy frame is a share of this total
    pub const ENERGY_TOTAL: f32 = 100.0;
}

/// Clamp a slider reading to [0, 100]. NaN reads as 0.
#[inline]
pub fn clamp_control(value: f32) -> f32 {
    if value.is_nan() {
        return consts::CONTROL_MIN;
    }
    value.clamp(consts::CONTROL_MIN, consts::CONTROL_MAX)
}

/// Clamp elapsed simulation time to >= 0. NaN and infinities read as 0.
#[inline]
pub fn clamp_elapsed(seconds: f32) -> f32 {
    if seconds.is_finite() {
        seconds.max(0.0)
    } else {
        0.0
    }
}

/// Clamp an energy channel to [0, 100]. NaN reads as 0.
#[inline]
pub fn clamp_percent(value: f32) -> f32 {
    if value.is_nan() {
        return 0.0;
    }
    value.clamp(0.0, consts::ENERGY_TOTAL)
}

/// Point at the end of a link of `length` hanging from `pivot`, swung by
/// `angle` radians from straight down (screen coordinates)
#[inline]
pub fn pendulum_point(pivot: Vec2, length: f32, angle: f32) -> Vec2 {
    pivot + Vec2::new(length * angle.sin(), length * angle.cos())
}

/// Convert polar (r, theta) to cartesian (x, y) around `center`
#[inline]
pub fn polar_to_cartesian(center: Vec2, r: f32, theta: f32) -> Vec2 {
    center + Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_clamp_control() {
        assert_eq!(clamp_control(-5.0), 0.0);
        assert_eq!(clamp_control(150.0), 100.0);
        assert_eq!(clamp_control(42.5), 42.5);
        assert_eq!(clamp_control(f32::NAN), 0.0);
    }

    #[test]
    fn test_pendulum_point() {
        let pivot = Vec2::new(100.0, 20.0);
        let rest = pendulum_point(pivot, 100.0, 0.0);
        assert!((rest - Vec2::new(100.0, 120.0)).length() < 1e-4);

        // Quarter turn puts the bob level with the pivot
        let side = pendulum_point(pivot, 100.0, FRAC_PI_2);
        assert!((side - Vec2::new(200.0, 20.0)).length() < 1e-3);
    }
}
