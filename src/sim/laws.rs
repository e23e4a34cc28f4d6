//! Per-apparatus motion laws
//!
//! Each apparatus has one motion variable (swing angle, slide progress,
//! plank tilt, push phase, climb height) computed from the normalized
//! control `c` in (0, 1] and elapsed seconds `t`. Both the energy law and the
//! pose law of an apparatus read that same variable.
//!
//! The motion is a stylized periodic approximation, not integrated physics.

use std::f32::consts::{PI, TAU};

use glam::Vec2;

use super::energy::EnergyFrame;
use super::pose::PoseFrame;
use crate::consts::ENERGY_TOTAL;
use crate::{pendulum_point, polar_to_cartesian};

// === Swing ===

pub const SWING_PIVOT: Vec2 = Vec2::new(100.0, 20.0);
pub const SWING_ROPE_LENGTH: f32 = 100.0;
/// Amplitude at full push (radians)
pub const SWING_MAX_AMPLITUDE: f32 = 1.0;
/// Angular frequency of the oscillation (rad/s)
pub const SWING_OMEGA: f32 = 2.0;
/// Air resistance and creaking chains
pub const SWING_LOSS: f32 = 5.0;

/// (amplitude, angle). Cosine law: the swing starts at the top of its arc.
fn swing_angle(c: f32, t: f32) -> (f32, f32) {
    let amplitude = c * SWING_MAX_AMPLITUDE;
    (amplitude, amplitude * (SWING_OMEGA * t).cos())
}

pub fn swing_energy(c: f32, t: f32) -> EnergyFrame {
    let (amplitude, theta) = swing_angle(c, t);
    // Height above the bottom is L(1 - cos θ) = 2L sin²(θ/2)
    let top = (amplitude * 0.5).sin().powi(2);
    let share = if top > 0.0 {
        (theta * 0.5).sin().powi(2) / top
    } else {
        0.0
    };
    EnergyFrame::from_height_share(share, SWING_LOSS)
}

pub fn swing_pose(c: f32, t: f32) -> PoseFrame {
    let (_, theta) = swing_angle(c, t);
    PoseFrame::Swing {
        pivot: SWING_PIVOT,
        seat: pendulum_point(SWING_PIVOT, SWING_ROPE_LENGTH, theta),
        angle: theta,
    }
}

// === Slide ===

/// Bottom of the ladder; the rider starts straight above it
pub const SLIDE_FOOT: Vec2 = Vec2::new(40.0, 160.0);
/// Horizontal length of the slope
pub const SLIDE_RUN: f32 = 120.0;
/// Ladder height at full slider
pub const SLIDE_MAX_HEIGHT: f32 = 100.0;
/// Seconds per ride
pub const SLIDE_PERIOD: f32 = 2.0;
/// KE share reaching the bottom of the shallowest slide; friction takes the rest
pub const SLIDE_MIN_KE: f32 = 80.0;
/// Extra KE share kept by the steepest slide
pub const SLIDE_STEEPNESS_BONUS: f32 = 10.0;

fn slide_progress(t: f32) -> f32 {
    t.rem_euclid(SLIDE_PERIOD) / SLIDE_PERIOD
}

pub fn slide_energy(c: f32, t: f32) -> EnergyFrame {
    let p = slide_progress(t);
    let gpe = (1.0 - p) * ENERGY_TOTAL;
    let ke = p * (SLIDE_MIN_KE + SLIDE_STEEPNESS_BONUS * c);
    EnergyFrame::new(gpe, ke, ENERGY_TOTAL - gpe - ke)
}

pub fn slide_pose(c: f32, t: f32) -> PoseFrame {
    let p = slide_progress(t);
    let height = c * SLIDE_MAX_HEIGHT;
    let top = SLIDE_FOOT - Vec2::new(0.0, height);
    PoseFrame::Slide {
        top,
        ball: Vec2::new(SLIDE_FOOT.x + SLIDE_RUN * p, top.y + height * p),
        progress: p,
    }
}

// === See-saw ===

pub const SEESAW_PIVOT: Vec2 = Vec2::new(100.0, 150.0);
pub const SEESAW_HALF_LENGTH: f32 = 80.0;
/// Tilt at full weight (radians, ~20°)
pub const SEESAW_MAX_TILT: f32 = 0.35;
pub const SEESAW_OMEGA: f32 = 1.5;
/// The thud on the ground
pub const SEESAW_LOSS: f32 = 8.0;

/// (amplitude, tilt)
fn seesaw_tilt(c: f32, t: f32) -> (f32, f32) {
    let amplitude = c * SEESAW_MAX_TILT;
    (amplitude, amplitude * (SEESAW_OMEGA * t).cos())
}

pub fn seesaw_energy(c: f32, t: f32) -> EnergyFrame {
    let (amplitude, phi) = seesaw_tilt(c, t);
    // The raised seat sits half_length * |sin φ| above the pivot
    let top = amplitude.sin();
    let share = if top > 0.0 { phi.sin().abs() / top } else { 0.0 };
    EnergyFrame::from_height_share(share, SEESAW_LOSS)
}

pub fn seesaw_pose(c: f32, t: f32) -> PoseFrame {
    let (_, phi) = seesaw_tilt(c, t);
    let half = Vec2::new(phi.cos(), -phi.sin()) * SEESAW_HALF_LENGTH;
    PoseFrame::Seesaw {
        pivot: SEESAW_PIVOT,
        left: SEESAW_PIVOT - half,
        right: SEESAW_PIVOT + half,
        angle: phi,
    }
}

// === Roundabout ===

pub const ROUNDABOUT_HUB: Vec2 = Vec2::new(100.0, 100.0);
pub const ROUNDABOUT_RADIUS: f32 = 70.0;
/// Seconds between pushes
pub const ROUNDABOUT_PUSH_PERIOD: f32 = 4.0;
/// Spin right after the strongest push (rad/s, half a turn per second)
pub const ROUNDABOUT_MAX_SPIN: f32 = PI;

/// (completed pushes, seconds since the last push)
fn push_phase(t: f32) -> (f32, f32) {
    let pushes = (t / ROUNDABOUT_PUSH_PERIOD).floor();
    (pushes, t - pushes * ROUNDABOUT_PUSH_PERIOD)
}

pub fn roundabout_energy(c: f32, t: f32) -> EnergyFrame {
    let (_, tau) = push_phase(t);
    // Friction slows it linearly until the next push
    let speed = (1.0 - tau / ROUNDABOUT_PUSH_PERIOD).clamp(0.0, 1.0);
    // A weak push leaves most of the effort as heat in the bearings
    let ke = c * speed * speed * ENERGY_TOTAL;
    EnergyFrame::new(0.0, ke, ENERGY_TOTAL - ke)
}

pub fn roundabout_pose(c: f32, t: f32) -> PoseFrame {
    let (pushes, tau) = push_phase(t);
    let omega = c * ROUNDABOUT_MAX_SPIN;
    let period = ROUNDABOUT_PUSH_PERIOD;
    // Each push coasts through ω·T/2 radians
    let turned = pushes * omega * period * 0.5 + omega * (tau - tau * tau / (2.0 * period));
    let rotation = turned.rem_euclid(TAU);
    PoseFrame::Roundabout {
        hub: ROUNDABOUT_HUB,
        rider: polar_to_cartesian(ROUNDABOUT_HUB, ROUNDABOUT_RADIUS, rotation),
        rotation,
    }
}

// === Climbing frame ===

pub const CLIMBER_BASE: Vec2 = Vec2::new(100.0, 170.0);
pub const CLIMBER_FRAME_HEIGHT: f32 = 120.0;
/// Seconds to reach the top at full speed
pub const CLIMBER_CLIMB_SECS: f32 = 3.0;
/// Seconds sitting on top before starting over
pub const CLIMBER_REST_SECS: f32 = 1.0;
/// GPE share on top; the rest went to body heat
pub const CLIMBER_TOP_GPE: f32 = 90.0;
/// KE share while climbing at full speed
pub const CLIMBER_MAX_KE: f32 = 20.0;

fn climb_height(c: f32, t: f32) -> f32 {
    if c <= 0.0 {
        return 0.0;
    }
    let climb = CLIMBER_CLIMB_SECS / c;
    let tau = t.rem_euclid(climb + CLIMBER_REST_SECS);
    (tau / climb).min(1.0)
}

pub fn climber_energy(c: f32, t: f32) -> EnergyFrame {
    let p = climb_height(c, t);
    let gpe = p * CLIMBER_TOP_GPE;
    // Slows down near the top; sitting still on top means no KE
    let ke = CLIMBER_MAX_KE * c * (1.0 - p);
    EnergyFrame::new(gpe, ke, ENERGY_TOTAL - gpe - ke)
}

pub fn climber_pose(c: f32, t: f32) -> PoseFrame {
    let p = climb_height(c, t);
    PoseFrame::Climber {
        base: CLIMBER_BASE,
        climber: CLIMBER_BASE - Vec2::new(0.0, CLIMBER_FRAME_HEIGHT * p),
        height_fraction: p,
    }
}
