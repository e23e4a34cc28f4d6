//! Apparatus poses
//!
//! Geometry of the moving parts in a 200x200 viewport (y grows downward).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::apparatus::Apparatus;
use crate::consts::CONTROL_MAX;
use crate::{clamp_control, clamp_elapsed};

/// Positions and angles of one apparatus at one instant
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum PoseFrame {
    /// Rope from `pivot` to `seat`, `angle` radians from vertical
    Swing { pivot: Vec2, seat: Vec2, angle: f32 },
    /// Ball riding down from `top` to the foot of the run
    Slide { top: Vec2, ball: Vec2, progress: f32 },
    /// Plank ends around `pivot`, tilted by `angle` radians
    Seesaw {
        pivot: Vec2,
        left: Vec2,
        right: Vec2,
        angle: f32,
    },
    /// Rider on the rim, disc turned by `rotation` radians in [0, 2π)
    Roundabout { hub: Vec2, rider: Vec2, rotation: f32 },
    /// Climber on the frame; `height_fraction` is 0 at `base`, 1 on top
    Climber {
        base: Vec2,
        climber: Vec2,
        height_fraction: f32,
    },
}

impl PoseFrame {
    pub fn apparatus(&self) -> Apparatus {
        match self {
            PoseFrame::Swing { .. } => Apparatus::Swing,
            PoseFrame::Slide { .. } => Apparatus::Slide,
            PoseFrame::Seesaw { .. } => Apparatus::Seesaw,
            PoseFrame::Roundabout { .. } => Apparatus::Roundabout,
            PoseFrame::Climber { .. } => Apparatus::Climber,
        }
    }
}

/// Evaluate the pose of `apparatus`.
///
/// Uses the same angle or progress as `compute_energy`, so the picture and
/// the meters agree. At control 0 the rest pose is returned.
pub fn compute_pose(apparatus: Apparatus, control: f32, elapsed: f32) -> PoseFrame {
    let law = apparatus.law();
    let c = clamp_control(control) / CONTROL_MAX;
    if c <= 0.0 {
        return (law.pose)(0.0, 0.0);
    }
    (law.pose)(c, clamp_elapsed(elapsed))
}
