//! Frames and the renderer boundary

use serde::{Deserialize, Serialize};

use super::apparatus::Apparatus;
use super::energy::{EnergyFrame, compute_energy};
use super::pose::{PoseFrame, compute_pose};
use crate::{clamp_control, clamp_elapsed};

/// Everything the renderer needs for one picture
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    pub apparatus: Apparatus,
    /// Seconds since the last reset
    pub elapsed: f32,
    /// Slider reading the frame was computed from
    pub control: f32,
    pub energy: EnergyFrame,
    pub pose: PoseFrame,
}

impl Frame {
    /// Evaluate both models for one instant
    pub fn evaluate(apparatus: Apparatus, control: f32, elapsed: f32) -> Self {
        let control = clamp_control(control);
        let elapsed = clamp_elapsed(elapsed);
        Self {
            apparatus,
            elapsed,
            control,
            energy: compute_energy(apparatus, control, elapsed),
            pose: compute_pose(apparatus, control, elapsed),
        }
    }
}

/// Where frames go. Implemented by the UI layer.
pub trait FrameSink {
    /// Whether a visual target exists right now. Frames are not presented
    /// to an unmounted sink.
    fn is_mounted(&self) -> bool {
        true
    }

    fn present(&mut self, frame: &Frame);
}

/// Sink that keeps every presented frame (headless runs and tests)
#[derive(Debug)]
pub struct RecordingSink {
    pub frames: Vec<Frame>,
    /// When false the sink reports itself unmounted
    pub mounted: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self {
            frames: Vec::new(),
            mounted: true,
        }
    }

    pub fn last(&self) -> Option<&Frame> {
        self.frames.last()
    }
}

impl Default for RecordingSink {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameSink for RecordingSink {
    fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn present(&mut self, frame: &Frame) {
        self.frames.push(*frame);
    }
}
