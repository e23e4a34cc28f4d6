//! Rendering module
//!
//! SVG scenes for the apparatus stage and CSS widths for the energy meters.
//! The simulation only sees this through `FrameSink`.

#[cfg(target_arch = "wasm32")]
pub mod dom;
pub mod svg;

#[cfg(target_arch = "wasm32")]
pub use dom::DomRenderer;
pub use svg::{AttributeUpdate, pose_updates, scene_markup};

use crate::clamp_percent;
use crate::sim::EnergyFrame;

/// Meter bar widths in percent, rounded to one decimal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeterWidths {
    pub gpe: f32,
    pub ke: f32,
    pub loss: f32,
}

impl MeterWidths {
    pub fn from_energy(energy: &EnergyFrame) -> Self {
        Self {
            gpe: round_tenth(energy.gpe),
            ke: round_tenth(energy.ke),
            loss: round_tenth(energy.loss),
        }
    }

    /// (element id, width) for each bar
    pub fn bars(&self) -> [(&'static str, f32); 3] {
        [
            ("bar-gpe", self.gpe),
            ("bar-ke", self.ke),
            ("bar-loss", self.loss),
        ]
    }
}

/// Inline style for a bar of `width` percent
pub fn width_style(width: f32) -> String {
    format!("width: {:.1}%", width)
}

/// Text printed on a bar
pub fn meter_label(width: f32) -> String {
    format!("{:.0}%", width)
}

fn round_tenth(value: f32) -> f32 {
    (clamp_percent(value) * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meter_widths() {
        let widths = MeterWidths::from_energy(&EnergyFrame::new(33.333, 61.66, 5.0));
        assert_eq!(widths.gpe, 33.3);
        assert_eq!(widths.ke, 61.7);
        assert_eq!(widths.bars()[2], ("bar-loss", 5.0));
        assert_eq!(width_style(widths.ke), "width: 61.7%");
        assert_eq!(meter_label(widths.gpe), "33%");
    }
}
