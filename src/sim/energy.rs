//! Energy meters
//!
//! Every apparatus reports its energy as three shares of a 100-point total:
//! gravitational potential (GPE), kinetic (KE) and the part lost to heat or
//! sound. The laws producing them live in `laws`.

use serde::{Deserialize, Serialize};

use super::apparatus::Apparatus;
use crate::consts::{CONTROL_MAX, ENERGY_TOTAL};
use crate::{clamp_control, clamp_elapsed, clamp_percent};

/// One evaluation of the three energy meters (each 0-100)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EnergyFrame {
    pub gpe: f32,
    pub ke: f32,
    pub loss: f32,
}

impl EnergyFrame {
    /// Build a frame, clamping each channel to [0, 100]
    pub fn new(gpe: f32, ke: f32, loss: f32) -> Self {
        Self {
            gpe: clamp_percent(gpe),
            ke: clamp_percent(ke),
            loss: clamp_percent(loss),
        }
    }

    /// Nothing put in yet: only the constant loss shows
    pub fn rest(loss: f32) -> Self {
        Self::new(0.0, 0.0, loss)
    }

    /// Split what is left after a constant `loss` between GPE and KE.
    ///
    /// `height_share` is the current height as a fraction of the highest
    /// point of the motion (1 = top, 0 = bottom).
    pub fn from_height_share(height_share: f32, loss: f32) -> Self {
        let mechanical = ENERGY_TOTAL - loss;
        let gpe = height_share.clamp(0.0, 1.0) * mechanical;
        Self::new(gpe, mechanical - gpe, loss)
    }

    /// Sum of all three channels
    pub fn total(&self) -> f32 {
        self.gpe + self.ke + self.loss
    }
}

/// Evaluate the energy meters for `apparatus`.
///
/// `control` is the slider reading (clamped to [0, 100]); `elapsed` is
/// seconds since the last reset (clamped to >= 0). At control 0 nothing has
/// been put into the apparatus and the rest frame is returned.
pub fn compute_energy(apparatus: Apparatus, control: f32, elapsed: f32) -> EnergyFrame {
    let law = apparatus.law();
    let c = clamp_control(control) / CONTROL_MAX;
    if c <= 0.0 {
        return EnergyFrame::rest(law.rest_loss);
    }
    let frame = (law.energy)(c, clamp_elapsed(elapsed));
    EnergyFrame::new(frame.gpe, frame.ke, frame.loss)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f32::consts::FRAC_PI_4;

    fn close(a: f32, b: f32, eps: f32) -> bool {
        (a - b).abs() <= eps
    }

    #[test]
    fn test_from_height_share() {
        let top = EnergyFrame::from_height_share(1.0, 5.0);
        assert_eq!(top, EnergyFrame::new(95.0, 0.0, 5.0));

        let bottom = EnergyFrame::from_height_share(0.0, 5.0);
        assert_eq!(bottom, EnergyFrame::new(0.0, 95.0, 5.0));

        // Out-of-range shares are pinned
        assert_eq!(EnergyFrame::from_height_share(1.5, 5.0), top);
    }

    #[test]
    fn test_control_zero_is_rest_frame() {
        for apparatus in Apparatus::ALL {
            for t in [0.0, 0.7, 3.3] {
                let frame = compute_energy(apparatus, 0.0, t);
                assert_eq!(frame.gpe, 0.0, "{apparatus:?}");
                assert_eq!(frame.ke, 0.0, "{apparatus:?}");
                assert_eq!(frame.loss, apparatus.law().rest_loss, "{apparatus:?}");
            }
        }
    }

    #[test]
    fn test_swing_extreme_at_time_zero() {
        // Cosine law: t = 0 is the top of the arc
        let frame = compute_energy(Apparatus::Swing, 100.0, 0.0);
        assert!(frame.gpe > frame.ke);
        assert!(close(frame.gpe, 95.0, 0.01), "gpe = {}", frame.gpe);
        assert!(close(frame.ke, 0.0, 0.01), "ke = {}", frame.ke);
        assert_eq!(frame.loss, 5.0);
    }

    #[test]
    fn test_swing_bottom_of_arc() {
        // 2t = π/2 puts the phase angle at zero
        let frame = compute_energy(Apparatus::Swing, 100.0, FRAC_PI_4);
        assert!(close(frame.gpe, 0.0, 0.01), "gpe = {}", frame.gpe);
        assert!(close(frame.ke, 95.0, 0.01), "ke = {}", frame.ke);
    }

    #[test]
    fn test_swing_extreme_independent_of_push() {
        // Smaller pushes still reach full GPE at the top of a smaller arc
        let frame = compute_energy(Apparatus::Swing, 10.0, 0.0);
        assert!(close(frame.gpe, 95.0, 0.05), "gpe = {}", frame.gpe);
    }

    #[test]
    fn test_slide_top_and_bottom() {
        let top = compute_energy(Apparatus::Slide, 100.0, 0.0);
        assert_eq!(top.gpe, 100.0);
        assert_eq!(top.ke, 0.0);
        assert_eq!(top.loss, 0.0);

        for control in [1.0, 50.0, 100.0] {
            // Just before the ride wraps around
            let bottom = compute_energy(Apparatus::Slide, control, 1.999);
            assert!(bottom.gpe < 0.1, "gpe = {}", bottom.gpe);
            assert!(bottom.ke > 79.9 && bottom.ke <= 90.0, "ke = {}", bottom.ke);
            assert!(close(bottom.total(), 100.0, 0.01));
        }
    }

    #[test]
    fn test_slide_steeper_keeps_more_ke() {
        let shallow = compute_energy(Apparatus::Slide, 20.0, 1.5);
        let steep = compute_energy(Apparatus::Slide, 90.0, 1.5);
        assert!(steep.ke > shallow.ke);
        assert!(steep.loss < shallow.loss);
    }

    #[test]
    fn test_roundabout_slows_down() {
        let pushed = compute_energy(Apparatus::Roundabout, 80.0, 0.0);
        let coasting = compute_energy(Apparatus::Roundabout, 80.0, 3.0);
        assert!(close(pushed.ke, 80.0, 1e-3));
        assert_eq!(pushed.gpe, 0.0);
        assert!(coasting.ke < pushed.ke);
        assert!(coasting.loss > pushed.loss);
    }

    #[test]
    fn test_roundabout_push_strength_moves_meters() {
        let gentle = compute_energy(Apparatus::Roundabout, 20.0, 1.0);
        let hard = compute_energy(Apparatus::Roundabout, 100.0, 1.0);
        assert!(hard.ke > gentle.ke);
        assert!(hard.loss < gentle.loss);
        assert!(close(gentle.ke + gentle.loss, 100.0, 1e-3));
    }

    #[test]
    fn test_climber_sitting_on_top_has_only_gpe_and_heat() {
        // Full speed: 3 s climb then 1 s sitting still
        let frame = compute_energy(Apparatus::Climber, 100.0, 3.5);
        assert!(close(frame.gpe, 90.0, 0.01));
        assert_eq!(frame.ke, 0.0);
        assert!(close(frame.loss, 10.0, 0.01));
    }

    #[test]
    fn test_invalid_inputs_are_coerced() {
        let nan = compute_energy(Apparatus::Swing, f32::NAN, 1.0);
        assert_eq!(nan, EnergyFrame::rest(5.0));

        let high = compute_energy(Apparatus::Swing, 250.0, 1.0);
        assert_eq!(high, compute_energy(Apparatus::Swing, 100.0, 1.0));

        let negative_time = compute_energy(Apparatus::Slide, 50.0, -4.0);
        assert_eq!(negative_time, compute_energy(Apparatus::Slide, 50.0, 0.0));
    }

    proptest! {
        #[test]
        fn prop_channels_in_range_and_sum_to_total(
            index in 0usize..5,
            control in 0.0f32..=100.0,
            elapsed in 0.0f32..120.0,
        ) {
            let apparatus = Apparatus::ALL[index];
            let frame = compute_energy(apparatus, control, elapsed);
            for channel in [frame.gpe, frame.ke, frame.loss] {
                prop_assert!((0.0..=100.0).contains(&channel));
            }
            if control > 0.0 {
                prop_assert!((frame.total() - 100.0).abs() <= 1.0, "{:?}", frame);
            }
        }

        #[test]
        fn prop_energy_is_deterministic(
            index in 0usize..5,
            control in -50.0f32..150.0,
            elapsed in -10.0f32..120.0,
        ) {
            let apparatus = Apparatus::ALL[index];
            prop_assert_eq!(
                compute_energy(apparatus, control, elapsed),
                compute_energy(apparatus, control, elapsed)
            );
        }
    }
}
