//! Deterministic simulation module
//!
//! Energy and pose laws are pure functions of (apparatus, control, elapsed).
//! The clock is the only stateful part:
//! - Fixed timestep only
//! - No rendering or platform dependencies

pub mod apparatus;
pub mod clock;
pub mod energy;
pub mod frame;
pub mod laws;
pub mod pose;

pub use apparatus::{Apparatus, ApparatusLaw};
pub use clock::{ClockPhase, SimulationClock, SimulationState, TickHandle, TickOutcome};
pub use energy::{EnergyFrame, compute_energy};
pub use frame::{Frame, FrameSink, RecordingSink};
pub use pose::{PoseFrame, compute_pose};
