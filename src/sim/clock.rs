//! Animation clock
//!
//! The only stateful, time-driven part of the simulation. States:
//! - `Idle`: no apparatus selected
//! - `Ready`: apparatus selected, time frozen
//! - `Running`: ticking
//!
//! `start()` hands out a `TickHandle` stamped with the current generation.
//! Pause, reset, select and leave bump the generation, so a tick scheduled
//! before any of them can never advance the clock again.

use serde::{Deserialize, Serialize};

use super::apparatus::Apparatus;
use super::frame::{Frame, FrameSink};
use crate::clamp_control;
use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};
use crate::error::SimError;

/// Clock state machine phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClockPhase {
    Idle,
    Ready,
    Running,
}

/// Token for one run of the tick loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickHandle {
    generation: u64,
}

impl TickHandle {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

/// What a tick did
#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    /// Time advanced and the frame was presented; schedule the next tick
    Emitted(Frame),
    /// The sink is not mounted; the clock paused itself
    Suspended,
    /// The handle is stale or the clock is not running; nothing happened
    Cancelled,
}

impl TickOutcome {
    /// Whether the caller should schedule another tick
    pub fn keep_running(&self) -> bool {
        matches!(self, TickOutcome::Emitted(_))
    }
}

/// Per-session simulation state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub apparatus: Option<Apparatus>,
    /// Slider reading in [0, 100]
    pub control: f32,
    /// Seconds since the last reset. Kept in f64 so long runs keep advancing.
    pub elapsed: f64,
}

/// Owns the simulation state and drives the tick loop
#[derive(Debug, Clone)]
pub struct SimulationClock {
    state: SimulationState,
    phase: ClockPhase,
    generation: u64,
    /// Simulated seconds per real second
    playback_speed: f32,
    accumulator: f32,
}

impl Default for SimulationClock {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl SimulationClock {
    pub fn new(playback_speed: f32) -> Self {
        Self {
            state: SimulationState::default(),
            phase: ClockPhase::Idle,
            generation: 0,
            playback_speed: sanitize_speed(playback_speed),
            accumulator: 0.0,
        }
    }

    pub fn phase(&self) -> ClockPhase {
        self.phase
    }

    pub fn is_playing(&self) -> bool {
        self.phase == ClockPhase::Running
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn apparatus(&self) -> Option<Apparatus> {
        self.state.apparatus
    }

    pub fn control(&self) -> f32 {
        self.state.control
    }

    pub fn elapsed(&self) -> f32 {
        self.state.elapsed as f32
    }

    pub fn playback_speed(&self) -> f32 {
        self.playback_speed
    }

    pub fn set_playback_speed(&mut self, speed: f32) {
        self.playback_speed = sanitize_speed(speed);
    }

    /// Handle of the live tick loop, if running
    pub fn handle(&self) -> Option<TickHandle> {
        self.is_playing().then_some(TickHandle {
            generation: self.generation,
        })
    }

    /// Recompute the frame for the current state (None when idle)
    pub fn frame(&self) -> Option<Frame> {
        self.state
            .apparatus
            .map(|a| Frame::evaluate(a, self.state.control, self.state.elapsed as f32))
    }

    /// Switch to `apparatus`: stop, rewind, restore its default control
    pub fn select(&mut self, apparatus: Apparatus, sink: &mut dyn FrameSink) -> Frame {
        self.cancel();
        self.state = SimulationState {
            apparatus: Some(apparatus),
            control: clamp_control(apparatus.info().default_control),
            elapsed: 0.0,
        };
        self.phase = ClockPhase::Ready;
        log::info!("Selected {}", apparatus);

        let frame = Frame::evaluate(apparatus, self.state.control, 0.0);
        emit(&frame, sink);
        frame
    }

    /// Switch by identifier. Unknown identifiers leave the clock untouched.
    pub fn select_id(&mut self, id: &str, sink: &mut dyn FrameSink) -> Result<Frame, SimError> {
        let apparatus = Apparatus::from_id(id)?;
        Ok(self.select(apparatus, sink))
    }

    /// Navigate away: stop and forget the apparatus
    pub fn leave(&mut self) {
        self.cancel();
        if let Some(apparatus) = self.state.apparatus {
            log::info!("Left {}", apparatus);
        }
        self.state = SimulationState::default();
        self.phase = ClockPhase::Idle;
    }

    /// Begin ticking. Already running returns the live handle.
    pub fn start(&mut self) -> Result<TickHandle, SimError> {
        match self.phase {
            ClockPhase::Idle => Err(SimError::NoApparatus),
            ClockPhase::Running => Ok(TickHandle {
                generation: self.generation,
            }),
            ClockPhase::Ready => {
                self.cancel();
                self.phase = ClockPhase::Running;
                log::info!("Started at t={:.2}s", self.state.elapsed);
                Ok(TickHandle {
                    generation: self.generation,
                })
            }
        }
    }

    /// Stop ticking, keep the elapsed time. Returns false if not running.
    pub fn pause(&mut self) -> bool {
        if self.phase != ClockPhase::Running {
            return false;
        }
        self.cancel();
        self.phase = ClockPhase::Ready;
        log::info!("Paused at t={:.2}s", self.state.elapsed);
        true
    }

    /// Play/pause button. Returns the new handle when it started.
    pub fn toggle(&mut self) -> Result<Option<TickHandle>, SimError> {
        if self.pause() {
            Ok(None)
        } else {
            self.start().map(Some)
        }
    }

    /// Stop, rewind to t=0, restore the default control and present the
    /// initial frame again
    pub fn reset(&mut self, sink: &mut dyn FrameSink) -> Option<Frame> {
        self.cancel();
        self.state.elapsed = 0.0;
        let apparatus = self.state.apparatus?;
        self.state.control = clamp_control(apparatus.info().default_control);
        self.phase = ClockPhase::Ready;
        log::info!("Reset {}", apparatus);

        let frame = Frame::evaluate(apparatus, self.state.control, 0.0);
        emit(&frame, sink);
        Some(frame)
    }

    /// Slider moved. While running the next tick picks it up; otherwise the
    /// frame for the new value is presented immediately.
    pub fn set_control(&mut self, value: f32, sink: &mut dyn FrameSink) -> Option<Frame> {
        self.state.control = clamp_control(value);
        if self.phase != ClockPhase::Ready {
            return None;
        }
        let frame = self.frame()?;
        emit(&frame, sink);
        Some(frame)
    }

    /// Advance by `frame_dt` real seconds and present the new frame.
    ///
    /// Time moves in whole `SIM_DT` steps; the remainder carries over to the
    /// next tick. The control value is read once, before advancing.
    pub fn tick(
        &mut self,
        handle: TickHandle,
        frame_dt: f32,
        sink: &mut dyn FrameSink,
    ) -> TickOutcome {
        if handle.generation != self.generation || self.phase != ClockPhase::Running {
            return TickOutcome::Cancelled;
        }
        let Some(apparatus) = self.state.apparatus else {
            return TickOutcome::Cancelled;
        };
        if !sink.is_mounted() {
            self.pause();
            log::info!("Auto-paused ({} view not mounted)", apparatus);
            return TickOutcome::Suspended;
        }

        let control = self.state.control;
        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator += dt * self.playback_speed;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.state.elapsed += f64::from(SIM_DT);
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            // Too far behind: drop the backlog instead of catching up
            self.accumulator = self.accumulator.min(SIM_DT);
        }

        let frame = Frame::evaluate(apparatus, control, self.state.elapsed as f32);
        sink.present(&frame);
        TickOutcome::Emitted(frame)
    }

    /// Invalidate every outstanding handle
    fn cancel(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.accumulator = 0.0;
    }
}

fn sanitize_speed(speed: f32) -> f32 {
    if speed.is_finite() && speed > 0.0 {
        speed
    } else {
        1.0
    }
}

fn emit(frame: &Frame, sink: &mut dyn FrameSink) {
    if sink.is_mounted() {
        sink.present(frame);
    } else {
        log::debug!("No render target for {}, frame skipped", frame.apparatus);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::RecordingSink;

    fn ready_clock(apparatus: Apparatus) -> (SimulationClock, RecordingSink) {
        let mut clock = SimulationClock::new(1.0);
        let mut sink = RecordingSink::new();
        clock.select(apparatus, &mut sink);
        (clock, sink)
    }

    fn run(
        clock: &mut SimulationClock,
        handle: TickHandle,
        ticks: usize,
        sink: &mut RecordingSink,
    ) {
        for _ in 0..ticks {
            assert!(clock.tick(handle, SIM_DT, sink).keep_running());
        }
    }

    #[test]
    fn test_new_clock_is_idle() {
        let mut clock = SimulationClock::default();
        assert_eq!(clock.phase(), ClockPhase::Idle);
        assert_eq!(clock.apparatus(), None);
        assert_eq!(clock.frame(), None);
        assert_eq!(clock.start(), Err(SimError::NoApparatus));

        let mut sink = RecordingSink::new();
        assert_eq!(clock.reset(&mut sink), None);
        assert!(sink.frames.is_empty());
        assert_eq!(clock.phase(), ClockPhase::Idle);
    }

    #[test]
    fn test_select_emits_initial_frame() {
        let (clock, sink) = ready_clock(Apparatus::Swing);
        assert_eq!(clock.phase(), ClockPhase::Ready);
        assert_eq!(clock.control(), 50.0);
        assert_eq!(clock.elapsed(), 0.0);
        assert_eq!(sink.frames.len(), 1);
        assert_eq!(sink.last(), clock.frame().as_ref());
    }

    #[test]
    fn test_select_unknown_id_fails_fast() {
        let (mut clock, mut sink) = ready_clock(Apparatus::Slide);
        let err = clock.select_id("zipline", &mut sink).unwrap_err();
        assert_eq!(err, SimError::UnknownApparatus("zipline".to_string()));
        assert_eq!(clock.apparatus(), Some(Apparatus::Slide));
        assert_eq!(sink.frames.len(), 1);

        let frame = clock.select_id("climber", &mut sink).unwrap();
        assert_eq!(frame.apparatus, Apparatus::Climber);
    }

    #[test]
    fn test_ticks_advance_fixed_steps() {
        let (mut clock, mut sink) = ready_clock(Apparatus::Swing);
        let handle = clock.start().unwrap();
        assert!(clock.is_playing());

        run(&mut clock, handle, 30, &mut sink);
        assert!((clock.elapsed() - 30.0 * SIM_DT).abs() < 1e-4);
        assert_eq!(sink.frames.len(), 31);
        assert!((sink.last().unwrap().elapsed - clock.elapsed()).abs() < 1e-6);
    }

    #[test]
    fn test_playback_speed_scales_time() {
        let mut clock = SimulationClock::new(2.0);
        let mut sink = RecordingSink::new();
        clock.select(Apparatus::Slide, &mut sink);
        let handle = clock.start().unwrap();
        for _ in 0..10 {
            clock.tick(handle, SIM_DT, &mut sink);
        }
        assert!((clock.elapsed() - 20.0 * SIM_DT).abs() < 1e-3);
    }

    #[test]
    fn test_long_frame_gap_is_capped() {
        let (mut clock, mut sink) = ready_clock(Apparatus::Swing);
        let handle = clock.start().unwrap();
        clock.tick(handle, 5.0, &mut sink);
        assert!(clock.elapsed() <= MAX_FRAME_DT + 1e-4);

        // Garbage frame times do not move the clock
        let before = clock.elapsed();
        clock.tick(handle, f32::NAN, &mut sink);
        clock.tick(handle, -1.0, &mut sink);
        assert_eq!(clock.elapsed(), before);
    }

    #[test]
    fn test_start_twice_is_noop() {
        let (mut clock, _sink) = ready_clock(Apparatus::Swing);
        let first = clock.start().unwrap();
        let second = clock.start().unwrap();
        assert_eq!(first, second);
        assert_eq!(clock.handle(), Some(first));
    }

    #[test]
    fn test_pause_freezes_time_and_frame() {
        let (mut clock, mut sink) = ready_clock(Apparatus::Swing);
        let handle = clock.start().unwrap();
        run(&mut clock, handle, 12, &mut sink);

        assert!(clock.pause());
        assert!(!clock.pause());
        let elapsed = clock.elapsed();
        let frame = clock.frame();
        let emitted = sink.frames.len();

        // The stale tick scheduled before the pause must not fire
        for _ in 0..100 {
            assert_eq!(clock.tick(handle, SIM_DT, &mut sink), TickOutcome::Cancelled);
        }
        assert_eq!(clock.elapsed(), elapsed);
        assert_eq!(clock.frame(), frame);
        assert_eq!(sink.frames.len(), emitted);
        assert_eq!(clock.phase(), ClockPhase::Ready);
    }

    #[test]
    fn test_resume_after_pause_keeps_time() {
        let (mut clock, mut sink) = ready_clock(Apparatus::Seesaw);
        let old = clock.start().unwrap();
        run(&mut clock, old, 10, &mut sink);
        clock.pause();

        let new = clock.start().unwrap();
        assert_ne!(old, new);
        assert_eq!(clock.tick(old, SIM_DT, &mut sink), TickOutcome::Cancelled);
        run(&mut clock, new, 5, &mut sink);
        assert!((clock.elapsed() - 15.0 * SIM_DT).abs() < 1e-4);
    }

    #[test]
    fn test_reset_returns_to_initial_frame() {
        let (mut clock, mut sink) = ready_clock(Apparatus::Swing);
        let initial = *sink.last().unwrap();

        let handle = clock.start().unwrap();
        run(&mut clock, handle, 97, &mut sink);
        assert_ne!(clock.frame(), Some(initial));

        let frame = clock.reset(&mut sink).unwrap();
        assert_eq!(frame, initial);
        assert_eq!(sink.last(), Some(&initial));
        assert_eq!(clock.elapsed(), 0.0);
        assert!(!clock.is_playing());
        assert_eq!(clock.tick(handle, SIM_DT, &mut sink), TickOutcome::Cancelled);
    }

    #[test]
    fn test_reset_restores_default_control() {
        let (mut clock, mut sink) = ready_clock(Apparatus::Swing);
        let initial = *sink.last().unwrap();

        clock.set_control(90.0, &mut sink);
        let handle = clock.start().unwrap();
        run(&mut clock, handle, 20, &mut sink);

        let frame = clock.reset(&mut sink).unwrap();
        assert_eq!(frame, initial);
        assert_eq!(clock.control(), 50.0);
        assert_eq!(clock.frame(), Some(initial));
    }

    #[test]
    fn test_long_run_keeps_advancing() {
        let (mut clock, mut sink) = ready_clock(Apparatus::Swing);
        // About two days of real time at normal speed
        clock.state.elapsed = 1_048_576.0;
        let handle = clock.start().unwrap();
        run(&mut clock, handle, 60, &mut sink);
        let advanced = clock.state.elapsed - 1_048_576.0;
        assert!((advanced - 60.0 * f64::from(SIM_DT)).abs() < 1e-6);
    }

    #[test]
    fn test_select_while_running_cancels_loop() {
        let (mut clock, mut sink) = ready_clock(Apparatus::Swing);
        let handle = clock.start().unwrap();
        run(&mut clock, handle, 5, &mut sink);
        clock.set_control(90.0, &mut sink);

        clock.select(Apparatus::Roundabout, &mut sink);
        assert_eq!(clock.phase(), ClockPhase::Ready);
        assert_eq!(clock.elapsed(), 0.0);
        assert_eq!(clock.control(), 50.0);
        assert_eq!(clock.tick(handle, SIM_DT, &mut sink), TickOutcome::Cancelled);
    }

    #[test]
    fn test_leave_goes_idle() {
        let (mut clock, mut sink) = ready_clock(Apparatus::Climber);
        let handle = clock.start().unwrap();
        clock.leave();
        assert_eq!(clock.phase(), ClockPhase::Idle);
        assert_eq!(clock.apparatus(), None);
        assert_eq!(clock.tick(handle, SIM_DT, &mut sink), TickOutcome::Cancelled);
        assert_eq!(clock.toggle(), Err(SimError::NoApparatus));
    }

    #[test]
    fn test_toggle() {
        let (mut clock, _sink) = ready_clock(Apparatus::Swing);
        let handle = clock.toggle().unwrap();
        assert!(handle.is_some());
        assert!(clock.is_playing());
        assert_eq!(clock.toggle(), Ok(None));
        assert!(!clock.is_playing());
    }

    #[test]
    fn test_set_control_clamps_and_redraws_when_ready() {
        let (mut clock, mut sink) = ready_clock(Apparatus::Swing);
        let frame = clock.set_control(140.0, &mut sink).unwrap();
        assert_eq!(frame.control, 100.0);
        assert_eq!(sink.frames.len(), 2);

        clock.set_control(f32::NAN, &mut sink);
        assert_eq!(clock.control(), 0.0);
    }

    #[test]
    fn test_set_control_while_running_waits_for_tick() {
        let (mut clock, mut sink) = ready_clock(Apparatus::Swing);
        let handle = clock.start().unwrap();
        assert_eq!(clock.set_control(20.0, &mut sink), None);
        assert_eq!(sink.frames.len(), 1);

        let TickOutcome::Emitted(frame) = clock.tick(handle, SIM_DT, &mut sink) else {
            panic!("tick did not emit");
        };
        assert_eq!(frame.control, 20.0);
    }

    #[test]
    fn test_unmounted_sink_auto_pauses() {
        let (mut clock, mut sink) = ready_clock(Apparatus::Swing);
        let handle = clock.start().unwrap();
        run(&mut clock, handle, 3, &mut sink);
        let elapsed = clock.elapsed();
        let emitted = sink.frames.len();

        sink.mounted = false;
        assert_eq!(clock.tick(handle, SIM_DT, &mut sink), TickOutcome::Suspended);
        assert_eq!(clock.phase(), ClockPhase::Ready);
        assert_eq!(clock.elapsed(), elapsed);
        assert_eq!(sink.frames.len(), emitted);

        // Reset with nothing mounted skips the emission without failing
        assert!(clock.reset(&mut sink).is_some());
        assert_eq!(sink.frames.len(), emitted);
    }
}
