//! Fixed-step scheduler: turns variable frame time into whole simulation ticks.
//!
//! Frame deltas are clamped to `max_frame_delta`, accumulated, and consumed
//! in `fixed_step` slices. At most `max_steps` ticks run per frame; when that
//! cap is reached the leftover accumulator is thrown away so a slow host
//! never falls permanently behind.

use gyrostar_core::config::SimConstants;
use gyrostar_core::constants::{MAX_FRAME_DELTA, MAX_STEPS_PER_FRAME};
use gyrostar_core::enums::SchedulerState;

/// Number of simulation ticks executed by one frame.
pub type TickCount = u32;

#[derive(Debug, Clone)]
pub struct FixedStepScheduler {
    fixed_step: f64,
    max_frame_delta: f64,
    max_steps: TickCount,
    accumulator: f64,
    last_frame: f64,
    state: SchedulerState,
}

impl FixedStepScheduler {
    /// Create a stopped scheduler.
    pub fn new(fixed_step: f64, max_frame_delta: f64, max_steps: TickCount) -> Self {
        Self {
            fixed_step,
            max_frame_delta: max_frame_delta.max(0.0),
            max_steps: max_steps.max(1),
            accumulator: 0.0,
            last_frame: 0.0,
            state: SchedulerState::Stopped,
        }
    }

    /// Scheduler stepping at the configured tick rate with the default caps.
    pub fn from_constants(constants: &SimConstants) -> Self {
        Self::new(constants.dt(), MAX_FRAME_DELTA, MAX_STEPS_PER_FRAME)
    }

    /// Begin running from timestamp `now` (seconds) with an empty accumulator.
    pub fn start(&mut self, now: f64) {
        self.state = SchedulerState::Running;
        self.accumulator = 0.0;
        self.last_frame = now;
    }

    /// Stop running. Pending partial time is dropped on the next `start`.
    pub fn stop(&mut self) {
        self.state = SchedulerState::Stopped;
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == SchedulerState::Running
    }

    /// Unconsumed simulated time, in seconds.
    pub fn accumulator(&self) -> f64 {
        self.accumulator
    }

    pub fn fixed_step(&self) -> f64 {
        self.fixed_step
    }

    /// Frame callback driven by a timestamp (seconds, monotonic).
    pub fn frame(&mut self, now: f64, tick: impl FnMut()) -> TickCount {
        if !self.is_running() {
            return 0;
        }
        let delta = now - self.last_frame;
        self.last_frame = now;
        self.advance(delta, tick)
    }

    /// Frame callback driven by an elapsed delta (seconds).
    ///
    /// Non-finite and negative deltas count as zero.
    pub fn advance(&mut self, delta: f64, mut tick: impl FnMut()) -> TickCount {
        if !self.is_running() {
            return 0;
        }

        let delta = if delta.is_finite() {
            delta.clamp(0.0, self.max_frame_delta)
        } else {
            0.0
        };
        self.accumulator += delta;

        let mut steps: TickCount = 0;
        while self.accumulator >= self.fixed_step && steps < self.max_steps {
            tick();
            self.accumulator -= self.fixed_step;
            steps += 1;
        }

        if steps >= self.max_steps {
            log::debug!("frame hit the {} step cap, dropping {:.4}s", self.max_steps, self.accumulator);
            self.accumulator = 0.0;
        }
        steps
    }
}
