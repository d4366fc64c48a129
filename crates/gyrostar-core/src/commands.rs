//! Player input and commands sent to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::math::wrap_angle;

/// Movement and weapon intent sampled every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct InputIntent {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    /// Aim direction (radians, 0 = forward, positive toward the right).
    pub aim_angle: f64,
    pub fire_pressed: bool,
}

impl InputIntent {
    /// Pitch input in `{-1, 0, 1}` (+1 = forward).
    pub fn pitch_axis(&self) -> f64 {
        f64::from(u8::from(self.forward)) - f64::from(u8::from(self.backward))
    }

    /// Yaw input in `{-1, 0, 1}` (+1 = left).
    pub fn yaw_axis(&self) -> f64 {
        f64::from(u8::from(self.left)) - f64::from(u8::from(self.right))
    }

    /// Screen-space input vector `(x, y)`, x toward the right, y forward.
    pub fn screen_vector(&self) -> (f64, f64) {
        (-self.yaw_axis(), self.pitch_axis())
    }

    /// Whether any movement key is held.
    pub fn has_movement(&self) -> bool {
        let (x, y) = self.screen_vector();
        x != 0.0 || y != 0.0
    }

    /// Clamp the intent to values the simulation accepts.
    ///
    /// A non-finite aim angle is replaced by `previous_aim`; finite angles
    /// are wrapped into `[-π, π]`.
    pub fn sanitized(mut self, previous_aim: f64) -> Self {
        self.aim_angle = if self.aim_angle.is_finite() {
            wrap_angle(self.aim_angle)
        } else {
            previous_aim
        };
        self
    }
}

/// All possible player actions outside the per-tick input.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Replace the held input intent.
    SetInput { intent: InputIntent },
    /// Reset ship, entities, score and ids, and start a new round.
    Restart,
}
