//! Ship orientation and the input-to-rotation mapper.
//!
//! The ship never moves on screen. Movement input rotates the sphere under
//! it instead, and the ship's logical position is tracked so that
//! `orientation * position` always lands on `SHIP_ANCHOR`.

use glam::{DQuat, DVec3};

use gyrostar_core::commands::InputIntent;
use gyrostar_core::config::SimConstants;
use gyrostar_core::constants::{ANCHOR_FORWARD, ANCHOR_RIGHT, PITCH_AXIS, SHIP_ANCHOR, YAW_AXIS};
use gyrostar_core::math::{normalize_or, renormalize, tangent_at, wrap_angle};
use gyrostar_core::state::ShipView;

/// The singleton ship: world orientation plus logical placement.
#[derive(Debug, Clone)]
pub struct ShipState {
    /// Rotation of the sphere relative to the fixed ship anchor.
    pub orientation: DQuat,
    /// Logical position on the unit sphere, in sphere coordinates.
    pub position: DVec3,
    /// Visual nose direction (radians, 0 = forward).
    pub heading: f64,
    /// Heading the visual lerp is converging on.
    pub target_heading: f64,
    /// Firing direction (radians, 0 = forward), independent of heading.
    pub aim_angle: f64,
    pub lives: u32,
    pub invincible: bool,
    /// Grace time left while `invincible` is set by local prediction.
    pub invincible_remaining_secs: f64,
    /// Time until the next volley may fire.
    pub fire_cooldown_secs: f64,
}

impl ShipState {
    pub fn new(lives: u32) -> Self {
        Self {
            orientation: DQuat::IDENTITY,
            position: SHIP_ANCHOR,
            heading: 0.0,
            target_heading: 0.0,
            aim_angle: 0.0,
            lives,
            invincible: false,
            invincible_remaining_secs: 0.0,
            fire_cooldown_secs: 0.0,
        }
    }

    /// Unit tangent at the ship position pointing along `aim_angle`.
    pub fn aim_direction(&self) -> DVec3 {
        let (sin, cos) = self.aim_angle.sin_cos();
        let screen = ANCHOR_FORWARD * cos + ANCHOR_RIGHT * sin;
        tangent_at(self.position, self.orientation.inverse() * screen)
    }

    /// Start the post-hit grace period.
    pub fn grant_invincibility(&mut self, secs: f64) {
        self.invincible = secs > 0.0;
        self.invincible_remaining_secs = secs.max(0.0);
    }

    /// Count down grace and weapon timers.
    pub fn tick_timers(&mut self, dt: f64) {
        if self.invincible_remaining_secs > 0.0 {
            self.invincible_remaining_secs -= dt;
            if self.invincible_remaining_secs <= 0.0 {
                self.invincible_remaining_secs = 0.0;
                self.invincible = false;
            }
        }
        self.fire_cooldown_secs = (self.fire_cooldown_secs - dt).max(0.0);
    }

    pub fn view(&self) -> ShipView {
        ShipView {
            orientation: self.orientation,
            position: self.position,
            heading: self.heading,
            aim_angle: self.aim_angle,
            lives: self.lives,
            invincible: self.invincible,
        }
    }
}

/// Pre-multiply `rotation` onto the world orientation and move the ship
/// position by the inverse of the same increment.
///
/// The increment acts in the anchor frame, so its inverse is conjugated
/// into sphere coordinates before it is applied to the position.
pub fn rotate_world(ship: &mut ShipState, rotation: DQuat) {
    let previous = ship.orientation;
    ship.orientation = renormalize(rotation * previous);
    let local_inverse = previous.inverse() * rotation.inverse() * previous;
    ship.position = normalize_or(local_inverse * ship.position, ship.position);
}

/// Apply one tick of movement input: pitch first, then yaw.
pub fn apply_input(ship: &mut ShipState, input: &InputIntent, constants: &SimConstants, dt: f64) {
    let step = constants.ship_angular_speed * dt;
    let pitch = input.pitch_axis() * step;
    let yaw = input.yaw_axis() * step;

    if pitch != 0.0 {
        rotate_world(ship, DQuat::from_axis_angle(PITCH_AXIS, pitch));
    }
    if yaw != 0.0 {
        rotate_world(ship, DQuat::from_axis_angle(YAW_AXIS, yaw));
    }

    // Drift correction runs every tick, moving or not.
    ship.orientation = renormalize(ship.orientation);
    ship.position = normalize_or(ship.position, SHIP_ANCHOR);
}

/// Retarget the heading from the input direction, if any key is held.
pub fn target_heading_from_input(ship: &mut ShipState, input: &InputIntent) {
    if input.has_movement() {
        let (x, y) = input.screen_vector();
        ship.target_heading = x.atan2(y);
    }
}

/// Exponentially ease the visual heading toward its target along the
/// shortest angular path.
pub fn update_heading(ship: &mut ShipState, gain: f64, dt: f64) {
    let delta = wrap_angle(ship.target_heading - ship.heading);
    let blend = 1.0 - (-gain * dt).exp();
    ship.heading = wrap_angle(ship.heading + delta * blend);
}
