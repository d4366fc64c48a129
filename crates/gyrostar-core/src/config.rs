//! Runtime-overridable simulation constants.
//!
//! `SimConstants::default()` mirrors [`crate::constants`]. Hosts that need
//! to match a remote authoritative simulation load the same values from
//! JSON; any field missing from the file keeps its compiled-in default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;

/// Every tuning value shared between the predictive and authoritative copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConstants {
    pub sphere_radius: f64,
    pub tick_rate: u32,

    pub ship_angular_speed: f64,
    pub ship_rotation_gain: f64,
    pub ship_diameter: f64,
    pub starting_lives: u32,
    pub invincibility_secs: f64,

    pub projectile_angular_speed: f64,
    pub projectile_lifetime_secs: f64,
    pub projectile_diameter: f64,
    pub projectile_spread_angle: f64,
    pub projectile_ray_count: u32,
    pub fire_cooldown_secs: f64,

    pub asteroid_min_speed: f64,
    pub asteroid_max_speed: f64,
    /// Visual diameter per size tier, indexed by `size - 1`.
    pub asteroid_diameters: [f64; 4],
    pub collision_padding: f64,
    pub fragment_speed_multiplier: f64,
    pub hit_to_fragment_secs: f64,
    pub asteroid_max_spin: f64,
    pub asteroid_points: [u32; 4],

    pub initial_asteroid_count: u32,
    pub spawn_clearance: f64,

    pub max_tracked_projectiles: usize,
    pub max_tracked_asteroids: usize,
}

impl Default for SimConstants {
    fn default() -> Self {
        Self {
            sphere_radius: SPHERE_RADIUS,
            tick_rate: TICK_RATE,
            ship_angular_speed: SHIP_ANGULAR_SPEED,
            ship_rotation_gain: SHIP_ROTATION_GAIN,
            ship_diameter: SHIP_DIAMETER,
            starting_lives: SHIP_STARTING_LIVES,
            invincibility_secs: SHIP_INVINCIBILITY_SECS,
            projectile_angular_speed: PROJECTILE_ANGULAR_SPEED,
            projectile_lifetime_secs: PROJECTILE_LIFETIME_SECS,
            projectile_diameter: PROJECTILE_DIAMETER,
            projectile_spread_angle: PROJECTILE_SPREAD_ANGLE,
            projectile_ray_count: PROJECTILE_RAY_COUNT,
            fire_cooldown_secs: FIRE_COOLDOWN_SECS,
            asteroid_min_speed: ASTEROID_MIN_SPEED,
            asteroid_max_speed: ASTEROID_MAX_SPEED,
            asteroid_diameters: ASTEROID_DIAMETERS,
            collision_padding: COLLISION_PADDING,
            fragment_speed_multiplier: FRAGMENT_SPEED_MULTIPLIER,
            hit_to_fragment_secs: HIT_TO_FRAGMENT_SECS,
            asteroid_max_spin: ASTEROID_MAX_SPIN,
            asteroid_points: ASTEROID_POINTS,
            initial_asteroid_count: INITIAL_ASTEROID_COUNT,
            spawn_clearance: SPAWN_CLEARANCE,
            max_tracked_projectiles: MAX_TRACKED_PROJECTILES,
            max_tracked_asteroids: MAX_TRACKED_ASTEROIDS,
        }
    }
}

impl SimConstants {
    /// Parse constants from JSON and validate them.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let constants: Self = serde_json::from_str(json)?;
        constants.validate()?;
        Ok(constants)
    }

    /// Load constants from a JSON file and validate them.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(ConfigError::Invalid {
                    field,
                    reason: "must be finite and > 0",
                })
            }
        }

        positive("sphere_radius", self.sphere_radius)?;
        if self.tick_rate == 0 {
            return Err(ConfigError::Invalid {
                field: "tick_rate",
                reason: "must be > 0",
            });
        }
        positive("ship_angular_speed", self.ship_angular_speed)?;
        positive("ship_rotation_gain", self.ship_rotation_gain)?;
        positive("ship_diameter", self.ship_diameter)?;
        positive("projectile_angular_speed", self.projectile_angular_speed)?;
        positive("projectile_lifetime_secs", self.projectile_lifetime_secs)?;
        positive("projectile_diameter", self.projectile_diameter)?;
        if self.projectile_ray_count == 0 {
            return Err(ConfigError::Invalid {
                field: "projectile_ray_count",
                reason: "must be >= 1",
            });
        }
        if !self.projectile_spread_angle.is_finite() || self.projectile_spread_angle < 0.0 {
            return Err(ConfigError::Invalid {
                field: "projectile_spread_angle",
                reason: "must be finite and >= 0",
            });
        }
        positive("asteroid_min_speed", self.asteroid_min_speed)?;
        positive("asteroid_max_speed", self.asteroid_max_speed)?;
        if self.asteroid_min_speed > self.asteroid_max_speed {
            return Err(ConfigError::Invalid {
                field: "asteroid_min_speed",
                reason: "must not exceed asteroid_max_speed",
            });
        }
        for diameter in self.asteroid_diameters {
            positive("asteroid_diameters", diameter)?;
        }
        if !(self.collision_padding.is_finite() && self.collision_padding >= 1.0) {
            return Err(ConfigError::Invalid {
                field: "collision_padding",
                reason: "must be finite and >= 1",
            });
        }
        if !(self.fragment_speed_multiplier.is_finite() && self.fragment_speed_multiplier >= 1.0) {
            return Err(ConfigError::Invalid {
                field: "fragment_speed_multiplier",
                reason: "must be finite and >= 1",
            });
        }
        if !self.hit_to_fragment_secs.is_finite() || self.hit_to_fragment_secs < 0.0 {
            return Err(ConfigError::Invalid {
                field: "hit_to_fragment_secs",
                reason: "must be finite and >= 0",
            });
        }
        Ok(())
    }

    /// Seconds per tick.
    pub fn dt(&self) -> f64 {
        1.0 / self.tick_rate as f64
    }

    /// Convert a linear radius on the sphere surface to an angular radius.
    pub fn angular_radius(&self, linear_radius: f64) -> f64 {
        linear_radius / self.sphere_radius
    }

    pub fn ship_angular_radius(&self) -> f64 {
        self.angular_radius(self.ship_diameter * 0.5)
    }

    pub fn projectile_angular_radius(&self) -> f64 {
        self.angular_radius(self.projectile_diameter * 0.5)
    }

    /// Padded collision radius of an asteroid of the given size tier.
    pub fn asteroid_angular_radius(&self, size: u8) -> f64 {
        let diameter = self.asteroid_diameters[size_index(size)];
        self.angular_radius(diameter * 0.5 * self.collision_padding)
    }

    /// Score awarded for destroying an asteroid of the given size tier.
    pub fn asteroid_points(&self, size: u8) -> u32 {
        self.asteroid_points[size_index(size)]
    }
}

/// Table index for a size tier, clamping out-of-range tiers.
fn size_index(size: u8) -> usize {
    usize::from(size.clamp(1, ASTEROID_MAX_SIZE) - 1)
}
