//! Snapshots crossing the simulation boundary.
//!
//! `RenderSnapshot` is produced after every tick for the rendering layer.
//! `AuthoritativeSnapshot` arrives from the remote simulation and replaces
//! the locally predicted state wholesale.

use glam::{DQuat, DVec3};
use serde::{Deserialize, Serialize};

use crate::constants::{ASTEROID_MAX_SIZE, DEGENERATE_EPSILON_SQ};
use crate::enums::{GamePhase, StateSource};
use crate::error::SnapshotError;
use crate::events::SimEvent;
use crate::types::{EntityId, SimTime, RESERVED_ID};

/// Complete visible state handed to the renderer after each tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub source: StateSource,
    pub ship: ShipView,
    pub projectiles: Vec<ProjectileView>,
    pub asteroids: Vec<AsteroidView>,
    pub events: Vec<SimEvent>,
    pub score: u32,
    pub wave: u32,
}

/// Ship placement and status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShipView {
    /// Rotation of the sphere relative to the fixed ship anchor.
    pub orientation: DQuat,
    /// Logical ship position on the unit sphere.
    pub position: DVec3,
    /// Visual nose direction (radians, 0 = forward).
    pub heading: f64,
    /// Firing direction (radians, 0 = forward).
    pub aim_angle: f64,
    pub lives: u32,
    pub invincible: bool,
}

/// A live projectile.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub id: EntityId,
    pub position: DVec3,
    pub direction: DVec3,
    pub remaining_lifetime: f64,
}

/// A live asteroid.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AsteroidView {
    pub id: EntityId,
    pub position: DVec3,
    pub velocity: DVec3,
    pub speed: f64,
    pub size: u8,
    pub spin: [f64; 2],
    pub hit: bool,
}

/// Authoritative state received from the remote simulation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AuthoritativeSnapshot {
    pub ship: AuthoritativeShip,
    #[serde(default)]
    pub projectiles: Vec<AuthoritativeProjectile>,
    #[serde(default)]
    pub asteroids: Vec<AuthoritativeAsteroid>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthoritativeShip {
    pub position: DVec3,
    pub orientation: DQuat,
    pub aim_angle: f64,
    pub lives: u32,
    pub invincible: bool,
    /// Heading target for the local lerp; local input decides when absent.
    #[serde(default)]
    pub heading: Option<f64>,
}

impl Default for AuthoritativeShip {
    fn default() -> Self {
        Self {
            position: crate::constants::SHIP_ANCHOR,
            orientation: DQuat::IDENTITY,
            aim_angle: 0.0,
            lives: 0,
            invincible: false,
            heading: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AuthoritativeProjectile {
    pub id: EntityId,
    pub position: DVec3,
    pub direction: DVec3,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AuthoritativeAsteroid {
    pub id: EntityId,
    pub position: DVec3,
    pub velocity: DVec3,
    pub size: u8,
    /// Angular speed; the local value (or range midpoint) is used when absent.
    #[serde(default)]
    pub speed: Option<f64>,
    #[serde(default)]
    pub hit: bool,
}

fn usable(v: DVec3) -> bool {
    v.is_finite() && v.length_squared() >= DEGENERATE_EPSILON_SQ
}

impl AuthoritativeSnapshot {
    /// Check every value is something the simulation can adopt.
    ///
    /// Unknown or missing ids are not errors; malformed numbers and the
    /// reserved top id are.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        let ship = &self.ship;
        if !usable(ship.position) {
            return Err(SnapshotError::MalformedShip("position"));
        }
        if !ship.orientation.is_finite()
            || ship.orientation.length_squared() < DEGENERATE_EPSILON_SQ
        {
            return Err(SnapshotError::MalformedShip("orientation"));
        }
        if !ship.aim_angle.is_finite() {
            return Err(SnapshotError::MalformedShip("aim_angle"));
        }
        if ship.heading.is_some_and(|h| !h.is_finite()) {
            return Err(SnapshotError::MalformedShip("heading"));
        }

        for p in &self.projectiles {
            if p.id == RESERVED_ID {
                return Err(SnapshotError::ReservedId(p.id));
            }
            if !usable(p.position) || !p.direction.is_finite() {
                return Err(SnapshotError::MalformedProjectile(p.id));
            }
        }

        for a in &self.asteroids {
            if a.id == RESERVED_ID {
                return Err(SnapshotError::ReservedId(a.id));
            }
            if !usable(a.position)
                || !a.velocity.is_finite()
                || a.speed.is_some_and(|s| !s.is_finite())
            {
                return Err(SnapshotError::MalformedAsteroid(a.id));
            }
            if !(1..=ASTEROID_MAX_SIZE).contains(&a.size) {
                return Err(SnapshotError::InvalidAsteroidSize {
                    id: a.id,
                    size: a.size,
                });
            }
        }
        Ok(())
    }
}
