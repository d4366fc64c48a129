//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// Placement and direction of travel on the unit sphere.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceMotion {
    /// Unit vector from the sphere centre.
    pub position: DVec3,
    /// Unit vector tangent to the sphere at `position`.
    pub direction: DVec3,
    /// Angular speed along the great circle (rad/s).
    pub speed: f64,
}

/// Marks an entity as a projectile.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Projectile {
    pub id: EntityId,
    /// Seconds left before the projectile expires.
    pub remaining_lifetime: f64,
}

/// Marks an entity as an asteroid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Asteroid {
    pub id: EntityId,
    /// Size tier, 1 (smallest) to 4 (largest).
    pub size: u8,
    /// Struck and waiting to fragment.
    pub hit: bool,
    /// Seconds until fragmentation once `hit` is set.
    pub hit_timer: f64,
}

/// Cosmetic self-rotation of an asteroid about two independent axes.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct Spin {
    pub angles: [f64; 2],
    /// Spin rates (rad/s).
    pub rates: [f64; 2],
}
