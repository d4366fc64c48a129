//! Events emitted by the simulation for audio and UI feedback.

use serde::{Deserialize, Serialize};

use crate::types::EntityId;

/// Discrete things that happened during a tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SimEvent {
    /// A volley left the ship.
    ProjectileFired { ids: Vec<EntityId> },
    /// A projectile struck an asteroid.
    AsteroidHit {
        asteroid_id: EntityId,
        projectile_id: EntityId,
    },
    /// A hit asteroid was removed and replaced by its fragments.
    AsteroidFragmented {
        asteroid_id: EntityId,
        size: u8,
        fragments: Vec<EntityId>,
    },
    /// An asteroid reached the ship.
    ShipHit {
        asteroid_id: EntityId,
        lives_remaining: u32,
    },
    /// The ship ran out of lives.
    GameOver { score: u32 },
    /// A fresh wave of asteroids was spawned.
    WaveStarted { wave: u32, asteroid_count: u32 },
}
