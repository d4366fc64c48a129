//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are plain functions that take `&mut World` (or `&World` for read-only).
//! Entity state lives in components; the ship is passed in explicitly.

pub mod asteroids;
pub mod collision;
pub mod fragmentation;
pub mod orientation;
pub mod projectiles;
pub mod reconcile;
pub mod snapshot;
pub mod wave_spawner;
