//! Snapshot system: queries the ECS world and builds a complete RenderSnapshot.
//!
//! This system is read-only. It never modifies the world.

use hecs::World;

use gyrostar_core::enums::{GamePhase, StateSource};
use gyrostar_core::events::SimEvent;
use gyrostar_core::state::RenderSnapshot;
use gyrostar_core::types::SimTime;

use super::orientation::ShipState;
use super::wave_spawner::RoundState;
use super::{asteroids, projectiles};

/// Build a complete RenderSnapshot from the current world state.
pub fn build_snapshot(
    world: &World,
    ship: &ShipState,
    time: &SimTime,
    phase: GamePhase,
    source: StateSource,
    events: Vec<SimEvent>,
    round: &RoundState,
) -> RenderSnapshot {
    RenderSnapshot {
        time: *time,
        phase,
        source,
        ship: ship.view(),
        projectiles: projectiles::all(world),
        asteroids: asteroids::all(world),
        events,
        score: round.score,
        wave: round.wave,
    }
}
