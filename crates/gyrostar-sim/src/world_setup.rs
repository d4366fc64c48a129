//! Spawn placement for setting up a round.

use glam::DVec3;
use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use gyrostar_core::config::SimConstants;
use gyrostar_core::constants::SPAWN_PLACEMENT_ATTEMPTS;
use gyrostar_core::events::SimEvent;
use gyrostar_core::math::{angular_distance, uniform_on_sphere};
use gyrostar_core::types::IdAllocator;

use crate::systems::wave_spawner::{self, RoundState};

/// Pick a uniformly random point at least `clearance` radians from `avoid`.
///
/// After `SPAWN_PLACEMENT_ATTEMPTS` misses the antipode of `avoid` is used,
/// which is as far away as the sphere allows.
pub fn clear_spawn_position(rng: &mut ChaCha8Rng, avoid: DVec3, clearance: f64) -> DVec3 {
    for _ in 0..SPAWN_PLACEMENT_ATTEMPTS {
        let candidate = uniform_on_sphere(rng.gen(), rng.gen());
        if angular_distance(candidate, avoid) >= clearance {
            return candidate;
        }
    }
    -avoid
}

/// Clear the world and spawn the first wave of a round.
pub fn setup_round(
    world: &mut World,
    ids: &mut IdAllocator,
    rng: &mut ChaCha8Rng,
    round: &mut RoundState,
    ship_position: DVec3,
    constants: &SimConstants,
) -> Option<SimEvent> {
    world.clear();
    *round = RoundState::new(constants);
    wave_spawner::run(world, ids, rng, round, ship_position, constants)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gyrostar_core::constants::SHIP_ANCHOR;
    use rand::SeedableRng;

    #[test]
    fn test_clear_spawn_position_honours_clearance() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        for _ in 0..200 {
            let p = clear_spawn_position(&mut rng, SHIP_ANCHOR, 0.6);
            assert!((p.length() - 1.0).abs() < 1e-9);
            assert!(angular_distance(p, SHIP_ANCHOR) >= 0.6);
        }
    }

    #[test]
    fn test_impossible_clearance_falls_back_to_antipode() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let p = clear_spawn_position(&mut rng, SHIP_ANCHOR, 10.0);
        assert_eq!(p, -SHIP_ANCHOR);
    }

    #[test]
    fn test_setup_round_resets_round_state() {
        let constants = SimConstants::default();
        let mut world = World::new();
        let mut ids = IdAllocator::default();
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let mut round = RoundState {
            score: 500,
            wave: 7,
            next_wave_size: 11,
        };
        crate::systems::projectiles::spawn(&mut world, &mut ids, SHIP_ANCHOR, DVec3::X, &constants);

        let event = setup_round(&mut world, &mut ids, &mut rng, &mut round, SHIP_ANCHOR, &constants);
        assert!(matches!(event, Some(SimEvent::WaveStarted { wave: 1, .. })));
        assert_eq!(round.score, 0);
        assert_eq!(round.wave, 1);
        assert_eq!(crate::systems::projectiles::count(&world), 0);
        assert_eq!(
            crate::systems::asteroids::count(&world),
            constants.initial_asteroid_count as usize
        );
    }
}
