//! Wave spawning system: refills the field once every asteroid is gone.

use glam::DVec3;
use hecs::World;
use rand_chacha::ChaCha8Rng;

use gyrostar_core::config::SimConstants;
use gyrostar_core::constants::ASTEROID_MAX_SIZE;
use gyrostar_core::events::SimEvent;
use gyrostar_core::types::IdAllocator;

use super::asteroids;
use crate::world_setup;

/// Round-level progress: score and wave bookkeeping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundState {
    pub score: u32,
    /// Number of the wave currently on the field (0 before the first).
    pub wave: u32,
    /// Asteroids the next wave will spawn.
    pub next_wave_size: u32,
}

impl RoundState {
    pub fn new(constants: &SimConstants) -> Self {
        Self {
            score: 0,
            wave: 0,
            next_wave_size: constants.initial_asteroid_count,
        }
    }
}

/// Spawn the next wave if the field is empty.
///
/// Each wave is one asteroid larger than the last. A next-wave size of zero
/// disables waves entirely.
pub fn run(
    world: &mut World,
    ids: &mut IdAllocator,
    rng: &mut ChaCha8Rng,
    round: &mut RoundState,
    ship_position: DVec3,
    constants: &SimConstants,
) -> Option<SimEvent> {
    if round.next_wave_size == 0 || asteroids::count(world) > 0 {
        return None;
    }

    let asteroid_count = round.next_wave_size;
    for _ in 0..asteroid_count {
        let position =
            world_setup::clear_spawn_position(rng, ship_position, constants.spawn_clearance);
        asteroids::spawn_at(world, ids, rng, position, ASTEROID_MAX_SIZE, constants);
    }

    round.wave += 1;
    round.next_wave_size = round.next_wave_size.saturating_add(1);
    log::debug!("wave {} started with {} asteroids", round.wave, asteroid_count);

    Some(SimEvent::WaveStarted {
        wave: round.wave,
        asteroid_count,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use gyrostar_core::constants::SHIP_ANCHOR;
    use rand::SeedableRng;

    #[test]
    fn test_waves_escalate_when_cleared() {
        let constants = SimConstants::default();
        let mut world = World::new();
        let mut ids = IdAllocator::default();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut round = RoundState::new(&constants);

        let event = run(&mut world, &mut ids, &mut rng, &mut round, SHIP_ANCHOR, &constants);
        assert_eq!(
            event,
            Some(SimEvent::WaveStarted {
                wave: 1,
                asteroid_count: constants.initial_asteroid_count,
            })
        );
        assert_eq!(asteroids::count(&world), constants.initial_asteroid_count as usize);
        for a in asteroids::all(&world) {
            assert_eq!(a.size, ASTEROID_MAX_SIZE);
            assert!(a.position.angle_between(SHIP_ANCHOR) >= constants.spawn_clearance);
        }

        // Field still populated: nothing happens.
        assert_eq!(run(&mut world, &mut ids, &mut rng, &mut round, SHIP_ANCHOR, &constants), None);

        world.clear();
        let event = run(&mut world, &mut ids, &mut rng, &mut round, SHIP_ANCHOR, &constants);
        assert_eq!(
            event,
            Some(SimEvent::WaveStarted {
                wave: 2,
                asteroid_count: constants.initial_asteroid_count + 1,
            })
        );
    }

    #[test]
    fn test_zero_size_disables_waves() {
        let constants = SimConstants {
            initial_asteroid_count: 0,
            ..Default::default()
        };
        let mut world = World::new();
        let mut ids = IdAllocator::default();
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let mut round = RoundState::new(&constants);
        assert_eq!(run(&mut world, &mut ids, &mut rng, &mut round, SHIP_ANCHOR, &constants), None);
        assert_eq!(round.wave, 0);
    }
}
