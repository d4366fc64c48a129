//! Fragmentation rule: replaces a destroyed asteroid with smaller children.

use hecs::World;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use gyrostar_core::config::SimConstants;
use gyrostar_core::types::{EntityId, IdAllocator};

use super::asteroids::{self, ExpiredAsteroid};

/// Number of children for a fragmenting asteroid: 2 or 3.
pub fn fragment_count(rng: &mut ChaCha8Rng) -> u32 {
    2 + (rng.gen::<f64>() * 2.0).floor() as u32
}

/// Spawn the fragments of an asteroid that has already been removed.
///
/// Size-1 parents leave nothing behind. Otherwise each child sits at the
/// parent's position, one tier smaller, with a fresh heading and spin and
/// the parent's speed scaled by `fragment_speed_multiplier`.
pub fn fragment(
    world: &mut World,
    ids: &mut IdAllocator,
    rng: &mut ChaCha8Rng,
    parent: &ExpiredAsteroid,
    constants: &SimConstants,
) -> Vec<EntityId> {
    if parent.size <= 1 {
        return Vec::new();
    }

    let count = fragment_count(rng);
    let speed = parent.speed * constants.fragment_speed_multiplier;
    (0..count)
        .map(|_| {
            asteroids::spawn_with_speed(
                world,
                ids,
                rng,
                parent.position,
                parent.size - 1,
                speed,
                constants,
            )
        })
        .collect()
}
