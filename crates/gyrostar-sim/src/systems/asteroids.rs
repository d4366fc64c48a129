//! Asteroid system: spawning, great-circle drift, spin, and hit countdown.

use glam::DVec3;
use hecs::{Entity, World};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use gyrostar_core::components::{Asteroid, Spin, SurfaceMotion};
use gyrostar_core::config::SimConstants;
use gyrostar_core::constants::{ASTEROID_MAX_SIZE, SHIP_ANCHOR};
use gyrostar_core::math::{great_circle_step, normalize_or, tangent_at, uniform_on_sphere};
use gyrostar_core::state::AsteroidView;
use gyrostar_core::types::{EntityId, IdAllocator};

/// Timers at or below this are treated as elapsed.
const TIMER_EPSILON: f64 = 1e-9;

/// An asteroid whose hit timer elapsed this tick and was removed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpiredAsteroid {
    pub id: EntityId,
    pub position: DVec3,
    pub speed: f64,
    pub size: u8,
}

/// Random unit tangent at `position`.
pub fn random_tangent(rng: &mut ChaCha8Rng, position: DVec3) -> DVec3 {
    let v = DVec3::new(
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
        rng.gen_range(-1.0..1.0),
    );
    tangent_at(position, v)
}

/// Random cosmetic spin rates, starting angles at zero.
pub fn random_spin(rng: &mut ChaCha8Rng, max_rate: f64) -> Spin {
    let max_rate = max_rate.abs();
    let mut rate = || {
        if max_rate > 0.0 {
            rng.gen_range(-max_rate..=max_rate)
        } else {
            0.0
        }
    };
    Spin {
        angles: [0.0, 0.0],
        rates: [rate(), rate()],
    }
}

/// Angular speed drawn from the configured range.
pub fn random_speed(rng: &mut ChaCha8Rng, constants: &SimConstants) -> f64 {
    if constants.asteroid_max_speed > constants.asteroid_min_speed {
        rng.gen_range(constants.asteroid_min_speed..constants.asteroid_max_speed)
    } else {
        constants.asteroid_min_speed
    }
}

/// Spawn an asteroid uniformly distributed on the sphere.
pub fn spawn_random(
    world: &mut World,
    ids: &mut IdAllocator,
    rng: &mut ChaCha8Rng,
    size: u8,
    constants: &SimConstants,
) -> EntityId {
    let position = uniform_on_sphere(rng.gen(), rng.gen());
    spawn_at(world, ids, rng, position, size, constants)
}

/// Spawn an asteroid at `position` with a random heading and speed.
pub fn spawn_at(
    world: &mut World,
    ids: &mut IdAllocator,
    rng: &mut ChaCha8Rng,
    position: DVec3,
    size: u8,
    constants: &SimConstants,
) -> EntityId {
    let speed = random_speed(rng, constants);
    spawn_with_speed(world, ids, rng, position, size, speed, constants)
}

/// Spawn an asteroid at `position` with a random heading and the given speed.
pub fn spawn_with_speed(
    world: &mut World,
    ids: &mut IdAllocator,
    rng: &mut ChaCha8Rng,
    position: DVec3,
    size: u8,
    speed: f64,
    constants: &SimConstants,
) -> EntityId {
    let id = ids.allocate();
    let position = normalize_or(position, SHIP_ANCHOR);
    let velocity = random_tangent(rng, position);
    let spin = random_spin(rng, constants.asteroid_max_spin);
    insert(world, id, position, velocity, speed, size, spin);
    id
}

/// Insert an asteroid under an existing id. Size is clamped to 1..=4.
pub(crate) fn insert(
    world: &mut World,
    id: EntityId,
    position: DVec3,
    velocity: DVec3,
    speed: f64,
    size: u8,
    spin: Spin,
) -> Entity {
    let position = normalize_or(position, SHIP_ANCHOR);
    world.spawn((
        SurfaceMotion {
            position,
            direction: tangent_at(position, velocity),
            speed,
        },
        Asteroid {
            id,
            size: size.clamp(1, ASTEROID_MAX_SIZE),
            hit: false,
            hit_timer: 0.0,
        },
        spin,
    ))
}

/// Find the entity holding asteroid `id`.
pub fn find(world: &World, id: EntityId) -> Option<Entity> {
    world
        .query::<&Asteroid>()
        .iter()
        .find(|(_, a)| a.id == id)
        .map(|(entity, _)| entity)
}

/// Mark asteroid `id` as hit, fragmenting after `delay_secs`.
///
/// Returns `false` for unknown ids and for asteroids already hit.
pub fn mark_hit(world: &mut World, id: EntityId, delay_secs: f64) -> bool {
    for (_entity, asteroid) in world.query_mut::<&mut Asteroid>() {
        if asteroid.id == id {
            if asteroid.hit {
                return false;
            }
            asteroid.hit = true;
            asteroid.hit_timer = delay_secs.max(0.0);
            return true;
        }
    }
    false
}

/// Advance every asteroid, spin it, and count down hit timers.
///
/// Asteroids whose timer elapsed are removed after the pass and returned
/// so the caller can fragment them.
pub fn update(
    world: &mut World,
    dt: f64,
    despawn_buffer: &mut Vec<Entity>,
) -> Vec<ExpiredAsteroid> {
    despawn_buffer.clear();
    let mut expired = Vec::new();

    for (entity, (motion, asteroid, spin)) in
        world.query_mut::<(&mut SurfaceMotion, &mut Asteroid, &mut Spin)>()
    {
        let (position, direction) =
            great_circle_step(motion.position, motion.direction, motion.speed * dt);
        motion.position = position;
        motion.direction = direction;

        for (angle, rate) in spin.angles.iter_mut().zip(spin.rates) {
            *angle = (*angle + rate * dt).rem_euclid(std::f64::consts::TAU);
        }

        if asteroid.hit {
            asteroid.hit_timer -= dt;
            if asteroid.hit_timer <= TIMER_EPSILON {
                despawn_buffer.push(entity);
                expired.push(ExpiredAsteroid {
                    id: asteroid.id,
                    position: motion.position,
                    speed: motion.speed,
                    size: asteroid.size,
                });
            }
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    expired
}

/// Remove asteroid `id`. Returns `false` if no such asteroid exists.
pub fn remove(world: &mut World, id: EntityId) -> bool {
    match find(world, id) {
        Some(entity) => world.despawn(entity).is_ok(),
        None => false,
    }
}

/// Read-only views of all live asteroids, sorted by id.
pub fn all(world: &World) -> Vec<AsteroidView> {
    let mut views: Vec<AsteroidView> = world
        .query::<(&SurfaceMotion, &Asteroid, &Spin)>()
        .iter()
        .map(|(_, (motion, asteroid, spin))| AsteroidView {
            id: asteroid.id,
            position: motion.position,
            velocity: motion.direction,
            speed: motion.speed,
            size: asteroid.size,
            spin: spin.angles,
            hit: asteroid.hit,
        })
        .collect();

    views.sort_by_key(|a| a.id);
    views
}

pub fn count(world: &World) -> usize {
    world.query::<&Asteroid>().iter().count()
}
