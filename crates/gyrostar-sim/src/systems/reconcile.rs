//! Snapshot reconciliation: the authoritative copy always wins.
//!
//! Applying a snapshot overwrites the ship and both entity collections.
//! Entities are matched by id: present ones are overwritten in place, new
//! ones are spawned under the server's id, and anything the snapshot omits
//! is despawned. There is no diffing and no partial merge.

use std::collections::{HashMap, HashSet};

use hecs::{Entity, World};
use rand_chacha::ChaCha8Rng;

use gyrostar_core::components::{Asteroid, Projectile, SurfaceMotion};
use gyrostar_core::config::SimConstants;
use gyrostar_core::constants::{ASTEROID_MAX_SIZE, SHIP_ANCHOR};
use gyrostar_core::math::{normalize_or, renormalize, tangent_at, wrap_angle};
use gyrostar_core::state::{AuthoritativeAsteroid, AuthoritativeProjectile, AuthoritativeShip, AuthoritativeSnapshot};
use gyrostar_core::types::{EntityId, IdAllocator};

use super::asteroids;
use super::orientation::ShipState;
use super::projectiles;

/// Overwrite local state with `snapshot`.
pub fn apply_snapshot(
    world: &mut World,
    ship: &mut ShipState,
    ids: &mut IdAllocator,
    rng: &mut ChaCha8Rng,
    snapshot: &AuthoritativeSnapshot,
    constants: &SimConstants,
    despawn_buffer: &mut Vec<Entity>,
) {
    apply_ship(ship, &snapshot.ship);
    apply_projectiles(world, ids, &snapshot.projectiles, constants, despawn_buffer);
    apply_asteroids(world, ids, rng, &snapshot.asteroids, constants, despawn_buffer);
}

/// Adopt the authoritative ship. The visual heading itself is left to the lerp.
pub fn apply_ship(ship: &mut ShipState, authoritative: &AuthoritativeShip) {
    ship.position = normalize_or(authoritative.position, SHIP_ANCHOR);
    ship.orientation = renormalize(authoritative.orientation);
    ship.aim_angle = wrap_angle(authoritative.aim_angle);
    ship.lives = authoritative.lives;
    ship.invincible = authoritative.invincible;
    ship.invincible_remaining_secs = 0.0;
    if let Some(heading) = authoritative.heading {
        ship.target_heading = wrap_angle(heading);
    }
}

fn apply_projectiles(
    world: &mut World,
    ids: &mut IdAllocator,
    entries: &[AuthoritativeProjectile],
    constants: &SimConstants,
    despawn_buffer: &mut Vec<Entity>,
) {
    let mut existing: HashMap<EntityId, Entity> = world
        .query::<&Projectile>()
        .iter()
        .map(|(entity, p)| (p.id, entity))
        .collect();
    let mut kept = HashSet::new();

    for entry in entries {
        if kept.len() >= constants.max_tracked_projectiles {
            break;
        }
        if !kept.insert(entry.id) {
            continue;
        }
        ids.observe(entry.id);

        let position = normalize_or(entry.position, SHIP_ANCHOR);
        let direction = tangent_at(position, entry.direction);
        let updated = existing.remove(&entry.id).is_some_and(|entity| {
            match world.get::<&mut SurfaceMotion>(entity) {
                Ok(mut motion) => {
                    motion.position = position;
                    motion.direction = direction;
                    true
                }
                Err(_) => false,
            }
        });
        if !updated {
            projectiles::insert(
                world,
                entry.id,
                position,
                direction,
                constants.projectile_angular_speed,
                constants.projectile_lifetime_secs,
            );
        }
    }

    despawn_buffer.clear();
    despawn_buffer.extend(existing.into_values());
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}

fn apply_asteroids(
    world: &mut World,
    ids: &mut IdAllocator,
    rng: &mut ChaCha8Rng,
    entries: &[AuthoritativeAsteroid],
    constants: &SimConstants,
    despawn_buffer: &mut Vec<Entity>,
) {
    let mut existing: HashMap<EntityId, Entity> = world
        .query::<&Asteroid>()
        .iter()
        .map(|(entity, a)| (a.id, entity))
        .collect();
    let mut kept = HashSet::new();
    let default_speed = 0.5 * (constants.asteroid_min_speed + constants.asteroid_max_speed);

    for entry in entries {
        if kept.len() >= constants.max_tracked_asteroids {
            break;
        }
        if !kept.insert(entry.id) {
            continue;
        }
        ids.observe(entry.id);

        let position = normalize_or(entry.position, SHIP_ANCHOR);
        let velocity = tangent_at(position, entry.velocity);
        let updated = existing.remove(&entry.id).is_some_and(|entity| {
            match world.query_one_mut::<(&mut SurfaceMotion, &mut Asteroid)>(entity) {
                Ok((motion, asteroid)) => {
                    motion.position = position;
                    motion.direction = velocity;
                    motion.speed = entry.speed.unwrap_or(motion.speed);
                    asteroid.size = entry.size.clamp(1, ASTEROID_MAX_SIZE);
                    asteroid.hit = entry.hit;
                    true
                }
                Err(_) => false,
            }
        });
        if !updated {
            let speed = entry.speed.unwrap_or(default_speed);
            let spin = asteroids::random_spin(rng, constants.asteroid_max_spin);
            let entity = asteroids::insert(world, entry.id, position, velocity, speed, entry.size, spin);
            if entry.hit {
                if let Ok(mut asteroid) = world.get::<&mut Asteroid>(entity) {
                    asteroid.hit = true;
                }
            }
        }
    }

    despawn_buffer.clear();
    despawn_buffer.extend(existing.into_values());
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
}
