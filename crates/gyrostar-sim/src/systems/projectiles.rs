//! Projectile system: spawning volleys, great-circle flight, and expiry.

use glam::DVec3;
use hecs::{Entity, World};

use gyrostar_core::components::{Projectile, SurfaceMotion};
use gyrostar_core::config::SimConstants;
use gyrostar_core::constants::SHIP_ANCHOR;
use gyrostar_core::math::{great_circle_step, normalize_or, rotate_about, tangent_at};
use gyrostar_core::state::ProjectileView;
use gyrostar_core::types::{EntityId, IdAllocator};

/// Timers at or below this are treated as elapsed.
const TIMER_EPSILON: f64 = 1e-9;

/// Spawn a single projectile with a fresh id.
pub fn spawn(
    world: &mut World,
    ids: &mut IdAllocator,
    position: DVec3,
    direction: DVec3,
    constants: &SimConstants,
) -> EntityId {
    let id = ids.allocate();
    insert(
        world,
        id,
        position,
        direction,
        constants.projectile_angular_speed,
        constants.projectile_lifetime_secs,
    );
    id
}

/// Insert a projectile under an existing id (used by spawning and reconciliation).
pub(crate) fn insert(
    world: &mut World,
    id: EntityId,
    position: DVec3,
    direction: DVec3,
    speed: f64,
    lifetime: f64,
) -> Entity {
    let position = normalize_or(position, SHIP_ANCHOR);
    world.spawn((
        SurfaceMotion {
            position,
            direction: tangent_at(position, direction),
            speed,
        },
        Projectile {
            id,
            remaining_lifetime: lifetime,
        },
    ))
}

/// Angular offsets of each ray in a volley, symmetric about zero.
pub fn spread_offsets(ray_count: u32, spread_angle: f64) -> Vec<f64> {
    let count = ray_count.max(1);
    let half_spread = f64::from(count - 1) * spread_angle / 2.0;
    (0..count)
        .map(|i| -half_spread + f64::from(i) * spread_angle)
        .collect()
}

/// Fire `ray_count` projectiles fanned around `aim_direction`.
///
/// Each ray is the aim direction rotated about the sphere normal at
/// `position` by its offset. Returns the new ids in ray order.
pub fn spawn_spread(
    world: &mut World,
    ids: &mut IdAllocator,
    position: DVec3,
    aim_direction: DVec3,
    ray_count: u32,
    spread_angle: f64,
    constants: &SimConstants,
) -> Vec<EntityId> {
    let normal = normalize_or(position, SHIP_ANCHOR);
    let center = tangent_at(normal, aim_direction);
    spread_offsets(ray_count, spread_angle)
        .into_iter()
        .map(|offset| {
            let direction = if offset == 0.0 {
                center
            } else {
                rotate_about(center, normal, offset)
            };
            spawn(world, ids, normal, direction, constants)
        })
        .collect()
}

/// Advance every projectile and remove the ones whose lifetime ran out.
///
/// Removal is deferred until after the pass. Returns the removed ids.
pub fn update(world: &mut World, dt: f64, despawn_buffer: &mut Vec<Entity>) -> Vec<EntityId> {
    despawn_buffer.clear();
    let mut removed = Vec::new();

    for (entity, (motion, projectile)) in world.query_mut::<(&mut SurfaceMotion, &mut Projectile)>() {
        let (position, direction) =
            great_circle_step(motion.position, motion.direction, motion.speed * dt);
        motion.position = position;
        motion.direction = direction;

        projectile.remaining_lifetime -= dt;
        if projectile.remaining_lifetime <= TIMER_EPSILON {
            despawn_buffer.push(entity);
            removed.push(projectile.id);
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    removed
}

/// Find the entity holding projectile `id`.
pub fn find(world: &World, id: EntityId) -> Option<Entity> {
    world
        .query::<&Projectile>()
        .iter()
        .find(|(_, p)| p.id == id)
        .map(|(entity, _)| entity)
}

/// Remove projectile `id`. Returns `false` if no such projectile exists.
pub fn remove(world: &mut World, id: EntityId) -> bool {
    match find(world, id) {
        Some(entity) => world.despawn(entity).is_ok(),
        None => false,
    }
}

/// Read-only views of all live projectiles, sorted by id.
pub fn all(world: &World) -> Vec<ProjectileView> {
    let mut views: Vec<ProjectileView> = world
        .query::<(&SurfaceMotion, &Projectile)>()
        .iter()
        .map(|(_, (motion, projectile))| ProjectileView {
            id: projectile.id,
            position: motion.position,
            direction: motion.direction,
            remaining_lifetime: projectile.remaining_lifetime,
        })
        .collect();

    views.sort_by_key(|p| p.id);
    views
}

pub fn count(world: &World) -> usize {
    world.query::<&Projectile>().iter().count()
}
