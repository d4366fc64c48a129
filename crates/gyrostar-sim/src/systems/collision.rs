//! Collision system: angular-distance tests on the sphere surface.
//!
//! Two points collide when their angular separation is strictly less than
//! the sum of their angular radii. The check is done on the dot product
//! (`dot(a, b) > cos(ra + rb)`) so no `acos` is needed per pair.

use glam::DVec3;
use hecs::{Entity, World};

use gyrostar_core::components::{Asteroid, Projectile, SurfaceMotion};
use gyrostar_core::config::SimConstants;
use gyrostar_core::types::EntityId;

use super::asteroids;

/// Whether two unit vectors with the given angular radii overlap.
///
/// Exact equality of separation and radius sum is not a collision.
pub fn collides(a: DVec3, radius_a: f64, b: DVec3, radius_b: f64) -> bool {
    let reach = radius_a + radius_b;
    if reach >= std::f64::consts::PI {
        return true;
    }
    a.dot(b) > reach.cos()
}

/// A projectile that struck an asteroid this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProjectileHit {
    pub projectile_id: EntityId,
    pub asteroid_id: EntityId,
    pub asteroid_size: u8,
}

/// Asteroid data gathered once per pass.
struct Target {
    id: EntityId,
    position: DVec3,
    radius: f64,
    size: u8,
    hit: bool,
}

/// Test every projectile against every live, not-yet-hit asteroid.
///
/// Each projectile stops at its first hit. Struck asteroids are marked hit
/// with the configured fragmentation delay and the projectile is removed.
pub fn projectile_asteroid_pass(
    world: &mut World,
    constants: &SimConstants,
    despawn_buffer: &mut Vec<Entity>,
) -> Vec<ProjectileHit> {
    despawn_buffer.clear();

    let mut targets: Vec<Target> = world
        .query::<(&SurfaceMotion, &Asteroid)>()
        .iter()
        .map(|(_, (motion, asteroid))| Target {
            id: asteroid.id,
            position: motion.position,
            radius: constants.asteroid_angular_radius(asteroid.size),
            size: asteroid.size,
            hit: asteroid.hit,
        })
        .collect();

    let projectile_radius = constants.projectile_angular_radius();
    let mut hits = Vec::new();

    for (entity, (motion, projectile)) in world.query::<(&SurfaceMotion, &Projectile)>().iter() {
        let struck = targets.iter_mut().find(|target| {
            !target.hit && collides(motion.position, projectile_radius, target.position, target.radius)
        });
        if let Some(target) = struck {
            target.hit = true;
            despawn_buffer.push(entity);
            hits.push(ProjectileHit {
                projectile_id: projectile.id,
                asteroid_id: target.id,
                asteroid_size: target.size,
            });
        }
    }

    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    // Only report asteroids this pass actually marked.
    hits.retain(|hit| asteroids::mark_hit(world, hit.asteroid_id, constants.hit_to_fragment_secs));
    hits
}

/// First live, not-yet-hit asteroid overlapping the ship, if any.
///
/// Only reports; the caller decides what losing a life means.
pub fn ship_asteroid_pass(
    world: &World,
    ship_position: DVec3,
    constants: &SimConstants,
) -> Option<EntityId> {
    let ship_radius = constants.ship_angular_radius();
    world
        .query::<(&SurfaceMotion, &Asteroid)>()
        .iter()
        .find(|(_, (motion, asteroid))| {
            !asteroid.hit
                && collides(
                    ship_position,
                    ship_radius,
                    motion.position,
                    constants.asteroid_angular_radius(asteroid.size),
                )
        })
        .map(|(_, (_, asteroid))| asteroid.id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use gyrostar_core::math::rotate_about;
    use gyrostar_core::types::IdAllocator;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::systems::projectiles;

    #[test]
    fn test_collides_is_symmetric() {
        let pairs = [
            (DVec3::Z, rotate_about(DVec3::Z, DVec3::X, 0.05)),
            (DVec3::X, DVec3::Y),
            (DVec3::new(0.3, 0.4, 0.5).normalize(), DVec3::new(0.31, 0.4, 0.5).normalize()),
        ];
        for (a, b) in pairs {
            for (ra, rb) in [(0.01, 0.02), (0.05, 0.0), (0.2, 0.3)] {
                assert_eq!(collides(a, ra, b, rb), collides(b, rb, a, ra));
                assert_eq!(collides(a, ra, b, rb), collides(b, ra, a, rb));
            }
        }
    }

    #[test]
    fn test_collides_threshold() {
        let a = DVec3::Z;
        let b = rotate_about(DVec3::Z, DVec3::X, 0.1);
        assert!(collides(a, 0.06, b, 0.05));
        assert!(!collides(a, 0.04, b, 0.05));
        // Exact boundary: b is constructed so dot(a, b) == cos(0.1).
        let boundary = DVec3::new(0.0, -(0.1f64).sin(), (0.1f64).cos());
        assert_eq!(a.dot(boundary), (0.1f64).cos());
        assert!(!collides(a, 0.05, boundary, 0.05));
    }

    #[test]
    fn test_collides_antipodal_with_huge_radius() {
        assert!(collides(DVec3::Z, 2.0, DVec3::NEG_Z, 2.0));
        assert!(!collides(DVec3::Z, 0.1, DVec3::NEG_Z, 0.1));
    }

    fn setup() -> (World, IdAllocator, ChaCha8Rng, SimConstants, Vec<Entity>) {
        (
            World::new(),
            IdAllocator::default(),
            ChaCha8Rng::seed_from_u64(3),
            SimConstants::default(),
            Vec::new(),
        )
    }

    #[test]
    fn test_projectile_hits_one_asteroid_only() {
        let (mut world, mut ids, mut rng, constants, mut buffer) = setup();
        // Two overlapping asteroids under one projectile.
        let first = asteroids::spawn_at(&mut world, &mut ids, &mut rng, DVec3::Z, 4, &constants);
        let second = asteroids::spawn_at(&mut world, &mut ids, &mut rng, DVec3::Z, 4, &constants);
        let shot = projectiles::spawn(&mut world, &mut ids, DVec3::Z, DVec3::X, &constants);

        let hits = projectile_asteroid_pass(&mut world, &constants, &mut buffer);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].projectile_id, shot);
        assert!(hits[0].asteroid_id == first || hits[0].asteroid_id == second);
        assert_eq!(projectiles::count(&world), 0);

        let hit_count = asteroids::all(&world).iter().filter(|a| a.hit).count();
        assert_eq!(hit_count, 1);
    }

    #[test]
    fn test_two_projectiles_two_asteroids() {
        let (mut world, mut ids, mut rng, constants, mut buffer) = setup();
        asteroids::spawn_at(&mut world, &mut ids, &mut rng, DVec3::Z, 4, &constants);
        asteroids::spawn_at(&mut world, &mut ids, &mut rng, DVec3::Z, 4, &constants);
        projectiles::spawn(&mut world, &mut ids, DVec3::Z, DVec3::X, &constants);
        projectiles::spawn(&mut world, &mut ids, DVec3::Z, DVec3::Y, &constants);

        let hits = projectile_asteroid_pass(&mut world, &constants, &mut buffer);
        assert_eq!(hits.len(), 2);
        assert_ne!(hits[0].asteroid_id, hits[1].asteroid_id);
        assert!(asteroids::all(&world).iter().all(|a| a.hit));
    }

    #[test]
    fn test_already_hit_asteroid_is_ignored() {
        let (mut world, mut ids, mut rng, constants, mut buffer) = setup();
        let target = asteroids::spawn_at(&mut world, &mut ids, &mut rng, DVec3::Z, 4, &constants);
        assert!(asteroids::mark_hit(&mut world, target, 1.0));
        assert!(!asteroids::mark_hit(&mut world, target, 1.0));
        projectiles::spawn(&mut world, &mut ids, DVec3::Z, DVec3::X, &constants);

        let hits = projectile_asteroid_pass(&mut world, &constants, &mut buffer);
        assert!(hits.is_empty());
        assert_eq!(projectiles::count(&world), 1);
    }

    #[test]
    fn test_every_reported_hit_was_marked_by_the_pass() {
        let (mut world, mut ids, mut rng, constants, mut buffer) = setup();
        let spent = asteroids::spawn_at(&mut world, &mut ids, &mut rng, DVec3::Z, 4, &constants);
        assert!(asteroids::mark_hit(&mut world, spent, 1.0));
        let live = asteroids::spawn_at(&mut world, &mut ids, &mut rng, DVec3::Z, 4, &constants);
        for direction in [DVec3::X, DVec3::Y, DVec3::NEG_X] {
            projectiles::spawn(&mut world, &mut ids, DVec3::Z, direction, &constants);
        }

        let hits = projectile_asteroid_pass(&mut world, &constants, &mut buffer);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].asteroid_id, live);
        assert_eq!(projectiles::count(&world), 2);
        assert!(!asteroids::mark_hit(&mut world, live, 1.0));
    }

    #[test]
    fn test_distant_projectile_misses() {
        let (mut world, mut ids, mut rng, constants, mut buffer) = setup();
        asteroids::spawn_at(&mut world, &mut ids, &mut rng, DVec3::Z, 4, &constants);
        projectiles::spawn(&mut world, &mut ids, DVec3::X, DVec3::Y, &constants);
        assert!(projectile_asteroid_pass(&mut world, &constants, &mut buffer).is_empty());
    }

    #[test]
    fn test_ship_pass_reports_first_overlap() {
        let (mut world, mut ids, mut rng, constants, _) = setup();
        assert_eq!(ship_asteroid_pass(&world, DVec3::Z, &constants), None);

        let far = asteroids::spawn_at(&mut world, &mut ids, &mut rng, DVec3::NEG_Z, 4, &constants);
        assert_eq!(ship_asteroid_pass(&world, DVec3::Z, &constants), None);

        let near_pos = rotate_about(DVec3::Z, DVec3::X, 0.05);
        let near = asteroids::spawn_at(&mut world, &mut ids, &mut rng, near_pos, 4, &constants);
        assert_eq!(ship_asteroid_pass(&world, DVec3::Z, &constants), Some(near));
        assert_ne!(Some(far), ship_asteroid_pass(&world, DVec3::Z, &constants));

        asteroids::mark_hit(&mut world, near, 1.0);
        assert_eq!(ship_asteroid_pass(&world, DVec3::Z, &constants), None);
    }
}
