#[cfg(test)]
mod tests {
    use glam::{DQuat, DVec3};

    use crate::commands::{InputIntent, PlayerCommand};
    use crate::config::SimConstants;
    use crate::enums::*;
    use crate::error::{ConfigError, SnapshotError};
    use crate::events::SimEvent;
    use crate::state::*;
    use crate::types::{IdAllocator, SimTime, RESERVED_ID};

    #[test]
    fn test_game_phase_serde() {
        for v in [GamePhase::Playing, GamePhase::GameOver] {
            let json = serde_json::to_string(&v).unwrap();
            let back: GamePhase = serde_json::from_str(&json).unwrap();
            assert_eq!(v, back);
        }
    }

    /// Verify PlayerCommand round-trips through serde (tagged union).
    #[test]
    fn test_player_command_serde() {
        let commands = vec![
            PlayerCommand::SetInput {
                intent: InputIntent {
                    forward: true,
                    aim_angle: 0.5,
                    fire_pressed: true,
                    ..Default::default()
                },
            },
            PlayerCommand::Restart,
        ];
        for cmd in &commands {
            let json = serde_json::to_string(cmd).unwrap();
            let back: PlayerCommand = serde_json::from_str(&json).unwrap();
            // Compare JSON representations since PlayerCommand doesn't derive PartialEq
            assert_eq!(json, serde_json::to_string(&back).unwrap());
        }
    }

    #[test]
    fn test_sim_event_serde() {
        let events = vec![
            SimEvent::ProjectileFired { ids: vec![1, 2, 3] },
            SimEvent::AsteroidHit {
                asteroid_id: 4,
                projectile_id: 9,
            },
            SimEvent::AsteroidFragmented {
                asteroid_id: 4,
                size: 3,
                fragments: vec![10, 11],
            },
            SimEvent::ShipHit {
                asteroid_id: 5,
                lives_remaining: 2,
            },
            SimEvent::GameOver { score: 1200 },
            SimEvent::WaveStarted {
                wave: 2,
                asteroid_count: 5,
            },
        ];
        for event in &events {
            let json = serde_json::to_string(event).unwrap();
            let back: SimEvent = serde_json::from_str(&json).unwrap();
            assert_eq!(*event, back);
        }
    }

    /// Verify RenderSnapshot can be serialized to JSON.
    #[test]
    fn test_render_snapshot_serde() {
        let snapshot = RenderSnapshot::default();
        let json = serde_json::to_string(&snapshot).unwrap();
        let back: RenderSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot.time.tick, back.time.tick);
        assert_eq!(snapshot.phase, back.phase);
        assert!(
            json.len() < 1024,
            "Empty snapshot should be <1KB, was {} bytes",
            json.len()
        );
    }

    #[test]
    fn test_authoritative_snapshot_optional_fields() {
        let json = r#"{
            "ship": {
                "position": [0.0, 0.0, 1.0],
                "orientation": [0.0, 0.0, 0.0, 1.0],
                "aim_angle": 0.25,
                "lives": 2,
                "invincible": false
            },
            "asteroids": [
                { "id": 5, "position": [1.0, 0.0, 0.0], "velocity": [0.0, 1.0, 0.0], "size": 3 }
            ]
        }"#;
        let snapshot: AuthoritativeSnapshot = serde_json::from_str(json).unwrap();
        assert!(snapshot.projectiles.is_empty());
        assert_eq!(snapshot.ship.heading, None);
        assert_eq!(snapshot.asteroids[0].speed, None);
        assert!(!snapshot.asteroids[0].hit);
        assert!(snapshot.validate().is_ok());
    }

    #[test]
    fn test_snapshot_validation_rejects_malformed() {
        let mut snapshot = AuthoritativeSnapshot::default();
        assert!(snapshot.validate().is_ok());

        snapshot.ship.position = DVec3::ZERO;
        assert_eq!(
            snapshot.validate(),
            Err(SnapshotError::MalformedShip("position"))
        );

        snapshot.ship.position = DVec3::Z;
        snapshot.ship.aim_angle = f64::NAN;
        assert_eq!(
            snapshot.validate(),
            Err(SnapshotError::MalformedShip("aim_angle"))
        );

        snapshot.ship.aim_angle = 0.0;
        snapshot.ship.orientation = DQuat::from_xyzw(0.0, 0.0, 0.0, 0.0);
        assert_eq!(
            snapshot.validate(),
            Err(SnapshotError::MalformedShip("orientation"))
        );

        snapshot.ship.orientation = DQuat::IDENTITY;
        snapshot.asteroids.push(AuthoritativeAsteroid {
            id: 8,
            position: DVec3::X,
            velocity: DVec3::Y,
            size: 5,
            speed: None,
            hit: false,
        });
        assert_eq!(
            snapshot.validate(),
            Err(SnapshotError::InvalidAsteroidSize { id: 8, size: 5 })
        );

        snapshot.asteroids.clear();
        snapshot.projectiles.push(AuthoritativeProjectile {
            id: 3,
            position: DVec3::new(f64::INFINITY, 0.0, 0.0),
            direction: DVec3::Y,
        });
        assert_eq!(
            snapshot.validate(),
            Err(SnapshotError::MalformedProjectile(3))
        );
    }

    #[test]
    fn test_snapshot_rejects_reserved_id() {
        let mut snapshot = AuthoritativeSnapshot::default();
        snapshot.asteroids.push(AuthoritativeAsteroid {
            id: RESERVED_ID,
            position: DVec3::Z,
            velocity: DVec3::X,
            size: 2,
            speed: None,
            hit: false,
        });
        assert_eq!(
            snapshot.validate(),
            Err(SnapshotError::ReservedId(RESERVED_ID))
        );

        snapshot.asteroids.clear();
        snapshot.projectiles.push(AuthoritativeProjectile {
            id: RESERVED_ID,
            position: DVec3::Z,
            direction: DVec3::X,
        });
        assert_eq!(
            snapshot.validate(),
            Err(SnapshotError::ReservedId(RESERVED_ID))
        );
    }

    #[test]
    fn test_default_constants_are_valid() {
        let constants = SimConstants::default();
        assert!(constants.validate().is_ok());
        assert!((constants.dt() - 1.0 / 60.0).abs() < 1e-12);
    }

    #[test]
    fn test_constants_partial_json_keeps_defaults() {
        let constants =
            SimConstants::from_json_str(r#"{ "tick_rate": 30, "collision_padding": 1.5 }"#)
                .unwrap();
        assert_eq!(constants.tick_rate, 30);
        assert_eq!(constants.collision_padding, 1.5);
        assert_eq!(
            constants.sphere_radius,
            SimConstants::default().sphere_radius
        );
    }

    #[test]
    fn test_constants_rejects_invalid_values() {
        let err = SimConstants::from_json_str(r#"{ "collision_padding": 0.5 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "collision_padding",
                ..
            }
        ));

        let err = SimConstants::from_json_str(r#"{ "projectile_ray_count": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));

        let err = SimConstants::from_json_str(
            r#"{ "asteroid_min_speed": 0.5, "asteroid_max_speed": 0.1 }"#,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));

        let err = SimConstants::from_json_str("not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_constants_load_missing_file() {
        let err = SimConstants::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_asteroid_angular_radius_grows_with_size() {
        let constants = SimConstants::default();
        let radii: Vec<f64> = (1..=4)
            .map(|s| constants.asteroid_angular_radius(s))
            .collect();
        assert!(radii.windows(2).all(|w| w[0] < w[1]));
        let unpadded = constants.asteroid_diameters[3] * 0.5 / constants.sphere_radius;
        assert!((radii[3] - unpadded * constants.collision_padding).abs() < 1e-12);
    }

    #[test]
    fn test_input_sanitized() {
        let intent = InputIntent {
            aim_angle: f64::NAN,
            ..Default::default()
        };
        assert_eq!(intent.sanitized(0.7).aim_angle, 0.7);

        let intent = InputIntent {
            aim_angle: 3.0 * std::f64::consts::PI,
            ..Default::default()
        };
        let aim = intent.sanitized(0.0).aim_angle;
        assert!(aim.abs() <= std::f64::consts::PI + 1e-12);

        let intent = InputIntent {
            aim_angle: 0.9,
            ..Default::default()
        };
        assert_eq!(intent.sanitized(0.0).aim_angle, 0.9);
    }

    #[test]
    fn test_input_axes() {
        let intent = InputIntent {
            forward: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(intent.pitch_axis(), 1.0);
        assert_eq!(intent.yaw_axis(), -1.0);
        assert_eq!(intent.screen_vector(), (1.0, 1.0));
        assert!(intent.has_movement());

        let cancelled = InputIntent {
            forward: true,
            backward: true,
            ..Default::default()
        };
        assert!(!cancelled.has_movement());
    }

    /// Verify SimTime advancement.
    #[test]
    fn test_sim_time_advance() {
        let mut time = SimTime::default();
        for _ in 0..60 {
            time.advance(1.0 / 60.0);
        }
        assert_eq!(time.tick, 60);
        assert!((time.elapsed_secs - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_id_allocator_observe() {
        let mut ids = IdAllocator::default();
        assert_eq!(ids.allocate(), 0);
        assert_eq!(ids.allocate(), 1);
        ids.observe(10);
        assert_eq!(ids.allocate(), 11);
        ids.observe(3);
        assert_eq!(ids.peek(), 12);
    }

    #[test]
    fn test_id_allocator_observe_never_wraps() {
        let mut ids = IdAllocator::default();
        ids.observe(RESERVED_ID - 1);
        assert_eq!(ids.peek(), RESERVED_ID);
        ids.observe(RESERVED_ID);
        assert_eq!(ids.peek(), RESERVED_ID);
    }
}
