//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world and the ship, processes player
//! commands, runs all systems, and produces `RenderSnapshot`s. Completely
//! headless, enabling deterministic testing.
//!
//! Until an authoritative snapshot arrives every tick is predicted locally.
//! After that the latest snapshot is re-applied wholesale at the start of
//! each tick and only the heading lerp still runs locally.

use std::collections::VecDeque;

use glam::DVec3;
use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use gyrostar_core::commands::{InputIntent, PlayerCommand};
use gyrostar_core::config::SimConstants;
use gyrostar_core::enums::{GamePhase, StateSource};
use gyrostar_core::error::{ConfigError, SnapshotError};
use gyrostar_core::events::SimEvent;
use gyrostar_core::state::{AsteroidView, AuthoritativeSnapshot, ProjectileView, RenderSnapshot};
use gyrostar_core::types::{EntityId, IdAllocator, SimTime};

use crate::systems;
use crate::systems::orientation::{self, ShipState};
use crate::systems::wave_spawner::RoundState;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub constants: SimConstants,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            constants: SimConstants::default(),
        }
    }
}

impl SimConfig {
    /// Range-check the constants. Deserializing a config does not do this.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.constants.validate()
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    world: World,
    ship: ShipState,
    time: SimTime,
    phase: GamePhase,
    source: StateSource,
    constants: SimConstants,
    rng: ChaCha8Rng,
    ids: IdAllocator,
    input: InputIntent,
    command_queue: VecDeque<PlayerCommand>,
    pending_snapshot: Option<AuthoritativeSnapshot>,
    authoritative: Option<AuthoritativeSnapshot>,
    despawn_buffer: Vec<Entity>,
    events: Vec<SimEvent>,
    round: RoundState,
}

impl SimulationEngine {
    /// Validate `config`, then create the engine.
    pub fn try_new(config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::new(config))
    }

    /// Create a new simulation engine and spawn the first wave.
    ///
    /// The constants are trusted as given; use [`Self::try_new`] for
    /// configs that came from outside.
    pub fn new(config: SimConfig) -> Self {
        let mut engine = Self {
            world: World::new(),
            ship: ShipState::new(config.constants.starting_lives),
            time: SimTime::default(),
            phase: GamePhase::default(),
            source: StateSource::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            ids: IdAllocator::default(),
            input: InputIntent::default(),
            command_queue: VecDeque::new(),
            pending_snapshot: None,
            authoritative: None,
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            round: RoundState::new(&config.constants),
            constants: config.constants,
        };
        engine.reset_round();
        engine
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Replace the held input intent immediately.
    pub fn set_input(&mut self, intent: InputIntent) {
        self.input = intent.sanitized(self.input.aim_angle);
    }

    /// Buffer an authoritative snapshot for the start of the next tick.
    ///
    /// Malformed snapshots are rejected and the previous one stays in effect.
    pub fn receive_snapshot(&mut self, snapshot: AuthoritativeSnapshot) -> Result<(), SnapshotError> {
        if let Err(e) = snapshot.validate() {
            log::warn!("rejected authoritative snapshot: {e}");
            return Err(e);
        }
        self.pending_snapshot = Some(snapshot);
        Ok(())
    }

    /// Advance the simulation by one tick.
    pub fn step(&mut self) {
        self.process_commands();

        if let Some(snapshot) = self.pending_snapshot.take() {
            if self.source == StateSource::Predicted {
                log::info!("authoritative snapshots flowing, local prediction suspended");
            }
            self.authoritative = Some(snapshot);
            self.source = StateSource::Authoritative;
        }

        match self.source {
            StateSource::Predicted => self.run_predicted(),
            StateSource::Authoritative => self.run_authoritative(),
        }
        self.time.advance(self.constants.dt());
    }

    /// Build a snapshot of the current state, draining events since the last one.
    pub fn snapshot(&mut self) -> RenderSnapshot {
        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(
            &self.world,
            &self.ship,
            &self.time,
            self.phase,
            self.source,
            events,
            &self.round,
        )
    }

    /// Advance one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> RenderSnapshot {
        self.step();
        self.snapshot()
    }

    /// Reset ship, entities, ids, score and time, and start a new round.
    pub fn restart(&mut self) {
        self.ship = ShipState::new(self.constants.starting_lives);
        self.ids = IdAllocator::default();
        self.time = SimTime::default();
        self.phase = GamePhase::Playing;
        self.source = StateSource::Predicted;
        self.input = InputIntent::default();
        self.pending_snapshot = None;
        self.authoritative = None;
        self.events.clear();
        self.reset_round();
        log::info!("round restarted");
    }

    // --- Accessors ---

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn source(&self) -> StateSource {
        self.source
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn ship(&self) -> &ShipState {
        &self.ship
    }

    pub fn constants(&self) -> &SimConstants {
        &self.constants
    }

    pub fn input(&self) -> &InputIntent {
        &self.input
    }

    pub fn score(&self) -> u32 {
        self.round.score
    }

    pub fn wave(&self) -> u32 {
        self.round.wave
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn projectiles(&self) -> Vec<ProjectileView> {
        systems::projectiles::all(&self.world)
    }

    pub fn asteroids(&self) -> Vec<AsteroidView> {
        systems::asteroids::all(&self.world)
    }

    // --- Entity operations ---

    pub fn spawn_projectile(&mut self, position: DVec3, direction: DVec3) -> EntityId {
        systems::projectiles::spawn(&mut self.world, &mut self.ids, position, direction, &self.constants)
    }

    /// Fire a volley of `ray_count` projectiles fanned around `aim_direction`.
    pub fn spawn_projectile_spread(
        &mut self,
        position: DVec3,
        aim_direction: DVec3,
        ray_count: u32,
        spread_angle: f64,
    ) -> Vec<EntityId> {
        systems::projectiles::spawn_spread(
            &mut self.world,
            &mut self.ids,
            position,
            aim_direction,
            ray_count,
            spread_angle,
            &self.constants,
        )
    }

    pub fn spawn_asteroid(&mut self, position: DVec3, size: u8) -> EntityId {
        systems::asteroids::spawn_at(
            &mut self.world,
            &mut self.ids,
            &mut self.rng,
            position,
            size,
            &self.constants,
        )
    }

    pub fn remove_projectile(&mut self, id: EntityId) -> bool {
        systems::projectiles::remove(&mut self.world, id)
    }

    pub fn remove_asteroid(&mut self, id: EntityId) -> bool {
        systems::asteroids::remove(&mut self.world, id)
    }

    /// Mark an asteroid hit with the configured fragmentation delay.
    pub fn mark_asteroid_hit(&mut self, id: EntityId) -> bool {
        systems::asteroids::mark_hit(&mut self.world, id, self.constants.hit_to_fragment_secs)
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::SetInput { intent } => self.set_input(intent),
            PlayerCommand::Restart => self.restart(),
        }
    }

    fn reset_round(&mut self) {
        if let Some(event) = world_setup::setup_round(
            &mut self.world,
            &mut self.ids,
            &mut self.rng,
            &mut self.round,
            self.ship.position,
            &self.constants,
        ) {
            self.events.push(event);
        }
    }

    /// One locally predicted tick.
    fn run_predicted(&mut self) {
        let dt = self.constants.dt();
        let playing = self.phase == GamePhase::Playing;

        // 1. Input and orientation
        if playing {
            self.ship.aim_angle = self.input.aim_angle;
            orientation::apply_input(&mut self.ship, &self.input, &self.constants, dt);
            orientation::target_heading_from_input(&mut self.ship, &self.input);
        }
        orientation::update_heading(&mut self.ship, self.constants.ship_rotation_gain, dt);
        self.ship.tick_timers(dt);

        // 2. Weapons
        if playing && self.input.fire_pressed {
            self.fire();
        }

        // 3. Entity advance
        systems::projectiles::update(&mut self.world, dt, &mut self.despawn_buffer);
        let expired = systems::asteroids::update(&mut self.world, dt, &mut self.despawn_buffer);

        // 4. Collision passes
        let hits = systems::collision::projectile_asteroid_pass(
            &mut self.world,
            &self.constants,
            &mut self.despawn_buffer,
        );
        self.events.extend(hits.into_iter().map(|hit| SimEvent::AsteroidHit {
            asteroid_id: hit.asteroid_id,
            projectile_id: hit.projectile_id,
        }));

        if playing && !self.ship.invincible {
            if let Some(asteroid_id) =
                systems::collision::ship_asteroid_pass(&self.world, self.ship.position, &self.constants)
            {
                self.handle_ship_hit(asteroid_id);
            }
        }

        // 5. Fragmentation and scoring
        for parent in &expired {
            let fragments = systems::fragmentation::fragment(
                &mut self.world,
                &mut self.ids,
                &mut self.rng,
                parent,
                &self.constants,
            );
            self.round.score = self
                .round
                .score
                .saturating_add(self.constants.asteroid_points(parent.size));
            self.events.push(SimEvent::AsteroidFragmented {
                asteroid_id: parent.id,
                size: parent.size,
                fragments,
            });
        }

        // 6. Waves
        if self.phase == GamePhase::Playing {
            if let Some(event) = systems::wave_spawner::run(
                &mut self.world,
                &mut self.ids,
                &mut self.rng,
                &mut self.round,
                self.ship.position,
                &self.constants,
            ) {
                self.events.push(event);
            }
        }
    }

    /// One tick driven by the latest authoritative snapshot.
    fn run_authoritative(&mut self) {
        let Some(snapshot) = &self.authoritative else {
            return;
        };
        systems::reconcile::apply_snapshot(
            &mut self.world,
            &mut self.ship,
            &mut self.ids,
            &mut self.rng,
            snapshot,
            &self.constants,
            &mut self.despawn_buffer,
        );
        if snapshot.ship.heading.is_none() {
            orientation::target_heading_from_input(&mut self.ship, &self.input);
        }
        orientation::update_heading(&mut self.ship, self.constants.ship_rotation_gain, self.constants.dt());

        let phase = if self.ship.lives == 0 {
            GamePhase::GameOver
        } else {
            GamePhase::Playing
        };
        if phase == GamePhase::GameOver && self.phase != GamePhase::GameOver {
            self.events.push(SimEvent::GameOver {
                score: self.round.score,
            });
        }
        self.phase = phase;
    }

    fn fire(&mut self) {
        if self.ship.fire_cooldown_secs > 0.0 {
            return;
        }
        let ids = systems::projectiles::spawn_spread(
            &mut self.world,
            &mut self.ids,
            self.ship.position,
            self.ship.aim_direction(),
            self.constants.projectile_ray_count,
            self.constants.projectile_spread_angle,
            &self.constants,
        );
        self.ship.fire_cooldown_secs = self.constants.fire_cooldown_secs;
        self.events.push(SimEvent::ProjectileFired { ids });
    }

    /// Apply a ship collision. An asteroid that is already hit or gone costs
    /// nothing; returns whether a life was lost.
    pub(crate) fn handle_ship_hit(&mut self, asteroid_id: EntityId) -> bool {
        if !systems::asteroids::mark_hit(&mut self.world, asteroid_id, self.constants.hit_to_fragment_secs) {
            return false;
        }
        self.ship.lives = self.ship.lives.saturating_sub(1);
        self.events.push(SimEvent::ShipHit {
            asteroid_id,
            lives_remaining: self.ship.lives,
        });

        if self.ship.lives == 0 {
            self.phase = GamePhase::GameOver;
            self.events.push(SimEvent::GameOver {
                score: self.round.score,
            });
            log::info!("game over at tick {} with score {}", self.time.tick, self.round.score);
        } else {
            self.ship.grant_invincibility(self.constants.invincibility_secs);
            log::debug!("ship hit by asteroid {asteroid_id}, {} lives left", self.ship.lives);
        }
        true
    }
}
