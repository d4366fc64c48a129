//! Simulation constants and tuning parameters.
//!
//! These are the compiled-in defaults. Both the predictive and the
//! authoritative copy must run with identical values; overrides go through
//! [`crate::config::SimConstants`].

use glam::DVec3;

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Sphere ---

/// Radius of the play sphere in world units.
pub const SPHERE_RADIUS: f64 = 100.0;

/// Fixed point on the unit sphere the ship is visually anchored to.
pub const SHIP_ANCHOR: DVec3 = DVec3::Z;

/// Axis the world pitches about for forward/backward input.
pub const PITCH_AXIS: DVec3 = DVec3::X;

/// Axis the world yaws about for left/right input.
pub const YAW_AXIS: DVec3 = DVec3::Y;

/// Screen-forward tangent at the anchor (aim angle 0).
pub const ANCHOR_FORWARD: DVec3 = DVec3::Y;

/// Screen-right tangent at the anchor (aim angle +π/2).
pub const ANCHOR_RIGHT: DVec3 = DVec3::X;

// --- Numerics ---

/// Squared length below which a vector is treated as degenerate.
pub const DEGENERATE_EPSILON_SQ: f64 = 1e-12;

// --- Ship ---

/// Ship angular speed across the sphere (rad/s).
pub const SHIP_ANGULAR_SPEED: f64 = 0.8;

/// Exponential gain for the visual heading lerp (1/s).
pub const SHIP_ROTATION_GAIN: f64 = 12.0;

/// Ship collision diameter in world units.
pub const SHIP_DIAMETER: f64 = 4.0;

/// Lives at the start of a round.
pub const SHIP_STARTING_LIVES: u32 = 3;

/// Grace period after losing a life (seconds).
pub const SHIP_INVINCIBILITY_SECS: f64 = 2.5;

// --- Projectiles ---

/// Projectile angular speed (rad/s).
pub const PROJECTILE_ANGULAR_SPEED: f64 = 1.6;

/// Projectile lifetime (seconds).
pub const PROJECTILE_LIFETIME_SECS: f64 = 1.2;

/// Projectile collision diameter in world units.
pub const PROJECTILE_DIAMETER: f64 = 1.0;

/// Angle between adjacent rays in a volley (radians).
pub const PROJECTILE_SPREAD_ANGLE: f64 = 0.1;

/// Rays per volley.
pub const PROJECTILE_RAY_COUNT: u32 = 1;

/// Minimum time between volleys (seconds).
pub const FIRE_COOLDOWN_SECS: f64 = 0.2;

// --- Asteroids ---

/// Minimum asteroid angular speed (rad/s).
pub const ASTEROID_MIN_SPEED: f64 = 0.05;

/// Maximum asteroid angular speed (rad/s).
pub const ASTEROID_MAX_SPEED: f64 = 0.15;

/// Largest size tier.
pub const ASTEROID_MAX_SIZE: u8 = 4;

/// Visual diameter per size tier, indexed by `size - 1`.
pub const ASTEROID_DIAMETERS: [f64; 4] = [3.0, 6.0, 10.0, 15.0];

/// Multiplier applied to asteroid collision radius (more forgiving hits).
pub const COLLISION_PADDING: f64 = 1.15;

/// Speed multiplier applied to fragments relative to their parent.
pub const FRAGMENT_SPEED_MULTIPLIER: f64 = 1.3;

/// Delay between a hit and fragmentation (seconds).
pub const HIT_TO_FRAGMENT_SECS: f64 = 0.15;

/// Maximum cosmetic spin speed per axis (rad/s).
pub const ASTEROID_MAX_SPIN: f64 = 1.5;

/// Points awarded per destroyed asteroid, indexed by `size - 1`.
pub const ASTEROID_POINTS: [u32; 4] = [100, 50, 20, 10];

// --- Waves ---

/// Size-4 asteroids in the first wave.
pub const INITIAL_ASTEROID_COUNT: u32 = 4;

/// Minimum angular distance between a freshly spawned wave asteroid and the ship.
pub const SPAWN_CLEARANCE: f64 = 0.6;

/// Attempts to find a position that honours `SPAWN_CLEARANCE` before giving up.
pub const SPAWN_PLACEMENT_ATTEMPTS: u32 = 16;

// --- Reconciliation ---

/// Maximum projectiles tracked from an authoritative snapshot.
pub const MAX_TRACKED_PROJECTILES: usize = 256;

/// Maximum asteroids tracked from an authoritative snapshot.
pub const MAX_TRACKED_ASTEROIDS: usize = 128;

// --- Scheduler ---

/// Largest frame delta the scheduler accepts (seconds).
pub const MAX_FRAME_DELTA: f64 = 0.1;

/// Maximum simulation ticks per rendered frame.
pub const MAX_STEPS_PER_FRAME: u32 = 5;
