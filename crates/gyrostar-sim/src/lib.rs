//! Simulation engine for GYROSTAR.
//!
//! Owns the hecs ECS world, runs systems at a fixed tick rate,
//! and produces RenderSnapshots for the frontend.

pub mod engine;
pub mod scheduler;
pub mod systems;
pub mod world_setup;

pub use engine::{SimConfig, SimulationEngine};
pub use gyrostar_core as core;
pub use scheduler::{FixedStepScheduler, TickCount};
