//! GYROSTAR headless host.
//!
//! Runs the simulation engine on a dedicated thread, driven by the
//! fixed-step scheduler from wall time, and exposes a small command and
//! snapshot surface to whatever sits in front of it.

pub mod error;
pub mod game_loop;
pub mod ipc;
pub mod state;

pub use gyrostar_core as core;
