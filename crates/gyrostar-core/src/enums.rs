//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Round phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Ship alive, simulation running.
    #[default]
    Playing,
    /// Out of lives. Entities keep moving, the ship no longer collides or fires.
    GameOver,
}

/// Where the current ship and entity state comes from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum StateSource {
    /// No authoritative snapshot yet; state is predicted locally.
    #[default]
    Predicted,
    /// At least one snapshot has arrived; state mirrors the latest one.
    Authoritative,
}

/// Fixed-step scheduler state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SchedulerState {
    #[default]
    Stopped,
    Running,
}
