//! Errors surfaced by the host's command and snapshot surface.

use gyrostar_core::error::ConfigError;

/// Failures of the host surface. The simulation itself never fails.
#[derive(thiserror::Error, Debug)]
pub enum HostError {
    #[error("Simulation already running")]
    AlreadyRunning,

    #[error("Simulation not started")]
    NotStarted,

    /// The simulation config failed its range checks.
    #[error("Invalid simulation config: {0}")]
    Config(#[from] ConfigError),

    /// The game loop thread has exited.
    #[error("Game loop disconnected")]
    Disconnected,

    /// Spawning the game loop thread failed.
    #[error("Failed to spawn game loop: {0}")]
    Spawn(#[from] std::io::Error),

    /// An inbound message is not valid JSON for `HostMessage`.
    #[error("Malformed message: {0}")]
    Decode(#[from] serde_json::Error),

    /// Another thread panicked while holding shared state.
    #[error("Shared state poisoned")]
    Poisoned,
}

impl<T> From<std::sync::PoisonError<T>> for HostError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        HostError::Poisoned
    }
}
