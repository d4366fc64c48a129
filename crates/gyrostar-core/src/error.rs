//! Error types for configuration loading and snapshot validation.

use crate::types::EntityId;

/// Errors raised while loading or validating [`crate::config::SimConstants`].
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// Reading the constants file failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The constants file is not valid JSON for `SimConstants`.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// A value is out of its accepted range.
    #[error("Invalid value for {field}: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Reasons an authoritative snapshot is rejected before it reaches the world.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SnapshotError {
    /// The ship block contains a non-finite or zero-length value.
    #[error("ship state is malformed: {0}")]
    MalformedShip(&'static str),

    /// A projectile entry has a non-finite or zero-length vector.
    #[error("projectile {0} has a malformed vector")]
    MalformedProjectile(EntityId),

    /// An asteroid entry has a non-finite or zero-length vector.
    #[error("asteroid {0} has a malformed vector")]
    MalformedAsteroid(EntityId),

    /// An entity uses the reserved top id.
    #[error("entity id {0} is reserved")]
    ReservedId(EntityId),

    /// An asteroid size tier is outside 1..=4.
    #[error("asteroid {id} has invalid size {size}")]
    InvalidAsteroidSize { id: EntityId, size: u8 },
}
