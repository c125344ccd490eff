//! Error types for level data loading and the respawn pipeline.

use thiserror::Error;

/// Errors that can occur when loading level, enemy, or settings data.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// File could not be found.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// File could not be read.
    #[error("Failed to read file '{path}': {details}")]
    ReadError { path: String, details: String },

    /// RON parsing failed.
    #[error("Parse error in '{path}': {details}")]
    ParseError { path: String, details: String },
}

/// Errors raised while building a level or respawning enemies.
///
/// Only the initialization errors (see [`RespawnError::is_fatal`]) stop a
/// level from running. Everything else is handled inside the scheduler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RespawnError {
    /// A level descriptor gives an enemy type a non-positive respawn count.
    #[error("Enemy type '{enemy_type}' has non-positive respawn count {count}; it will never respawn")]
    Configuration { enemy_type: String, count: i32 },

    /// No pooled instance left for this type.
    #[error("Pool for enemy type '{enemy_type}' is empty")]
    PoolExhausted { enemy_type: String },

    /// Every spawn point is too close to the player or currently visible.
    #[error("No valid spawn point for enemy type '{enemy_type}'")]
    NoValidSpawnPoint { enemy_type: String },

    /// No entity tagged as the player exists (or more than one does).
    #[error("Level has no unique player entity")]
    MissingPlayer,

    /// No entity tagged as a respawn point exists.
    #[error("Level has no respawn points")]
    MissingSpawnPoints,

    /// The requested level index is not in the level configuration.
    #[error("Level index {index} out of range ({available} levels configured)")]
    LevelOutOfRange { index: usize, available: usize },
}

impl RespawnError {
    /// Whether this error prevents the level from being activated.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            RespawnError::MissingPlayer
                | RespawnError::MissingSpawnPoints
                | RespawnError::LevelOutOfRange { .. }
        )
    }
}
