//! Global events used for cross-system communication.
//!
//! The host game talks to the respawn pipeline through `DeathEvent` and
//! `InitializeLevel`; everything else is emitted by the pipeline so HUDs,
//! audio or level transitions can react without reaching into its resources.

use bevy::prelude::*;

use crate::world::RespawnError;

/// Sent when an entity dies.
///
/// Enemies named here receive the `Dead` marker, exactly as if their health
/// had reached zero.
#[derive(Event)]
pub struct DeathEvent {
    /// Entity that died
    pub entity: Entity,
    /// Entity that killed them (if any)
    pub killed_by: Option<Entity>,
}

/// Request to tear down the current level and build another one.
#[derive(Event, Debug, Clone, Copy, Default)]
pub struct InitializeLevel {
    /// Index into the level configuration; `None` advances to the next level.
    pub level_index: Option<usize>,
}

/// Sent after a pooled instance has been placed back into the world.
#[derive(Event, Debug, Clone)]
pub struct EnemyRespawned {
    /// The instance that was activated
    pub instance: Entity,
    /// The dead instance it replaces
    pub replaces: Entity,
    pub enemy_type: String,
    pub position: Vec3,
    /// Respawns spent so far in this level, including this one
    pub spent: u32,
    pub max: u32,
}

/// Sent when a respawn protocol had to be abandoned.
#[derive(Event, Debug, Clone)]
pub struct RespawnFailed {
    /// The pooled instance that was taken and is now lost
    pub instance: Entity,
    pub error: RespawnError,
}

/// Sent once when the respawn budget is spent and no enemy is alive.
#[derive(Event, Debug, Clone, Copy)]
pub struct LevelComplete {
    pub level_index: usize,
}

/// Sent when a level could not be activated.
#[derive(Event, Debug, Clone)]
pub struct LevelInitFailed {
    pub level_index: usize,
    pub error: RespawnError,
}
