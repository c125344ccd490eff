//! Enemy Respawn - pooled enemy respawning for level-based Bevy games.
//!
//! Each level pre-spawns a fixed pool of inactive enemies per type. When an
//! active enemy dies, a pooled replacement is placed at a respawn point that
//! is far enough from the player and out of their sight, one respawn at a
//! time with a cooldown in between, until the level's respawn budget is
//! spent. The level is complete once the budget is spent and nobody is left
//! alive.
//!
//! # Architecture
//!
//! The crate is organized into plugins, each handling a specific aspect:
//!
//! - **Core**: Game states, events, settings, per-tick system ordering
//! - **Enemies**: Enemy components, pool store, death marking, respawn scheduler
//! - **World**: Level data, spawn point catalog and visibility, level session
//!
//! The host game provides the player (tagged `Player`), combat (setting
//! `Health` or sending `DeathEvent`), and optionally its own respawn points.

pub mod core;
pub mod enemies;
pub mod world;

use bevy::prelude::*;

/// Main plugin that adds all sub-plugins.
pub struct RespawnGamePlugin;

impl Plugin for RespawnGamePlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Enemy pooling and respawning
            .add_plugins(enemies::EnemyPlugin)

            // Levels and spawn points
            .add_plugins(world::WorldPlugin);
    }
}
