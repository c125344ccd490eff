//! Enemy plugin - registers pooling, death detection and respawn systems.

use bevy::prelude::*;

use super::data::{load_enemy_definitions, EnemyRegistry};
use super::death::mark_dead_enemies;
use super::pool::EnemyPools;
use super::scheduler::{discover_dead_enemies, run_respawn_protocol, RespawnScheduler};
use crate::core::RespawnSet;

/// Enemy plugin - handles enemy definitions, death marking and respawning.
pub struct EnemyPlugin;

impl Plugin for EnemyPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<EnemyRegistry>()
            .init_resource::<EnemyPools>()
            .init_resource::<RespawnScheduler>()
            .add_systems(Startup, load_enemy_definitions)
            // Deaths must be marked before the scan so they are seen this tick
            .add_systems(
                Update,
                (mark_dead_enemies, discover_dead_enemies)
                    .chain()
                    .in_set(RespawnSet::Detection),
            )
            .add_systems(Update, run_respawn_protocol.in_set(RespawnSet::Scheduling));
    }
}
