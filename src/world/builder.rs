//! Level construction from data definitions.

use bevy::prelude::*;

use super::data::LevelDefinition;
use super::error::RespawnError;
use super::spawning::{spawn_initial_enemies, spawn_respawn_point};
use crate::enemies::data::EnemyRegistry;
use crate::enemies::pool::{spawn_pools, EnemyPools};

/// Marker for every entity owned by the current level.
///
/// Everything carrying it is despawned when the next level is initialized.
#[derive(Component)]
pub struct LevelEntity;

/// Build a level's entities from its definition: enemy pools, the respawn
/// points it declares, and the enemies it starts with.
///
/// Returns the filled pools together with any configuration errors.
pub fn build_level_from_data(
    commands: &mut Commands,
    level: &LevelDefinition,
    enemy_registry: &EnemyRegistry,
) -> (EnemyPools, Vec<RespawnError>) {
    let (pools, errors) = spawn_pools(commands, &level.enemies, enemy_registry);

    for &(x, y, z) in &level.spawn_points {
        spawn_respawn_point(commands, Vec3::new(x, y, z));
    }

    spawn_initial_enemies(commands, &level.initial_enemies, enemy_registry);

    (pools, errors)
}

/// Despawn everything belonging to the previous level.
pub fn teardown_level(commands: &mut Commands, level_entities: impl IntoIterator<Item = Entity>) {
    for entity in level_entities {
        commands.entity(entity).despawn_recursive();
    }
}
