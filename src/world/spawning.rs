//! Spawning of the entities a level descriptor declares.

use bevy::prelude::*;

use super::builder::LevelEntity;
use super::components::RespawnPoint;
use super::data::EnemyPlacement;
use crate::enemies::data::EnemyRegistry;
use crate::enemies::{Enemy, EnemyType};

/// Spawn a respawn point marker.
pub fn spawn_respawn_point(commands: &mut Commands, position: Vec3) -> Entity {
    commands
        .spawn((
            Name::new("Respawn Point"),
            RespawnPoint,
            Transform::from_translation(position),
            LevelEntity,
        ))
        .id()
}

/// Spawn the enemies a level starts with. They are active right away.
pub fn spawn_initial_enemies(
    commands: &mut Commands,
    placements: &[EnemyPlacement],
    enemy_registry: &EnemyRegistry,
) {
    for placement in placements {
        let definition = enemy_registry.get_or_default(&placement.enemy_type);
        let position = Vec3::from(placement.position);

        commands.spawn((
            Name::new(definition.name.clone()),
            Enemy,
            EnemyType(placement.enemy_type.clone()),
            definition.to_health(),
            definition.transform_at(position),
            Visibility::Inherited,
            definition.body(),
            LevelEntity,
        ));

        debug!("Placed {} at {}", placement.enemy_type, position);
    }
}
