//! World plugin - level data, level lifecycle and spawn point visibility.

use bevy::prelude::*;

use crate::core::{GameState, RespawnSet};

use super::data::{load_level_definitions, LevelRegistry};
use super::session::{
    activate_level, advance_on_completion, check_level_completion, initialize_level,
    start_first_level, LevelSession,
};
use super::spawn_points::SpawnPointCatalog;
use super::visibility::update_spawn_point_visibility;

/// World plugin - handles level loading, session lifecycle and spawn points.
pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LevelRegistry>()
            .init_resource::<LevelSession>()
            .init_resource::<SpawnPointCatalog>()
            .add_systems(Startup, load_level_definitions)
            .add_systems(OnEnter(GameState::InGame), start_first_level)
            // Activation must see the entities spawned by initialization
            .add_systems(
                Update,
                (initialize_level, activate_level)
                    .chain()
                    .in_set(RespawnSet::Session),
            )
            .add_systems(
                Update,
                update_spawn_point_visibility.in_set(RespawnSet::Detection),
            )
            .add_systems(
                Update,
                (check_level_completion, advance_on_completion)
                    .chain()
                    .in_set(RespawnSet::Completion),
            );
    }
}
