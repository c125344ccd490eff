//! World module - levels, spawn points and the level session.

mod builder;
mod components;
mod data;
mod error;
mod plugin;
mod session;
mod spawn_points;
mod spawning;
mod visibility;

#[cfg(test)]
mod tests;

pub use builder::LevelEntity;
pub use components::{Player, PlayerVisibility, RespawnPoint};
pub use data::{
    parse_levels, read_levels, EnemyPlacement, EnemyTypeSpec, LevelDefinition, LevelRegistry,
};
pub use error::{DataLoadError, RespawnError};
pub use plugin::WorldPlugin;
pub use session::{is_level_complete, verify_level_world, LevelSession, LevelStatus};
pub use spawn_points::{
    filter_valid_points, pick_random, SpawnCandidate, SpawnPointCatalog, SpawnPointQuery,
};
pub use visibility::in_view_cone;
