//! Level data structures and RON loading.
//!
//! The level configuration is a single ordered list, so "next level" is
//! simply the next index.

use bevy::prelude::*;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use super::error::DataLoadError;
use crate::core::RespawnSettings;

/// An enemy archetype taking part in a level, with its respawn allowance.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EnemyTypeSpec {
    pub enemy_type: String,
    /// Pooled instances (and respawns) for this type. Non-positive means none.
    pub enemy_num_respawns: i32,
}

impl EnemyTypeSpec {
    pub fn new(enemy_type: impl Into<String>, enemy_num_respawns: i32) -> Self {
        Self {
            enemy_type: enemy_type.into(),
            enemy_num_respawns,
        }
    }
}

/// An enemy placed in the level from the start.
#[derive(Debug, Clone, Deserialize)]
pub struct EnemyPlacement {
    pub enemy_type: String,
    pub position: (f32, f32, f32),
}

/// Level definition as read from RON.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelDefinition {
    pub name: String,
    #[serde(default)]
    pub enemies: Vec<EnemyTypeSpec>,
    /// Overrides `RespawnSettings::respawn_delay`
    #[serde(default)]
    pub respawn_delay: Option<f32>,
    /// Overrides `RespawnSettings::min_respawn_distance`
    #[serde(default)]
    pub min_respawn_distance: Option<f32>,
    /// Respawn points spawned with the level (hosts may add their own)
    #[serde(default)]
    pub spawn_points: Vec<(f32, f32, f32)>,
    #[serde(default)]
    pub initial_enemies: Vec<EnemyPlacement>,
}

impl LevelDefinition {
    pub fn new(name: impl Into<String>, enemies: Vec<EnemyTypeSpec>) -> Self {
        Self {
            name: name.into(),
            enemies,
            respawn_delay: None,
            min_respawn_distance: None,
            spawn_points: Vec::new(),
            initial_enemies: Vec::new(),
        }
    }

    pub fn respawn_delay(&self, settings: &RespawnSettings) -> f32 {
        self.respawn_delay.unwrap_or(settings.respawn_delay)
    }

    pub fn min_respawn_distance(&self, settings: &RespawnSettings) -> f32 {
        self.min_respawn_distance
            .unwrap_or(settings.min_respawn_distance)
    }
}

/// Top-level structure of the levels file.
#[derive(Debug, Clone, Deserialize)]
pub struct LevelConfigFile {
    pub levels: Vec<LevelDefinition>,
}

/// Resource storing the ordered level configuration.
#[derive(Resource, Default)]
pub struct LevelRegistry {
    pub levels: Vec<LevelDefinition>,
}

impl LevelRegistry {
    pub fn new(levels: Vec<LevelDefinition>) -> Self {
        Self { levels }
    }

    /// Get a level by index.
    pub fn get(&self, index: usize) -> Option<&LevelDefinition> {
        self.levels.get(index)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }
}

/// Parse a levels file.
pub fn parse_levels(contents: &str, path: &str) -> Result<Vec<LevelDefinition>, DataLoadError> {
    ron::from_str::<LevelConfigFile>(contents)
        .map(|file| file.levels)
        .map_err(|e| DataLoadError::ParseError {
            path: path.to_string(),
            details: e.to_string(),
        })
}

/// Read and parse a levels file from disk.
pub fn read_levels(path: &Path) -> Result<Vec<LevelDefinition>, DataLoadError> {
    let display = path.display().to_string();
    if !path.exists() {
        return Err(DataLoadError::FileNotFound(display));
    }
    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: display.clone(),
        details: e.to_string(),
    })?;
    parse_levels(&contents, &display)
}

/// Load the level configuration from the path in `RespawnSettings`.
///
/// A registry the host already filled is left untouched.
pub fn load_level_definitions(mut registry: ResMut<LevelRegistry>, settings: Res<RespawnSettings>) {
    if !registry.is_empty() {
        info!("Using {} preconfigured level(s)", registry.len());
        return;
    }

    match read_levels(Path::new(&settings.levels_path)) {
        Ok(levels) => {
            for level in &levels {
                info!("Loaded level: {}", level.name);
            }
            registry.levels = levels;
        }
        Err(DataLoadError::FileNotFound(path)) => {
            warn!("Levels file not found: {}", path);
        }
        Err(e) => {
            error!("{}", e);
        }
    }

    info!("Loaded {} level(s)", registry.len());
}
