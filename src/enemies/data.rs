//! Enemy archetypes, one RON file per type under the enemies directory.
//!
//! The file stem is the type name used by level descriptors, so
//! `goblin.ron` defines the `"goblin"` type.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use super::components::Health;
use crate::core::RespawnSettings;
use crate::world::DataLoadError;

/// Capsule dimensions for an enemy's collider.
#[derive(Deserialize, Clone, Copy, Debug)]
pub struct ColliderConfig {
    pub half_height: f32,
    pub radius: f32,
}

impl Default for ColliderConfig {
    fn default() -> Self {
        Self {
            half_height: 0.5,
            radius: 0.3,
        }
    }
}

fn unit_scale() -> f32 {
    1.0
}

/// What every instance of an enemy type starts with.
#[derive(Deserialize, Clone, Debug)]
pub struct EnemyDefinition {
    /// Display name
    pub name: String,
    pub max_health: f32,
    #[serde(default = "unit_scale")]
    pub scale: f32,
    #[serde(default)]
    pub collider: Option<ColliderConfig>,
}

impl Default for EnemyDefinition {
    fn default() -> Self {
        Self {
            name: "Unknown".to_string(),
            max_health: 100.0,
            scale: 1.0,
            collider: None,
        }
    }
}

impl EnemyDefinition {
    /// Full health for a fresh instance.
    pub fn to_health(&self) -> Health {
        Health::new(self.max_health)
    }

    /// Transform for an instance standing at `position`.
    pub fn transform_at(&self, position: Vec3) -> Transform {
        Transform::from_translation(position).with_scale(Vec3::splat(self.scale))
    }

    /// Kinematic capsule body; enemies are moved by writing their transform.
    pub fn body(&self) -> (Collider, RigidBody) {
        let capsule = self.collider.unwrap_or_default();
        (
            Collider::capsule_y(capsule.half_height, capsule.radius),
            RigidBody::KinematicPositionBased,
        )
    }
}

/// Enemy definitions by type name.
#[derive(Resource, Default)]
pub struct EnemyRegistry {
    pub definitions: HashMap<String, EnemyDefinition>,
}

impl EnemyRegistry {
    pub fn get(&self, enemy_type: &str) -> Option<&EnemyDefinition> {
        self.definitions.get(enemy_type)
    }

    /// Definition for `enemy_type`, or the defaults if the type is unknown.
    pub fn get_or_default(&self, enemy_type: &str) -> EnemyDefinition {
        self.get(enemy_type).cloned().unwrap_or_else(|| {
            warn!("No definition for enemy type '{}', using defaults", enemy_type);
            EnemyDefinition::default()
        })
    }
}

/// Read one definition file, returning its type name and contents.
pub fn read_enemy_definition(path: &Path) -> Result<(String, EnemyDefinition), DataLoadError> {
    let display = path.display().to_string();
    let enemy_type = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| DataLoadError::FileNotFound(display.clone()))?
        .to_string();

    let contents = fs::read_to_string(path).map_err(|e| DataLoadError::ReadError {
        path: display.clone(),
        details: e.to_string(),
    })?;
    let definition = ron::from_str(&contents).map_err(|e| DataLoadError::ParseError {
        path: display,
        details: e.to_string(),
    })?;

    Ok((enemy_type, definition))
}

/// Fill the registry from every `.ron` file in the configured directory.
///
/// Types the host inserted before startup keep their definitions. A broken
/// file is logged and skipped.
pub fn load_enemy_definitions(mut registry: ResMut<EnemyRegistry>, settings: Res<RespawnSettings>) {
    let dir = Path::new(&settings.enemies_dir);
    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            warn!("Cannot read enemy definitions from {:?}: {}", dir, e);
            return;
        }
    };

    let files = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().is_some_and(|ext| ext == "ron"));

    for path in files {
        match read_enemy_definition(&path) {
            Ok((enemy_type, _)) if registry.definitions.contains_key(&enemy_type) => {
                debug!("Keeping preconfigured definition for {}", enemy_type);
            }
            Ok((enemy_type, definition)) => {
                info!("Loaded enemy definition: {} ({})", definition.name, enemy_type);
                registry.definitions.insert(enemy_type, definition);
            }
            Err(e) => error!("{}", e),
        }
    }

    info!("{} enemy type(s) available", registry.definitions.len());
}
