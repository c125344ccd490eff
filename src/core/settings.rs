//! Respawn settings loaded from an external RON file.
//!
//! Allows tweaking respawn pacing and visibility rules without recompilation.
//! Individual levels can still override the delay and minimum distance.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use std::fs;

/// Default location of the settings file.
pub const SETTINGS_PATH: &str = "assets/data/respawn.ron";

/// How spawn point visibility is decided.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub enum VisibilityMode {
    /// Computed every tick from the player's view cone (and optionally a ray cast).
    #[default]
    ViewCone,
    /// The host game writes `PlayerVisibility` itself.
    External,
}

/// Respawn configuration loaded from assets/data/respawn.ron.
#[derive(Resource, Clone, Debug, Deserialize)]
#[serde(default)]
pub struct RespawnSettings {
    /// Cooldown between respawns, in seconds, when a level doesn't set one
    pub respawn_delay: f32,
    /// Spawn points closer than this to the player are never used
    pub min_respawn_distance: f32,
    pub visibility_mode: VisibilityMode,
    /// Full horizontal+vertical view cone angle, in degrees
    pub view_fov_degrees: f32,
    /// Points farther than this are never considered visible
    pub view_distance: f32,
    /// Ray cast against physics colliders so occluded points count as hidden
    pub line_of_sight: bool,
    /// Height of the player's eyes above their transform origin
    pub eye_height: f32,
    /// Fixed seed for spawn point selection (random when absent)
    pub rng_seed: Option<u64>,
    /// Start the next level automatically when one completes
    pub auto_advance: bool,
    pub levels_path: String,
    pub enemies_dir: String,
}

impl Default for RespawnSettings {
    fn default() -> Self {
        Self {
            respawn_delay: 2.0,
            min_respawn_distance: 10.0,
            visibility_mode: VisibilityMode::ViewCone,
            view_fov_degrees: 90.0,
            view_distance: 60.0,
            line_of_sight: true,
            eye_height: 0.8,
            rng_seed: None,
            auto_advance: true,
            levels_path: "assets/data/levels.ron".to_string(),
            enemies_dir: "assets/data/enemies".to_string(),
        }
    }
}

impl RespawnSettings {
    /// Load settings from the default RON file.
    pub fn load() -> Self {
        Self::load_from(SETTINGS_PATH)
    }

    /// Load settings from a RON file, falling back to defaults.
    pub fn load_from(path: &str) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match ron::from_str(&contents) {
                Ok(settings) => {
                    info!("Loaded respawn settings from {}", path);
                    settings
                }
                Err(e) => {
                    error!("Failed to parse {}: {}. Using defaults.", path, e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Could not read {}: {}. Using defaults.", path, e);
                Self::default()
            }
        }
    }
}

/// Random source for spawn point selection.
#[derive(Resource)]
pub struct RespawnRng(pub StdRng);

impl RespawnRng {
    pub fn new(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self(StdRng::seed_from_u64(seed)),
            None => Self(StdRng::from_entropy()),
        }
    }
}
