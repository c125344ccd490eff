//! Components tagging the player and the level's spawn locations.

use bevy::prelude::*;

/// Marker component for the player entity.
///
/// The host game owns the player; respawning only reads its transform.
#[derive(Component)]
pub struct Player;

/// Marker for a fixed location where pooled enemies may reappear.
#[derive(Component, Default)]
#[require(PlayerVisibility, Transform)]
pub struct RespawnPoint;

/// Whether the player can currently see this spawn point.
///
/// Written every tick by the built-in view cone probe, or by the host game
/// when visibility mode is `External`.
#[derive(Component, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerVisibility(pub bool);
