//! Spawn point catalog: the level's fixed respawn locations.

use bevy::prelude::*;
use rand::seq::SliceRandom;
use rand::Rng;

use super::components::{Player, PlayerVisibility, RespawnPoint};
use super::error::RespawnError;
use crate::enemies::Enemy;

/// Read access to spawn point positions and visibility.
pub type SpawnPointQuery<'w, 's> = Query<
    'w,
    's,
    (&'static Transform, &'static PlayerVisibility),
    (With<RespawnPoint>, Without<Enemy>, Without<Player>),
>;

/// A spawn point that passed filtering.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnCandidate {
    pub entity: Entity,
    pub position: Vec3,
}

/// The spawn points collected when the level was activated.
#[derive(Resource, Debug, Default)]
pub struct SpawnPointCatalog {
    points: Vec<Entity>,
}

impl SpawnPointCatalog {
    pub fn new(points: Vec<Entity>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Entity] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Points farther than `min_distance` from the player and not visible to them.
    ///
    /// Reads current positions and visibility, so call it per respawn.
    /// Points that have since been despawned are skipped.
    pub fn valid_points(
        &self,
        player_position: Vec3,
        min_distance: f32,
        point_query: &SpawnPointQuery,
    ) -> Vec<SpawnCandidate> {
        let points = self.points.iter().filter_map(|&entity| {
            point_query
                .get(entity)
                .ok()
                .map(|(transform, visibility)| (entity, transform.translation, visibility.0))
        });
        filter_valid_points(points, player_position, min_distance)
    }
}

/// Keep `(entity, position, visible)` entries that are hidden and strictly
/// farther than `min_distance` from `player_position`.
pub fn filter_valid_points(
    points: impl IntoIterator<Item = (Entity, Vec3, bool)>,
    player_position: Vec3,
    min_distance: f32,
) -> Vec<SpawnCandidate> {
    points
        .into_iter()
        .filter(|&(_, position, visible)| {
            !visible && position.distance(player_position) > min_distance
        })
        .map(|(entity, position, _)| SpawnCandidate { entity, position })
        .collect()
}

/// Uniformly pick one candidate.
pub fn pick_random<R: Rng + ?Sized>(
    candidates: &[SpawnCandidate],
    enemy_type: &str,
    rng: &mut R,
) -> Result<SpawnCandidate, RespawnError> {
    candidates
        .choose(rng)
        .copied()
        .ok_or_else(|| RespawnError::NoValidSpawnPoint {
            enemy_type: enemy_type.to_string(),
        })
}
