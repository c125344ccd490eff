//! Level session controller.
//!
//! Owns the lifecycle of one level at a time: tear down the previous level,
//! build pools and level entities from configuration, verify the world has a
//! player and respawn points, enable the scheduler, and watch for the
//! completion condition (budget spent, nobody alive).

use bevy::prelude::*;

use super::builder::{build_level_from_data, teardown_level, LevelEntity};
use super::components::{Player, RespawnPoint};
use super::data::LevelRegistry;
use super::error::RespawnError;
use super::spawn_points::SpawnPointCatalog;
use crate::core::{
    GameState, InitializeLevel, LevelComplete, LevelInitFailed, RespawnSettings,
};
use crate::enemies::data::EnemyRegistry;
use crate::enemies::{Activation, Dead, Enemy, EnemyPools, RespawnBudget, RespawnScheduler};

/// Where the current level is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LevelStatus {
    /// No level has been requested yet.
    #[default]
    NotStarted,
    /// Built this frame; waiting for its entities to exist before activation.
    Activating,
    Running,
    Complete,
    /// Initialization hit a fatal error; the scheduler stays disabled.
    Failed,
}

/// Parameters the scheduler is enabled with once the level activates.
#[derive(Debug, Clone, Copy)]
struct LevelPlan {
    budget: RespawnBudget,
    respawn_delay: f32,
    min_respawn_distance: f32,
}

#[derive(Resource, Debug, Default)]
pub struct LevelSession {
    level_index: Option<usize>,
    status: LevelStatus,
    plan: Option<LevelPlan>,
}

impl LevelSession {
    pub fn level_index(&self) -> Option<usize> {
        self.level_index
    }

    pub fn status(&self) -> LevelStatus {
        self.status
    }

    /// Index a request resolves to: the explicit one, else the level after the current.
    pub fn next_index(&self, requested: Option<usize>) -> usize {
        requested.unwrap_or_else(|| self.level_index.map_or(0, |index| index + 1))
    }
}

/// A level can start only with exactly one player and at least one respawn point.
pub fn verify_level_world(players: usize, respawn_points: usize) -> Result<(), RespawnError> {
    if players != 1 {
        return Err(RespawnError::MissingPlayer);
    }
    if respawn_points == 0 {
        return Err(RespawnError::MissingSpawnPoints);
    }
    Ok(())
}

/// Complete once every respawn has been spent and no enemy is active.
pub fn is_level_complete(budget: RespawnBudget, active_enemies: usize) -> bool {
    budget.is_spent() && active_enemies == 0
}

/// Request the first level when gameplay starts.
pub fn start_first_level(session: Res<LevelSession>, mut requests: EventWriter<InitializeLevel>) {
    if session.status == LevelStatus::NotStarted {
        requests.send(InitializeLevel::default());
    }
}

/// Handle `InitializeLevel`: discard the previous level and build the requested one.
#[allow(clippy::too_many_arguments)]
pub fn initialize_level(
    mut commands: Commands,
    mut requests: EventReader<InitializeLevel>,
    registry: Res<LevelRegistry>,
    enemy_registry: Res<EnemyRegistry>,
    settings: Res<RespawnSettings>,
    mut session: ResMut<LevelSession>,
    mut scheduler: ResMut<RespawnScheduler>,
    mut pools: ResMut<EnemyPools>,
    mut catalog: ResMut<SpawnPointCatalog>,
    level_entities: Query<Entity, With<LevelEntity>>,
    mut init_failed: EventWriter<LevelInitFailed>,
) {
    // Only the latest request in a frame matters
    let Some(request) = requests.read().last().copied() else {
        return;
    };

    let index = session.next_index(request.level_index);
    let Some(level) = registry.get(index) else {
        let error = RespawnError::LevelOutOfRange {
            index,
            available: registry.len(),
        };
        error!("Cannot initialize level: {}", error);
        init_failed.send(LevelInitFailed {
            level_index: index,
            error,
        });
        return;
    };

    // Abandon the previous level, including any respawn cooldown in flight
    scheduler.disable();
    *catalog = SpawnPointCatalog::default();
    teardown_level(&mut commands, level_entities.iter());

    info!("Building level {}: {}", index, level.name);

    let (level_pools, errors) = build_level_from_data(&mut commands, level, &enemy_registry);
    if !errors.is_empty() {
        warn!("Level '{}' has {} configuration error(s)", level.name, errors.len());
    }
    *pools = level_pools;

    session.level_index = Some(index);
    session.status = LevelStatus::Activating;
    session.plan = Some(LevelPlan {
        budget: RespawnBudget::from_specs(&level.enemies),
        respawn_delay: level.respawn_delay(&settings),
        min_respawn_distance: level.min_respawn_distance(&settings),
    });
}

/// Verify the freshly built level and enable the scheduler.
pub fn activate_level(
    mut commands: Commands,
    mut session: ResMut<LevelSession>,
    mut scheduler: ResMut<RespawnScheduler>,
    mut catalog: ResMut<SpawnPointCatalog>,
    player_query: Query<(), With<Player>>,
    point_query: Query<Entity, With<RespawnPoint>>,
    unowned_enemies: Query<Entity, (With<Enemy>, Without<LevelEntity>)>,
    mut init_failed: EventWriter<LevelInitFailed>,
) {
    if session.status != LevelStatus::Activating {
        return;
    }
    let (Some(index), Some(plan)) = (session.level_index, session.plan) else {
        return;
    };

    if let Err(error) = verify_level_world(player_query.iter().count(), point_query.iter().count()) {
        error!("Level {} failed to start: {}", index, error);
        session.status = LevelStatus::Failed;
        init_failed.send(LevelInitFailed {
            level_index: index,
            error,
        });
        return;
    }

    // Host-placed enemies belong to this level from now on
    for entity in unowned_enemies.iter() {
        commands.entity(entity).insert(LevelEntity);
    }

    *catalog = SpawnPointCatalog::new(point_query.iter().collect());
    scheduler.enable(plan.budget, plan.respawn_delay, plan.min_respawn_distance);
    session.status = LevelStatus::Running;

    info!(
        "Level {} running: {} respawn point(s), respawn budget {}",
        index,
        catalog.len(),
        plan.budget.max()
    );
}

/// Poll the completion condition and report it once.
pub fn check_level_completion(
    mut session: ResMut<LevelSession>,
    mut scheduler: ResMut<RespawnScheduler>,
    enemy_query: Query<&Activation, (With<Enemy>, Without<Dead>)>,
    mut completed: EventWriter<LevelComplete>,
) {
    if session.status != LevelStatus::Running {
        return;
    }
    let Some(index) = session.level_index else {
        return;
    };

    let active = enemy_query.iter().filter(|activation| activation.is_active()).count();

    if scheduler.update_exhaustion(active) {
        debug!("Respawn scheduler exhausted");
    }

    if is_level_complete(scheduler.budget(), active) {
        info!("Level {} complete", index);
        session.status = LevelStatus::Complete;
        completed.send(LevelComplete { level_index: index });
    }
}

/// Move on to the next level, or finish the game after the last one.
pub fn advance_on_completion(
    settings: Res<RespawnSettings>,
    registry: Res<LevelRegistry>,
    mut completed: EventReader<LevelComplete>,
    mut requests: EventWriter<InitializeLevel>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    for event in completed.read() {
        if !settings.auto_advance {
            continue;
        }

        let next = event.level_index + 1;
        if next < registry.len() {
            requests.send(InitializeLevel {
                level_index: Some(next),
            });
        } else {
            info!("All {} level(s) complete", registry.len());
            next_state.set(GameState::Finished);
        }
    }
}
