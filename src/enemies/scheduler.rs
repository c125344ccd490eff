//! Respawn scheduler - turns enemy deaths into pooled replacements.
//!
//! One scheduler exists per level. Each tick it records newly-dead enemies,
//! and while idle it draws a replacement from the pool store, picks a spawn
//! point the player can't see and that isn't too close, and places the
//! instance there. A global cooldown after each respawn serializes them:
//! deaths that arrive while a respawn is in flight wait in the pending queue.
//!
//! ```text
//!   Disabled ──enable──▶ Idle ──replacement taken──▶ RespawnInFlight
//!                         ▲  ◀──abandoned (no point)──┘   │
//!                         └────────cooldown finished──────┘
//!   Idle / RespawnInFlight ──budget spent & nobody alive──▶ Exhausted
//! ```

use bevy::prelude::*;
use std::collections::{HashSet, VecDeque};
use std::time::Duration;

use super::components::{Dead, Enemy, EnemyType};
use super::placement::{self, PlacementQuery};
use super::pool::EnemyPools;
use crate::core::{EnemyRespawned, RespawnFailed, RespawnRng};
use crate::world::{
    pick_random, EnemyTypeSpec, Player, RespawnError, RespawnPoint, SpawnPointCatalog,
    SpawnPointQuery,
};

/// Respawns spent versus allowed in the current level.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RespawnBudget {
    spent: u32,
    max: u32,
}

impl RespawnBudget {
    pub fn new(max: u32) -> Self {
        Self { spent: 0, max }
    }

    /// Budget for a level: the sum of every type's respawn count.
    ///
    /// Non-positive counts contribute nothing, matching their empty pools.
    pub fn from_specs(types: &[EnemyTypeSpec]) -> Self {
        let max = types
            .iter()
            .map(|spec| spec.enemy_num_respawns.max(0) as u32)
            .sum();
        Self::new(max)
    }

    pub fn spent(&self) -> u32 {
        self.spent
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn remaining(&self) -> u32 {
        self.max - self.spent
    }

    pub fn is_spent(&self) -> bool {
        self.spent == self.max
    }

    /// Count one respawn. Never goes past `max`.
    fn spend(&mut self) -> bool {
        if self.spent < self.max {
            self.spent += 1;
            true
        } else {
            false
        }
    }
}

/// Scheduler state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SchedulerState {
    /// No level is running.
    #[default]
    Disabled,
    /// Ready to start the next respawn.
    Idle,
    /// A replacement was taken; placement and cooldown are in progress.
    RespawnInFlight,
    /// Budget spent and no enemy alive. Nothing more happens this level.
    Exhausted,
}

/// A death waiting for a replacement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeath {
    pub instance: Entity,
    pub enemy_type: String,
}

/// A pooled instance drawn to replace a dead one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    pub instance: Entity,
    pub replaces: Entity,
    pub enemy_type: String,
}

#[derive(Resource, Debug)]
pub struct RespawnScheduler {
    state: SchedulerState,
    budget: RespawnBudget,
    /// Every dead instance ever recorded this level.
    dead_set: HashSet<Entity>,
    /// Recorded deaths not yet handled, in discovery order.
    pending: VecDeque<PendingDeath>,
    cooldown: Timer,
    min_respawn_distance: f32,
}

impl Default for RespawnScheduler {
    fn default() -> Self {
        Self {
            state: SchedulerState::Disabled,
            budget: RespawnBudget::default(),
            dead_set: HashSet::new(),
            pending: VecDeque::new(),
            cooldown: Timer::from_seconds(0.0, TimerMode::Once),
            min_respawn_distance: 0.0,
        }
    }
}

impl RespawnScheduler {
    /// Fresh scheduler for a new level, starting in `Idle`.
    ///
    /// Any previous state, including an in-flight cooldown, is discarded.
    pub fn enable(&mut self, budget: RespawnBudget, respawn_delay: f32, min_respawn_distance: f32) {
        *self = Self {
            state: SchedulerState::Idle,
            budget,
            cooldown: Timer::from_seconds(respawn_delay.max(0.0), TimerMode::Once),
            min_respawn_distance,
            ..Default::default()
        };
    }

    /// Drop everything and stop scheduling.
    pub fn disable(&mut self) {
        *self = Self::default();
    }

    pub fn state(&self) -> SchedulerState {
        self.state
    }

    pub fn budget(&self) -> RespawnBudget {
        self.budget
    }

    pub fn min_respawn_distance(&self) -> f32 {
        self.min_respawn_distance
    }

    pub fn respawn_delay(&self) -> Duration {
        self.cooldown.duration()
    }

    pub fn pending_deaths(&self) -> usize {
        self.pending.len()
    }

    pub fn is_processed(&self, instance: Entity) -> bool {
        self.dead_set.contains(&instance)
    }

    /// Whether deaths are tracked and respawns can happen.
    pub fn is_running(&self) -> bool {
        matches!(self.state, SchedulerState::Idle | SchedulerState::RespawnInFlight)
    }

    /// Record a dead instance. Returns `true` only the first time it is seen.
    pub fn record_death(&mut self, instance: Entity, enemy_type: &str) -> bool {
        if !self.is_running() || !self.dead_set.insert(instance) {
            return false;
        }
        self.pending.push_back(PendingDeath {
            instance,
            enemy_type: enemy_type.to_string(),
        });
        true
    }

    /// Advance the cooldown; returns to `Idle` once it has elapsed.
    pub fn tick_cooldown(&mut self, delta: Duration) {
        if self.state != SchedulerState::RespawnInFlight {
            return;
        }
        self.cooldown.tick(delta);
        if self.cooldown.finished() {
            self.state = SchedulerState::Idle;
        }
    }

    /// Draw a replacement for the oldest pending death that still has supply.
    ///
    /// Deaths whose type pool is empty are dropped without blocking the
    /// others. On success the scheduler is `RespawnInFlight`.
    pub fn take_replacement(&mut self, pools: &mut EnemyPools) -> Option<Replacement> {
        if self.state != SchedulerState::Idle || self.budget.is_spent() {
            return None;
        }

        while let Some(death) = self.pending.pop_front() {
            match pools.take_one(&death.enemy_type) {
                Some(instance) => {
                    self.state = SchedulerState::RespawnInFlight;
                    return Some(Replacement {
                        instance,
                        replaces: death.instance,
                        enemy_type: death.enemy_type,
                    });
                }
                None => {
                    let skipped = RespawnError::PoolExhausted {
                        enemy_type: death.enemy_type,
                    };
                    debug!("Death of {:?} not replaced: {}", death.instance, skipped);
                }
            }
        }
        None
    }

    /// Placement succeeded: spend one respawn and start the cooldown.
    pub fn complete_respawn(&mut self) -> u32 {
        if self.state == SchedulerState::RespawnInFlight {
            self.budget.spend();
            self.cooldown.reset();
        }
        self.budget.spent()
    }

    /// Placement failed: nothing is spent and the taken instance is lost.
    pub fn abandon_respawn(&mut self) {
        if self.state == SchedulerState::RespawnInFlight {
            self.state = SchedulerState::Idle;
        }
    }

    /// Enter `Exhausted` once the budget is spent and nobody is alive.
    ///
    /// Returns `true` on the transition.
    pub fn update_exhaustion(&mut self, active_enemies: usize) -> bool {
        if self.is_running() && self.budget.is_spent() && active_enemies == 0 {
            self.state = SchedulerState::Exhausted;
            self.pending.clear();
            return true;
        }
        false
    }
}

/// Record enemies that died since the last tick and switch them off.
pub fn discover_dead_enemies(
    mut commands: Commands,
    mut scheduler: ResMut<RespawnScheduler>,
    dead_query: Query<(Entity, &EnemyType), (With<Enemy>, With<Dead>)>,
) {
    if !scheduler.is_running() {
        return;
    }

    for (entity, enemy_type) in dead_query.iter() {
        if scheduler.record_death(entity, &enemy_type.0) {
            debug!("{} {:?} died", enemy_type.0, entity);
            placement::deactivate(&mut commands, entity);
        }
    }
}

/// Tick the cooldown and run at most one respawn protocol.
#[allow(clippy::too_many_arguments)]
pub fn run_respawn_protocol(
    mut commands: Commands,
    time: Res<Time>,
    mut scheduler: ResMut<RespawnScheduler>,
    mut pools: ResMut<EnemyPools>,
    catalog: Res<SpawnPointCatalog>,
    mut rng: ResMut<RespawnRng>,
    player_query: Query<&Transform, (With<Player>, Without<Enemy>, Without<RespawnPoint>)>,
    point_query: SpawnPointQuery,
    mut placement_query: PlacementQuery,
    mut respawned: EventWriter<EnemyRespawned>,
    mut failed: EventWriter<RespawnFailed>,
) {
    if !scheduler.is_running() {
        return;
    }

    scheduler.tick_cooldown(time.delta());

    let Some(replacement) = scheduler.take_replacement(&mut pools) else {
        return;
    };

    let Ok(player_transform) = player_query.get_single() else {
        warn!("Abandoning {} respawn: no player", replacement.enemy_type);
        scheduler.abandon_respawn();
        failed.send(RespawnFailed {
            instance: replacement.instance,
            error: RespawnError::MissingPlayer,
        });
        return;
    };

    let candidates = catalog.valid_points(
        player_transform.translation,
        scheduler.min_respawn_distance(),
        &point_query,
    );

    let point = match pick_random(&candidates, &replacement.enemy_type, &mut rng.0) {
        Ok(point) => point,
        Err(e) => {
            warn!("Abandoning respawn of {:?}: {}", replacement.instance, e);
            scheduler.abandon_respawn();
            failed.send(RespawnFailed {
                instance: replacement.instance,
                error: e,
            });
            return;
        }
    };

    if !placement::reposition(
        &mut commands,
        &mut placement_query,
        replacement.instance,
        point.position,
    ) {
        warn!("Pooled instance {:?} no longer exists", replacement.instance);
        scheduler.abandon_respawn();
        return;
    }

    let spent = scheduler.complete_respawn();
    let max = scheduler.budget().max();
    info!(
        "Respawned {} at {:?} ({}/{})",
        replacement.enemy_type, point.position, spent, max
    );
    respawned.send(EnemyRespawned {
        instance: replacement.instance,
        replaces: replacement.replaces,
        enemy_type: replacement.enemy_type,
        position: point.position,
        spent,
        max,
    });
}
