//! Pool store: pre-spawned, inactive enemy instances per type.
//!
//! Pools are filled once when a level is initialized and only ever shrink
//! afterwards. Entities act as arena indices; each pool is a FIFO queue over
//! them, so draw order is the order instances were created in.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;
use std::collections::{HashMap, VecDeque};

use super::components::{Activation, Enemy, EnemyType, Pooled};
use super::data::EnemyRegistry;
use crate::world::{EnemyTypeSpec, LevelEntity, RespawnError};

/// Per-type queues of inactive instances ready for reuse.
#[derive(Resource, Debug, Default)]
pub struct EnemyPools {
    pools: HashMap<String, VecDeque<Entity>>,
}

impl EnemyPools {
    /// Append an instance to the pool for `enemy_type`.
    ///
    /// An instance already present in any pool is ignored.
    pub fn insert(&mut self, enemy_type: &str, instance: Entity) {
        if self.contains(instance) {
            warn!("Instance {:?} is already pooled, ignoring", instance);
            return;
        }
        self.pools
            .entry(enemy_type.to_string())
            .or_default()
            .push_back(instance);
    }

    /// Make sure a (possibly empty) pool exists for `enemy_type`.
    pub fn register_type(&mut self, enemy_type: &str) {
        self.pools.entry(enemy_type.to_string()).or_default();
    }

    /// Remove and return the oldest available instance for this type.
    pub fn take_one(&mut self, enemy_type: &str) -> Option<Entity> {
        self.pools.get_mut(enemy_type)?.pop_front()
    }

    pub fn remaining(&self, enemy_type: &str) -> usize {
        self.pools.get(enemy_type).map_or(0, VecDeque::len)
    }

    pub fn total_remaining(&self) -> usize {
        self.pools.values().map(VecDeque::len).sum()
    }

    pub fn contains(&self, instance: Entity) -> bool {
        self.pools.values().any(|pool| pool.contains(&instance))
    }
}

/// Number of instances to pre-spawn for a type.
///
/// Non-positive counts are a configuration error and pool nothing.
pub fn pool_size(spec: &EnemyTypeSpec) -> Result<usize, RespawnError> {
    if spec.enemy_num_respawns <= 0 {
        return Err(RespawnError::Configuration {
            enemy_type: spec.enemy_type.clone(),
            count: spec.enemy_num_respawns,
        });
    }
    Ok(spec.enemy_num_respawns as usize)
}

/// Pre-spawn every pooled instance for a level.
///
/// Instances start inactive, hidden and with their rigid body disabled.
/// Configuration errors are logged and returned; they never abort the build.
pub fn spawn_pools(
    commands: &mut Commands,
    types: &[EnemyTypeSpec],
    enemy_registry: &EnemyRegistry,
) -> (EnemyPools, Vec<RespawnError>) {
    let mut pools = EnemyPools::default();
    let mut errors = Vec::new();

    for spec in types {
        pools.register_type(&spec.enemy_type);

        let count = match pool_size(spec) {
            Ok(count) => count,
            Err(e) => {
                warn!("{}", e);
                errors.push(e);
                continue;
            }
        };

        let definition = enemy_registry.get_or_default(&spec.enemy_type);

        let first = pools.remaining(&spec.enemy_type);
        for n in first..first + count {
            let instance = commands
                .spawn((
                    Name::new(format!("{} (pooled #{})", spec.enemy_type, n)),
                    Enemy,
                    Pooled,
                    EnemyType(spec.enemy_type.clone()),
                    Activation::Inactive,
                    definition.to_health(),
                    definition.transform_at(Vec3::ZERO),
                    Visibility::Hidden,
                    definition.body(),
                    RigidBodyDisabled,
                    LevelEntity,
                ))
                .id();
            pools.insert(&spec.enemy_type, instance);
        }

        info!("Pooled {} x {}", count, spec.enemy_type);
    }

    (pools, errors)
}
