//! Death marking.
//!
//! Combat lives in the host game; this only turns its outcome (health at zero
//! or an explicit `DeathEvent`) into the `Dead` marker the scheduler scans for.

use bevy::prelude::*;

use super::components::{Activation, Dead, Enemy, Health};
use crate::core::DeathEvent;

/// Mark active enemies at zero health, and active enemies named by a `DeathEvent`, as dead.
pub fn mark_dead_enemies(
    mut commands: Commands,
    mut death_events: EventReader<DeathEvent>,
    enemy_query: Query<(Entity, &Health, &Activation), (With<Enemy>, Without<Dead>)>,
) {
    for (entity, health, activation) in enemy_query.iter() {
        if activation.is_active() && health.is_dead() {
            commands.entity(entity).insert(Dead);
        }
    }

    for event in death_events.read() {
        // Pooled instances can't die
        if let Ok((_, _, activation)) = enemy_query.get(event.entity) {
            if activation.is_active() {
                commands.entity(event.entity).insert(Dead);
            }
        }
    }
}
