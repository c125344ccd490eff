//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` + `StatesPlugin` provide the ECS runtime and states.
//! - time advances by a fixed 100 ms per update so cooldowns are predictable.
//! - settings and levels are inserted up front, so nothing is read from disk
//!   except enemy definitions.

#![allow(dead_code)]

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use std::time::Duration;

use enemy_respawn::core::{DeathEvent, RespawnSettings, VisibilityMode};
use enemy_respawn::enemies::{Activation, Dead, Enemy, EnemyType, Pooled, RespawnScheduler};
use enemy_respawn::world::{
    EnemyPlacement, EnemyTypeSpec, LevelDefinition, LevelRegistry, LevelSession, LevelStatus,
    Player, PlayerVisibility, RespawnPoint,
};
use enemy_respawn::RespawnGamePlugin;

pub const TICK: Duration = Duration::from_millis(100);

/// Settings for tests: host-controlled visibility, fixed seed, short cooldown.
pub fn test_settings() -> RespawnSettings {
    RespawnSettings {
        respawn_delay: 0.5,
        min_respawn_distance: 5.0,
        visibility_mode: VisibilityMode::External,
        rng_seed: Some(7),
        auto_advance: false,
        ..Default::default()
    }
}

/// A level with `respawns` goblins in reserve, `initial` goblins placed near
/// the origin, and three respawn points far from it.
pub fn goblin_level(respawns: i32, initial: usize) -> LevelDefinition {
    let mut level = LevelDefinition::new("goblin den", vec![EnemyTypeSpec::new("goblin", respawns)]);
    level.spawn_points = vec![(20.0, 0.0, 0.0), (0.0, 0.0, 20.0), (-20.0, 0.0, 0.0)];
    level.initial_enemies = (0..initial)
        .map(|i| EnemyPlacement {
            enemy_type: "goblin".to_string(),
            position: (i as f32, 0.0, -3.0),
        })
        .collect();
    level
}

pub fn app_headless(settings: RespawnSettings, levels: Vec<LevelDefinition>) -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, StatesPlugin));
    app.insert_resource(TimeUpdateStrategy::ManualDuration(TICK));
    app.insert_resource(settings);
    app.insert_resource(LevelRegistry::new(levels));
    app.add_plugins(RespawnGamePlugin);
    app
}

pub fn spawn_player(app: &mut App, position: Vec3) -> Entity {
    app.world_mut()
        .spawn((Player, Transform::from_translation(position)))
        .id()
}

/// Boot into the first level.
pub fn start(app: &mut App) {
    // Startup + leave Loading, then enter InGame and build level 0
    app.update();
    app.update();
}

pub fn ticks(app: &mut App, count: usize) {
    for _ in 0..count {
        app.update();
    }
}

pub fn status(app: &App) -> LevelStatus {
    app.world().resource::<LevelSession>().status()
}

pub fn scheduler(app: &App) -> &RespawnScheduler {
    app.world().resource::<RespawnScheduler>()
}

pub fn spent(app: &App) -> u32 {
    scheduler(app).budget().spent()
}

pub fn kill(app: &mut App, entity: Entity) {
    app.world_mut().send_event(DeathEvent {
        entity,
        killed_by: None,
    });
}

/// Enemies placed by the level (not pooled), in spawn order.
pub fn placed_enemies(app: &mut App) -> Vec<Entity> {
    let mut enemies: Vec<Entity> = app
        .world_mut()
        .query_filtered::<Entity, (With<Enemy>, Without<Pooled>)>()
        .iter(app.world())
        .collect();
    enemies.sort();
    enemies
}

/// Pooled instance by name, e.g. `"goblin (pooled #0)"`.
pub fn pooled(app: &mut App, name: &str) -> Option<Entity> {
    app.world_mut()
        .query_filtered::<(Entity, &Name), With<Pooled>>()
        .iter(app.world())
        .find(|(_, n)| n.as_str() == name)
        .map(|(e, _)| e)
}

pub fn pooled_count(app: &mut App) -> usize {
    app.world_mut()
        .query_filtered::<(), With<Pooled>>()
        .iter(app.world())
        .count()
}

pub fn is_active(app: &App, entity: Entity) -> bool {
    app.world()
        .get::<Activation>(entity)
        .is_some_and(|a| a.is_active())
        && app.world().get::<Dead>(entity).is_none()
}

pub fn position(app: &App, entity: Entity) -> Vec3 {
    app.world()
        .get::<Transform>(entity)
        .map(|t| t.translation)
        .unwrap_or(Vec3::NAN)
}

pub fn enemy_type(app: &App, entity: Entity) -> Option<String> {
    app.world().get::<EnemyType>(entity).map(|t| t.0.clone())
}

pub fn set_all_points_visible(app: &mut App, visible: bool) {
    let mut query = app
        .world_mut()
        .query_filtered::<&mut PlayerVisibility, With<RespawnPoint>>();
    for mut visibility in query.iter_mut(app.world_mut()) {
        visibility.0 = visible;
    }
}

/// Tick until the scheduler is ready for the next respawn.
pub fn wait_for_cooldown(app: &mut App) {
    use enemy_respawn::enemies::SchedulerState;
    for _ in 0..50 {
        if scheduler(app).state() != SchedulerState::RespawnInFlight {
            return;
        }
        app.update();
    }
    panic!("cooldown never finished");
}
