//! Core plugin that sets up game states, events, settings and system ordering.

use bevy::prelude::*;

use super::events::*;
use super::settings::*;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Game states (Loading, InGame, Finished)
/// - Global events (DeathEvent, InitializeLevel, LevelComplete, etc.)
/// - Respawn settings and the spawn point RNG
/// - The `RespawnSet` ordering used by the enemy and world plugins
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        // Hosts and tests may insert their own settings before adding the plugin
        if !app.world().contains_resource::<RespawnSettings>() {
            app.insert_resource(RespawnSettings::load());
        }
        let seed = app.world().resource::<RespawnSettings>().rng_seed;

        app
            .insert_resource(RespawnRng::new(seed))

            // Initialize game states
            .init_state::<GameState>()

            // Register global events
            .add_event::<DeathEvent>()
            .add_event::<InitializeLevel>()
            .add_event::<EnemyRespawned>()
            .add_event::<RespawnFailed>()
            .add_event::<LevelComplete>()
            .add_event::<LevelInitFailed>()

            // One tick of the respawn pipeline, in order
            .configure_sets(
                Update,
                (
                    RespawnSet::Session,
                    RespawnSet::Detection,
                    RespawnSet::Scheduling,
                    RespawnSet::Completion,
                )
                    .chain()
                    .run_if(in_state(GameState::InGame)),
            )

            // Data is loaded during Startup, so the first Update can leave Loading
            .add_systems(
                Update,
                finish_loading.run_if(in_state(GameState::Loading)),
            );
    }
}

/// Leave Loading once startup data loading has run.
fn finish_loading(mut next_state: ResMut<NextState<GameState>>) {
    next_state.set(GameState::InGame);
}
