//! Game state definitions that control the overall flow of a run.
//!
//! Respawn systems only run in `InGame`. `Loading` covers reading level and
//! enemy data, `Finished` is entered once the last configured level is
//! complete.

use bevy::prelude::*;

/// Main game states.
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    /// Initial state - loading level, enemy and settings data
    #[default]
    Loading,
    /// Active gameplay
    InGame,
    /// Every configured level has been completed
    Finished,
}

/// Ordering of the per-tick respawn pipeline inside `Update`.
///
/// Level setup runs first so a freshly initialized level is visible to the
/// rest of the chain in the same frame.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RespawnSet {
    /// Level initialization, teardown and activation.
    Session,
    /// Death marking, dead-enemy discovery and spawn point visibility.
    Detection,
    /// Cooldown and the respawn protocol.
    Scheduling,
    /// Exhaustion and level completion checks.
    Completion,
}
