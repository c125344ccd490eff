//! Enemies module - enemy instances, pooling, death detection and respawning.

mod components;
pub mod data;
mod death;
pub mod placement;
pub mod pool;
pub mod scheduler;
mod plugin;


pub use components::*;
pub use data::{EnemyDefinition, EnemyRegistry};
pub use plugin::EnemyPlugin;
pub use pool::EnemyPools;
pub use scheduler::{RespawnBudget, RespawnScheduler, SchedulerState};
