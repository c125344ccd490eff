//! Core module - states, events, settings and system ordering.
//!
//! This module provides the foundation that the enemy and world plugins build upon.

mod events;
mod plugin;
mod settings;
mod states;

pub use events::*;
pub use plugin::CorePlugin;
pub use settings::*;
pub use states::*;
