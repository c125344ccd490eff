//! Enemy-related components.

use bevy::prelude::*;

/// Marker component for all enemies.
///
/// Host-placed enemies get an active `Activation` and default `Health`
/// automatically; they still need an `EnemyType` to be replaceable.
#[derive(Component)]
#[require(Activation, Health)]
pub struct Enemy;

/// Enemy type identifier (matches level configuration and RON file name).
#[derive(Component, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EnemyType(pub String);

/// Whether an enemy instance currently takes part in the level.
#[derive(Component, Default, PartialEq, Eq, Clone, Copy, Debug)]
pub enum Activation {
    /// In the world and counted as alive.
    #[default]
    Active,
    /// Pooled, or dead and switched off.
    Inactive,
}

impl Activation {
    pub fn is_active(&self) -> bool {
        *self == Activation::Active
    }
}

/// Death marker. Inserted once an enemy dies and never removed from that instance.
#[derive(Component, Debug)]
pub struct Dead;

/// Marks instances created by the pool store (as opposed to host-placed enemies).
#[derive(Component, Debug)]
pub struct Pooled;

/// Component for enemies that can take damage.
#[derive(Component, Debug, Clone)]
pub struct Health {
    pub current: f32,
    pub maximum: f32,
}

impl Default for Health {
    fn default() -> Self {
        Self::new(100.0)
    }
}

impl Health {
    pub fn new(max: f32) -> Self {
        Self {
            current: max,
            maximum: max,
        }
    }

    pub fn take_damage(&mut self, amount: f32) -> f32 {
        let actual = amount.min(self.current);
        self.current -= actual;
        actual
    }

    /// Restore to full health (used when a pooled instance is respawned).
    pub fn restore(&mut self) {
        self.current = self.maximum;
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0.0
    }
}
