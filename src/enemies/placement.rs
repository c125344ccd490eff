//! Placement of pooled instances in the world.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::{Activation, Enemy, Health};
use crate::world::{Player, RespawnPoint};

/// Mutable access to everything placement touches on an enemy instance.
pub type PlacementQuery<'w, 's> = Query<
    'w,
    's,
    (
        &'static mut Transform,
        &'static mut Health,
        &'static mut Activation,
        &'static mut Visibility,
    ),
    (With<Enemy>, Without<Player>, Without<RespawnPoint>),
>;

/// Move an instance to `position` and bring it back to life.
///
/// Pooled and dead instances keep `RigidBodyDisabled`, so the body is
/// already off while the transform is written; it is re-enabled last.
/// Returns `false` if the instance no longer exists.
pub fn reposition(
    commands: &mut Commands,
    placement: &mut PlacementQuery,
    instance: Entity,
    position: Vec3,
) -> bool {
    let Ok((mut transform, mut health, mut activation, mut visibility)) =
        placement.get_mut(instance)
    else {
        return false;
    };

    transform.translation = position;
    health.restore();
    *activation = Activation::Active;
    *visibility = Visibility::Inherited;

    commands.entity(instance).remove::<RigidBodyDisabled>();
    true
}

/// Switch an instance off: inactive, hidden, and out of the physics step.
pub fn deactivate(commands: &mut Commands, instance: Entity) {
    commands
        .entity(instance)
        .insert((Activation::Inactive, Visibility::Hidden, RigidBodyDisabled));
}
