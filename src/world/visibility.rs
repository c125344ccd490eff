//! Built-in spawn point visibility probe.
//!
//! A point is visible when it lies inside the player's view cone, within view
//! distance, and (with line of sight enabled) no fixed collider sits between
//! the player's eyes and the point.

use bevy::prelude::*;
use bevy_rapier3d::prelude::*;

use super::components::{Player, PlayerVisibility, RespawnPoint};
use crate::core::{RespawnSettings, VisibilityMode};

/// Recompute `PlayerVisibility` for every respawn point.
pub fn update_spawn_point_visibility(
    settings: Res<RespawnSettings>,
    rapier_context: Query<&RapierContext>,
    player_query: Query<(Entity, &Transform), (With<Player>, Without<RespawnPoint>)>,
    mut point_query: Query<(&Transform, &mut PlayerVisibility), (With<RespawnPoint>, Without<Player>)>,
) {
    if settings.visibility_mode != VisibilityMode::ViewCone {
        return;
    }

    let Ok((player_entity, player_transform)) = player_query.get_single() else {
        return;
    };

    let eye = player_transform.translation + Vec3::Y * settings.eye_height;
    let forward = player_transform.forward().as_vec3();
    let half_fov = (settings.view_fov_degrees * 0.5).to_radians();
    // Without a physics context nothing can occlude
    let context = if settings.line_of_sight {
        rapier_context.get_single().ok()
    } else {
        None
    };

    for (transform, mut visibility) in point_query.iter_mut() {
        let target = transform.translation;
        let visible = in_view_cone(eye, forward, target, half_fov, settings.view_distance)
            && context.map_or(true, |ctx| has_line_of_sight(ctx, eye, target, player_entity));

        if visibility.0 != visible {
            visibility.0 = visible;
        }
    }
}

/// Whether `target` is within `view_distance` of `eye` and at most
/// `half_fov` radians away from `forward`.
pub fn in_view_cone(eye: Vec3, forward: Vec3, target: Vec3, half_fov: f32, view_distance: f32) -> bool {
    let to_target = target - eye;
    let distance = to_target.length();
    if distance > view_distance {
        return false;
    }
    if distance <= f32::EPSILON {
        return true;
    }
    forward.angle_between(to_target) <= half_fov
}

fn has_line_of_sight(context: &RapierContext, eye: Vec3, target: Vec3, player: Entity) -> bool {
    let to_target = target - eye;
    let distance = to_target.length();
    if distance <= f32::EPSILON {
        return true;
    }

    // Only level geometry blocks sight; other actors don't
    context
        .cast_ray(
            eye,
            to_target / distance,
            distance,
            true,
            QueryFilter::only_fixed().exclude_collider(player),
        )
        .is_none()
}
