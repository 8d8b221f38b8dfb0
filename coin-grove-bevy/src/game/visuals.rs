//! Visual effects - camera

use bevy::prelude::*;

use super::components::PlayerSprite;

// ============================================================================
// CAMERA FOLLOW
// ============================================================================

/// Camera smoothly follows the player
pub fn camera_follow(
    time: Res<Time>,
    player_query: Query<&Transform, With<PlayerSprite>>,
    mut camera_query: Query<&mut Transform, (With<Camera2d>, Without<PlayerSprite>)>,
) {
    let Ok(player_transform) = player_query.get_single() else {
        return;
    };

    let Ok(mut camera_transform) = camera_query.get_single_mut() else {
        return;
    };

    let target = player_transform.translation.truncate();
    let current = camera_transform.translation.truncate();

    // Smooth lerp with damping
    let lerp_speed = 5.0;
    let new_pos = current.lerp(target, lerp_speed * time.delta_secs());

    camera_transform.translation.x = new_pos.x;
    camera_transform.translation.y = new_pos.y;
}
