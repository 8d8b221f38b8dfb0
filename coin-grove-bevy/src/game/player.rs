//! Player systems - input capture, transform sync and animation

use bevy::prelude::*;

use coin_grove::game::state::{AnimKey, PlayerState};
use coin_grove::{InputFrame, SessionState};

use super::components::{PlayerAnimation, PlayerSprite};
use super::world::map_to_world;
use super::{FrameInput, Session};

/// Visual size of the player quad
const PLAYER_SPRITE_SIZE: f32 = PlayerState::BODY_SIZE * PlayerState::SPRITE_SCALE;

// ============================================================================
// PLAYER SPAWNING
// ============================================================================

/// Spawn the player sprite at the session's player position
pub fn spawn_player(commands: &mut Commands, state: &SessionState) {
    commands.spawn((
        PlayerSprite,
        Name::new("Player"),
        Sprite {
            color: Color::srgb(0.91, 0.60, 0.26),
            custom_size: Some(Vec2::splat(PLAYER_SPRITE_SIZE)),
            ..default()
        },
        Transform::from_translation(map_to_world(&state.map, state.player.position, 10.0)),
        PlayerAnimation::walk(),
    ));

    info!("Player spawned at {:?}", state.player.position);
}

// ============================================================================
// INPUT
// ============================================================================

/// Arrow keys move, Space resets the high score
pub fn collect_input(keyboard: Res<ButtonInput<KeyCode>>, mut input: ResMut<FrameInput>) {
    let frame = &mut input.frame;

    frame.set(InputFrame::FLAG_LEFT, keyboard.pressed(KeyCode::ArrowLeft));
    frame.set(InputFrame::FLAG_RIGHT, keyboard.pressed(KeyCode::ArrowRight));
    frame.set(InputFrame::FLAG_UP, keyboard.pressed(KeyCode::ArrowUp));
    frame.set(InputFrame::FLAG_DOWN, keyboard.pressed(KeyCode::ArrowDown));

    // Latched until a fixed tick consumes it, so a press landing between
    // two ticks is never lost
    if keyboard.just_pressed(KeyCode::Space) {
        frame.set(InputFrame::FLAG_RESET, true);
    }
}

// ============================================================================
// RENDER SYNC
// ============================================================================

/// Copy the simulated position onto the sprite
pub fn sync_player_transform(
    session: Res<Session>,
    mut query: Query<&mut Transform, With<PlayerSprite>>,
) {
    let Ok(mut transform) = query.get_single_mut() else {
        return;
    };

    transform.translation = map_to_world(&session.state.map, session.state.player.position, 10.0);
}

/// Mirror the sprite by facing and bob it while running
pub fn animate_player(
    time: Res<Time>,
    session: Res<Session>,
    mut query: Query<(&mut Sprite, &mut Transform, &mut PlayerAnimation), With<PlayerSprite>>,
) {
    let Ok((mut sprite, mut transform, mut anim)) = query.get_single_mut() else {
        return;
    };

    sprite.flip_x = session.state.player.flip_x();

    match session.state.player.anim_key() {
        AnimKey::RunDown | AnimKey::RunUp | AnimKey::RunSide => {
            anim.timer.tick(time.delta());
            if anim.timer.just_finished() {
                anim.frame = (anim.frame + 1) % PlayerAnimation::FRAMES;
            }
            let phase = anim.frame as f32 / PlayerAnimation::FRAMES as f32 * std::f32::consts::TAU;
            transform.scale = Vec3::new(1.0, 1.0 + 0.08 * phase.sin(), 1.0);
        }
        AnimKey::IdleDown | AnimKey::IdleUp | AnimKey::IdleSide => {
            anim.frame = 0;
            anim.timer.reset();
            transform.scale = Vec3::ONE;
        }
    }
}
