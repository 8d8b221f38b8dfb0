//! Coin sprites - spawn, despawn on pickup, spin

use bevy::prelude::*;

use coin_grove::game::state::CoinState;
use coin_grove::SessionState;

use super::components::{CoinSprite, SpinAnimation};
use super::world::map_to_world;
use super::CoinCollectedEvent;

/// Spawn a sprite for every coin still on the field
pub fn spawn_coins(commands: &mut Commands, state: &SessionState) {
    for coin in state.active_coins() {
        commands.spawn((
            CoinSprite { id: coin.id },
            Sprite {
                color: Color::srgb(0.95, 0.82, 0.25),
                custom_size: Some(Vec2::splat(CoinState::SIZE)),
                ..default()
            },
            Transform::from_translation(map_to_world(&state.map, coin.position, 5.0)),
            SpinAnimation::new(),
        ));
    }
}

/// A collected coin leaves the scene immediately
pub fn despawn_collected_coins(
    mut commands: Commands,
    mut events: EventReader<CoinCollectedEvent>,
    query: Query<(Entity, &CoinSprite)>,
) {
    for event in events.read() {
        for (entity, coin) in query.iter() {
            if coin.id == event.coin_id {
                commands.entity(entity).despawn();
            }
        }
    }
}

/// Flip the quad around its vertical axis, a 15-frame spin loop
pub fn animate_coins(
    time: Res<Time>,
    mut query: Query<(&mut Transform, &mut SpinAnimation), With<CoinSprite>>,
) {
    for (mut transform, mut spin) in query.iter_mut() {
        spin.timer.tick(time.delta());
        if spin.timer.just_finished() {
            spin.frame = (spin.frame + 1) % SpinAnimation::FRAMES;
        }

        let phase = spin.frame as f32 / SpinAnimation::FRAMES as f32 * std::f32::consts::TAU;
        transform.scale.x = phase.cos();
    }
}
