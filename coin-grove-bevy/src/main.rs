//! Coin Grove - tile-map coin hunt
//!
//! A single-scene 2D game: walk the grove, collect the twenty coins,
//! beat the stored high score.

mod game;
mod ui;

use bevy::prelude::*;
use bevy::render::camera::ScalingMode;

use game::GamePlugin;
use ui::UiPlugin;

fn main() {
    App::new()
        // Bevy defaults with custom window
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Coin Grove".into(),
                resolution: (640., 640.).into(),
                resizable: false,
                ..default()
            }),
            ..default()
        }))
        // Session ticks on the fixed timestep
        .insert_resource(Time::<Fixed>::from_hz(coin_grove::TICK_RATE as f64))
        // Our plugins
        .add_plugins((GamePlugin, UiPlugin))
        // Startup
        .add_systems(Startup, setup_2d_camera)
        .run();
}

/// 2D camera that the game systems keep centered on the player
fn setup_2d_camera(mut commands: Commands) {
    commands.spawn((
        Camera2d,
        Camera {
            clear_color: ClearColorConfig::Custom(Color::srgb(0.05, 0.09, 0.06)),
            ..default()
        },
        OrthographicProjection {
            // Show exactly the 640px play area vertically (zoom 1)
            scaling_mode: ScalingMode::FixedVertical {
                viewport_height: coin_grove::VIEW_SIZE,
            },
            near: -1000.0,
            far: 1000.0,
            ..OrthographicProjection::default_2d()
        },
    ));

    info!("Coin Grove initialized!");
}
