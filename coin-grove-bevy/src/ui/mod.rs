//! UI module - the three screen-anchored HUD labels

use bevy::prelude::*;

use crate::game::Session;

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_hud)
            .add_systems(Update, update_hud);
    }
}

/// Marker for the score label
#[derive(Component)]
struct ScoreText;

/// Marker for the high-score label
#[derive(Component)]
struct HighScoreText;

/// Setup the HUD labels in the top-left corner
fn setup_hud(mut commands: Commands) {
    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            top: Val::Px(20.0),
            left: Val::Px(20.0),
            flex_direction: FlexDirection::Column,
            row_gap: Val::Px(10.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((
                Text::new("Score: 0"),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                ScoreText,
            ));

            parent.spawn((
                Text::new("High Score: 0"),
                TextFont {
                    font_size: 20.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 1.0, 0.0)),
                HighScoreText,
            ));

            parent.spawn((
                Text::new("Press SPACE to reset the high score"),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.0, 0.0)),
            ));
        });
}

/// Refresh the labels from the session
fn update_hud(
    session: Res<Session>,
    mut score_text: Query<&mut Text, (With<ScoreText>, Without<HighScoreText>)>,
    mut high_text: Query<&mut Text, (With<HighScoreText>, Without<ScoreText>)>,
) {
    if let Ok(mut text) = score_text.get_single_mut() {
        **text = format!("Score: {}", session.state.score);
    }
    if let Ok(mut text) = high_text.get_single_mut() {
        **text = format!("High Score: {}", session.state.high_score);
    }
}
