//! Components for the rendered session

use bevy::prelude::*;

/// Player sprite marker
#[derive(Component)]
pub struct PlayerSprite;

/// Coin sprite carrying its session coin id
#[derive(Component)]
pub struct CoinSprite {
    pub id: u32,
}

/// Drives the player's walk-cycle bob
#[derive(Component)]
pub struct PlayerAnimation {
    pub timer: Timer,
    pub frame: usize,
}

impl PlayerAnimation {
    /// Frames in the walk cycle
    pub const FRAMES: usize = 8;

    /// Walk cycle at 10 fps
    pub fn walk() -> Self {
        Self {
            timer: Timer::from_seconds(0.1, TimerMode::Repeating),
            frame: 0,
        }
    }
}

/// Drives a coin's spin loop
#[derive(Component)]
pub struct SpinAnimation {
    pub timer: Timer,
    pub frame: usize,
}

impl SpinAnimation {
    /// Frames in the spin loop
    pub const FRAMES: usize = 15;

    /// Spin at 10 fps
    pub fn new() -> Self {
        Self {
            timer: Timer::from_seconds(0.1, TimerMode::Repeating),
            frame: 0,
        }
    }
}
