//! Session State Definitions
//!
//! All mutable state for one play session. Coins live in a BTreeMap for
//! deterministic iteration order.

use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::core::rng::GameRng;
use crate::game::coin::{place_coins, CoinPlacement, PlacementError};
use crate::game::collision::Aabb;
use crate::game::events::GameEvent;
use crate::game::map::Tilemap;

// =============================================================================
// ANIMATION SELECTION
// =============================================================================

/// Which way the player sprite faces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    /// Facing away from the camera.
    Up,
    /// Facing the camera.
    Down,
    /// Facing left (the side animation, mirrored).
    Left,
    /// Facing right (the side animation).
    #[default]
    Right,
}

/// Whether the player is moving this tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Motion {
    /// Standing still.
    #[default]
    Idle,
    /// Walking in the facing direction.
    Running,
}

/// Animation selection: facing crossed with motion. Left and right share
/// the side animations; left additionally mirrors the sprite.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnimKey {
    /// Standing, facing the camera.
    IdleDown,
    /// Standing, facing away.
    IdleUp,
    /// Standing, facing sideways.
    IdleSide,
    /// Walking toward the camera.
    RunDown,
    /// Walking away from the camera.
    RunUp,
    /// Walking sideways.
    RunSide,
}

/// Pick the animation for a facing/motion pair.
pub fn anim_key(facing: Facing, motion: Motion) -> AnimKey {
    match (motion, facing) {
        (Motion::Idle, Facing::Down) => AnimKey::IdleDown,
        (Motion::Idle, Facing::Up) => AnimKey::IdleUp,
        (Motion::Idle, Facing::Left | Facing::Right) => AnimKey::IdleSide,
        (Motion::Running, Facing::Down) => AnimKey::RunDown,
        (Motion::Running, Facing::Up) => AnimKey::RunUp,
        (Motion::Running, Facing::Left | Facing::Right) => AnimKey::RunSide,
    }
}

/// True when the sprite should be mirrored horizontally.
#[inline]
pub fn flip_x(facing: Facing) -> bool {
    facing == Facing::Left
}

// =============================================================================
// PLAYER STATE
// =============================================================================

/// State of the player.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    /// Center position in map space (y grows downward).
    pub position: Vec2,

    /// Current velocity in px/s.
    pub velocity: Vec2,

    /// Which way the sprite faces.
    pub facing: Facing,

    /// Idle or running.
    pub motion: Motion,
}

impl PlayerState {
    /// Collision body size in pixels (square).
    pub const BODY_SIZE: f32 = 22.0;

    /// Sprite scale relative to the body.
    pub const SPRITE_SCALE: f32 = 1.25;

    /// Spawn point.
    pub const SPAWN: Vec2 = Vec2::new(50.0, 50.0);

    /// Create a new player at a position.
    pub fn new(position: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            facing: Facing::default(),
            motion: Motion::default(),
        }
    }

    /// Collision body centered on the player.
    #[inline]
    pub fn body(&self) -> Aabb {
        Aabb::new(self.position, Vec2::splat(Self::BODY_SIZE))
    }

    /// Current animation key.
    #[inline]
    pub fn anim_key(&self) -> AnimKey {
        anim_key(self.facing, self.motion)
    }

    /// Should the sprite be mirrored?
    #[inline]
    pub fn flip_x(&self) -> bool {
        flip_x(self.facing)
    }
}

// =============================================================================
// COIN STATE
// =============================================================================

/// State of a coin pickup.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CoinState {
    /// Unique coin id (monotonic counter).
    pub id: u32,

    /// Center position in map space.
    pub position: Vec2,

    /// Has this coin been collected? A collected coin is never collectable
    /// again.
    pub collected: bool,

    /// Tick when collected (if collected).
    pub collected_tick: Option<u32>,
}

impl CoinState {
    /// Rendered and collision size in pixels (square).
    pub const SIZE: f32 = 12.0;

    /// Create a new coin.
    pub fn new(id: u32, position: Vec2) -> Self {
        Self {
            id,
            position,
            collected: false,
            collected_tick: None,
        }
    }

    /// Collision body centered on the coin.
    #[inline]
    pub fn body(&self) -> Aabb {
        Aabb::new(self.position, Vec2::splat(Self::SIZE))
    }
}

// =============================================================================
// SESSION STATE
// =============================================================================

/// Complete state of a play session.
///
/// Constructed once per session; the host loop drives it through
/// [`crate::game::tick::tick`] and reads the event queue back.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionState {
    /// Current tick.
    pub tick: u32,

    /// RNG seed (kept for replays).
    pub rng_seed: u64,

    /// Deterministic RNG state.
    #[serde(skip)]
    pub rng: GameRng,

    /// The tile map the session plays on.
    pub map: Tilemap,

    /// The player.
    pub player: PlayerState,

    /// All coins (BTreeMap for deterministic iteration).
    pub coins: BTreeMap<u32, CoinState>,

    /// Running score for this session.
    pub score: u32,

    /// In-memory high score (seeded from the store at construction).
    pub high_score: u32,

    /// Next coin id (monotonic counter).
    pub next_coin_id: u32,

    /// Events generated this tick (drained by the host loop).
    #[serde(skip)]
    pub pending_events: Vec<GameEvent>,
}

impl SessionState {
    /// Create a new session on `map`.
    ///
    /// `stored_high_score` is whatever the high-score store held at
    /// startup; zero for a fresh profile.
    pub fn new(map: Tilemap, seed: u64, stored_high_score: u32) -> Self {
        Self {
            tick: 0,
            rng_seed: seed,
            rng: GameRng::new(seed),
            map,
            player: PlayerState::new(PlayerState::SPAWN),
            coins: BTreeMap::new(),
            score: 0,
            high_score: stored_high_score,
            next_coin_id: 0,
            pending_events: Vec::new(),
        }
    }

    /// Place the session's initial coins.
    pub fn populate_coins(&mut self, config: &CoinPlacement) -> Result<(), PlacementError> {
        let positions = place_coins(&self.map, &mut self.rng, config)?;
        for position in positions {
            self.spawn_coin(position);
        }
        Ok(())
    }

    /// Spawn a single coin, returning its id.
    pub fn spawn_coin(&mut self, position: Vec2) -> u32 {
        let id = self.next_coin_id;
        self.next_coin_id += 1;
        self.coins.insert(id, CoinState::new(id, position));
        id
    }

    /// Coins still on the field.
    pub fn active_coins(&self) -> impl Iterator<Item = &CoinState> {
        self.coins.values().filter(|coin| !coin.collected)
    }

    /// Number of coins still on the field.
    pub fn remaining_coins(&self) -> usize {
        self.active_coins().count()
    }

    /// Zero the in-memory high score and ask the store owner to clear the
    /// persisted value. The running score is untouched.
    pub fn reset_high_score(&mut self) {
        self.high_score = 0;
        let tick = self.tick;
        self.push_event(GameEvent::HighScoreReset { tick });
    }

    /// Push a session event.
    pub fn push_event(&mut self, event: GameEvent) {
        self.pending_events.push(event);
    }

    /// Take pending events (consumes them).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.pending_events)
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anim_key_selection() {
        assert_eq!(anim_key(Facing::Down, Motion::Idle), AnimKey::IdleDown);
        assert_eq!(anim_key(Facing::Up, Motion::Running), AnimKey::RunUp);

        // Left and right share the side animations
        assert_eq!(anim_key(Facing::Left, Motion::Running), AnimKey::RunSide);
        assert_eq!(anim_key(Facing::Right, Motion::Running), AnimKey::RunSide);
        assert_eq!(anim_key(Facing::Left, Motion::Idle), AnimKey::IdleSide);

        // Only left mirrors
        assert!(flip_x(Facing::Left));
        assert!(!flip_x(Facing::Right));
        assert!(!flip_x(Facing::Up));
    }

    #[test]
    fn test_spawn_coin_ids_monotonic() {
        let mut state = SessionState::new(Tilemap::demo_grove(), 1, 0);

        let a = state.spawn_coin(Vec2::new(100.0, 100.0));
        let b = state.spawn_coin(Vec2::new(200.0, 100.0));

        assert_eq!(a, 0);
        assert_eq!(b, 1);
        assert_eq!(state.coins.len(), 2);
        assert_eq!(state.remaining_coins(), 2);
    }

    #[test]
    fn test_reset_high_score_keeps_score() {
        let mut state = SessionState::new(Tilemap::demo_grove(), 1, 170);
        state.score = 40;

        state.reset_high_score();

        assert_eq!(state.high_score, 0);
        assert_eq!(state.score, 40);
        assert_eq!(
            state.take_events(),
            vec![GameEvent::HighScoreReset { tick: 0 }]
        );
    }

    #[test]
    fn test_btreemap_iteration_order() {
        let mut state = SessionState::new(Tilemap::demo_grove(), 1, 0);
        for i in 0..5 {
            state.spawn_coin(Vec2::new(100.0 + i as f32 * 20.0, 100.0));
        }

        let ids: Vec<u32> = state.coins.keys().copied().collect();
        let mut sorted = ids.clone();
        sorted.sort_unstable();

        assert_eq!(ids, sorted, "BTreeMap should iterate in sorted order");
    }
}
