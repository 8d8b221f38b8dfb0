//! Per-Tick Session Update
//!
//! The single update function the host loop calls once per frame. Given
//! the same session and input script the pipeline below always produces
//! the same result.

use glam::Vec2;

use crate::game::coin::{collect_coin, CoinPlacement, PlacementError};
use crate::game::collision::move_rect;
use crate::game::events::GameEvent;
use crate::game::input::InputFrame;
use crate::game::map::Tilemap;
use crate::game::state::{Facing, Motion, PlayerState, SessionState};

/// Configuration for the session update.
#[derive(Clone, Debug)]
pub struct TickConfig {
    /// Player movement speed, px/s.
    pub player_speed: f32,

    /// Seconds simulated per tick.
    pub dt: f32,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            player_speed: 160.0,
            dt: 1.0 / crate::TICK_RATE as f32,
        }
    }
}

/// Result of a tick.
#[derive(Debug, Default)]
pub struct TickResult {
    /// Events generated this tick, in order.
    pub events: Vec<GameEvent>,
}

/// Run one session tick.
///
/// Pipeline:
/// 1. advance the tick counter;
/// 2. translate input into velocity, facing and motion;
/// 3. integrate the player against the tilemap;
/// 4. collect any coin the player body overlaps;
/// 5. apply a high-score reset when the input frame requests one.
pub fn tick(state: &mut SessionState, input: &InputFrame, config: &TickConfig) -> TickResult {
    state.tick += 1;

    apply_input(&mut state.player, input, config);
    move_player(state, config);
    process_coin_overlaps(state);

    if input.reset_pressed() {
        state.reset_high_score();
    }

    TickResult {
        events: state.take_events(),
    }
}

/// Translate the input frame into player velocity, facing and motion.
fn apply_input(player: &mut PlayerState, input: &InputFrame, config: &TickConfig) {
    let dir = input.move_direction();
    if dir == Vec2::ZERO {
        player.velocity = Vec2::ZERO;
        player.motion = Motion::Idle;
        return;
    }

    player.velocity = dir * config.player_speed;
    player.motion = Motion::Running;
    player.facing = if dir.x < 0.0 {
        Facing::Left
    } else if dir.x > 0.0 {
        Facing::Right
    } else if dir.y < 0.0 {
        Facing::Up
    } else {
        Facing::Down
    };
}

/// Integrate the player position against the obstacle layer.
fn move_player(state: &mut SessionState, config: &TickConfig) {
    if state.player.velocity == Vec2::ZERO {
        return;
    }

    let delta = state.player.velocity * config.dt;
    let body = state.player.body();
    let resolved = move_rect(&state.map, body, delta);
    state.player.position = resolved;
}

/// Collect every coin the player body currently overlaps.
fn process_coin_overlaps(state: &mut SessionState) {
    let body = state.player.body();
    let hits: Vec<u32> = state
        .coins
        .values()
        .filter(|coin| !coin.collected && body.overlaps(&coin.body()))
        .map(|coin| coin.id)
        .collect();

    for coin_id in hits {
        collect_coin(state, coin_id);
    }
}

/// Replay an input script on a fresh session.
///
/// Builds the session exactly the way a live one is built (same placement
/// configuration), runs every frame, and returns the final state together
/// with all events. Used by determinism checks.
pub fn replay_session(
    map: Tilemap,
    seed: u64,
    stored_high_score: u32,
    inputs: &[InputFrame],
    config: &TickConfig,
) -> Result<(SessionState, Vec<GameEvent>), PlacementError> {
    let mut state = SessionState::new(map, seed, stored_high_score);
    state.populate_coins(&CoinPlacement::default())?;

    let mut all_events = Vec::new();
    for input in inputs {
        let result = tick(&mut state, input, config);
        all_events.extend(result.events);
    }

    Ok((state, all_events))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::coin::COIN_VALUE;
    use crate::persist::HighScoreStore;

    fn playing_session() -> SessionState {
        SessionState::new(Tilemap::demo_grove(), 4242, 0)
    }

    fn held(flags: u8) -> InputFrame {
        InputFrame::with_flags(flags)
    }

    #[test]
    fn test_player_moves_right() {
        let mut state = playing_session();
        let config = TickConfig::default();
        let start_x = state.player.position.x;

        tick(&mut state, &held(InputFrame::FLAG_RIGHT), &config);

        assert!(state.player.position.x > start_x, "player should move right");
        assert_eq!(state.player.facing, Facing::Right);
        assert_eq!(state.player.motion, Motion::Running);
    }

    #[test]
    fn test_idle_keeps_facing() {
        let mut state = playing_session();
        let config = TickConfig::default();

        tick(&mut state, &held(InputFrame::FLAG_UP), &config);
        assert_eq!(state.player.facing, Facing::Up);

        tick(&mut state, &InputFrame::new(), &config);
        assert_eq!(state.player.motion, Motion::Idle);
        assert_eq!(state.player.velocity, Vec2::ZERO);
        // Facing persists through idle, the way the idle animations expect
        assert_eq!(state.player.facing, Facing::Up);
    }

    #[test]
    fn test_wall_stops_player() {
        let mut state = playing_session();
        let config = TickConfig::default();

        // Walk into the left border wall for ten seconds
        for _ in 0..600 {
            tick(&mut state, &held(InputFrame::FLAG_LEFT), &config);
        }

        // Border tile ends at x = 16; body half is 11
        let expected = 16.0 + PlayerState::BODY_SIZE / 2.0;
        assert!((state.player.position.x - expected).abs() < 1e-3);
    }

    #[test]
    fn test_overlap_collects_coin() {
        let mut state = playing_session();
        let config = TickConfig::default();

        let id = state.spawn_coin(state.player.position);
        let result = tick(&mut state, &InputFrame::new(), &config);

        assert!(state.coins[&id].collected);
        assert_eq!(state.score, COIN_VALUE);
        assert_eq!(
            result.events,
            vec![
                GameEvent::CoinCollected {
                    tick: 1,
                    coin_id: id,
                    points: COIN_VALUE,
                    score: COIN_VALUE,
                },
                GameEvent::HighScoreChanged {
                    tick: 1,
                    high_score: COIN_VALUE,
                },
            ]
        );
    }

    #[test]
    fn test_distant_coin_not_collected() {
        let mut state = playing_session();
        let config = TickConfig::default();

        let far = state.player.position + Vec2::new(100.0, 0.0);
        let id = state.spawn_coin(far);

        let result = tick(&mut state, &InputFrame::new(), &config);

        assert!(!state.coins[&id].collected);
        assert!(result.events.is_empty());
        assert_eq!(state.score, 0);
    }

    #[test]
    fn test_score_monotonic_over_session() {
        let mut state = playing_session();
        state.populate_coins(&CoinPlacement::default()).unwrap();
        let config = TickConfig::default();

        let mut last_score = 0;
        for t in 0..1200 {
            let input = match (t / 120) % 4 {
                0 => held(InputFrame::FLAG_RIGHT),
                1 => held(InputFrame::FLAG_DOWN),
                2 => held(InputFrame::FLAG_LEFT),
                _ => held(InputFrame::FLAG_UP),
            };
            tick(&mut state, &input, &config);

            assert!(state.score >= last_score, "score must never decrease");
            assert!(
                state.score % COIN_VALUE == 0,
                "score moves in whole coin increments"
            );
            // Started from a zero high score, so it tracks the best score
            assert_eq!(state.high_score, state.score);
            last_score = state.score;
        }
    }

    #[test]
    fn test_replay_determinism() {
        let config = TickConfig::default();
        // Determinism must hold for every seed, so fuzz it
        let seed: u64 = rand::random();

        // A wandering input script
        let inputs: Vec<InputFrame> = (0..900)
            .map(|t| match (t / 90) % 5 {
                0 => held(InputFrame::FLAG_RIGHT),
                1 => held(InputFrame::FLAG_DOWN),
                2 => held(InputFrame::FLAG_RIGHT),
                3 => held(InputFrame::FLAG_UP),
                _ => InputFrame::new(),
            })
            .collect();

        let (final1, events1) =
            replay_session(Tilemap::demo_grove(), seed, 30, &inputs, &config).unwrap();
        let (final2, events2) =
            replay_session(Tilemap::demo_grove(), seed, 30, &inputs, &config).unwrap();

        assert_eq!(final1.tick, final2.tick);
        assert_eq!(final1.player, final2.player);
        assert_eq!(final1.score, final2.score);
        assert_eq!(final1.high_score, final2.high_score);
        assert_eq!(final1.coins, final2.coins);
        assert_eq!(events1, events2);
    }

    /// The end-to-end walkthrough: fresh profile, two pickups, then a
    /// high-score reset.
    #[test]
    fn test_collect_and_reset_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let store = HighScoreStore::new(dir.path().join("highscore"));
        let config = TickConfig::default();

        // Fresh profile: nothing stored yet
        assert_eq!(store.load(), 0);

        let mut state = SessionState::new(Tilemap::demo_grove(), 7, store.load());
        assert_eq!(state.score, 0);
        assert_eq!(state.high_score, 0);

        // Drive the session the way a host loop does: apply events to the
        // store as they come out of the tick
        let run = |state: &mut SessionState, input: &InputFrame| {
            for event in tick(state, input, &config).events {
                match event {
                    GameEvent::HighScoreChanged { high_score, .. } => {
                        store.save(high_score).unwrap()
                    }
                    GameEvent::HighScoreReset { .. } => store.clear().unwrap(),
                    GameEvent::CoinCollected { .. } => {}
                }
            }
        };

        // First coin
        let first = state.spawn_coin(state.player.position);
        run(&mut state, &InputFrame::new());
        assert!(state.coins[&first].collected);
        assert_eq!(state.score, 10);
        assert_eq!(state.high_score, 10);
        assert_eq!(store.load(), 10);

        // Second coin
        let second = state.spawn_coin(state.player.position);
        run(&mut state, &InputFrame::new());
        assert!(state.coins[&second].collected);
        assert_eq!(state.score, 20);
        assert_eq!(state.high_score, 20);
        assert_eq!(store.load(), 20);

        // Reset: high score and store go to zero, the running score stays
        run(&mut state, &held(InputFrame::FLAG_RESET));
        assert_eq!(state.high_score, 0);
        assert_eq!(state.score, 20);
        assert_eq!(store.load(), 0);
        assert!(!store.path().exists());
    }
}
