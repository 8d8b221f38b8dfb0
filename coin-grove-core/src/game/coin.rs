//! Coin Placement and Collection
//!
//! Coins are placed once at session start on random non-collidable tiles,
//! and collected when the player body overlaps them.

use glam::Vec2;
use thiserror::Error;

use crate::core::rng::GameRng;
use crate::game::events::GameEvent;
use crate::game::map::Tilemap;
use crate::game::state::SessionState;

/// Points awarded per collected coin.
pub const COIN_VALUE: u32 = 10;

/// Configuration for initial coin placement.
#[derive(Clone, Debug)]
pub struct CoinPlacement {
    /// Number of coins placed at session start.
    pub count: u32,

    /// Margin kept from the play-area edges, in pixels.
    pub margin: f32,

    /// Random samples per coin before falling back to a free-cell scan.
    pub max_attempts: u32,
}

impl Default for CoinPlacement {
    fn default() -> Self {
        Self {
            count: 20,
            margin: 50.0,
            max_attempts: 64,
        }
    }
}

/// Errors produced while placing coins.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlacementError {
    /// The map has no non-collidable cell inside the placement margin, so
    /// no coin position can ever be accepted.
    #[error("no free cell inside the placement margin")]
    NoFreeCell,
}

/// Pick positions for `config.count` coins.
///
/// Positions are sampled uniformly inside the margin and accepted when the
/// tile underneath is absent or non-collidable. Sampling per coin is
/// bounded by `max_attempts`; on exhaustion the position comes from a
/// deterministic scan of the free cells inside the margin, so placement
/// terminates even on maps that are almost entirely walled.
pub fn place_coins(
    map: &Tilemap,
    rng: &mut GameRng,
    config: &CoinPlacement,
) -> Result<Vec<Vec2>, PlacementError> {
    let mut positions = Vec::with_capacity(config.count as usize);
    for _ in 0..config.count {
        positions.push(place_one(map, rng, config)?);
    }
    Ok(positions)
}

fn place_one(
    map: &Tilemap,
    rng: &mut GameRng,
    config: &CoinPlacement,
) -> Result<Vec2, PlacementError> {
    let min_x = config.margin as i32;
    let max_x = (map.width_px() - config.margin) as i32;
    let min_y = config.margin as i32;
    let max_y = (map.height_px() - config.margin) as i32;

    for _ in 0..config.max_attempts {
        let x = rng.next_int_range(min_x, max_x) as f32;
        let y = rng.next_int_range(min_y, max_y) as f32;

        if !map.blocks_point(x, y) {
            return Ok(Vec2::new(x, y));
        }
    }

    // Dense map: scan the free cells inside the margin instead of sampling
    let candidates: Vec<(u32, u32)> = map
        .free_cells()
        .filter(|&(col, row)| {
            let center = map.cell_center(col, row);
            center.x >= config.margin
                && center.x <= map.width_px() - config.margin
                && center.y >= config.margin
                && center.y <= map.height_px() - config.margin
        })
        .collect();

    rng.choose(&candidates)
        .map(|&(col, row)| map.cell_center(col, row))
        .ok_or(PlacementError::NoFreeCell)
}

/// Collect a coin by id.
///
/// Queues the collection event and, when the running score passes the high
/// score, a [`GameEvent::HighScoreChanged`] right after it. Returns the
/// collection event, or None when the coin does not exist or was already
/// collected.
pub fn collect_coin(state: &mut SessionState, coin_id: u32) -> Option<GameEvent> {
    let tick = state.tick;

    let coin = state.coins.get_mut(&coin_id)?;
    if coin.collected {
        return None;
    }

    coin.collected = true;
    coin.collected_tick = Some(tick);

    state.score = state.score.saturating_add(COIN_VALUE);

    let event = GameEvent::CoinCollected {
        tick,
        coin_id,
        points: COIN_VALUE,
        score: state.score,
    };
    state.push_event(event);

    if state.score > state.high_score {
        state.high_score = state.score;
        state.push_event(GameEvent::HighScoreChanged {
            tick,
            high_score: state.high_score,
        });
    }

    Some(event)
}

// =============================================================================
// TESTS
// =============================================================================
