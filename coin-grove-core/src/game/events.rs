//! Session Events
//!
//! Everything that happened during a tick, in the order it happened. The
//! host loop reacts to these: despawning coin sprites, refreshing the HUD
//! and persisting the high score.

use serde::{Deserialize, Serialize};

/// An event produced by the session tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The player picked up a coin.
    CoinCollected {
        /// Tick the pickup happened on.
        tick: u32,
        /// Id of the collected coin.
        coin_id: u32,
        /// Points awarded for this coin.
        points: u32,
        /// Running score after the pickup.
        score: u32,
    },

    /// The running score passed the high score. The owner of the store
    /// should persist the new value immediately.
    HighScoreChanged {
        /// Tick the change happened on.
        tick: u32,
        /// The new high score.
        high_score: u32,
    },

    /// The high score was reset to zero. The owner of the store should
    /// clear the persisted value.
    HighScoreReset {
        /// Tick the reset happened on.
        tick: u32,
    },
}
