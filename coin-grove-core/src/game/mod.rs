//! Game Logic Module
//!
//! All session simulation code. 100% deterministic.
//!
//! ## Module Structure
//!
//! - `map`: Tile layers, collision-by-exclusion, world queries
//! - `collision`: AABB overlap and tile-grid movement resolution
//! - `input`: Per-tick input frames
//! - `state`: Session, player and coin state
//! - `coin`: Coin placement and collection
//! - `tick`: Per-frame update loop
//! - `events`: Session events consumed by the host loop

pub mod coin;
pub mod collision;
pub mod events;
pub mod input;
pub mod map;
pub mod state;
pub mod tick;

// Re-export key types
pub use coin::{CoinPlacement, PlacementError, COIN_VALUE};
pub use events::GameEvent;
pub use input::InputFrame;
pub use map::{MapError, Tilemap};
pub use state::{CoinState, Facing, Motion, PlayerState, SessionState};
pub use tick::TickResult;
