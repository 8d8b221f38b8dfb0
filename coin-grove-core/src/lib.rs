//! # Coin Grove Session Core
//!
//! Deterministic game logic for Coin Grove: one player walks a tilemap,
//! collects twenty spinning coins for ten points each, and a high score
//! survives across sessions.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                   COIN GROVE CORE                            │
//! ├─────────────────────────────────────────────────────────────┤
//! │  core/           - Deterministic primitives                  │
//! │  └── rng.rs      - Seeded Xorshift128+ PRNG                  │
//! │                                                              │
//! │  game/           - Session logic (deterministic)             │
//! │  ├── map.rs      - Tile layers, collision-by-exclusion       │
//! │  ├── collision.rs- AABB vs. tile-grid resolution             │
//! │  ├── input.rs    - Bit-flag input frames                     │
//! │  ├── state.rs    - Session, player and coin state            │
//! │  ├── coin.rs     - Coin placement and collection             │
//! │  ├── tick.rs     - Per-frame update loop                     │
//! │  └── events.rs   - Session events for the host loop          │
//! │                                                              │
//! │  persist.rs      - File-backed high-score store              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Determinism Guarantee
//!
//! The `core/` and `game/` modules hold no hidden state:
//! - No system time dependencies
//! - No HashMap (coins live in a BTreeMap for sorted iteration)
//! - All randomness from the seeded Xorshift128+ generator
//!
//! Given the same map, seed and input script, a session replays to an
//! identical final state. The host loop (a Bevy client, the headless demo
//! binary, or a test) owns the window, the clock and the high-score file;
//! this crate owns everything else.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(unsafe_code)]

pub mod core;
pub mod game;
pub mod persist;

// Re-export commonly used types
pub use core::rng::GameRng;
pub use game::input::InputFrame;
pub use game::map::Tilemap;
pub use game::state::{CoinState, PlayerState, SessionState};
pub use game::tick::{tick, TickConfig, TickResult};
pub use persist::HighScoreStore;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Simulation tick rate (Hz)
pub const TICK_RATE: u32 = 60;

/// Width and height of the visible play area in pixels
pub const VIEW_SIZE: f32 = 640.0;
