//! Core deterministic primitives.
//!
//! Everything the game logic needs that must behave identically run after
//! run lives here, away from any engine or platform dependency.

pub mod rng;

// Re-export core types
pub use rng::GameRng;
