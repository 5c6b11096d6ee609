//! Core engine types: cards, RNG, configuration, errors.
//!
//! These are the building blocks shared by the deck, controller, scoring
//! and session modules.

pub mod card;
pub mod config;
pub mod error;
pub mod rng;

pub use card::{Card, CardId, CardState, Symbol};
pub use config::{GameConfig, DEFAULT_CLOCK_INTERVAL_MS, DEFAULT_REVEAL_DELAY_MS, DEFAULT_SYMBOLS};
pub use error::{GameError, Result};
pub use rng::{GameRng, GameRngState};
