//! # memory-match
//!
//! Game-state engine for a card-matching memory game.
//!
//! A grid of face-down cards is dealt. The player flips two at a time:
//! matching pairs stay face up, mismatches flip back after a short reveal
//! window. A scoreboard tracks moves, elapsed time, a rank and a star
//! rating.
//!
//! ## Design Principles
//!
//! 1. **Presentation-free**: The engine never draws anything. Renderers
//!    implement `GameObserver` and map `CardState` to visuals.
//!
//! 2. **Explicit ownership**: A `GameSession` owns its deck, controller,
//!    scoreboard, RNG and timers. No globals.
//!
//! 3. **Virtual time**: Timers are owned, cancellable values on a clock the
//!    host drives with `GameSession::advance`. Tests run instantly and
//!    deterministically.
//!
//! 4. **Configuration over convention**: Symbols, reveal delay, rank tiers
//!    and star policy all come from `GameConfig`.
//!
//! ## Modules
//!
//! - `core`: Cards, RNG, configuration, errors
//! - `deck`: Paired cards, shuffling, comparison
//! - `controller`: Two-card turn state machine
//! - `scoring`: Scoreboard, rank table, star policies
//! - `timer`: Virtual-clock timer queue
//! - `session`: `GameSession`, observer interface, summaries

pub mod core;
pub mod deck;
pub mod controller;
pub mod scoring;
pub mod timer;
pub mod session;

// Re-export commonly used types
pub use crate::core::{
    Card, CardId, CardState, Symbol,
    GameConfig, GameError, GameRng, GameRngState,
};

pub use crate::deck::{Deck, MatchOutcome};

pub use crate::controller::{RejectReason, Selection, TurnPhase, TurnResolver};

pub use crate::scoring::{
    format_duration, RankTable, RankTier, ScoreCounters, Scoreboard,
    StarPolicy, StarRule, NoPenalty, RatioPenalty,
};

pub use crate::timer::{TimerId, TimerQueue};

pub use crate::session::{
    EventLog, GameObserver, GameSession, GameSnapshot, GameSummary, SessionEvent,
};
