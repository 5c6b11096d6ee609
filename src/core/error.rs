//! Engine error type.
//!
//! Rejected selections are not errors (see `controller::Selection`). These
//! variants cover fatal configuration problems, deck precondition
//! violations and snapshots that cannot be restored.

use super::card::{CardId, CardState, Symbol};

/// Errors produced by the engine.
#[derive(Debug, thiserror::Error)]
pub enum GameError {
    /// A deck needs at least one symbol.
    #[error("symbol set is empty, nothing to play")]
    EmptySymbolSet,

    /// Each symbol may appear once in the set; the deck doubles it.
    #[error("symbol `{0}` appears more than once in the symbol set")]
    DuplicateSymbol(Symbol),

    /// The card ID is not part of this deck.
    #[error("unknown card: {0}")]
    UnknownCard(CardId),

    /// A card was compared against itself.
    #[error("cannot compare {0} with itself")]
    SelfComparison(CardId),

    /// A comparison needs both cards face up.
    #[error("{card} is {state:?}, expected Showing")]
    CardNotShowing { card: CardId, state: CardState },

    /// A state transition the card machine does not allow.
    #[error("{card} cannot move from {from:?} to {to:?}")]
    InvalidTransition {
        card: CardId,
        from: CardState,
        to: CardState,
    },

    /// Rank tiers must be listed in descending threshold order.
    #[error("rank tiers must be ordered by descending threshold (tier {index} is out of order)")]
    UnorderedRankTable { index: usize },

    /// Timers need a positive interval.
    #[error("reveal delay and clock interval must be greater than zero")]
    ZeroInterval,

    /// Saved state that cannot describe a real game.
    #[error("inconsistent game state: {0}")]
    CorruptState(&'static str),

    /// Configuration text could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    /// Snapshot encoding failed.
    #[error("snapshot encoding failed: {0}")]
    Snapshot(#[from] bincode::Error),
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, GameError>;
