//! Cards and their visibility state.
//!
//! A `Card` pairs a stable `CardId` with a `Symbol`. Two cards in a deck
//! carry each symbol. The `CardState` machine is:
//!
//! ```text
//! Hidden ──reveal──▶ Showing ──match──▶ Matched (terminal)
//!    ▲                  │
//!    └─────conceal──────┘
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card within one deck.
///
/// IDs are dense: a deck of N symbols uses `0..2N`. The two cards of
/// symbol `i` get IDs `i` and `i + N`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u32);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// The face of a card. Two cards match when their symbols are equal.
///
/// Symbols are opaque tokens; the renderer decides what they look like.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Symbol(pub String);

impl Symbol {
    /// Create a symbol from any string-like token.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// The symbol token.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Symbol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Symbol {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

/// Visibility and match status of a card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardState {
    /// Face down. Initial state.
    #[default]
    Hidden,
    /// Face up, waiting to be compared or reverted.
    Showing,
    /// Part of a confirmed pair. Terminal.
    Matched,
}

impl CardState {
    /// Can a selection flip this card face up?
    #[must_use]
    pub const fn is_selectable(self) -> bool {
        matches!(self, CardState::Hidden)
    }
}

/// A card in a deck.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    /// Unique ID within the deck.
    pub id: CardId,

    /// The face symbol.
    pub symbol: Symbol,

    /// Current visibility state.
    pub state: CardState,
}

impl Card {
    /// Create a face-down card.
    #[must_use]
    pub fn new(id: CardId, symbol: Symbol) -> Self {
        Self {
            id,
            symbol,
            state: CardState::Hidden,
        }
    }

    /// Do the two cards carry the same symbol?
    #[must_use]
    pub fn matches(&self, other: &Card) -> bool {
        self.symbol == other.symbol
    }
}
