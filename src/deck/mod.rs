//! Deck of paired cards.
//!
//! The deck owns the cards, their pairing, shuffling and match
//! bookkeeping. A deck is built fresh for every game and replaced, not
//! mutated back, on reset.
//!
//! ```
//! use memory_match::core::{CardId, GameRng, Symbol};
//! use memory_match::deck::{Deck, MatchOutcome};
//!
//! let symbols = vec![Symbol::new("anchor"), Symbol::new("bolt")];
//! let mut deck = Deck::shuffled(&symbols, &mut GameRng::new(1)).unwrap();
//!
//! // Cards 0 and 2 are the two "anchor" cards.
//! deck.reveal(CardId::new(0)).unwrap();
//! deck.reveal(CardId::new(2)).unwrap();
//! assert_eq!(deck.compare(CardId::new(0), CardId::new(2)).unwrap(), MatchOutcome::Match);
//! ```

mod board;

pub use board::Deck;

use serde::{Deserialize, Serialize};

/// Result of comparing two face-up cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MatchOutcome {
    /// Same symbol. Both cards are now matched.
    Match,
    /// Different symbols.
    Mismatch,
}

impl MatchOutcome {
    /// Was this a match?
    #[must_use]
    pub const fn is_match(self) -> bool {
        matches!(self, MatchOutcome::Match)
    }
}
