//! Two-card turn resolution.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};
use tracing::debug;

use crate::core::{CardId, CardState, GameError, Result};
use crate::deck::{Deck, MatchOutcome};
use crate::scoring::Scoreboard;

/// Controller phase.
///
/// ```text
/// Idle ──select──▶ OneFlipped ──select (match)────▶ Idle | GameOver
///                      │
///                      └──select (mismatch)──▶ Resolving ──reveal elapsed──▶ Idle
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    /// No card waiting. Accepting input.
    #[default]
    Idle,
    /// One card face up, waiting for a second, distinct card.
    OneFlipped { pending: CardId },
    /// A mismatched pair is on display. Input is blocked.
    Resolving { first: CardId, second: CardId },
    /// Every pair found. Input is ignored until reset.
    GameOver,
}

/// Why a selection was ignored.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RejectReason {
    /// The game has ended.
    GameOver,
    /// A mismatched pair is still on display.
    InputBlocked,
    /// No such card in the deck.
    UnknownCard,
    /// The card is already part of a pair.
    AlreadyMatched,
    /// The card is the one already waiting for a partner.
    AlreadyPending,
}

/// What a selection did.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Selection {
    /// Ignored. No state or counter changed.
    Rejected(RejectReason),
    /// First card of a turn flipped face up.
    Flipped(CardId),
    /// Second card matched the first. Both are now `Matched`.
    Matched {
        first: CardId,
        second: CardId,
        game_over: bool,
    },
    /// Second card did not match. Both stay `Showing` until the reveal
    /// delay ends.
    Mismatched { first: CardId, second: CardId },
}

impl Selection {
    /// Did the selection complete a turn (count a move)?
    #[must_use]
    pub const fn completes_turn(&self) -> bool {
        matches!(self, Selection::Matched { .. } | Selection::Mismatched { .. })
    }

    #[must_use]
    pub const fn is_rejected(&self) -> bool {
        matches!(self, Selection::Rejected(_))
    }
}

/// Finite-state machine for the two-card comparison protocol.
///
/// The resolver holds only the phase. It acts on a `Deck` and a
/// `Scoreboard` passed in by the owner, and never schedules anything
/// itself: after a `Mismatched` selection the owner waits out the reveal
/// delay and then calls `finish_reveal`.
#[derive(Clone, Debug, Default)]
pub struct TurnResolver {
    phase: TurnPhase,
}

impl TurnResolver {
    /// Create a resolver in `Idle`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume in a saved phase.
    ///
    /// The deck's face-up cards must be exactly the ones the phase holds,
    /// and `GameOver` must coincide with a cleared deck.
    pub fn restore(phase: TurnPhase, deck: &Deck) -> Result<Self> {
        let mut showing: SmallVec<[CardId; 2]> = deck
            .cards()
            .filter(|card| card.state == CardState::Showing)
            .map(|card| card.id)
            .collect();
        let mut expected: SmallVec<[CardId; 2]> = match phase {
            TurnPhase::Idle | TurnPhase::GameOver => smallvec![],
            TurnPhase::OneFlipped { pending } => smallvec![pending],
            TurnPhase::Resolving { first, second } => smallvec![first, second],
        };
        showing.sort_unstable();
        expected.sort_unstable();

        if showing != expected {
            return Err(GameError::CorruptState("face-up cards do not fit the turn phase"));
        }
        if (phase == TurnPhase::GameOver) != deck.is_complete() {
            return Err(GameError::CorruptState("game-over phase does not fit the deck"));
        }
        Ok(Self { phase })
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// The card waiting for a partner, if any.
    #[must_use]
    pub fn pending(&self) -> Option<CardId> {
        match self.phase {
            TurnPhase::OneFlipped { pending } => Some(pending),
            _ => None,
        }
    }

    /// Are selections currently accepted?
    #[must_use]
    pub fn accepts_input(&self) -> bool {
        matches!(self.phase, TurnPhase::Idle | TurnPhase::OneFlipped { .. })
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase == TurnPhase::GameOver
    }

    fn check(&self, deck: &Deck, card: CardId) -> Option<RejectReason> {
        match self.phase {
            TurnPhase::GameOver => return Some(RejectReason::GameOver),
            TurnPhase::Resolving { .. } => return Some(RejectReason::InputBlocked),
            TurnPhase::OneFlipped { pending } if pending == card => {
                return Some(RejectReason::AlreadyPending)
            }
            _ => {}
        }

        match deck.state(card) {
            None => Some(RejectReason::UnknownCard),
            Some(state) if state.is_selectable() => None,
            Some(CardState::Matched) => Some(RejectReason::AlreadyMatched),
            Some(_) => Some(RejectReason::AlreadyPending),
        }
    }

    /// Handle a card selection.
    ///
    /// Rejected selections change nothing. Otherwise the card flips face
    /// up, and if it is the second card of a turn the move is counted and
    /// the pair compared.
    pub fn select(
        &mut self,
        deck: &mut Deck,
        scoreboard: &mut Scoreboard,
        card: CardId,
    ) -> Result<Selection> {
        if let Some(reason) = self.check(deck, card) {
            debug!(%card, ?reason, "selection rejected");
            return Ok(Selection::Rejected(reason));
        }

        deck.reveal(card)?;

        let TurnPhase::OneFlipped { pending } = self.phase else {
            self.phase = TurnPhase::OneFlipped { pending: card };
            return Ok(Selection::Flipped(card));
        };

        scoreboard.record_move();

        match deck.compare(card, pending)? {
            MatchOutcome::Match => {
                scoreboard.record_match();
                let game_over = deck.is_complete();
                if game_over {
                    scoreboard.stop_game();
                    self.phase = TurnPhase::GameOver;
                } else {
                    self.phase = TurnPhase::Idle;
                }
                debug!(first = %pending, second = %card, moves = scoreboard.moves(), game_over, "pair matched");
                Ok(Selection::Matched {
                    first: pending,
                    second: card,
                    game_over,
                })
            }
            MatchOutcome::Mismatch => {
                self.phase = TurnPhase::Resolving {
                    first: pending,
                    second: card,
                };
                debug!(first = %pending, second = %card, moves = scoreboard.moves(), "pair mismatched");
                Ok(Selection::Mismatched {
                    first: pending,
                    second: card,
                })
            }
        }
    }

    /// End the reveal window: flip the mismatched pair back face down and
    /// accept input again.
    ///
    /// Returns the concealed pair, or `None` if nothing was resolving.
    pub fn finish_reveal(&mut self, deck: &mut Deck) -> Result<Option<(CardId, CardId)>> {
        let TurnPhase::Resolving { first, second } = self.phase else {
            return Ok(None);
        };

        deck.conceal(first)?;
        deck.conceal(second)?;
        self.phase = TurnPhase::Idle;
        Ok(Some((first, second)))
    }
}
