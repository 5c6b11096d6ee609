//! Rendering-side collaborator interface.

use serde::{Deserialize, Serialize};

use super::summary::GameSummary;
use crate::core::{CardId, CardState};

/// Receives state changes from a session.
///
/// Every method defaults to a no-op, so renderers implement only what they
/// draw. The engine never touches presentation; mapping `CardState` to
/// visuals is the observer's job.
pub trait GameObserver {
    /// A new deal is on the table, in display order, all cards hidden.
    fn on_deal(&mut self, _layout: &[CardId]) {}

    /// A card changed state.
    fn on_card_state_changed(&mut self, _card: CardId, _state: CardState) {}

    /// Two cards were confirmed as a pair and are both `Matched`.
    ///
    /// `second` goes from `Hidden` straight to `Matched`; there is no
    /// notification for it showing. The default forwards both cards to
    /// `on_card_state_changed`, back to back.
    fn on_pair_matched(&mut self, first: CardId, second: CardId) {
        self.on_card_state_changed(first, CardState::Matched);
        self.on_card_state_changed(second, CardState::Matched);
    }

    /// The move counter changed.
    fn on_move_count_changed(&mut self, _moves: u32) {}

    /// The game clock changed. `formatted` is `m:ss`.
    fn on_time_changed(&mut self, _formatted: &str) {}

    /// The star rating changed.
    fn on_stars_changed(&mut self, _stars: u8) {}

    /// All pairs were found. Called once per game.
    fn on_game_over(&mut self, _summary: &GameSummary) {}
}

/// Ignores every notification.
impl GameObserver for () {}

/// One recorded notification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum SessionEvent {
    Dealt(Vec<CardId>),
    CardStateChanged { card: CardId, state: CardState },
    PairMatched { first: CardId, second: CardId },
    MoveCountChanged(u32),
    TimeChanged(String),
    StarsChanged(u8),
    GameOver(GameSummary),
}

/// Observer that records notifications for hosts that poll.
///
/// The log is unbounded: a running game adds a `TimeChanged` event every
/// clock tick. Hosts should `drain` it after handling each batch.
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<SessionEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events recorded since the last drain.
    #[must_use]
    pub fn events(&self) -> &[SessionEvent] {
        &self.events
    }

    /// Take all recorded events.
    pub fn drain(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    /// Number of game-over events recorded.
    #[must_use]
    pub fn game_over_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, SessionEvent::GameOver(_)))
            .count()
    }
}

impl GameObserver for EventLog {
    fn on_deal(&mut self, layout: &[CardId]) {
        self.events.push(SessionEvent::Dealt(layout.to_vec()));
    }

    fn on_card_state_changed(&mut self, card: CardId, state: CardState) {
        self.events.push(SessionEvent::CardStateChanged { card, state });
    }

    fn on_pair_matched(&mut self, first: CardId, second: CardId) {
        self.events.push(SessionEvent::PairMatched { first, second });
    }

    fn on_move_count_changed(&mut self, moves: u32) {
        self.events.push(SessionEvent::MoveCountChanged(moves));
    }

    fn on_time_changed(&mut self, formatted: &str) {
        self.events.push(SessionEvent::TimeChanged(formatted.to_string()));
    }

    fn on_stars_changed(&mut self, stars: u8) {
        self.events.push(SessionEvent::StarsChanged(stars));
    }

    fn on_game_over(&mut self, summary: &GameSummary) {
        self.events.push(SessionEvent::GameOver(summary.clone()));
    }
}
