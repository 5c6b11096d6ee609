//! A single player's game session.

use std::time::Duration;

use smallvec::SmallVec;
use tracing::{debug, info, trace};

use super::observer::{EventLog, GameObserver};
use super::summary::{GameSnapshot, GameSummary};
use crate::controller::{Selection, TurnPhase, TurnResolver};
use crate::core::{CardId, CardState, GameConfig, GameError, GameRng, Result};
use crate::deck::Deck;
use crate::scoring::Scoreboard;
use crate::timer::{millis, TimerId, TimerQueue};

/// Timers a session schedules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SessionTimer {
    /// Repeating game clock.
    ClockTick,
    /// End of a mismatch reveal window opened in game `generation`.
    RevealElapsed { generation: u64 },
}

/// Owns everything for one player's game: deck, controller, scoreboard,
/// timers, RNG and the observer that renders it.
///
/// Input arrives through `select` and `reset`. Time moves only through
/// `advance`. All state changes happen synchronously inside those calls.
#[derive(Debug)]
pub struct GameSession<O: GameObserver = EventLog> {
    config: GameConfig,
    rng: GameRng,
    deck: Deck,
    resolver: TurnResolver,
    scoreboard: Scoreboard,
    timers: TimerQueue<SessionTimer>,
    clock: Option<TimerId>,
    reveal: Option<TimerId>,
    generation: u64,
    summary: Option<GameSummary>,
    observer: O,
}

impl GameSession<EventLog> {
    /// Create a session that records notifications in an `EventLog`.
    ///
    /// The log grows with every notification, including one per clock
    /// tick, until the host drains it through `observer_mut`.
    pub fn with_event_log(config: GameConfig, seed: u64) -> Result<Self> {
        Self::new(config, seed, EventLog::new())
    }
}

impl<O: GameObserver> GameSession<O> {
    /// Validate the config, deal a shuffled deck and start the clock.
    pub fn new(config: GameConfig, seed: u64, observer: O) -> Result<Self> {
        config.validate()?;

        let mut rng = GameRng::new(seed).for_context("deal");
        let deck = Deck::shuffled(&config.symbols, &mut rng)?;
        let scoreboard = Scoreboard::new(config.star_rule.build());

        let mut session = Self {
            config,
            rng,
            deck,
            resolver: TurnResolver::new(),
            scoreboard,
            timers: TimerQueue::new(),
            clock: None,
            reveal: None,
            generation: 0,
            summary: None,
            observer,
        };
        session.start_game();
        Ok(session)
    }

    fn start_game(&mut self) {
        self.generation += 1;
        self.scoreboard.start_game();
        self.clock = Some(
            self.timers
                .schedule_repeating(self.config.clock_interval(), SessionTimer::ClockTick),
        );

        info!(
            generation = self.generation,
            pairs = self.deck.pair_count(),
            "game started"
        );
        self.announce();
    }

    /// Tell the observer everything it needs to draw the current game.
    fn announce(&mut self) {
        let layout: SmallVec<[CardId; 16]> = self.deck.ids().collect();
        self.observer.on_deal(&layout);
        for card in self.deck.cards() {
            if !card.state.is_selectable() {
                self.observer.on_card_state_changed(card.id, card.state);
            }
        }
        self.observer.on_move_count_changed(self.scoreboard.moves());
        self.observer.on_time_changed(&self.scoreboard.formatted_time());
        self.observer.on_stars_changed(self.scoreboard.stars());
    }

    /// Rebuild a session from a `snapshot` taken under the same `config`.
    ///
    /// The clock and any open reveal window resume at their captured due
    /// times, so the restored session plays on exactly as the original
    /// would. The observer receives the deal and every face-up card.
    pub fn restore(config: GameConfig, snapshot: &GameSnapshot, observer: O) -> Result<Self> {
        config.validate()?;

        let deck = Deck::from_cards(snapshot.cards.clone())?;
        let same_symbols = deck.pair_count() == config.pair_count()
            && config
                .symbols
                .iter()
                .all(|symbol| deck.cards().any(|card| &card.symbol == symbol));
        if !same_symbols {
            return Err(GameError::CorruptState("deck symbols differ from the config"));
        }

        let resolver = TurnResolver::restore(snapshot.phase, &deck)?;
        let scoreboard = Scoreboard::from_counters(config.star_rule.build(), snapshot.score);
        if scoreboard.matches() as usize != deck.matched_pairs() {
            return Err(GameError::CorruptState("match counter disagrees with the deck"));
        }

        let game_over = resolver.is_game_over();
        if scoreboard.is_running() == game_over || scoreboard.is_running() != snapshot.clock_due_ms.is_some() {
            return Err(GameError::CorruptState("clock state does not fit the turn phase"));
        }
        let resolving = matches!(snapshot.phase, TurnPhase::Resolving { .. });
        if resolving != snapshot.reveal_due_ms.is_some() {
            return Err(GameError::CorruptState("reveal window does not fit the turn phase"));
        }

        let mut timers = TimerQueue::starting_at(snapshot.now_ms);
        let clock = snapshot.clock_due_ms.map(|due_ms| {
            timers.schedule_repeating_at(due_ms, config.clock_interval(), SessionTimer::ClockTick)
        });
        let reveal = snapshot.reveal_due_ms.map(|due_ms| {
            timers.schedule_once_at(
                due_ms,
                SessionTimer::RevealElapsed {
                    generation: snapshot.generation,
                },
            )
        });
        let summary = game_over.then(|| GameSummary::from_scoreboard(&scoreboard, &config.rank_table));

        let mut session = Self {
            config,
            rng: GameRng::from_state(&snapshot.rng),
            deck,
            resolver,
            scoreboard,
            timers,
            clock,
            reveal,
            generation: snapshot.generation,
            summary,
            observer,
        };

        info!(
            generation = session.generation,
            now_ms = session.timers.now_ms(),
            phase = ?session.resolver.phase(),
            "game restored"
        );
        session.announce();
        Ok(session)
    }

    /// Discard the current game and deal a new one.
    ///
    /// Cancels the clock and any pending reveal first, so nothing scheduled
    /// for the old deck can fire against the new one.
    pub fn reset(&mut self) -> Result<()> {
        self.timers.clear();
        self.clock = None;
        self.reveal = None;

        self.deck = Deck::shuffled(&self.config.symbols, &mut self.rng)?;
        self.resolver = TurnResolver::new();
        self.summary = None;

        debug!(previous = self.generation, "game reset");
        self.start_game();
        Ok(())
    }

    /// Handle a card selection from the player.
    pub fn select(&mut self, card: CardId) -> Result<Selection> {
        let stars_before = self.scoreboard.stars();
        let selection = self
            .resolver
            .select(&mut self.deck, &mut self.scoreboard, card)?;

        match selection {
            Selection::Rejected(_) => return Ok(selection),
            Selection::Flipped(card) => {
                self.observer.on_card_state_changed(card, CardState::Showing);
            }
            Selection::Matched { first, second, .. } => {
                self.observer.on_pair_matched(first, second);
            }
            Selection::Mismatched { second, .. } => {
                self.observer.on_card_state_changed(second, CardState::Showing);
                self.reveal = Some(self.timers.schedule_once(
                    self.config.reveal_delay(),
                    SessionTimer::RevealElapsed {
                        generation: self.generation,
                    },
                ));
            }
        }

        if selection.completes_turn() {
            self.observer.on_move_count_changed(self.scoreboard.moves());
            if self.scoreboard.stars() != stars_before {
                self.observer.on_stars_changed(self.scoreboard.stars());
            }
        }

        if let Selection::Matched { game_over: true, .. } = selection {
            self.finish_game();
        }

        Ok(selection)
    }

    fn finish_game(&mut self) {
        if let Some(clock) = self.clock.take() {
            self.timers.cancel(clock);
        }

        let summary = GameSummary::from_scoreboard(&self.scoreboard, &self.config.rank_table);
        info!(
            generation = self.generation,
            moves = summary.moves,
            duration = %summary.duration,
            rank = %summary.rank,
            stars = summary.stars,
            "game over"
        );
        self.observer.on_game_over(&summary);
        self.summary = Some(summary);
    }

    /// Move virtual time forward, firing due timers in order.
    ///
    /// Clock ticks with no other timer between them are counted together
    /// and reported once, with the latest time. Virtual time saturates at
    /// `u64::MAX` milliseconds.
    pub fn advance(&mut self, by: Duration) -> Result<()> {
        let until = self.timers.now_ms().saturating_add(millis(by));

        while let Some(fired) = self.timers.pop_due(until) {
            match fired.kind {
                SessionTimer::ClockTick => {
                    let ticks = self.timers.skip_repeats(fired.id, until).saturating_add(1);
                    if self.scoreboard.tick_by(ticks) {
                        let formatted = self.scoreboard.formatted_time();
                        trace!(at_ms = fired.at_ms, ticks, elapsed = %formatted, "clock tick");
                        self.observer.on_time_changed(&formatted);
                    }
                }
                SessionTimer::RevealElapsed { generation } => {
                    self.reveal = None;
                    if generation != self.generation {
                        debug!(stale = generation, current = self.generation, "stale reveal ignored");
                        continue;
                    }
                    if let Some((first, second)) = self.resolver.finish_reveal(&mut self.deck)? {
                        debug!(%first, %second, "mismatched pair hidden");
                        self.observer.on_card_state_changed(first, CardState::Hidden);
                        self.observer.on_card_state_changed(second, CardState::Hidden);
                    }
                }
            }
        }

        self.timers.advance_to(until);
        Ok(())
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    #[must_use]
    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    #[must_use]
    pub fn phase(&self) -> TurnPhase {
        self.resolver.phase()
    }

    /// The card waiting for a partner, if any.
    #[must_use]
    pub fn pending(&self) -> Option<CardId> {
        self.resolver.pending()
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.resolver.is_game_over()
    }

    /// Is a mismatch reveal window open?
    #[must_use]
    pub fn is_revealing(&self) -> bool {
        self.reveal.is_some_and(|id| self.timers.is_pending(id))
    }

    /// Is the game clock scheduled?
    #[must_use]
    pub fn is_clock_running(&self) -> bool {
        self.clock.is_some_and(|id| self.timers.is_pending(id))
    }

    /// Current rank label.
    #[must_use]
    pub fn rank(&self) -> &str {
        self.scoreboard.compute_rank(&self.config.rank_table)
    }

    /// Summary of the finished game, once all pairs are found.
    #[must_use]
    pub fn summary(&self) -> Option<&GameSummary> {
        self.summary.as_ref()
    }

    /// Games started by this session, including the current one.
    ///
    /// Reveal timers carry the generation they were opened in and are
    /// ignored if it no longer matches.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Virtual time since the session was created.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.timers.now()
    }

    #[must_use]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Capture the current state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            generation: self.generation,
            cards: self.deck.cards_snapshot(),
            phase: self.resolver.phase(),
            score: self.scoreboard.counters(),
            now_ms: self.timers.now_ms(),
            clock_due_ms: self.clock.and_then(|id| self.timers.due_ms(id)),
            reveal_due_ms: self.reveal.and_then(|id| self.timers.due_ms(id)),
            rng: self.rng.state(),
        }
    }
}
