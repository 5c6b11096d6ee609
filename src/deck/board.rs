//! The dealt board: an ordered deck of paired cards.

use im::Vector;
use rustc_hash::FxHashMap;
use tracing::trace;

use super::MatchOutcome;
use crate::core::{Card, CardId, CardState, GameError, GameRng, Result, Symbol};

/// An ordered set of paired cards.
///
/// Order is display order. Cards are stored in an `im::Vector`, so
/// `cards_snapshot` is O(1) and never observes later mutations.
///
/// The deck tracks card states and confirmed pairs. Which card is waiting
/// for a partner is controller state and does not live here.
#[derive(Clone, Debug)]
pub struct Deck {
    cards: Vector<Card>,
    index: FxHashMap<CardId, usize>,
    pair_count: usize,
    matched_pairs: usize,
}

impl Deck {
    /// Build an unshuffled deck with two hidden cards per symbol.
    ///
    /// Symbol `i` of `N` yields cards `i` and `i + N`, adjacent in the
    /// initial order.
    pub fn build(symbols: &[Symbol]) -> Result<Self> {
        if symbols.is_empty() {
            return Err(GameError::EmptySymbolSet);
        }

        let pair_count = symbols.len();
        let mut cards = Vector::new();

        for (i, symbol) in symbols.iter().enumerate() {
            if symbols[..i].contains(symbol) {
                return Err(GameError::DuplicateSymbol(symbol.clone()));
            }
            let first = CardId::new(i as u32);
            let second = CardId::new((i + pair_count) as u32);
            cards.push_back(Card::new(first, symbol.clone()));
            cards.push_back(Card::new(second, symbol.clone()));
        }

        let mut deck = Self {
            cards,
            index: FxHashMap::default(),
            pair_count,
            matched_pairs: 0,
        };
        deck.reindex();
        Ok(deck)
    }

    /// Rebuild a deck from cards in display order, as returned by
    /// `cards_snapshot`.
    ///
    /// Every symbol must be on exactly two cards with distinct IDs, and a
    /// pair is either fully matched or not matched at all.
    pub fn from_cards(cards: Vector<Card>) -> Result<Self> {
        if cards.is_empty() {
            return Err(GameError::EmptySymbolSet);
        }

        let mut pairs: FxHashMap<&Symbol, (usize, usize)> = FxHashMap::default();
        for card in &cards {
            let (count, matched) = pairs.entry(&card.symbol).or_default();
            *count += 1;
            if card.state == CardState::Matched {
                *matched += 1;
            }
        }
        if pairs.values().any(|&(count, _)| count != 2) {
            return Err(GameError::CorruptState("every symbol must be on exactly two cards"));
        }
        if pairs.values().any(|&(_, matched)| matched == 1) {
            return Err(GameError::CorruptState("a matched card has an unmatched partner"));
        }
        let pair_count = pairs.len();
        let matched_pairs = pairs.values().filter(|&&(_, matched)| matched == 2).count();

        let mut deck = Self {
            cards,
            index: FxHashMap::default(),
            pair_count,
            matched_pairs,
        };
        deck.reindex();
        if deck.index.len() != deck.cards.len() {
            return Err(GameError::CorruptState("card IDs are not unique"));
        }
        Ok(deck)
    }

    /// Build a deck and shuffle it.
    pub fn shuffled(symbols: &[Symbol], rng: &mut GameRng) -> Result<Self> {
        let mut deck = Self::build(symbols)?;
        deck.shuffle(rng);
        Ok(deck)
    }

    /// Put the cards in a uniformly random order (Fisher–Yates).
    pub fn shuffle(&mut self, rng: &mut GameRng) {
        let mut order: Vec<Card> = self.cards.iter().cloned().collect();
        rng.shuffle(&mut order);
        self.cards = order.into_iter().collect();
        self.reindex();
    }

    fn reindex(&mut self) {
        self.index = self
            .cards
            .iter()
            .enumerate()
            .map(|(position, card)| (card.id, position))
            .collect();
    }

    fn position(&self, id: CardId) -> Result<usize> {
        self.index.get(&id).copied().ok_or(GameError::UnknownCard(id))
    }

    fn card_mut(&mut self, id: CardId) -> Result<&mut Card> {
        let position = self.position(id)?;
        self.cards.get_mut(position).ok_or(GameError::UnknownCard(id))
    }

    /// Compare two face-up cards.
    ///
    /// On a match both cards become `Matched` in this call. On a mismatch
    /// nothing changes; reverting is up to the caller.
    ///
    /// Both cards must exist, be distinct, and be `Showing`.
    pub fn compare(&mut self, a: CardId, b: CardId) -> Result<MatchOutcome> {
        if a == b {
            return Err(GameError::SelfComparison(a));
        }

        let first = self.card(a).ok_or(GameError::UnknownCard(a))?;
        let second = self.card(b).ok_or(GameError::UnknownCard(b))?;

        for card in [first, second] {
            if card.state != CardState::Showing {
                return Err(GameError::CardNotShowing {
                    card: card.id,
                    state: card.state,
                });
            }
        }

        if !first.matches(second) {
            trace!(%a, %b, "cards do not match");
            return Ok(MatchOutcome::Mismatch);
        }

        self.card_mut(a)?.state = CardState::Matched;
        self.card_mut(b)?.state = CardState::Matched;
        self.matched_pairs += 1;
        trace!(%a, %b, matched_pairs = self.matched_pairs, "pair matched");

        Ok(MatchOutcome::Match)
    }

    /// Flip a hidden card face up. This is the only way into `Showing`.
    pub fn reveal(&mut self, id: CardId) -> Result<()> {
        self.transition(id, CardState::Hidden, CardState::Showing)
    }

    /// Flip a showing card back face down.
    pub fn conceal(&mut self, id: CardId) -> Result<()> {
        self.transition(id, CardState::Showing, CardState::Hidden)
    }

    fn transition(&mut self, id: CardId, from: CardState, to: CardState) -> Result<()> {
        let card = self.card_mut(id)?;
        if card.state != from {
            return Err(GameError::InvalidTransition {
                card: id,
                from: card.state,
                to,
            });
        }
        card.state = to;
        Ok(())
    }

    /// Look up a card by ID.
    #[must_use]
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.index.get(&id).and_then(|&position| self.cards.get(position))
    }

    /// Current state of a card, if it exists.
    #[must_use]
    pub fn state(&self, id: CardId) -> Option<CardState> {
        self.card(id).map(|card| card.state)
    }

    /// Cards in display order.
    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.cards.iter()
    }

    /// Card IDs in display order.
    pub fn ids(&self) -> impl Iterator<Item = CardId> + '_ {
        self.cards.iter().map(|card| card.id)
    }

    /// O(1) copy of the card sequence.
    #[must_use]
    pub fn cards_snapshot(&self) -> Vector<Card> {
        self.cards.clone()
    }

    /// Total number of cards (twice the pair count).
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Always false for a built deck.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Number of pairs (the symbol count).
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.pair_count
    }

    /// Pairs confirmed so far.
    #[must_use]
    pub fn matched_pairs(&self) -> usize {
        self.matched_pairs
    }

    /// Have all pairs been found?
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.matched_pairs == self.pair_count
    }
}
