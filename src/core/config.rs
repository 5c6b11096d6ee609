//! Game configuration.
//!
//! A `GameConfig` fixes everything a session needs before the first deal:
//! - The symbol alphabet (one pair per symbol)
//! - The reveal delay for mismatched pairs
//! - The clock tick interval
//! - The rank table and star rule used for scoring
//!
//! Configs are plain data. They can be built in code with the `with_*`
//! methods or parsed from JSON, where missing fields take their defaults.

use std::collections::HashSet;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::card::Symbol;
use super::error::{GameError, Result};
use crate::scoring::{RankTable, StarRule};
use crate::timer::millis;

/// The eight symbols of the classic board.
pub const DEFAULT_SYMBOLS: [&str; 8] = [
    "anchor",
    "bicycle",
    "bolt",
    "bomb",
    "cube",
    "diamond",
    "leaf",
    "paper-plane-o",
];

/// How long a mismatched pair stays face up.
pub const DEFAULT_REVEAL_DELAY_MS: u64 = 600;

/// Game clock granularity.
pub const DEFAULT_CLOCK_INTERVAL_MS: u64 = 1000;

/// Complete session configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Distinct symbols; the deck holds two cards per symbol.
    pub symbols: Vec<Symbol>,

    /// Milliseconds a mismatched pair stays visible before flipping back.
    pub reveal_delay_ms: u64,

    /// Milliseconds between clock ticks. Each tick adds one second.
    pub clock_interval_ms: u64,

    /// Rank tiers for the end-of-game summary.
    pub rank_table: RankTable,

    /// Star rating policy.
    pub star_rule: StarRule,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            symbols: DEFAULT_SYMBOLS.iter().map(|&s| Symbol::new(s)).collect(),
            reveal_delay_ms: DEFAULT_REVEAL_DELAY_MS,
            clock_interval_ms: DEFAULT_CLOCK_INTERVAL_MS,
            rank_table: RankTable::default(),
            star_rule: StarRule::default(),
        }
    }
}

impl GameConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from JSON and validate it.
    pub fn from_json(text: &str) -> Result<Self> {
        let config: GameConfig = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the symbol alphabet.
    #[must_use]
    pub fn with_symbols<I, S>(mut self, symbols: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<Symbol>,
    {
        self.symbols = symbols.into_iter().map(Into::into).collect();
        self
    }

    /// Set the mismatch reveal delay.
    #[must_use]
    pub fn with_reveal_delay(mut self, delay: Duration) -> Self {
        self.reveal_delay_ms = millis(delay);
        self
    }

    /// Set the clock tick interval.
    #[must_use]
    pub fn with_clock_interval(mut self, interval: Duration) -> Self {
        self.clock_interval_ms = millis(interval);
        self
    }

    /// Set the rank table.
    #[must_use]
    pub fn with_rank_table(mut self, table: RankTable) -> Self {
        self.rank_table = table;
        self
    }

    /// Set the star rule.
    #[must_use]
    pub fn with_star_rule(mut self, rule: StarRule) -> Self {
        self.star_rule = rule;
        self
    }

    /// Number of pairs in a deck built from this config.
    #[must_use]
    pub fn pair_count(&self) -> usize {
        self.symbols.len()
    }

    /// Reveal delay as a `Duration`.
    #[must_use]
    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }

    /// Clock interval as a `Duration`.
    #[must_use]
    pub fn clock_interval(&self) -> Duration {
        Duration::from_millis(self.clock_interval_ms)
    }

    /// Check the config for fatal problems.
    pub fn validate(&self) -> Result<()> {
        if self.symbols.is_empty() {
            return Err(GameError::EmptySymbolSet);
        }

        let mut seen = HashSet::with_capacity(self.symbols.len());
        for symbol in &self.symbols {
            if !seen.insert(symbol) {
                return Err(GameError::DuplicateSymbol(symbol.clone()));
            }
        }

        if self.reveal_delay_ms == 0 || self.clock_interval_ms == 0 {
            return Err(GameError::ZeroInterval);
        }

        self.rank_table.validate()
    }
}
