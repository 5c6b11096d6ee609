//! Scoring: counters, game clock, rank and star rating.
//!
//! The rank is derived from `matches / moves` through a configurable
//! `RankTable`. The star rating is a separate, pluggable `StarPolicy`.
//! Neither is privileged; sessions report both.

mod rank;
mod scoreboard;
mod stars;

pub use rank::{match_ratio, RankTable, RankTier};
pub use scoreboard::{format_duration, ScoreCounters, Scoreboard};
pub use stars::{NoPenalty, RatioPenalty, StarPolicy, StarRule};
