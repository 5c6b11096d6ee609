//! End-of-game summary and session snapshots.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::controller::TurnPhase;
use crate::core::{Card, GameRngState, Result};
use crate::scoring::{RankTable, ScoreCounters, Scoreboard};

/// Final score reported when the last pair is found.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub moves: u32,
    /// Elapsed time as `m:ss`.
    pub duration: String,
    pub elapsed_seconds: u64,
    pub matches: u32,
    pub rank: String,
    pub stars: u8,
}

impl GameSummary {
    /// Summarize the scoreboard's current counters.
    #[must_use]
    pub fn from_scoreboard(scoreboard: &Scoreboard, table: &RankTable) -> Self {
        Self {
            moves: scoreboard.moves(),
            duration: scoreboard.formatted_time(),
            elapsed_seconds: scoreboard.elapsed_seconds(),
            matches: scoreboard.matches(),
            rank: scoreboard.compute_rank(table).to_string(),
            stars: scoreboard.stars(),
        }
    }
}

/// Point-in-time copy of a session, for in-memory save slots.
///
/// Holds everything `GameSession::restore` needs to continue the game,
/// including pending timers as absolute due times. The config is not
/// part of the snapshot; restore under the same config.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    /// Games started by this session, including the current one.
    pub generation: u64,
    /// Cards in display order.
    pub cards: Vector<Card>,
    pub phase: TurnPhase,
    pub score: ScoreCounters,
    /// Virtual clock in milliseconds.
    pub now_ms: u64,
    /// Next clock tick, while the clock runs.
    pub clock_due_ms: Option<u64>,
    /// End of the open reveal window, while a mismatch is on display.
    pub reveal_due_ms: Option<u64>,
    pub rng: GameRngState,
}

impl GameSnapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode from bincode.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}
