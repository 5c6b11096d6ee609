//! Move, match and clock counters for one game.

use serde::{Deserialize, Serialize};

use super::rank::{match_ratio, RankTable};
use super::stars::StarPolicy;

/// Format seconds as `m:ss`.
///
/// ```
/// use memory_match::scoring::format_duration;
///
/// assert_eq!(format_duration(65), "1:05");
/// assert_eq!(format_duration(600), "10:00");
/// ```
#[must_use]
pub fn format_duration(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Plain copy of a scoreboard's counters, for snapshots.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreCounters {
    pub moves: u32,
    pub matches: u32,
    pub elapsed_seconds: u64,
    pub stars: u8,
    pub running: bool,
}

/// Counters and star rating for a single game.
///
/// The scoreboard knows nothing about timers. The session calls `tick`
/// on every clock firing; ticks only count while the game is running.
#[derive(Debug)]
pub struct Scoreboard {
    moves: u32,
    matches: u32,
    elapsed_seconds: u64,
    stars: u8,
    running: bool,
    star_policy: Box<dyn StarPolicy>,
}

impl Scoreboard {
    /// Create a stopped scoreboard using the given star policy.
    pub fn new(star_policy: Box<dyn StarPolicy>) -> Self {
        let stars = star_policy.initial_stars();
        Self {
            moves: 0,
            matches: 0,
            elapsed_seconds: 0,
            stars,
            running: false,
            star_policy,
        }
    }

    /// Resume from saved counters under the given star policy.
    pub fn from_counters(star_policy: Box<dyn StarPolicy>, counters: ScoreCounters) -> Self {
        Self {
            moves: counters.moves,
            matches: counters.matches,
            elapsed_seconds: counters.elapsed_seconds,
            stars: counters.stars,
            running: counters.running,
            star_policy,
        }
    }

    /// Copy of the current counters.
    #[must_use]
    pub fn counters(&self) -> ScoreCounters {
        ScoreCounters {
            moves: self.moves,
            matches: self.matches,
            elapsed_seconds: self.elapsed_seconds,
            stars: self.stars,
            running: self.running,
        }
    }

    /// Zero all counters and start the clock.
    pub fn start_game(&mut self) {
        self.moves = 0;
        self.matches = 0;
        self.elapsed_seconds = 0;
        self.stars = self.star_policy.initial_stars();
        self.running = true;
    }

    /// Stop the clock. Counters are frozen from here on.
    pub fn stop_game(&mut self) {
        self.running = false;
    }

    /// Advance the clock by one second. Returns whether it counted.
    pub fn tick(&mut self) -> bool {
        self.tick_by(1)
    }

    /// Advance the clock by `seconds` at once. Returns whether it counted.
    pub fn tick_by(&mut self, seconds: u64) -> bool {
        if self.running {
            self.elapsed_seconds = self.elapsed_seconds.saturating_add(seconds);
        }
        self.running
    }

    /// Count a completed comparison and apply the star policy.
    pub fn record_move(&mut self) {
        if !self.running {
            return;
        }
        self.moves += 1;
        self.stars = self
            .star_policy
            .stars_after_move(self.stars, self.moves, self.matches);
    }

    /// Count a confirmed pair.
    pub fn record_match(&mut self) {
        if !self.running {
            return;
        }
        self.matches += 1;
    }

    #[must_use]
    pub fn moves(&self) -> u32 {
        self.moves
    }

    #[must_use]
    pub fn matches(&self) -> u32 {
        self.matches
    }

    #[must_use]
    pub fn elapsed_seconds(&self) -> u64 {
        self.elapsed_seconds
    }

    #[must_use]
    pub fn stars(&self) -> u8 {
        self.stars
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// `matches / moves`, or `None` before the first move.
    #[must_use]
    pub fn match_ratio(&self) -> Option<f64> {
        match_ratio(self.moves, self.matches)
    }

    /// Elapsed time as `m:ss`.
    #[must_use]
    pub fn formatted_time(&self) -> String {
        format_duration(self.elapsed_seconds)
    }

    /// Rank label under the given table.
    #[must_use]
    pub fn compute_rank<'t>(&self, table: &'t RankTable) -> &'t str {
        table.rank(self.moves, self.matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::{NoPenalty, RatioPenalty};

    fn scoreboard() -> Scoreboard {
        Scoreboard::new(Box::new(NoPenalty::default()))
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(0), "0:00");
        assert_eq!(format_duration(5), "0:05");
        assert_eq!(format_duration(65), "1:05");
        assert_eq!(format_duration(600), "10:00");
        assert_eq!(format_duration(3599), "59:59");
        assert_eq!(format_duration(3600), "60:00");
    }

    #[test]
    fn test_start_resets_counters() {
        let mut board = scoreboard();
        board.start_game();
        board.record_move();
        board.record_match();
        board.tick();

        board.start_game();
        assert_eq!(board.moves(), 0);
        assert_eq!(board.matches(), 0);
        assert_eq!(board.elapsed_seconds(), 0);
        assert!(board.is_running());
    }

    #[test]
    fn test_tick_only_while_running() {
        let mut board = scoreboard();
        assert!(!board.tick());
        assert_eq!(board.elapsed_seconds(), 0);

        board.start_game();
        for _ in 0..65 {
            assert!(board.tick());
        }
        assert_eq!(board.formatted_time(), "1:05");

        board.stop_game();
        assert!(!board.tick());
        assert_eq!(board.elapsed_seconds(), 65);
    }

    #[test]
    fn test_tick_by_saturates() {
        let mut board = scoreboard();
        board.start_game();
        assert!(board.tick_by(90));
        assert_eq!(board.formatted_time(), "1:30");

        board.tick_by(u64::MAX);
        assert_eq!(board.elapsed_seconds(), u64::MAX);
    }

    #[test]
    fn test_counters_roundtrip() {
        let mut board = Scoreboard::new(Box::new(RatioPenalty::default()));
        board.start_game();
        for _ in 0..8 {
            board.record_move();
        }
        board.record_match();
        board.tick_by(12);

        let counters = board.counters();
        let resumed = Scoreboard::from_counters(Box::new(RatioPenalty::default()), counters);
        assert_eq!(resumed.moves(), 8);
        assert_eq!(resumed.matches(), 1);
        assert_eq!(resumed.elapsed_seconds(), 12);
        assert_eq!(resumed.stars(), 2);
        assert!(resumed.is_running());
        assert_eq!(resumed.counters(), counters);
    }

    #[test]
    fn test_counters_frozen_after_stop() {
        let mut board = scoreboard();
        board.start_game();
        board.record_move();
        board.stop_game();
        board.record_move();
        board.record_match();
        assert_eq!(board.moves(), 1);
        assert_eq!(board.matches(), 0);
    }

    #[test]
    fn test_rank_uses_ratio() {
        let table = RankTable::default();
        let mut board = scoreboard();
        board.start_game();
        assert_eq!(board.compute_rank(&table), "Novice");

        board.record_move();
        board.record_match();
        assert_eq!(board.match_ratio(), Some(1.0));
        assert_eq!(board.compute_rank(&table), "Master");
    }

    #[test]
    fn test_star_policy_applied_on_move() {
        let mut board = Scoreboard::new(Box::new(RatioPenalty::default()));
        board.start_game();
        assert_eq!(board.stars(), 3);

        for _ in 0..8 {
            board.record_move();
        }
        assert_eq!(board.stars(), 2);

        board.start_game();
        assert_eq!(board.stars(), 3);
    }
}
