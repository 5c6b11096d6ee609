//! Star rating policies.
//!
//! A star policy decides how many stars the player holds as moves are
//! recorded. Policies are trait objects so sessions can swap them:
//! - `NoPenalty`: a fixed star count
//! - `RatioPenalty`: lose a star on every other move past a grace period
//!   while the match ratio is poor
//!
//! `StarRule` is the serializable config form that builds a policy.

use serde::{Deserialize, Serialize};

use super::rank::match_ratio;

/// Policy for the star rating.
pub trait StarPolicy: Send + Sync + std::fmt::Debug {
    /// Stars at the start of a game.
    fn initial_stars(&self) -> u8;

    /// Stars after move number `moves` is recorded.
    ///
    /// `matches` is the count before this move's comparison.
    fn stars_after_move(&self, stars: u8, moves: u32, matches: u32) -> u8;
}

/// Keeps a constant star count.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NoPenalty {
    pub stars: u8,
}

impl Default for NoPenalty {
    fn default() -> Self {
        Self { stars: 3 }
    }
}

impl StarPolicy for NoPenalty {
    fn initial_stars(&self) -> u8 {
        self.stars
    }

    fn stars_after_move(&self, stars: u8, _moves: u32, _matches: u32) -> u8 {
        stars
    }
}

/// Removes one star on every `interval`-th move after `grace_moves` when
/// `matches / moves` is below `min_ratio`. Never goes below zero.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RatioPenalty {
    pub initial_stars: u8,
    pub grace_moves: u32,
    pub interval: u32,
    pub min_ratio: f64,
}

impl Default for RatioPenalty {
    fn default() -> Self {
        Self {
            initial_stars: 3,
            grace_moves: 6,
            interval: 2,
            min_ratio: 0.25,
        }
    }
}

impl StarPolicy for RatioPenalty {
    fn initial_stars(&self) -> u8 {
        self.initial_stars
    }

    fn stars_after_move(&self, stars: u8, moves: u32, matches: u32) -> u8 {
        if moves <= self.grace_moves || self.interval == 0 || moves % self.interval != 0 {
            return stars;
        }

        match match_ratio(moves, matches) {
            Some(ratio) if ratio < self.min_ratio => stars.saturating_sub(1),
            _ => stars,
        }
    }
}

/// Serializable star policy selection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum StarRule {
    /// Fixed three stars.
    None,
    /// Ratio-based star loss.
    RatioPenalty(RatioPenalty),
}

impl Default for StarRule {
    fn default() -> Self {
        StarRule::RatioPenalty(RatioPenalty::default())
    }
}

impl StarRule {
    /// Build the policy this rule describes.
    #[must_use]
    pub fn build(&self) -> Box<dyn StarPolicy> {
        match self {
            StarRule::None => Box::new(NoPenalty::default()),
            StarRule::RatioPenalty(penalty) => Box::new(penalty.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_penalty_is_constant() {
        let policy = NoPenalty::default();
        assert_eq!(policy.initial_stars(), 3);
        assert_eq!(policy.stars_after_move(3, 100, 0), 3);
    }

    #[test]
    fn test_ratio_penalty_grace_period() {
        let policy = RatioPenalty::default();
        for moves in 1..=6 {
            assert_eq!(policy.stars_after_move(3, moves, 0), 3);
        }
    }

    #[test]
    fn test_ratio_penalty_only_on_even_moves() {
        let policy = RatioPenalty::default();
        assert_eq!(policy.stars_after_move(3, 7, 0), 3);
        assert_eq!(policy.stars_after_move(3, 8, 0), 2);
        assert_eq!(policy.stars_after_move(2, 9, 0), 2);
        assert_eq!(policy.stars_after_move(2, 10, 0), 1);
    }

    #[test]
    fn test_ratio_penalty_spares_good_ratio() {
        let policy = RatioPenalty::default();
        // 2 / 8 = 0.25 is not below the minimum
        assert_eq!(policy.stars_after_move(3, 8, 2), 3);
        assert_eq!(policy.stars_after_move(3, 8, 1), 2);
    }

    #[test]
    fn test_ratio_penalty_floor_at_zero() {
        let policy = RatioPenalty::default();
        assert_eq!(policy.stars_after_move(0, 12, 0), 0);
    }

    #[test]
    fn test_rule_builds_policy() {
        assert_eq!(StarRule::None.build().initial_stars(), 3);

        let rule = StarRule::RatioPenalty(RatioPenalty {
            initial_stars: 5,
            ..RatioPenalty::default()
        });
        assert_eq!(rule.build().initial_stars(), 5);
    }

    #[test]
    fn test_rule_serde() {
        let rule = StarRule::default();
        let json = serde_json::to_string(&rule).unwrap();
        let back: StarRule = serde_json::from_str(&json).unwrap();
        assert_eq!(rule, back);

        let none: StarRule = serde_json::from_str(r#""None""#).unwrap();
        assert_eq!(none, StarRule::None);
    }
}
