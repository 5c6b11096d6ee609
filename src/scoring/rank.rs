//! Rank tiers derived from the matches-to-moves ratio.

use serde::{Deserialize, Serialize};

use crate::core::{GameError, Result};

/// One rank tier: reached when the ratio is at least `threshold`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankTier {
    /// Minimum `matches / moves` ratio for this tier.
    pub threshold: f64,
    /// Label reported for this tier.
    pub label: String,
}

impl RankTier {
    /// Create a tier.
    pub fn new(threshold: f64, label: impl Into<String>) -> Self {
        Self {
            threshold,
            label: label.into(),
        }
    }
}

/// Step function from `matches / moves` to a rank label.
///
/// Tiers are checked in order and the first tier whose threshold the
/// ratio reaches wins, so tiers must be listed by descending threshold.
/// With no moves made, or no tier reached, the baseline label applies.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RankTable {
    /// Tiers, highest threshold first.
    pub tiers: Vec<RankTier>,
    /// Label when no tier is reached.
    pub baseline: String,
}

impl Default for RankTable {
    fn default() -> Self {
        Self::new("Novice")
            .with_tier(0.30, "Master")
            .with_tier(0.20, "Expert")
            .with_tier(0.10, "Apprentice")
    }
}

impl RankTable {
    /// Create a table with only a baseline label.
    pub fn new(baseline: impl Into<String>) -> Self {
        Self {
            tiers: Vec::new(),
            baseline: baseline.into(),
        }
    }

    /// Append a tier below the existing ones.
    #[must_use]
    pub fn with_tier(mut self, threshold: f64, label: impl Into<String>) -> Self {
        self.tiers.push(RankTier::new(threshold, label));
        self
    }

    /// Check that thresholds are non-increasing.
    pub fn validate(&self) -> Result<()> {
        for (index, pair) in self.tiers.windows(2).enumerate() {
            let order = pair[0].threshold.partial_cmp(&pair[1].threshold);
            if matches!(order, None | Some(std::cmp::Ordering::Less)) {
                return Err(GameError::UnorderedRankTable { index: index + 1 });
            }
        }
        Ok(())
    }

    /// Rank label for the given counters.
    #[must_use]
    pub fn rank(&self, moves: u32, matches: u32) -> &str {
        let Some(ratio) = match_ratio(moves, matches) else {
            return &self.baseline;
        };

        self.tiers
            .iter()
            .find(|tier| ratio >= tier.threshold)
            .map_or(self.baseline.as_str(), |tier| tier.label.as_str())
    }
}

/// `matches / moves`, or `None` before the first move.
#[must_use]
pub fn match_ratio(moves: u32, matches: u32) -> Option<f64> {
    if moves == 0 {
        None
    } else {
        Some(f64::from(matches) / f64::from(moves))
    }
}
