//! Ranking results - the derived, never-persisted view of a decision matrix.
//!
//! Results refer to criteria and alternatives by name, so they can outlive
//! the matrix that produced them.

use serde::{Deserialize, Serialize};

/// How much one criterion contributed to an alternative's total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contribution {
    pub criterion: String,
    pub normalized_weight: f64,
    pub raw_score: f64,
    /// `normalized_weight * raw_score`.
    pub weighted_score: f64,
}

/// One line of the leaderboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlternativeScore {
    /// 1-based position.
    pub rank: usize,
    pub alternative: String,
    pub total: f64,
    pub contributions: Vec<Contribution>,
    /// Difference to the next alternative, `None` for the last one.
    pub margin_to_next: Option<f64>,
    /// True when the next alternative is in the same tie group.
    pub tied_with_next: bool,
}

impl AlternativeScore {
    /// The criterion that added the most to this alternative's total.
    pub fn strongest_criterion(&self) -> Option<&Contribution> {
        self.contributions
            .iter()
            .max_by(|a, b| a.weighted_score.total_cmp(&b.weighted_score))
    }
}

/// A criterion weight after normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedWeight {
    pub criterion: String,
    pub weight: f64,
}

/// Output of the weighted sum model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingResult {
    pub ranking: Vec<AlternativeScore>,
    pub normalized_weights: Vec<NormalizedWeight>,
}

impl RankingResult {
    /// The top-ranked alternative.
    pub fn winner(&self) -> Option<&AlternativeScore> {
        self.ranking.first()
    }

    /// Looks up an alternative's line by name.
    pub fn get(&self, alternative: &str) -> Option<&AlternativeScore> {
        self.ranking.iter().find(|s| s.alternative == alternative)
    }

    /// Alternative names in rank order.
    pub fn order(&self) -> Vec<&str> {
        self.ranking.iter().map(|s| s.alternative.as_str()).collect()
    }
}
