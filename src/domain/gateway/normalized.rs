//! Normalized input - the typed form produced by the gateway.

use serde::{Deserialize, Serialize};

/// A criterion after trimming and numeric casting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedCriterion {
    pub name: String,
    pub weight: f64,
}

impl NormalizedCriterion {
    pub fn new(name: impl Into<String>, weight: f64) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

/// One cell of the score matrix after trimming and numeric casting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedScore {
    pub alternative: String,
    pub criterion: String,
    pub value: f64,
}

impl NormalizedScore {
    pub fn new(alternative: impl Into<String>, criterion: impl Into<String>, value: f64) -> Self {
        Self {
            alternative: alternative.into(),
            criterion: criterion.into(),
            value,
        }
    }
}

/// Well-typed decision data, ready for decision matrix construction.
///
/// Serializing this struct yields the canonical document shape, which the
/// gateway accepts unchanged. That is what makes normalization idempotent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NormalizedInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub criteria: Vec<NormalizedCriterion>,
    pub alternatives: Vec<String>,
    pub scores: Vec<NormalizedScore>,
}

impl NormalizedInput {
    /// Returns the number of score cells supplied.
    pub fn score_count(&self) -> usize {
        self.scores.len()
    }
}
