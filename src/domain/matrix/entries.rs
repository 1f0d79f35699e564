//! Criterion and alternative entries owned by a decision matrix.

use serde::Serialize;

/// A named, weighted dimension of comparison.
///
/// Only a [`DecisionMatrix`](super::DecisionMatrix) creates these, after validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Criterion {
    name: String,
    weight: f64,
}

impl Criterion {
    pub(crate) fn new(name: String, weight: f64) -> Self {
        Self { name, weight }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The weight as supplied (not normalized).
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

/// A named option being ranked.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct Alternative {
    name: String,
}

impl Alternative {
    pub(crate) fn new(name: String) -> Self {
        Self { name }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}
