//! Decision Matrix - construction, validation and read-only access.

use std::collections::HashSet;

use tracing::debug;

use super::{Alternative, Criterion};
use crate::domain::foundation::{EntryKind, InvariantViolation, ShapeError, ValidationError};
use crate::domain::gateway::{NormalizedCriterion, NormalizedInput, NormalizedScore};

/// One decision problem: criteria, alternatives and a complete score grid.
///
/// All fields are private and there are no mutators. A "change" such as
/// [`DecisionMatrix::with_weight`] yields a new, re-validated instance.
#[derive(Debug, Clone, PartialEq)]
pub struct DecisionMatrix {
    title: Option<String>,
    criteria: Vec<Criterion>,
    alternatives: Vec<Alternative>,
    /// Row-major: `scores[alt * criteria.len() + crit]`.
    scores: Vec<f64>,
}

impl DecisionMatrix {
    /// Validates normalized input and builds a matrix.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::Invariant` with one of `EmptyMatrix`,
    /// `DuplicateName`, `NonFiniteValue`, `NegativeWeight`, `ZeroWeightSum`,
    /// `UnknownReference`, `DuplicateScore` or `IncompleteMatrix`.
    pub fn new(input: NormalizedInput) -> Result<Self, ValidationError> {
        let NormalizedInput {
            title,
            criteria,
            alternatives,
            scores,
        } = input;

        if criteria.is_empty() {
            return Err(InvariantViolation::EmptyMatrix {
                kind: EntryKind::Criterion,
            }
            .into());
        }
        if alternatives.is_empty() {
            return Err(InvariantViolation::EmptyMatrix {
                kind: EntryKind::Alternative,
            }
            .into());
        }

        ensure_unique(criteria.iter().map(|c| c.name.as_str()), EntryKind::Criterion)?;
        ensure_unique(alternatives.iter().map(String::as_str), EntryKind::Alternative)?;
        validate_weights(&criteria)?;

        let grid = fill_grid(&criteria, &alternatives, &scores)?;

        debug!(
            criteria = criteria.len(),
            alternatives = alternatives.len(),
            "Constructed decision matrix"
        );

        Ok(Self {
            title,
            criteria: criteria
                .into_iter()
                .map(|c| Criterion::new(c.name, c.weight))
                .collect(),
            alternatives: alternatives.into_iter().map(Alternative::new).collect(),
            scores: grid,
        })
    }

    /// Creates a builder for programmatic construction.
    pub fn builder() -> DecisionMatrixBuilder {
        DecisionMatrixBuilder::new()
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn alternatives(&self) -> &[Alternative] {
        &self.alternatives
    }

    pub fn criterion_count(&self) -> usize {
        self.criteria.len()
    }

    pub fn alternative_count(&self) -> usize {
        self.alternatives.len()
    }

    /// Looks up a criterion by name.
    pub fn criterion(&self, name: &str) -> Option<&Criterion> {
        self.criteria.iter().find(|c| c.name() == name)
    }

    pub(crate) fn criterion_index(&self, name: &str) -> Option<usize> {
        self.criteria.iter().position(|c| c.name() == name)
    }

    /// Raw weights in criterion order.
    pub fn weights(&self) -> Vec<f64> {
        self.criteria.iter().map(Criterion::weight).collect()
    }

    /// Score of one alternative on one criterion. `None` only for unknown names.
    pub fn score(&self, alternative: &str, criterion: &str) -> Option<f64> {
        let alt = self.alternatives.iter().position(|a| a.name() == alternative)?;
        let crit = self.criterion_index(criterion)?;
        Some(self.scores[alt * self.criteria.len() + crit])
    }

    /// All scores of the alternative at `index`, in criterion order.
    pub(crate) fn row(&self, index: usize) -> &[f64] {
        let width = self.criteria.len();
        &self.scores[index * width..(index + 1) * width]
    }

    /// Converts back into the gateway's canonical form.
    pub fn to_input(&self) -> NormalizedInput {
        let scores = self
            .alternatives
            .iter()
            .enumerate()
            .flat_map(|(a, alt)| {
                self.criteria.iter().zip(self.row(a)).map(move |(crit, value)| {
                    NormalizedScore::new(alt.name(), crit.name(), *value)
                })
            })
            .collect();

        NormalizedInput {
            title: self.title.clone(),
            criteria: self
                .criteria
                .iter()
                .map(|c| NormalizedCriterion::new(c.name(), c.weight()))
                .collect(),
            alternatives: self.alternatives.iter().map(|a| a.name().to_string()).collect(),
            scores,
        }
    }

    /// Returns a new matrix with one criterion re-weighted.
    ///
    /// The result goes through full validation; `self` is unchanged.
    pub fn with_weight(&self, criterion: &str, weight: f64) -> Result<Self, ValidationError> {
        let mut input = self.to_input();
        let entry = input
            .criteria
            .iter_mut()
            .find(|c| c.name == criterion)
            .ok_or_else(|| ShapeError::UnknownCriterion {
                name: criterion.to_string(),
            })?;
        entry.weight = weight;
        Self::new(input)
    }
}

impl TryFrom<NormalizedInput> for DecisionMatrix {
    type Error = ValidationError;

    fn try_from(input: NormalizedInput) -> Result<Self, Self::Error> {
        Self::new(input)
    }
}

fn ensure_unique<'a>(
    names: impl Iterator<Item = &'a str>,
    kind: EntryKind,
) -> Result<(), InvariantViolation> {
    let mut seen = HashSet::new();
    for name in names {
        if !seen.insert(name) {
            return Err(InvariantViolation::DuplicateName {
                kind,
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

fn validate_weights(criteria: &[NormalizedCriterion]) -> Result<(), InvariantViolation> {
    for (i, c) in criteria.iter().enumerate() {
        if !c.weight.is_finite() {
            return Err(InvariantViolation::non_finite(
                format!("criteria[{}].weight", i),
                c.weight,
            ));
        }
        if c.weight < 0.0 {
            return Err(InvariantViolation::NegativeWeight {
                index: i,
                criterion: c.name.clone(),
                weight: c.weight.to_string(),
            });
        }
    }

    if criteria.iter().all(|c| c.weight == 0.0) {
        return Err(InvariantViolation::ZeroWeightSum);
    }
    Ok(())
}

/// Places every score into a dense grid, checking references, duplicates,
/// finiteness and completeness.
fn fill_grid(
    criteria: &[NormalizedCriterion],
    alternatives: &[String],
    scores: &[NormalizedScore],
) -> Result<Vec<f64>, InvariantViolation> {
    let width = criteria.len();
    let mut grid: Vec<Option<f64>> = vec![None; alternatives.len() * width];

    for (i, score) in scores.iter().enumerate() {
        let alt = alternatives
            .iter()
            .position(|a| *a == score.alternative)
            .ok_or_else(|| InvariantViolation::UnknownReference {
                field: format!("scores[{}].alternative", i),
                kind: EntryKind::Alternative,
                name: score.alternative.clone(),
            })?;
        let crit = criteria
            .iter()
            .position(|c| c.name == score.criterion)
            .ok_or_else(|| InvariantViolation::UnknownReference {
                field: format!("scores[{}].criterion", i),
                kind: EntryKind::Criterion,
                name: score.criterion.clone(),
            })?;

        if !score.value.is_finite() {
            return Err(InvariantViolation::non_finite(
                format!("scores.{}.{}", score.alternative, score.criterion),
                score.value,
            ));
        }

        let slot = &mut grid[alt * width + crit];
        if slot.is_some() {
            return Err(InvariantViolation::DuplicateScore {
                alternative: score.alternative.clone(),
                criterion: score.criterion.clone(),
            });
        }
        *slot = Some(score.value);
    }

    grid.into_iter()
        .enumerate()
        .map(|(i, cell)| {
            cell.ok_or_else(|| InvariantViolation::IncompleteMatrix {
                alternative: alternatives[i / width].clone(),
                criterion: criteria[i % width].name.clone(),
            })
        })
        .collect()
}

/// Builder for constructing DecisionMatrix instances.
///
/// `build()` runs the same validation as [`DecisionMatrix::new`].
#[derive(Debug, Default)]
pub struct DecisionMatrixBuilder {
    input: NormalizedInput,
}

impl DecisionMatrixBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the decision title.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.input.title = Some(title.into());
        self
    }

    /// Adds a criterion.
    pub fn criterion(mut self, name: impl Into<String>, weight: f64) -> Self {
        self.input
            .criteria
            .push(NormalizedCriterion::new(name, weight));
        self
    }

    /// Adds an alternative.
    pub fn alternative(mut self, name: impl Into<String>) -> Self {
        self.input.alternatives.push(name.into());
        self
    }

    /// Adds several alternatives.
    pub fn alternatives(mut self, names: Vec<impl Into<String>>) -> Self {
        self.input
            .alternatives
            .extend(names.into_iter().map(Into::into));
        self
    }

    /// Adds one score cell.
    pub fn score(
        mut self,
        alternative: impl Into<String>,
        criterion: impl Into<String>,
        value: f64,
    ) -> Self {
        self.input
            .scores
            .push(NormalizedScore::new(alternative, criterion, value));
        self
    }

    /// Validates and builds the matrix.
    pub fn build(self) -> Result<DecisionMatrix, ValidationError> {
        DecisionMatrix::new(self.input)
    }
}
