//! Dominance Analyzer - dominated alternatives and non-discriminating criteria.
//!
//! Both checks ignore weights entirely, so they hold no matter how the
//! criteria are weighted.

use serde::{Deserialize, Serialize};

use super::weights::is_tie;
use crate::domain::matrix::DecisionMatrix;

/// An alternative that is dominated by another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DominatedAlternative {
    pub alternative: String,
    pub dominated_by: String,
    pub explanation: String,
}

/// A criterion on which every alternative scores the same.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonDiscriminatingCriterion {
    pub criterion: String,
    pub uniform_score: f64,
}

/// Weight-independent comparisons between alternatives.
pub struct DominanceAnalyzer;

impl DominanceAnalyzer {
    /// Finds all dominated alternatives.
    ///
    /// Alternative A dominates Alternative B if:
    /// 1. A >= B on ALL criteria
    /// 2. A > B on AT LEAST ONE criterion
    ///
    /// Scores within `TIE_TOLERANCE` count as equal. Only the first dominator
    /// (in alternative order) is reported.
    pub fn find_dominated(matrix: &DecisionMatrix) -> Vec<DominatedAlternative> {
        let count = matrix.alternative_count();
        let mut dominated = Vec::new();

        for candidate in 0..count {
            let dominator = (0..count)
                .filter(|&other| other != candidate)
                .find(|&other| Self::dominates(matrix, other, candidate));

            if let Some(other) = dominator {
                dominated.push(DominatedAlternative {
                    alternative: matrix.alternatives()[candidate].name().to_string(),
                    dominated_by: matrix.alternatives()[other].name().to_string(),
                    explanation: Self::explain_dominance(matrix, other, candidate),
                });
            }
        }

        dominated
    }

    fn dominates(matrix: &DecisionMatrix, a: usize, b: usize) -> bool {
        let mut strictly_better_on_one = false;

        for (&x, &y) in matrix.row(a).iter().zip(matrix.row(b)) {
            if is_tie(x, y) {
                continue;
            }
            if x < y {
                return false;
            }
            strictly_better_on_one = true;
        }

        strictly_better_on_one
    }

    fn explain_dominance(matrix: &DecisionMatrix, a: usize, b: usize) -> String {
        let better_on: Vec<&str> = matrix
            .criteria()
            .iter()
            .zip(matrix.row(a).iter().zip(matrix.row(b)))
            .filter(|&(_, (&x, &y))| !is_tie(x, y) && x > y)
            .map(|(c, _)| c.name())
            .collect();

        format!(
            "{} is at least as good on all criteria and strictly better on: {}",
            matrix.alternatives()[a].name(),
            better_on.join(", ")
        )
    }

    /// Finds criteria that don't distinguish between alternatives.
    ///
    /// Needs at least two alternatives; with one there is nothing to compare.
    pub fn find_non_discriminating(matrix: &DecisionMatrix) -> Vec<NonDiscriminatingCriterion> {
        if matrix.alternative_count() < 2 {
            return Vec::new();
        }

        matrix
            .criteria()
            .iter()
            .enumerate()
            .filter_map(|(c, criterion)| {
                let first = matrix.row(0)[c];
                (1..matrix.alternative_count())
                    .all(|a| is_tie(first, matrix.row(a)[c]))
                    .then(|| NonDiscriminatingCriterion {
                        criterion: criterion.name().to_string(),
                        uniform_score: first,
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_dominance_is_reported() {
        let matrix = DecisionMatrix::builder()
            .criterion("O1", 1.0)
            .criterion("O2", 1.0)
            .criterion("O3", 1.0)
            .alternatives(vec!["A", "B"])
            .score("A", "O1", 9.0)
            .score("A", "O2", 7.0)
            .score("A", "O3", 5.0)
            .score("B", "O1", 5.0)
            .score("B", "O2", 7.0)
            .score("B", "O3", 4.0)
            .build()
            .unwrap();

        let dominated = DominanceAnalyzer::find_dominated(&matrix);
        assert_eq!(dominated.len(), 1);
        assert_eq!(dominated[0].alternative, "B");
        assert_eq!(dominated[0].dominated_by, "A");
        assert!(dominated[0].explanation.ends_with("O1, O3"));
    }

    #[test]
    fn tradeoffs_are_not_dominance() {
        let matrix = DecisionMatrix::builder()
            .criterion("Cost", 1.0)
            .criterion("Quality", 1.0)
            .alternatives(vec!["A", "B"])
            .score("A", "Cost", 9.0)
            .score("A", "Quality", 3.0)
            .score("B", "Cost", 3.0)
            .score("B", "Quality", 9.0)
            .build()
            .unwrap();

        assert!(DominanceAnalyzer::find_dominated(&matrix).is_empty());
    }

    #[test]
    fn identical_alternatives_do_not_dominate_each_other() {
        let matrix = DecisionMatrix::builder()
            .criterion("Cost", 1.0)
            .alternatives(vec!["A", "B"])
            .score("A", "Cost", 5.0)
            .score("B", "Cost", 5.0)
            .build()
            .unwrap();

        assert!(DominanceAnalyzer::find_dominated(&matrix).is_empty());
    }

    #[test]
    fn uniform_criterion_is_non_discriminating() {
        let matrix = DecisionMatrix::builder()
            .criterion("Cost", 1.0)
            .criterion("Quality", 1.0)
            .alternatives(vec!["A", "B", "C"])
            .score("A", "Cost", 5.0)
            .score("B", "Cost", 5.0)
            .score("C", "Cost", 5.0)
            .score("A", "Quality", 1.0)
            .score("B", "Quality", 2.0)
            .score("C", "Quality", 3.0)
            .build()
            .unwrap();

        let uniform = DominanceAnalyzer::find_non_discriminating(&matrix);
        assert_eq!(uniform.len(), 1);
        assert_eq!(uniform[0].criterion, "Cost");
        assert_eq!(uniform[0].uniform_score, 5.0);
    }

    #[test]
    fn single_alternative_has_nothing_to_compare() {
        let matrix = DecisionMatrix::builder()
            .criterion("Cost", 1.0)
            .alternative("A")
            .score("A", "Cost", 5.0)
            .build()
            .unwrap();

        assert!(DominanceAnalyzer::find_non_discriminating(&matrix).is_empty());
        assert!(DominanceAnalyzer::find_dominated(&matrix).is_empty());
    }
}
