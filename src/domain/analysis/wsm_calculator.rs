//! WSM Calculator - Weighted sum scoring with deterministic tie-breaking.

use std::cmp::Ordering;

use super::weights::{is_tie, normalize_weights};
use super::{AlternativeScore, Contribution, NormalizedWeight, RankingResult};
use crate::domain::matrix::DecisionMatrix;

/// Weighted sum model over a validated decision matrix.
pub struct WsmCalculator;

impl WsmCalculator {
    /// Ranks every alternative of the matrix.
    ///
    /// # Algorithm
    /// 1. `w_i' = w_i / Σw_j`
    /// 2. `score(a) = Σ_i w_i' × score(a, i)`
    /// 3. Sort descending; totals within `TIE_TOLERANCE` of a group's leader
    ///    are ordered by name (code-point order).
    ///
    /// Raw scores are not rescaled across criteria. Callers supply
    /// scale-comparable scores.
    pub fn rank(matrix: &DecisionMatrix) -> RankingResult {
        let weights = normalize_weights(&matrix.weights());
        Self::rank_with_weights(matrix, &weights)
    }

    /// Ranks using already-normalized weights (one per criterion).
    pub(crate) fn rank_with_weights(matrix: &DecisionMatrix, weights: &[f64]) -> RankingResult {
        let totals = Self::totals(matrix, weights);
        let order = Self::order(matrix, &totals);

        let ranking = order
            .iter()
            .enumerate()
            .map(|(position, &(index, tied_with_next))| {
                let contributions = matrix
                    .criteria()
                    .iter()
                    .zip(weights)
                    .zip(matrix.row(index))
                    .map(|((criterion, &weight), &raw)| Contribution {
                        criterion: criterion.name().to_string(),
                        normalized_weight: weight,
                        raw_score: raw,
                        weighted_score: weight * raw,
                    })
                    .collect();

                AlternativeScore {
                    rank: position + 1,
                    alternative: matrix.alternatives()[index].name().to_string(),
                    total: totals[index],
                    contributions,
                    margin_to_next: order
                        .get(position + 1)
                        .map(|&(next, _)| totals[index] - totals[next]),
                    tied_with_next,
                }
            })
            .collect();

        RankingResult {
            ranking,
            normalized_weights: matrix
                .criteria()
                .iter()
                .zip(weights)
                .map(|(c, &w)| NormalizedWeight {
                    criterion: c.name().to_string(),
                    weight: w,
                })
                .collect(),
        }
    }

    /// Name of the top alternative under the given normalized weights.
    pub(crate) fn winner_with_weights(matrix: &DecisionMatrix, weights: &[f64]) -> String {
        let totals = Self::totals(matrix, weights);
        Self::order(matrix, &totals)
            .first()
            .map(|&(index, _)| matrix.alternatives()[index].name().to_string())
            .unwrap_or_default()
    }

    /// Weighted totals in alternative order. Summation follows criterion
    /// order, so results are bit-identical across runs.
    fn totals(matrix: &DecisionMatrix, weights: &[f64]) -> Vec<f64> {
        (0..matrix.alternative_count())
            .map(|a| {
                matrix
                    .row(a)
                    .iter()
                    .zip(weights)
                    .map(|(score, weight)| score * weight)
                    .sum()
            })
            .collect()
    }

    /// Returns `(alternative index, tied_with_next)` in rank order.
    fn order(matrix: &DecisionMatrix, totals: &[f64]) -> Vec<(usize, bool)> {
        let name = |i: usize| matrix.alternatives()[i].name();

        let mut indices: Vec<usize> = (0..totals.len()).collect();
        indices.sort_by(|&a, &b| {
            totals[b]
                .total_cmp(&totals[a])
                .then_with(|| name(a).cmp(name(b)))
        });

        // Group by distance to the group's leader, then order each group by name.
        let mut ranked = Vec::with_capacity(indices.len());
        let mut start = 0;
        while start < indices.len() {
            let leader = totals[indices[start]];
            let end = indices[start..]
                .iter()
                .position(|&i| !is_tie(leader, totals[i]))
                .map_or(indices.len(), |offset| start + offset);

            let group = &mut indices[start..end];
            group.sort_by(|&a, &b| match name(a).cmp(name(b)) {
                Ordering::Equal => a.cmp(&b),
                other => other,
            });
            let last = group.len() - 1;
            ranked.extend(group.iter().enumerate().map(|(k, &i)| (i, k < last)));
            start = end;
        }
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::TIE_TOLERANCE;

    fn tie_matrix() -> DecisionMatrix {
        DecisionMatrix::builder()
            .criterion("Cost", 0.5)
            .criterion("Quality", 0.5)
            .alternatives(vec!["B", "A"])
            .score("A", "Cost", 8.0)
            .score("A", "Quality", 4.0)
            .score("B", "Cost", 4.0)
            .score("B", "Quality", 8.0)
            .build()
            .unwrap()
    }

    #[test]
    fn equal_scores_break_alphabetically() {
        let result = WsmCalculator::rank(&tie_matrix());
        assert_eq!(result.order(), vec!["A", "B"]);
        assert_eq!(result.winner().unwrap().total, 6.0);
        assert!(result.ranking[0].tied_with_next);
        assert!(!result.ranking[1].tied_with_next);
    }

    #[test]
    fn higher_total_wins_regardless_of_name() {
        let matrix = DecisionMatrix::builder()
            .criterion("Cost", 1.0)
            .alternatives(vec!["Alpha", "Zulu"])
            .score("Alpha", "Cost", 3.0)
            .score("Zulu", "Cost", 9.0)
            .build()
            .unwrap();

        let result = WsmCalculator::rank(&matrix);
        assert_eq!(result.order(), vec!["Zulu", "Alpha"]);
        assert_eq!(result.ranking[0].rank, 1);
        assert_eq!(result.ranking[1].rank, 2);
        assert_eq!(result.ranking[0].margin_to_next, Some(6.0));
        assert_eq!(result.ranking[1].margin_to_next, None);
    }

    #[test]
    fn near_equal_within_tolerance_is_a_tie() {
        let matrix = DecisionMatrix::builder()
            .criterion("Cost", 1.0)
            .alternatives(vec!["B", "A"])
            .score("A", "Cost", 5.0)
            .score("B", "Cost", 5.0 + TIE_TOLERANCE / 2.0)
            .build()
            .unwrap();

        assert_eq!(WsmCalculator::rank(&matrix).order(), vec!["A", "B"]);
    }

    #[test]
    fn difference_beyond_tolerance_is_not_a_tie() {
        let matrix = DecisionMatrix::builder()
            .criterion("Cost", 1.0)
            .alternatives(vec!["A", "B"])
            .score("A", "Cost", 5.0)
            .score("B", "Cost", 5.0 + 10.0 * TIE_TOLERANCE)
            .build()
            .unwrap();

        assert_eq!(WsmCalculator::rank(&matrix).order(), vec!["B", "A"]);
    }

    #[test]
    fn weights_are_normalized_before_scoring() {
        let matrix = DecisionMatrix::builder()
            .criterion("Cost", 3.0)
            .criterion("Quality", 1.0)
            .alternative("A")
            .score("A", "Cost", 4.0)
            .score("A", "Quality", 8.0)
            .build()
            .unwrap();

        let result = WsmCalculator::rank(&matrix);
        assert!((result.ranking[0].total - 5.0).abs() < 1e-12);
        assert!((result.normalized_weights[0].weight - 0.75).abs() < 1e-12);
        assert!((result.normalized_weights[1].weight - 0.25).abs() < 1e-12);
    }

    #[test]
    fn contributions_sum_to_total() {
        let result = WsmCalculator::rank(&tie_matrix());
        for line in &result.ranking {
            let sum: f64 = line.contributions.iter().map(|c| c.weighted_score).sum();
            assert!((sum - line.total).abs() < 1e-12);
            assert_eq!(line.contributions.len(), 2);
        }
        let a = result.get("A").unwrap();
        assert_eq!(a.contributions[0].criterion, "Cost");
        assert_eq!(a.contributions[0].raw_score, 8.0);
        assert_eq!(a.contributions[0].weighted_score, 4.0);
    }

    #[test]
    fn rank_is_deterministic() {
        let matrix = tie_matrix();
        assert_eq!(WsmCalculator::rank(&matrix), WsmCalculator::rank(&matrix));
    }

    #[test]
    fn winner_with_weights_matches_rank() {
        let matrix = tie_matrix();
        let weights = normalize_weights(&matrix.weights());
        assert_eq!(WsmCalculator::winner_with_weights(&matrix, &weights), "A");
        assert_eq!(
            WsmCalculator::winner_with_weights(&matrix, &[0.4, 0.6]),
            "B"
        );
    }
}
