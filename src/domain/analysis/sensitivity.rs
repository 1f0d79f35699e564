//! Sensitivity Analyzer - how robust is the winner to weight perturbation?
//!
//! One criterion's weight is scaled by `(1 + delta)` for each delta of a
//! [`SensitivityRange`], all weights are renormalized, and the winner is
//! recomputed. A winner that changes anywhere inside the range marks the
//! recommendation as fragile.

use serde::{Deserialize, Serialize};

use super::weights::normalize_weights;
use super::WsmCalculator;
use crate::domain::foundation::{ShapeError, ValidationError};
use crate::domain::matrix::DecisionMatrix;

/// Largest `steps` accepted by [`SensitivityRange::symmetric`].
pub const MAX_SENSITIVITY_STEPS: usize = 1000;

/// Validated set of relative weight perturbations.
///
/// Every delta is finite and greater than -1 (a weight may shrink but never
/// vanish or turn negative). Deltas are sorted ascending without duplicates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SensitivityRange {
    deltas: Vec<f64>,
}

impl SensitivityRange {
    /// Builds a range from explicit deltas.
    pub fn new(deltas: Vec<f64>) -> Result<Self, ValidationError> {
        if deltas.is_empty() {
            return Err(ShapeError::missing("sensitivity.deltas").into());
        }

        for (i, &delta) in deltas.iter().enumerate() {
            let reason = if !delta.is_finite() {
                Some("delta must be finite")
            } else if delta <= -1.0 {
                Some("delta must be greater than -1")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(ShapeError::InvalidSensitivityDelta {
                    field: format!("sensitivity.deltas[{}]", i),
                    value: delta.to_string(),
                    reason: reason.to_string(),
                }
                .into());
            }
        }

        let mut deltas = deltas;
        deltas.sort_by(f64::total_cmp);
        deltas.dedup();
        Ok(Self { deltas })
    }

    /// `2 * steps + 1` evenly spaced deltas from `-span` to `+span`.
    ///
    /// `span` must lie in `(0, 1)` and `steps` in `1..=MAX_SENSITIVITY_STEPS`.
    pub fn symmetric(span: f64, steps: usize) -> Result<Self, ValidationError> {
        if !(span.is_finite() && span > 0.0 && span < 1.0) {
            return Err(ShapeError::InvalidSensitivityDelta {
                field: "sensitivity.span".to_string(),
                value: span.to_string(),
                reason: "span must be between 0 and 1 (exclusive)".to_string(),
            }
            .into());
        }
        if !(1..=MAX_SENSITIVITY_STEPS).contains(&steps) {
            return Err(ShapeError::InvalidSensitivityDelta {
                field: "sensitivity.steps".to_string(),
                value: steps.to_string(),
                reason: format!("steps must be between 1 and {}", MAX_SENSITIVITY_STEPS),
            }
            .into());
        }

        let n = steps as f64;
        let deltas = (0..=2 * steps)
            .map(|k| span * (k as f64 - n) / n)
            .collect();
        Self::new(deltas)
    }

    pub fn deltas(&self) -> &[f64] {
        &self.deltas
    }
}

/// Whether the winner survives every perturbation in the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Robustness {
    Robust,
    Fragile,
}

/// The winner under one perturbation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityPoint {
    pub delta: f64,
    pub winner: String,
    pub winner_changed: bool,
}

/// Sweep result for one criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivityAnalysis {
    pub criterion: String,
    pub baseline_winner: String,
    pub points: Vec<SensitivityPoint>,
    /// Smallest-magnitude delta at which the winner changes.
    pub tipping_point: Option<f64>,
    pub robustness: Robustness,
}

impl SensitivityAnalysis {
    pub fn is_fragile(&self) -> bool {
        self.robustness == Robustness::Fragile
    }

    /// Alternative that takes over at the tipping point.
    pub fn challenger(&self) -> Option<&str> {
        let tipping = self.tipping_point?;
        self.points
            .iter()
            .find(|p| p.delta == tipping)
            .map(|p| p.winner.as_str())
    }
}

/// Weight-perturbation sweeps over a decision matrix.
pub struct SensitivityAnalyzer;

impl SensitivityAnalyzer {
    /// Sweeps one criterion's weight across the range.
    ///
    /// # Errors
    /// `ShapeError::UnknownCriterion` if the matrix has no such criterion.
    pub fn analyze(
        matrix: &DecisionMatrix,
        criterion: &str,
        range: &SensitivityRange,
    ) -> Result<SensitivityAnalysis, ValidationError> {
        let index = matrix
            .criterion_index(criterion)
            .ok_or_else(|| ShapeError::UnknownCriterion {
                name: criterion.to_string(),
            })?;
        Ok(Self::sweep(matrix, index, range))
    }

    /// Sweeps every criterion, in criterion order.
    pub fn analyze_all(matrix: &DecisionMatrix, range: &SensitivityRange) -> Vec<SensitivityAnalysis> {
        (0..matrix.criterion_count())
            .map(|index| Self::sweep(matrix, index, range))
            .collect()
    }

    fn sweep(matrix: &DecisionMatrix, index: usize, range: &SensitivityRange) -> SensitivityAnalysis {
        let base = matrix.weights();
        let baseline_winner = WsmCalculator::winner_with_weights(matrix, &normalize_weights(&base));

        let points: Vec<SensitivityPoint> = range
            .deltas()
            .iter()
            .map(|&delta| {
                let mut weights = base.clone();
                weights[index] *= 1.0 + delta;
                let winner = WsmCalculator::winner_with_weights(matrix, &normalize_weights(&weights));
                SensitivityPoint {
                    delta,
                    winner_changed: winner != baseline_winner,
                    winner,
                }
            })
            .collect();

        // Ties in magnitude resolve towards the negative delta.
        let tipping_point = points
            .iter()
            .filter(|p| p.winner_changed)
            .map(|p| p.delta)
            .min_by(|a, b| a.abs().total_cmp(&b.abs()).then(a.total_cmp(b)));

        SensitivityAnalysis {
            criterion: matrix.criteria()[index].name().to_string(),
            baseline_winner,
            robustness: if tipping_point.is_some() {
                Robustness::Fragile
            } else {
                Robustness::Robust
            },
            tipping_point,
            points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A wins 6.1 to 6.0 with equal weights.
    fn close_call() -> DecisionMatrix {
        DecisionMatrix::builder()
            .criterion("Cost", 0.5)
            .criterion("Quality", 0.5)
            .alternatives(vec!["A", "B"])
            .score("A", "Cost", 8.2)
            .score("A", "Quality", 4.0)
            .score("B", "Cost", 4.0)
            .score("B", "Quality", 8.0)
            .build()
            .unwrap()
    }

    fn landslide() -> DecisionMatrix {
        DecisionMatrix::builder()
            .criterion("Cost", 0.5)
            .criterion("Quality", 0.5)
            .alternatives(vec!["A", "B"])
            .score("A", "Cost", 9.0)
            .score("A", "Quality", 9.0)
            .score("B", "Cost", 2.0)
            .score("B", "Quality", 3.0)
            .build()
            .unwrap()
    }

    #[test]
    fn symmetric_range_spans_both_directions() {
        let range = SensitivityRange::symmetric(0.1, 2).unwrap();
        assert_eq!(range.deltas().len(), 5);
        assert!((range.deltas()[0] + 0.1).abs() < 1e-12);
        assert_eq!(range.deltas()[2], 0.0);
        assert!((range.deltas()[4] - 0.1).abs() < 1e-12);
    }

    #[test]
    fn range_sorts_and_deduplicates() {
        let range = SensitivityRange::new(vec![0.2, -0.1, 0.2, 0.0]).unwrap();
        assert_eq!(range.deltas(), &[-0.1, 0.0, 0.2]);
    }

    #[test]
    fn range_rejects_invalid_deltas() {
        assert!(SensitivityRange::new(vec![]).is_err());
        assert!(SensitivityRange::new(vec![-1.0]).is_err());
        assert!(SensitivityRange::new(vec![f64::NAN]).is_err());
        assert!(SensitivityRange::symmetric(0.0, 5).is_err());
        assert!(SensitivityRange::symmetric(1.0, 5).is_err());
        assert!(SensitivityRange::symmetric(0.1, 0).is_err());
        assert!(SensitivityRange::symmetric(0.1, MAX_SENSITIVITY_STEPS + 1).is_err());
        assert!(SensitivityRange::symmetric(0.1, usize::MAX).is_err());
        assert_eq!(
            SensitivityRange::symmetric(0.1, MAX_SENSITIVITY_STEPS)
                .unwrap()
                .deltas()
                .len(),
            2 * MAX_SENSITIVITY_STEPS + 1
        );

        match SensitivityRange::new(vec![0.1, -2.0]) {
            Err(ValidationError::Shape(ShapeError::InvalidSensitivityDelta { field, .. })) => {
                assert_eq!(field, "sensitivity.deltas[1]");
            }
            other => panic!("Expected InvalidSensitivityDelta, got {:?}", other),
        }
    }

    #[test]
    fn close_call_is_fragile_on_cost() {
        let range = SensitivityRange::symmetric(0.1, 10).unwrap();
        let analysis = SensitivityAnalyzer::analyze(&close_call(), "Cost", &range).unwrap();

        assert_eq!(analysis.baseline_winner, "A");
        assert!(analysis.is_fragile());
        let tipping = analysis.tipping_point.unwrap();
        assert!((tipping + 0.05).abs() < 1e-9, "tipping point was {}", tipping);
        assert_eq!(analysis.challenger(), Some("B"));
        assert_eq!(analysis.points.len(), 21);
    }

    #[test]
    fn landslide_is_robust() {
        let range = SensitivityRange::symmetric(0.1, 10).unwrap();
        let analysis = SensitivityAnalyzer::analyze(&landslide(), "Cost", &range).unwrap();

        assert_eq!(analysis.robustness, Robustness::Robust);
        assert!(analysis.tipping_point.is_none());
        assert!(analysis.challenger().is_none());
        assert!(analysis.points.iter().all(|p| p.winner == "A"));
    }

    #[test]
    fn unknown_criterion_is_rejected() {
        let range = SensitivityRange::symmetric(0.1, 1).unwrap();
        let err = SensitivityAnalyzer::analyze(&close_call(), "Speed", &range).unwrap_err();
        assert_eq!(
            err,
            ValidationError::Shape(ShapeError::UnknownCriterion {
                name: "Speed".to_string()
            })
        );
    }

    #[test]
    fn analyze_all_covers_every_criterion() {
        let range = SensitivityRange::symmetric(0.1, 10).unwrap();
        let analyses = SensitivityAnalyzer::analyze_all(&close_call(), &range);

        assert_eq!(analyses.len(), 2);
        assert_eq!(analyses[0].criterion, "Cost");
        assert_eq!(analyses[1].criterion, "Quality");
        // Raising Quality's weight favours B.
        let quality_tip = analyses[1].tipping_point.unwrap();
        assert!(quality_tip > 0.0);
    }

    #[test]
    fn perturbing_zero_weight_changes_nothing() {
        let matrix = DecisionMatrix::builder()
            .criterion("Cost", 0.0)
            .criterion("Quality", 1.0)
            .alternatives(vec!["A", "B"])
            .score("A", "Cost", 0.0)
            .score("A", "Quality", 9.0)
            .score("B", "Cost", 100.0)
            .score("B", "Quality", 8.0)
            .build()
            .unwrap();

        let range = SensitivityRange::symmetric(0.5, 5).unwrap();
        let analysis = SensitivityAnalyzer::analyze(&matrix, "Cost", &range).unwrap();
        assert_eq!(analysis.robustness, Robustness::Robust);
    }
}
