//! Numeric policy shared by every calculation and by the test suites.

/// Two totals closer than this are a tie, broken alphabetically.
pub const TIE_TOLERANCE: f64 = 1e-6;

/// Returns true if two totals are equal within [`TIE_TOLERANCE`].
pub fn is_tie(a: f64, b: f64) -> bool {
    (a - b).abs() <= TIE_TOLERANCE
}

/// Scales weights so they sum to 1.0.
///
/// Weights are first divided by their maximum so that very large inputs
/// cannot overflow the sum. Callers guarantee finite, non-negative weights
/// with a positive sum (a decision matrix rejects all-zero weights); an
/// all-zero slice comes back unchanged rather than as NaN.
pub fn normalize_weights(weights: &[f64]) -> Vec<f64> {
    let max = weights.iter().copied().fold(0.0_f64, f64::max);
    if max <= 0.0 {
        return weights.to_vec();
    }

    let scaled: Vec<f64> = weights.iter().map(|w| w / max).collect();
    let sum: f64 = scaled.iter().sum();
    scaled.into_iter().map(|w| w / sum).collect()
}
