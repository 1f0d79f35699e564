//! Analysis Module - Pure functions over a validated decision matrix.
//!
//! # Components
//!
//! - `WsmCalculator` - Weighted sum ranking with per-criterion contributions
//! - `SensitivityAnalyzer` - Winner stability under weight perturbation
//! - `DominanceAnalyzer` - Dominated alternatives, non-discriminating criteria
//! - `weights` - Tie tolerance and weight normalization policy
//!
//! # Design Philosophy
//!
//! Nothing here fails or performs I/O. A `DecisionMatrix` cannot be invalid,
//! so ranking has no error path; only caller-supplied sensitivity arguments
//! are checked.

mod dominance;
mod ranking;
mod sensitivity;
mod weights;
mod wsm_calculator;

pub use dominance::{DominanceAnalyzer, DominatedAlternative, NonDiscriminatingCriterion};
pub use ranking::{AlternativeScore, Contribution, NormalizedWeight, RankingResult};
pub use sensitivity::{
    Robustness, SensitivityAnalysis, SensitivityAnalyzer, SensitivityPoint, SensitivityRange,
    MAX_SENSITIVITY_STEPS,
};
pub use weights::{is_tie, normalize_weights, TIE_TOLERANCE};
pub use wsm_calculator::WsmCalculator;
