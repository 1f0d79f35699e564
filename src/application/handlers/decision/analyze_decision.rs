//! AnalyzeDecisionHandler - Use case for ranking a decision and explaining it.
//!
//! Accepts raw input or a saved document, builds the matrix through the
//! gateway, optionally saves it, and runs every analysis over it.

use std::path::PathBuf;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info};

use crate::domain::analysis::{
    DominanceAnalyzer, DominatedAlternative, NonDiscriminatingCriterion, RankingResult,
    SensitivityAnalysis, SensitivityAnalyzer, SensitivityRange, WsmCalculator,
};
use crate::domain::foundation::ValidationError;
use crate::domain::gateway::InputTransformer;
use crate::domain::matrix::DecisionMatrix;
use crate::ports::MatrixVault;

/// Where the decision comes from.
#[derive(Debug, Clone)]
pub enum DecisionSource {
    /// Untrusted external input (HTTP body, CLI prompts).
    Raw(Value),
    /// A document previously written by a vault.
    Saved(PathBuf),
}

/// Command to analyze a decision.
#[derive(Debug, Clone)]
pub struct AnalyzeDecisionCommand {
    pub source: DecisionSource,
    /// Save the validated matrix here before analysis.
    pub save_to: Option<PathBuf>,
    /// Overrides the handler's default sensitivity range.
    pub sensitivity: Option<SensitivityRange>,
}

impl AnalyzeDecisionCommand {
    pub fn raw(input: Value) -> Self {
        Self {
            source: DecisionSource::Raw(input),
            save_to: None,
            sensitivity: None,
        }
    }

    pub fn saved(path: impl Into<PathBuf>) -> Self {
        Self {
            source: DecisionSource::Saved(path.into()),
            save_to: None,
            sensitivity: None,
        }
    }

    pub fn save_to(mut self, path: impl Into<PathBuf>) -> Self {
        self.save_to = Some(path.into());
        self
    }

    pub fn with_sensitivity(mut self, range: SensitivityRange) -> Self {
        self.sensitivity = Some(range);
        self
    }
}

/// Everything computed for one decision matrix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecisionReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub ranking: RankingResult,
    pub sensitivity: Vec<SensitivityAnalysis>,
    pub dominated: Vec<DominatedAlternative>,
    pub non_discriminating: Vec<NonDiscriminatingCriterion>,
}

impl DecisionReport {
    pub fn winner(&self) -> Option<&str> {
        self.ranking.winner().map(|w| w.alternative.as_str())
    }

    /// True when any criterion's sweep changes the winner.
    pub fn is_fragile(&self) -> bool {
        self.sensitivity.iter().any(SensitivityAnalysis::is_fragile)
    }

    pub fn fragile_criteria(&self) -> impl Iterator<Item = &SensitivityAnalysis> {
        self.sensitivity.iter().filter(|s| s.is_fragile())
    }
}

/// Result of a successful analysis.
#[derive(Debug, Clone)]
pub struct AnalyzeDecisionResult {
    pub matrix: DecisionMatrix,
    pub report: DecisionReport,
}

/// Handler for analyzing decisions.
pub struct AnalyzeDecisionHandler {
    vault: Arc<dyn MatrixVault>,
    default_range: SensitivityRange,
}

impl AnalyzeDecisionHandler {
    pub fn new(vault: Arc<dyn MatrixVault>, default_range: SensitivityRange) -> Self {
        Self {
            vault,
            default_range,
        }
    }

    pub fn handle(&self, cmd: AnalyzeDecisionCommand) -> Result<AnalyzeDecisionResult, ValidationError> {
        // 1. Build the matrix; both sources pass through the gateway
        let matrix = match &cmd.source {
            DecisionSource::Raw(input) => DecisionMatrix::new(InputTransformer::transform(input)?)?,
            DecisionSource::Saved(path) => self.vault.load(path)?,
        };

        // 2. Persist if requested
        if let Some(path) = &cmd.save_to {
            self.vault.save(&matrix, path)?;
            info!(path = %path.display(), "Decision matrix saved");
        }

        // 3. Analyze
        let range = cmd.sensitivity.as_ref().unwrap_or(&self.default_range);
        let report = Self::analyze(&matrix, range);

        debug!(
            alternatives = matrix.alternative_count(),
            criteria = matrix.criterion_count(),
            winner = report.winner().unwrap_or_default(),
            fragile = report.is_fragile(),
            "Decision analyzed"
        );

        Ok(AnalyzeDecisionResult { matrix, report })
    }

    /// Runs ranking, sensitivity and dominance over a validated matrix.
    pub fn analyze(matrix: &DecisionMatrix, range: &SensitivityRange) -> DecisionReport {
        DecisionReport {
            title: matrix.title().map(str::to_string),
            ranking: WsmCalculator::rank(matrix),
            sensitivity: SensitivityAnalyzer::analyze_all(matrix, range),
            dominated: DominanceAnalyzer::find_dominated(matrix),
            non_discriminating: DominanceAnalyzer::find_non_discriminating(matrix),
        }
    }
}
