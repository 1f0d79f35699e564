//! Data Transfer Objects for the analysis endpoint.
//!
//! Requests arrive as raw JSON and go straight to the gateway, so only
//! responses are typed here.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::application::DecisionReport;
use crate::domain::analysis::{
    Contribution, DominatedAlternative, NonDiscriminatingCriterion, NormalizedWeight,
    SensitivityAnalysis,
};
use crate::domain::foundation::ValidationError;
use crate::ports::RequestShapeError;

// ════════════════════════════════════════════════════════════════════════════════
// Request options
// ════════════════════════════════════════════════════════════════════════════════

/// Optional `sensitivity` object of an analyze request.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SensitivityOptions {
    pub span: Option<f64>,
    pub steps: Option<usize>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Responses
// ════════════════════════════════════════════════════════════════════════════════

/// Leaderboard line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub rank: usize,
    pub alternative: String,
    pub score: f64,
    pub tied_with_next: bool,
}

/// Per-alternative explanation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakdownEntry {
    pub alternative: String,
    pub contributions: Vec<Contribution>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_to_next: Option<f64>,
}

/// Sensitivity section of the response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SensitivitySummary {
    pub fragile: bool,
    pub criteria: Vec<SensitivityAnalysis>,
}

/// Successful `POST /analyze` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub ranking: Vec<RankingEntry>,
    pub normalized_weights: Vec<NormalizedWeight>,
    pub breakdown: Vec<BreakdownEntry>,
    pub sensitivity: SensitivitySummary,
    pub dominated: Vec<DominatedAlternative>,
    pub non_discriminating: Vec<NonDiscriminatingCriterion>,
}

impl From<DecisionReport> for AnalyzeResponse {
    fn from(report: DecisionReport) -> Self {
        let fragile = report.is_fragile();
        let ranking = report
            .ranking
            .ranking
            .iter()
            .map(|line| RankingEntry {
                rank: line.rank,
                alternative: line.alternative.clone(),
                score: line.total,
                tied_with_next: line.tied_with_next,
            })
            .collect();
        let breakdown = report
            .ranking
            .ranking
            .into_iter()
            .map(|line| BreakdownEntry {
                alternative: line.alternative,
                contributions: line.contributions,
                margin_to_next: line.margin_to_next,
            })
            .collect();

        Self {
            title: report.title,
            ranking,
            normalized_weights: report.ranking.normalized_weights,
            breakdown,
            sensitivity: SensitivitySummary {
                fragile,
                criteria: report.sensitivity,
            },
            dominated: report.dominated,
            non_discriminating: report.non_discriminating,
        }
    }
}

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: "BAD_REQUEST".to_string(),
            message: message.into(),
            details: None,
        }
    }

    /// A failed validation. `verbose` includes the full error text as the reason.
    pub fn validation(error: &ValidationError, verbose: bool) -> Self {
        let field = error.field();
        let reason = if verbose {
            error.to_string()
        } else {
            error.code().to_string()
        };
        Self {
            code: error.code().to_string(),
            message: error.to_string(),
            details: Some(json!({ "field": field, "reason": reason })),
        }
    }

    pub fn request_shape(error: &RequestShapeError) -> Self {
        Self {
            code: "SHAPE_ERROR".to_string(),
            message: error.to_string(),
            details: Some(json!({ "field": error.field(), "reason": error.to_string() })),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }
}
