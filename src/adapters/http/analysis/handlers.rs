//! HTTP handlers for the analysis endpoint.
//!
//! These handlers connect Axum routes to the analyze-decision use case.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Json, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::Value;
use tracing::{debug, warn};

use crate::application::{AnalyzeDecisionCommand, AnalyzeDecisionHandler};
use crate::config::AnalysisConfig;
use crate::domain::analysis::SensitivityRange;
use crate::domain::foundation::{ShapeError, ValidationError};
use crate::ports::{RequestShapeError, RequestValidator};

use super::dto::{AnalyzeResponse, ErrorResponse, HealthResponse, SensitivityOptions};

// ════════════════════════════════════════════════════════════════════════════════
// Error Type
// ════════════════════════════════════════════════════════════════════════════════

/// Analysis API error that implements IntoResponse.
pub enum AnalysisApiError {
    MalformedBody(String),
    RequestShape(RequestShapeError),
    Validation { error: ValidationError, verbose: bool },
}

impl IntoResponse for AnalysisApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            AnalysisApiError::MalformedBody(msg) => {
                (StatusCode::BAD_REQUEST, ErrorResponse::bad_request(msg))
            }
            AnalysisApiError::RequestShape(err) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::request_shape(&err),
            ),
            AnalysisApiError::Validation {
                error: ValidationError::Persistence(err),
                ..
            } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::internal(err.to_string()),
            ),
            AnalysisApiError::Validation { error, verbose } => (
                StatusCode::UNPROCESSABLE_ENTITY,
                ErrorResponse::validation(&error, verbose),
            ),
        };
        (status, Json(error)).into_response()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing analysis dependencies.
#[derive(Clone)]
pub struct AnalysisAppState {
    pub validator: Arc<dyn RequestValidator>,
    pub handler: Arc<AnalyzeDecisionHandler>,
    pub analysis: AnalysisConfig,
    pub verbose_errors: bool,
}

impl AnalysisAppState {
    fn invalid(&self, error: ValidationError) -> AnalysisApiError {
        AnalysisApiError::Validation {
            error,
            verbose: self.verbose_errors,
        }
    }

    /// Sensitivity range for a request, falling back to the configured defaults.
    fn sensitivity_range(&self, body: &Value) -> Result<SensitivityRange, AnalysisApiError> {
        let options: SensitivityOptions = match body.get("sensitivity") {
            Some(value) => serde_json::from_value(value.clone()).map_err(|e| {
                self.invalid(
                    ShapeError::InvalidType {
                        field: "sensitivity".to_string(),
                        expected: "object with span and steps".to_string(),
                        actual: e.to_string(),
                    }
                    .into(),
                )
            })?,
            None => SensitivityOptions::default(),
        };

        SensitivityRange::symmetric(
            options.span.unwrap_or(self.analysis.sensitivity_span),
            options.steps.unwrap_or(self.analysis.sensitivity_steps),
        )
        .map_err(|e| self.invalid(e))
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Handlers
// ════════════════════════════════════════════════════════════════════════════════

/// POST /analyze
///
/// Ranks the submitted decision and returns breakdown and sensitivity.
pub async fn analyze_decision(
    State(state): State<AnalysisAppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, AnalysisApiError> {
    let Json(body) = body.map_err(|rejection| {
        debug!(error = %rejection.body_text(), "Rejected malformed analyze request");
        AnalysisApiError::MalformedBody(rejection.body_text())
    })?;

    // Coarse shape check before the gateway
    state.validator.validate(&body).map_err(|e| {
        debug!(field = %e.field(), "Analyze request failed shape check");
        AnalysisApiError::RequestShape(e)
    })?;

    let range = state.sensitivity_range(&body)?;
    let result = state
        .handler
        .handle(AnalyzeDecisionCommand::raw(body).with_sensitivity(range))
        .map_err(|e| {
            warn!(code = %e.code(), field = ?e.field(), "Analyze request rejected");
            state.invalid(e)
        })?;

    Ok(Json(result.report.into()))
}

/// GET /health
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
