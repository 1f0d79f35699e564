//! HTTP routes for the analysis endpoint.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{analyze_decision, health, AnalysisAppState};

/// Creates the analysis router with all routes.
pub fn analysis_routes(state: AnalysisAppState) -> Router {
    Router::new()
        // POST /analyze
        .route("/analyze", post(analyze_decision))
        // GET /health
        .route("/health", get(health))
        .with_state(state)
}
