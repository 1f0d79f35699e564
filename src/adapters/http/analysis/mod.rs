//! Analysis HTTP adapter module.
//!
//! Provides the REST endpoint that ranks a decision.

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::{AnalyzeResponse, ErrorResponse};
pub use handlers::AnalysisAppState;
pub use routes::analysis_routes;
