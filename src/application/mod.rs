//! Application layer - Use-case handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.

pub mod handlers;

pub use handlers::{
    AnalyzeDecisionCommand, AnalyzeDecisionHandler, AnalyzeDecisionResult, DecisionReport,
    DecisionSource,
};
