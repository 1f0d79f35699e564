//! Application handlers.
//!
//! Command handlers that orchestrate domain operations and ports.

pub mod decision;

pub use decision::{
    AnalyzeDecisionCommand, AnalyzeDecisionHandler, AnalyzeDecisionResult, DecisionReport,
    DecisionSource,
};
