//! Decision command handlers.

mod analyze_decision;

pub use analyze_decision::{
    AnalyzeDecisionCommand, AnalyzeDecisionHandler, AnalyzeDecisionResult, DecisionReport,
    DecisionSource,
};
