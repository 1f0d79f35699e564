//! Gateway Module - The single entry point for external decision data.
//!
//! Files, HTTP bodies and CLI prompts all arrive here as loosely-typed
//! `serde_json::Value`s. The gateway trims, casts and shape-checks them into a
//! [`NormalizedInput`]; nothing downstream ever sees untyped data.
//!
//! # Components
//!
//! - `NormalizedInput` - Fully-typed intermediate form (also the canonical document shape)
//! - `InputTransformer` - All-or-nothing normalization with field-path errors

mod normalized;
mod transformer;

pub use normalized::{NormalizedCriterion, NormalizedInput, NormalizedScore};
pub use transformer::InputTransformer;
