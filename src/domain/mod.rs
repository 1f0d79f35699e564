//! Domain layer containing the validation-and-calculation pipeline.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (the error taxonomy)
//! - `gateway` - Sanitizes raw input into `NormalizedInput`
//! - `matrix` - The immutable, invariant-checked `DecisionMatrix`
//! - `analysis` - Weighted sum ranking, sensitivity and dominance analysis
//!
//! Data flows `gateway -> matrix -> analysis`; nothing here performs I/O.

pub mod analysis;
pub mod foundation;
pub mod gateway;
pub mod matrix;
