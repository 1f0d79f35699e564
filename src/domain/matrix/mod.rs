//! Matrix Module - The immutable, invariant-checked decision record.
//!
//! A [`DecisionMatrix`] can only be obtained through validation. Once built,
//! every consumer may assume:
//!
//! - at least one criterion and one alternative
//! - unique names within each kind
//! - finite, non-negative weights with a positive sum
//! - exactly one finite score for every (alternative, criterion) pair

mod decision_matrix;
mod entries;

pub use decision_matrix::{DecisionMatrix, DecisionMatrixBuilder};
pub use entries::{Alternative, Criterion};
