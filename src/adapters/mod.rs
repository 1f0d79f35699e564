//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `cli` - Interactive prompts and text reports
//! - `http` - REST endpoint (axum)
//! - `storage` - Matrix vaults (files, in-memory)
//! - `validation` - Coarse request shape checks

pub mod cli;
pub mod http;
pub mod storage;
pub mod validation;

pub use storage::{FileMatrixVault, InMemoryMatrixVault};
pub use validation::JsonShapeValidator;
