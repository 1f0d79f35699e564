//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `MatrixVault` - Persisting decision matrices (re-validated on load)
//! - `RequestValidator` - Coarse shape checks on HTTP request bodies

mod matrix_vault;
mod request_validator;

pub use matrix_vault::MatrixVault;
pub use request_validator::{RequestShapeError, RequestValidator};
