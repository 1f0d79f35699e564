//! Request Validator Port - Coarse shape checks at the HTTP boundary.
//!
//! This runs before the gateway and rejects requests that are obviously
//! malformed or oversized. The gateway still re-validates everything.

use serde_json::Value;
use thiserror::Error;

/// Port for coarse request validation.
pub trait RequestValidator: Send + Sync {
    /// Validate the overall shape and size of an analysis request body.
    fn validate(&self, body: &Value) -> Result<(), RequestShapeError>;
}

/// Errors raised by coarse request validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RequestShapeError {
    #[error("Missing required field: {field}")]
    MissingRequired { field: String },

    #[error("Invalid type for field {field}: expected {expected}")]
    InvalidType { field: String, expected: String },

    #[error("Too many entries in field {field}: maximum {max}, got {actual}")]
    TooLarge {
        field: String,
        max: usize,
        actual: usize,
    },
}

impl RequestShapeError {
    /// Field path the error refers to.
    pub fn field(&self) -> &str {
        match self {
            RequestShapeError::MissingRequired { field }
            | RequestShapeError::InvalidType { field, .. }
            | RequestShapeError::TooLarge { field, .. } => field,
        }
    }
}
