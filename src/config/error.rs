//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ConfigValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error, PartialEq)]
pub enum ConfigValidationError {
    #[error("Invalid bind address: {0}")]
    InvalidAddress(String),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout (must be 1-300 seconds)")]
    InvalidTimeout,

    #[error("Sensitivity span must be between 0 and 1 (exclusive), got {0}")]
    InvalidSensitivitySpan(f64),

    #[error("Sensitivity steps must be between 1 and 1000, got {0}")]
    InvalidSensitivitySteps(usize),

    #[error("Request size limit for {0} must be at least 1")]
    InvalidRequestLimit(&'static str),
}
