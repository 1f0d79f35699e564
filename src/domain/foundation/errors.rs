//! Error types for the domain layer.
//!
//! Every failure the engine can report belongs to one `ValidationError`
//! family, split by the layer that raised it:
//!
//! - [`ShapeError`] - the gateway could not normalize raw input
//! - [`InvariantViolation`] - normalized input breaks a decision matrix invariant
//! - [`PersistenceError`] - the vault could not read or write a document

use std::fmt;
use thiserror::Error;

/// Errors raised while normalizing loosely-typed input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ShapeError {
    #[error("Field '{field}' is required")]
    MissingField { field: String },

    #[error("Field '{field}' has invalid type: expected {expected}, got {actual}")]
    InvalidType {
        field: String,
        expected: String,
        actual: String,
    },

    #[error("Field '{field}' must be numeric, got '{value}'")]
    NotNumeric { field: String, value: String },

    #[error("Field '{field}' cannot be empty")]
    EmptyName { field: String },

    #[error("Criterion '{name}' does not exist")]
    UnknownCriterion { name: String },

    #[error("Field '{field}' has invalid sensitivity delta {value}: {reason}")]
    InvalidSensitivityDelta {
        field: String,
        value: String,
        reason: String,
    },
}

impl ShapeError {
    /// Creates a missing field error.
    pub fn missing(field: impl Into<String>) -> Self {
        ShapeError::MissingField {
            field: field.into(),
        }
    }

    /// Creates an invalid type error.
    pub fn invalid_type(
        field: impl Into<String>,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        ShapeError::InvalidType {
            field: field.into(),
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Creates a not numeric error.
    pub fn not_numeric(field: impl Into<String>, value: impl Into<String>) -> Self {
        ShapeError::NotNumeric {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Creates an empty name error.
    pub fn empty_name(field: impl Into<String>) -> Self {
        ShapeError::EmptyName {
            field: field.into(),
        }
    }

    /// Returns the field path the error refers to.
    pub fn field(&self) -> &str {
        match self {
            ShapeError::MissingField { field }
            | ShapeError::InvalidType { field, .. }
            | ShapeError::NotNumeric { field, .. }
            | ShapeError::EmptyName { field }
            | ShapeError::InvalidSensitivityDelta { field, .. } => field,
            ShapeError::UnknownCriterion { .. } => "criterion",
        }
    }
}

/// Which kind of named entry an invariant refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    Criterion,
    Alternative,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Criterion => write!(f, "criterion"),
            EntryKind::Alternative => write!(f, "alternative"),
        }
    }
}

/// Errors raised when normalized input would produce an unsound decision matrix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("Criterion '{criterion}' has negative weight {weight}")]
    NegativeWeight {
        index: usize,
        criterion: String,
        weight: String,
    },

    /// The offending value is kept as text so that two NaN failures compare equal.
    #[error("Field '{field}' must be finite, got {value}")]
    NonFiniteValue { field: String, value: String },

    #[error("Missing score for alternative '{alternative}' on criterion '{criterion}'")]
    IncompleteMatrix {
        alternative: String,
        criterion: String,
    },

    #[error("Duplicate {kind} name '{name}'")]
    DuplicateName { kind: EntryKind, name: String },

    #[error("Decision matrix needs at least one {kind}")]
    EmptyMatrix { kind: EntryKind },

    #[error("Score for alternative '{alternative}' on criterion '{criterion}' is given more than once")]
    DuplicateScore {
        alternative: String,
        criterion: String,
    },

    #[error("Field '{field}' references unknown {kind} '{name}'")]
    UnknownReference {
        field: String,
        kind: EntryKind,
        name: String,
    },

    #[error("Criterion weights sum to zero; at least one weight must be positive")]
    ZeroWeightSum,
}

impl InvariantViolation {
    /// Creates a non-finite value error from the offending number.
    pub fn non_finite(field: impl Into<String>, value: f64) -> Self {
        InvariantViolation::NonFiniteValue {
            field: field.into(),
            value: value.to_string(),
        }
    }

    /// Returns the field path the violation refers to.
    pub fn field(&self) -> String {
        match self {
            InvariantViolation::NegativeWeight { index, .. } => {
                format!("criteria[{}].weight", index)
            }
            InvariantViolation::NonFiniteValue { field, .. }
            | InvariantViolation::UnknownReference { field, .. } => field.clone(),
            InvariantViolation::IncompleteMatrix {
                alternative,
                criterion,
            }
            | InvariantViolation::DuplicateScore {
                alternative,
                criterion,
            } => format!("scores.{}.{}", alternative, criterion),
            InvariantViolation::DuplicateName { kind, .. }
            | InvariantViolation::EmptyMatrix { kind } => match kind {
                EntryKind::Criterion => "criteria".to_string(),
                EntryKind::Alternative => "alternatives".to_string(),
            },
            InvariantViolation::ZeroWeightSum => "criteria".to_string(),
        }
    }
}

/// Errors raised by the vault while reading or writing documents.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PersistenceError {
    #[error("No saved decision at {path}")]
    NotFound { path: String },

    #[error("I/O error at {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("Malformed document at {path}: {reason}")]
    Malformed { path: String, reason: String },

    #[error("Failed to serialize decision: {reason}")]
    Serialization { reason: String },
}

/// The single error family surfaced by gateway, core record and vault.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(transparent)]
    Shape(#[from] ShapeError),

    #[error(transparent)]
    Invariant(#[from] InvariantViolation),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

impl ValidationError {
    /// Stable error code for API consumers.
    pub fn code(&self) -> ErrorCode {
        match self {
            ValidationError::Shape(_) => ErrorCode::ShapeError,
            ValidationError::Invariant(_) => ErrorCode::InvariantViolation,
            ValidationError::Persistence(_) => ErrorCode::PersistenceError,
        }
    }

    /// Field path the error refers to, where one exists.
    pub fn field(&self) -> Option<String> {
        match self {
            ValidationError::Shape(e) => Some(e.field().to_string()),
            ValidationError::Invariant(e) => Some(e.field()),
            ValidationError::Persistence(_) => None,
        }
    }
}

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    ShapeError,
    InvariantViolation,
    PersistenceError,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ShapeError => "SHAPE_ERROR",
            ErrorCode::InvariantViolation => "INVARIANT_VIOLATION",
            ErrorCode::PersistenceError => "PERSISTENCE_ERROR",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_error_missing_field_displays_correctly() {
        let err = ShapeError::missing("criteria");
        assert_eq!(format!("{}", err), "Field 'criteria' is required");
    }

    #[test]
    fn shape_error_not_numeric_displays_correctly() {
        let err = ShapeError::not_numeric("criteria[0].weight", "heavy");
        assert_eq!(
            format!("{}", err),
            "Field 'criteria[0].weight' must be numeric, got 'heavy'"
        );
        assert_eq!(err.field(), "criteria[0].weight");
    }

    #[test]
    fn negative_weight_mentions_criterion() {
        let err = InvariantViolation::NegativeWeight {
            index: 0,
            criterion: "Cost".to_string(),
            weight: "-1".to_string(),
        };
        assert!(err.to_string().contains("Cost"));
        assert_eq!(err.field(), "criteria[0].weight");
    }

    #[test]
    fn non_finite_errors_compare_equal_for_nan() {
        let a = InvariantViolation::non_finite("criteria[0].weight", f64::NAN);
        let b = InvariantViolation::non_finite("criteria[0].weight", f64::NAN);
        assert_eq!(a, b);
        assert!(a.to_string().contains("NaN"));
    }

    #[test]
    fn validation_error_wraps_and_reports_code() {
        let err: ValidationError = InvariantViolation::ZeroWeightSum.into();
        assert_eq!(err.code(), ErrorCode::InvariantViolation);
        assert_eq!(err.field().as_deref(), Some("criteria"));

        let err: ValidationError = PersistenceError::NotFound {
            path: "x.json".to_string(),
        }
        .into();
        assert_eq!(err.code(), ErrorCode::PersistenceError);
        assert!(err.field().is_none());
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::ShapeError), "SHAPE_ERROR");
        assert_eq!(
            format!("{}", ErrorCode::InvariantViolation),
            "INVARIANT_VIOLATION"
        );
    }
}
