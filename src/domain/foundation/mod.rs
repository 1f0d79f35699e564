//! Foundation module - Shared domain primitives.
//!
//! Contains the error taxonomy that every layer reports through.

mod errors;

pub use errors::{
    EntryKind, ErrorCode, InvariantViolation, PersistenceError, ShapeError, ValidationError,
};
