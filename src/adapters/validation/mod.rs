//! Validation Adapters - Request shape validation implementations.
//!
//! Contains adapters for coarse validation of incoming analysis requests.

mod json_shape_validator;

pub use json_shape_validator::JsonShapeValidator;
