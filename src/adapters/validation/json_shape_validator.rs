//! JSON Shape Validator - Implementation of RequestValidator.
//!
//! Checks the coarse layout of an analysis request: a JSON object with
//! `criteria` and `scores` sections (arrays or maps) and an `alternatives`
//! array, within the configured size limits.
//! Field-level checks are left to the gateway.

use serde_json::{Map, Value};

use crate::domain::analysis::MAX_SENSITIVITY_STEPS;
use crate::ports::{RequestShapeError, RequestValidator};

/// Request validator with configurable size limits.
///
/// # Thread Safety
///
/// This struct is `Send + Sync` and can be shared across threads.
#[derive(Debug, Clone)]
pub struct JsonShapeValidator {
    max_alternatives: usize,
    max_criteria: usize,
}

impl Default for JsonShapeValidator {
    fn default() -> Self {
        Self::new(200, 100)
    }
}

impl JsonShapeValidator {
    pub fn new(max_alternatives: usize, max_criteria: usize) -> Self {
        Self {
            max_alternatives,
            max_criteria,
        }
    }

    fn require_object<'a>(
        &self,
        value: &'a Value,
        path: &str,
    ) -> Result<&'a Map<String, Value>, RequestShapeError> {
        value.as_object().ok_or_else(|| RequestShapeError::InvalidType {
            field: path.to_string(),
            expected: "object".to_string(),
        })
    }

    fn require_field<'a>(
        &self,
        obj: &'a Map<String, Value>,
        field: &str,
    ) -> Result<&'a Value, RequestShapeError> {
        obj.get(field).ok_or_else(|| RequestShapeError::MissingRequired {
            field: field.to_string(),
        })
    }

    /// Number of entries in a section given as an array or a map.
    fn section_len(&self, value: &Value, field: &str) -> Result<usize, RequestShapeError> {
        match value {
            Value::Array(items) => Ok(items.len()),
            Value::Object(entries) => Ok(entries.len()),
            _ => Err(RequestShapeError::InvalidType {
                field: field.to_string(),
                expected: "array or object".to_string(),
            }),
        }
    }

    fn check_limit(&self, field: &str, actual: usize, max: usize) -> Result<(), RequestShapeError> {
        if actual > max {
            return Err(RequestShapeError::TooLarge {
                field: field.to_string(),
                max,
                actual,
            });
        }
        Ok(())
    }

    fn validate_sensitivity(&self, value: &Value) -> Result<(), RequestShapeError> {
        let obj = self.require_object(value, "sensitivity")?;

        if let Some(span) = obj.get("span") {
            if !span.is_number() {
                return Err(RequestShapeError::InvalidType {
                    field: "sensitivity.span".to_string(),
                    expected: "number".to_string(),
                });
            }
        }
        if let Some(steps) = obj.get("steps") {
            let steps = steps.as_u64().ok_or_else(|| RequestShapeError::InvalidType {
                field: "sensitivity.steps".to_string(),
                expected: "non-negative integer".to_string(),
            })?;
            let steps = usize::try_from(steps).unwrap_or(usize::MAX);
            self.check_limit("sensitivity.steps", steps, MAX_SENSITIVITY_STEPS)?;
        }
        Ok(())
    }
}

impl RequestValidator for JsonShapeValidator {
    fn validate(&self, body: &Value) -> Result<(), RequestShapeError> {
        let obj = self.require_object(body, "root")?;

        let criteria = self.require_field(obj, "criteria")?;
        let alternatives = self.require_field(obj, "alternatives")?;
        let scores = self.require_field(obj, "scores")?;

        let criterion_count = self.section_len(criteria, "criteria")?;
        let alternative_count = alternatives
            .as_array()
            .map(Vec::len)
            .ok_or_else(|| RequestShapeError::InvalidType {
                field: "alternatives".to_string(),
                expected: "array".to_string(),
            })?;
        self.section_len(scores, "scores")?;

        self.check_limit("criteria", criterion_count, self.max_criteria)?;
        self.check_limit("alternatives", alternative_count, self.max_alternatives)?;

        if let Some(sensitivity) = obj.get("sensitivity") {
            self.validate_sensitivity(sensitivity)?;
        }

        Ok(())
    }
}
