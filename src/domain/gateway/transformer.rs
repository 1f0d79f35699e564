//! Input Transformer - normalization of raw decision data.
//!
//! Accepted shapes:
//!
//! | Key | Shapes |
//! |---|---|
//! | `title` | optional string |
//! | `criteria` | `[{name, weight}]` or `{name: weight}` |
//! | `alternatives` | `[name]` or `[{name}]` |
//! | `scores` | `[{alternative, criterion, value}]` or `{alternative: {criterion: value}}` |
//!
//! Numbers may arrive as JSON numbers or numeric-looking strings (`" 0.5 "`).
//! Unknown keys are ignored.

use serde_json::{Map, Value};
use tracing::debug;

use super::{NormalizedCriterion, NormalizedInput, NormalizedScore};
use crate::domain::foundation::{ShapeError, ValidationError};

/// Gateway entry point. Stateless.
pub struct InputTransformer;

impl InputTransformer {
    /// Normalizes raw input into a [`NormalizedInput`].
    ///
    /// Fails on the first problem found; never returns a partial result.
    pub fn transform(raw: &Value) -> Result<NormalizedInput, ValidationError> {
        let obj = require_object(raw, "root")?;

        let title = optional_title(obj)?;
        let criteria = Self::criteria(require_field(obj, "criteria")?)?;
        let alternatives = Self::alternatives(require_field(obj, "alternatives")?)?;
        let scores = Self::scores(require_field(obj, "scores")?)?;

        debug!(
            criteria = criteria.len(),
            alternatives = alternatives.len(),
            scores = scores.len(),
            "Normalized decision input"
        );

        Ok(NormalizedInput {
            title,
            criteria,
            alternatives,
            scores,
        })
    }

    fn criteria(value: &Value) -> Result<Vec<NormalizedCriterion>, ShapeError> {
        match value {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    let path = format!("criteria[{}]", i);
                    let obj = require_object(item, &path)?;
                    let name = require_name(require_field_at(obj, "name", &path)?, &format!("{}.name", path))?;
                    let weight = require_number(
                        require_field_at(obj, "weight", &path)?,
                        &format!("{}.weight", path),
                    )?;
                    Ok(NormalizedCriterion::new(name, weight))
                })
                .collect(),
            Value::Object(map) => map
                .iter()
                .map(|(key, weight)| {
                    let path = format!("criteria.{}", key);
                    let name = trimmed_name(key, &path)?;
                    let weight = require_number(weight, &path)?;
                    Ok(NormalizedCriterion::new(name, weight))
                })
                .collect(),
            other => Err(ShapeError::invalid_type(
                "criteria",
                "array or object",
                type_name(other),
            )),
        }
    }

    fn alternatives(value: &Value) -> Result<Vec<String>, ShapeError> {
        let items = value
            .as_array()
            .ok_or_else(|| ShapeError::invalid_type("alternatives", "array", type_name(value)))?;

        items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                let path = format!("alternatives[{}]", i);
                match item {
                    Value::Object(obj) => require_name(
                        require_field_at(obj, "name", &path)?,
                        &format!("{}.name", path),
                    ),
                    other => require_name(other, &path),
                }
            })
            .collect()
    }

    fn scores(value: &Value) -> Result<Vec<NormalizedScore>, ShapeError> {
        match value {
            Value::Array(items) => items
                .iter()
                .enumerate()
                .map(|(i, item)| {
                    let path = format!("scores[{}]", i);
                    let obj = require_object(item, &path)?;
                    let alternative = require_name(
                        require_field_at(obj, "alternative", &path)?,
                        &format!("{}.alternative", path),
                    )?;
                    let criterion = require_name(
                        require_field_at(obj, "criterion", &path)?,
                        &format!("{}.criterion", path),
                    )?;
                    let value = require_number(
                        require_field_at(obj, "value", &path)?,
                        &format!("{}.value", path),
                    )?;
                    Ok(NormalizedScore::new(alternative, criterion, value))
                })
                .collect(),
            Value::Object(rows) => {
                let mut scores = Vec::new();
                for (alt_key, row) in rows {
                    let row_path = format!("scores.{}", alt_key);
                    let alternative = trimmed_name(alt_key, &row_path)?;
                    let cells = require_object(row, &row_path)?;
                    for (crit_key, cell) in cells {
                        let path = format!("{}.{}", row_path, crit_key);
                        let criterion = trimmed_name(crit_key, &path)?;
                        let value = require_number(cell, &path)?;
                        scores.push(NormalizedScore::new(alternative.clone(), criterion, value));
                    }
                }
                Ok(scores)
            }
            other => Err(ShapeError::invalid_type(
                "scores",
                "array or object",
                type_name(other),
            )),
        }
    }
}

// =========================================================================
// Helpers
// =========================================================================

fn require_object<'a>(value: &'a Value, path: &str) -> Result<&'a Map<String, Value>, ShapeError> {
    value
        .as_object()
        .ok_or_else(|| ShapeError::invalid_type(path, "object", type_name(value)))
}

/// An explicit `null` is returned as-is so the caller reports it as a type error.
fn require_field<'a>(obj: &'a Map<String, Value>, field: &str) -> Result<&'a Value, ShapeError> {
    obj.get(field).ok_or_else(|| ShapeError::missing(field))
}

fn require_field_at<'a>(
    obj: &'a Map<String, Value>,
    field: &str,
    path: &str,
) -> Result<&'a Value, ShapeError> {
    obj.get(field)
        .ok_or_else(|| ShapeError::missing(format!("{}.{}", path, field)))
}

fn optional_title(obj: &Map<String, Value>) -> Result<Option<String>, ShapeError> {
    match obj.get("title") {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            Ok((!trimmed.is_empty()).then(|| trimmed.to_string()))
        }
        Some(other) => Err(ShapeError::invalid_type("title", "string", type_name(other))),
    }
}

fn require_name(value: &Value, path: &str) -> Result<String, ShapeError> {
    match value {
        Value::String(s) => trimmed_name(s, path),
        other => Err(ShapeError::invalid_type(path, "string", type_name(other))),
    }
}

fn trimmed_name(raw: &str, path: &str) -> Result<String, ShapeError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ShapeError::empty_name(path));
    }
    Ok(trimmed.to_string())
}

/// Casts a JSON number or numeric-looking string to `f64`.
///
/// Strings such as `"NaN"` or `"inf"` parse successfully; rejecting
/// non-finite values is the decision matrix's job, not the gateway's.
fn require_number(value: &Value, path: &str) -> Result<f64, ShapeError> {
    match value {
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| ShapeError::not_numeric(path, n.to_string())),
        Value::String(s) => {
            let trimmed = s.trim();
            trimmed
                .parse::<f64>()
                .map_err(|_| ShapeError::not_numeric(path, trimmed))
        }
        other => Err(ShapeError::invalid_type(path, "number", type_name(other))),
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
