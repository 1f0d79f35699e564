//! Saved decision document - encoding and untrusted decoding.
//!
//! Both vaults share this codec. Decoding stops at a `serde_json::Value`;
//! from there the data takes the same gateway path as any external input.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::domain::foundation::{PersistenceError, ValidationError};
use crate::domain::gateway::{InputTransformer, NormalizedInput};
use crate::domain::matrix::DecisionMatrix;

/// Marker written into every saved document.
pub const DOCUMENT_FORMAT: &str = "decision-matrix/v1";

/// Serialization used for a saved document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// `.yaml` / `.yml` select YAML; anything else is JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                DocumentFormat::Yaml
            }
            _ => DocumentFormat::Json,
        }
    }
}

#[derive(Serialize)]
struct SavedDecision<'a> {
    format: &'static str,
    saved_at: DateTime<Utc>,
    #[serde(flatten)]
    input: &'a NormalizedInput,
}

/// Encodes the complete matrix. No derived ranking is stored.
pub fn encode(matrix: &DecisionMatrix, format: DocumentFormat) -> Result<String, PersistenceError> {
    let input = matrix.to_input();
    let document = SavedDecision {
        format: DOCUMENT_FORMAT,
        saved_at: Utc::now(),
        input: &input,
    };

    let encoded = match format {
        DocumentFormat::Json => serde_json::to_string_pretty(&document).map_err(|e| e.to_string()),
        DocumentFormat::Yaml => serde_yaml::to_string(&document).map_err(|e| e.to_string()),
    };
    encoded.map_err(|reason| PersistenceError::Serialization { reason })
}

/// Parses stored text and rebuilds the matrix through the gateway.
pub fn decode(
    text: &str,
    format: DocumentFormat,
    path: &Path,
) -> Result<DecisionMatrix, ValidationError> {
    let malformed = |reason: String| PersistenceError::Malformed {
        path: path.display().to_string(),
        reason,
    };

    let raw: Value = match format {
        DocumentFormat::Json => serde_json::from_str(text).map_err(|e| malformed(e.to_string()))?,
        DocumentFormat::Yaml => serde_yaml::from_str(text)
            .map_err(|e| e.to_string())
            .and_then(yaml_to_json)
            .map_err(malformed)?,
    };

    match raw.get("format") {
        None | Some(Value::Null) => {}
        Some(Value::String(marker)) if marker == DOCUMENT_FORMAT => {}
        Some(other) => {
            return Err(malformed(format!("unsupported document format {}", other)).into());
        }
    }

    let input = InputTransformer::transform(&raw)?;
    DecisionMatrix::new(input)
}

/// Converts a YAML tree to JSON. Non-finite floats (`.nan`, `.inf`) become
/// the strings `"NaN"` / `"inf"` so they reach the matrix's finiteness check
/// exactly as a hand-edited JSON document would.
fn yaml_to_json(value: serde_yaml::Value) -> Result<Value, String> {
    use serde_yaml::Value as Yaml;

    Ok(match value {
        Yaml::Null => Value::Null,
        Yaml::Bool(b) => Value::Bool(b),
        Yaml::Number(n) => {
            if let Some(i) = n.as_i64() {
                Value::from(i)
            } else if let Some(u) = n.as_u64() {
                Value::from(u)
            } else {
                let f = n
                    .as_f64()
                    .ok_or_else(|| format!("unrepresentable number {}", n))?;
                serde_json::Number::from_f64(f)
                    .map(Value::Number)
                    .unwrap_or_else(|| Value::String(f.to_string()))
            }
        }
        Yaml::String(s) => Value::String(s),
        Yaml::Sequence(items) => Value::Array(
            items
                .into_iter()
                .map(yaml_to_json)
                .collect::<Result<_, _>>()?,
        ),
        Yaml::Mapping(entries) => {
            let mut obj = Map::new();
            for (key, value) in entries {
                let key = match key {
                    Yaml::String(s) => s,
                    Yaml::Number(n) => n.to_string(),
                    Yaml::Bool(b) => b.to_string(),
                    other => return Err(format!("unsupported mapping key {:?}", other)),
                };
                obj.insert(key, yaml_to_json(value)?);
            }
            Value::Object(obj)
        }
        Yaml::Tagged(tagged) => yaml_to_json(tagged.value)?,
    })
}
