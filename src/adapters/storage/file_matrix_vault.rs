//! File-based Matrix Vault Adapter
//!
//! Stores each decision matrix as one JSON or YAML document on disk.
//! Every load re-enters through the gateway.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use tracing::{debug, warn};

use super::document::{decode, encode, DocumentFormat};
use crate::domain::foundation::{PersistenceError, ValidationError};
use crate::domain::matrix::DecisionMatrix;
use crate::ports::MatrixVault;

/// File-based storage for decision matrices.
///
/// The format follows the path's extension (`.yaml`/`.yml` or JSON).
#[derive(Debug, Clone, Default)]
pub struct FileMatrixVault;

impl FileMatrixVault {
    pub fn new() -> Self {
        Self
    }

    /// Ensure the parent directory exists
    fn ensure_parent(path: &Path) -> Result<(), PersistenceError> {
        match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => {
                fs::create_dir_all(dir).map_err(|e| PersistenceError::Io {
                    path: dir.display().to_string(),
                    reason: e.to_string(),
                })
            }
            _ => Ok(()),
        }
    }
}

impl MatrixVault for FileMatrixVault {
    fn save(&self, matrix: &DecisionMatrix, path: &Path) -> Result<(), ValidationError> {
        Self::ensure_parent(path)?;

        let text = encode(matrix, DocumentFormat::from_path(path))?;
        fs::write(path, text).map_err(|e| PersistenceError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        debug!(path = %path.display(), "Saved decision matrix");
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<DecisionMatrix, ValidationError> {
        let text = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => PersistenceError::NotFound {
                path: path.display().to_string(),
            },
            _ => PersistenceError::Io {
                path: path.display().to_string(),
                reason: e.to_string(),
            },
        })?;

        let matrix = decode(&text, DocumentFormat::from_path(path), path).map_err(|e| {
            warn!(path = %path.display(), error = %e, "Rejected saved decision matrix");
            e
        })?;

        debug!(
            path = %path.display(),
            alternatives = matrix.alternative_count(),
            "Loaded decision matrix"
        );
        Ok(matrix)
    }

    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::InvariantViolation;
    use tempfile::TempDir;

    fn test_matrix() -> DecisionMatrix {
        DecisionMatrix::builder()
            .criterion("Cost", 0.5)
            .criterion("Quality", 0.5)
            .alternatives(vec!["A", "B", "C"])
            .score("A", "Cost", 8.0)
            .score("A", "Quality", 4.0)
            .score("B", "Cost", 4.0)
            .score("B", "Quality", 8.0)
            .score("C", "Cost", 5.0)
            .score("C", "Quality", 5.0)
            .build()
            .unwrap()
    }

    #[test]
    fn test_file_vault_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let vault = FileMatrixVault::new();
        let path = temp_dir.path().join("decision.json");

        vault.save(&test_matrix(), &path).unwrap();
        let loaded = vault.load(&path).unwrap();

        assert_eq!(loaded, test_matrix());
    }

    #[test]
    fn test_file_vault_yaml_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let vault = FileMatrixVault::new();
        let path = temp_dir.path().join("decision.yaml");

        vault.save(&test_matrix(), &path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("criteria:"));
        assert_eq!(vault.load(&path).unwrap(), test_matrix());
    }

    #[test]
    fn test_file_vault_creates_parent_dirs() {
        let temp_dir = TempDir::new().unwrap();
        let vault = FileMatrixVault::new();
        let path = temp_dir.path().join("nested/deeper/decision.json");

        vault.save(&test_matrix(), &path).unwrap();
        assert!(vault.exists(&path));
    }

    #[test]
    fn test_file_vault_load_nonexistent() {
        let temp_dir = TempDir::new().unwrap();
        let vault = FileMatrixVault::new();
        let path = temp_dir.path().join("missing.json");

        assert!(!vault.exists(&path));
        assert!(matches!(
            vault.load(&path),
            Err(ValidationError::Persistence(PersistenceError::NotFound { .. }))
        ));
    }

    #[test]
    fn test_file_vault_rejects_hand_edited_negative_weight() {
        let temp_dir = TempDir::new().unwrap();
        let vault = FileMatrixVault::new();
        let path = temp_dir.path().join("decision.json");

        vault.save(&test_matrix(), &path).unwrap();
        let edited = fs::read_to_string(&path)
            .unwrap()
            .replacen("\"weight\": 0.5", "\"weight\": -0.5", 1);
        fs::write(&path, edited).unwrap();

        match vault.load(&path) {
            Err(ValidationError::Invariant(InvariantViolation::NegativeWeight { criterion, .. })) => {
                assert_eq!(criterion, "Cost");
            }
            other => panic!("Expected NegativeWeight, got {:?}", other),
        }
    }

    #[test]
    fn test_file_vault_overwrites_previous_save() {
        let temp_dir = TempDir::new().unwrap();
        let vault = FileMatrixVault::new();
        let path = temp_dir.path().join("decision.json");

        vault.save(&test_matrix(), &path).unwrap();
        let reweighted = test_matrix().with_weight("Cost", 2.0).unwrap();
        vault.save(&reweighted, &path).unwrap();

        let loaded = vault.load(&path).unwrap();
        assert_eq!(loaded.criterion("Cost").unwrap().weight(), 2.0);
    }
}
