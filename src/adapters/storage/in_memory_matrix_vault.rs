//! In-Memory Matrix Vault Adapter
//!
//! Keeps serialized documents in memory, keyed by path. Loading still
//! decodes and re-validates, so it behaves like the file vault.
//! Useful for testing and development.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use super::document::{decode, encode, DocumentFormat};
use crate::domain::foundation::{PersistenceError, ValidationError};
use crate::domain::matrix::DecisionMatrix;
use crate::ports::MatrixVault;

/// In-memory storage for decision documents
#[derive(Debug, Clone, Default)]
pub struct InMemoryMatrixVault {
    documents: Arc<RwLock<HashMap<PathBuf, String>>>,
}

impl InMemoryMatrixVault {
    /// Create a new in-memory vault
    pub fn new() -> Self {
        Self::default()
    }

    /// Store raw text at `path`, bypassing encoding (simulates hand edits)
    pub fn put_raw(&self, path: impl Into<PathBuf>, text: impl Into<String>) {
        self.documents
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(path.into(), text.into());
    }

    /// Raw text stored at `path`, if any
    pub fn raw(&self, path: &Path) -> Option<String> {
        self.documents
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(path)
            .cloned()
    }

    /// Get the number of stored documents
    pub fn document_count(&self) -> usize {
        self.documents.read().unwrap_or_else(|e| e.into_inner()).len()
    }
}

impl MatrixVault for InMemoryMatrixVault {
    fn save(&self, matrix: &DecisionMatrix, path: &Path) -> Result<(), ValidationError> {
        let text = encode(matrix, DocumentFormat::from_path(path))?;
        self.put_raw(path, text);
        Ok(())
    }

    fn load(&self, path: &Path) -> Result<DecisionMatrix, ValidationError> {
        let text = self.raw(path).ok_or_else(|| PersistenceError::NotFound {
            path: path.display().to_string(),
        })?;
        decode(&text, DocumentFormat::from_path(path), path)
    }

    fn exists(&self, path: &Path) -> bool {
        self.documents
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(path)
    }
}
