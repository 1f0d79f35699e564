//! Matrix Vault Port - Interface for persisting decision matrices.
//!
//! A saved document is never trusted: every implementation must route what
//! it reads through the gateway and the decision matrix constructor, exactly
//! as if the data came fresh from a user.

use std::path::Path;

use crate::domain::foundation::ValidationError;
use crate::domain::matrix::DecisionMatrix;

/// Port for saving and loading decision matrices.
///
/// Implementations perform no locking; callers avoid concurrent writes to
/// the same path.
pub trait MatrixVault: Send + Sync {
    /// Save the full matrix (criteria, alternatives, every score).
    ///
    /// # Errors
    /// Returns `ValidationError::Persistence` if the document cannot be written.
    fn save(&self, matrix: &DecisionMatrix, path: &Path) -> Result<(), ValidationError>;

    /// Load and re-validate a matrix.
    ///
    /// # Errors
    /// - `Persistence(NotFound)` if nothing is stored at `path`
    /// - `Persistence(Malformed)` if the document cannot be parsed
    /// - `Shape` / `Invariant` exactly as for fresh input
    fn load(&self, path: &Path) -> Result<DecisionMatrix, ValidationError>;

    /// Check if a document exists at `path`.
    fn exists(&self, path: &Path) -> bool;
}
