//! Storage Adapters
//!
//! Implementations of the MatrixVault port.
//!
//! ## Available Adapters
//!
//! - **FileMatrixVault** - Stores matrices as JSON or YAML files on disk
//! - **InMemoryMatrixVault** - Stores serialized documents in memory (testing/development)
//!
//! ## Usage
//!
//! ```ignore
//! use adapters::storage::FileMatrixVault;
//!
//! let vault = FileMatrixVault::new();
//! vault.save(&matrix, Path::new("./decisions/laptop.json"))?;
//! let matrix = vault.load(Path::new("./decisions/laptop.json"))?;
//! ```

mod document;
mod file_matrix_vault;
mod in_memory_matrix_vault;

pub use document::{DocumentFormat, DOCUMENT_FORMAT};
pub use file_matrix_vault::FileMatrixVault;
pub use in_memory_matrix_vault::InMemoryMatrixVault;
