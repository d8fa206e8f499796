//! Error types for the CLT solver

use thiserror::Error;

/// Main error type for laminate operations
#[derive(Error, Debug)]
pub enum CltError {
    #[error("Invalid material: {0}")]
    InvalidMaterial(String),

    #[error("Material id {0} not found in material list")]
    MaterialNotFound(usize),

    #[error("Load case '{0}' not found in model")]
    LoadCaseNotFound(String),

    #[error("Duplicate name '{0}' already exists")]
    DuplicateName(String),

    #[error("Unknown failure theory '{0}' (expected maxstress, tsaiwu or hashinrotem)")]
    UnknownFailureTheory(String),

    #[error("Singular ABD matrix - laminate has no stiffness in at least one direction")]
    SingularMatrix,

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl CltError {
    /// True for errors caused by a non-invertible stiffness matrix
    pub fn is_singular(&self) -> bool {
        matches!(self, Self::SingularMatrix)
    }
}

/// Result type for laminate operations
pub type CltResult<T> = Result<T, CltError>;
