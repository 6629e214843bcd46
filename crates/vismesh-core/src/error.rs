//! Error types for vismesh.

use thiserror::Error;

/// The main error type for vismesh operations.
///
/// Every variant is raised synchronously by the setter that received the bad
/// input; nothing is deferred to draw time.
#[derive(Error, Debug)]
pub enum VisError {
    /// Wrong array rank or width.
    #[error("shape error: {0}")]
    Shape(String),

    /// Wrong element type for the target buffer.
    #[error("dtype error: {0}")]
    Dtype(String),

    /// A face index references a vertex that does not exist.
    #[error("face data references non-existing vertex {index} (vertex count is {vertex_count})")]
    Reference { index: u64, vertex_count: usize },

    /// Malformed value, such as a bad color tuple or light position.
    #[error("invalid value: {0}")]
    Value(String),

    /// A mesh with this name is already in the scene.
    #[error("mesh '{0}' already exists")]
    MeshExists(String),

    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VisError {
    /// Builds a [`VisError::Shape`].
    pub fn shape(msg: impl Into<String>) -> Self {
        Self::Shape(msg.into())
    }

    /// Builds a [`VisError::Value`].
    pub fn value(msg: impl Into<String>) -> Self {
        Self::Value(msg.into())
    }
}

/// A specialized Result type for vismesh operations.
pub type Result<T> = std::result::Result<T, VisError>;
