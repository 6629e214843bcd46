//! Rendering error types.

use thiserror::Error;
use vismesh_core::VisError;

/// Errors that can occur while preparing render resources.
#[derive(Error, Debug)]
pub enum RenderError {
    /// Invalid input data (shape, dtype, value).
    #[error(transparent)]
    Core(#[from] VisError),

    /// Image decoding failed.
    #[error("image decoding failed: {0}")]
    Image(#[from] image::ImageError),
}

/// A specialized Result type for rendering operations.
pub type RenderResult<T> = std::result::Result<T, RenderError>;
