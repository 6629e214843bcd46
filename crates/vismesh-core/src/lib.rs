//! Core types for vismesh.
//!
//! This crate provides the pieces shared by every other vismesh crate:
//! - [`VisError`] and the [`Result`] alias
//! - [`Array`], the numeric boundary type accepted by buffer setters
//! - [`ColorProperty`] and the scalar-or-color resolution rule
//! - [`CoordinateSystem`], the data aspect that decides face winding
//! - Serializable configuration [`Options`]

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod array;
pub mod axes;
pub mod color;
pub mod error;
pub mod options;

pub use array::{Array, ArrayData, ElementType};
pub use axes::CoordinateSystem;
pub use color::{named_color, parse_color, ColorInput, ColorProperty};
pub use error::{Result, VisError};
pub use options::{CullFaces, LightOptions, MeshOptions, Options};

// Re-export glam types for convenience
pub use glam::{Vec2, Vec3, Vec4};
