//! Structure implementations for vismesh.
//!
//! This crate provides the polygonal [`Mesh`]:
//! - Geometry buffers with validated setters
//! - Smooth and flat normal computation
//! - Face unwinding for flat shading
//! - The fixed-function draw pass
//! - Procedural ring and cube geometry

// Graphics code intentionally uses casts for indices, colors, and coordinates
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod generators;
pub mod mesh;

pub use generators::{cube, solid_ring, RingParams};
pub use mesh::{GeometryBuffers, Mesh, MeshBuilder, TexCoords, DEFAULT_NORMAL};
