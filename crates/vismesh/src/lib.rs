//! vismesh: polygonal mesh rendering with fixed-function lighting.
//!
//! A [`Mesh`] holds vertices, optional normals, colors, texture coordinates
//! and faces. Drawing computes whatever normals are missing, unwinds the faces
//! for flat shading and issues an ordered stream of fixed-function commands
//! to a [`FixedFunction`] backend.
//!
//! # Quick Start
//!
//! ```
//! use vismesh::*;
//!
//! fn main() -> Result<()> {
//!     init_logging();
//!
//!     let mut scene = Scene::default();
//!     let ring = solid_ring("ring", RingParams::default())?;
//!     scene.add_mesh(ring)?.material_mut().set_color("r")?;
//!
//!     let mut backend = CommandRecorder::new();
//!     scene.render(&mut backend);
//!     assert_eq!(backend.draw_calls().len(), 1);
//!     Ok(())
//! }
//! ```
//!
//! # Architecture
//!
//! - [`GeometryBuffers`] validate and store the raw arrays
//! - normal computation and face unwinding derive the flat-shading normals
//! - [`Material`] and [`Light`] hold scalar-or-color channels resolved against
//!   a reference color
//! - [`Mesh::draw`] sets up, draws and restores the pipeline state
//! - [`Scene`] owns the eight light slots and renders its meshes

mod init;
mod scene;

pub use init::init_logging;
pub use scene::Scene;

// Re-export core types
pub use vismesh_core::{
    named_color, parse_color, Array, ArrayData, ColorInput, ColorProperty, CoordinateSystem,
    CullFaces, ElementType, LightOptions, MeshOptions, Options, Result, VisError, Vec2, Vec3,
    Vec4,
};

// Re-export render types
pub use vismesh_render::{
    Capability, ClientState, Colormap, ColormapPreset, Command, CommandRecorder, Face,
    FixedFunction, FrontFace, IndexBuffer, IndexType, Light, LightParam, LightRig, Material,
    MaterialParam, PolygonMode, Primitive, RenderError, RenderResult, ResolvedMaterial,
    ShadeModel, Texture2D, TextureId, TextureResource, TextureTarget, TextureUpload, MAX_LIGHTS,
    MAX_SHININESS,
};

// Re-export structures
pub use vismesh_structures::{
    cube, solid_ring, GeometryBuffers, Mesh, MeshBuilder, RingParams, TexCoords, DEFAULT_NORMAL,
};
