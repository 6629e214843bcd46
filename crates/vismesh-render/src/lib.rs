//! Rendering layer for vismesh.
//!
//! This crate provides the fixed-function drawing model used by meshes:
//! - The [`FixedFunction`] command interface and a recording backend
//! - Face index buffers
//! - Materials and light slots
//! - Colormaps and image textures
//! - Translation of pipeline state to wgpu

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Getters and builders return values which don't all need must_use
#![allow(clippy::must_use_candidate)]

pub mod color_maps;
pub mod error;
pub mod indices;
pub mod lights;
pub mod materials;
pub mod pipeline;
pub mod recorder;
pub mod texture;
pub mod wgpu_state;

pub use color_maps::{Colormap, ColormapPreset, COLORMAP_SIZE};
pub use error::{RenderError, RenderResult};
pub use indices::{IndexBuffer, IndexType};
pub use lights::{Light, LightRig};
pub use materials::{Material, ResolvedMaterial, MAX_SHININESS};
pub use pipeline::{
    Capability, ClientState, Face, FixedFunction, FrontFace, LightParam, MaterialParam,
    PolygonMode, Primitive, ShadeModel, TextureId, TextureTarget, TextureUpload, MAX_LIGHTS,
};
pub use recorder::{Command, CommandRecorder};
pub use texture::{Texture2D, TextureResource};
