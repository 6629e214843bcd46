//! Fixed-function command interface.
//!
//! Drawing is expressed as an ordered stream of immediate-mode commands
//! against a [`FixedFunction`] backend: toggles, client-side arrays, material
//! and light state, and draw calls. A backend may forward them to a legacy GL
//! context, translate them (see [`crate::wgpu_state`]) or simply record them
//! (see [`crate::recorder::CommandRecorder`]).

use glam::{Vec3, Vec4};
use vismesh_core::{CoordinateSystem, CullFaces};

use crate::indices::IndexBuffer;

/// Maximum number of light slots.
pub const MAX_LIGHTS: usize = 8;

/// Server-side toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Capability {
    /// Lighting computation.
    Lighting,
    /// One light slot (`0..MAX_LIGHTS`).
    Light(u8),
    /// Per-vertex colors track the material ambient and diffuse.
    ColorMaterial,
    /// Renormalize normals after transformation.
    Normalize,
    /// Face culling.
    CullFace,
    /// 1D texturing (colormap lookup).
    Texture1D,
    /// 2D texturing (image mapping).
    Texture2D,
}

/// Client-side vertex arrays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClientState {
    VertexArray,
    NormalArray,
    ColorArray,
    TextureCoordArray,
}

/// Primitive kind of a draw call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Triangles,
    Quads,
}

impl Primitive {
    /// Number of vertices per primitive.
    pub fn vertices_per_face(self) -> usize {
        match self {
            Self::Triangles => 3,
            Self::Quads => 4,
        }
    }
}

/// Winding order that defines a front face.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrontFace {
    Cw,
    Ccw,
}

impl FrontFace {
    /// Resolves the winding from the handedness of the coordinate system.
    ///
    /// Clockwise when the product of the data-aspect factors is positive (or
    /// no coordinate system is active), counter-clockwise when an odd number
    /// of axes are mirrored.
    pub fn for_coordinate_system(axes: Option<&CoordinateSystem>) -> Self {
        match axes.map_or(1, CoordinateSystem::handedness) {
            1 => Self::Cw,
            _ => Self::Ccw,
        }
    }
}

/// Face side for culling and polygon mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Face {
    Front,
    Back,
    FrontAndBack,
}

impl From<CullFaces> for Face {
    fn from(cull: CullFaces) -> Self {
        match cull {
            CullFaces::Front => Self::Front,
            CullFaces::Back => Self::Back,
        }
    }
}

/// Shading model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadeModel {
    Flat,
    Smooth,
}

/// Polygon rasterization mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PolygonMode {
    Fill,
    Line,
}

/// Material color parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaterialParam {
    Ambient,
    Diffuse,
    Specular,
    Emission,
}

/// Light color parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightParam {
    Ambient,
    Diffuse,
    Specular,
}

/// Texture binding target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureTarget {
    D1,
    D2,
}

impl TextureTarget {
    /// The capability that enables texturing for this target.
    pub fn capability(self) -> Capability {
        match self {
            Self::D1 => Capability::Texture1D,
            Self::D2 => Capability::Texture2D,
        }
    }
}

/// Opaque handle to a texture living on the device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureId(pub u32);

/// Texel data handed to the backend for upload.
#[derive(Debug, Clone, Copy)]
pub struct TextureUpload<'a> {
    /// Binding target.
    pub target: TextureTarget,
    /// Width in texels.
    pub width: u32,
    /// Height in texels (1 for 1D textures).
    pub height: u32,
    /// Channels per texel (1, 3 or 4).
    pub channels: u32,
    /// Row-major texel values in `[0, 1]`.
    pub texels: &'a [f32],
}

/// An immediate-mode, fixed-function rendering backend.
///
/// Calls mirror the classic pipeline one to one; implementations must apply
/// them in the order received.
pub trait FixedFunction {
    /// Enables a toggle.
    fn enable(&mut self, cap: Capability);

    /// Disables a toggle.
    fn disable(&mut self, cap: Capability);

    /// Enables a client-side array.
    fn enable_client_state(&mut self, state: ClientState);

    /// Disables a client-side array.
    fn disable_client_state(&mut self, state: ClientState);

    /// Sets the vertex position array.
    fn vertex_pointer(&mut self, vertices: &[Vec3]);

    /// Sets the normal array.
    fn normal_pointer(&mut self, normals: &[Vec3]);

    /// Sets the per-vertex color array.
    fn color_pointer(&mut self, colors: &[Vec3]);

    /// Sets the texture coordinate array with `components` values per vertex.
    fn tex_coord_pointer(&mut self, components: u32, coords: &[f32]);

    /// Makes per-vertex colors drive the ambient and diffuse material of `face`.
    fn color_material_ambient_and_diffuse(&mut self, face: Face);

    /// Sets a material color.
    fn material_color(&mut self, face: Face, param: MaterialParam, color: Vec4);

    /// Sets the material shininess exponent.
    fn material_shininess(&mut self, face: Face, shininess: f32);

    /// Sets a light position (`w == 0` for a direction).
    fn light_position(&mut self, light: u8, position: Vec4);

    /// Sets a light color.
    fn light_color(&mut self, light: u8, param: LightParam, color: Vec4);

    /// Selects the shading model.
    fn shade_model(&mut self, model: ShadeModel);

    /// Selects the front-face winding.
    fn front_face(&mut self, winding: FrontFace);

    /// Selects which faces are culled when culling is enabled.
    fn cull_face(&mut self, face: Face);

    /// Selects the polygon rasterization mode.
    fn polygon_mode(&mut self, face: Face, mode: PolygonMode);

    /// Uploads a texture and returns its handle.
    fn create_texture(&mut self, upload: TextureUpload<'_>) -> TextureId;

    /// Binds a texture to a texture unit.
    fn bind_texture(&mut self, unit: u32, target: TextureTarget, texture: TextureId);

    /// Releases a texture.
    fn delete_texture(&mut self, texture: TextureId);

    /// Draws `count` consecutive vertices starting at `first`.
    fn draw_arrays(&mut self, primitive: Primitive, first: usize, count: usize);

    /// Draws indexed primitives.
    fn draw_elements(&mut self, primitive: Primitive, indices: &IndexBuffer);

    /// Flushes queued commands.
    fn flush(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_front_face_from_handedness() {
        assert_eq!(FrontFace::for_coordinate_system(None), FrontFace::Cw);
        let normal = CoordinateSystem::default();
        assert_eq!(FrontFace::for_coordinate_system(Some(&normal)), FrontFace::Cw);
        let mirrored = CoordinateSystem::new(Vec3::new(1.0, 1.0, -1.0));
        assert_eq!(FrontFace::for_coordinate_system(Some(&mirrored)), FrontFace::Ccw);
        let double = CoordinateSystem::new(Vec3::new(-1.0, 1.0, -1.0));
        assert_eq!(FrontFace::for_coordinate_system(Some(&double)), FrontFace::Cw);
    }

    #[test]
    fn test_cull_faces_map_to_face() {
        assert_eq!(Face::from(CullFaces::Front), Face::Front);
        assert_eq!(Face::from(CullFaces::Back), Face::Back);
    }
}
