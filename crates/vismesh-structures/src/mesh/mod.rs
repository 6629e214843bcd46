//! Triangle and quad mesh structure.

mod buffers;
mod draw;
mod normals;
mod unwind;

pub use buffers::{GeometryBuffers, TexCoords};
pub use normals::DEFAULT_NORMAL;

use glam::Vec3;
use vismesh_core::{Array, CullFaces, MeshOptions, Result};
use vismesh_render::{
    Colormap, FixedFunction, Material, RenderResult, Texture2D, TextureResource,
};

/// A polygonal surface: vertices with optional normals, colors and texture
/// coordinates, an optional face buffer, and a material.
#[derive(Debug)]
pub struct Mesh {
    name: String,
    geometry: GeometryBuffers,
    material: Material,
    cull_faces: Option<CullFaces>,
    colormap: Colormap,
    texture: Option<Texture2D>,
    retired_textures: Vec<Texture2D>,
    options: MeshOptions,
}

impl Mesh {
    /// Creates a triangle mesh from vertices, optionally indexed.
    pub fn new(
        name: impl Into<String>,
        vertices: impl Into<Array>,
        faces: Option<impl Into<Array>>,
    ) -> Result<Self> {
        let mut builder = Self::builder(name, vertices);
        if let Some(faces) = faces {
            builder = builder.faces(faces);
        }
        builder.build()
    }

    /// Starts building a mesh.
    pub fn builder(name: impl Into<String>, vertices: impl Into<Array>) -> MeshBuilder {
        MeshBuilder {
            name: name.into(),
            vertices: vertices.into(),
            normals: None,
            faces: None,
            colors: None,
            texcoords: None,
            vertices_per_face: 3,
            options: MeshOptions::default(),
        }
    }

    /// The mesh name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The geometry buffers.
    pub fn geometry(&self) -> &GeometryBuffers {
        &self.geometry
    }

    /// The geometry buffers, for mutation through their validated setters.
    pub fn geometry_mut(&mut self) -> &mut GeometryBuffers {
        &mut self.geometry
    }

    /// The surface material.
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// The surface material.
    pub fn material_mut(&mut self) -> &mut Material {
        &mut self.material
    }

    /// Which faces are culled, if any.
    pub fn cull_faces(&self) -> Option<CullFaces> {
        self.cull_faces
    }

    /// Sets which faces are culled.
    pub fn set_cull_faces(&mut self, cull: Option<CullFaces>) {
        self.cull_faces = cull;
    }

    /// Sets culling from `"front"`, `"back"` or `None`.
    pub fn set_cull_faces_str(&mut self, cull: Option<&str>) -> Result<()> {
        self.cull_faces = CullFaces::parse_optional(cull)?;
        Ok(())
    }

    /// The colormap used for 1D texture coordinates.
    pub fn colormap(&self) -> &Colormap {
        &self.colormap
    }

    /// The colormap used for 1D texture coordinates.
    pub fn colormap_mut(&mut self) -> &mut Colormap {
        &mut self.colormap
    }

    /// The image mapped through 2D texture coordinates.
    pub fn texture(&self) -> Option<&Texture2D> {
        self.texture.as_ref()
    }

    /// Sets or removes the texture image. A replaced texture releases its
    /// device resources on the next draw.
    pub fn set_texture(&mut self, texture: Option<Texture2D>) {
        if let Some(old) = std::mem::replace(&mut self.texture, texture) {
            self.retired_textures.push(old);
        }
    }

    /// Sets the texture image from an `(H, W)` or `(H, W, 3)` array.
    pub fn set_texture_data(&mut self, data: &Array) -> RenderResult<()> {
        let texture = Texture2D::from_array(data)?;
        self.set_texture(Some(texture));
        Ok(())
    }

    /// Drawing options.
    pub fn options(&self) -> &MeshOptions {
        &self.options
    }

    /// Replaces the drawing options. Flat normals are recomputed when the
    /// normalization setting changes.
    pub fn set_options(&mut self, options: MeshOptions) {
        if options.normalize_flat_normals != self.options.normalize_flat_normals {
            self.geometry.flat_normals = None;
        }
        self.options = options;
    }

    /// Axis-aligned bounds of the vertices.
    pub fn limits(&self) -> Option<(Vec3, Vec3)> {
        self.geometry.limits()
    }

    /// Releases device resources held by the colormap and texture.
    pub fn destroy_gpu_state(&mut self, ctx: &mut dyn FixedFunction) {
        self.release_retired(ctx);
        self.colormap.destroy_gpu_state(ctx);
        if let Some(texture) = &mut self.texture {
            texture.destroy_gpu_state(ctx);
        }
    }

    /// Releases all colormap and texture resources, CPU data included.
    pub fn destroy(&mut self, ctx: &mut dyn FixedFunction) {
        self.release_retired(ctx);
        self.colormap.destroy(ctx);
        if let Some(texture) = &mut self.texture {
            texture.destroy(ctx);
        }
    }

    fn release_retired(&mut self, ctx: &mut dyn FixedFunction) {
        for mut texture in self.retired_textures.drain(..) {
            texture.destroy(ctx);
        }
    }
}

/// Builder for [`Mesh`]. Inputs are validated in [`build`](Self::build) in
/// the order vertices, normals, faces, colors, texture coordinates.
#[derive(Debug)]
#[must_use]
pub struct MeshBuilder {
    name: String,
    vertices: Array,
    normals: Option<Array>,
    faces: Option<Array>,
    colors: Option<Array>,
    texcoords: Option<Array>,
    vertices_per_face: usize,
    options: MeshOptions,
}

impl MeshBuilder {
    /// Per-vertex normals; computed on first draw when not given.
    pub fn normals(mut self, normals: impl Into<Array>) -> Self {
        self.normals = Some(normals.into());
        self
    }

    /// Face indices. An `(N, 3)` or `(N, 4)` array overrides
    /// [`vertices_per_face`](Self::vertices_per_face).
    pub fn faces(mut self, faces: impl Into<Array>) -> Self {
        self.faces = Some(faces.into());
        self
    }

    /// Per-vertex RGB colors.
    pub fn colors(mut self, colors: impl Into<Array>) -> Self {
        self.colors = Some(colors.into());
        self
    }

    /// `(N,)` colormap or `(N, 2)` image coordinates.
    pub fn texcoords(mut self, texcoords: impl Into<Array>) -> Self {
        self.texcoords = Some(texcoords.into());
        self
    }

    /// 3 for triangles (default), 4 for quads.
    pub fn vertices_per_face(mut self, vertices_per_face: usize) -> Self {
        self.vertices_per_face = vertices_per_face;
        self
    }

    /// Drawing options; culling starts from `options.cull_faces`.
    pub fn options(mut self, options: MeshOptions) -> Self {
        self.options = options;
        self
    }

    /// Validates all inputs and creates the mesh.
    pub fn build(self) -> Result<Mesh> {
        let mut geometry = GeometryBuffers::new();
        geometry.set_vertices_per_face(self.vertices_per_face)?;
        geometry.set_vertices(self.vertices)?;
        geometry.set_normals(self.normals)?;
        geometry.set_faces(self.faces)?;
        geometry.set_colors(self.colors)?;
        geometry.set_texcoords(self.texcoords)?;
        log::debug!(
            "built mesh '{}' with {} vertices and {} faces",
            self.name,
            geometry.vertex_count(),
            geometry.face_count()
        );
        Ok(Mesh {
            name: self.name,
            geometry,
            material: Material::default(),
            cull_faces: self.options.cull_faces,
            colormap: Colormap::default(),
            texture: None,
            retired_textures: Vec::new(),
            options: self.options,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vismesh_core::VisError;
    use vismesh_render::CommandRecorder;

    fn triangle() -> Vec<Vec3> {
        vec![Vec3::ZERO, Vec3::Y, Vec3::X]
    }

    #[test]
    fn test_builder_defaults() {
        let mesh = Mesh::builder("tri", triangle()).build().unwrap();
        assert_eq!(mesh.name(), "tri");
        assert_eq!(mesh.geometry().vertices_per_face(), 3);
        assert!(mesh.geometry().normals().is_none());
        assert_eq!(mesh.cull_faces(), None);
        assert_eq!(mesh.material(), &Material::default());
    }

    #[test]
    fn test_builder_rejects_bad_vertices_per_face() {
        let err = Mesh::builder("m", triangle()).vertices_per_face(5).build().unwrap_err();
        assert!(matches!(err, VisError::Value(_)));
    }

    #[test]
    fn test_new_with_faces() {
        let mesh = Mesh::new("m", triangle(), Some(vec![[0u32, 1, 2]])).unwrap();
        assert_eq!(mesh.geometry().face_count(), 1);
        let err = Mesh::new("m", triangle(), Some(vec![[0u32, 1, 3]])).unwrap_err();
        assert!(matches!(err, VisError::Reference { .. }));
    }

    #[test]
    fn test_cull_faces_from_str() {
        let mut mesh = Mesh::new("m", triangle(), None::<Array>).unwrap();
        mesh.set_cull_faces_str(Some("BACK")).unwrap();
        assert_eq!(mesh.cull_faces(), Some(CullFaces::Back));
        assert!(matches!(
            mesh.set_cull_faces_str(Some("sideways")),
            Err(VisError::Value(_))
        ));
        assert_eq!(mesh.cull_faces(), Some(CullFaces::Back));
        mesh.set_cull_faces_str(None).unwrap();
        assert_eq!(mesh.cull_faces(), None);
    }

    #[test]
    fn test_options_seed_culling() {
        let options = MeshOptions {
            cull_faces: Some(CullFaces::Front),
            ..MeshOptions::default()
        };
        let mesh = Mesh::builder("m", triangle()).options(options).build().unwrap();
        assert_eq!(mesh.cull_faces(), Some(CullFaces::Front));
    }

    #[test]
    fn test_replaced_texture_released_on_teardown() {
        let mut rec = CommandRecorder::new();
        let mut mesh = Mesh::new("m", triangle(), None::<Array>).unwrap();
        let image = Array::from(vec![[0u8, 128], [255, 64]]);
        mesh.set_texture_data(&image).unwrap();
        if let Some(texture) = &mut mesh.texture {
            texture.enable(&mut rec, 0);
        }
        assert_eq!(rec.live_texture_count(), 1);

        mesh.set_texture(None);
        assert!(mesh.texture().is_none());
        mesh.destroy_gpu_state(&mut rec);
        assert_eq!(rec.live_texture_count(), 0);
    }

    #[test]
    fn test_destroy_clears_colormap() {
        let mut rec = CommandRecorder::new();
        let mut mesh = Mesh::new("m", triangle(), None::<Array>).unwrap();
        mesh.colormap_mut().enable(&mut rec, 0);
        mesh.destroy(&mut rec);
        assert!(mesh.colormap().table().is_empty());
        assert_eq!(rec.live_texture_count(), 0);
    }
}
