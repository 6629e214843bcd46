//! Raw geometry storage and validated mutation.
//!
//! Every setter validates into locals first and only then assigns, so a
//! failed call leaves the buffers exactly as they were.

use glam::{Vec2, Vec3};
use vismesh_core::{Array, Result, VisError};
use vismesh_render::{IndexBuffer, Primitive};

/// Per-vertex texture coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum TexCoords {
    /// One value per vertex, looked up in the colormap.
    Colormap(Vec<f32>),
    /// A UV pair per vertex, mapped onto the texture image.
    Image(Vec<Vec2>),
}

impl TexCoords {
    /// Parses `(N,)` (colormap) or `(N, 2)` (image) coordinates.
    pub fn from_array(data: &Array) -> Result<Self> {
        match data.shape() {
            [_] => Ok(Self::Colormap(data.data().to_f32_vec())),
            [_, 2] => Ok(Self::Image(data.to_vec2s()?)),
            shape => Err(VisError::shape(format!(
                "texture coordinates must be 2D or 1D, got shape {shape:?}"
            ))),
        }
    }

    /// Number of vertices covered.
    pub fn len(&self) -> usize {
        match self {
            Self::Colormap(v) => v.len(),
            Self::Image(v) => v.len(),
        }
    }

    /// Returns true if there are no coordinates.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Values per vertex (1 or 2).
    pub fn components(&self) -> u32 {
        match self {
            Self::Colormap(_) => 1,
            Self::Image(_) => 2,
        }
    }

    /// The coordinates as one flat float slice.
    pub fn to_flat(&self) -> Vec<f32> {
        match self {
            Self::Colormap(v) => v.clone(),
            Self::Image(v) => v.iter().flat_map(|uv| uv.to_array()).collect(),
        }
    }

    pub(crate) fn gather(&self, indices: &[usize]) -> Self {
        match self {
            Self::Colormap(v) => Self::Colormap(indices.iter().map(|&i| v[i]).collect()),
            Self::Image(v) => Self::Image(indices.iter().map(|&i| v[i]).collect()),
        }
    }
}

/// Vertices and their attributes, plus an optional face index buffer.
///
/// Invariants:
/// - normals, colors and texture coordinates, when present, have one entry
///   per vertex
/// - every face index is below the vertex count
/// - the face buffer length is a multiple of `vertices_per_face`
#[derive(Debug, Clone, PartialEq)]
pub struct GeometryBuffers {
    pub(crate) vertices: Vec<Vec3>,
    pub(crate) normals: Option<Vec<Vec3>>,
    pub(crate) normals_explicit: bool,
    pub(crate) flat_normals: Option<Vec<Vec3>>,
    pub(crate) colors: Option<Vec<Vec3>>,
    pub(crate) texcoords: Option<TexCoords>,
    pub(crate) faces: Option<IndexBuffer>,
    pub(crate) vertices_per_face: usize,
}

impl Default for GeometryBuffers {
    fn default() -> Self {
        Self {
            vertices: Vec::new(),
            normals: None,
            normals_explicit: false,
            flat_normals: None,
            colors: None,
            texcoords: None,
            faces: None,
            vertices_per_face: 3,
        }
    }
}

impl GeometryBuffers {
    /// Creates empty triangle geometry.
    pub fn new() -> Self {
        Self::default()
    }

    // === Accessors ===

    /// Vertex positions.
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Smooth per-vertex normals, supplied or computed.
    pub fn normals(&self) -> Option<&[Vec3]> {
        self.normals.as_deref()
    }

    /// Returns true if the normals were supplied rather than computed.
    pub fn has_explicit_normals(&self) -> bool {
        self.normals.is_some() && self.normals_explicit
    }

    /// Derived flat-shading normals.
    pub fn flat_normals(&self) -> Option<&[Vec3]> {
        self.flat_normals.as_deref()
    }

    /// Per-vertex colors.
    pub fn colors(&self) -> Option<&[Vec3]> {
        self.colors.as_deref()
    }

    /// Texture coordinates.
    pub fn texcoords(&self) -> Option<&TexCoords> {
        self.texcoords.as_ref()
    }

    /// Face indices.
    pub fn faces(&self) -> Option<&IndexBuffer> {
        self.faces.as_ref()
    }

    /// Number of faces, counting runs of vertices when there is no face buffer.
    pub fn face_count(&self) -> usize {
        let n = self.faces.as_ref().map_or(self.vertices.len(), IndexBuffer::len);
        n / self.vertices_per_face
    }

    /// 3 for triangles, 4 for quads.
    pub fn vertices_per_face(&self) -> usize {
        self.vertices_per_face
    }

    /// Primitive kind drawn for these faces.
    pub fn primitive(&self) -> Primitive {
        if self.vertices_per_face == 4 {
            Primitive::Quads
        } else {
            Primitive::Triangles
        }
    }

    // === Setters ===

    /// Replaces the vertices with an `(N, 3)` array.
    ///
    /// Computed normals and flat normals are dropped. Supplied normals,
    /// colors and texture coordinates must still match the new count, and
    /// the faces must still be in range.
    pub fn set_vertices(&mut self, vertices: impl Into<Array>) -> Result<()> {
        let vertices = vertices
            .into()
            .to_vec3s()
            .map_err(|_| VisError::shape("vertices should represent an array of 3D vertices"))?;
        let count = vertices.len();
        if self.normals_explicit {
            check_count(self.normals.as_ref().map(Vec::len), count)?;
        }
        check_count(self.colors.as_ref().map(Vec::len), count)?;
        check_count(self.texcoords.as_ref().map(TexCoords::len), count)?;
        if let Some(faces) = &self.faces {
            check_in_range(faces, count)?;
        }

        self.vertices = vertices;
        if !self.normals_explicit {
            self.normals = None;
        }
        self.flat_normals = None;
        Ok(())
    }

    /// Sets `(N, 3)` normals, or clears them so they get computed on draw.
    pub fn set_normals(&mut self, normals: Option<impl Into<Array>>) -> Result<()> {
        let normals = match normals {
            Some(data) => {
                let normals = data
                    .into()
                    .to_vec3s()
                    .map_err(|_| VisError::shape("normals should represent an array of 3D vectors"))?;
                check_count(Some(normals.len()), self.vertices.len())?;
                Some(normals)
            }
            None => None,
        };
        self.normals_explicit = normals.is_some();
        self.normals = normals;
        self.flat_normals = None;
        Ok(())
    }

    /// Sets `(N, 3)` per-vertex colors, or clears them.
    pub fn set_colors(&mut self, colors: Option<impl Into<Array>>) -> Result<()> {
        let colors = match colors {
            Some(data) => {
                let colors = data
                    .into()
                    .to_vec3s()
                    .map_err(|_| VisError::shape("colors should represent an array of RGB values"))?;
                check_count(Some(colors.len()), self.vertices.len())?;
                Some(colors)
            }
            None => None,
        };
        self.colors = colors;
        Ok(())
    }

    /// Sets `(N,)` colormap or `(N, 2)` image coordinates, or clears them.
    pub fn set_texcoords(&mut self, texcoords: Option<impl Into<Array>>) -> Result<()> {
        let texcoords = match texcoords {
            Some(data) => {
                let texcoords = TexCoords::from_array(&data.into())?;
                check_count(Some(texcoords.len()), self.vertices.len())?;
                Some(texcoords)
            }
            None => None,
        };
        self.texcoords = texcoords;
        Ok(())
    }

    /// Sets the face indices, or clears them to draw consecutive vertex runs.
    ///
    /// Accepts a flat array (keeping the current vertices per face) or an
    /// `(N, 3)` / `(N, 4)` array (which sets it). 8-, 16- and 32-bit unsigned
    /// data keeps its width; other integer widths are promoted to 32 bits.
    ///
    /// Any change to the faces, clearing included, drops computed normals and
    /// flat normals. They are computed again on the next draw. Supplied
    /// normals are kept.
    pub fn set_faces(&mut self, faces: Option<impl Into<Array>>) -> Result<()> {
        let Some(data) = faces else {
            self.faces = None;
            self.invalidate_derived();
            return Ok(());
        };
        let data = data.into();
        let vertices_per_face = match data.shape() {
            [_] => self.vertices_per_face,
            [_, w @ (3 | 4)] => *w,
            shape => {
                return Err(VisError::shape(format!(
                    "faces should be a flat, (N, 3) or (N, 4) array, got shape {shape:?}"
                )))
            }
        };
        let faces = IndexBuffer::from_data(data.into_data())?;
        if faces.len() % vertices_per_face != 0 {
            return Err(VisError::shape(format!(
                "{} face indices do not form whole faces of {vertices_per_face} vertices",
                faces.len()
            )));
        }
        check_in_range(&faces, self.vertices.len())?;

        self.faces = Some(faces);
        self.vertices_per_face = vertices_per_face;
        self.invalidate_derived();
        Ok(())
    }

    /// Sets whether faces are triangles (3) or quads (4).
    pub fn set_vertices_per_face(&mut self, vertices_per_face: usize) -> Result<()> {
        if !matches!(vertices_per_face, 3 | 4) {
            return Err(VisError::value("vertices per face should be 3 or 4"));
        }
        if let Some(faces) = &self.faces {
            if faces.len() % vertices_per_face != 0 {
                return Err(VisError::shape(format!(
                    "{} face indices do not form whole faces of {vertices_per_face} vertices",
                    faces.len()
                )));
            }
        }
        if vertices_per_face != self.vertices_per_face {
            self.vertices_per_face = vertices_per_face;
            self.invalidate_derived();
        }
        Ok(())
    }

    /// Axis-aligned bounds of the vertices, or `None` when there are none.
    pub fn limits(&self) -> Option<(Vec3, Vec3)> {
        let first = *self.vertices.first()?;
        Some(
            self.vertices
                .iter()
                .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
        )
    }

    /// Drops computed normals and flat normals.
    fn invalidate_derived(&mut self) {
        if !self.normals_explicit {
            self.normals = None;
        }
        self.flat_normals = None;
    }
}

fn check_count(actual: Option<usize>, expected: usize) -> Result<()> {
    match actual {
        Some(actual) if actual != expected => Err(VisError::SizeMismatch { expected, actual }),
        _ => Ok(()),
    }
}

fn check_in_range(faces: &IndexBuffer, vertex_count: usize) -> Result<()> {
    match faces.max() {
        Some(index) if index >= vertex_count => Err(VisError::Reference {
            index: index as u64,
            vertex_count,
        }),
        _ => Ok(()),
    }
}
