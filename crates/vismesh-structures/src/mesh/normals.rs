//! Smooth and flat normal computation.
//!
//! Smooth normals accumulate the unnormalized cross product of each face's
//! first three vertices into every vertex of the face, so larger faces weigh
//! more. The normalized sums are negated: faces wound clockwise when seen
//! from outside get outward normals.
//!
//! Flat normals are defined on unwound geometry. Each face's last vertex is
//! the one whose normal is used under flat shading, so the face's averaged
//! smooth normal is stored there and every other slot stays zero.

use glam::Vec3;
use vismesh_render::IndexBuffer;

use super::buffers::GeometryBuffers;

/// Normal used where none can be computed.
pub const DEFAULT_NORMAL: Vec3 = Vec3::X;

/// Vertex indices of all faces, flattened. Without a face buffer, consecutive
/// runs of vertices form the faces and a trailing incomplete run is dropped.
fn face_indices(
    faces: Option<&IndexBuffer>,
    vertex_count: usize,
    vertices_per_face: usize,
) -> Vec<usize> {
    match faces {
        Some(faces) => faces.iter().collect(),
        None => (0..vertex_count - vertex_count % vertices_per_face).collect(),
    }
}

/// Computes smooth per-vertex normals.
pub(crate) fn vertex_normals(
    vertices: &[Vec3],
    faces: Option<&IndexBuffer>,
    vertices_per_face: usize,
) -> Vec<Vec3> {
    let mut sums = vec![Vec3::ZERO; vertices.len()];
    let indices = face_indices(faces, vertices.len(), vertices_per_face);
    for face in indices.chunks_exact(vertices_per_face) {
        let (v1, v2, v3) = (vertices[face[0]], vertices[face[1]], vertices[face[2]]);
        let mut normal = (v1 - v2).cross(v2 - v3);
        if !normal.is_finite() {
            normal = DEFAULT_NORMAL;
        }
        for &i in face {
            sums[i] += normal;
        }
    }

    let mut defaulted = 0usize;
    let normals = sums
        .into_iter()
        .map(|sum| match sum.try_normalize() {
            Some(n) => -n,
            None => {
                defaulted += 1;
                DEFAULT_NORMAL
            }
        })
        .collect();
    if defaulted > 0 {
        log::warn!("{defaulted} vertices have no usable normal; using {DEFAULT_NORMAL}");
    }
    normals
}

/// Computes flat normals for run-based (unwound) geometry.
///
/// With `normalize`, the non-zero slots are scaled to unit length.
pub(crate) fn flat_normals(
    normals: &[Vec3],
    vertices_per_face: usize,
    normalize: bool,
) -> Vec<Vec3> {
    let mut flat = vec![Vec3::ZERO; normals.len()];
    let weight = 1.0 / vertices_per_face as f32;
    let indices = face_indices(None, normals.len(), vertices_per_face);
    for face in indices.chunks_exact(vertices_per_face) {
        let provoking = face[face.len() - 1];
        for &i in face {
            flat[provoking] += normals[i] * weight;
        }
    }
    if normalize {
        for n in &mut flat {
            *n = n.try_normalize().unwrap_or(*n);
        }
    }
    flat
}

impl GeometryBuffers {
    /// Recomputes the smooth normals from the current vertices and faces,
    /// replacing any supplied normals.
    pub fn compute_normals(&mut self) {
        if self.vertices.is_empty() {
            return;
        }
        let normals = vertex_normals(&self.vertices, self.faces.as_ref(), self.vertices_per_face);
        log::debug!("computed {} vertex normals", normals.len());
        self.normals = Some(normals);
        self.normals_explicit = false;
        self.flat_normals = None;
    }

    /// Computes the flat normals. This unwinds the faces first, and computes
    /// the smooth normals if there are none yet.
    pub fn compute_flat_normals(&mut self, normalize: bool) {
        if self.vertices.is_empty() {
            return;
        }
        if self.normals.is_none() {
            self.compute_normals();
        }
        self.unwind();
        if let Some(normals) = &self.normals {
            let flat = flat_normals(normals, self.vertices_per_face, normalize);
            log::debug!("computed {} flat normals", flat.len());
            self.flat_normals = Some(flat);
        }
    }

    /// Makes sure both normal buffers exist, computing what is missing.
    pub fn ensure_normals(&mut self, normalize_flat: bool) {
        if self.normals.is_none() {
            self.compute_normals();
        }
        if self.flat_normals.is_none() {
            self.compute_flat_normals(normalize_flat);
        }
    }
}
