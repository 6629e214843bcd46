//! Procedural geometry producers.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};
use vismesh_core::{Result, VisError};

use crate::mesh::Mesh;

/// Parameters of [`solid_ring`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingParams {
    /// Tube diameter relative to the unit ring radius.
    pub thickness: f32,
    /// Number of faces along the ring.
    pub segments: u32,
    /// Number of faces around the tube.
    pub tube_segments: u32,
    /// Offset added to every vertex.
    pub translation: Option<Vec3>,
}

impl Default for RingParams {
    fn default() -> Self {
        Self {
            thickness: 0.4,
            segments: 16,
            tube_segments: 16,
            translation: None,
        }
    }
}

/// Creates a torus-shaped quad mesh in the xy plane with outer radius 1.
///
/// Each ring and tube cross-section gets one extra, duplicated vertex so the
/// texture coordinates close without a seam. Normals point outward from the
/// tube center and texture coordinates are `(along ring, around tube)`.
pub fn solid_ring(name: impl Into<String>, params: RingParams) -> Result<Mesh> {
    let RingParams {
        thickness,
        segments: n,
        tube_segments: m,
        translation,
    } = params;
    if n == 0 || m == 0 {
        return Err(VisError::value("a ring needs at least one segment each way"));
    }
    // Coarse tubes look better with the seam between two vertices.
    let rot_offset = if m <= 8 { 0.5 / m as f32 } else { 0.0 };
    let offset = translation.unwrap_or(Vec3::ZERO);

    let count = ((n + 1) * (m + 1)) as usize;
    let mut vertices = Vec::with_capacity(count);
    let mut normals = Vec::with_capacity(count);
    let mut texcoords = Vec::with_capacity(count);
    for j in 0..=n {
        let v = j as f32 / n as f32;
        let a = TAU * v;
        let outer = Vec3::new(a.sin(), a.cos(), 0.0);
        let center = outer * (1.0 - 0.5 * thickness);
        let p1 = center - outer;
        let p2 = Vec3::new(0.0, 0.0, 0.5 * thickness);
        for i in 0..=m {
            let u = i as f32 / m as f32;
            let b = TAU * (u + rot_offset);
            let dp = b.cos() * p1 + b.sin() * p2;
            vertices.push(center + dp + offset);
            normals.push(dp.normalize_or_zero());
            texcoords.push(Vec2::new(v, u));
        }
    }

    let stride = m + 1;
    let mut faces = Vec::with_capacity((n * m) as usize);
    for j in 0..n {
        for i in 0..m {
            faces.push([
                j * stride + i,
                j * stride + i + 1,
                (j + 1) * stride + i + 1,
                (j + 1) * stride + i,
            ]);
        }
    }

    Mesh::builder(name, vertices)
        .normals(normals)
        .faces(faces)
        .texcoords(texcoords)
        .vertices_per_face(4)
        .build()
}

/// Creates an axis-aligned cube spanning `[-1, 1]` on every axis.
///
/// Vertex `i` sits at `(x, y, z)` with `x = bit 0`, `y = bit 1`, `z = bit 2`
/// of `i` mapped to `-1 / +1`. Faces are quads wound clockwise seen from
/// outside, so computed normals point outward.
pub fn cube(name: impl Into<String>) -> Result<Mesh> {
    let vertices: Vec<Vec3> = (0..8u32)
        .map(|i| {
            let bit = |k: u32| if i >> k & 1 == 1 { 1.0 } else { -1.0 };
            Vec3::new(bit(0), bit(1), bit(2))
        })
        .collect();
    let faces: Vec<[u8; 4]> = vec![
        [4, 6, 7, 5], // +z
        [0, 1, 3, 2], // -z
        [1, 5, 7, 3], // +x
        [0, 2, 6, 4], // -x
        [2, 3, 7, 6], // +y
        [0, 4, 5, 1], // -y
    ];
    Mesh::new(name, vertices, Some(faces))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vismesh_render::Primitive;

    #[test]
    fn test_ring_counts() {
        let ring = solid_ring("ring", RingParams::default()).unwrap();
        let g = ring.geometry();
        assert_eq!(g.vertex_count(), 17 * 17);
        assert_eq!(g.face_count(), 16 * 16);
        assert_eq!(g.primitive(), Primitive::Quads);
        assert!(g.has_explicit_normals());
        assert_eq!(g.texcoords().unwrap().components(), 2);
    }

    #[test]
    fn test_ring_geometry() {
        let params = RingParams {
            thickness: 0.4,
            segments: 8,
            tube_segments: 12,
            translation: Some(Vec3::new(1.0, 1.0, 1.0)),
        };
        let ring = solid_ring("ring", params).unwrap();
        let (lo, hi) = ring.limits().unwrap();
        assert!((hi.x - 2.0).abs() < 1e-5);
        assert!((lo.x - 0.0).abs() < 1e-5);
        assert!((hi.z - 1.2).abs() < 1e-5);
        assert!((lo.z - 0.8).abs() < 1e-5);
        for n in ring.geometry().normals().unwrap() {
            assert!((n.length() - 1.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_ring_rejects_zero_segments() {
        let params = RingParams {
            segments: 0,
            ..RingParams::default()
        };
        assert!(solid_ring("ring", params).is_err());
    }

    #[test]
    fn test_cube_normals_point_outward() {
        let mut cube = cube("cube").unwrap();
        cube.geometry_mut().compute_normals();
        let g = cube.geometry();
        for (v, n) in g.vertices().iter().zip(g.normals().unwrap()) {
            assert!(n.abs_diff_eq(*v / 3f32.sqrt(), 1e-5), "{v} -> {n}");
        }
    }
}
