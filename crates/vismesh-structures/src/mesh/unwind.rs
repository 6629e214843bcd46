//! Expansion of indexed geometry into consecutive vertex runs.

use glam::Vec3;

use super::buffers::GeometryBuffers;

impl GeometryBuffers {
    /// Replaces every attribute by its per-face-reference copy and drops the
    /// face buffer, so that each face owns its vertices. Does nothing when
    /// there is no face buffer.
    pub fn unwind(&mut self) {
        let Some(faces) = self.faces.take() else {
            return;
        };
        let indices: Vec<usize> = faces.iter().collect();
        let gather = |values: &[Vec3]| indices.iter().map(|&i| values[i]).collect::<Vec<_>>();

        self.vertices = gather(&self.vertices);
        self.normals = self.normals.as_deref().map(gather);
        self.colors = self.colors.as_deref().map(gather);
        self.texcoords = self.texcoords.as_ref().map(|t| t.gather(&indices));
        self.flat_normals = None;
        log::debug!("unwound {} face indices", indices.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::buffers::TexCoords;
    use glam::Vec2;
    use proptest::prelude::*;

    #[test]
    fn test_unwind_gathers_all_attributes() {
        let mut g = GeometryBuffers::new();
        g.set_vertices(vec![Vec3::ZERO, Vec3::X, Vec3::Y]).unwrap();
        g.set_colors(Some(vec![Vec3::X, Vec3::Y, Vec3::Z])).unwrap();
        g.set_texcoords(Some(vec![Vec2::ZERO, Vec2::X, Vec2::Y])).unwrap();
        g.set_faces(Some(vec![2u16, 1, 0, 0, 1, 2])).unwrap();

        g.unwind();
        assert!(g.faces().is_none());
        assert_eq!(g.vertices(), &[Vec3::Y, Vec3::X, Vec3::ZERO, Vec3::ZERO, Vec3::X, Vec3::Y]);
        assert_eq!(g.colors().unwrap()[0], Vec3::Z);
        assert_eq!(
            g.texcoords(),
            Some(&TexCoords::Image(vec![Vec2::Y, Vec2::X, Vec2::ZERO, Vec2::ZERO, Vec2::X, Vec2::Y]))
        );
    }

    #[test]
    fn test_texcoords_unwound_without_colors() {
        let mut g = GeometryBuffers::new();
        g.set_vertices(vec![Vec3::ZERO, Vec3::X, Vec3::Y]).unwrap();
        g.set_texcoords(Some(vec![0.0f32, 0.5, 1.0])).unwrap();
        g.set_faces(Some(vec![[1u8, 2, 0]])).unwrap();
        g.unwind();
        assert_eq!(g.texcoords(), Some(&TexCoords::Colormap(vec![0.5, 1.0, 0.0])));
        assert!(g.colors().is_none());
    }

    proptest! {
        #[test]
        fn prop_unwind_is_idempotent(
            n in 3usize..16,
            raw in prop::collection::vec(0u32..1000, 3..30),
        ) {
            let faces: Vec<u32> = raw
                .iter()
                .take(raw.len() - raw.len() % 3)
                .map(|&i| i % n as u32)
                .collect();
            let mut g = GeometryBuffers::new();
            g.set_vertices((0..n).map(|i| Vec3::splat(i as f32)).collect::<Vec<_>>()).unwrap();
            g.set_faces(Some(faces.clone())).unwrap();

            g.unwind();
            prop_assert_eq!(g.vertex_count(), faces.len());
            let once = g.clone();
            g.unwind();
            prop_assert_eq!(g, once);
        }

        #[test]
        fn prop_clearing_faces_keeps_counts(n in 3usize..16, face in prop::array::uniform3(0u32..3)) {
            let mut g = GeometryBuffers::new();
            g.set_vertices(vec![Vec3::ONE; n]).unwrap();
            g.set_normals(Some(vec![Vec3::Z; n])).unwrap();
            g.set_colors(Some(vec![Vec3::X; n])).unwrap();
            g.set_faces(Some(face.to_vec())).unwrap();
            g.set_faces(None::<Vec<u32>>).unwrap();
            prop_assert_eq!(g.vertex_count(), n);
            prop_assert_eq!(g.normals().map(<[Vec3]>::len), Some(n));
            prop_assert_eq!(g.colors().map(<[Vec3]>::len), Some(n));
        }
    }
}
