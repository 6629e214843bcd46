//! Translation of fixed-function state into wgpu pipeline state.
//!
//! wgpu has no quads and no 8-bit index format, so quads are split into
//! triangle pairs and indices are widened on the way.

use vismesh_core::VisError;

use crate::error::RenderResult;
use crate::indices::{IndexBuffer, IndexType};
use crate::pipeline::{Face, FrontFace, PolygonMode, Primitive};

/// Builds the rasterizer state for a mesh pass.
///
/// Culling both sides has no wgpu equivalent; it maps to no culling and the
/// caller is expected to skip the draw instead.
pub fn primitive_state(
    winding: FrontFace,
    cull: Option<Face>,
    mode: PolygonMode,
) -> wgpu::PrimitiveState {
    wgpu::PrimitiveState {
        topology: wgpu::PrimitiveTopology::TriangleList,
        front_face: match winding {
            FrontFace::Cw => wgpu::FrontFace::Cw,
            FrontFace::Ccw => wgpu::FrontFace::Ccw,
        },
        cull_mode: cull.and_then(cull_mode),
        polygon_mode: match mode {
            PolygonMode::Fill => wgpu::PolygonMode::Fill,
            PolygonMode::Line => wgpu::PolygonMode::Line,
        },
        ..Default::default()
    }
}

/// wgpu cull mode for a culled face side.
pub fn cull_mode(face: Face) -> Option<wgpu::Face> {
    match face {
        Face::Front => Some(wgpu::Face::Front),
        Face::Back => Some(wgpu::Face::Back),
        Face::FrontAndBack => None,
    }
}

/// Index format used on the device for a given source width.
pub fn index_format(index_type: IndexType) -> wgpu::IndexFormat {
    match index_type {
        IndexType::U8 | IndexType::U16 => wgpu::IndexFormat::Uint16,
        IndexType::U32 => wgpu::IndexFormat::Uint32,
    }
}

/// Triangle-list indices for an indexed draw. Incomplete trailing faces are
/// dropped.
pub fn triangle_list(primitive: Primitive, indices: &IndexBuffer) -> Vec<u32> {
    split_faces(primitive, &indices.to_u32_vec())
}

/// Triangle-list indices for a non-indexed draw of `count` vertices.
///
/// Fails when `count` does not fit a 32-bit index.
pub fn sequential_triangle_list(primitive: Primitive, count: usize) -> RenderResult<Vec<u32>> {
    let count = u32::try_from(count)
        .map_err(|_| VisError::value(format!("{count} vertices exceed the 32-bit index range")))?;
    Ok(split_faces(primitive, &(0..count).collect::<Vec<_>>()))
}

fn split_faces(primitive: Primitive, flat: &[u32]) -> Vec<u32> {
    let per_face = primitive.vertices_per_face();
    let faces = flat.chunks_exact(per_face);
    match primitive {
        Primitive::Triangles => faces.flatten().copied().collect(),
        Primitive::Quads => faces
            .flat_map(|q| [q[0], q[1], q[2], q[0], q[2], q[3]])
            .collect(),
    }
}

/// Index bytes ready for a `wgpu::BufferUsages::INDEX` buffer, with the
/// format they were written in.
///
/// `format` is the preferred format, usually from [`index_format`]. Indices
/// that do not fit 16 bits widen the result to `Uint32`.
pub fn index_bytes(
    indices: &[u32],
    format: wgpu::IndexFormat,
) -> (wgpu::IndexFormat, Vec<u8>) {
    if format == wgpu::IndexFormat::Uint16 {
        if let Ok(narrow) = indices
            .iter()
            .map(|&i| u16::try_from(i))
            .collect::<Result<Vec<u16>, _>>()
        {
            return (format, bytemuck::cast_slice(&narrow).to_vec());
        }
        log::debug!("indices exceed 16 bits; writing them as Uint32");
    }
    (wgpu::IndexFormat::Uint32, bytemuck::cast_slice(indices).to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primitive_state() {
        let state = primitive_state(FrontFace::Cw, Some(Face::Back), PolygonMode::Fill);
        assert_eq!(state.topology, wgpu::PrimitiveTopology::TriangleList);
        assert_eq!(state.front_face, wgpu::FrontFace::Cw);
        assert_eq!(state.cull_mode, Some(wgpu::Face::Back));

        let state = primitive_state(FrontFace::Ccw, Some(Face::FrontAndBack), PolygonMode::Line);
        assert_eq!(state.cull_mode, None);
        assert_eq!(state.polygon_mode, wgpu::PolygonMode::Line);
    }

    #[test]
    fn test_u8_indices_widen() {
        assert_eq!(index_format(IndexType::U8), wgpu::IndexFormat::Uint16);
        assert_eq!(index_format(IndexType::U32), wgpu::IndexFormat::Uint32);
    }

    #[test]
    fn test_quads_split() {
        let quads = IndexBuffer::U8(vec![0, 1, 2, 3, 4, 5, 6, 7, 9]);
        assert_eq!(
            triangle_list(Primitive::Quads, &quads),
            vec![0, 1, 2, 0, 2, 3, 4, 5, 6, 4, 6, 7]
        );
        assert_eq!(
            sequential_triangle_list(Primitive::Triangles, 4).unwrap(),
            vec![0, 1, 2]
        );
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn test_sequential_list_rejects_oversized_count() {
        let count = u32::MAX as usize + 1;
        assert!(sequential_triangle_list(Primitive::Triangles, count).is_err());
    }

    #[test]
    fn test_index_bytes() {
        let (format, bytes) = index_bytes(&[1, 2], wgpu::IndexFormat::Uint16);
        assert_eq!(format, wgpu::IndexFormat::Uint16);
        assert_eq!(bytes, [1u16.to_ne_bytes(), 2u16.to_ne_bytes()].concat());

        let (format, bytes) = index_bytes(&[1, 2], wgpu::IndexFormat::Uint32);
        assert_eq!(format, wgpu::IndexFormat::Uint32);
        assert_eq!(bytes.len(), 8);
    }

    #[test]
    fn test_wide_indices_never_truncate() {
        let indices = [0, 70_000, 2];
        let (format, bytes) = index_bytes(&indices, wgpu::IndexFormat::Uint16);
        assert_eq!(format, wgpu::IndexFormat::Uint32);
        let back: Vec<u32> = bytes
            .chunks_exact(4)
            .map(|b| u32::from_ne_bytes([b[0], b[1], b[2], b[3]]))
            .collect();
        assert_eq!(back, indices);
    }
}
