//! One fixed-function draw pass for a mesh.
//!
//! State is set up in a fixed order and torn down by [`Teardown`] when it
//! goes out of scope, so the pipeline is restored on every exit path.

use vismesh_core::CoordinateSystem;
use vismesh_render::{
    Capability, ClientState, Face, FixedFunction, FrontFace, IndexBuffer, PolygonMode,
    Primitive, ShadeModel, TextureResource, TextureTarget,
};

use super::buffers::TexCoords;
use super::Mesh;

/// Undoes everything a draw pass may have enabled.
struct Teardown<'a> {
    ctx: &'a mut dyn FixedFunction,
    texcoords: bool,
    texture: bool,
}

impl Teardown<'_> {
    fn ctx(&mut self) -> &mut dyn FixedFunction {
        &mut *self.ctx
    }
}

impl Drop for Teardown<'_> {
    fn drop(&mut self) {
        let ctx = &mut *self.ctx;
        if self.texcoords {
            ctx.disable(TextureTarget::D1.capability());
            if self.texture {
                ctx.disable(TextureTarget::D2.capability());
            }
        }
        ctx.disable_client_state(ClientState::VertexArray);
        ctx.disable_client_state(ClientState::NormalArray);
        ctx.disable_client_state(ClientState::ColorArray);
        ctx.disable_client_state(ClientState::TextureCoordArray);
        ctx.disable(Capability::ColorMaterial);
        ctx.polygon_mode(Face::Front, PolygonMode::Fill);
        ctx.disable(Capability::Lighting);
        ctx.disable(Capability::CullFace);
        ctx.disable(Capability::Normalize);
    }
}

impl Mesh {
    /// Draws the mesh with flat shading.
    ///
    /// Missing normals and flat normals are computed first; computing flat
    /// normals unwinds the faces. `axes` decides the front-face winding.
    /// Drawing a mesh without vertices does nothing.
    pub fn draw(&mut self, ctx: &mut dyn FixedFunction, axes: Option<&CoordinateSystem>) {
        if self.geometry.vertices.is_empty() {
            return;
        }
        for mut texture in self.retired_textures.drain(..) {
            texture.destroy(ctx);
        }
        self.geometry.ensure_normals(self.options.normalize_flat_normals);
        log::trace!(
            "drawing mesh '{}' ({} vertices)",
            self.name,
            self.geometry.vertex_count()
        );

        let geometry = &self.geometry;
        let mut pass = Teardown {
            ctx,
            texcoords: geometry.texcoords.is_some(),
            texture: self.texture.is_some(),
        };
        let ctx = pass.ctx();

        ctx.enable_client_state(ClientState::VertexArray);
        ctx.vertex_pointer(&geometry.vertices);
        ctx.enable_client_state(ClientState::NormalArray);
        ctx.normal_pointer(geometry.flat_normals.as_deref().unwrap_or_default());

        if let Some(colors) = &geometry.colors {
            ctx.enable(Capability::ColorMaterial);
            ctx.color_material_ambient_and_diffuse(Face::FrontAndBack);
            ctx.enable_client_state(ClientState::ColorArray);
            ctx.color_pointer(colors);
        }

        match (&geometry.texcoords, &mut self.texture) {
            (Some(coords @ TexCoords::Image(_)), Some(texture)) => {
                ctx.enable_client_state(ClientState::TextureCoordArray);
                ctx.tex_coord_pointer(coords.components(), &coords.to_flat());
                texture.enable(ctx, 0);
            }
            (Some(TexCoords::Image(_)), None) => {
                log::warn!(
                    "mesh '{}' has 2D texture coordinates but no texture; skipping texturing",
                    self.name
                );
            }
            (Some(coords @ TexCoords::Colormap(_)), _) => {
                ctx.enable_client_state(ClientState::TextureCoordArray);
                ctx.tex_coord_pointer(coords.components(), &coords.to_flat());
                self.colormap.enable(ctx, 0);
            }
            (None, _) => {}
        }

        self.material.apply(ctx);

        ctx.enable(Capability::Lighting);
        ctx.shade_model(ShadeModel::Flat);
        ctx.enable(Capability::Normalize);

        ctx.front_face(FrontFace::for_coordinate_system(axes));
        if let Some(cull) = self.cull_faces {
            ctx.enable(Capability::CullFace);
            ctx.cull_face(cull.into());
        }

        issue_draw(
            ctx,
            geometry.primitive(),
            geometry.vertex_count(),
            geometry.faces.as_ref(),
        );
        ctx.flush();
    }
}

/// Draws consecutive vertex runs, or indexed faces at their stored width.
pub(crate) fn issue_draw(
    ctx: &mut dyn FixedFunction,
    primitive: Primitive,
    vertex_count: usize,
    faces: Option<&IndexBuffer>,
) {
    match faces {
        None => ctx.draw_arrays(primitive, 0, vertex_count),
        Some(faces) => ctx.draw_elements(primitive, faces),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Vec2, Vec3, Vec4};
    use vismesh_core::{Array, CullFaces};
    use vismesh_render::{Command, CommandRecorder, IndexType, MaterialParam};

    fn triangle() -> Mesh {
        Mesh::new("tri", vec![Vec3::ZERO, Vec3::Y, Vec3::X], None::<Array>).unwrap()
    }

    fn assert_restored(rec: &CommandRecorder) {
        assert!(rec.enabled_capabilities().is_empty(), "{:?}", rec.enabled_capabilities());
        assert!(rec.enabled_client_states().is_empty());
    }

    #[test]
    fn test_empty_mesh_draws_nothing() {
        let mut mesh = Mesh::new("empty", Vec::<Vec3>::new(), None::<Array>).unwrap();
        let mut rec = CommandRecorder::new();
        mesh.draw(&mut rec, None);
        assert!(rec.commands().is_empty());
    }

    #[test]
    fn test_basic_sequence() {
        let mut mesh = triangle();
        let mut rec = CommandRecorder::new();
        mesh.draw(&mut rec, None);

        let cmds = rec.commands();
        assert_eq!(cmds[0], Command::EnableClientState(ClientState::VertexArray));
        assert!(matches!(cmds[1], Command::VertexPointer(ref v) if v.len() == 3));
        assert_eq!(cmds[2], Command::EnableClientState(ClientState::NormalArray));
        assert!(matches!(cmds[3], Command::NormalPointer(ref n) if n[2].abs_diff_eq(Vec3::Z, 1e-6)));
        assert!(matches!(cmds[4], Command::MaterialColor { param: MaterialParam::Ambient, .. }));

        let lighting = rec.position(|c| *c == Command::Enable(Capability::Lighting)).unwrap();
        let draw = rec.position(|c| matches!(c, Command::DrawArrays { .. })).unwrap();
        let flush = rec.position(|c| *c == Command::Flush).unwrap();
        assert!(lighting < draw && draw < flush);
        assert_eq!(cmds[lighting + 1], Command::ShadeModel(ShadeModel::Flat));
        assert_eq!(cmds[lighting + 2], Command::Enable(Capability::Normalize));
        assert_eq!(cmds[lighting + 3], Command::FrontFace(FrontFace::Cw));
        assert_eq!(
            cmds[draw],
            Command::DrawArrays {
                primitive: Primitive::Triangles,
                first: 0,
                count: 3
            }
        );
        assert!(!cmds.contains(&Command::Enable(Capability::CullFace)));
        assert!(cmds.contains(&Command::PolygonMode(Face::Front, PolygonMode::Fill)));
        assert_restored(&rec);
    }

    #[test]
    fn test_colors_enable_color_material() {
        let mut mesh = triangle();
        mesh.geometry_mut().set_colors(Some(vec![Vec3::X; 3])).unwrap();
        let mut rec = CommandRecorder::new();
        mesh.draw(&mut rec, None);

        let cm = rec.position(|c| *c == Command::Enable(Capability::ColorMaterial)).unwrap();
        assert_eq!(rec.commands()[cm + 1], Command::ColorMaterial(Face::FrontAndBack));
        assert_eq!(rec.commands()[cm + 2], Command::EnableClientState(ClientState::ColorArray));
        assert_restored(&rec);
    }

    #[test]
    fn test_colormap_path() {
        let mut mesh = triangle();
        mesh.geometry_mut().set_texcoords(Some(vec![0.0f32, 0.5, 1.0])).unwrap();
        let mut rec = CommandRecorder::new();
        mesh.draw(&mut rec, None);

        assert!(rec.commands().contains(&Command::TexCoordPointer { components: 1, len: 3 }));
        assert!(rec.commands().contains(&Command::Enable(Capability::Texture1D)));
        assert!(!rec.commands().contains(&Command::Enable(Capability::Texture2D)));
        assert!(mesh.colormap().is_uploaded());
        assert_restored(&rec);
    }

    #[test]
    fn test_image_path_requires_texture() {
        let mut mesh = triangle();
        mesh.geometry_mut().set_texcoords(Some(vec![Vec2::ZERO, Vec2::Y, Vec2::X])).unwrap();
        let mut rec = CommandRecorder::new();
        mesh.draw(&mut rec, None);
        assert!(!rec.commands().iter().any(|c| matches!(c, Command::TexCoordPointer { .. })));
        assert_restored(&rec);

        mesh.set_texture_data(&Array::from(vec![[1.0f32, 0.0], [0.0, 1.0]])).unwrap();
        let mut rec = CommandRecorder::new();
        mesh.draw(&mut rec, None);
        assert!(rec.commands().contains(&Command::TexCoordPointer { components: 2, len: 6 }));
        assert!(rec.commands().contains(&Command::Enable(Capability::Texture2D)));
        assert!(!rec.commands().contains(&Command::Enable(Capability::Texture1D)));
        assert_restored(&rec);
    }

    #[test]
    fn test_colormap_path_ignores_bound_texture() {
        let mut mesh = triangle();
        mesh.geometry_mut().set_texcoords(Some(vec![0.0f32, 0.5, 1.0])).unwrap();
        mesh.set_texture_data(&Array::from(vec![[1.0f32, 0.0], [0.0, 1.0]])).unwrap();
        let mut rec = CommandRecorder::new();
        mesh.draw(&mut rec, None);

        let cmds = rec.commands();
        assert!(cmds.contains(&Command::TexCoordPointer { components: 1, len: 3 }));
        assert!(cmds.contains(&Command::Enable(Capability::Texture1D)));
        assert!(!cmds.contains(&Command::Enable(Capability::Texture2D)));
        assert!(mesh.colormap().is_uploaded());
        assert_restored(&rec);
    }

    #[test]
    fn test_material_colors_resolved() {
        let mut mesh = triangle();
        mesh.material_mut().set_color([1.0, 0.0, 0.0, 1.0]).unwrap();
        mesh.material_mut().set_diffuse(0.5).unwrap();
        let mut rec = CommandRecorder::new();
        mesh.draw(&mut rec, None);
        assert!(rec.commands().contains(&Command::MaterialColor {
            face: Face::FrontAndBack,
            param: MaterialParam::Diffuse,
            color: Vec4::new(0.5, 0.0, 0.0, 1.0),
        }));
    }

    #[test]
    fn test_culling_and_mirrored_axes() {
        let mut mesh = triangle();
        mesh.set_cull_faces(Some(CullFaces::Back));
        let mirrored = CoordinateSystem::new(Vec3::new(-1.0, 1.0, 1.0));
        let mut rec = CommandRecorder::new();
        mesh.draw(&mut rec, Some(&mirrored));

        let cmds = rec.commands();
        assert!(cmds.contains(&Command::FrontFace(FrontFace::Ccw)));
        let cull = rec.position(|c| *c == Command::Enable(Capability::CullFace)).unwrap();
        assert_eq!(cmds[cull + 1], Command::CullFace(Face::Back));
        assert_restored(&rec);
    }

    #[test]
    fn test_indexed_mesh_is_unwound_before_drawing() {
        let mut mesh = Mesh::new(
            "quad",
            vec![Vec3::ZERO, Vec3::Y, Vec3::new(1.0, 1.0, 0.0), Vec3::X],
            Some(vec![[0u8, 1, 2, 3]]),
        )
        .unwrap();
        let mut rec = CommandRecorder::new();
        mesh.draw(&mut rec, None);
        assert!(mesh.geometry().faces().is_none());
        assert_eq!(
            rec.draw_calls(),
            vec![&Command::DrawArrays {
                primitive: Primitive::Quads,
                first: 0,
                count: 4
            }]
        );
    }

    #[test]
    fn test_issue_draw_keeps_index_width() {
        let mut rec = CommandRecorder::new();
        let faces = IndexBuffer::U16(vec![0, 1, 2, 2, 1, 3]);
        issue_draw(&mut rec, Primitive::Triangles, 4, Some(&faces));
        assert_eq!(
            rec.commands(),
            &[Command::DrawElements {
                primitive: Primitive::Triangles,
                index_type: IndexType::U16,
                count: 6
            }]
        );
    }

    #[test]
    fn test_repeated_draws_balance() {
        let mut mesh = triangle();
        mesh.geometry_mut().set_texcoords(Some(vec![0.0f32, 0.5, 1.0])).unwrap();
        let mut rec = CommandRecorder::new();
        for _ in 0..3 {
            mesh.draw(&mut rec, None);
            assert_restored(&rec);
        }
        assert_eq!(rec.live_texture_count(), 1);
    }
}
