//! The rendering context: light slots, meshes and the active coordinate system.

use glam::Vec3;

use crate::{
    Array, CoordinateSystem, FixedFunction, LightRig, Mesh, MeshBuilder, Options, Result,
    VisError,
};

/// Owns the light rig and the meshes drawn with it.
///
/// Meshes are drawn in insertion order.
#[derive(Debug, Default)]
pub struct Scene {
    options: Options,
    lights: LightRig,
    axes: CoordinateSystem,
    meshes: Vec<Mesh>,
}

impl Scene {
    /// Creates an empty scene configured by `options`.
    pub fn new(options: Options) -> Self {
        Self {
            lights: LightRig::new(&options.lights),
            options,
            axes: CoordinateSystem::default(),
            meshes: Vec::new(),
        }
    }

    /// The scene options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// The light slots.
    pub fn lights(&self) -> &LightRig {
        &self.lights
    }

    /// The light slots.
    pub fn lights_mut(&mut self) -> &mut LightRig {
        &mut self.lights
    }

    /// The coordinate system meshes are drawn in.
    pub fn coordinate_system(&self) -> &CoordinateSystem {
        &self.axes
    }

    /// Sets the coordinate system, e.g. to mirror an axis.
    pub fn set_coordinate_system(&mut self, axes: CoordinateSystem) {
        self.axes = axes;
    }

    /// Starts a mesh that uses the scene's mesh options.
    pub fn mesh_builder(&self, name: impl Into<String>, vertices: impl Into<Array>) -> MeshBuilder {
        Mesh::builder(name, vertices).options(self.options.mesh)
    }

    /// Adds a mesh. Names must be unique within the scene.
    pub fn add_mesh(&mut self, mesh: Mesh) -> Result<&mut Mesh> {
        if self.contains(mesh.name()) {
            return Err(VisError::MeshExists(mesh.name().to_string()));
        }
        log::debug!("added mesh '{}'", mesh.name());
        self.meshes.push(mesh);
        let last = self.meshes.len() - 1;
        Ok(&mut self.meshes[last])
    }

    /// Returns true if a mesh named `name` exists.
    pub fn contains(&self, name: &str) -> bool {
        self.meshes.iter().any(|m| m.name() == name)
    }

    /// Gets a mesh by name.
    pub fn mesh(&self, name: &str) -> Option<&Mesh> {
        self.meshes.iter().find(|m| m.name() == name)
    }

    /// Gets a mesh by name.
    pub fn mesh_mut(&mut self, name: &str) -> Option<&mut Mesh> {
        self.meshes.iter_mut().find(|m| m.name() == name)
    }

    /// Iterates over the meshes in draw order.
    pub fn meshes(&self) -> impl Iterator<Item = &Mesh> {
        self.meshes.iter()
    }

    /// Removes a mesh and releases all of its resources.
    pub fn remove_mesh(&mut self, name: &str, ctx: &mut dyn FixedFunction) -> Option<Mesh> {
        let index = self.meshes.iter().position(|m| m.name() == name)?;
        let mut mesh = self.meshes.remove(index);
        mesh.destroy(ctx);
        Some(mesh)
    }

    /// Union of the bounds of all meshes.
    pub fn limits(&self) -> Option<(Vec3, Vec3)> {
        self.meshes
            .iter()
            .filter_map(Mesh::limits)
            .reduce(|(lo, hi), (l, h)| (lo.min(l), hi.max(h)))
    }

    /// Renders one frame: camera lights, scene lights, then every mesh.
    /// All light slots are disabled again afterwards.
    pub fn render(&mut self, ctx: &mut dyn FixedFunction) {
        log::trace!("rendering {} meshes", self.meshes.len());
        self.lights.apply_camera_lights(ctx);
        self.lights.apply_scene_lights(ctx);
        for mesh in &mut self.meshes {
            mesh.draw(ctx, Some(&self.axes));
        }
        self.lights.disable_all(ctx);
    }

    /// Releases the device resources of every mesh, keeping CPU data.
    pub fn destroy_gpu_state(&mut self, ctx: &mut dyn FixedFunction) {
        for mesh in &mut self.meshes {
            mesh.destroy_gpu_state(ctx);
        }
    }

    /// Releases all resources and removes every mesh.
    pub fn destroy(&mut self, ctx: &mut dyn FixedFunction) {
        for mut mesh in self.meshes.drain(..) {
            mesh.destroy(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Capability, CommandRecorder, LightOptions};

    fn triangle(scene: &Scene, name: &str) -> Mesh {
        scene
            .mesh_builder(name, vec![Vec3::ZERO, Vec3::Y, Vec3::X])
            .build()
            .unwrap()
    }

    #[test]
    fn test_unique_names() {
        let mut scene = Scene::default();
        let mesh = triangle(&scene, "a");
        scene.add_mesh(mesh).unwrap();
        let dup = triangle(&scene, "a");
        assert!(matches!(scene.add_mesh(dup), Err(VisError::MeshExists(_))));
        assert_eq!(scene.meshes().count(), 1);
    }

    #[test]
    fn test_render_balances_lights() {
        let mut scene = Scene::default();
        let mesh = triangle(&scene, "a");
        scene.add_mesh(mesh).unwrap();
        let mut rec = CommandRecorder::new();
        scene.render(&mut rec);

        let light = rec.position(|c| *c == crate::Command::Enable(Capability::Light(0)));
        let draw = rec.position(|c| matches!(c, crate::Command::DrawArrays { .. }));
        assert!(light.unwrap() < draw.unwrap());
        assert!(rec.enabled_capabilities().is_empty());
    }

    #[test]
    fn test_main_light_option() {
        let scene = Scene::new(Options {
            lights: LightOptions {
                main_light_on: false,
            },
            ..Options::default()
        });
        assert!(!scene.lights().get(0).unwrap().is_on());
    }

    #[test]
    fn test_limits_union() {
        let mut scene = Scene::default();
        assert!(scene.limits().is_none());
        let a = triangle(&scene, "a");
        scene.add_mesh(a).unwrap();
        let b = scene
            .mesh_builder("b", vec![Vec3::splat(-2.0), Vec3::ZERO, Vec3::Z])
            .build()
            .unwrap();
        scene.add_mesh(b).unwrap();
        assert_eq!(scene.limits(), Some((Vec3::splat(-2.0), Vec3::new(1.0, 1.0, 1.0))));
    }

    #[test]
    fn test_remove_mesh_releases_resources() {
        let mut scene = Scene::default();
        let mesh = scene
            .mesh_builder("m", vec![Vec3::ZERO, Vec3::Y, Vec3::X])
            .texcoords(vec![0.0f32, 0.5, 1.0])
            .build()
            .unwrap();
        scene.add_mesh(mesh).unwrap();
        let mut rec = CommandRecorder::new();
        scene.render(&mut rec);
        assert_eq!(rec.live_texture_count(), 1);

        assert!(scene.remove_mesh("m", &mut rec).is_some());
        assert_eq!(rec.live_texture_count(), 0);
        assert!(scene.remove_mesh("m", &mut rec).is_none());
    }
}
