//! A [`FixedFunction`] backend that records commands instead of executing them.
//!
//! Used for tests, for debugging draw sequencing, and as the reference
//! backend when no device is attached. Alongside the raw command log it
//! tracks the resulting toggle state, so callers can check that a pass left
//! the pipeline as it found it.

use std::collections::HashSet;

use glam::{Vec3, Vec4};

use crate::indices::{IndexBuffer, IndexType};
use crate::pipeline::{
    Capability, ClientState, Face, FixedFunction, FrontFace, LightParam, MaterialParam,
    PolygonMode, Primitive, ShadeModel, TextureId, TextureTarget, TextureUpload,
};

/// One recorded command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Enable(Capability),
    Disable(Capability),
    EnableClientState(ClientState),
    DisableClientState(ClientState),
    VertexPointer(Vec<Vec3>),
    NormalPointer(Vec<Vec3>),
    ColorPointer(Vec<Vec3>),
    TexCoordPointer { components: u32, len: usize },
    ColorMaterial(Face),
    MaterialColor { face: Face, param: MaterialParam, color: Vec4 },
    MaterialShininess { face: Face, shininess: f32 },
    LightPosition { light: u8, position: Vec4 },
    LightColor { light: u8, param: LightParam, color: Vec4 },
    ShadeModel(ShadeModel),
    FrontFace(FrontFace),
    CullFace(Face),
    PolygonMode(Face, PolygonMode),
    CreateTexture { id: TextureId, target: TextureTarget, width: u32, height: u32, channels: u32 },
    BindTexture { unit: u32, target: TextureTarget, id: TextureId },
    DeleteTexture(TextureId),
    DrawArrays { primitive: Primitive, first: usize, count: usize },
    DrawElements { primitive: Primitive, index_type: IndexType, count: usize },
    Flush,
}

/// Records every command it receives.
#[derive(Debug, Default)]
pub struct CommandRecorder {
    commands: Vec<Command>,
    enabled: HashSet<Capability>,
    client_states: HashSet<ClientState>,
    live_textures: HashSet<TextureId>,
    next_texture: u32,
}

impl CommandRecorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// All commands received so far, in order.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Takes the recorded commands, leaving the tracked state untouched.
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    /// Returns true if `cap` is currently enabled.
    pub fn is_enabled(&self, cap: Capability) -> bool {
        self.enabled.contains(&cap)
    }

    /// Returns true if `state` is currently enabled.
    pub fn is_client_state_enabled(&self, state: ClientState) -> bool {
        self.client_states.contains(&state)
    }

    /// Currently enabled toggles.
    pub fn enabled_capabilities(&self) -> &HashSet<Capability> {
        &self.enabled
    }

    /// Currently enabled client-side arrays.
    pub fn enabled_client_states(&self) -> &HashSet<ClientState> {
        &self.client_states
    }

    /// Number of textures created and not yet deleted.
    pub fn live_texture_count(&self) -> usize {
        self.live_textures.len()
    }

    /// Draw calls recorded so far.
    pub fn draw_calls(&self) -> Vec<&Command> {
        self.commands
            .iter()
            .filter(|c| matches!(c, Command::DrawArrays { .. } | Command::DrawElements { .. }))
            .collect()
    }

    /// Position of the first command matching `pred`.
    pub fn position(&self, pred: impl Fn(&Command) -> bool) -> Option<usize> {
        self.commands.iter().position(pred)
    }

    fn push(&mut self, command: Command) {
        log::trace!("{command:?}");
        self.commands.push(command);
    }
}

impl FixedFunction for CommandRecorder {
    fn enable(&mut self, cap: Capability) {
        self.enabled.insert(cap);
        self.push(Command::Enable(cap));
    }

    fn disable(&mut self, cap: Capability) {
        self.enabled.remove(&cap);
        self.push(Command::Disable(cap));
    }

    fn enable_client_state(&mut self, state: ClientState) {
        self.client_states.insert(state);
        self.push(Command::EnableClientState(state));
    }

    fn disable_client_state(&mut self, state: ClientState) {
        self.client_states.remove(&state);
        self.push(Command::DisableClientState(state));
    }

    fn vertex_pointer(&mut self, vertices: &[Vec3]) {
        self.push(Command::VertexPointer(vertices.to_vec()));
    }

    fn normal_pointer(&mut self, normals: &[Vec3]) {
        self.push(Command::NormalPointer(normals.to_vec()));
    }

    fn color_pointer(&mut self, colors: &[Vec3]) {
        self.push(Command::ColorPointer(colors.to_vec()));
    }

    fn tex_coord_pointer(&mut self, components: u32, coords: &[f32]) {
        self.push(Command::TexCoordPointer {
            components,
            len: coords.len(),
        });
    }

    fn color_material_ambient_and_diffuse(&mut self, face: Face) {
        self.push(Command::ColorMaterial(face));
    }

    fn material_color(&mut self, face: Face, param: MaterialParam, color: Vec4) {
        self.push(Command::MaterialColor { face, param, color });
    }

    fn material_shininess(&mut self, face: Face, shininess: f32) {
        self.push(Command::MaterialShininess { face, shininess });
    }

    fn light_position(&mut self, light: u8, position: Vec4) {
        self.push(Command::LightPosition { light, position });
    }

    fn light_color(&mut self, light: u8, param: LightParam, color: Vec4) {
        self.push(Command::LightColor { light, param, color });
    }

    fn shade_model(&mut self, model: ShadeModel) {
        self.push(Command::ShadeModel(model));
    }

    fn front_face(&mut self, winding: FrontFace) {
        self.push(Command::FrontFace(winding));
    }

    fn cull_face(&mut self, face: Face) {
        self.push(Command::CullFace(face));
    }

    fn polygon_mode(&mut self, face: Face, mode: PolygonMode) {
        self.push(Command::PolygonMode(face, mode));
    }

    fn create_texture(&mut self, upload: TextureUpload<'_>) -> TextureId {
        let id = TextureId(self.next_texture);
        self.next_texture += 1;
        self.live_textures.insert(id);
        self.push(Command::CreateTexture {
            id,
            target: upload.target,
            width: upload.width,
            height: upload.height,
            channels: upload.channels,
        });
        id
    }

    fn bind_texture(&mut self, unit: u32, target: TextureTarget, texture: TextureId) {
        self.push(Command::BindTexture {
            unit,
            target,
            id: texture,
        });
    }

    fn delete_texture(&mut self, texture: TextureId) {
        self.live_textures.remove(&texture);
        self.push(Command::DeleteTexture(texture));
    }

    fn draw_arrays(&mut self, primitive: Primitive, first: usize, count: usize) {
        self.push(Command::DrawArrays {
            primitive,
            first,
            count,
        });
    }

    fn draw_elements(&mut self, primitive: Primitive, indices: &IndexBuffer) {
        self.push(Command::DrawElements {
            primitive,
            index_type: indices.index_type(),
            count: indices.len(),
        });
    }

    fn flush(&mut self) {
        self.push(Command::Flush);
    }
}
