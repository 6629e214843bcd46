//! Lights and the fixed set of light slots.

use glam::{Vec3, Vec4};
use vismesh_core::{parse_color, ColorInput, ColorProperty, LightOptions, Result, VisError};

use crate::pipeline::{Capability, FixedFunction, LightParam, MAX_LIGHTS};

/// A fixed-function light source occupying one slot.
///
/// Ambient, diffuse and specular are scalar-or-color channels resolved
/// against the light's reference color.
#[derive(Debug, Clone, PartialEq)]
pub struct Light {
    index: u8,
    on: bool,
    color: Vec4,
    ambient: ColorProperty,
    diffuse: ColorProperty,
    specular: ColorProperty,
    position: Vec4,
    cam_light: bool,
}

impl Light {
    /// Creates the light for slot `index` with its slot defaults.
    ///
    /// Slot 0 is the main light: a directional camera light along +z with a
    /// small ambient term. Other slots are positional lights at the origin.
    /// Every light starts switched off.
    pub(crate) fn new(index: u8) -> Self {
        let main = index == 0;
        Self {
            index,
            on: false,
            color: Vec4::ONE,
            ambient: ColorProperty::Fraction(if main { 0.2 } else { 0.0 }),
            diffuse: ColorProperty::Fraction(1.0),
            specular: ColorProperty::Fraction(1.0),
            position: if main {
                Vec4::new(0.0, 0.0, 1.0, 0.0)
            } else {
                Vec4::new(0.0, 0.0, 0.0, 1.0)
            },
            cam_light: main,
        }
    }

    /// The slot this light occupies.
    pub fn index(&self) -> u8 {
        self.index
    }

    /// Gets the reference color.
    pub fn color(&self) -> Vec4 {
        self.color
    }

    /// Sets the reference color. Scalars are not accepted here.
    pub fn set_color(&mut self, color: impl Into<ColorInput>) -> Result<()> {
        self.color = parse_color(color)?;
        Ok(())
    }

    /// Gets the ambient channel.
    pub fn ambient(&self) -> ColorProperty {
        self.ambient
    }

    /// Sets the ambient channel.
    pub fn set_ambient(&mut self, value: impl Into<ColorInput>) -> Result<()> {
        self.ambient = ColorProperty::parse(value)?;
        Ok(())
    }

    /// Gets the diffuse channel.
    pub fn diffuse(&self) -> ColorProperty {
        self.diffuse
    }

    /// Sets the diffuse channel.
    pub fn set_diffuse(&mut self, value: impl Into<ColorInput>) -> Result<()> {
        self.diffuse = ColorProperty::parse(value)?;
        Ok(())
    }

    /// Gets the specular channel.
    pub fn specular(&self) -> ColorProperty {
        self.specular
    }

    /// Sets the specular channel.
    pub fn set_specular(&mut self, value: impl Into<ColorInput>) -> Result<()> {
        self.specular = ColorProperty::parse(value)?;
        Ok(())
    }

    /// Gets the position (`w == 1`) or direction (`w == 0`).
    pub fn position(&self) -> Vec4 {
        self.position
    }

    /// Sets the position from 3 components (positional, `w = 1`) or 4.
    pub fn set_position(&mut self, position: &[f32]) -> Result<()> {
        self.position = match position {
            [x, y, z] => Vec4::new(*x, *y, *z, 1.0),
            [x, y, z, w] => Vec4::new(*x, *y, *z, *w),
            _ => {
                return Err(VisError::value(
                    "light position should be a 3 or 4 element sequence",
                ))
            }
        };
        Ok(())
    }

    /// Sets a positional light at `point`.
    pub fn set_point(&mut self, point: Vec3) {
        self.position = point.extend(1.0);
    }

    /// Whether this is a directional light (`w == 0`).
    pub fn is_directional(&self) -> bool {
        self.position.w == 0.0
    }

    /// Toggles between directional and positional, keeping x, y and z.
    pub fn set_directional(&mut self, directional: bool) {
        self.position.w = if directional { 0.0 } else { 1.0 };
    }

    /// Whether the light moves along with the camera.
    pub fn is_cam_light(&self) -> bool {
        self.cam_light
    }

    /// Sets whether the light moves along with the camera.
    pub fn set_cam_light(&mut self, cam_light: bool) {
        self.cam_light = cam_light;
    }

    /// Turns the light on or off.
    pub fn turn_on(&mut self, on: bool) {
        self.on = on;
    }

    /// Turns the light on.
    pub fn on(&mut self) {
        self.on = true;
    }

    /// Turns the light off.
    pub fn off(&mut self) {
        self.on = false;
    }

    /// Whether the light is on.
    pub fn is_on(&self) -> bool {
        self.on
    }

    /// Enables the light and uploads its position and resolved colors, or
    /// disables it when off.
    pub fn apply(&self, ctx: &mut dyn FixedFunction) {
        let cap = Capability::Light(self.index);
        if !self.on {
            ctx.disable(cap);
            return;
        }
        ctx.enable(cap);
        ctx.light_position(self.index, self.position);
        ctx.light_color(self.index, LightParam::Ambient, self.ambient.resolve(self.color));
        ctx.light_color(self.index, LightParam::Diffuse, self.diffuse.resolve(self.color));
        ctx.light_color(self.index, LightParam::Specular, self.specular.resolve(self.color));
    }
}

/// The fixed array of light slots owned by a rendering context.
#[derive(Debug, Clone, PartialEq)]
pub struct LightRig {
    lights: [Light; MAX_LIGHTS],
}

impl Default for LightRig {
    fn default() -> Self {
        Self::new(&LightOptions::default())
    }
}

impl LightRig {
    /// Creates all slots with their defaults; the main light is switched on
    /// when the options say so.
    #[allow(clippy::cast_possible_truncation)]
    pub fn new(options: &LightOptions) -> Self {
        let mut lights: [Light; MAX_LIGHTS] = std::array::from_fn(|i| Light::new(i as u8));
        lights[0].turn_on(options.main_light_on);
        Self { lights }
    }

    /// The light in slot `index`, if the slot exists.
    pub fn get(&self, index: usize) -> Option<&Light> {
        self.lights.get(index)
    }

    /// The light in slot `index`, if the slot exists.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut Light> {
        self.lights.get_mut(index)
    }

    /// The main light (slot 0).
    pub fn main_light(&mut self) -> &mut Light {
        &mut self.lights[0]
    }

    /// Iterates over all slots.
    pub fn iter(&self) -> impl Iterator<Item = &Light> {
        self.lights.iter()
    }

    /// Applies the camera-relative lights. Call while the modelview transform
    /// is still the identity so they follow the camera.
    pub fn apply_camera_lights(&self, ctx: &mut dyn FixedFunction) {
        for light in self.lights.iter().filter(|l| l.is_cam_light()) {
            light.apply(ctx);
        }
    }

    /// Applies the lights positioned in the scene. Call after the camera
    /// transform has been set up.
    pub fn apply_scene_lights(&self, ctx: &mut dyn FixedFunction) {
        for light in self.lights.iter().filter(|l| !l.is_cam_light()) {
            light.apply(ctx);
        }
    }

    /// Disables every light slot.
    pub fn disable_all(&self, ctx: &mut dyn FixedFunction) {
        for light in &self.lights {
            ctx.disable(Capability::Light(light.index()));
        }
    }
}
