//! Material model for fixed-function lighting.
//!
//! A material has a reference color plus four scalar-or-color channels
//! (ambient, diffuse, specular, emission) and a shininess exponent. Scalar
//! channels are fractions of the reference color, except specular, which is a
//! fraction of white.

use glam::Vec4;
use vismesh_core::{parse_color, ColorInput, ColorProperty, Result};

use crate::pipeline::{Face, FixedFunction, MaterialParam};

/// Upper bound of the shininess exponent.
pub const MAX_SHININESS: f32 = 128.0;

/// Surface material properties.
#[derive(Debug, Clone, PartialEq)]
pub struct Material {
    color: Vec4,
    ambient: ColorProperty,
    diffuse: ColorProperty,
    specular: ColorProperty,
    emission: ColorProperty,
    shininess: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            color: Vec4::ONE,
            ambient: ColorProperty::Fraction(0.7),
            diffuse: ColorProperty::Fraction(0.7),
            specular: ColorProperty::Fraction(0.3),
            emission: ColorProperty::Fraction(0.0),
            shininess: 50.0,
        }
    }
}

impl Material {
    /// Creates a material with default properties.
    pub fn new() -> Self {
        Self::default()
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

    /// Gets the ambient reflection channel.
    pub fn ambient(&self) -> ColorProperty {
        self.ambient
    }

    /// Sets the ambient reflection channel.
    pub fn set_ambient(&mut self, value: impl Into<ColorInput>) -> Result<()> {
        self.ambient = ColorProperty::parse(value)?;
        Ok(())
    }

    /// Gets the diffuse reflection channel.
    pub fn diffuse(&self) -> ColorProperty {
        self.diffuse
    }

    /// Sets the diffuse reflection channel.
    pub fn set_diffuse(&mut self, value: impl Into<ColorInput>) -> Result<()> {
        self.diffuse = ColorProperty::parse(value)?;
        Ok(())
    }

    /// Sets ambient and diffuse to the same value.
    pub fn set_ambient_and_diffuse(&mut self, value: impl Into<ColorInput>) -> Result<()> {
        let prop = ColorProperty::parse(value)?;
        self.ambient = prop;
        self.diffuse = prop;
        Ok(())
    }

    /// Gets the specular reflection channel.
    pub fn specular(&self) -> ColorProperty {
        self.specular
    }

    /// Sets the specular reflection channel. A scalar is a fraction of white.
    pub fn set_specular(&mut self, value: impl Into<ColorInput>) -> Result<()> {
        self.specular = ColorProperty::parse(value)?;
        Ok(())
    }

    /// Gets the emission channel.
    pub fn emission(&self) -> ColorProperty {
        self.emission
    }

    /// Sets the emission channel.
    pub fn set_emission(&mut self, value: impl Into<ColorInput>) -> Result<()> {
        self.emission = ColorProperty::parse(value)?;
        Ok(())
    }

    /// Gets the shininess exponent.
    pub fn shininess(&self) -> f32 {
        self.shininess
    }

    /// Sets the shininess, silently clamped to `[0, 128]`.
    pub fn set_shininess(&mut self, shininess: f32) {
        self.shininess = if shininess.is_nan() {
            0.0
        } else {
            shininess.clamp(0.0, MAX_SHININESS)
        };
    }

    /// Resolves every channel to an explicit color.
    pub fn resolve(&self) -> ResolvedMaterial {
        ResolvedMaterial {
            ambient: self.ambient.resolve(self.color),
            diffuse: self.diffuse.resolve(self.color),
            specular: self.specular.resolve(Vec4::ONE),
            emission: self.emission.resolve(self.color),
            shininess: self.shininess,
        }
    }

    /// Uploads the material state for both faces.
    pub fn apply(&self, ctx: &mut dyn FixedFunction) {
        let resolved = self.resolve();
        let face = Face::FrontAndBack;
        ctx.material_color(face, MaterialParam::Ambient, resolved.ambient);
        ctx.material_color(face, MaterialParam::Diffuse, resolved.diffuse);
        ctx.material_color(face, MaterialParam::Specular, resolved.specular);
        ctx.material_shininess(face, resolved.shininess);
        ctx.material_color(face, MaterialParam::Emission, resolved.emission);
    }
}

/// A material with every channel resolved to RGBA.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolvedMaterial {
    pub ambient: Vec4,
    pub diffuse: Vec4,
    pub specular: Vec4,
    pub emission: Vec4,
    pub shininess: f32,
}
