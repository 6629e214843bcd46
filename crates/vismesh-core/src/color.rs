//! Color specifications and the scalar-or-color resolution rule.
//!
//! Material and light channels (ambient, diffuse, specular, emission) store a
//! [`ColorProperty`]: either an explicit RGBA color or a fraction of some
//! reference color that is only resolved when the state is applied.

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::error::{Result, VisError};

/// Basic named colors, keyed by their one-letter token.
const NAMED_COLORS: [(char, &str, [f32; 3]); 8] = [
    ('r', "red", [1.0, 0.0, 0.0]),
    ('g', "green", [0.0, 1.0, 0.0]),
    ('b', "blue", [0.0, 0.0, 1.0]),
    ('y', "yellow", [1.0, 1.0, 0.0]),
    ('c', "cyan", [0.0, 1.0, 1.0]),
    ('m', "magenta", [1.0, 0.0, 1.0]),
    ('k', "black", [0.0, 0.0, 0.0]),
    ('w', "white", [1.0, 1.0, 1.0]),
];

/// Looks up a named color. Accepts the one-letter tokens `"rgbycmkw"` and the
/// corresponding full names, case-insensitively.
pub fn named_color(name: &str) -> Option<Vec4> {
    let name = name.trim().to_ascii_lowercase();
    NAMED_COLORS
        .iter()
        .find(|(token, full, _)| {
            *full == name || (name.len() == 1 && name.starts_with(*token))
        })
        .map(|(_, _, rgb)| Vec3::from_array(*rgb).extend(1.0))
}

/// Raw user input for a color channel, before validation.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorInput {
    /// A named color token such as `"r"` or `"white"`.
    Named(String),
    /// A fraction of the reference color.
    Scalar(f32),
    /// A 3- or 4-component color.
    Components(Vec<f32>),
}

impl From<&str> for ColorInput {
    fn from(name: &str) -> Self {
        Self::Named(name.to_string())
    }
}

impl From<String> for ColorInput {
    fn from(name: String) -> Self {
        Self::Named(name)
    }
}

impl From<f32> for ColorInput {
    fn from(value: f32) -> Self {
        Self::Scalar(value)
    }
}

impl From<[f32; 3]> for ColorInput {
    fn from(rgb: [f32; 3]) -> Self {
        Self::Components(rgb.to_vec())
    }
}

impl From<[f32; 4]> for ColorInput {
    fn from(rgba: [f32; 4]) -> Self {
        Self::Components(rgba.to_vec())
    }
}

impl From<Vec3> for ColorInput {
    fn from(rgb: Vec3) -> Self {
        Self::Components(rgb.to_array().to_vec())
    }
}

impl From<Vec4> for ColorInput {
    fn from(rgba: Vec4) -> Self {
        Self::Components(rgba.to_array().to_vec())
    }
}

impl From<&[f32]> for ColorInput {
    fn from(values: &[f32]) -> Self {
        Self::Components(values.to_vec())
    }
}

impl From<Vec<f32>> for ColorInput {
    fn from(values: Vec<f32>) -> Self {
        Self::Components(values)
    }
}

/// A validated color channel: explicit color or fraction of a reference color.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ColorProperty {
    /// Fraction in `[0, 1]` of the reference color.
    Fraction(f32),
    /// An explicit RGBA color.
    Color(Vec4),
}

impl ColorProperty {
    /// Validates a channel value. Scalars are clamped to `[0, 1]`; tuples must
    /// have 3 (alpha becomes 1) or 4 components.
    pub fn parse(input: impl Into<ColorInput>) -> Result<Self> {
        match input.into() {
            ColorInput::Scalar(value) => Ok(Self::Fraction(clamp_fraction(value))),
            other => parse_color(other).map(Self::Color),
        }
    }

    /// Resolves the effective color against `reference`.
    ///
    /// A fraction scales the reference RGB component-wise and takes the
    /// reference alpha; an explicit color is returned unchanged.
    pub fn resolve(self, reference: Vec4) -> Vec4 {
        match self {
            Self::Fraction(f) => (reference.truncate() * f).extend(reference.w),
            Self::Color(color) => color,
        }
    }
}

/// Validates an explicit color (named or 3/4 components). Scalars are rejected.
pub fn parse_color(input: impl Into<ColorInput>) -> Result<Vec4> {
    match input.into() {
        ColorInput::Named(name) => named_color(&name)
            .ok_or_else(|| VisError::value(format!("unknown color name '{name}'"))),
        ColorInput::Components(values) => match values.as_slice() {
            [r, g, b] => Ok(Vec4::new(*r, *g, *b, 1.0)),
            [r, g, b, a] => Ok(Vec4::new(*r, *g, *b, *a)),
            other => Err(VisError::value(format!(
                "a color needs 3 or 4 components, got {}",
                other.len()
            ))),
        },
        ColorInput::Scalar(value) => Err(VisError::value(format!(
            "given value {value} can not represent a color"
        ))),
    }
}

fn clamp_fraction(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_scalar_resolves_against_reference() {
        let prop = ColorProperty::parse(0.5).unwrap();
        let resolved = prop.resolve(Vec4::new(1.0, 0.0, 0.0, 1.0));
        assert_eq!(resolved, Vec4::new(0.5, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_scalar_is_clamped() {
        assert_eq!(ColorProperty::parse(3.0).unwrap(), ColorProperty::Fraction(1.0));
        assert_eq!(ColorProperty::parse(-1.0).unwrap(), ColorProperty::Fraction(0.0));
    }

    #[test]
    fn test_alpha_taken_from_reference() {
        let prop = ColorProperty::Fraction(1.0);
        let resolved = prop.resolve(Vec4::new(0.2, 0.4, 0.6, 0.5));
        assert_eq!(resolved, Vec4::new(0.2, 0.4, 0.6, 0.5));
    }

    #[test]
    fn test_three_components_get_opaque_alpha() {
        let prop = ColorProperty::parse([0.1, 0.2, 0.3]).unwrap();
        assert_eq!(prop, ColorProperty::Color(Vec4::new(0.1, 0.2, 0.3, 1.0)));
        // Explicit colors ignore the reference
        assert_eq!(prop.resolve(Vec4::ZERO), Vec4::new(0.1, 0.2, 0.3, 1.0));
    }

    #[test]
    fn test_wrong_component_count_is_value_error() {
        assert!(matches!(
            ColorProperty::parse(vec![0.1, 0.2]),
            Err(VisError::Value(_))
        ));
        assert!(matches!(
            ColorProperty::parse(vec![0.1; 5]),
            Err(VisError::Value(_))
        ));
    }

    #[test]
    fn test_named_colors() {
        assert_eq!(named_color("r"), Some(Vec4::new(1.0, 0.0, 0.0, 1.0)));
        assert_eq!(named_color("White"), Some(Vec4::ONE));
        assert_eq!(named_color("k"), Some(Vec4::new(0.0, 0.0, 0.0, 1.0)));
        assert_eq!(named_color("x"), None);
        assert!(matches!(parse_color("purple"), Err(VisError::Value(_))));
    }

    #[test]
    fn test_parse_color_rejects_scalar() {
        assert!(parse_color(0.5).is_err());
    }

    proptest! {
        #[test]
        fn prop_scalar_clamped_to_unit_range(value in -1.0e6f32..1.0e6) {
            match ColorProperty::parse(value).unwrap() {
                ColorProperty::Fraction(f) => prop_assert!((0.0..=1.0).contains(&f)),
                ColorProperty::Color(c) => prop_assert!(false, "scalar parsed as color {}", c),
            }
        }

        #[test]
        fn prop_fraction_keeps_reference_alpha(
            value in -2.0f32..2.0,
            rgba in prop::array::uniform4(0.0f32..1.0),
        ) {
            let reference = Vec4::from_array(rgba);
            let resolved = ColorProperty::parse(value).unwrap().resolve(reference);
            prop_assert_eq!(resolved.w, reference.w);
            prop_assert!(resolved.truncate().cmple(reference.truncate()).all());
        }
    }
}
