//! Colormap lookup for 1D texture coordinates.

use glam::{Vec3, Vec4};
use vismesh_core::{Array, Result, VisError};

use crate::pipeline::{FixedFunction, TextureTarget, TextureUpload};
use crate::texture::{DeviceSlot, TextureResource};

/// Number of entries in a resampled colormap table.
pub const COLORMAP_SIZE: usize = 256;

/// Built-in colormaps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColormapPreset {
    Gray,
    Jet,
    Hot,
    Cool,
}

impl ColormapPreset {
    /// Looks up a preset by name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "gray" | "grey" => Some(Self::Gray),
            "jet" => Some(Self::Jet),
            "hot" => Some(Self::Hot),
            "cool" => Some(Self::Cool),
            _ => None,
        }
    }

    /// Control points, evenly spaced from 0 to 1.
    pub fn control_points(self) -> Vec<Vec4> {
        let rgb: &[[f32; 3]] = match self {
            Self::Gray => &[[0.0, 0.0, 0.0], [1.0, 1.0, 1.0]],
            Self::Jet => &[
                [0.0, 0.0, 0.5],
                [0.0, 0.0, 1.0],
                [0.0, 0.5, 1.0],
                [0.0, 1.0, 1.0],
                [0.5, 1.0, 0.5],
                [1.0, 1.0, 0.0],
                [1.0, 0.5, 0.0],
                [1.0, 0.0, 0.0],
                [0.5, 0.0, 0.0],
            ],
            Self::Hot => &[
                [0.0, 0.0, 0.0],
                [1.0, 0.0, 0.0],
                [1.0, 1.0, 0.0],
                [1.0, 1.0, 1.0],
            ],
            Self::Cool => &[[0.0, 1.0, 1.0], [1.0, 0.0, 1.0]],
        };
        rgb.iter().map(|c| Vec3::from_array(*c).extend(1.0)).collect()
    }
}

/// A colormap resampled to a [`COLORMAP_SIZE`]×4 lookup table.
#[derive(Debug)]
pub struct Colormap {
    table: Vec<Vec4>,
    device: DeviceSlot,
}

impl Default for Colormap {
    fn default() -> Self {
        Self::from_preset(ColormapPreset::Gray)
    }
}

impl Colormap {
    /// Creates the default (gray) colormap.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a colormap from a preset.
    pub fn from_preset(preset: ColormapPreset) -> Self {
        Self {
            table: resample(&preset.control_points()),
            device: DeviceSlot::default(),
        }
    }

    /// The resampled lookup table.
    pub fn table(&self) -> &[Vec4] {
        &self.table
    }

    /// Replaces the map from a list of 3- or 4-component entries.
    pub fn set_entries<C: AsRef<[f32]>>(&mut self, entries: &[C]) -> Result<()> {
        let colors = entries
            .iter()
            .map(|entry| match entry.as_ref() {
                [r, g, b] => Ok(Vec4::new(*r, *g, *b, 1.0)),
                [r, g, b, a] => Ok(Vec4::new(*r, *g, *b, *a)),
                other => Err(VisError::value(format!(
                    "colormap entries need 3 or 4 values, got {}",
                    other.len()
                ))),
            })
            .collect::<Result<Vec<_>>>()?;
        self.set_colors(colors)
    }

    /// Replaces the map from an `(N, 3)` or `(N, 4)` array.
    pub fn set_array(&mut self, data: &Array) -> Result<()> {
        let width = match data.shape() {
            [_, w @ (3 | 4)] => *w,
            shape => {
                return Err(VisError::shape(format!(
                    "a colormap array must be (N, 3) or (N, 4), got {shape:?}"
                )))
            }
        };
        let values = data.data().to_f32_vec();
        let colors = values
            .chunks_exact(width)
            .map(|c| if width == 3 { Vec4::new(c[0], c[1], c[2], 1.0) } else { Vec4::from_slice(c) })
            .collect();
        self.set_colors(colors)
    }

    /// Replaces the map with a preset.
    pub fn set_preset(&mut self, preset: ColormapPreset) {
        self.table = resample(&preset.control_points());
        self.device.invalidate();
    }

    fn set_colors(&mut self, colors: Vec<Vec4>) -> Result<()> {
        if colors.is_empty() {
            return Err(VisError::value("a colormap needs at least one color"));
        }
        self.table = resample(&colors);
        self.device.invalidate();
        log::debug!("resampled {} colormap entries to {COLORMAP_SIZE}", colors.len());
        Ok(())
    }

    /// Samples the table at `t` in `[0, 1]` (nearest entry).
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn sample(&self, t: f32) -> Vec4 {
        if self.table.is_empty() {
            return Vec4::ZERO;
        }
        let n = self.table.len() - 1;
        let idx = (t.clamp(0.0, 1.0) * n as f32).round() as usize;
        self.table[idx.min(n)]
    }

    /// Whether a device copy currently exists.
    pub fn is_uploaded(&self) -> bool {
        self.device.is_uploaded()
    }
}

impl TextureResource for Colormap {
    #[allow(clippy::cast_possible_truncation)]
    fn enable(&mut self, ctx: &mut dyn FixedFunction, unit: u32) {
        if self.table.is_empty() {
            log::warn!("colormap has been destroyed; not binding");
            return;
        }
        let texels: Vec<f32> = self.table.iter().flat_map(|c| c.to_array()).collect();
        let id = self.device.ensure(
            ctx,
            TextureUpload {
                target: TextureTarget::D1,
                width: self.table.len() as u32,
                height: 1,
                channels: 4,
                texels: &texels,
            },
        );
        ctx.enable(TextureTarget::D1.capability());
        ctx.bind_texture(unit, TextureTarget::D1, id);
    }

    fn disable(&self, ctx: &mut dyn FixedFunction) {
        ctx.disable(TextureTarget::D1.capability());
    }

    fn destroy_gpu_state(&mut self, ctx: &mut dyn FixedFunction) {
        self.device.release(ctx);
    }

    fn destroy(&mut self, ctx: &mut dyn FixedFunction) {
        self.device.release(ctx);
        self.table = Vec::new();
    }
}

/// Linearly resamples evenly spaced control colors to [`COLORMAP_SIZE`] entries.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn resample(colors: &[Vec4]) -> Vec<Vec4> {
    match colors {
        [] => Vec::new(),
        [only] => vec![*only; COLORMAP_SIZE],
        _ => {
            let segments = (colors.len() - 1) as f32;
            (0..COLORMAP_SIZE)
                .map(|i| {
                    let pos = i as f32 / (COLORMAP_SIZE - 1) as f32 * segments;
                    let idx = (pos.floor() as usize).min(colors.len() - 2);
                    colors[idx].lerp(colors[idx + 1], pos - idx as f32)
                })
                .collect()
        }
    }
}
