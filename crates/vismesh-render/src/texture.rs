//! Image textures mapped onto meshes through 2D texture coordinates.

use vismesh_core::{Array, ArrayData, VisError};

use crate::error::RenderResult;
use crate::pipeline::{FixedFunction, TextureId, TextureTarget, TextureUpload};

/// Lifecycle contract shared by textures and colormaps.
///
/// CPU-side data is uploaded lazily on the first [`enable`](Self::enable);
/// device resources are released by
/// [`destroy_gpu_state`](Self::destroy_gpu_state) and everything, CPU data
/// included, by [`destroy`](Self::destroy).
pub trait TextureResource {
    /// Uploads if needed, enables the target and binds to `unit`.
    fn enable(&mut self, ctx: &mut dyn FixedFunction, unit: u32);

    /// Disables the texture target.
    fn disable(&self, ctx: &mut dyn FixedFunction);

    /// Releases device resources; the next enable uploads again.
    fn destroy_gpu_state(&mut self, ctx: &mut dyn FixedFunction);

    /// Releases all resources including CPU-side data.
    fn destroy(&mut self, ctx: &mut dyn FixedFunction);
}

/// Tracks the device copy of some CPU-side texel data.
#[derive(Debug, Default)]
pub(crate) struct DeviceSlot {
    id: Option<TextureId>,
    stale: bool,
}

impl DeviceSlot {
    /// Returns the device texture, uploading (or re-uploading stale data) first.
    pub(crate) fn ensure(&mut self, ctx: &mut dyn FixedFunction, upload: TextureUpload<'_>) -> TextureId {
        if self.stale {
            self.release(ctx);
        }
        if let Some(id) = self.id {
            return id;
        }
        let id = ctx.create_texture(upload);
        log::debug!(
            "uploaded {:?} texture {}x{}x{} as {id:?}",
            upload.target,
            upload.width,
            upload.height,
            upload.channels
        );
        self.id = Some(id);
        self.stale = false;
        id
    }

    /// Marks the device copy as outdated.
    pub(crate) fn invalidate(&mut self) {
        self.stale = self.id.is_some();
    }

    /// Deletes the device copy, if any.
    pub(crate) fn release(&mut self, ctx: &mut dyn FixedFunction) {
        if let Some(id) = self.id.take() {
            ctx.delete_texture(id);
        }
        self.stale = false;
    }

    pub(crate) fn is_uploaded(&self) -> bool {
        self.id.is_some()
    }
}

/// A 2D grayscale or RGB image texture.
#[derive(Debug)]
pub struct Texture2D {
    width: u32,
    height: u32,
    channels: u32,
    texels: Vec<f32>,
    device: DeviceSlot,
}

impl Texture2D {
    /// Creates a texture from an `(H, W)` grayscale or `(H, W, 3)` color array.
    ///
    /// 8- and 16-bit integer data is scaled to `[0, 1]`; other data is taken
    /// as-is.
    pub fn from_array(data: &Array) -> RenderResult<Self> {
        let channels = match data.shape() {
            [_, _] => 1,
            [_, _, 3] => 3,
            shape => {
                return Err(VisError::shape(format!(
                    "only 2D images can be mapped to a mesh, got shape {shape:?}"
                ))
                .into())
            }
        };
        let (height, width) = (data.shape()[0], data.shape()[1]);
        let texels = match data.data() {
            ArrayData::U8(v) => v.iter().map(|&x| f32::from(x) / 255.0).collect(),
            ArrayData::U16(v) => v.iter().map(|&x| f32::from(x) / 65535.0).collect(),
            other => other.to_f32_vec(),
        };
        Ok(Self {
            width: dimension(width)?,
            height: dimension(height)?,
            channels,
            texels,
            device: DeviceSlot::default(),
        })
    }

    /// Creates a texture from a decoded image. Grayscale images stay single
    /// channel; everything else is converted to RGB.
    pub fn from_image(image: &image::DynamicImage) -> Self {
        let (width, height) = (image.width(), image.height());
        let (channels, raw) = if image.color().has_color() {
            (3, image.to_rgb8().into_raw())
        } else {
            (1, image.to_luma8().into_raw())
        };
        Self {
            width,
            height,
            channels,
            texels: raw.iter().map(|&x| f32::from(x) / 255.0).collect(),
            device: DeviceSlot::default(),
        }
    }

    /// Decodes an encoded image (PNG, JPEG, ...) into a texture.
    pub fn decode(bytes: &[u8]) -> RenderResult<Self> {
        let image = image::load_from_memory(bytes)?;
        Ok(Self::from_image(&image))
    }

    /// Width in texels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in texels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channels per texel (1 or 3).
    pub fn channels(&self) -> u32 {
        self.channels
    }

    /// Row-major texel values.
    pub fn texels(&self) -> &[f32] {
        &self.texels
    }

    /// Whether a device copy currently exists.
    pub fn is_uploaded(&self) -> bool {
        self.device.is_uploaded()
    }
}

impl TextureResource for Texture2D {
    fn enable(&mut self, ctx: &mut dyn FixedFunction, unit: u32) {
        if self.texels.is_empty() {
            log::warn!("texture has no data; not binding");
            return;
        }
        let id = self.device.ensure(
            ctx,
            TextureUpload {
                target: TextureTarget::D2,
                width: self.width,
                height: self.height,
                channels: self.channels,
                texels: &self.texels,
            },
        );
        ctx.enable(TextureTarget::D2.capability());
        ctx.bind_texture(unit, TextureTarget::D2, id);
    }

    fn disable(&self, ctx: &mut dyn FixedFunction) {
        ctx.disable(TextureTarget::D2.capability());
    }

    fn destroy_gpu_state(&mut self, ctx: &mut dyn FixedFunction) {
        self.device.release(ctx);
    }

    fn destroy(&mut self, ctx: &mut dyn FixedFunction) {
        self.device.release(ctx);
        self.texels = Vec::new();
        self.width = 0;
        self.height = 0;
    }
}

fn dimension(n: usize) -> RenderResult<u32> {
    u32::try_from(n).map_err(|_| VisError::shape(format!("image dimension {n} is too large")).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Capability;
    use crate::recorder::{Command, CommandRecorder};
    use crate::RenderError;

    fn gray(h: usize, w: usize) -> Array {
        Array::new(vec![h, w], ArrayData::U8(vec![255; h * w])).unwrap()
    }

    #[test]
    fn test_grayscale_array() {
        let tex = Texture2D::from_array(&gray(2, 3)).unwrap();
        assert_eq!((tex.width(), tex.height(), tex.channels()), (3, 2, 1));
        assert!(tex.texels().iter().all(|&t| (t - 1.0).abs() < 1e-6));
    }

    #[test]
    fn test_color_array() {
        let data = Array::new(vec![2, 2, 3], ArrayData::F32(vec![0.5; 12])).unwrap();
        let tex = Texture2D::from_array(&data).unwrap();
        assert_eq!(tex.channels(), 3);
    }

    #[test]
    fn test_rejects_other_shapes() {
        let rgba = Array::new(vec![2, 2, 4], ArrayData::U8(vec![0; 16])).unwrap();
        assert!(matches!(
            Texture2D::from_array(&rgba),
            Err(RenderError::Core(VisError::Shape(_)))
        ));
        let line = Array::from(vec![0u8; 8]);
        assert!(Texture2D::from_array(&line).is_err());
    }

    #[test]
    fn test_from_image() {
        let img = image::DynamicImage::ImageLuma8(image::GrayImage::new(4, 2));
        let tex = Texture2D::from_image(&img);
        assert_eq!((tex.width(), tex.height(), tex.channels()), (4, 2, 1));

        let img = image::DynamicImage::ImageRgba8(image::RgbaImage::new(2, 2));
        assert_eq!(Texture2D::from_image(&img).channels(), 3);
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(matches!(
            Texture2D::decode(b"definitely not an image"),
            Err(RenderError::Image(_))
        ));
    }

    #[test]
    fn test_lazy_upload_and_lifecycle() {
        let mut rec = CommandRecorder::new();
        let mut tex = Texture2D::from_array(&gray(2, 2)).unwrap();
        assert!(!tex.is_uploaded());

        tex.enable(&mut rec, 0);
        tex.enable(&mut rec, 0);
        let creates = rec
            .commands()
            .iter()
            .filter(|c| matches!(c, Command::CreateTexture { .. }))
            .count();
        assert_eq!(creates, 1);
        assert!(rec.is_enabled(Capability::Texture2D));

        tex.disable(&mut rec);
        assert!(!rec.is_enabled(Capability::Texture2D));

        tex.destroy_gpu_state(&mut rec);
        assert_eq!(rec.live_texture_count(), 0);
        assert!(!tex.is_uploaded());

        tex.destroy(&mut rec);
        assert!(tex.texels().is_empty());
    }
}
