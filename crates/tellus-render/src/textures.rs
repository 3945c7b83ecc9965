//! The surface material's three named texture slots.
//!
//! Day albedo and night emissive are sampled as sRGB; the specular/cloud
//! mask (specular in R, cloud in G) is data, not color, and stays linear.
//! All three slots must be bound before the first frame; a missing slot is a
//! [`ConfigError`], never a silent default.

use crate::error::ConfigError;

/// CPU-side RGBA8 pixel data for one texture slot.
#[derive(Clone, Debug)]
pub struct TextureData {
    /// Tightly packed RGBA8 rows, top to bottom.
    pub pixels: Vec<u8>,
    /// Width in texels.
    pub width: u32,
    /// Height in texels.
    pub height: u32,
}

impl TextureData {
    fn validate(&self, slot: &'static str) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::ZeroTextureDimensions {
                slot,
                width: self.width,
                height: self.height,
            });
        }
        let expected = (self.width * self.height * 4) as usize;
        if self.pixels.len() != expected {
            return Err(ConfigError::TextureSizeMismatch {
                slot,
                actual: self.pixels.len(),
                expected,
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }
}

/// The three slots the texture-loading collaborator fills before startup.
#[derive(Clone, Debug, Default)]
pub struct SurfaceTextureSlots {
    /// Day albedo (sRGB).
    pub day: Option<TextureData>,
    /// Night emissive (sRGB).
    pub night: Option<TextureData>,
    /// Packed mask: specular in R, cloud cover in G (linear).
    pub specular_clouds: Option<TextureData>,
}

/// GPU textures for the surface shell, ready to bind.
#[derive(Debug)]
pub struct SurfaceTextures {
    pub day_view: wgpu::TextureView,
    pub night_view: wgpu::TextureView,
    pub mask_view: wgpu::TextureView,
    pub sampler: wgpu::Sampler,
}

impl SurfaceTextures {
    /// Upload all three slots. Fails with [`ConfigError::MissingTexture`]
    /// naming the first unbound slot.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        slots: &SurfaceTextureSlots,
    ) -> Result<Self, ConfigError> {
        let day = require(&slots.day, "day")?;
        let night = require(&slots.night, "night")?;
        let mask = require(&slots.specular_clouds, "specular_clouds")?;

        let day_view = upload(device, queue, day, "surface-day", true);
        let night_view = upload(device, queue, night, "surface-night", true);
        let mask_view = upload(device, queue, mask, "surface-specular-clouds", false);

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("surface-sampler"),
            address_mode_u: wgpu::AddressMode::Repeat,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            ..Default::default()
        });

        Ok(Self {
            day_view,
            night_view,
            mask_view,
            sampler,
        })
    }
}

fn require<'a>(
    slot: &'a Option<TextureData>,
    name: &'static str,
) -> Result<&'a TextureData, ConfigError> {
    let data = slot
        .as_ref()
        .ok_or(ConfigError::MissingTexture { slot: name })?;
    data.validate(name)?;
    Ok(data)
}

fn upload(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    data: &TextureData,
    label: &str,
    srgb: bool,
) -> wgpu::TextureView {
    use wgpu::util::DeviceExt;

    let format = if srgb {
        wgpu::TextureFormat::Rgba8UnormSrgb
    } else {
        wgpu::TextureFormat::Rgba8Unorm
    };

    let texture = device.create_texture_with_data(
        queue,
        &wgpu::TextureDescriptor {
            label: Some(label),
            size: wgpu::Extent3d {
                width: data.width,
                height: data.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        },
        wgpu::util::TextureDataOrder::LayerMajor,
        &data.pixels,
    );

    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::create_test_device_queue;

    fn pixel(r: u8, g: u8, b: u8) -> TextureData {
        TextureData {
            pixels: vec![r, g, b, 255],
            width: 1,
            height: 1,
        }
    }

    #[test]
    fn test_missing_slot_is_an_error_not_a_default() {
        let Some((device, queue)) = create_test_device_queue() else {
            return;
        };
        let slots = SurfaceTextureSlots {
            day: Some(pixel(10, 20, 30)),
            night: None,
            specular_clouds: Some(pixel(0, 0, 0)),
        };
        let err = SurfaceTextures::new(&device, &queue, &slots).unwrap_err();
        match err {
            ConfigError::MissingTexture { slot } => assert_eq!(slot, "night"),
            other => panic!("expected MissingTexture, got {other:?}"),
        }
    }

    #[test]
    fn test_all_slots_bound_succeeds() {
        let Some((device, queue)) = create_test_device_queue() else {
            return;
        };
        let slots = SurfaceTextureSlots {
            day: Some(pixel(10, 20, 30)),
            night: Some(pixel(1, 2, 3)),
            specular_clouds: Some(pixel(255, 128, 0)),
        };
        assert!(SurfaceTextures::new(&device, &queue, &slots).is_ok());
    }

    #[test]
    fn test_size_mismatch_is_reported() {
        let Some((device, queue)) = create_test_device_queue() else {
            return;
        };
        let mut bad = pixel(1, 2, 3);
        bad.width = 2; // claims 2x1 but carries one texel
        let slots = SurfaceTextureSlots {
            day: Some(bad),
            night: Some(pixel(0, 0, 0)),
            specular_clouds: Some(pixel(0, 0, 0)),
        };
        let err = SurfaceTextures::new(&device, &queue, &slots).unwrap_err();
        assert!(matches!(err, ConfigError::TextureSizeMismatch { slot: "day", .. }));
    }

    #[test]
    fn test_zero_dimensions_rejected_without_device_work() {
        let data = TextureData {
            pixels: vec![],
            width: 0,
            height: 0,
        };
        let err = data.validate("day").unwrap_err();
        assert!(matches!(err, ConfigError::ZeroTextureDimensions { .. }));
    }
}
