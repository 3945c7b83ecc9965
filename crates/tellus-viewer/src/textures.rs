//! Texture loading for the three surface slots.
//!
//! Images are decoded with `image` and converted to RGBA8. When a file is
//! missing the slot falls back to a procedural placeholder so the viewer
//! still starts without assets; the core treats an unbound slot as fatal, so
//! the fallback happens here.

use std::path::Path;

use tellus_render::{SurfaceTextureSlots, TextureData};

use crate::config::TextureConfig;

/// Load all three slots, substituting procedural placeholders for files
/// that cannot be read.
pub fn load_surface_slots(config: &TextureConfig) -> SurfaceTextureSlots {
    SurfaceTextureSlots {
        day: Some(load_or(&config.day, placeholder_day)),
        night: Some(load_or(&config.night, placeholder_night)),
        specular_clouds: Some(load_or(&config.specular_clouds, placeholder_mask)),
    }
}

fn load_or(path: &Path, fallback: fn() -> TextureData) -> TextureData {
    match load_rgba8(path) {
        Ok(data) => {
            log::info!(
                "loaded texture {} ({}x{})",
                path.display(),
                data.width,
                data.height
            );
            data
        }
        Err(e) => {
            log::warn!("could not load {}: {e}; using placeholder", path.display());
            fallback()
        }
    }
}

fn load_rgba8(path: &Path) -> Result<TextureData, image::ImageError> {
    let rgba = image::open(path)?.into_rgba8();
    let (width, height) = rgba.dimensions();
    Ok(TextureData {
        pixels: rgba.into_raw(),
        width,
        height,
    })
}

const PLACEHOLDER_SIZE: u32 = 256;

fn placeholder(f: impl Fn(u32, u32) -> [u8; 4]) -> TextureData {
    let mut pixels = Vec::with_capacity((PLACEHOLDER_SIZE * PLACEHOLDER_SIZE * 4) as usize);
    for y in 0..PLACEHOLDER_SIZE {
        for x in 0..PLACEHOLDER_SIZE {
            pixels.extend_from_slice(&f(x, y));
        }
    }
    TextureData {
        pixels,
        width: PLACEHOLDER_SIZE,
        height: PLACEHOLDER_SIZE,
    }
}

/// Blue-green latitude bands standing in for the day albedo.
fn placeholder_day() -> TextureData {
    placeholder(|x, y| {
        let band = ((y / 16) % 2) as u8;
        let continent = ((x / 32 + y / 32) % 3 == 0) as u8;
        if continent == 1 {
            [60 + band * 20, 120, 50, 255]
        } else {
            [20, 60 + band * 15, 140, 255]
        }
    })
}

/// Sparse warm dots standing in for city lights.
fn placeholder_night() -> TextureData {
    placeholder(|x, y| {
        if (x * 31 + y * 17) % 97 == 0 {
            [255, 200, 120, 255]
        } else {
            [4, 4, 10, 255]
        }
    })
}

/// Ocean specular everywhere land is absent, wispy clouds in G.
fn placeholder_mask() -> TextureData {
    placeholder(|x, y| {
        let continent = (x / 32 + y / 32) % 3 == 0;
        let specular = if continent { 0 } else { 255 };
        let cloud = (((x as f32 * 0.08).sin() * (y as f32 * 0.11).cos() * 0.5 + 0.5) * 180.0) as u8;
        [specular, cloud, 0, 255]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholders_fill_all_slots() {
        let config = TextureConfig {
            day: "/nonexistent/day.jpg".into(),
            night: "/nonexistent/night.jpg".into(),
            specular_clouds: "/nonexistent/mask.jpg".into(),
        };
        let slots = load_surface_slots(&config);
        for (name, slot) in [
            ("day", &slots.day),
            ("night", &slots.night),
            ("specular_clouds", &slots.specular_clouds),
        ] {
            let data = slot.as_ref().unwrap_or_else(|| panic!("{name} slot empty"));
            assert_eq!(
                data.pixels.len(),
                (data.width * data.height * 4) as usize,
                "{name} placeholder must be tightly packed rgba8"
            );
        }
    }

    #[test]
    fn test_mask_placeholder_has_specular_ocean() {
        let mask = placeholder_mask();
        // Some texel must carry full specular (ocean) and some none (land).
        let reds: Vec<u8> = mask.pixels.chunks_exact(4).map(|p| p[0]).collect();
        assert!(reds.contains(&255));
        assert!(reds.contains(&0));
    }
}
