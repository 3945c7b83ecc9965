//! Surface shell fragment model: day/night blend, clouds, specular, rim tint.

use crate::curves::{day_strength, fresnel, twilight_factor};
use crate::params::ShadingParams;
use glam::Vec3;
use tellus_lighting::AtmosphereColors;

/// Texture values sampled at one surface point.
#[derive(Clone, Copy, Debug)]
pub struct SurfaceSample {
    /// Day albedo.
    pub day: Vec3,
    /// Night emissive (city lights).
    pub night: Vec3,
    /// Specular intensity, the R channel of the packed mask.
    pub specular: f32,
    /// Cloud coverage, the G channel of the packed mask.
    pub cloud: f32,
}

/// Shade one surface fragment. All direction vectors must be unit length:
/// `normal` outward, `view` toward the camera, `light` toward the sun.
///
/// Returns opaque linear RGB; the surface shell always writes alpha 1.
pub fn shade_surface(
    normal: Vec3,
    view: Vec3,
    light: Vec3,
    sample: SurfaceSample,
    colors: &AtmosphereColors,
    params: &ShadingParams,
) -> Vec3 {
    let sun_facing = normal.dot(light);
    let day = day_strength(sun_facing, params);

    // Night emissive fades out as the day side fades in; clouds only show
    // where lit, so partially lit clouds thin out toward the terminator.
    let mut color = sample.night.lerp(sample.day, day);
    color = color.lerp(Vec3::ONE, sample.cloud * day);

    // Phong highlight off the cloud/water mask, gated by day so the unlit
    // side never glints.
    let reflection = reflect(-light, normal);
    let highlight = reflection.dot(view).max(0.0).powf(params.specular_exponent);
    color += Vec3::splat(highlight * sample.specular * day);

    // Edge tint: the planet's own rim picks up the atmosphere color without
    // a second pass. The twilight factor both selects the rim color and
    // gates the blend, so the full-night limb stays dark.
    let rim_fresnel = fresnel(normal, view, params.fresnel_exponent);
    let twilight = twilight_factor(sun_facing, params);
    let rim = colors.twilight.lerp(colors.day, twilight);
    color.lerp(rim, (rim_fresnel * twilight).clamp(0.0, 1.0))
}

/// Mirror of the WGSL `reflect` built-in: `i - 2 * dot(n, i) * n`.
fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - 2.0 * normal.dot(incident) * normal
}
