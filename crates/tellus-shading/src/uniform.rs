//! GPU-side lighting uniform shared by both shader programs.

use bytemuck::{Pod, Zeroable};
use tellus_lighting::{AtmosphereColors, SunLight};

use crate::params::ShadingParams;

/// The one uniform both pipelines bind, 80 bytes, std140-compatible.
///
/// A single buffer holds a single instance of this struct; the surface and
/// atmosphere bind groups both reference that buffer, so the two shader
/// programs physically read the same memory and can never observe different
/// sun directions or colors within a frame.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Pod, Zeroable)]
pub struct LightingUniform {
    /// xyz = unit sun direction, w = padding.
    pub sun_direction: [f32; 4],
    /// xyz = day color (linear RGB), w = padding.
    pub day_color: [f32; 4],
    /// xyz = twilight color (linear RGB), w = padding.
    pub twilight_color: [f32; 4],
    /// x, y = day band edges; z, w = twilight band edges.
    pub bands: [f32; 4],
    /// x = surface fresnel exponent, y = atmosphere edge exponent,
    /// z = specular exponent, w = padding.
    pub exponents: [f32; 4],
}

impl LightingUniform {
    /// Pack the current light, colors, and shared constants.
    pub fn pack(sun: &SunLight, colors: &AtmosphereColors, params: &ShadingParams) -> Self {
        let d = sun.direction();
        Self {
            sun_direction: [d.x, d.y, d.z, 0.0],
            day_color: [colors.day.x, colors.day.y, colors.day.z, 0.0],
            twilight_color: [
                colors.twilight.x,
                colors.twilight.y,
                colors.twilight.z,
                0.0,
            ],
            bands: [
                params.day_band.0,
                params.day_band.1,
                params.twilight_band.0,
                params.twilight_band.1,
            ],
            exponents: [
                params.fresnel_exponent,
                params.edge_exponent,
                params.specular_exponent,
                0.0,
            ],
        }
    }

    /// The packed sun direction as a vector.
    pub fn sun_direction(&self) -> glam::Vec3 {
        glam::Vec3::new(
            self.sun_direction[0],
            self.sun_direction[1],
            self.sun_direction[2],
        )
    }
}
