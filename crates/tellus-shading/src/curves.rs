//! Scalar response curves used by both shading models.
//!
//! Mirrors the WGSL built-ins so the CPU reference math and the GPU shaders
//! evaluate the same functions.

use crate::params::ShadingParams;
use glam::Vec3;

/// Hermite smoothstep, identical to the WGSL built-in.
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Day/night mix factor in `[0, 1]` from `sun_facing = dot(N, L)`.
///
/// 0 is full night, 1 is full day. Smooth across the terminator; never a
/// step, so there is no visible seam.
pub fn day_strength(sun_facing: f32, params: &ShadingParams) -> f32 {
    smoothstep(params.day_band.0, params.day_band.1, sun_facing)
}

/// Twilight color mix factor in `[0, 1]` from `sun_facing`.
///
/// Selects between the twilight color (0) and the day color (1). Both
/// shells call this same function with the same band edges.
pub fn twilight_factor(sun_facing: f32, params: &ShadingParams) -> f32 {
    smoothstep(params.twilight_band.0, params.twilight_band.1, sun_facing)
}

/// View-angle falloff `pow(1 - max(dot(N, V), 0), exponent)`.
///
/// Zero looking straight at the surface, approaching 1 at grazing angles.
pub fn fresnel(normal: Vec3, view: Vec3, exponent: f32) -> f32 {
    (1.0 - normal.dot(view).max(0.0)).powf(exponent)
}

/// Atmosphere shell opacity: the Fresnel falloff with the (higher)
/// atmosphere edge exponent.
pub fn edge_alpha(normal: Vec3, view: Vec3, params: &ShadingParams) -> f32 {
    fresnel(normal, view, params.edge_exponent)
}
