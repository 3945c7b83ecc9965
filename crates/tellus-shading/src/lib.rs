//! Per-pixel shading models for the planet's two shells.
//!
//! These are the CPU reference implementations of the fragment math that the
//! WGSL shaders in `tellus-render` evaluate on the GPU. Both read the same
//! [`ShadingParams`] constants, and both are packed into one
//! [`LightingUniform`] so the two shader programs cannot drift apart.

mod atmosphere;
mod curves;
mod params;
mod surface;
mod uniform;

pub use atmosphere::shade_atmosphere;
pub use curves::{day_strength, edge_alpha, fresnel, smoothstep, twilight_factor};
pub use params::ShadingParams;
pub use surface::{SurfaceSample, shade_surface};
pub use uniform::LightingUniform;
