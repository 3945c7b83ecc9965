//! Tunable constants shared by the surface and atmosphere models.

/// Shading constants read by both shells.
///
/// One instance feeds one uniform buffer bound to both shader programs, so
/// the surface rim tint and the atmosphere shell always use byte-identical
/// band edges and the two shells blend seamlessly at their boundary.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShadingParams {
    /// `smoothstep` edges for the day/night mix, as a function of
    /// `dot(N, L)`. Centered on the terminator so the transition is smooth
    /// on both sides.
    pub day_band: (f32, f32),
    /// `smoothstep` edges for the twilight color mix. Narrower than the day
    /// band and biased toward the lit side.
    pub twilight_band: (f32, f32),
    /// Fresnel exponent for the surface's own edge tint.
    pub fresnel_exponent: f32,
    /// Fresnel exponent driving the atmosphere shell's opacity. Typically
    /// higher than `fresnel_exponent` so the shell stays tight to the limb.
    pub edge_exponent: f32,
    /// Phong exponent for the specular cloud highlight.
    pub specular_exponent: f32,
}

impl Default for ShadingParams {
    fn default() -> Self {
        Self {
            day_band: (-0.5, 0.5),
            twilight_band: (-0.15, 0.45),
            fresnel_exponent: 2.0,
            edge_exponent: 3.0,
            specular_exponent: 32.0,
        }
    }
}
