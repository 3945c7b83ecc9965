//! Directional sun state: spherical angles in, unit direction out.
//!
//! The sun is an infinitely-distant directional light positioned by two
//! angles (polar from the +Y axis, azimuthal around it). Both angles are
//! clamped independently to configurable ranges, and the derived direction
//! vector is recomputed eagerly on every change so the very next read
//! observes the update.

use glam::Vec3;
use std::f32::consts::{FRAC_PI_2, PI};

/// Inclusive clamp range for one spherical angle, in radians.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AngleRange {
    pub min: f32,
    pub max: f32,
}

impl AngleRange {
    /// Full half-turn range `[0, π]`, the default for both angles.
    pub const HALF_TURN: Self = Self { min: 0.0, max: PI };

    /// Clamp a value into this range.
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min, self.max)
    }
}

/// The single directional light driving both planet shells.
///
/// Angles follow the convention `direction = (sin(polar) * cos(azimuthal),
/// cos(polar), sin(polar) * sin(azimuthal))`, so `polar = π/2,
/// azimuthal = 0` points down the +X axis and `polar = 0` points up +Y.
///
/// Out-of-range inputs are clamped, never rejected; clamping is normal
/// control flow, not an error.
#[derive(Clone, Debug)]
pub struct SunLight {
    polar: f32,
    azimuthal: f32,
    polar_range: AngleRange,
    azimuthal_range: AngleRange,
    direction: Vec3,
}

impl Default for SunLight {
    fn default() -> Self {
        // Sun on the horizon, slightly off the +X axis, so the terminator
        // and both color bands are visible from the default camera.
        Self::new(FRAC_PI_2, 0.5, AngleRange::HALF_TURN, AngleRange::HALF_TURN)
    }
}

impl SunLight {
    /// Create a sun with initial angles and per-angle clamp ranges.
    ///
    /// The initial angles are clamped like any later update.
    pub fn new(
        polar: f32,
        azimuthal: f32,
        polar_range: AngleRange,
        azimuthal_range: AngleRange,
    ) -> Self {
        let mut sun = Self {
            polar: 0.0,
            azimuthal: 0.0,
            polar_range,
            azimuthal_range,
            direction: Vec3::X,
        };
        sun.set_angles(polar, azimuthal);
        sun
    }

    /// Update both angles, clamping each to its configured range, and
    /// recompute the cached unit direction.
    pub fn set_angles(&mut self, polar: f32, azimuthal: f32) {
        self.polar = self.polar_range.clamp(polar);
        self.azimuthal = self.azimuthal_range.clamp(azimuthal);

        let (sin_p, cos_p) = self.polar.sin_cos();
        let (sin_a, cos_a) = self.azimuthal.sin_cos();
        // Already unit length analytically; normalize to absorb rounding.
        self.direction = Vec3::new(sin_p * cos_a, cos_p, sin_p * sin_a).normalize();
    }

    /// The current unit direction pointing from the planet toward the sun.
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// The stored polar angle after clamping.
    pub fn polar(&self) -> f32 {
        self.polar
    }

    /// The stored azimuthal angle after clamping.
    pub fn azimuthal(&self) -> f32 {
        self.azimuthal
    }

    /// The configured polar clamp range.
    pub fn polar_range(&self) -> AngleRange {
        self.polar_range
    }

    /// The configured azimuthal clamp range.
    pub fn azimuthal_range(&self) -> AngleRange {
        self.azimuthal_range
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_direction_is_unit_length_for_arbitrary_angles() {
        let mut sun = SunLight::default();
        for i in 0..64 {
            let polar = i as f32 * PI / 63.0;
            for j in 0..64 {
                let azimuthal = j as f32 * PI / 63.0;
                sun.set_angles(polar, azimuthal);
                let len = sun.direction().length();
                assert!(
                    (len - 1.0).abs() < 1e-6,
                    "direction must stay unit length at ({polar}, {azimuthal}), got {len}"
                );
            }
        }
    }

    #[test]
    fn test_horizon_sun_points_down_positive_x() {
        let mut sun = SunLight::default();
        sun.set_angles(FRAC_PI_2, 0.0);
        let d = sun.direction();
        assert!((d.x - 1.0).abs() < 1e-6, "expected +X, got {d:?}");
        assert!(d.y.abs() < 1e-6, "expected y = 0, got {d:?}");
        assert!(d.z.abs() < 1e-6, "expected z = 0, got {d:?}");
    }

    #[test]
    fn test_zenith_sun_points_up() {
        let mut sun = SunLight::default();
        sun.set_angles(0.0, 0.0);
        assert!((sun.direction().y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_range_polar_clamps_to_minimum() {
        let mut sun = SunLight::default();
        sun.set_angles(-0.7, 0.5);
        assert_eq!(sun.polar(), 0.0, "negative polar must clamp to range min");
        // Clamped angle still produces a valid direction: straight up.
        assert!((sun.direction().y - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_out_of_range_azimuthal_clamps_to_maximum() {
        let mut sun = SunLight::default();
        sun.set_angles(FRAC_PI_2, 10.0);
        assert_eq!(sun.azimuthal(), PI, "oversized azimuthal must clamp to range max");
    }

    #[test]
    fn test_clamping_is_deterministic() {
        let mut a = SunLight::default();
        let mut b = SunLight::default();
        a.set_angles(-3.0, 7.0);
        b.set_angles(-3.0, 7.0);
        assert_eq!(a.polar(), b.polar());
        assert_eq!(a.azimuthal(), b.azimuthal());
        assert_eq!(a.direction(), b.direction());
    }

    #[test]
    fn test_update_is_visible_to_next_read() {
        let mut sun = SunLight::default();
        let before = sun.direction();
        sun.set_angles(0.3, 2.0);
        assert_ne!(sun.direction(), before, "direction must recompute on set_angles");
    }

    #[test]
    fn test_custom_range_restricts_angles() {
        let range = AngleRange { min: 0.2, max: 0.4 };
        let sun = SunLight::new(1.0, 1.0, range, range);
        assert_eq!(sun.polar(), 0.4);
        assert_eq!(sun.azimuthal(), 0.4);
    }
}
