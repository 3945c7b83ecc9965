//! The day/twilight color pair shared by both shading models.

use glam::Vec3;

/// Linear-RGB colors for the atmospheric tint.
///
/// Both the surface rim tint and the atmosphere shell read the same pair, so
/// the two shells never diverge within a frame. Each color is mutable
/// independently; the day color only affects lit regions and the twilight
/// color only affects the terminator band.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AtmosphereColors {
    /// Tint over the lit hemisphere.
    pub day: Vec3,
    /// Tint in the terminator band.
    pub twilight: Vec3,
}

impl Default for AtmosphereColors {
    fn default() -> Self {
        Self {
            // Cyan-blue day glow, orange twilight.
            day: Vec3::new(0.0, 0.667, 1.0),
            twilight: Vec3::new(1.0, 0.4, 0.0),
        }
    }
}

impl AtmosphereColors {
    /// Replace the day color.
    pub fn set_day(&mut self, rgb: Vec3) {
        self.day = rgb;
    }

    /// Replace the twilight color.
    pub fn set_twilight(&mut self, rgb: Vec3) {
        self.twilight = rgb;
    }
}
