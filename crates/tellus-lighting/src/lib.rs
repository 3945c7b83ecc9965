//! Light and color state for the planet scene.
//!
//! [`SunLight`] holds the sun's position as spherical angles and derives a
//! unit direction vector; [`AtmosphereColors`] holds the day/twilight color
//! pair read by both the surface and atmosphere shading models.

mod colors;
mod sun;

pub use colors::AtmosphereColors;
pub use sun::{AngleRange, SunLight};
