//! Atmosphere shell fragment model: twilight color mix + limb falloff.

use crate::curves::{edge_alpha, twilight_factor};
use crate::params::ShadingParams;
use glam::{Vec3, Vec4};
use tellus_lighting::AtmosphereColors;

/// Shade one atmosphere fragment. Vectors as in
/// [`shade_surface`](crate::shade_surface); no textures are involved.
///
/// Returns linear RGB plus alpha. Alpha is near zero looking straight at
/// the shell and approaches one at grazing angles, which is what makes the
/// back-face-rendered shell read as a limb glow behind the planet
/// silhouette.
pub fn shade_atmosphere(
    normal: Vec3,
    view: Vec3,
    light: Vec3,
    colors: &AtmosphereColors,
    params: &ShadingParams,
) -> Vec4 {
    let sun_facing = normal.dot(light);
    // Same band function and constants as the surface rim tint, so the two
    // shells agree at their shared boundary.
    let twilight = twilight_factor(sun_facing, params);
    let rgb = colors.twilight.lerp(colors.day, twilight);
    rgb.extend(edge_alpha(normal, view, params))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shade_surface;
    use crate::surface::SurfaceSample;

    #[test]
    fn test_alpha_vanishes_head_on() {
        let colors = AtmosphereColors::default();
        let params = ShadingParams::default();
        let out = shade_atmosphere(Vec3::Z, Vec3::Z, Vec3::X, &colors, &params);
        assert!(out.w.abs() < 1e-6, "head-on alpha must be ~0, got {}", out.w);
    }

    #[test]
    fn test_alpha_approaches_one_at_the_limb() {
        let colors = AtmosphereColors::default();
        let params = ShadingParams::default();
        let near_grazing = Vec3::new(1.0, 0.0, 0.01).normalize();
        let out = shade_atmosphere(Vec3::Z, near_grazing, Vec3::X, &colors, &params);
        assert!(out.w > 0.95, "grazing alpha must approach 1, got {}", out.w);
    }

    #[test]
    fn test_lit_side_is_day_color_night_side_is_twilight_color() {
        let colors = AtmosphereColors::default();
        let params = ShadingParams::default();
        let lit = shade_atmosphere(Vec3::X, Vec3::Z, Vec3::X, &colors, &params);
        assert!((lit.truncate() - colors.day).length() < 1e-5);

        let unlit = shade_atmosphere(-Vec3::X, Vec3::Z, Vec3::X, &colors, &params);
        assert!((unlit.truncate() - colors.twilight).length() < 1e-5);
    }

    #[test]
    fn test_twilight_color_edit_leaves_the_lit_side_alone() {
        let mut colors = AtmosphereColors::default();
        let params = ShadingParams::default();
        let before = shade_atmosphere(Vec3::X, Vec3::Z, Vec3::X, &colors, &params);
        colors.set_twilight(Vec3::new(0.3, 0.9, 0.2));
        let after = shade_atmosphere(Vec3::X, Vec3::Z, Vec3::X, &colors, &params);
        assert_eq!(before, after, "fully lit shell must ignore the twilight color");
    }

    #[test]
    fn test_both_shells_share_the_twilight_mapping() {
        // At the limb on the terminator, the surface rim tint and the shell
        // color must come from the same day/twilight mix. Drive the surface
        // output to the pure rim color with a grazing view and compare hues.
        let colors = AtmosphereColors::default();
        let params = ShadingParams::default();
        let n = Vec3::Z;
        let light = Vec3::new(0.8, 0.0, 0.6).normalize();
        let grazing = Vec3::new(1.0, 0.0, 1e-4).normalize();

        let shell = shade_atmosphere(n, grazing, light, &colors, &params);
        let twilight = crate::twilight_factor(n.dot(light), &params);
        let expected = colors.twilight.lerp(colors.day, twilight);
        assert!((shell.truncate() - expected).length() < 1e-5);

        // The surface pulls toward that same rim color, scaled by the same
        // twilight factor.
        let surf = shade_surface(
            n,
            grazing,
            light,
            SurfaceSample {
                day: Vec3::ZERO,
                night: Vec3::ZERO,
                specular: 0.0,
                cloud: 0.0,
            },
            &colors,
            &params,
        );
        let rim_amount = (crate::fresnel(n, grazing, params.fresnel_exponent) * twilight)
            .clamp(0.0, 1.0);
        assert!((surf - expected * rim_amount).length() < 1e-4);
    }
}
