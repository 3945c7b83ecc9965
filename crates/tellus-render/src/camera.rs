//! Camera uniform and reverse-Z projection helper.
//!
//! The camera itself (orbit input, damping) lives with the frame driver;
//! the core only consumes a view-projection matrix and eye position.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3};

/// Camera data both shell shaders read at `@group(0) @binding(0)`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct CameraUniform {
    /// Combined view-projection matrix, column-major.
    pub view_proj: [[f32; 4]; 4],
    /// xyz = eye position in world space, w = padding.
    pub camera_pos: [f32; 4],
}

impl CameraUniform {
    /// Pack a view-projection matrix and eye position.
    pub fn new(view_proj: Mat4, eye: Vec3) -> Self {
        Self {
            view_proj: view_proj.to_cols_array_2d(),
            camera_pos: [eye.x, eye.y, eye.z, 0.0],
        }
    }
}

impl Default for CameraUniform {
    fn default() -> Self {
        Self::new(Mat4::IDENTITY, Vec3::ZERO)
    }
}

/// Perspective projection with reverse-Z: near maps to depth 1, far to 0.
///
/// Implemented by swapping the near/far parameters of the standard
/// right-handed projection; pairs with
/// [`DepthBuffer`](crate::DepthBuffer)'s `GreaterEqual` comparison.
pub fn perspective_reversed_z(fov_y: f32, aspect_ratio: f32, near: f32, far: f32) -> Mat4 {
    Mat4::perspective_rh(fov_y, aspect_ratio, far, near)
}
