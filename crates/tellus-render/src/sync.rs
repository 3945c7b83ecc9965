//! Uniform synchronization: one buffer, one write, two consumers.
//!
//! Both shell pipelines bind the same [`wgpu::Buffer`] at
//! `@group(1) @binding(0)`, so a single [`LightingSync::publish`] updates
//! the surface and atmosphere programs atomically. No frame can observe one
//! shell with a stale sun direction while the other reads the new one.

use tellus_lighting::{AtmosphereColors, SunLight};
use tellus_shading::{LightingUniform, ShadingParams};

/// Owns the shared lighting uniform buffer and mirrors the last publish.
pub struct LightingSync {
    buffer: wgpu::Buffer,
    last_published: LightingUniform,
}

impl LightingSync {
    /// Create the shared buffer. Call [`publish`](Self::publish) before the
    /// first frame; until then the buffer holds defaults.
    pub fn new(
        device: &wgpu::Device,
        sun: &SunLight,
        colors: &AtmosphereColors,
        params: &ShadingParams,
    ) -> Self {
        use wgpu::util::DeviceExt;

        let initial = LightingUniform::pack(sun, colors, params);
        let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("shared-lighting-uniform"),
            contents: bytemuck::cast_slice(&[initial]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        Self {
            buffer,
            last_published: initial,
        }
    }

    /// Push the current light, colors, and constants to both pipelines in
    /// one write. Safe to call from parameter-edit paths between frames as
    /// well as during initialization.
    pub fn publish(
        &mut self,
        queue: &wgpu::Queue,
        sun: &SunLight,
        colors: &AtmosphereColors,
        params: &ShadingParams,
    ) {
        let uniform = LightingUniform::pack(sun, colors, params);
        queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(&[uniform]));
        self.last_published = uniform;
    }

    /// The shared buffer both bind groups reference.
    pub fn buffer(&self) -> &wgpu::Buffer {
        &self.buffer
    }

    /// CPU mirror of the most recent publish; what both shader programs are
    /// reading this frame.
    pub fn last_published(&self) -> &LightingUniform {
        &self.last_published
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::create_test_device_queue;
    use std::f32::consts::FRAC_PI_2;

    #[test]
    fn test_publish_updates_the_cpu_mirror() {
        let Some((device, queue)) = create_test_device_queue() else {
            return;
        };
        let mut sun = SunLight::default();
        let colors = AtmosphereColors::default();
        let params = ShadingParams::default();
        let mut sync = LightingSync::new(&device, &sun, &colors, &params);

        sun.set_angles(FRAC_PI_2, 0.0);
        sync.publish(&queue, &sun, &colors, &params);

        let d = sync.last_published().sun_direction();
        assert!((d.x - 1.0).abs() < 1e-6, "published direction must match the sun");
    }

    #[test]
    fn test_both_consumers_read_the_same_buffer() {
        // The synchronizer owns exactly one buffer; consistency between the
        // two pipelines follows from both bind groups referencing it. This
        // pins the size so the WGSL struct and the Rust struct stay in step.
        let Some((device, _queue)) = create_test_device_queue() else {
            return;
        };
        let sync = LightingSync::new(
            &device,
            &SunLight::default(),
            &AtmosphereColors::default(),
            &ShadingParams::default(),
        );
        assert_eq!(sync.buffer().size(), 80);
    }
}
