//! Top-level scene assembly: one mesh, two shells, one light.
//!
//! [`PlanetScene`] owns the light state, atmosphere palette, and shading
//! constants on the CPU side and the dual-shell renderer on the GPU side.
//! Every mutation path goes through the shared lighting buffer, so the two
//! shell programs always read the same frame of light data.

use glam::{Mat4, Vec3};
use tellus_lighting::{AtmosphereColors, SunLight};
use tellus_mesh::generate_shell_sphere;
use tellus_shading::{LightingUniform, ShadingParams};

use crate::buffer::{BufferAllocator, MeshBuffer};
use crate::camera::CameraUniform;
use crate::error::ConfigError;
use crate::shells::{AtmospherePipeline, SharedLayouts, ShellUniform, SurfacePipeline};
use crate::sync::LightingSync;
use crate::textures::{SurfaceTextureSlots, SurfaceTextures};

/// Geometry and motion parameters for the planet.
#[derive(Clone, Copy, Debug)]
pub struct PlanetConfig {
    /// Icosphere subdivision level for the shared shell mesh.
    pub subdivisions: u32,
    /// Atmosphere shell radius relative to the surface.
    pub atmosphere_scale: f32,
    /// Surface spin in radians per second about +Y.
    pub rotation_rate: f32,
}

impl Default for PlanetConfig {
    fn default() -> Self {
        Self {
            subdivisions: 5,
            atmosphere_scale: 1.04,
            rotation_rate: 0.1,
        }
    }
}

/// GPU resources for both shells plus the camera bind group.
pub struct PlanetRenderer {
    mesh: MeshBuffer,
    surface_pipeline: SurfacePipeline,
    atmosphere_pipeline: AtmospherePipeline,
    camera_buffer: wgpu::Buffer,
    camera_bind_group: wgpu::BindGroup,
    lighting_bind_group: wgpu::BindGroup,
    surface_uniform_buffer: wgpu::Buffer,
    surface_bind_group: wgpu::BindGroup,
    atmosphere_uniform_buffer: wgpu::Buffer,
    atmosphere_bind_group: wgpu::BindGroup,
}

impl PlanetRenderer {
    /// Build pipelines, upload the shared mesh, and wire all bind groups.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        config: &PlanetConfig,
        slots: &SurfaceTextureSlots,
        lighting: &LightingSync,
    ) -> Result<Self, ConfigError> {
        use wgpu::util::DeviceExt;

        let textures = SurfaceTextures::new(device, queue, slots)?;

        let shared = SharedLayouts::new(device);
        let surface_pipeline = SurfacePipeline::new(device, &shared, surface_format);
        let atmosphere_pipeline = AtmospherePipeline::new(device, &shared, surface_format);

        let mesh = BufferAllocator::new(device)
            .create_shell_mesh("planet-shell", &generate_shell_sphere(config.subdivisions));

        let camera_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("planet-camera"),
            contents: bytemuck::cast_slice(&[CameraUniform::default()]),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let camera_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("planet-camera-bg"),
            layout: &shared.camera,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        let lighting_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("planet-lighting-bg"),
            layout: &shared.lighting,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: lighting.buffer().as_entire_binding(),
            }],
        });

        let surface_uniform_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("surface-shell-uniform"),
                contents: bytemuck::cast_slice(&[ShellUniform::new(Mat4::IDENTITY)]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let surface_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("surface-shell-bg"),
            layout: &surface_pipeline.shell_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: surface_uniform_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&textures.day_view),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: wgpu::BindingResource::TextureView(&textures.night_view),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::TextureView(&textures.mask_view),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: wgpu::BindingResource::Sampler(&textures.sampler),
                },
            ],
        });

        let atmosphere_uniform_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("atmosphere-shell-uniform"),
                contents: bytemuck::cast_slice(&[ShellUniform::new(Mat4::from_scale(
                    Vec3::splat(config.atmosphere_scale),
                ))]),
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            });
        let atmosphere_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("atmosphere-shell-bg"),
            layout: &atmosphere_pipeline.shell_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: atmosphere_uniform_buffer.as_entire_binding(),
            }],
        });

        Ok(Self {
            mesh,
            surface_pipeline,
            atmosphere_pipeline,
            camera_buffer,
            camera_bind_group,
            lighting_bind_group,
            surface_uniform_buffer,
            surface_bind_group,
            atmosphere_uniform_buffer,
            atmosphere_bind_group,
        })
    }

    /// Update the camera uniform.
    pub fn write_camera(&self, queue: &wgpu::Queue, camera: CameraUniform) {
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::cast_slice(&[camera]));
    }

    /// Update the surface shell's model matrix.
    pub fn write_surface_model(&self, queue: &wgpu::Queue, model: Mat4) {
        queue.write_buffer(
            &self.surface_uniform_buffer,
            0,
            bytemuck::cast_slice(&[ShellUniform::new(model)]),
        );
    }

    /// Update the atmosphere shell's model matrix.
    pub fn write_atmosphere_model(&self, queue: &wgpu::Queue, model: Mat4) {
        queue.write_buffer(
            &self.atmosphere_uniform_buffer,
            0,
            bytemuck::cast_slice(&[ShellUniform::new(model)]),
        );
    }

    /// Record both draws: the opaque surface first, the blended atmosphere
    /// second, sharing one mesh and one depth buffer.
    pub fn draw<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        self.mesh.bind(render_pass);

        render_pass.set_pipeline(&self.surface_pipeline.pipeline);
        render_pass.set_bind_group(0, &self.camera_bind_group, &[]);
        render_pass.set_bind_group(1, &self.lighting_bind_group, &[]);
        render_pass.set_bind_group(2, &self.surface_bind_group, &[]);
        self.mesh.draw(render_pass);

        render_pass.set_pipeline(&self.atmosphere_pipeline.pipeline);
        render_pass.set_bind_group(2, &self.atmosphere_bind_group, &[]);
        self.mesh.draw(render_pass);
    }
}

/// The complete planet scene: light, palette, constants, and renderer.
pub struct PlanetScene {
    sun: SunLight,
    colors: AtmosphereColors,
    params: ShadingParams,
    lighting: LightingSync,
    renderer: PlanetRenderer,
    config: PlanetConfig,
}

impl PlanetScene {
    /// Assemble the scene and publish the initial lighting state so the
    /// first frame already renders with valid data.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        surface_format: wgpu::TextureFormat,
        config: PlanetConfig,
        slots: &SurfaceTextureSlots,
    ) -> Result<Self, ConfigError> {
        let sun = SunLight::default();
        let colors = AtmosphereColors::default();
        let params = ShadingParams::default();
        let lighting = LightingSync::new(device, &sun, &colors, &params);
        let renderer =
            PlanetRenderer::new(device, queue, surface_format, &config, slots, &lighting)?;

        Ok(Self {
            sun,
            colors,
            params,
            lighting,
            renderer,
            config,
        })
    }

    /// Spin the surface for the elapsed scene time. The atmosphere does not
    /// rotate; its shading depends only on geometry and the light.
    pub fn advance(&mut self, queue: &wgpu::Queue, elapsed_seconds: f32) {
        let spin = Mat4::from_rotation_y(elapsed_seconds * self.config.rotation_rate);
        self.renderer.write_surface_model(queue, spin);
    }

    /// Move the sun. Angles clamp to the light's configured ranges and the
    /// new direction reaches both shells in this call.
    pub fn on_light_angle_changed(&mut self, queue: &wgpu::Queue, polar: f32, azimuthal: f32) {
        self.sun.set_angles(polar, azimuthal);
        self.lighting
            .publish(queue, &self.sun, &self.colors, &self.params);
    }

    /// Retint the day side of the atmosphere palette.
    pub fn on_day_color_changed(&mut self, queue: &wgpu::Queue, color: Vec3) {
        self.colors.set_day(color);
        self.lighting
            .publish(queue, &self.sun, &self.colors, &self.params);
    }

    /// Retint the twilight band of the atmosphere palette.
    pub fn on_twilight_color_changed(&mut self, queue: &wgpu::Queue, color: Vec3) {
        self.colors.set_twilight(color);
        self.lighting
            .publish(queue, &self.sun, &self.colors, &self.params);
    }

    /// Update the camera uniform for this frame.
    pub fn set_camera(&self, queue: &wgpu::Queue, view_proj: Mat4, eye: Vec3) {
        self.renderer
            .write_camera(queue, CameraUniform::new(view_proj, eye));
    }

    /// Record the scene's draws into an open render pass.
    pub fn draw<'a>(&'a self, render_pass: &mut wgpu::RenderPass<'a>) {
        self.renderer.draw(render_pass);
    }

    /// Current sun state.
    pub fn sun(&self) -> &SunLight {
        &self.sun
    }

    /// Current atmosphere palette.
    pub fn colors(&self) -> &AtmosphereColors {
        &self.colors
    }

    /// The lighting data both shell programs are reading this frame.
    pub fn last_published(&self) -> &LightingUniform {
        self.lighting.last_published()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::depth::DepthBuffer;
    use crate::testing::create_test_device_queue;
    use std::f32::consts::FRAC_PI_2;

    fn test_slots() -> SurfaceTextureSlots {
        let make = |r, g, b| crate::textures::TextureData {
            pixels: vec![r, g, b, 255],
            width: 1,
            height: 1,
        };
        SurfaceTextureSlots {
            day: Some(make(60, 120, 200)),
            night: Some(make(8, 8, 16)),
            specular_clouds: Some(make(128, 64, 0)),
        }
    }

    #[test]
    fn test_scene_requires_all_texture_slots() {
        let Some((device, queue)) = create_test_device_queue() else {
            return;
        };
        let mut slots = test_slots();
        slots.specular_clouds = None;
        let result = PlanetScene::new(
            &device,
            &queue,
            wgpu::TextureFormat::Bgra8UnormSrgb,
            PlanetConfig::default(),
            &slots,
        );
        assert!(matches!(
            result,
            Err(ConfigError::MissingTexture {
                slot: "specular_clouds"
            })
        ));
    }

    #[test]
    fn test_light_edits_publish_immediately() {
        let Some((device, queue)) = create_test_device_queue() else {
            return;
        };
        let mut scene = PlanetScene::new(
            &device,
            &queue,
            wgpu::TextureFormat::Bgra8UnormSrgb,
            PlanetConfig::default(),
            &test_slots(),
        )
        .expect("scene with all slots bound");

        scene.on_light_angle_changed(&queue, FRAC_PI_2, 0.0);
        let d = scene.last_published().sun_direction();
        assert!((d.x - 1.0).abs() < 1e-6, "sun at (pi/2, 0) points along +X");

        scene.on_day_color_changed(&queue, Vec3::new(0.2, 0.9, 0.3));
        assert!(
            (scene.last_published().day_color[1] - 0.9).abs() < 1e-6,
            "day color edit must reach the published uniform"
        );
    }

    #[test]
    fn test_headless_frame_renders_both_shells() {
        let Some((device, queue)) = create_test_device_queue() else {
            return;
        };
        let format = wgpu::TextureFormat::Bgra8UnormSrgb;
        let mut scene = PlanetScene::new(
            &device,
            &queue,
            format,
            PlanetConfig {
                subdivisions: 2,
                ..PlanetConfig::default()
            },
            &test_slots(),
        )
        .expect("scene with all slots bound");

        let (width, height) = (64, 64);
        let color = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("test-color"),
            size: wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        let color_view = color.create_view(&wgpu::TextureViewDescriptor::default());
        let depth = DepthBuffer::new(&device, width, height);

        let eye = Vec3::new(12.0, 5.0, 4.0);
        let view = Mat4::look_at_rh(eye, Vec3::ZERO, Vec3::Y);
        let proj = crate::camera::perspective_reversed_z(
            25_f32.to_radians(),
            width as f32 / height as f32,
            0.1,
            100.0,
        );
        scene.set_camera(&queue, proj * view, eye);
        scene.advance(&queue, 1.5);

        let mut encoder = device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("test-frame"),
        });
        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("test-pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &color_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(crate::pass::SPACE_BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                    depth_slice: None,
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &depth.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(DepthBuffer::CLEAR_VALUE),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
                multiview_mask: None,
            });
            scene.draw(&mut pass);
        }
        queue.submit([encoder.finish()]);
        device.poll(wgpu::PollType::wait_indefinitely()).ok();
    }
}
