//! The two shell pipelines and their WGSL programs.
//!
//! Both pipelines share the camera and lighting bind group layouts (groups 0
//! and 1) so one camera bind group and one lighting bind group serve both
//! draws. Group 2 is per-shell: the surface adds its three textures and
//! sampler, the atmosphere has only its model uniform.
//!
//! The fragment programs are the GPU twins of the CPU reference models in
//! `tellus-shading`; band edges and exponents come in through the shared
//! lighting uniform so the two programs use byte-identical constants.

use bytemuck::{Pod, Zeroable};
use std::num::NonZeroU64;

use crate::buffer::ShellVertex;
use crate::depth::DepthBuffer;

/// WGSL for the opaque surface shell.
pub const SURFACE_SHADER_SOURCE: &str = r#"
struct CameraUniform {
    view_proj: mat4x4<f32>,
    camera_pos: vec4<f32>,
};

struct LightingUniform {
    sun_direction: vec4<f32>,
    day_color: vec4<f32>,
    twilight_color: vec4<f32>,
    bands: vec4<f32>,
    exponents: vec4<f32>,
};

struct ShellUniform {
    model: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> camera: CameraUniform;

@group(1) @binding(0)
var<uniform> lighting: LightingUniform;

@group(2) @binding(0)
var<uniform> shell: ShellUniform;
@group(2) @binding(1)
var day_texture: texture_2d<f32>;
@group(2) @binding(2)
var night_texture: texture_2d<f32>;
@group(2) @binding(3)
var mask_texture: texture_2d<f32>;
@group(2) @binding(4)
var shell_sampler: sampler;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

@vertex
fn vs_shell(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    let world = shell.model * vec4<f32>(in.position, 1.0);
    out.clip_position = camera.view_proj * world;
    out.world_position = world.xyz;
    out.world_normal = normalize((shell.model * vec4<f32>(in.normal, 0.0)).xyz);
    out.uv = in.uv;
    return out;
}

@fragment
fn fs_surface(in: VertexOutput) -> @location(0) vec4<f32> {
    let n = normalize(in.world_normal);
    let v = normalize(camera.camera_pos.xyz - in.world_position);
    let l = lighting.sun_direction.xyz;
    let sun_facing = dot(n, l);

    // Day/night blend across the terminator.
    let day = smoothstep(lighting.bands.x, lighting.bands.y, sun_facing);

    let day_rgb = textureSample(day_texture, shell_sampler, in.uv).rgb;
    let night_rgb = textureSample(night_texture, shell_sampler, in.uv).rgb;
    let mask = textureSample(mask_texture, shell_sampler, in.uv).rg;

    var color = mix(night_rgb, day_rgb, day);

    // Clouds only where lit.
    color = mix(color, vec3<f32>(1.0), mask.g * day);

    // Specular off the mask's R channel, gated by day.
    let reflection = reflect(-l, n);
    let highlight = pow(max(dot(reflection, v), 0.0), lighting.exponents.z);
    color += vec3<f32>(highlight * mask.r * day);

    // Fresnel rim tint toward the shared day/twilight mix.
    let rim_fresnel = pow(1.0 - max(dot(n, v), 0.0), lighting.exponents.x);
    let twilight = smoothstep(lighting.bands.z, lighting.bands.w, sun_facing);
    let rim = mix(lighting.twilight_color.rgb, lighting.day_color.rgb, twilight);
    color = mix(color, rim, clamp(rim_fresnel * twilight, 0.0, 1.0));

    return vec4<f32>(color, 1.0);
}
"#;

/// WGSL for the translucent atmosphere shell.
pub const ATMOSPHERE_SHADER_SOURCE: &str = r#"
struct CameraUniform {
    view_proj: mat4x4<f32>,
    camera_pos: vec4<f32>,
};

struct LightingUniform {
    sun_direction: vec4<f32>,
    day_color: vec4<f32>,
    twilight_color: vec4<f32>,
    bands: vec4<f32>,
    exponents: vec4<f32>,
};

struct ShellUniform {
    model: mat4x4<f32>,
};

@group(0) @binding(0)
var<uniform> camera: CameraUniform;

@group(1) @binding(0)
var<uniform> lighting: LightingUniform;

@group(2) @binding(0)
var<uniform> shell: ShellUniform;

struct VertexInput {
    @location(0) position: vec3<f32>,
    @location(1) normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

struct VertexOutput {
    @builtin(position) clip_position: vec4<f32>,
    @location(0) world_position: vec3<f32>,
    @location(1) world_normal: vec3<f32>,
    @location(2) uv: vec2<f32>,
};

@vertex
fn vs_shell(in: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    let world = shell.model * vec4<f32>(in.position, 1.0);
    out.clip_position = camera.view_proj * world;
    out.world_position = world.xyz;
    out.world_normal = normalize((shell.model * vec4<f32>(in.normal, 0.0)).xyz);
    out.uv = in.uv;
    return out;
}

@fragment
fn fs_atmosphere(in: VertexOutput) -> @location(0) vec4<f32> {
    let n = normalize(in.world_normal);
    let v = normalize(camera.camera_pos.xyz - in.world_position);
    let sun_facing = dot(n, lighting.sun_direction.xyz);

    // Same twilight mapping as the surface rim, from the same uniform lanes.
    let twilight = smoothstep(lighting.bands.z, lighting.bands.w, sun_facing);
    let rim = mix(lighting.twilight_color.rgb, lighting.day_color.rgb, twilight);

    // Opacity peaks at grazing angles; back-face rendering means the viewer
    // sees the far half of the shell behind the planet silhouette.
    let alpha = pow(1.0 - max(dot(n, v), 0.0), lighting.exponents.y);
    return vec4<f32>(rim, alpha);
}
"#;

/// Per-shell uniform at `@group(2) @binding(0)`: the model matrix carrying
/// rotation (surface) or the atmosphere's uniform scale.
#[repr(C)]
#[derive(Clone, Copy, Debug, Pod, Zeroable)]
pub struct ShellUniform {
    /// Model matrix, column-major.
    pub model: [[f32; 4]; 4],
}

impl ShellUniform {
    /// Pack a model matrix.
    pub fn new(model: glam::Mat4) -> Self {
        Self {
            model: model.to_cols_array_2d(),
        }
    }
}

/// Bind group layouts shared by both pipelines: camera (group 0) and the
/// single lighting buffer (group 1).
pub struct SharedLayouts {
    pub camera: wgpu::BindGroupLayout,
    pub lighting: wgpu::BindGroupLayout,
}

impl SharedLayouts {
    /// Create the shared layouts.
    pub fn new(device: &wgpu::Device) -> Self {
        let camera = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("shell-camera-bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(
                        std::mem::size_of::<crate::camera::CameraUniform>() as u64,
                    ),
                },
                count: None,
            }],
        });

        let lighting = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("shell-lighting-bgl"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: NonZeroU64::new(
                        std::mem::size_of::<tellus_shading::LightingUniform>() as u64,
                    ),
                },
                count: None,
            }],
        });

        Self { camera, lighting }
    }
}

fn shell_uniform_entry() -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding: 0,
        visibility: wgpu::ShaderStages::VERTEX,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: NonZeroU64::new(std::mem::size_of::<ShellUniform>() as u64),
        },
        count: None,
    }
}

fn texture_entry(binding: u32) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility: wgpu::ShaderStages::FRAGMENT,
        ty: wgpu::BindingType::Texture {
            sample_type: wgpu::TextureSampleType::Float { filterable: true },
            view_dimension: wgpu::TextureViewDimension::D2,
            multisampled: false,
        },
        count: None,
    }
}

/// Opaque planet surface: front faces, depth written, no blending.
pub struct SurfacePipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub shell_bind_group_layout: wgpu::BindGroupLayout,
}

impl SurfacePipeline {
    /// Create the surface pipeline against the shared layouts.
    pub fn new(
        device: &wgpu::Device,
        shared: &SharedLayouts,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("surface-shader"),
            source: wgpu::ShaderSource::Wgsl(SURFACE_SHADER_SOURCE.into()),
        });

        let shell_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("surface-shell-bgl"),
                entries: &[
                    shell_uniform_entry(),
                    texture_entry(1),
                    texture_entry(2),
                    texture_entry(3),
                    wgpu::BindGroupLayoutEntry {
                        binding: 4,
                        visibility: wgpu::ShaderStages::FRAGMENT,
                        ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                        count: None,
                    },
                ],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("surface-pipeline-layout"),
            bind_group_layouts: &[&shared.camera, &shared.lighting, &shell_bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("surface-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_shell"),
                buffers: &[ShellVertex::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DepthBuffer::FORMAT,
                depth_write_enabled: true,
                depth_compare: DepthBuffer::COMPARE_FUNCTION,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_surface"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: None, // opaque
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        Self {
            pipeline,
            shell_bind_group_layout,
        }
    }
}

/// Translucent atmosphere shroud: back faces only, depth tested but not
/// written, standard alpha blending.
pub struct AtmospherePipeline {
    pub pipeline: wgpu::RenderPipeline,
    pub shell_bind_group_layout: wgpu::BindGroupLayout,
}

impl AtmospherePipeline {
    /// Create the atmosphere pipeline against the shared layouts.
    pub fn new(
        device: &wgpu::Device,
        shared: &SharedLayouts,
        surface_format: wgpu::TextureFormat,
    ) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("atmosphere-shader"),
            source: wgpu::ShaderSource::Wgsl(ATMOSPHERE_SHADER_SOURCE.into()),
        });

        let shell_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("atmosphere-shell-bgl"),
                entries: &[shell_uniform_entry()],
            });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("atmosphere-pipeline-layout"),
            bind_group_layouts: &[&shared.camera, &shared.lighting, &shell_bind_group_layout],
            immediate_size: 0,
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("atmosphere-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_shell"),
                buffers: &[ShellVertex::layout()],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                // Cull front faces: only the far half of the shell draws, so
                // the glow reads behind the planet silhouette and at the rim.
                cull_mode: Some(wgpu::Face::Front),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DepthBuffer::FORMAT,
                depth_write_enabled: false,
                depth_compare: DepthBuffer::COMPARE_FUNCTION,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_atmosphere"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            multiview_mask: None,
            cache: None,
        });

        Self {
            pipeline,
            shell_bind_group_layout,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::create_test_device;

    #[test]
    fn test_shell_uniform_is_one_mat4() {
        assert_eq!(std::mem::size_of::<ShellUniform>(), 64);
    }

    #[test]
    fn test_shader_sources_have_expected_entry_points() {
        assert!(SURFACE_SHADER_SOURCE.contains("fn vs_shell"));
        assert!(SURFACE_SHADER_SOURCE.contains("fn fs_surface"));
        assert!(ATMOSPHERE_SHADER_SOURCE.contains("fn vs_shell"));
        assert!(ATMOSPHERE_SHADER_SOURCE.contains("fn fs_atmosphere"));
    }

    #[test]
    fn test_shader_programs_share_the_lighting_struct() {
        // Textual guard: the two programs must declare identical lighting
        // uniforms or the shared buffer would be reinterpreted.
        let extract = |src: &str| {
            let start = src.find("struct LightingUniform").expect("struct present");
            let end = src[start..].find("};").expect("struct terminated") + start;
            src[start..end].to_string()
        };
        assert_eq!(
            extract(SURFACE_SHADER_SOURCE),
            extract(ATMOSPHERE_SHADER_SOURCE)
        );
    }

    #[test]
    fn test_pipelines_build_on_a_headless_device() {
        let Some(device) = create_test_device() else {
            return;
        };
        let shared = SharedLayouts::new(&device);
        let format = wgpu::TextureFormat::Bgra8UnormSrgb;
        let _surface = SurfacePipeline::new(&device, &shared, format);
        let _atmosphere = AtmospherePipeline::new(&device, &shared, format);
        // Creation panics on invalid WGSL or layout mismatch; reaching this
        // line is the assertion.
    }
}
