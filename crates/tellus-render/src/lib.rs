//! wgpu dual-shell planet renderer: GPU context, render pass helpers, the
//! two shell pipelines, texture slots, uniform synchronization, and the
//! top-level scene assembly.

pub mod buffer;
pub mod camera;
pub mod depth;
pub mod error;
pub mod gpu;
pub mod pass;
pub mod planet;
pub mod shells;
pub mod sync;
pub mod textures;

#[cfg(test)]
pub(crate) mod testing;

pub use buffer::{BufferAllocator, IndexData, MeshBuffer, ShellVertex};
pub use camera::{CameraUniform, perspective_reversed_z};
pub use depth::DepthBuffer;
pub use error::ConfigError;
pub use gpu::{RenderContext, RenderContextError, SurfaceError, init_render_context_blocking};
pub use pass::{FrameEncoder, RenderPassBuilder, SPACE_BLACK};
pub use planet::{PlanetConfig, PlanetRenderer, PlanetScene};
pub use shells::{
    ATMOSPHERE_SHADER_SOURCE, AtmospherePipeline, SURFACE_SHADER_SOURCE, ShellUniform,
    SharedLayouts, SurfacePipeline,
};
pub use sync::LightingSync;
pub use textures::{SurfaceTextureSlots, SurfaceTextures, TextureData};
