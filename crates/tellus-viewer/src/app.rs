//! Window and event handling via winit.
//!
//! [`Viewer`] implements winit's [`ApplicationHandler`]: it creates the
//! window and GPU context on resume, then drives one frame per redraw.
//! Input edits the sun angles and atmosphere palette live; every edit is
//! visible in the next presented frame.

use std::sync::Arc;
use std::time::Instant;

use glam::Vec3;
use tellus_render::{
    DepthBuffer, FrameEncoder, PlanetConfig, PlanetScene, RenderContext, RenderPassBuilder,
    SurfaceError, init_render_context_blocking,
};
use tracing::{error, info, warn};
use winit::application::ApplicationHandler;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::ActiveEventLoop;
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowAttributes, WindowId};

use crate::config::ViewerConfig;
use crate::orbit::OrbitCamera;
use crate::textures;

/// Sun angle step per key press, radians.
const SUN_STEP: f32 = 0.05;

/// Day-color presets cycled with the `1` key.
const DAY_PRESETS: [Vec3; 3] = [
    Vec3::new(0.0, 0.667, 1.0),
    Vec3::new(0.4, 0.85, 1.0),
    Vec3::new(0.1, 1.0, 0.6),
];

/// Twilight-color presets cycled with the `2` key.
const TWILIGHT_PRESETS: [Vec3; 3] = [
    Vec3::new(1.0, 0.4, 0.0),
    Vec3::new(1.0, 0.1, 0.3),
    Vec3::new(0.8, 0.3, 1.0),
];

/// Viewer application state.
pub struct Viewer {
    config: ViewerConfig,
    window: Option<Arc<Window>>,
    gpu: Option<RenderContext>,
    depth_buffer: Option<DepthBuffer>,
    scene: Option<PlanetScene>,
    camera: OrbitCamera,
    start_time: Instant,
    last_frame: Instant,
    day_preset: usize,
    twilight_preset: usize,
}

impl Viewer {
    /// Create the viewer; GPU resources are built on `resumed`.
    pub fn new(config: ViewerConfig) -> Self {
        let camera = OrbitCamera::new(
            Vec3::from(config.camera.position),
            config.camera.fov_degrees.to_radians(),
            config.camera.min_distance,
            config.camera.max_distance,
        );
        let now = Instant::now();

        Self {
            config,
            window: None,
            gpu: None,
            depth_buffer: None,
            scene: None,
            camera,
            start_time: now,
            last_frame: now,
            day_preset: 0,
            twilight_preset: 0,
        }
    }

    fn window_attributes(&self) -> WindowAttributes {
        WindowAttributes::default()
            .with_title(self.config.window.title.clone())
            .with_inner_size(winit::dpi::LogicalSize::new(
                self.config.window.width as f64,
                self.config.window.height as f64,
            ))
    }

    fn handle_key(&mut self, key: KeyCode) {
        let (Some(gpu), Some(scene)) = (&self.gpu, &mut self.scene) else {
            return;
        };
        let queue = &gpu.queue;

        match key {
            KeyCode::ArrowUp | KeyCode::ArrowDown => {
                let delta = if key == KeyCode::ArrowUp {
                    -SUN_STEP
                } else {
                    SUN_STEP
                };
                let polar = scene.sun().polar() + delta;
                let azimuthal = scene.sun().azimuthal();
                scene.on_light_angle_changed(queue, polar, azimuthal);
            }
            KeyCode::ArrowLeft | KeyCode::ArrowRight => {
                let delta = if key == KeyCode::ArrowRight {
                    SUN_STEP
                } else {
                    -SUN_STEP
                };
                let polar = scene.sun().polar();
                let azimuthal = scene.sun().azimuthal() + delta;
                scene.on_light_angle_changed(queue, polar, azimuthal);
            }
            KeyCode::Digit1 => {
                self.day_preset = (self.day_preset + 1) % DAY_PRESETS.len();
                scene.on_day_color_changed(queue, DAY_PRESETS[self.day_preset]);
                info!("day color preset {}", self.day_preset);
            }
            KeyCode::Digit2 => {
                self.twilight_preset = (self.twilight_preset + 1) % TWILIGHT_PRESETS.len();
                scene.on_twilight_color_changed(queue, TWILIGHT_PRESETS[self.twilight_preset]);
                info!("twilight color preset {}", self.twilight_preset);
            }
            _ => {}
        }
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.camera.set_aspect_ratio(width, height);
        if let Some(gpu) = &mut self.gpu {
            gpu.resize(width, height);
        }
        if let (Some(depth), Some(gpu)) = (&mut self.depth_buffer, &self.gpu) {
            depth.resize(&gpu.device, width.max(1), height.max(1));
        }
    }

    fn render_frame(&mut self, event_loop: &ActiveEventLoop) {
        let now = Instant::now();
        let dt = now.duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now;

        self.camera.update(dt);

        let (Some(gpu), Some(depth), Some(scene)) =
            (&self.gpu, &self.depth_buffer, &mut self.scene)
        else {
            return;
        };

        scene.advance(&gpu.queue, now.duration_since(self.start_time).as_secs_f32());
        scene.set_camera(&gpu.queue, self.camera.view_projection(), self.camera.eye());

        let surface_texture = match gpu.get_current_texture() {
            Ok(texture) => texture,
            Err(SurfaceError::Lost) => {
                // Reconfigure and try again next frame.
                gpu.surface.configure(&gpu.device, &gpu.surface_config);
                return;
            }
            Err(SurfaceError::OutOfMemory) => {
                error!("GPU out of memory, exiting");
                event_loop.exit();
                return;
            }
            Err(SurfaceError::Timeout) => {
                warn!("surface acquisition timed out, skipping frame");
                return;
            }
        };

        let mut frame =
            FrameEncoder::new(&gpu.device, Arc::new(gpu.queue.clone()), surface_texture);
        {
            let builder = RenderPassBuilder::new()
                .label("planet-pass")
                .depth(depth.view.clone(), DepthBuffer::CLEAR_VALUE);
            let mut pass = frame.begin_render_pass(&builder);
            scene.draw(&mut pass);
        }
        frame.submit();
    }
}

impl ApplicationHandler for Viewer {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(self.window_attributes()) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let size = window.inner_size();
        self.camera.set_aspect_ratio(size.width, size.height);

        let gpu = match init_render_context_blocking(window.clone()) {
            Ok(ctx) => ctx,
            Err(e) => {
                error!("GPU initialization failed: {e}");
                event_loop.exit();
                return;
            }
        };

        let depth_buffer = DepthBuffer::new(&gpu.device, size.width.max(1), size.height.max(1));

        let slots = textures::load_surface_slots(&self.config.textures);
        let planet_config = PlanetConfig {
            subdivisions: self.config.planet.subdivisions,
            atmosphere_scale: self.config.planet.atmosphere_scale,
            rotation_rate: self.config.planet.rotation_rate,
        };
        let scene = match PlanetScene::new(
            &gpu.device,
            &gpu.queue,
            gpu.surface_format,
            planet_config,
            &slots,
        ) {
            Ok(scene) => scene,
            Err(e) => {
                error!("invalid scene configuration: {e}");
                event_loop.exit();
                return;
            }
        };

        info!(
            "viewer ready: {}x{}, subdivisions {}",
            size.width, size.height, self.config.planet.subdivisions
        );

        self.gpu = Some(gpu);
        self.depth_buffer = Some(depth_buffer);
        self.scene = Some(scene);
        self.window = Some(window);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                info!("close requested, shutting down");
                event_loop.exit();
            }
            WindowEvent::Resized(size) => {
                self.resize(size.width, size.height);
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state == ElementState::Pressed
                    && let PhysicalKey::Code(key) = event.physical_key
                {
                    if key == KeyCode::Escape {
                        event_loop.exit();
                        return;
                    }
                    self.handle_key(key);
                }
            }
            WindowEvent::MouseInput { state, button, .. } => {
                if button == MouseButton::Left {
                    self.camera.set_dragging(state == ElementState::Pressed);
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.camera.on_cursor_moved(position.x, position.y);
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 / 40.0,
                };
                self.camera.on_scroll(lines);
            }
            WindowEvent::RedrawRequested => {
                self.render_frame(event_loop);
                if let Some(window) = &self.window {
                    window.request_redraw();
                }
            }
            _ => {}
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(window) = &self.window {
            window.request_redraw();
        }
    }
}
