//! Shared helpers for GPU-backed unit tests.
//!
//! Tests that need a device run headless and skip when the machine has no
//! compatible adapter (CI without a GPU).

/// Request a headless device, or `None` when no adapter is available.
pub fn create_test_device() -> Option<wgpu::Device> {
    create_test_device_queue().map(|(device, _)| device)
}

/// Request a headless device and queue, or `None` when no adapter is
/// available.
pub fn create_test_device_queue() -> Option<(wgpu::Device, wgpu::Queue)> {
    pollster::block_on(async {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: None,
                force_fallback_adapter: false,
            })
            .await
            .ok()?;

        adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("tellus-test-device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                experimental_features: wgpu::ExperimentalFeatures::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .ok()
    })
}
