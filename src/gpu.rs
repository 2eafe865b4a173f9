//! # GPU Management
//!
//! The `gpu` module sets up the `wgpu` objects every other rendering module borrows: the
//! instance, the window surface, the adapter, and the logical device with its queue.
//!
//! ## Overview
//!
//! The [`Gpu`] struct owns the surface, device, and queue, and keeps the surface configuration
//! in step with the window size. It does not own any pipeline or buffer; those live in
//! [`crate::cuboid_pass`] and in the egui renderer, and are created against [`Gpu::device`].
//!
//! The surface is configured with the first non-sRGB format the adapter offers, because the
//! egui renderer writes already gamma-encoded colors. The cuboid shader follows the same
//! convention, so palette colors reach the screen unchanged.
//!
//! On desktop the full default limits are requested. A WebGL2 build asks for the downlevel
//! limits instead, which still allow the 256-byte dynamic uniform offsets the cuboid pass uses.
//!
//! ## Features
//!
//! - **Fallible initialization**: [`Gpu::new_async`] reports a missing adapter, device, or
//!   surface format as an [`InitError`] instead of panicking.
//! - **Resizing**: [`Gpu::resize`] reconfigures the surface; zero-sized windows are ignored.
//! - **Depth texture creation** for the cuboid pass.
//!
//! ## Example Usage
//!
//! ```ignore
//! let gpu = Gpu::new_async(window.clone(), width, height).await?;
//! let depth = gpu.create_depth_texture(width, height);
//! ```
//!
//! ## Module Contents
//!
//! - [`Gpu`]: surface, device and queue for one window, with resize and depth helpers.

// `wgpu::InstanceDescriptor` picks which backends the instance may use. The default enables
// every backend compiled in, which on wasm means WebGPU or WebGL depending on the feature.
use wgpu::InstanceDescriptor;

// Initialization failures are returned to the application, which logs them and exits.
use crate::error::InitError;

/// Core GPU state for one window.
///
/// # Fields
///
/// - `surface`: the window's presentable surface.
/// - `device`, `queue`: the logical device and its submission queue.
/// - `surface_config`: current size, format and present mode of the surface.
/// - `surface_format`: the non-sRGB format picked for the surface (egui expects one).
pub struct Gpu {
    pub surface: wgpu::Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface_config: wgpu::SurfaceConfiguration,
    pub surface_format: wgpu::TextureFormat,
}

impl Gpu {
    /// Width over height of the configured surface. A zero height counts as one.
    pub fn aspect_ratio(&self) -> f32 {
        self.surface_config.width as f32 / self.surface_config.height.max(1) as f32
    }

    /// Reconfigures the surface for a new size.
    ///
    /// # Returns
    ///
    /// `false` for a zero-sized window, which cannot be configured and is skipped. The caller
    /// keeps its old depth texture in that case.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            return false;
        }
        self.surface_config.width = width;
        self.surface_config.height = height;
        self.surface.configure(&self.device, &self.surface_config);
        true
    }

    /// Reapplies the current configuration after the surface was lost or went stale.
    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.surface_config);
    }

    /// Creates a `Depth32Float` texture of the given size and returns its view.
    ///
    /// # Parameters
    ///
    /// - `width`, `height`: size in physical pixels. Zero is raised to one.
    pub fn create_depth_texture(&self, width: u32, height: u32) -> wgpu::TextureView {
        let texture = self.device.create_texture(
            &(wgpu::TextureDescriptor {
                label: Some("Depth Texture"),
                size: wgpu::Extent3d {
                    width: width.max(1),
                    height: height.max(1),
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::Depth32Float,
                usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
                view_formats: &[],
            }),
        );
        texture.create_view(&wgpu::TextureViewDescriptor {
            label: Some("Depth Texture View"),
            format: Some(wgpu::TextureFormat::Depth32Float),
            dimension: Some(wgpu::TextureViewDimension::D2),
            aspect: wgpu::TextureAspect::All,
            base_mip_level: 0,
            base_array_layer: 0,
            array_layer_count: None,
            mip_level_count: None,
            usage: None,
        })
    }

    /// Creates the instance, surface, adapter and device, then configures the surface.
    ///
    /// # Parameters
    ///
    /// - `window`: anything `wgpu` can build a surface for. The app passes an
    ///   `Arc<winit::window::Window>` so the surface can be `'static`.
    /// - `width`, `height`: initial surface size in physical pixels.
    ///
    /// # Errors
    ///
    /// Any missing piece is reported as an [`InitError`]: surface creation, adapter selection,
    /// device request, or an adapter with no surface format at all.
    pub async fn new_async(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
    ) -> Result<Self, InitError> {
        let instance = wgpu::Instance::new(&InstanceDescriptor::default());
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(InitError::NoAdapter)?;
        log::info!("Using adapter: {:?}", adapter.get_info());

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Classroom Device"),
                    memory_hints: wgpu::MemoryHints::default(),
                    required_features: wgpu::Features::default(),
                    #[cfg(not(target_arch = "wasm32"))]
                    required_limits: wgpu::Limits::default().using_resolution(adapter.limits()),
                    #[cfg(all(target_arch = "wasm32", feature = "webgpu"))]
                    required_limits: wgpu::Limits::default().using_resolution(adapter.limits()),
                    #[cfg(all(target_arch = "wasm32", feature = "webgl"))]
                    required_limits: wgpu::Limits::downlevel_webgl2_defaults()
                        .using_resolution(adapter.limits()),
                },
                None,
            )
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let surface_format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb()) // egui wants a non-srgb surface texture
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(InitError::NoSurfaceFormat)?;

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: width.max(1),
            height: height.max(1),
            present_mode: surface_capabilities
                .present_modes
                .first()
                .copied()
                .unwrap_or(wgpu::PresentMode::Fifo),
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);

        Ok(Self {
            surface,
            device,
            queue,
            surface_config,
            surface_format,
        })
    }
}
