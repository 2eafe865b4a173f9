//! # Renderer
//!
//! The `renderer` module turns a computed [`FramePlan`] and the egui paint jobs into one
//! presented frame.
//!
//! ## Overview
//!
//! [`Renderer`] owns the [`Gpu`], the depth buffer, the egui renderer, and the [`CuboidPass`].
//! It knows nothing about the classroom itself: the scene, the camera, and the panel are all
//! resolved into the plan before it gets here.
//!
//! Each frame is a single render pass: clear to the sky color and depth 1.0, draw the
//! cuboids, then draw the panel on top. The panel shares the depth attachment but does not
//! test against it, so it always stays in front.
//!
//! ## Features
//!
//! - **Single pass**: cuboids and egui are recorded into the same render pass.
//! - **Resizing**: [`Renderer::resize`] rebuilds the depth texture alongside the surface.
//! - **Texture updates**: egui font and image uploads are applied separately from drawing.
//!
//! egui texture uploads are applied through [`Renderer::update_textures`] before anything
//! that can skip a frame, so a skipped frame never loses the font atlas.
//!
//! A lost or outdated surface is reconfigured and the frame is skipped; the next event draws
//! again. Other surface errors are returned to the caller.

// The clear color is authored as an 8-bit palette entry and normalized here.
use crate::cuboid::Color;
use crate::cuboid_pass::CuboidPass;
// Startup failures and per-frame surface failures are reported separately.
use crate::error::{InitError, RenderError};
use crate::frame::FramePlan;
use crate::gpu::Gpu;
use crate::palette::Rgb8;

/// Everything needed to present a frame.
///
/// # Fields
///
/// - `gpu`: surface, device and queue.
/// - `depth_texture_view`: `Depth32Float` attachment, rebuilt on resize.
/// - `egui_renderer`: draws the panel and owns its textures.
/// - `cuboids`: pipeline and buffers for the classroom.
/// - `clear_color`: the sky color, already normalized.
pub struct Renderer {
    gpu: Gpu,
    depth_texture_view: wgpu::TextureView,
    egui_renderer: egui_wgpu::Renderer,
    cuboids: CuboidPass,
    clear_color: wgpu::Color,
}

impl Renderer {
    pub const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

    /// Initializes the GPU and every pass for a window of the given size.
    ///
    /// # Parameters
    ///
    /// - `window`: surface target, usually an `Arc<winit::window::Window>`.
    /// - `width`, `height`: initial size in physical pixels.
    /// - `clear_color`: background color behind the room.
    ///
    /// # Errors
    ///
    /// Returns [`InitError`] when any part of GPU setup fails.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        clear_color: Rgb8,
    ) -> Result<Self, InitError> {
        let gpu = Gpu::new_async(window, width, height).await?;
        let depth_texture_view = gpu.create_depth_texture(width, height);

        let egui_renderer = egui_wgpu::Renderer::new(
            &gpu.device,
            gpu.surface_config.format,
            Some(Self::DEPTH_FORMAT),
            1,
            false,
        );

        let cuboids = CuboidPass::new(&gpu.device, gpu.surface_format);

        let [r, g, b, a] = Color::from(clear_color).to_array();
        log::info!("Renderer ready at {width}x{height}, surface {:?}", gpu.surface_format);

        Ok(Self {
            gpu,
            depth_texture_view,
            egui_renderer,
            cuboids,
            clear_color: wgpu::Color {
                r: r.into(),
                g: g.into(),
                b: b.into(),
                a: a.into(),
            },
        })
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.gpu.aspect_ratio()
    }

    /// Resizes the surface and depth texture. Zero-sized windows are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.gpu.resize(width, height) {
            self.depth_texture_view = self.gpu.create_depth_texture(width, height);
        }
    }

    /// Uploads and frees egui textures.
    ///
    /// egui sends every texture once, so this must run for every egui pass, including passes
    /// whose frame is later skipped.
    pub fn update_textures(&mut self, textures_delta: &egui::TexturesDelta) {
        let gpu = &self.gpu;
        apply_textures_delta(
            textures_delta,
            &mut self.egui_renderer,
            |renderer, id, image_delta| {
                renderer.update_texture(&gpu.device, &gpu.queue, id, image_delta)
            },
            |renderer, id| renderer.free_texture(&id),
        );
    }

    /// Uploads `plan`, records the cuboid and egui draws, and presents.
    ///
    /// # Errors
    ///
    /// A lost or outdated surface is reconfigured and the frame is skipped with `Ok(())`.
    /// Any other surface error is returned.
    pub fn render_frame(
        &mut self,
        plan: &FramePlan,
        screen_descriptor: egui_wgpu::ScreenDescriptor,
        paint_jobs: Vec<egui::epaint::ClippedPrimitive>,
    ) -> Result<(), RenderError> {
        let surface_texture = match self.gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring and skipping the frame");
                self.gpu.reconfigure();
                return Ok(());
            }
            Err(error) => return Err(error.into()),
        };

        self.cuboids
            .prepare(&self.gpu.device, &self.gpu.queue, plan);

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        self.egui_renderer.update_buffers(
            &self.gpu.device,
            &self.gpu.queue,
            &mut encoder,
            &paint_jobs,
            &screen_descriptor,
        );

        let surface_texture_view =
            surface_texture
                .texture
                .create_view(&wgpu::TextureViewDescriptor {
                    label: wgpu::Label::default(),
                    aspect: wgpu::TextureAspect::default(),
                    format: Some(self.gpu.surface_format),
                    dimension: None,
                    base_mip_level: 0,
                    mip_level_count: None,
                    base_array_layer: 0,
                    array_layer_count: None,
                    usage: None,
                });

        encoder.insert_debug_marker("Render classroom");

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Classroom Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture_view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            self.cuboids.render(&mut render_pass);

            self.egui_renderer.render(
                &mut render_pass.forget_lifetime(),
                &paint_jobs,
                &screen_descriptor,
            );
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }
}

/// Feeds a [`egui::TexturesDelta`] to a texture owner: every upload first, then every free.
pub fn apply_textures_delta<T>(
    textures_delta: &egui::TexturesDelta,
    owner: &mut T,
    update: impl Fn(&mut T, egui::TextureId, &egui::epaint::ImageDelta),
    free: impl Fn(&mut T, egui::TextureId),
) {
    for (id, image_delta) in &textures_delta.set {
        update(owner, *id, image_delta);
    }
    for id in &textures_delta.free {
        free(owner, *id);
    }
}
