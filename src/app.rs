//! # Application Core
//!
//! [`App`] is the `winit` application handler. It owns the window, the renderer, the egui
//! state, and the viewer state: navigation, lamp animation, and panel toggles.
//!
//! ## Redraw policy
//!
//! The event loop runs with `ControlFlow::Wait` and nothing is drawn on a timer. A redraw is
//! requested only when:
//!
//! - the renderer becomes available,
//! - the window is resized,
//! - a navigation key changes the view,
//! - egui asks for a repaint or a panel value changes.
//!
//! Startup, resizes, navigation keys and panel edits are scene events: the next redraw advances
//! the lamp animation once. Repaints egui requests on its own, including the follow-up pass after
//! a panel edit, redraw the scene without moving the lamp.
//!
//! egui texture changes are uploaded before the frame is planned, so a dropped frame or a lost
//! surface never loses them.
//!
//! ## Platform notes
//!
//! - **Desktop**: the renderer is created synchronously with `pollster`.
//! - **WebAssembly**: the renderer is created in a `spawn_local` task and delivered through a
//!   `oneshot` channel, which is polled at the start of every window event.

// `JsCast::dyn_into` turns the page's canvas element into an `HtmlCanvasElement`.
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

// The window is shared between the app, the surface and, on wasm, the renderer task.
use std::sync::Arc;

// `ApplicationHandler` is the winit 0.30 callback trait; keys are matched by physical code so
// the navigation layout does not depend on the keyboard language.
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::{ElementState, KeyEvent, WindowEvent},
    keyboard::{KeyCode, PhysicalKey},
    window::{Theme, Window},
};

// Viewer state. None of it touches the GPU; it is resolved into a frame plan per redraw.
use crate::camera::Navigation;
use crate::config::ViewerConfig;
use crate::controls::Controls;
use crate::frame::{self, Redraw};
use crate::renderer::Renderer;
use crate::scene::SceneState;

/// The viewer application.
///
/// # Fields
///
/// - `config`: startup settings; fixed for the life of the app.
/// - `window`, `renderer`, `gui_state`: created in [`ApplicationHandler::resumed`]. Events that
///   arrive before all three exist are ignored.
/// - `renderer_receiver`: wasm only, the pending renderer from the async setup task.
/// - `last_size`: surface size in physical pixels, also used for the egui screen descriptor.
/// - `navigation`, `scene`, `controls`: camera, lamp animation, and panel toggles.
pub struct App {
    config: ViewerConfig,
    window: Option<Arc<Window>>,
    renderer: Option<Renderer>,
    gui_state: Option<egui_winit::State>,
    #[cfg(target_arch = "wasm32")]
    renderer_receiver: Option<futures::channel::oneshot::Receiver<Renderer>>,
    last_size: (u32, u32),
    navigation: Navigation,
    scene: SceneState,
    controls: Controls,
    /// Set by events that change the scene, cleared by the redraw that shows them.
    scene_event_pending: bool,
}

impl Default for App {
    fn default() -> Self {
        Self::new(ViewerConfig::default())
    }
}

impl App {
    /// Creates the app. The window and renderer are made later, once the event loop resumes.
    pub fn new(config: ViewerConfig) -> Self {
        Self {
            config,
            window: None,
            renderer: None,
            gui_state: None,
            #[cfg(target_arch = "wasm32")]
            renderer_receiver: None,
            last_size: (0, 0),
            navigation: Navigation::new(config.navigation),
            scene: SceneState::new(),
            controls: Controls::new(&config),
            scene_event_pending: true,
        }
    }
}

/// Panel heading, naming the browser backend on wasm builds.
fn panel_title() -> &'static str {
    if cfg!(feature = "webgl") {
        "Classroom (WebGL)"
    } else if cfg!(feature = "webgpu") {
        "Classroom (WebGPU)"
    } else {
        "Classroom"
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &winit::event_loop::ActiveEventLoop) {
        let mut attributes = Window::default_attributes();

        #[cfg(not(target_arch = "wasm32"))]
        {
            attributes = attributes.with_title("Classroom");
        }

        #[cfg(target_arch = "wasm32")]
        {
            use winit::platform::web::WindowAttributesExtWebSys;
            let Some(canvas) = wgpu::web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.get_element_by_id("canvas"))
                .and_then(|element| {
                    element
                        .dyn_into::<wgpu::web_sys::HtmlCanvasElement>()
                        .ok()
                })
            else {
                log::error!("No <canvas id=\"canvas\"> element found on the page");
                return;
            };
            self.last_size = (canvas.width(), canvas.height());
            attributes = attributes.with_canvas(Some(canvas));
        }

        let window = match event_loop.create_window(attributes) {
            Ok(window) => window,
            Err(error) => {
                log::error!("Failed to create window: {error}");
                event_loop.exit();
                return;
            }
        };

        let first_window_handle = self.window.is_none();
        let window_handle = Arc::new(window);
        self.window = Some(window_handle.clone());
        if !first_window_handle {
            return;
        }

        let gui_context = egui::Context::default();

        #[cfg(not(target_arch = "wasm32"))]
        {
            let inner_size = window_handle.inner_size();
            self.last_size = (inner_size.width, inner_size.height);
        }

        #[cfg(target_arch = "wasm32")]
        {
            gui_context.set_pixels_per_point(window_handle.scale_factor() as f32);
        }

        let viewport_id = gui_context.viewport_id();
        let gui_state = egui_winit::State::new(
            gui_context,
            viewport_id,
            &window_handle,
            Some(window_handle.scale_factor() as _),
            Some(Theme::Dark),
            None,
        );
        self.gui_state = Some(gui_state);

        let (width, height) = self.last_size;
        let clear_color = self.config.clear_color;

        #[cfg(not(target_arch = "wasm32"))]
        {
            let renderer = pollster::block_on(Renderer::new(
                window_handle.clone(),
                width,
                height,
                clear_color,
            ));
            match renderer {
                Ok(renderer) => {
                    self.renderer = Some(renderer);
                    window_handle.request_redraw();
                }
                Err(error) => {
                    log::error!("Failed to initialize the renderer: {error}");
                    event_loop.exit();
                }
            }
        }

        #[cfg(target_arch = "wasm32")]
        {
            let (sender, receiver) = futures::channel::oneshot::channel();
            self.renderer_receiver = Some(receiver);
            log::info!("Canvas dimensions: ({width} x {height})");
            wasm_bindgen_futures::spawn_local(async move {
                match Renderer::new(window_handle.clone(), width, height, clear_color).await {
                    Ok(renderer) => {
                        if sender.send(renderer).is_err() {
                            log::error!("Failed to hand the renderer to the application");
                        }
                        window_handle.request_redraw();
                    }
                    Err(error) => log::error!("Failed to initialize the renderer: {error}"),
                }
            });
        }
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: winit::event::WindowEvent,
    ) {
        #[cfg(target_arch = "wasm32")]
        {
            let mut renderer_received = false;
            if let Some(receiver) = self.renderer_receiver.as_mut() {
                if let Ok(Some(renderer)) = receiver.try_recv() {
                    self.renderer = Some(renderer);
                    renderer_received = true;
                }
            }
            if renderer_received {
                self.renderer_receiver = None;
            }
        }

        let (Some(gui_state), Some(renderer), Some(window)) = (
            self.gui_state.as_mut(),
            self.renderer.as_mut(),
            self.window.as_ref(),
        ) else {
            return;
        };

        let response = gui_state.on_window_event(window, &event);
        if response.repaint {
            window.request_redraw();
        }
        if response.consumed {
            return;
        }

        match event {
            WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        physical_key: PhysicalKey::Code(key_code),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                if key_code == KeyCode::Escape {
                    log::info!("Escape pressed. Exiting...");
                    event_loop.exit();
                } else if self.navigation.handle_key(key_code) {
                    self.scene_event_pending = true;
                    window.request_redraw();
                }
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                log::info!("Resizing renderer surface to: ({width}, {height})");
                renderer.resize(width, height);
                self.last_size = (width, height);
                self.scene_event_pending = true;
                window.request_redraw();
            }
            WindowEvent::CloseRequested => {
                log::info!("Close requested. Exiting...");
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                let gui_input = gui_state.take_egui_input(window);
                gui_state.egui_ctx().begin_pass(gui_input);

                let mut controls_changed = false;
                egui::Window::new(panel_title()).show(gui_state.egui_ctx(), |ui| {
                    controls_changed = self.controls.show(ui);
                });

                let egui_winit::egui::FullOutput {
                    textures_delta,
                    shapes,
                    pixels_per_point,
                    platform_output,
                    ..
                } = gui_state.egui_ctx().end_pass();

                gui_state.handle_platform_output(window, platform_output);
                renderer.update_textures(&textures_delta);

                let paint_jobs = gui_state.egui_ctx().tessellate(shapes, pixels_per_point);

                let screen_descriptor = {
                    let (width, height) = self.last_size;
                    egui_wgpu::ScreenDescriptor {
                        size_in_pixels: [width, height],
                        pixels_per_point: window.scale_factor() as f32,
                    }
                };

                let redraw = if self.scene_event_pending || controls_changed {
                    Redraw::SceneEvent
                } else {
                    Redraw::RepaintOnly
                };
                self.scene_event_pending = false;

                let plan = match frame::plan_frame(
                    &mut self.scene,
                    &self.navigation,
                    &self.controls,
                    &self.config,
                    renderer.aspect_ratio(),
                    redraw,
                ) {
                    Ok(plan) => plan,
                    Err(error) => {
                        log::error!("Dropping frame: {error}");
                        return;
                    }
                };

                if let Err(error) = renderer.render_frame(&plan, screen_descriptor, paint_jobs) {
                    log::error!("Failed to render frame: {error}");
                }

                if controls_changed {
                    window.request_redraw();
                }
            }
            _ => (),
        }
    }
}
