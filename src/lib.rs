//! # Classroom Viewer
//!
//! An explorable 3D classroom drawn entirely from cuboids: walls and a whiteboard, a teacher's
//! desk with a spinning lamp, and five rows of student desks and chairs. Every piece of
//! furniture is composed by walking a transform stack, and every cuboid is one draw of a
//! single shared unit cube with its own model matrix, normal matrix and color.
//!
//! ## Modules
//!
//! - [`math`]: transform helpers over `nalgebra-glm`, including the normal matrix.
//! - [`transform_stack`]: the push/pop matrix stack used while composing the scene.
//! - [`vertex`], [`cuboid`], [`palette`]: the shared cube geometry, cuboid descriptions and
//!   colors.
//! - [`scene`], [`furniture`], [`walls`]: the scene builder and the room's layout.
//! - [`camera`]: free-fly and orbit keyboard navigation.
//! - [`lighting`], [`controls`], [`config`]: lights, panel toggles and startup options.
//! - [`frame`]: per-redraw planning, from navigation and toggles to a list of draws.
//! - [`renderer`], [`cuboid_pass`], [`gpu`], [`uniform_buffer`], [`uniform_binding`]: the
//!   `wgpu` side.
//! - [`app`]: the `winit` application handler.
//!
//! Everything up to [`frame::plan_frame`] is plain data and runs without a GPU.
//!
//! ## Controls
//!
//! | Key | Free-fly | Orbit |
//! |---|---|---|
//! | ↑ / ↓ | tilt the view | turn the room about X |
//! | ← / → | turn the view | turn the room about Y |
//! | W / S | walk forward / back | |
//! | A / D | strafe | |
//! | Esc | quit | quit |
//!
//! ## Example
//!
//! ```
//! use classroom_core::{SceneParams, SceneState};
//!
//! let scene = SceneState::new();
//! let draws = scene.build(&SceneParams::default()).unwrap();
//! assert_eq!(draws.len(), 482);
//! ```

pub mod app;
pub mod camera;
pub mod config;
pub mod controls;
pub mod cuboid;
pub mod cuboid_pass;
pub mod error;
pub mod frame;
pub mod furniture;
pub mod gpu;
pub mod lighting;
pub mod math;
pub mod palette;
pub mod renderer;
pub mod scene;
pub mod transform_stack;
pub mod uniform_binding;
pub mod uniform_buffer;
pub mod vertex;
pub mod walls;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

pub use crate::app::App;
pub use crate::camera::{CameraKey, FreeFlyCamera, Navigation, OrbitView};
pub use crate::config::{NavigationMode, ShadingMode, ViewerConfig};
pub use crate::controls::Controls;
pub use crate::cuboid::{Color, Cuboid};
pub use crate::error::{ConfigError, InitError, RenderError, SceneError};
pub use crate::frame::{plan_frame, DrawCall, FramePlan, Redraw};
pub use crate::lighting::Lighting;
pub use crate::renderer::Renderer;
pub use crate::scene::{DrawInstance, SceneBuilder, SceneParams, SceneState};
pub use crate::transform_stack::TransformStack;

pub const SHADER_SOURCE: &str = include_str!("shader_source.wgsl");

/// Browser entry point: sets up logging and starts the event loop on the page's canvas.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn start() {
    std::panic::set_hook(Box::new(console_error_panic_hook::hook));
    console_log::init().expect("Failed to initialize logger!");

    let event_loop = match winit::event_loop::EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(error) => {
            log::error!("Failed to create event loop: {error}");
            return;
        }
    };
    event_loop.set_control_flow(winit::event_loop::ControlFlow::Wait);

    use winit::platform::web::EventLoopExtWebSys;
    event_loop.spawn_app(App::default());
}
