#[cfg(not(target_arch = "wasm32"))]
fn main() -> Result<(), winit::error::EventLoopError> {
    use classroom_core::{App, ViewerConfig};
    use winit::event_loop::{ControlFlow, EventLoop};

    env_logger::init();

    let config = ViewerConfig::from_env();
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Wait);
    event_loop.run_app(&mut App::new(config))
}

// The browser build starts from `classroom_core::start`.
#[cfg(target_arch = "wasm32")]
fn main() {}
