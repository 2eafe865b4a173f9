//! # Errors
//!
//! Every fallible path in the viewer reports through one of the enums below:
//!
//! - [`InitError`]: the GPU could not be brought up. Startup is aborted.
//! - [`SceneError`]: the scene traversal broke one of its own invariants. These are
//!   programming errors; the frame is dropped and the error is logged.
//! - [`RenderError`]: a frame could not be presented.
//! - [`ConfigError`]: a configuration value could not be parsed.
//!
//! Unrecognized keys are not errors at all; they are ignored by the camera.

/// Failures while creating the surface, adapter, or device.
#[derive(Debug, thiserror::Error)]
pub enum InitError {
    #[error("failed to create a rendering surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no GPU adapter is compatible with the rendering surface")]
    NoAdapter,

    #[error("failed to request a GPU device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("the rendering surface reports no supported texture formats")]
    NoSurfaceFormat,
}

/// Invariant violations inside a scene build.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SceneError {
    #[error("transform stack underflow: pop without a matching push")]
    StackUnderflow,

    #[error("transform stack left unbalanced at depth {0} after the scene was emitted")]
    UnbalancedStack(usize),

    #[error("model matrix of instance {index} ({label}) is not invertible")]
    SingularModel { index: usize, label: &'static str },
}

/// Failures while producing a frame.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error("failed to acquire the next surface texture: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}

/// A configuration value that does not name a known option.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {setting} `{value}` (expected one of: {expected})")]
pub struct ConfigError {
    pub setting: &'static str,
    pub value: String,
    pub expected: &'static str,
}
