//! # Uniform Buffers
//!
//! CPU-side mirrors of the two uniform blocks declared in `shader_source.wgsl`.
//!
//! - [`FrameUniform`] (group 0) is written once per frame: camera matrices, lights, and the
//!   shading switch.
//! - [`ObjectUniform`] (group 1) is written once per cuboid into a single buffer and selected
//!   with a dynamic offset at draw time.
//!
//! Both are `#[repr(C)]` and [`bytemuck::Pod`] so they can be copied straight into a
//! [`wgpu::Buffer`]. Every vector is widened to four components; the WGSL side uses `vec4<f32>`
//! throughout, which keeps the two layouts identical without explicit padding fields.
//!
//! ## Layout
//!
//! | Block | Bytes | Contents |
//! |---|---|---|
//! | [`FrameUniform`] | 256 | two `mat4x4`, eight `vec4` |
//! | [`ObjectUniform`] | 144 | two `mat4x4`, one `vec4` |
//!
//! Matrices are column-major on both sides, so `nalgebra_glm::Mat4` is copied as-is.

// Encoded into `options.x` for the shader's lit/unlit branch.
use crate::config::ShadingMode;
// Uniforms are built from a finished plan, never from live scene state.
use crate::frame::{DrawCall, FramePlan};
use crate::math::Vec3;

/// Pads a 3-vector to a `vec4` with `w = 0`.
fn widen(v: &Vec3) -> [f32; 4] {
    [v.x, v.y, v.z, 0.0]
}

/// Per-frame uniform block.
///
/// # Fields
///
/// - `view`, `projection`: world to camera and camera to clip.
/// - `ambient`: constant light added to every lit vertex (`xyz`).
/// - `light_directions`: unit vectors toward the two directional lights (`xyz`).
/// - `light_colors`: colors of the two directional lights; black when switched off.
/// - `point_position`, `point_color`: the ceiling light.
/// - `options`: `x` is `1.0` for lit shading and `0.0` for flat colors.
#[repr(C)]
#[derive(Default, Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct FrameUniform {
    pub view: nalgebra_glm::Mat4,
    pub projection: nalgebra_glm::Mat4,
    pub ambient: [f32; 4],
    pub light_directions: [[f32; 4]; 2],
    pub light_colors: [[f32; 4]; 2],
    pub point_position: [f32; 4],
    pub point_color: [f32; 4],
    pub options: [f32; 4],
}

impl FrameUniform {
    /// Copies the camera, lights and shading mode out of `plan`.
    pub fn new(plan: &FramePlan) -> Self {
        let lighting = &plan.lighting;
        let [key, fill] = &lighting.directional;
        Self {
            view: plan.view,
            projection: plan.projection,
            ambient: widen(&lighting.ambient),
            light_directions: [widen(&key.direction), widen(&fill.direction)],
            light_colors: [widen(&key.color), widen(&fill.color)],
            point_position: widen(&lighting.point.position),
            point_color: widen(&lighting.point.color),
            options: [
                match plan.shading {
                    ShadingMode::Lit => 1.0,
                    ShadingMode::Unlit => 0.0,
                },
                0.0,
                0.0,
                0.0,
            ],
        }
    }
}

/// Per-cuboid uniform block.
///
/// # Fields
///
/// - `model`: object to world, including the scene root.
/// - `normal`: `transpose(inverse(model))`, applied to normals with `w = 0`.
/// - `color`: flat RGBA color.
#[repr(C)]
#[derive(Default, Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: nalgebra_glm::Mat4,
    pub normal: nalgebra_glm::Mat4,
    pub color: [f32; 4],
}

impl From<&DrawCall> for ObjectUniform {
    fn from(draw: &DrawCall) -> Self {
        Self {
            model: draw.model,
            normal: draw.normal,
            color: draw.color.to_array(),
        }
    }
}
