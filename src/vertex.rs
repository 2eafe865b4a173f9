//! # Vertex Module
//!
//! This module provides the `Vertex` struct and the shared unit-cube geometry that every
//! cuboid in the classroom is drawn from.
//!
//! # Overview
//!
//! ## Structs
//!
//! - [`Vertex`]: A single vertex with a position and an outward face normal.
//!
//! ## Constants
//!
//! - [`CUBE_VERTICES`]: 24 vertices of a unit cube centered on the origin. Each face owns its
//!   four corners so that every corner carries the normal of its face; corners are therefore
//!   duplicated at face boundaries.
//! - [`CUBE_INDICES`]: 36 indices, two counter-clockwise triangles per face.
//!
//! The geometry is uploaded once and never changes. Only the model transform and the color
//! vary from one cuboid to the next, and both travel as per-draw uniforms.
//!
//! # Crate Dependencies
//!
//! - `wgpu` for the vertex attribute layout.
//! - `bytemuck` for casting the vertex array into a GPU buffer.

/// A vertex of the shared cube: position in model space plus the face normal.
///
/// # Fields
///
/// - `position`: x, y, z in model space, each component in `-0.5..=0.5`.
/// - `normal`: the unit outward normal of the face this vertex belongs to.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

impl Vertex {
    /// Returns the vertex attributes consumed by `vertex_main`:
    /// location 0 is the position, location 1 is the normal.
    pub fn vertex_attributes() -> Vec<wgpu::VertexAttribute> {
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3].to_vec()
    }

    /// Builds the buffer layout for a per-vertex buffer of `Vertex` values.
    ///
    /// # Parameters
    ///
    /// - `attributes`: the attributes returned by [`Vertex::vertex_attributes`]. They are
    ///   borrowed, so the caller keeps them alive for as long as the layout is used.
    pub fn description(attributes: &[wgpu::VertexAttribute]) -> wgpu::VertexBufferLayout<'_> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes,
        }
    }
}

const fn vertex(position: [f32; 3], normal: [f32; 3]) -> Vertex {
    Vertex { position, normal }
}

const FRONT: [f32; 3] = [0.0, 0.0, 1.0];
const RIGHT: [f32; 3] = [1.0, 0.0, 0.0];
const UP: [f32; 3] = [0.0, 1.0, 0.0];
const LEFT: [f32; 3] = [-1.0, 0.0, 0.0];
const DOWN: [f32; 3] = [0.0, -1.0, 0.0];
const BACK: [f32; 3] = [0.0, 0.0, -1.0];

/// The unit cube, four vertices per face.
///
/// ```text
///    v6----- v5
///   /|      /|
///  v1------v0|
///  | |     | |
///  | |v7---|-|v4
///  |/      |/
///  v2------v3
/// ```
pub const CUBE_VERTICES: [Vertex; 24] = [
    // v0-v1-v2-v3 front
    vertex([0.5, 0.5, 0.5], FRONT),
    vertex([-0.5, 0.5, 0.5], FRONT),
    vertex([-0.5, -0.5, 0.5], FRONT),
    vertex([0.5, -0.5, 0.5], FRONT),
    // v0-v3-v4-v5 right
    vertex([0.5, 0.5, 0.5], RIGHT),
    vertex([0.5, -0.5, 0.5], RIGHT),
    vertex([0.5, -0.5, -0.5], RIGHT),
    vertex([0.5, 0.5, -0.5], RIGHT),
    // v0-v5-v6-v1 up
    vertex([0.5, 0.5, 0.5], UP),
    vertex([0.5, 0.5, -0.5], UP),
    vertex([-0.5, 0.5, -0.5], UP),
    vertex([-0.5, 0.5, 0.5], UP),
    // v1-v6-v7-v2 left
    vertex([-0.5, 0.5, 0.5], LEFT),
    vertex([-0.5, 0.5, -0.5], LEFT),
    vertex([-0.5, -0.5, -0.5], LEFT),
    vertex([-0.5, -0.5, 0.5], LEFT),
    // v7-v4-v3-v2 down
    vertex([-0.5, -0.5, -0.5], DOWN),
    vertex([0.5, -0.5, -0.5], DOWN),
    vertex([0.5, -0.5, 0.5], DOWN),
    vertex([-0.5, -0.5, 0.5], DOWN),
    // v4-v7-v6-v5 back
    vertex([0.5, -0.5, -0.5], BACK),
    vertex([-0.5, -0.5, -0.5], BACK),
    vertex([-0.5, 0.5, -0.5], BACK),
    vertex([0.5, 0.5, -0.5], BACK),
];

/// Two triangles per face, in face order front, right, up, left, down, back.
pub const CUBE_INDICES: [u32; 36] = [
    0, 1, 2, 0, 2, 3, // front
    4, 5, 6, 4, 6, 7, // right
    8, 9, 10, 8, 10, 11, // up
    12, 13, 14, 12, 14, 15, // left
    16, 17, 18, 16, 18, 19, // down
    20, 21, 22, 20, 22, 23, // back
];
