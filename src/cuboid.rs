//! # Cuboid
//!
//! The single primitive the classroom is built from: the shared unit cube from
//! [`crate::vertex`], placed with an offset, a rotation, and a scale, and painted one solid
//! color.
//!
//! A [`Cuboid`] is a description relative to whatever transform is current when it is
//! emitted. [`Cuboid::place`] is the only code that turns that description into matrix
//! operations; [`crate::scene::SceneBuilder::add_cuboid`] calls it between a push and a pop
//! and records the result as a world-space [`crate::scene::DrawInstance`].

use nalgebra_glm as glm;

use crate::math::Vec3;
use crate::palette::Rgb8;
use crate::transform_stack::TransformStack;

/// A normalized RGBA color.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl From<Rgb8> for Color {
    fn from([r, g, b]: Rgb8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
    }
}

/// One oriented, scaled, colored box.
///
/// # Fields
///
/// - `label`: part name, used in logs, errors, and tests (`"chair/seat"`).
/// - `offset`: center of the box relative to the current transform.
/// - `size`: edge lengths along the local x, y, z axes.
/// - `rotation`: degrees about X, then Y, then Z.
/// - `color`: solid fill.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cuboid {
    pub label: &'static str,
    pub offset: Vec3,
    pub size: Vec3,
    pub rotation: Vec3,
    pub color: Color,
}

impl Cuboid {
    /// An axis-aligned cuboid.
    pub fn new(label: &'static str, offset: Vec3, size: Vec3, color: impl Into<Color>) -> Self {
        Self {
            label,
            offset,
            size,
            rotation: Vec3::zeros(),
            color: color.into(),
        }
    }

    /// Sets the rotation, in degrees about X, Y and Z.
    pub fn rotated(mut self, x: f32, y: f32, z: f32) -> Self {
        self.rotation = glm::vec3(x, y, z);
        self
    }

    /// Applies this cuboid's placement to the current transform of `stack`:
    /// translate by `offset`, rotate X then Y then Z, then scale by `size`.
    ///
    /// The caller owns the push and pop around it.
    pub fn place(&self, stack: &mut TransformStack) {
        stack.translate(&self.offset);
        stack.rotate(&self.rotation);
        stack.scale(&self.size);
    }
}
