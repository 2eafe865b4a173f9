//! # Scene
//!
//! The classroom as a flat, ordered list of cuboid draws.
//!
//! ## Overview
//!
//! - [`SceneState`] owns the only animated value in the room, the lamp shade angle. It is
//!   advanced explicitly with [`SceneState::tick`], once per scene-changing redraw.
//! - [`SceneState::build`] is a pure function of that state and the per-frame
//!   [`SceneParams`]. It walks the room's assemblies (walls, the teacher's desk and chair with
//!   its lamp, the student rows) through a [`SceneBuilder`] and returns one [`DrawInstance`]
//!   per cuboid, always in the same order.
//! - [`SceneBuilder`] pairs a [`TransformStack`] with the output list. Every cuboid is emitted
//!   between a push and a pop, and whole groups can be wrapped in a transform with
//!   [`SceneBuilder::group`].
//!
//! The furniture and wall layouts themselves live in [`crate::furniture`] and
//! [`crate::walls`].

use nalgebra_glm as glm;

use crate::cuboid::{Color, Cuboid};
use crate::error::SceneError;
use crate::furniture;
use crate::math::{Mat4, Vec3};
use crate::transform_stack::TransformStack;
use crate::walls;

/// Degrees the lamp shade turns per tick while spinning.
pub const LAMP_SPIN_STEP: f32 = 10.0;

/// Anchor of the desks-and-chairs group before lift is applied.
pub const FURNITURE_ANCHOR: [f32; 3] = [0.0, 0.0, 0.0];

/// One world-space cuboid ready to be drawn with the shared cube geometry.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawInstance {
    pub label: &'static str,
    pub model: Mat4,
    pub color: Color,
}

/// Per-frame inputs to a scene build.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneParams {
    /// Transform the whole room is placed under.
    pub root: Mat4,
    /// Lift control, `0..=100`. The furniture rises by `lift / 100` world units.
    pub lift: f32,
    /// Whether the walls, floor, ceiling and whiteboard are emitted.
    pub walls: bool,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            root: Mat4::identity(),
            lift: 0.0,
            walls: true,
        }
    }
}

/// Animation state that persists between frames.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SceneState {
    lamp_angle: f32,
}

impl SceneState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current Y rotation of the lamp shade, in degrees. Grows without wrapping.
    pub fn lamp_angle(&self) -> f32 {
        self.lamp_angle
    }

    /// Advances the animation by one step.
    pub fn tick(&mut self, spin: bool) {
        if spin {
            self.lamp_angle += LAMP_SPIN_STEP;
        }
    }

    /// Emits the whole classroom.
    pub fn build(&self, params: &SceneParams) -> Result<Vec<DrawInstance>, SceneError> {
        let mut builder = SceneBuilder::new(params.root);

        if params.walls {
            walls::classroom_walls(&mut builder)?;
        }

        builder.group(&glm::vec3(0.0, params.lift / 100.0, 0.0), |builder| {
            furniture::desks_and_chairs(
                builder,
                Vec3::from(FURNITURE_ANCHOR),
                self.lamp_angle,
            )
        })?;

        builder.finish()
    }
}

/// Accumulates cuboid draws under a transform stack.
#[derive(Debug)]
pub struct SceneBuilder {
    stack: TransformStack,
    instances: Vec<DrawInstance>,
}

impl SceneBuilder {
    pub fn new(root: Mat4) -> Self {
        Self {
            stack: TransformStack::new(root),
            instances: Vec::new(),
        }
    }

    pub fn depth(&self) -> usize {
        self.stack.depth()
    }

    /// Emits one cuboid under the current transform, which is left unchanged.
    pub fn add_cuboid(&mut self, cuboid: Cuboid) -> Result<(), SceneError> {
        self.stack.push();
        cuboid.place(&mut self.stack);
        self.instances.push(DrawInstance {
            label: cuboid.label,
            model: *self.stack.current(),
            color: cuboid.color,
        });
        self.stack.pop().map(|_| ())
    }

    /// Runs `emit` with the current transform translated by `offset`, then restores it.
    pub fn group<F>(&mut self, offset: &Vec3, emit: F) -> Result<(), SceneError>
    where
        F: FnOnce(&mut Self) -> Result<(), SceneError>,
    {
        self.stack.push();
        self.stack.translate(offset);
        emit(self)?;
        self.stack.pop().map(|_| ())
    }

    /// Returns the emitted draws, checking that every push was matched.
    pub fn finish(self) -> Result<Vec<DrawInstance>, SceneError> {
        self.stack.ensure_balanced()?;
        Ok(self.instances)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::palette;

    fn lamp_shade(instances: &[DrawInstance]) -> Mat4 {
        instances
            .iter()
            .find(|i| i.label == "lamp/shade")
            .map(|i| i.model)
            .unwrap()
    }

    #[test]
    fn add_cuboid_leaves_the_parent_transform_alone() {
        let mut builder = SceneBuilder::new(Mat4::identity());
        let cuboid = Cuboid::new(
            "test",
            glm::vec3(1.0, 2.0, 3.0),
            glm::vec3(2.0, 2.0, 2.0),
            palette::WHITE,
        )
        .rotated(0.0, 45.0, 0.0);

        builder.add_cuboid(cuboid).unwrap();
        builder.add_cuboid(cuboid).unwrap();
        assert_eq!(builder.depth(), 0);

        let instances = builder.finish().unwrap();
        assert_eq!(instances[0].model, instances[1].model);
        let mut stack = TransformStack::new(Mat4::identity());
        cuboid.place(&mut stack);
        assert_eq!(instances[0].model, *stack.current());
    }

    #[test]
    fn group_offsets_children_and_restores_afterwards() {
        let mut builder = SceneBuilder::new(Mat4::identity());
        let cuboid = Cuboid::new("test", Vec3::zeros(), glm::vec3(1.0, 1.0, 1.0), palette::WHITE);

        builder
            .group(&glm::vec3(0.0, 0.5, 0.0), |b| b.add_cuboid(cuboid))
            .unwrap();
        builder.add_cuboid(cuboid).unwrap();

        let instances = builder.finish().unwrap();
        assert_eq!(instances[0].model[(1, 3)], 0.5);
        assert_eq!(instances[1].model[(1, 3)], 0.0);
    }

    #[test]
    fn failing_group_is_not_reported_as_balanced() {
        let mut builder = SceneBuilder::new(Mat4::identity());
        let result = builder.group(&Vec3::zeros(), |_| Err(SceneError::StackUnderflow));
        assert_eq!(result, Err(SceneError::StackUnderflow));
        assert_eq!(builder.finish(), Err(SceneError::UnbalancedStack(1)));
    }

    #[test]
    fn build_is_repeatable_for_the_same_state() {
        let state = SceneState::new();
        let params = SceneParams {
            lift: 40.0,
            ..SceneParams::default()
        };
        assert_eq!(state.build(&params).unwrap(), state.build(&params).unwrap());
    }

    #[test]
    fn lamp_only_turns_while_spinning() {
        let mut state = SceneState::new();
        let params = SceneParams::default();
        let before = lamp_shade(&state.build(&params).unwrap());

        for _ in 0..5 {
            state.tick(false);
        }
        assert_eq!(state.lamp_angle(), 0.0);
        assert_eq!(lamp_shade(&state.build(&params).unwrap()), before);

        for frame in 1..=40 {
            state.tick(true);
            assert_eq!(state.lamp_angle(), frame as f32 * LAMP_SPIN_STEP);
        }
        assert_eq!(state.lamp_angle(), 400.0);
        assert_ne!(lamp_shade(&state.build(&params).unwrap()), before);
    }

    #[test]
    fn lift_raises_every_piece_of_furniture() {
        let state = SceneState::new();
        let ground = state.build(&SceneParams::default()).unwrap();
        let lifted = state
            .build(&SceneParams {
                lift: 50.0,
                ..SceneParams::default()
            })
            .unwrap();

        assert_eq!(ground.len(), lifted.len());
        for (a, b) in ground.iter().zip(&lifted) {
            let dy = b.model[(1, 3)] - a.model[(1, 3)];
            if a.label.starts_with("wall/") {
                assert_eq!(dy, 0.0, "{}", a.label);
            } else {
                assert!((dy - 0.5).abs() < 1e-5, "{} moved {dy}", a.label);
            }
        }
    }
}
