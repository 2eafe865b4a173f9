//! # Transform Stack
//!
//! Save/restore of the current model transform while a scene is being emitted.
//!
//! The stack holds a *current* matrix plus a LIFO of snapshots. `push` copies the current
//! matrix onto the stack, the caller then composes further transforms into the current
//! matrix, and `pop` restores the snapshot. Siblings therefore always start from the same
//! parent frame.
//!
//! ```
//! use classroom_core::TransformStack;
//! use nalgebra_glm as glm;
//!
//! let mut stack = TransformStack::new(glm::Mat4::identity());
//! stack.push();
//! stack.translate(&glm::vec3(0.0, 1.0, 0.0));
//! stack.pop().unwrap();
//! assert_eq!(stack.current(), &glm::Mat4::identity());
//! assert_eq!(stack.depth(), 0);
//! ```

use nalgebra_glm as glm;

use crate::error::SceneError;
use crate::math::{self, Mat4, Vec3};

#[derive(Debug, Clone)]
pub struct TransformStack {
    current: Mat4,
    saved: Vec<Mat4>,
}

impl TransformStack {
    pub fn new(root: Mat4) -> Self {
        Self {
            current: root,
            saved: Vec::new(),
        }
    }

    /// The composed transform new geometry is placed under.
    pub fn current(&self) -> &Mat4 {
        &self.current
    }

    /// Number of saved snapshots.
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Saves a copy of the current transform.
    pub fn push(&mut self) {
        self.saved.push(self.current);
    }

    /// Restores the most recently saved transform and returns it.
    ///
    /// Popping an empty stack means a push/pop pair was mismatched somewhere in the scene
    /// code, so it is reported instead of being tolerated.
    pub fn pop(&mut self) -> Result<Mat4, SceneError> {
        let restored = self.saved.pop().ok_or(SceneError::StackUnderflow)?;
        self.current = restored;
        Ok(restored)
    }

    pub fn translate(&mut self, offset: &Vec3) {
        self.current = glm::translate(&self.current, offset);
    }

    /// Rotates by the given degrees about X, then Y, then Z.
    pub fn rotate(&mut self, degrees: &Vec3) {
        self.current = math::rotate_xyz(&self.current, degrees);
    }

    pub fn scale(&mut self, factors: &Vec3) {
        self.current = glm::scale(&self.current, factors);
    }

    /// Fails unless every push has been matched by a pop.
    pub fn ensure_balanced(&self) -> Result<(), SceneError> {
        match self.depth() {
            0 => Ok(()),
            depth => Err(SceneError::UnbalancedStack(depth)),
        }
    }
}
