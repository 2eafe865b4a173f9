//! # Math
//!
//! Transform helpers layered over `nalgebra-glm`.
//!
//! Conventions used throughout the crate:
//!
//! - Matrices are [`Mat4`] values, stored **column-major** (the nalgebra layout), and are
//!   uploaded to the GPU as-is.
//! - The world is right-handed with +Y up. Projections map depth into `0..1`, which is what
//!   `wgpu` expects.
//! - Composition multiplies on the right: placing a cuboid under `parent` yields
//!   `parent * T * Rx * Ry * Rz * S`, so the last operation listed is applied to the vertex first
//!   (see [`crate::cuboid::Cuboid::place`]).
//! - Angles passed to this module are in **degrees**; conversion to radians happens here.

use nalgebra_glm as glm;

pub use glm::{Mat4, Vec3};

/// Returns `m` followed by a rotation of `degrees` about X, then Y, then Z.
///
/// The order is fixed; cuboid rotations are authored against it.
pub fn rotate_xyz(m: &Mat4, degrees: &Vec3) -> Mat4 {
    let m = glm::rotate_x(m, degrees.x.to_radians());
    let m = glm::rotate_y(&m, degrees.y.to_radians());
    glm::rotate_z(&m, degrees.z.to_radians())
}

/// The matrix that carries surface normals through `model`: `transpose(inverse(model))`.
///
/// Plain `model` would skew normals whenever the scale is non-uniform. Returns `None` when
/// `model` is singular.
pub fn normal_matrix(model: &Mat4) -> Option<Mat4> {
    model.try_inverse().map(|inverse| inverse.transpose())
}

/// Rotates `v` by `degrees` about `axis` (right-hand rule). The axis need not be unit length.
pub fn rotate_vector(v: &Vec3, axis: &Vec3, degrees: f32) -> Vec3 {
    glm::rotate_vec3(v, degrees.to_radians(), axis)
}

/// Transforms a point (w = 1).
#[cfg(test)]
pub(crate) fn transform_point(m: &Mat4, p: &Vec3) -> Vec3 {
    (m * glm::vec4(p.x, p.y, p.z, 1.0)).xyz()
}

/// Transforms a direction (w = 0), ignoring translation.
#[cfg(test)]
pub(crate) fn transform_direction(m: &Mat4, d: &Vec3) -> Vec3 {
    (m * glm::vec4(d.x, d.y, d.z, 0.0)).xyz()
}

/// Right-handed view matrix looking from `eye` toward `target`.
pub fn look_at(eye: &Vec3, target: &Vec3, up: &Vec3) -> Mat4 {
    glm::look_at_rh(eye, target, up)
}

/// Right-handed perspective projection with a `0..1` depth range.
pub fn perspective(aspect_ratio: f32, fov_y_degrees: f32, near: f32, far: f32) -> Mat4 {
    glm::perspective_rh_zo(aspect_ratio, fov_y_degrees.to_radians(), near, far)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn normal_matrix_keeps_axis_normal_under_stretch() {
        let model = glm::scale(&Mat4::identity(), &glm::vec3(2.0, 1.0, 1.0));
        let normal = normal_matrix(&model).unwrap();

        let n = transform_direction(&normal, &glm::vec3(1.0, 0.0, 0.0)).normalize();
        assert_relative_eq!(n, glm::vec3(1.0, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn normal_matrix_stays_perpendicular_to_stretched_surface() {
        // A 45 degree slope in the XY plane, stretched 2x along X.
        let model = glm::scale(&Mat4::identity(), &glm::vec3(2.0, 1.0, 1.0));
        let normal = normal_matrix(&model).unwrap();

        let n = transform_direction(&normal, &glm::vec3(1.0, 1.0, 0.0)).normalize();
        assert_relative_eq!(n, glm::vec3(0.5, 1.0, 0.0).normalize(), epsilon = 1e-6);

        // The tangent along the slope is carried by the model itself; it must stay orthogonal.
        let tangent = transform_direction(&model, &glm::vec3(1.0, -1.0, 0.0));
        assert_relative_eq!(n.dot(&tangent), 0.0, epsilon = 1e-6);
    }

    #[test]
    fn normal_matrix_rejects_degenerate_scale() {
        let model = glm::scale(&Mat4::identity(), &glm::vec3(1.0, 0.0, 1.0));
        assert!(normal_matrix(&model).is_none());
    }

    #[test]
    fn rotations_apply_x_then_y_then_z() {
        let m = rotate_xyz(&Mat4::identity(), &glm::vec3(90.0, 90.0, 0.0));
        // Y rotation acts on the vertex first: +Z -> +X, then X rotation leaves +X alone.
        let d = transform_direction(&m, &glm::vec3(0.0, 0.0, 1.0));
        assert_relative_eq!(d, glm::vec3(1.0, 0.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn rotate_vector_follows_right_hand_rule() {
        let v = rotate_vector(&glm::vec3(0.0, 0.0, 1.0), &glm::vec3(0.0, 1.0, 0.0), 90.0);
        assert_relative_eq!(v, glm::vec3(1.0, 0.0, 0.0), epsilon = 1e-6);
    }
}
