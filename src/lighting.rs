//! Light parameters for the classroom.
//!
//! The directions and positions are fixed; only the colors change, gated by the three panel
//! toggles. A light that is switched off keeps its direction and contributes black.

use crate::math::Vec3;

/// Direction *toward* the key light, before normalization.
pub const KEY_LIGHT_DIRECTION: [f32; 3] = [0.5, 3.0, 4.0];

/// Direction *toward* the fill light, before normalization.
pub const FILL_LIGHT_DIRECTION: [f32; 3] = [-2.0, 4.0, -3.0];

pub const POINT_LIGHT_POSITION: [f32; 3] = [0.0, 5.0, -3.0];

pub const KEY_LIGHT_COLOR: [f32; 3] = [1.0, 1.0, 1.0];
pub const FILL_LIGHT_COLOR: [f32; 3] = [0.45, 0.45, 0.5];
pub const POINT_LIGHT_COLOR: [f32; 3] = [0.9, 0.8, 0.6];

/// Always-on term so faces turned away from every light are still visible.
pub const AMBIENT_COLOR: [f32; 3] = [0.2, 0.2, 0.2];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Unit vector pointing from the surface toward the light.
    pub direction: Vec3,
    pub color: Vec3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    pub position: Vec3,
    pub color: Vec3,
}

/// Everything the shader needs to light a vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lighting {
    pub ambient: Vec3,
    pub directional: [DirectionalLight; 2],
    pub point: PointLight,
}

impl Lighting {
    /// Builds the light set with each light's color gated by its toggle.
    pub fn from_toggles(key: bool, fill: bool, point: bool) -> Self {
        let gate = |on: bool, color: [f32; 3]| {
            if on {
                Vec3::from(color)
            } else {
                Vec3::zeros()
            }
        };

        Self {
            ambient: Vec3::from(AMBIENT_COLOR),
            directional: [
                DirectionalLight {
                    direction: Vec3::from(KEY_LIGHT_DIRECTION).normalize(),
                    color: gate(key, KEY_LIGHT_COLOR),
                },
                DirectionalLight {
                    direction: Vec3::from(FILL_LIGHT_DIRECTION).normalize(),
                    color: gate(fill, FILL_LIGHT_COLOR),
                },
            ],
            point: PointLight {
                position: Vec3::from(POINT_LIGHT_POSITION),
                color: gate(point, POINT_LIGHT_COLOR),
            },
        }
    }
}

impl Default for Lighting {
    fn default() -> Self {
        Self::from_toggles(true, true, true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra_glm as glm;

    /// Mirrors the shader's per-vertex term for a world-space normal and position.
    fn shade(lighting: &Lighting, normal: &Vec3, position: &Vec3, base: &Vec3) -> Vec3 {
        let normal = normal.normalize();
        let mut light = lighting.ambient;
        for directional in &lighting.directional {
            light += directional.color * normal.dot(&directional.direction).max(0.0);
        }
        let to_point = (lighting.point.position - position).normalize();
        light += lighting.point.color * normal.dot(&to_point).max(0.0);
        glm::min(&light.component_mul(base), 1.0)
    }

    #[test]
    fn directions_are_unit_length() {
        let lighting = Lighting::default();
        for light in &lighting.directional {
            assert_relative_eq!(light.direction.norm(), 1.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn toggles_only_gate_colors() {
        let on = Lighting::from_toggles(true, true, true);
        let off = Lighting::from_toggles(false, false, false);

        assert_eq!(off.directional[0].direction, on.directional[0].direction);
        assert_eq!(off.point.position, on.point.position);
        assert_eq!(off.directional[0].color, Vec3::zeros());
        assert_eq!(off.directional[1].color, Vec3::zeros());
        assert_eq!(off.point.color, Vec3::zeros());
        assert_eq!(off.ambient, on.ambient);
    }

    #[test]
    fn all_lights_off_leaves_only_ambient() {
        let lighting = Lighting::from_toggles(false, false, false);
        let base = glm::vec3(1.0, 0.5, 0.25);
        let shaded = shade(&lighting, &glm::vec3(0.0, 1.0, 0.0), &Vec3::zeros(), &base);
        assert_relative_eq!(shaded, base * 0.2, epsilon = 1e-6);
    }

    #[test]
    fn surfaces_facing_away_get_no_diffuse() {
        let lighting = Lighting::from_toggles(true, false, false);
        let base = glm::vec3(1.0, 1.0, 1.0);

        // Key light sits above and in front (+y, +z); a downward face sees none of it.
        let down = shade(&lighting, &glm::vec3(0.0, -1.0, 0.0), &Vec3::zeros(), &base);
        let up = shade(&lighting, &glm::vec3(0.0, 1.0, 0.0), &Vec3::zeros(), &base);
        assert_relative_eq!(down, Vec3::from(AMBIENT_COLOR), epsilon = 1e-6);
        assert!(up.x > down.x);
    }

    #[test]
    fn point_light_depends_on_position() {
        let lighting = Lighting::from_toggles(false, false, true);
        let base = glm::vec3(1.0, 1.0, 1.0);
        let normal = glm::vec3(0.0, 1.0, 0.0);

        let below = shade(&lighting, &normal, &glm::vec3(0.0, 0.0, -3.0), &base);
        let beside = shade(&lighting, &normal, &glm::vec3(10.0, 5.0, -3.0), &base);
        assert!(below.x > beside.x);
    }
}
