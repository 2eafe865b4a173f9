//! Furniture assemblies.
//!
//! Each assembly takes an anchor point and emits its cuboids at fixed offsets from it. The
//! anchors are plain vector sums; only the lift is applied as a shared transform (see
//! [`crate::scene::SceneState::build`]).

use nalgebra_glm as glm;

use crate::cuboid::Cuboid;
use crate::error::SceneError;
use crate::math::Vec3;
use crate::palette;
use crate::scene::SceneBuilder;

/// Row positions of the student grid along z, relative to the rows anchor.
pub const ROW_OFFSETS: [f32; 5] = [-5.5, -2.75, 0.0, 2.75, 5.5];

/// Seat positions within a row along x.
pub const SEAT_OFFSETS: [f32; 8] = [-9.5, -7.0, -4.5, -2.0, 2.0, 4.5, 7.0, 9.5];

/// Where the teacher's chair and desk stand, relative to the desks-and-chairs anchor.
pub const TEACHER_OFFSET: [f32; 3] = [0.0, 0.0, 6.0];

/// Where the student grid is centered, relative to the desks-and-chairs anchor.
pub const STUDENTS_OFFSET: [f32; 3] = [0.0, 0.0, -6.0];

pub const CHAIR_CUBOIDS: usize = 6;
pub const DESK_CUBOIDS: usize = 5;
pub const TEACHER_CHAIR_CUBOIDS: usize = 10;
pub const TEACHER_DESK_CUBOIDS: usize = 3;
pub const LAMP_CUBOIDS: usize = 4;

/// Total cuboids emitted by [`desks_and_chairs`].
pub const FURNITURE_CUBOIDS: usize = TEACHER_CHAIR_CUBOIDS
    + TEACHER_DESK_CUBOIDS
    + LAMP_CUBOIDS
    + ROW_OFFSETS.len() * SEAT_OFFSETS.len() * (CHAIR_CUBOIDS + DESK_CUBOIDS);

fn v(x: f32, y: f32, z: f32) -> Vec3 {
    glm::vec3(x, y, z)
}

/// The teacher's corner at the front and the student grid at the back.
pub fn desks_and_chairs(
    b: &mut SceneBuilder,
    at: Vec3,
    lamp_angle: f32,
) -> Result<(), SceneError> {
    teacher_chair_and_desk(b, at + Vec3::from(TEACHER_OFFSET), lamp_angle)?;
    student_rows(b, at + Vec3::from(STUDENTS_OFFSET))
}

pub fn teacher_chair_and_desk(
    b: &mut SceneBuilder,
    at: Vec3,
    lamp_angle: f32,
) -> Result<(), SceneError> {
    teacher_chair(b, at)?;
    teacher_desk(b, at + v(0.0, 0.0, -1.0), lamp_angle)
}

/// Swivel chair on a cross of braces with a caster at each brace end.
///
/// Casters follow the azimuth of the brace they hang from: the pair at `z + 0.5` turns 45°,
/// the pair at `z - 0.5` turns -45°.
pub fn teacher_chair(b: &mut SceneBuilder, at: Vec3) -> Result<(), SceneError> {
    use palette::{BLACK, DARK_GREY, LIGHT_GREY};

    b.add_cuboid(Cuboid::new("teacher_chair/seat", at, v(1.0, 0.2, 1.0), LIGHT_GREY))?;
    b.add_cuboid(Cuboid::new(
        "teacher_chair/back",
        at + v(0.0, 1.0, 0.5),
        v(1.0, 1.3, 0.2),
        LIGHT_GREY,
    ))?;
    b.add_cuboid(Cuboid::new(
        "teacher_chair/connector",
        at + v(0.0, 0.4, 0.6),
        v(0.2, 0.9, 0.15),
        DARK_GREY,
    ))?;
    b.add_cuboid(Cuboid::new(
        "teacher_chair/column",
        at + v(0.0, -0.5, 0.0),
        v(0.2, 0.9, 0.2),
        DARK_GREY,
    ))?;

    for azimuth in [45.0, -45.0] {
        b.add_cuboid(
            Cuboid::new(
                "teacher_chair/brace",
                at + v(0.0, -0.95, 0.0),
                v(1.6, 0.2, 0.2),
                DARK_GREY,
            )
            .rotated(0.0, azimuth, 0.0),
        )?;
    }

    for (dx, dz, azimuth) in [
        (0.5, 0.5, 45.0),
        (-0.5, 0.5, 45.0),
        (0.5, -0.5, -45.0),
        (-0.5, -0.5, -45.0),
    ] {
        b.add_cuboid(
            Cuboid::new(
                "teacher_chair/wheel",
                at + v(dx, -1.1, dz),
                v(0.15, 0.15, 0.15),
                BLACK,
            )
            .rotated(0.0, azimuth, 0.0),
        )?;
    }

    Ok(())
}

/// Desk top on two pedestals, with the lamp standing on the top.
pub fn teacher_desk(b: &mut SceneBuilder, at: Vec3, lamp_angle: f32) -> Result<(), SceneError> {
    use palette::WOOD;

    b.add_cuboid(Cuboid::new("teacher_desk/top", at + v(0.0, 0.75, 0.0), v(4.0, 0.2, 2.0), WOOD))?;
    b.add_cuboid(Cuboid::new(
        "teacher_desk/pedestal",
        at + v(1.4, -0.2, 0.0),
        v(1.0, 1.9, 1.8),
        WOOD,
    ))?;
    b.add_cuboid(Cuboid::new(
        "teacher_desk/pedestal",
        at + v(-1.4, -0.2, 0.0),
        v(1.0, 1.9, 1.8),
        WOOD,
    ))?;

    lamp(b, at + v(1.4, 0.85, 0.5), lamp_angle)
}

/// Desk lamp standing on `at`; the shade is turned by `shade_angle` degrees about Y.
pub fn lamp(b: &mut SceneBuilder, at: Vec3, shade_angle: f32) -> Result<(), SceneError> {
    use palette::{DARK_GREY, LAMP_SHADE};

    for azimuth in [45.0, -45.0] {
        b.add_cuboid(
            Cuboid::new("lamp/strut", at + v(0.0, 0.025, 0.0), v(0.6, 0.05, 0.08), DARK_GREY)
                .rotated(0.0, azimuth, 0.0),
        )?;
    }
    b.add_cuboid(Cuboid::new(
        "lamp/upright",
        at + v(0.0, 0.45, 0.0),
        v(0.06, 0.8, 0.06),
        DARK_GREY,
    ))?;
    b.add_cuboid(
        Cuboid::new("lamp/shade", at + v(0.0, 0.9, 0.0), v(0.45, 0.25, 0.45), LAMP_SHADE)
            .rotated(0.0, shade_angle, 0.0),
    )
}

/// Five rows of eight chair-and-desk pairs.
pub fn student_rows(b: &mut SceneBuilder, at: Vec3) -> Result<(), SceneError> {
    for dz in ROW_OFFSETS {
        student_row(b, at + v(0.0, 0.0, dz))?;
    }
    Ok(())
}

pub fn student_row(b: &mut SceneBuilder, at: Vec3) -> Result<(), SceneError> {
    for dx in SEAT_OFFSETS {
        chair_and_desk(b, at + v(dx, 0.0, 0.0))?;
    }
    Ok(())
}

pub fn chair_and_desk(b: &mut SceneBuilder, at: Vec3) -> Result<(), SceneError> {
    chair(b, at)?;
    desk(b, at + v(1.0, 0.0, 1.0))
}

pub fn desk(b: &mut SceneBuilder, at: Vec3) -> Result<(), SceneError> {
    use palette::LIGHT_WOOD;

    b.add_cuboid(Cuboid::new("desk/top", at + v(-0.625, 1.0, 0.0), v(2.0, 0.1, 1.0), LIGHT_WOOD))?;
    for (dx, dz) in [(0.2, 0.375), (-1.45, 0.375), (0.2, -0.375), (-1.45, -0.375)] {
        b.add_cuboid(Cuboid::new(
            "desk/leg",
            at + v(dx, 0.275, dz),
            v(0.1, 1.4, 0.1),
            LIGHT_WOOD,
        ))?;
    }
    Ok(())
}

pub fn chair(b: &mut SceneBuilder, at: Vec3) -> Result<(), SceneError> {
    use palette::{NAVY, WOOD};

    b.add_cuboid(Cuboid::new("chair/seat", at + v(0.375, 0.5, 0.375), v(1.0, 0.25, 1.0), NAVY))?;
    b.add_cuboid(Cuboid::new("chair/back", at + v(0.375, 1.125, 0.0), v(1.0, 1.0, 0.25), NAVY))?;
    for (dx, dz) in [(0.75, 0.75), (0.0, 0.75), (0.75, 0.0), (0.0, 0.0)] {
        b.add_cuboid(Cuboid::new(
            "chair/leg",
            at + v(dx, 0.0, dz),
            v(0.25, 0.75, 0.25),
            WOOD,
        ))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{self, Mat4};
    use crate::scene::DrawInstance;
    use approx::assert_relative_eq;

    fn emit<F>(assembly: F) -> Vec<DrawInstance>
    where
        F: FnOnce(&mut SceneBuilder) -> Result<(), SceneError>,
    {
        let mut builder = SceneBuilder::new(Mat4::identity());
        assembly(&mut builder).unwrap();
        builder.finish().unwrap()
    }

    fn center(instance: &DrawInstance) -> Vec3 {
        math::transform_point(&instance.model, &Vec3::zeros())
    }

    /// Rotation about Y in degrees, read back from where the model sends local +X.
    fn azimuth(instance: &DrawInstance) -> f32 {
        let x = math::transform_direction(&instance.model, &v(1.0, 0.0, 0.0));
        (-x.z).atan2(x.x).to_degrees()
    }

    #[test]
    fn assemblies_emit_their_part_counts() {
        let origin = Vec3::zeros();
        assert_eq!(emit(|b| chair(b, origin)).len(), CHAIR_CUBOIDS);
        assert_eq!(emit(|b| desk(b, origin)).len(), DESK_CUBOIDS);
        assert_eq!(emit(|b| teacher_chair(b, origin)).len(), TEACHER_CHAIR_CUBOIDS);
        assert_eq!(emit(|b| lamp(b, origin, 0.0)).len(), LAMP_CUBOIDS);
        assert_eq!(
            emit(|b| teacher_desk(b, origin, 0.0)).len(),
            TEACHER_DESK_CUBOIDS + LAMP_CUBOIDS
        );
        assert_eq!(emit(|b| desks_and_chairs(b, origin, 0.0)).len(), FURNITURE_CUBOIDS);
        assert_eq!(FURNITURE_CUBOIDS, 457);
    }

    #[test]
    fn each_caster_follows_its_brace() {
        let parts = emit(|b| teacher_chair(b, Vec3::zeros()));
        let braces: Vec<_> = parts
            .iter()
            .filter(|p| p.label == "teacher_chair/brace")
            .collect();
        let wheels: Vec<_> = parts
            .iter()
            .filter(|p| p.label == "teacher_chair/wheel")
            .collect();
        assert_eq!(braces.len(), 2);
        assert_eq!(wheels.len(), 4);

        for brace in braces {
            let brace_azimuth = azimuth(brace);
            let paired: Vec<_> = wheels
                .iter()
                .filter(|w| (azimuth(w) - brace_azimuth).abs() < 1e-3)
                .collect();
            assert_eq!(paired.len(), 2, "brace at {brace_azimuth}");

            for wheel in paired {
                let z = center(wheel).z;
                assert_relative_eq!(z, 0.5 * brace_azimuth.signum(), epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn student_grid_places_every_pair_at_its_own_anchor() {
        let parts = emit(|b| student_rows(b, Vec3::zeros()));
        let seats: Vec<Vec3> = parts
            .iter()
            .filter(|p| p.label == "chair/seat")
            .map(center)
            .collect();
        assert_eq!(seats.len(), 40);

        let mut expected = Vec::new();
        for dz in ROW_OFFSETS {
            for dx in SEAT_OFFSETS {
                expected.push(v(dx + 0.375, 0.5, dz + 0.375));
            }
        }
        for (seat, want) in seats.iter().zip(&expected) {
            assert_relative_eq!(*seat, *want, epsilon = 1e-5);
        }
    }

    #[test]
    fn desk_sits_in_front_of_its_chair() {
        let parts = emit(|b| chair_and_desk(b, v(2.0, 0.0, -3.0)));
        let top = parts.iter().find(|p| p.label == "desk/top").unwrap();
        assert_relative_eq!(center(top), v(2.375, 1.0, -2.0), epsilon = 1e-5);
    }

    #[test]
    fn teacher_corner_sits_at_its_anchor_offset() {
        let parts = emit(|b| desks_and_chairs(b, Vec3::zeros(), 0.0));
        let seat = parts.iter().find(|p| p.label == "teacher_chair/seat").unwrap();
        let top = parts.iter().find(|p| p.label == "teacher_desk/top").unwrap();

        assert_relative_eq!(center(seat), v(0.0, 0.0, 6.0), epsilon = 1e-6);
        assert_relative_eq!(center(top), v(0.0, 0.75, 5.0), epsilon = 1e-6);
    }

    #[test]
    fn lamp_shade_turns_with_the_angle() {
        let parts = emit(|b| lamp(b, Vec3::zeros(), 30.0));
        let shade = parts.iter().find(|p| p.label == "lamp/shade").unwrap();
        assert_relative_eq!(azimuth(shade), 30.0, epsilon = 1e-3);
    }
}
