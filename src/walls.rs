//! Room shell: floor, ceiling, four walls, and the whiteboard.
//!
//! The room spans x in `-12.5..12.5`, z in `-14.5..10.5`, and y from the floor at `-0.4` to
//! the ceiling at `5.6`. Openings are not cut out of anything: the door and window walls are
//! assembled from separate segments around the gaps, with trim pieces framing them.

use nalgebra_glm as glm;

use crate::cuboid::Cuboid;
use crate::error::SceneError;
use crate::palette::{CEILING, FLOOR, LIGHT_GREY, TRIM, WALL, WHITE};
use crate::scene::SceneBuilder;

pub const WALL_CUBOIDS: usize = 25;

/// Every wall piece as `(label, center, size, color)`.
type Piece = (&'static str, [f32; 3], [f32; 3], [u8; 3]);

const SHELL: [Piece; 4] = [
    ("wall/floor", [0.0, -0.45, -2.0], [25.0, 0.1, 25.0], FLOOR),
    ("wall/ceiling", [0.0, 5.65, -2.0], [25.0, 0.1, 25.0], CEILING),
    ("wall/back", [0.0, 2.6, -14.6], [25.4, 6.0, 0.2], WALL),
    ("wall/front", [0.0, 2.6, 10.6], [25.4, 6.0, 0.2], WALL),
];

const WHITEBOARD: [Piece; 6] = [
    ("wall/whiteboard", [0.0, 2.8, 10.47], [8.0, 2.5, 0.05], WHITE),
    ("wall/whiteboard_trim", [0.0, 4.1, 10.44], [8.2, 0.1, 0.08], TRIM),
    ("wall/whiteboard_trim", [0.0, 1.5, 10.44], [8.2, 0.1, 0.08], TRIM),
    ("wall/whiteboard_trim", [-4.05, 2.8, 10.44], [0.1, 2.7, 0.08], TRIM),
    ("wall/whiteboard_trim", [4.05, 2.8, 10.44], [0.1, 2.7, 0.08], TRIM),
    ("wall/marker_tray", [0.0, 1.45, 10.35], [3.0, 0.05, 0.25], LIGHT_GREY),
];

// Door opening: z in 6.5..8.5, floor to y = 3.6.
const DOOR_WALL: [Piece; 6] = [
    ("wall/door_side", [12.6, 2.6, -4.0], [0.2, 6.0, 21.0], WALL),
    ("wall/door_side", [12.6, 2.6, 9.5], [0.2, 6.0, 2.0], WALL),
    ("wall/door_lintel", [12.6, 4.6, 7.5], [0.2, 2.0, 2.0], WALL),
    ("wall/door_trim", [12.45, 1.6, 6.55], [0.15, 4.0, 0.1], TRIM),
    ("wall/door_trim", [12.45, 1.6, 8.45], [0.15, 4.0, 0.1], TRIM),
    ("wall/door_trim", [12.45, 3.65, 7.5], [0.15, 0.1, 2.0], TRIM),
];

// Window openings: z in -10..-6 and -2..2, y in 1.2..4.0.
const WINDOW_WALL: [Piece; 9] = [
    ("wall/window_side", [-12.6, 2.6, -12.25], [0.2, 6.0, 4.5], WALL),
    ("wall/window_side", [-12.6, 2.6, -4.0], [0.2, 6.0, 4.0], WALL),
    ("wall/window_side", [-12.6, 2.6, 6.25], [0.2, 6.0, 8.5], WALL),
    ("wall/window_below", [-12.6, 0.4, -8.0], [0.2, 1.6, 4.0], WALL),
    ("wall/window_below", [-12.6, 0.4, 0.0], [0.2, 1.6, 4.0], WALL),
    ("wall/window_above", [-12.6, 4.8, -8.0], [0.2, 1.6, 4.0], WALL),
    ("wall/window_above", [-12.6, 4.8, 0.0], [0.2, 1.6, 4.0], WALL),
    ("wall/window_sill", [-12.4, 1.2, -8.0], [0.3, 0.08, 4.2], TRIM),
    ("wall/window_sill", [-12.4, 1.2, 0.0], [0.3, 0.08, 4.2], TRIM),
];

pub fn classroom_walls(b: &mut SceneBuilder) -> Result<(), SceneError> {
    let pieces = SHELL
        .iter()
        .chain(&WHITEBOARD)
        .chain(&DOOR_WALL)
        .chain(&WINDOW_WALL);

    for &(label, center, size, color) in pieces {
        b.add_cuboid(Cuboid::new(
            label,
            glm::Vec3::from(center),
            glm::Vec3::from(size),
            color,
        ))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::{self, Mat4};

    fn pieces() -> Vec<Piece> {
        SHELL
            .iter()
            .chain(&WHITEBOARD)
            .chain(&DOOR_WALL)
            .chain(&WINDOW_WALL)
            .copied()
            .collect()
    }

    #[test]
    fn emits_every_piece() {
        let mut builder = SceneBuilder::new(Mat4::identity());
        classroom_walls(&mut builder).unwrap();
        let walls = builder.finish().unwrap();

        assert_eq!(walls.len(), WALL_CUBOIDS);
        assert!(walls.iter().all(|w| w.label.starts_with("wall/")));
    }

    #[test]
    fn side_wall_segments_cover_the_room_depth_apart_from_openings() {
        let covered = |label_prefix: &str| -> f32 {
            pieces()
                .iter()
                .filter(|(label, ..)| label.starts_with(label_prefix))
                .map(|(_, _, size, _)| size[2])
                .sum()
        };

        // 25 units of depth, minus one 2-unit door or two 4-unit windows.
        assert_eq!(covered("wall/door_side"), 23.0);
        assert_eq!(covered("wall/window_side"), 17.0);
    }

    #[test]
    fn pieces_stay_inside_the_shell() {
        let mut builder = SceneBuilder::new(Mat4::identity());
        classroom_walls(&mut builder).unwrap();

        for wall in builder.finish().unwrap() {
            let c = math::transform_point(&wall.model, &glm::vec3(0.0, 0.0, 0.0));
            assert!((-12.8..=12.8).contains(&c.x), "{}", wall.label);
            assert!((-0.5..=5.7).contains(&c.y), "{}", wall.label);
            assert!((-14.8..=10.8).contains(&c.z), "{}", wall.label);
        }
    }
}
