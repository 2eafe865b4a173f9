//! Classroom colors, authored in the 0-255 range and normalized by [`Color::from`].
//!
//! [`Color::from`]: crate::cuboid::Color

pub type Rgb8 = [u8; 3];

pub const SKY: Rgb8 = [100, 150, 255];
pub const WOOD: Rgb8 = [139, 90, 43];
pub const LIGHT_WOOD: Rgb8 = [255, 165, 79];
pub const DARK_GREY: Rgb8 = [40, 40, 40];
pub const LIGHT_GREY: Rgb8 = [150, 150, 150];
pub const BLACK: Rgb8 = [0, 0, 0];
pub const WHITE: Rgb8 = [255, 255, 255];
pub const NAVY: Rgb8 = [0, 0, 80];

pub const WALL: Rgb8 = [225, 220, 200];
pub const FLOOR: Rgb8 = [110, 90, 70];
pub const CEILING: Rgb8 = [240, 240, 235];
pub const TRIM: Rgb8 = [90, 60, 35];
pub const LAMP_SHADE: Rgb8 = [220, 200, 60];
