//! # Camera
//!
//! Keyboard navigation around the classroom.
//!
//! Two navigation styles are available, selected by [`NavigationMode`]:
//!
//! - **Free-fly** ([`FreeFlyCamera`]): a first-person camera that walks at a fixed eye height.
//!   Arrow keys turn and tilt the view, W/S walk along the view direction, A/D strafe.
//! - **Orbit** ([`OrbitView`]): the camera stays put and the arrow keys turn the whole room
//!   in front of it.
//!
//! Input arrives as discrete key presses. Each recognized key produces exactly one state
//! transition and asks for a redraw; every other key is ignored.
//!
//! # Known limitation
//!
//! The free-fly camera never re-orthonormalizes its basis. `up` stays at its initial value
//! and `side` is only recomputed when turning left or right, so long sequences of tilts
//! followed by turns slowly skew the basis. Looking straight up or down would make
//! `forward` parallel to `up` and leave `side` undefined.
//!
//! [`NavigationMode`]: crate::config::NavigationMode

use nalgebra_glm as glm;
use winit::keyboard::KeyCode;

use crate::config::NavigationMode;
use crate::math::{self, Mat4, Vec3};

/// The eight navigation keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CameraKey {
    RotateUp,
    RotateDown,
    RotateLeft,
    RotateRight,
    MoveForward,
    MoveBackward,
    StrafeLeft,
    StrafeRight,
}

impl CameraKey {
    /// Maps a physical key to a navigation action; `None` for keys the camera ignores.
    pub fn from_key_code(key: KeyCode) -> Option<Self> {
        match key {
            KeyCode::ArrowUp => Some(Self::RotateUp),
            KeyCode::ArrowDown => Some(Self::RotateDown),
            KeyCode::ArrowLeft => Some(Self::RotateLeft),
            KeyCode::ArrowRight => Some(Self::RotateRight),
            KeyCode::KeyW => Some(Self::MoveForward),
            KeyCode::KeyS => Some(Self::MoveBackward),
            KeyCode::KeyA => Some(Self::StrafeLeft),
            KeyCode::KeyD => Some(Self::StrafeRight),
            _ => None,
        }
    }
}

/// Height the free-fly camera is held at after every step.
pub const EYE_HEIGHT: f32 = 3.0;

/// Degrees turned or tilted per key press.
pub const ROTATION_STEP: f32 = 5.0;

pub const START_POSITION: [f32; 3] = [0.0, EYE_HEIGHT, -10.0];

/// Initial view direction. Its length is also the distance covered by one step.
pub const START_FORWARD: [f32; 3] = [0.0, 0.0, 0.6];

/// First-person camera state.
///
/// # Fields
///
/// - `position`: eye position in world units.
/// - `forward`: view direction; its length is the walking step.
/// - `up`: the fixed up axis used for turning and for the view matrix.
/// - `side`: `normalize(cross(forward, up))`, the axis used for tilting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FreeFlyCamera {
    pub position: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
    pub side: Vec3,
}

impl Default for FreeFlyCamera {
    fn default() -> Self {
        let forward = Vec3::from(START_FORWARD);
        let up = glm::vec3(0.0, 1.0, 0.0);
        Self {
            position: Vec3::from(START_POSITION),
            forward,
            up,
            side: forward.cross(&up).normalize(),
        }
    }
}

impl FreeFlyCamera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(&mut self, key: CameraKey) {
        match key {
            CameraKey::RotateDown => {
                self.forward = math::rotate_vector(&self.forward, &self.side, ROTATION_STEP);
            }
            CameraKey::RotateUp => {
                self.forward = math::rotate_vector(&self.forward, &self.side, -ROTATION_STEP);
            }
            CameraKey::RotateRight => self.turn(-ROTATION_STEP),
            CameraKey::RotateLeft => self.turn(ROTATION_STEP),
            CameraKey::MoveForward => self.step(self.forward),
            CameraKey::MoveBackward => self.step(-self.forward),
            CameraKey::StrafeLeft => {
                self.step(math::rotate_vector(&self.forward, &self.up, 90.0));
            }
            CameraKey::StrafeRight => {
                self.step(math::rotate_vector(&self.forward, &self.up, -90.0));
            }
        }
    }

    fn turn(&mut self, degrees: f32) {
        self.forward = math::rotate_vector(&self.forward, &self.up, degrees);
        self.side = self.forward.cross(&self.up).normalize();
    }

    fn step(&mut self, delta: Vec3) {
        self.position += delta;
        self.position.y = EYE_HEIGHT;
    }

    pub fn view_matrix(&self) -> Mat4 {
        math::look_at(&self.position, &(self.position + self.forward), &self.up)
    }
}

/// Degrees the room turns per arrow key press in orbit mode.
pub const ORBIT_STEP: f32 = 3.0;

/// Resting orientation of the room in orbit mode, in degrees about X and Y.
pub const ORBIT_BASE: [f32; 2] = [10.0, 120.0];

/// Orbit camera position. Far enough back that the turned furniture fits a 30° view.
pub const ORBIT_EYE: [f32; 3] = [0.0, 0.0, 40.0];
pub const ORBIT_TARGET: [f32; 3] = [0.0, 0.0, -100.0];

/// Fixed camera in front of a room that the arrow keys turn.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OrbitView {
    /// Extra degrees about X, kept in `-360..360`.
    pub x_angle: f32,
    /// Extra degrees about Y, kept in `-360..360`.
    pub y_angle: f32,
}

impl OrbitView {
    /// Applies an arrow key. Returns `false` for keys orbit mode does not use.
    pub fn apply(&mut self, key: CameraKey) -> bool {
        match key {
            CameraKey::RotateDown => self.x_angle = (self.x_angle + ORBIT_STEP) % 360.0,
            CameraKey::RotateUp => self.x_angle = (self.x_angle - ORBIT_STEP) % 360.0,
            CameraKey::RotateRight => self.y_angle = (self.y_angle + ORBIT_STEP) % 360.0,
            CameraKey::RotateLeft => self.y_angle = (self.y_angle - ORBIT_STEP) % 360.0,
            _ => return false,
        }
        true
    }

    /// The transform the whole room is placed under.
    pub fn scene_root(&self) -> Mat4 {
        let [base_x, base_y] = ORBIT_BASE;
        math::rotate_xyz(
            &Mat4::identity(),
            &glm::vec3(base_x + self.x_angle, base_y + self.y_angle, 0.0),
        )
    }

    pub fn view_matrix(&self) -> Mat4 {
        math::look_at(
            &Vec3::from(ORBIT_EYE),
            &Vec3::from(ORBIT_TARGET),
            &glm::vec3(0.0, 1.0, 0.0),
        )
    }
}

/// The active navigation style and its state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Navigation {
    FreeFly(FreeFlyCamera),
    Orbit(OrbitView),
}

impl Navigation {
    pub fn new(mode: NavigationMode) -> Self {
        match mode {
            NavigationMode::FreeFly => Self::FreeFly(FreeFlyCamera::new()),
            NavigationMode::Orbit => Self::Orbit(OrbitView::default()),
        }
    }

    /// Feeds one key press in. Returns `true` when the view changed and needs a redraw.
    pub fn handle_key(&mut self, key: KeyCode) -> bool {
        let Some(action) = CameraKey::from_key_code(key) else {
            return false;
        };
        let changed = match self {
            Self::FreeFly(camera) => {
                camera.apply(action);
                true
            }
            Self::Orbit(orbit) => orbit.apply(action),
        };
        if changed {
            log::trace!("{action:?} -> {:?}", self);
        }
        changed
    }

    pub fn view_matrix(&self) -> Mat4 {
        match self {
            Self::FreeFly(camera) => camera.view_matrix(),
            Self::Orbit(orbit) => orbit.view_matrix(),
        }
    }

    pub fn scene_root(&self) -> Mat4 {
        match self {
            Self::FreeFly(_) => Mat4::identity(),
            Self::Orbit(orbit) => orbit.scene_root(),
        }
    }
}
