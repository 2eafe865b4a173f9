//! # Configuration
//!
//! Startup options for the viewer.
//!
//! [`ViewerConfig`] is fixed for the lifetime of a window. It picks the navigation style, the
//! initial shading mode, the projection, and a few scene defaults. The live toggles edited
//! through the panel are in [`crate::controls`] and start from the values here.
//!
//! On desktop, [`ViewerConfig::from_env`] reads two environment variables:
//!
//! | Variable | Values |
//! |---|---|
//! | `CLASSROOM_NAVIGATION` | `free-fly` (default), `orbit` |
//! | `CLASSROOM_SHADING` | `lit` (default), `unlit` |
//!
//! Values that do not parse are logged as warnings and the default is kept.

use std::str::FromStr;

use crate::error::ConfigError;
use crate::math::{self, Mat4};
use crate::palette::{self, Rgb8};

pub const NAVIGATION_VAR: &str = "CLASSROOM_NAVIGATION";
pub const SHADING_VAR: &str = "CLASSROOM_SHADING";

/// How keyboard input moves the view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationMode {
    /// First-person camera walking through the room.
    #[default]
    FreeFly,
    /// Fixed camera; the arrow keys turn the room.
    Orbit,
}

impl FromStr for NavigationMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "free-fly" | "freefly" | "camera" => Ok(Self::FreeFly),
            "orbit" => Ok(Self::Orbit),
            _ => Err(ConfigError {
                setting: "navigation mode",
                value: value.to_owned(),
                expected: "free-fly, orbit",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadingMode {
    /// Per-vertex diffuse lighting.
    #[default]
    Lit,
    /// Instance colors are passed through untouched.
    Unlit,
}

impl ShadingMode {
    pub fn is_lit(self) -> bool {
        matches!(self, Self::Lit)
    }

    pub fn from_lit(lit: bool) -> Self {
        if lit {
            Self::Lit
        } else {
            Self::Unlit
        }
    }
}

impl FromStr for ShadingMode {
    type Err = ConfigError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "lit" | "on" => Ok(Self::Lit),
            "unlit" | "off" => Ok(Self::Unlit),
            _ => Err(ConfigError {
                setting: "shading mode",
                value: value.to_owned(),
                expected: "lit, unlit",
            }),
        }
    }
}

/// Perspective projection parameters. The aspect ratio comes from the surface each frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Projection {
    pub fn matrix(&self, aspect_ratio: f32) -> Mat4 {
        math::perspective(aspect_ratio, self.fov_y_degrees, self.near, self.far)
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self {
            fov_y_degrees: 50.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewerConfig {
    pub navigation: NavigationMode,
    pub shading: ShadingMode,
    pub projection: Projection,
    /// Whether the room shell starts visible.
    pub walls: bool,
    pub clear_color: Rgb8,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            navigation: NavigationMode::FreeFly,
            shading: ShadingMode::Lit,
            projection: Projection::default(),
            walls: true,
            clear_color: palette::SKY,
        }
    }
}

impl ViewerConfig {
    /// Outside view of the furniture: the room turns in front of a fixed, narrow camera.
    pub fn orbit() -> Self {
        Self {
            navigation: NavigationMode::Orbit,
            projection: Projection {
                fov_y_degrees: 30.0,
                near: 1.0,
                far: 100.0,
            },
            walls: false,
            ..Self::default()
        }
    }

    /// Starts from the preset matching `navigation` and applies `shading` on top.
    pub fn with_modes(navigation: NavigationMode, shading: ShadingMode) -> Self {
        let base = match navigation {
            NavigationMode::FreeFly => Self::default(),
            NavigationMode::Orbit => Self::orbit(),
        };
        Self { shading, ..base }
    }

    /// Reads the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Same as [`ViewerConfig::from_env`] with a custom variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let navigation = parse_or_default(NAVIGATION_VAR, lookup(NAVIGATION_VAR));
        let shading = parse_or_default(SHADING_VAR, lookup(SHADING_VAR));
        let config = Self::with_modes(navigation, shading);
        log::info!("Viewer configuration: {config:?}");
        config
    }
}

fn parse_or_default<T>(name: &str, value: Option<String>) -> T
where
    T: FromStr<Err = ConfigError> + Default,
{
    let Some(value) = value else {
        return T::default();
    };
    value.parse().unwrap_or_else(|error| {
        log::warn!("Ignoring {name}: {error}");
        T::default()
    })
}
