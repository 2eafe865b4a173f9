//! Live toggles edited from the side panel and read once per frame.

use crate::config::{ShadingMode, ViewerConfig};
use crate::lighting::Lighting;
use crate::math::Mat4;
use crate::scene::SceneParams;

pub const LIFT_RANGE: std::ops::RangeInclusive<f32> = 0.0..=100.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Controls {
    pub key_light: bool,
    pub fill_light: bool,
    pub point_light: bool,
    /// Furniture height, `0..=100`; 100 raises it one world unit.
    pub lift: f32,
    /// Turns the lamp shade a step on every scene event while set.
    pub spin: bool,
    /// `false` draws flat instance colors.
    pub lighting: bool,
    pub walls: bool,
}

impl Default for Controls {
    fn default() -> Self {
        Self::new(&ViewerConfig::default())
    }
}

impl Controls {
    pub fn new(config: &ViewerConfig) -> Self {
        Self {
            key_light: true,
            fill_light: false,
            point_light: false,
            lift: 0.0,
            spin: false,
            lighting: config.shading.is_lit(),
            walls: config.walls,
        }
    }

    pub fn lighting(&self) -> Lighting {
        Lighting::from_toggles(self.key_light, self.fill_light, self.point_light)
    }

    pub fn shading(&self) -> ShadingMode {
        ShadingMode::from_lit(self.lighting)
    }

    pub fn scene_params(&self, root: Mat4) -> SceneParams {
        SceneParams {
            root,
            lift: self.lift.clamp(*LIFT_RANGE.start(), *LIFT_RANGE.end()),
            walls: self.walls,
        }
    }

    /// Draws the panel contents. Returns `true` when any value was edited.
    pub fn show(&mut self, ui: &mut egui::Ui) -> bool {
        let before = *self;

        ui.heading("Lights");
        ui.checkbox(&mut self.lighting, "Lighting");
        ui.add_enabled_ui(self.lighting, |ui| {
            ui.checkbox(&mut self.key_light, "Key light");
            ui.checkbox(&mut self.fill_light, "Fill light");
            ui.checkbox(&mut self.point_light, "Ceiling light");
        });

        ui.separator();
        ui.heading("Scene");
        ui.add(egui::Slider::new(&mut self.lift, LIFT_RANGE).text("Lift"));
        ui.checkbox(&mut self.spin, "Spin lamp");
        ui.checkbox(&mut self.walls, "Walls");

        ui.separator();
        ui.label("Arrows look, W/S walk, A/D strafe, Esc quits");

        *self != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_from_the_config() {
        let controls = Controls::new(&ViewerConfig {
            shading: ShadingMode::Unlit,
            ..ViewerConfig::orbit()
        });
        assert!(!controls.lighting);
        assert!(!controls.walls);
        assert_eq!(controls.shading(), ShadingMode::Unlit);
    }

    #[test]
    fn lift_is_clamped_into_range() {
        let controls = Controls {
            lift: 250.0,
            ..Controls::default()
        };
        assert_eq!(controls.scene_params(Mat4::identity()).lift, 100.0);
    }

    #[test]
    fn toggles_reach_the_light_colors() {
        let controls = Controls {
            key_light: false,
            point_light: true,
            ..Controls::default()
        };
        let lighting = controls.lighting();
        assert_eq!(lighting.directional[0].color.x, 0.0);
        assert!(lighting.point.color.x > 0.0);
    }
}
