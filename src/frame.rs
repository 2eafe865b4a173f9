//! # Frame planning
//!
//! Everything a redraw computes before the GPU is involved.
//!
//! [`plan_frame`] performs one redraw's worth of scene work, in order:
//!
//! 1. read the view matrix from the active navigation,
//! 2. advance the lamp animation once, when the redraw was caused by a scene event,
//! 3. build the scene under the navigation's root transform,
//! 4. derive every instance's normal matrix.
//!
//! The resulting [`FramePlan`] is handed to the renderer, which only uploads and draws it. A
//! singular model matrix fails the whole frame with [`SceneError::SingularModel`] instead of
//! drawing a cuboid with garbage lighting.

use web_time::Instant;

use crate::camera::Navigation;
use crate::config::{ShadingMode, ViewerConfig};
use crate::controls::Controls;
use crate::cuboid::Color;
use crate::error::SceneError;
use crate::lighting::Lighting;
use crate::math::{self, Mat4};
use crate::scene::{DrawInstance, SceneState};

/// One cuboid draw with its lighting transform.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawCall {
    pub label: &'static str,
    pub model: Mat4,
    pub normal: Mat4,
    pub color: Color,
}

impl DrawCall {
    /// Pairs an instance with `transpose(inverse(model))`.
    pub fn from_instance(index: usize, instance: &DrawInstance) -> Result<Self, SceneError> {
        let normal = math::normal_matrix(&instance.model).ok_or(SceneError::SingularModel {
            index,
            label: instance.label,
        })?;
        Ok(Self {
            label: instance.label,
            model: instance.model,
            normal,
            color: instance.color,
        })
    }
}

/// Why a redraw was requested.
///
/// Only scene events move the lamp. Repaints that egui asks for on its own, such as hover
/// highlights or the follow-up pass after a panel edit, redraw the same scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Redraw {
    /// Startup, a resize, a navigation key, or an edited panel value.
    SceneEvent,
    /// A repaint with no scene change.
    RepaintOnly,
}

/// A fully computed frame, ready for upload.
#[derive(Debug, Clone, PartialEq)]
pub struct FramePlan {
    pub view: Mat4,
    pub projection: Mat4,
    pub lighting: Lighting,
    pub shading: ShadingMode,
    pub draws: Vec<DrawCall>,
}

/// Computes one frame. The lamp ticks only when `redraw` is [`Redraw::SceneEvent`].
pub fn plan_frame(
    scene: &mut SceneState,
    navigation: &Navigation,
    controls: &Controls,
    config: &ViewerConfig,
    aspect_ratio: f32,
    redraw: Redraw,
) -> Result<FramePlan, SceneError> {
    let started = Instant::now();

    let view = navigation.view_matrix();
    if redraw == Redraw::SceneEvent {
        scene.tick(controls.spin);
    }
    let instances = scene.build(&controls.scene_params(navigation.scene_root()))?;
    let draws = instances
        .iter()
        .enumerate()
        .map(|(index, instance)| DrawCall::from_instance(index, instance))
        .collect::<Result<Vec<_>, _>>()?;

    log::debug!(
        "Planned {} draws in {:?} (lamp at {} degrees)",
        draws.len(),
        started.elapsed(),
        scene.lamp_angle()
    );

    Ok(FramePlan {
        view,
        projection: config.projection.matrix(aspect_ratio),
        lighting: controls.lighting(),
        shading: controls.shading(),
        draws,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NavigationMode;
    use crate::palette;
    use approx::assert_relative_eq;
    use nalgebra_glm as glm;

    fn plan(controls: &Controls) -> FramePlan {
        let config = ViewerConfig::default();
        plan_frame(
            &mut SceneState::new(),
            &Navigation::new(NavigationMode::FreeFly),
            controls,
            &config,
            16.0 / 9.0,
            Redraw::SceneEvent,
        )
        .unwrap()
    }

    #[test]
    fn every_draw_carries_a_matching_normal_matrix() {
        let frame = plan(&Controls::default());
        assert!(!frame.draws.is_empty());
        for draw in &frame.draws {
            let identity = draw.normal.transpose() * draw.model;
            assert_relative_eq!(identity, Mat4::identity(), epsilon = 1e-3);
        }
    }

    #[test]
    fn singular_models_fail_with_their_index() {
        let flat = DrawInstance {
            label: "flat",
            model: glm::scale(&Mat4::identity(), &glm::vec3(1.0, 0.0, 1.0)),
            color: palette::WHITE.into(),
        };
        assert_eq!(
            DrawCall::from_instance(7, &flat),
            Err(SceneError::SingularModel {
                index: 7,
                label: "flat"
            })
        );
    }

    #[test]
    fn each_scene_event_ticks_the_lamp_once() {
        let controls = Controls {
            spin: true,
            ..Controls::default()
        };
        let config = ViewerConfig::default();
        let navigation = Navigation::new(NavigationMode::FreeFly);
        let mut scene = SceneState::new();

        for _ in 0..3 {
            plan_frame(&mut scene, &navigation, &controls, &config, 1.0, Redraw::SceneEvent)
                .unwrap();
        }
        assert_eq!(scene.lamp_angle(), 30.0);
    }

    #[test]
    fn repaints_leave_the_lamp_where_it_is() {
        let controls = Controls {
            spin: true,
            ..Controls::default()
        };
        let config = ViewerConfig::default();
        let navigation = Navigation::new(NavigationMode::FreeFly);
        let mut scene = SceneState::new();

        let moved =
            plan_frame(&mut scene, &navigation, &controls, &config, 1.0, Redraw::SceneEvent)
                .unwrap();
        let hover =
            plan_frame(&mut scene, &navigation, &controls, &config, 1.0, Redraw::RepaintOnly)
                .unwrap();
        let follow_up =
            plan_frame(&mut scene, &navigation, &controls, &config, 1.0, Redraw::RepaintOnly)
                .unwrap();

        assert_eq!(scene.lamp_angle(), 10.0);
        assert_eq!(moved, hover);
        assert_eq!(hover, follow_up);
    }

    #[test]
    fn panel_state_flows_into_the_plan() {
        let with_walls = plan(&Controls::default());
        let without = plan(&Controls {
            walls: false,
            lighting: false,
            ..Controls::default()
        });

        assert_eq!(with_walls.draws.len() - without.draws.len(), 25);
        assert_eq!(without.shading, ShadingMode::Unlit);
        assert_eq!(with_walls.shading, ShadingMode::Lit);
    }
}
