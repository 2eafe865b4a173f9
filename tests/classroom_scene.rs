use approx::assert_relative_eq;
use classroom_core::furniture::FURNITURE_CUBOIDS;
use classroom_core::walls::WALL_CUBOIDS;
use classroom_core::{
    plan_frame, Controls, DrawInstance, Navigation, NavigationMode, Redraw, SceneBuilder,
    SceneParams, SceneState, ViewerConfig,
};
use nalgebra_glm as glm;
use winit::keyboard::KeyCode;

fn count(instances: &[DrawInstance], prefix: &str) -> usize {
    instances
        .iter()
        .filter(|i| i.label.starts_with(prefix))
        .count()
}

#[test]
fn full_classroom_has_every_assembly() {
    let instances = SceneState::new()
        .build(&SceneParams::default())
        .expect("scene builds");

    assert_eq!(instances.len(), 482);
    assert_eq!(instances.len(), FURNITURE_CUBOIDS + WALL_CUBOIDS);

    assert_eq!(count(&instances, "teacher_desk/"), 3);
    assert_eq!(count(&instances, "teacher_chair/"), 10);
    assert_eq!(count(&instances, "lamp/"), 4);
    assert_eq!(count(&instances, "chair/"), 40 * 6);
    assert_eq!(count(&instances, "desk/"), 40 * 5);
    assert_eq!(count(&instances, "wall/"), 25);
}

#[test]
fn teacher_corner_keeps_its_layout_offsets() {
    let instances = SceneState::new()
        .build(&SceneParams::default())
        .expect("scene builds");
    let center = |label: &str| {
        let instance = instances
            .iter()
            .find(|i| i.label == label)
            .expect("part is emitted");
        (instance.model * glm::vec4(0.0, 0.0, 0.0, 1.0)).xyz()
    };

    assert_relative_eq!(center("teacher_chair/seat"), glm::vec3(0.0, 0.0, 6.0), epsilon = 1e-6);
    assert_relative_eq!(center("teacher_desk/top"), glm::vec3(0.0, 0.75, 5.0), epsilon = 1e-6);
}

#[test]
fn walls_can_be_left_out() {
    let instances = SceneState::new()
        .build(&SceneParams {
            walls: false,
            ..SceneParams::default()
        })
        .expect("scene builds");

    assert_eq!(instances.len(), 457);
    assert_eq!(count(&instances, "wall/"), 0);
}

#[test]
fn emission_order_is_stable_across_frames() {
    let mut scene = SceneState::new();
    let params = SceneParams::default();
    let first = scene.build(&params).expect("scene builds");

    scene.tick(true);
    let second = scene.build(&params).expect("scene builds");

    let labels = |instances: &[DrawInstance]| -> Vec<&'static str> {
        instances.iter().map(|i| i.label).collect()
    };
    assert_eq!(labels(&first), labels(&second));

    let changed: Vec<_> = first
        .iter()
        .zip(&second)
        .filter(|(a, b)| a.model != b.model)
        .map(|(a, _)| a.label)
        .collect();
    assert_eq!(changed, ["lamp/shade"]);
}

#[test]
fn orbit_root_turns_the_whole_room() {
    let navigation = Navigation::new(NavigationMode::Orbit);
    let turned = SceneState::new()
        .build(&SceneParams {
            root: navigation.scene_root(),
            ..SceneParams::default()
        })
        .expect("scene builds");
    let plain = SceneState::new()
        .build(&SceneParams::default())
        .expect("scene builds");

    for (a, b) in turned.iter().zip(&plain) {
        assert_relative_eq!(a.model, navigation.scene_root() * b.model, epsilon = 1e-4);
    }
}

#[test]
fn builder_leaves_the_stack_balanced() {
    let mut builder = SceneBuilder::new(glm::Mat4::identity());
    classroom_core::furniture::desks_and_chairs(&mut builder, glm::vec3(0.0, 0.0, 0.0), 0.0)
        .expect("furniture emits");
    assert_eq!(builder.depth(), 0);
    assert_eq!(builder.finish().expect("balanced").len(), FURNITURE_CUBOIDS);
}

#[test]
fn walking_changes_only_the_view() {
    let config = ViewerConfig::default();
    let controls = Controls::new(&config);
    let mut navigation = Navigation::new(config.navigation);
    let mut scene = SceneState::new();

    let before = plan_frame(&mut scene, &navigation, &controls, &config, 1.5, Redraw::SceneEvent)
        .expect("plans");
    assert!(navigation.handle_key(KeyCode::KeyW));
    let after = plan_frame(&mut scene, &navigation, &controls, &config, 1.5, Redraw::SceneEvent)
        .expect("plans");

    assert_ne!(before.view, after.view);
    assert_eq!(before.draws, after.draws);
    assert_eq!(before.projection, after.projection);
}

#[test]
fn orbit_view_frames_all_the_furniture() {
    let config = ViewerConfig::orbit();
    let controls = Controls::new(&config);
    let navigation = Navigation::new(config.navigation);
    let plan = plan_frame(
        &mut SceneState::new(),
        &navigation,
        &controls,
        &config,
        16.0 / 9.0,
        Redraw::SceneEvent,
    )
    .expect("plans");

    assert_eq!(plan.draws.len(), FURNITURE_CUBOIDS);
    for draw in &plan.draws {
        let clip = plan.projection * plan.view * draw.model * glm::vec4(0.0, 0.0, 0.0, 1.0);
        assert!(clip.w > 0.0, "{} is behind the camera", draw.label);
        let ndc = clip.xyz() / clip.w;
        assert!(
            ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0 && (0.0..=1.0).contains(&ndc.z),
            "{} falls outside the view at {ndc:?}",
            draw.label
        );
    }
}
