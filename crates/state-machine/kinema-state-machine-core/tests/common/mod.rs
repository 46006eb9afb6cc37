#![allow(dead_code)]

use std::sync::Arc;

use kinema_animation_core::{
    Interpolation, KeyFrameData, KeyedPropertyData, LoopMode, PropertyId, PropertyKey, Scene,
    SceneGraph, TimelineAnimation, TimelineAnimationData,
};
use kinema_state_machine_core::{
    parse_state_machine_json, Config, StateMachineDefinition, StateMachineInstance,
};

pub fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

/// Scene with a single node `box`.
pub fn stage() -> SceneGraph {
    let mut scene = SceneGraph::new();
    scene.add_node("box", None).unwrap();
    scene
}

pub fn box_x(scene: &SceneGraph) -> f32 {
    let id = scene.find("box").unwrap();
    scene.property(PropertyId::new(id, PropertyKey::X)).unwrap()
}

pub fn set_box_x(scene: &mut SceneGraph, value: f32) {
    let id = scene.find("box").unwrap();
    scene.set_property(PropertyId::new(id, PropertyKey::X), value);
}

/// One-second looping animation holding `box.x` at `value`.
pub fn constant(scene: &SceneGraph, name: &str, value: f32) -> Arc<TimelineAnimation> {
    let data = TimelineAnimationData {
        name: name.into(),
        fps: 10,
        duration: 10,
        speed: 1.0,
        loop_mode: LoopMode::Loop,
        work_area: None,
        keyed: vec![KeyedPropertyData {
            target: "box.x".into(),
            keyframes: vec![
                KeyFrameData {
                    frame: 0,
                    value,
                    interpolation: Interpolation::Linear,
                },
                KeyFrameData {
                    frame: 10,
                    value,
                    interpolation: Interpolation::Linear,
                },
            ],
        }],
    };
    Arc::new(TimelineAnimation::bind(&data, scene).unwrap())
}

/// Animations `a` (x = 10), `b` (x = 30) and `c` (x = 50).
pub fn abc(scene: &SceneGraph) -> Vec<Arc<TimelineAnimation>> {
    vec![
        constant(scene, "a", 10.0),
        constant(scene, "b", 30.0),
        constant(scene, "c", 50.0),
    ]
}

pub fn instance_with(json: &str, scene: &SceneGraph, config: Config) -> StateMachineInstance {
    let data = parse_state_machine_json(json).unwrap();
    let def = StateMachineDefinition::build(&data, &abc(scene)).unwrap();
    StateMachineInstance::new(Arc::new(def), config)
}

pub fn instance(json: &str, scene: &SceneGraph) -> StateMachineInstance {
    instance_with(json, scene, Config::default())
}

pub fn changed_names(smi: &StateMachineInstance) -> Vec<String> {
    (0..smi.state_changed_count())
        .map(|i| smi.state_changed_name_by_index(i).unwrap().to_string())
        .collect()
}
