use std::sync::Arc;

use kinema_animation_core::{
    load_timeline_json, PropertyId, PropertyKey, Scene, SceneGraph, TimelineAnimation,
};
use kinema_state_machine_core::{
    parse_state_machine_json, Config, StateMachineData, StateMachineDefinition,
    StateMachineInstance,
};

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

fn rig() -> SceneGraph {
    let mut scene = SceneGraph::new();
    let root = scene.add_node("box", None).unwrap();
    let hip = scene.add_root_bone("hip", Some(root), 10.0).unwrap();
    scene.add_bone("thigh", Some(hip), 5.0).unwrap();
    scene
}

fn hip_y(scene: &SceneGraph) -> f32 {
    let hip = scene.find("hip").unwrap();
    scene.property(PropertyId::new(hip, PropertyKey::Y)).unwrap()
}

fn load(name: &str, scene: &SceneGraph) -> Arc<StateMachineDefinition> {
    let animations: Vec<Arc<TimelineAnimation>> =
        kinema_test_fixtures::state_machines::animation_jsons(name)
            .unwrap()
            .iter()
            .map(|json| Arc::new(load_timeline_json(json, scene).unwrap()))
            .collect();
    let json = kinema_test_fixtures::state_machines::json(name).unwrap();
    let data = parse_state_machine_json(&json).unwrap();
    Arc::new(StateMachineDefinition::build(&data, &animations).unwrap())
}

#[test]
fn every_machine_fixture_builds() {
    let scene = rig();
    for key in kinema_test_fixtures::state_machines::keys() {
        let def = load(&key, &scene);
        assert_eq!(def.name(), key);
        let typed: StateMachineData = kinema_test_fixtures::state_machines::load(&key).unwrap();
        assert_eq!(typed.layers.len(), def.layers().len());
    }
}

#[test]
fn locomotion_walks_runs_and_jumps() {
    let mut scene = rig();
    let mut smi = StateMachineInstance::new(load("locomotion", &scene), Config::default());

    smi.advance(0.0, &mut scene);
    assert_eq!(smi.state_changed_name_by_index(0), Some("idle"));

    smi.set_number("speed", 2.0).unwrap();
    smi.advance(0.1, &mut scene);
    assert_eq!(smi.state_changed_name_by_index(0), Some("walk"));
    smi.advance(0.2, &mut scene);
    assert!(smi.blend(0).is_none());
    assert!(approx(hip_y(&scene), 10.0, 1e-4));

    smi.set_number("speed", 6.0).unwrap();
    smi.advance(0.1, &mut scene);
    assert_eq!(smi.state_changed_name_by_index(0), Some("run"));
    smi.advance(0.3, &mut scene);
    assert!(smi.blend(0).is_none());
    assert!(approx(hip_y(&scene), 20.0, 1e-4));

    // Any-state trigger interrupts the run with an immediate switch.
    smi.fire_trigger("jump").unwrap();
    smi.advance(0.1, &mut scene);
    assert_eq!(smi.state_changed_name_by_index(0), Some("jump"));
    assert!(approx(hip_y(&scene), 0.0, 1e-4));

    smi.advance(0.25, &mut scene);
    assert_eq!(smi.state_changed_count(), 0);
    assert!(approx(hip_y(&scene), 25.0, 1e-4));

    // The jump's work area ends at 0.5s; the exit time lets it return to idle.
    smi.advance(0.25, &mut scene);
    assert_eq!(smi.state_changed_name_by_index(0), Some("idle"));
}
