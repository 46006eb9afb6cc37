mod common;

use common::*;
use kinema_state_machine_core::{Config, TriggerConsumption};

const JUMPER: &str = r#"{
  "name": "jumper",
  "inputs": [
    { "name": "jump", "type": "trigger" },
    { "name": "grounded", "type": "bool" }
  ],
  "layers": [{
    "name": "base",
    "states": [
      { "name": "entry", "type": "entry", "transitions": [{ "to": "a" }] },
      { "name": "a", "type": "animation", "animation": "a",
        "transitions": [
          { "to": "b", "conditions": [{ "input": "jump" }, { "input": "grounded" }] },
          { "to": "c", "conditions": [{ "input": "jump" }] }
        ] },
      { "name": "b", "type": "animation", "animation": "b",
        "transitions": [{ "to": "a", "conditions": [{ "input": "jump" }] }] },
      { "name": "c", "type": "animation", "animation": "c",
        "transitions": [{ "to": "a", "conditions": [{ "input": "jump" }] }] },
      { "name": "exit", "type": "exit" }
    ]
  }]
}"#;

fn jump_pending(smi: &kinema_state_machine_core::StateMachineInstance) -> bool {
    smi.input_by_name("jump")
        .and_then(|i| i.as_trigger())
        .map(|t| t.is_pending())
        .unwrap()
}

#[test]
fn trigger_fires_once_and_resets() {
    let mut scene = stage();
    let mut smi = instance(JUMPER, &scene);
    smi.set_bool("grounded", true).unwrap();
    smi.advance(0.0, &mut scene);
    assert_eq!(changed_names(&smi), ["a"]);

    // Double fire is still a single pending trigger.
    smi.fire_trigger("jump").unwrap();
    smi.fire_trigger("jump").unwrap();
    assert!(jump_pending(&smi));
    smi.advance(0.1, &mut scene);
    assert_eq!(changed_names(&smi), ["b"]);
    assert!(!jump_pending(&smi));

    // Not re-fired: stays on b.
    smi.advance(0.1, &mut scene);
    assert_eq!(smi.state_changed_count(), 0);
    assert_eq!(smi.current_state(0).unwrap().name, "b");
}

#[test]
fn unobserved_trigger_is_cleared_after_one_advance() {
    let mut scene = stage();
    let mut smi = instance(JUMPER, &scene);
    // While on entry only entry's transitions are evaluated.
    smi.fire_trigger("jump").unwrap();
    smi.advance(0.0, &mut scene);
    assert_eq!(changed_names(&smi), ["a"]);
    assert!(!jump_pending(&smi));
    smi.advance(0.1, &mut scene);
    assert_eq!(smi.state_changed_count(), 0);
}

#[test]
fn per_condition_policy_spends_trigger_on_failed_transition() {
    let mut scene = stage();
    let mut smi = instance(JUMPER, &scene);
    smi.advance(0.0, &mut scene);

    // a -> b sees the trigger, consumes it, then fails on `grounded`;
    // a -> c then finds no pending trigger.
    smi.fire_trigger("jump").unwrap();
    smi.advance(0.1, &mut scene);
    assert_eq!(smi.state_changed_count(), 0);
    assert_eq!(smi.current_state(0).unwrap().name, "a");
}

#[test]
fn per_transition_policy_keeps_trigger_for_later_transitions() {
    let mut scene = stage();
    let config = Config {
        trigger_consumption: TriggerConsumption::PerTransition,
        ..Config::default()
    };
    let mut smi = instance_with(JUMPER, &scene, config);
    smi.advance(0.0, &mut scene);

    smi.fire_trigger("jump").unwrap();
    smi.advance(0.1, &mut scene);
    assert_eq!(changed_names(&smi), ["c"]);
    assert!(!jump_pending(&smi));

    // c -> a consumes the next trigger once.
    smi.fire_trigger("jump").unwrap();
    smi.advance(0.1, &mut scene);
    assert_eq!(changed_names(&smi), ["a"]);
    smi.advance(0.1, &mut scene);
    assert_eq!(smi.state_changed_count(), 0);
}
