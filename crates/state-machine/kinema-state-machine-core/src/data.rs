//! Serializable state machine definition data.
//!
//! States, inputs and animations are referenced by name here. Building a
//! [`crate::StateMachineDefinition`] resolves every name to an index and
//! rejects anything dangling.
//!
//! ```json
//! {
//!   "name": "locomotion",
//!   "inputs": [{ "name": "speed", "type": "number", "default": 0 }],
//!   "layers": [{
//!     "name": "base",
//!     "states": [
//!       { "name": "entry", "type": "entry", "transitions": [{ "to": "idle" }] },
//!       { "name": "idle", "type": "animation", "animation": "idle",
//!         "transitions": [{ "to": "walk", "duration": 0.25,
//!           "conditions": [{ "input": "speed", "op": "greaterThan", "value": 1 }] }] },
//!       { "name": "walk", "type": "animation", "animation": "walk" },
//!       { "name": "exit", "type": "exit" }
//!     ]
//!   }]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::error::DefinitionError;
use crate::inputs::InputKind;

/// Literal used for input defaults and condition thresholds.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ValueData {
    Bool(bool),
    Number(f32),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct InputData {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: InputKind,
    #[serde(default)]
    pub default: Option<ValueData>,
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ConditionOp {
    Equal,
    NotEqual,
    LessThan,
    LessThanOrEqual,
    GreaterThan,
    GreaterThanOrEqual,
}

/// Guard on one input. Bool conditions default to `== true`, trigger
/// conditions take neither operator nor value.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ConditionData {
    pub input: String,
    #[serde(default)]
    pub op: Option<ConditionOp>,
    #[serde(default)]
    pub value: Option<ValueData>,
}

/// Minimum playback of the from-state before a transition may fire.
#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub enum ExitTime {
    Seconds(f32),
    /// Percent (0..=100 and beyond) of the from-animation's playable duration.
    Percentage(f32),
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransitionData {
    pub to: String,
    /// Cross-fade length in seconds; 0 switches immediately.
    #[serde(default)]
    pub duration: f32,
    #[serde(default)]
    pub exit_time: Option<ExitTime>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(default)]
    pub start_mix: f32,
    #[serde(default)]
    pub conditions: Vec<ConditionData>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum StateKindData {
    Entry,
    Exit,
    Any,
    Animation {
        #[serde(default)]
        animation: Option<String>,
    },
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StateData {
    pub name: String,
    #[serde(flatten)]
    pub kind: StateKindData,
    #[serde(default)]
    pub transitions: Vec<TransitionData>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LayerData {
    pub name: String,
    pub states: Vec<StateData>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct StateMachineData {
    pub name: String,
    #[serde(default)]
    pub inputs: Vec<InputData>,
    pub layers: Vec<LayerData>,
}

/// Parse a state machine document. Cross-references are checked by
/// [`crate::StateMachineDefinition::build`].
pub fn parse_state_machine_json(s: &str) -> Result<StateMachineData, DefinitionError> {
    Ok(serde_json::from_str(s)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tagged_states_and_conditions() {
        let data = parse_state_machine_json(
            r#"{
              "name": "m",
              "inputs": [
                { "name": "on", "type": "bool", "default": true },
                { "name": "speed", "type": "number" },
                { "name": "go", "type": "trigger" }
              ],
              "layers": [{
                "name": "base",
                "states": [
                  { "name": "entry", "type": "entry", "transitions": [{ "to": "a" }] },
                  { "name": "a", "type": "animation", "animation": "idle",
                    "transitions": [{ "to": "exit", "duration": 0.5, "startMix": 0.25,
                      "exitTime": { "percentage": 50 },
                      "conditions": [
                        { "input": "speed", "op": "greaterThanOrEqual", "value": 2 },
                        { "input": "go" }
                      ] }] },
                  { "name": "empty", "type": "animation" },
                  { "name": "exit", "type": "exit" }
                ]
              }]
            }"#,
        )
        .unwrap();

        assert_eq!(data.inputs[0].default, Some(ValueData::Bool(true)));
        assert_eq!(data.inputs[1].kind, InputKind::Number);
        let states = &data.layers[0].states;
        assert_eq!(states[0].kind, StateKindData::Entry);
        assert_eq!(
            states[1].kind,
            StateKindData::Animation {
                animation: Some("idle".into())
            }
        );
        assert_eq!(states[2].kind, StateKindData::Animation { animation: None });
        let t = &states[1].transitions[0];
        assert_eq!(t.exit_time, Some(ExitTime::Percentage(50.0)));
        assert_eq!(t.start_mix, 0.25);
        assert_eq!(t.conditions[0].op, Some(ConditionOp::GreaterThanOrEqual));
        assert_eq!(t.conditions[0].value, Some(ValueData::Number(2.0)));
        assert_eq!(t.conditions[1].op, None);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        assert!(matches!(
            parse_state_machine_json(r#"{ "name": "m" }"#),
            Err(DefinitionError::Parse(_))
        ));
    }
}
