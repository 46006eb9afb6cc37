//! Immutable state machine definitions.
//!
//! [`StateMachineDefinition::build`] turns name-based [`StateMachineData`]
//! into an index-based graph and performs every validation up front:
//! - inputs are unique, defaults match their type;
//! - each layer has exactly one entry, at least one exit, at most one any
//!   state, and unique state names;
//! - transitions target existing states, never entry or any, and exits have
//!   no outgoing transitions;
//! - conditions reference declared inputs with a matching type and operator;
//! - animation states reference animations that were supplied.
//!
//! Instances share the result through an `Arc` and never mutate it.

use std::sync::Arc;

use hashbrown::HashMap;
use kinema_animation_core::TimelineAnimation;
use log::debug;

use crate::conditions::{compile, Condition};
use crate::data::{ExitTime, InputData, LayerData, StateKindData, StateMachineData, TransitionData, ValueData};
use crate::error::DefinitionError;
use crate::ids::{InputId, StateId};
use crate::inputs::{InputDefinition, InputKind};

#[derive(Clone, Debug)]
pub enum StateKind {
    Entry,
    Exit,
    Any,
    /// An animation state may be empty; it then applies nothing.
    Animation(Option<Arc<TimelineAnimation>>),
}

#[derive(Clone, Debug)]
pub struct Transition {
    pub target: StateId,
    pub duration: f32,
    pub exit_time: Option<ExitTime>,
    pub disabled: bool,
    pub start_mix: f32,
    pub conditions: Vec<Condition>,
}

#[derive(Clone, Debug)]
pub struct LayerState {
    pub name: String,
    pub kind: StateKind,
    pub transitions: Vec<Transition>,
}

impl LayerState {
    /// Name reported by the change log: `"entry"`, `"exit"`, `"any"`, the
    /// animation's name, or `"unknown"` for an animation state without one.
    pub fn display_name(&self) -> &str {
        match &self.kind {
            StateKind::Entry => "entry",
            StateKind::Exit => "exit",
            StateKind::Any => "any",
            StateKind::Animation(Some(anim)) => anim.name(),
            StateKind::Animation(None) => "unknown",
        }
    }

    pub fn animation(&self) -> Option<&Arc<TimelineAnimation>> {
        match &self.kind {
            StateKind::Animation(anim) => anim.as_ref(),
            _ => None,
        }
    }
}

#[derive(Clone, Debug)]
pub struct Layer {
    pub name: String,
    pub states: Vec<LayerState>,
    pub entry: StateId,
    pub any: Option<StateId>,
}

impl Layer {
    pub fn state(&self, id: StateId) -> Option<&LayerState> {
        self.states.get(id.index())
    }

    pub fn state_by_name(&self, name: &str) -> Option<StateId> {
        self.states
            .iter()
            .position(|s| s.name == name)
            .map(StateId::from)
    }
}

#[derive(Clone, Debug)]
pub struct StateMachineDefinition {
    name: String,
    inputs: Vec<InputDefinition>,
    layers: Vec<Layer>,
}

impl StateMachineDefinition {
    /// Validate `data` and resolve animation names against `animations`.
    pub fn build(
        data: &StateMachineData,
        animations: &[Arc<TimelineAnimation>],
    ) -> Result<Self, DefinitionError> {
        let inputs = build_inputs(&data.inputs)?;
        // Name indices borrow `inputs`; they must be gone before it moves.
        let layers = {
            let input_ids: HashMap<&str, (InputId, InputKind)> = inputs
                .iter()
                .enumerate()
                .map(|(i, d)| (d.name.as_str(), (InputId::from(i), d.kind)))
                .collect();
            let animations: HashMap<&str, &Arc<TimelineAnimation>> =
                animations.iter().map(|a| (a.name(), a)).collect();
            data.layers
                .iter()
                .map(|layer| build_layer(layer, &input_ids, &animations))
                .collect::<Result<Vec<_>, _>>()?
        };

        debug!(
            "built state machine '{}' ({} inputs, {} layers)",
            data.name,
            inputs.len(),
            layers.len()
        );
        Ok(Self {
            name: data.name.clone(),
            inputs,
            layers,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn inputs(&self) -> &[InputDefinition] {
        &self.inputs
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }
}

fn build_inputs(data: &[InputData]) -> Result<Vec<InputDefinition>, DefinitionError> {
    let mut out: Vec<InputDefinition> = Vec::with_capacity(data.len());
    for input in data {
        if out.iter().any(|d| d.name == input.name) {
            return Err(DefinitionError::DuplicateInput {
                name: input.name.clone(),
            });
        }
        let invalid = || DefinitionError::InvalidDefault {
            input: input.name.clone(),
            kind: input.kind,
        };
        let def = match (input.kind, input.default) {
            (InputKind::Bool, None) => InputDefinition::boolean(&input.name, false),
            (InputKind::Bool, Some(ValueData::Bool(v))) => InputDefinition::boolean(&input.name, v),
            (InputKind::Number, None) => InputDefinition::number(&input.name, 0.0),
            (InputKind::Number, Some(ValueData::Number(v))) if v.is_finite() => {
                InputDefinition::number(&input.name, v)
            }
            (InputKind::Trigger, None) => InputDefinition::trigger(&input.name),
            _ => return Err(invalid()),
        };
        out.push(def);
    }
    Ok(out)
}

fn build_layer(
    data: &LayerData,
    inputs: &HashMap<&str, (InputId, InputKind)>,
    animations: &HashMap<&str, &Arc<TimelineAnimation>>,
) -> Result<Layer, DefinitionError> {
    let layer_name = || data.name.clone();

    // Pass 1: state names and special states.
    let mut ids: HashMap<&str, StateId> = HashMap::with_capacity(data.states.len());
    let mut entry = None;
    let mut any = None;
    let mut has_exit = false;
    for (i, state) in data.states.iter().enumerate() {
        if ids.insert(state.name.as_str(), StateId::from(i)).is_some() {
            return Err(DefinitionError::DuplicateState {
                layer: layer_name(),
                name: state.name.clone(),
            });
        }
        match state.kind {
            StateKindData::Entry => {
                if entry.replace(StateId::from(i)).is_some() {
                    return Err(DefinitionError::DuplicateEntry { layer: layer_name() });
                }
            }
            StateKindData::Any => {
                if any.replace(StateId::from(i)).is_some() {
                    return Err(DefinitionError::DuplicateAny { layer: layer_name() });
                }
            }
            StateKindData::Exit => {
                if !state.transitions.is_empty() {
                    return Err(DefinitionError::ExitHasTransitions {
                        layer: layer_name(),
                        state: state.name.clone(),
                    });
                }
                has_exit = true;
            }
            StateKindData::Animation { .. } => {}
        }
    }
    let entry = entry.ok_or_else(|| DefinitionError::MissingEntry { layer: layer_name() })?;
    if !has_exit {
        return Err(DefinitionError::MissingExit { layer: layer_name() });
    }

    // Pass 2: resolve animations, transitions and conditions.
    let mut states = Vec::with_capacity(data.states.len());
    for state in &data.states {
        let kind = match &state.kind {
            StateKindData::Entry => StateKind::Entry,
            StateKindData::Exit => StateKind::Exit,
            StateKindData::Any => StateKind::Any,
            StateKindData::Animation { animation: None } => StateKind::Animation(None),
            StateKindData::Animation {
                animation: Some(name),
            } => {
                let anim = animations.get(name.as_str()).ok_or_else(|| {
                    DefinitionError::UnknownAnimation {
                        layer: layer_name(),
                        state: state.name.clone(),
                        animation: name.clone(),
                    }
                })?;
                StateKind::Animation(Some(Arc::clone(anim)))
            }
        };
        let transitions = state
            .transitions
            .iter()
            .map(|t| build_transition(data, &state.name, t, &ids, inputs))
            .collect::<Result<Vec<_>, _>>()?;
        states.push(LayerState {
            name: state.name.clone(),
            kind,
            transitions,
        });
    }

    Ok(Layer {
        name: data.name.clone(),
        states,
        entry,
        any,
    })
}

fn build_transition(
    layer: &LayerData,
    from: &str,
    data: &TransitionData,
    ids: &HashMap<&str, StateId>,
    inputs: &HashMap<&str, (InputId, InputKind)>,
) -> Result<Transition, DefinitionError> {
    let target = *ids
        .get(data.to.as_str())
        .ok_or_else(|| DefinitionError::UnknownState {
            layer: layer.name.clone(),
            from: from.to_string(),
            target: data.to.clone(),
        })?;
    if matches!(
        layer.states[target.index()].kind,
        StateKindData::Entry | StateKindData::Any
    ) {
        return Err(DefinitionError::InvalidTransitionTarget {
            layer: layer.name.clone(),
            from: from.to_string(),
            target: data.to.clone(),
        });
    }

    let invalid = |reason: String| DefinitionError::InvalidTransition {
        layer: layer.name.clone(),
        from: from.to_string(),
        reason,
    };
    if !data.duration.is_finite() || data.duration < 0.0 {
        return Err(invalid(format!("duration {} must be >= 0", data.duration)));
    }
    if !(0.0..=1.0).contains(&data.start_mix) {
        return Err(invalid(format!("start mix {} outside [0, 1]", data.start_mix)));
    }
    if let Some(ExitTime::Seconds(v) | ExitTime::Percentage(v)) = data.exit_time {
        if !v.is_finite() || v < 0.0 {
            return Err(invalid(format!("exit time {v} must be >= 0")));
        }
    }

    let conditions = data
        .conditions
        .iter()
        .map(|c| {
            let (id, kind) = inputs.get(c.input.as_str()).copied().ok_or_else(|| {
                DefinitionError::UnknownInput {
                    layer: layer.name.clone(),
                    state: from.to_string(),
                    input: c.input.clone(),
                }
            })?;
            compile(c, id, kind)
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Transition {
        target,
        duration: data.duration,
        exit_time: data.exit_time,
        disabled: data.disabled,
        start_mix: data.start_mix,
        conditions,
    })
}
