//! Runtime evaluation of a state machine.
//!
//! Each layer holds either a settled state or one cross-fade `from -> to`
//! with a mix fraction. `advance(dt, scene)` runs, per layer:
//! 1. advance the animation instances already playing and the mix;
//! 2. evaluate transitions (entry's while on entry, otherwise any-state's
//!    then the current state's), firing at most one;
//! 3. apply the from-state at full weight and the to-state at `mix`;
//! and finally clears every trigger that is still pending.

use std::sync::Arc;

use kinema_animation_core::{AnimationInstance, Scene};
use log::{debug, trace};

use crate::config::{Config, TriggerConsumption};
use crate::data::ExitTime;
use crate::definition::{Layer, LayerState, StateKind, StateMachineDefinition, Transition};
use crate::error::{invariant_violation, InputError};
use crate::ids::{InputId, LayerId, StateId};
use crate::inputs::{InputSet, SmiInput, SmiInputMut};
use crate::outputs::StateChange;

/// State that is being faded out.
#[derive(Clone, Debug)]
struct Outgoing {
    state: StateId,
    instance: Option<AnimationInstance>,
}

#[derive(Clone, Debug)]
struct LayerRuntime {
    current: StateId,
    instance: Option<AnimationInstance>,
    from: Option<Outgoing>,
    mix: f32,
    blend_duration: f32,
    exited: bool,
}

impl LayerRuntime {
    fn new(layer: &Layer) -> Self {
        Self {
            current: layer.entry,
            instance: None,
            from: None,
            mix: 1.0,
            blend_duration: 0.0,
            exited: false,
        }
    }

    /// Advance playing instances and the blend. Returns whether anything is
    /// still moving on this layer.
    fn advance_playback(&mut self, dt: f32) -> bool {
        let mut alive = false;
        if let Some(inst) = self.instance.as_mut() {
            alive |= inst.advance(dt);
        }
        if let Some(from) = self.from.as_mut() {
            if let Some(inst) = from.instance.as_mut() {
                inst.advance(dt);
            }
            if self.blend_duration > 0.0 {
                self.mix = (self.mix + dt / self.blend_duration).min(1.0);
            } else {
                self.mix = 1.0;
            }
            if self.mix >= 1.0 {
                self.from = None;
            } else {
                alive = true;
            }
        }
        alive
    }

    fn exit_time_reached(&self, exit_time: Option<ExitTime>) -> bool {
        let (Some(exit_time), Some(inst)) = (exit_time, self.instance.as_ref()) else {
            return true;
        };
        let threshold = match exit_time {
            ExitTime::Seconds(s) => s,
            ExitTime::Percentage(p) => inst.animation().duration_seconds() * p / 100.0,
        };
        inst.elapsed() >= threshold
    }
}

pub struct StateMachineInstance {
    definition: Arc<StateMachineDefinition>,
    config: Config,
    inputs: InputSet,
    layers: Vec<LayerRuntime>,
    changes: Vec<StateChange>,
    /// Scratch list of trigger ids tested by the transition under evaluation.
    tested_triggers: Vec<InputId>,
}

impl StateMachineInstance {
    pub fn new(definition: Arc<StateMachineDefinition>, config: Config) -> Self {
        let inputs = InputSet::from_definitions(definition.inputs());
        let layers = definition.layers().iter().map(LayerRuntime::new).collect();
        let changes = Vec::with_capacity(config.change_log_capacity);
        debug!(
            "instantiated state machine '{}' ({:?} trigger consumption)",
            definition.name(),
            config.trigger_consumption
        );
        Self {
            definition,
            config,
            inputs,
            layers,
            changes,
            tested_triggers: Vec::new(),
        }
    }

    pub fn definition(&self) -> &Arc<StateMachineDefinition> {
        &self.definition
    }

    pub fn name(&self) -> &str {
        self.definition.name()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // ---- inputs ----

    pub fn inputs(&self) -> &InputSet {
        &self.inputs
    }

    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    pub fn input(&self, index: usize) -> Option<&SmiInput> {
        self.inputs.get_index(index).map(|(_, i)| i)
    }

    pub fn input_mut(&mut self, index: usize) -> Option<SmiInputMut<'_>> {
        self.inputs.get_index_mut(index).map(|(_, i)| i)
    }

    pub fn input_name(&self, index: usize) -> Option<&str> {
        self.inputs.get_index(index).map(|(n, _)| n)
    }

    pub fn input_by_name(&self, name: &str) -> Option<&SmiInput> {
        self.inputs.get(name)
    }

    pub fn input_by_name_mut(&mut self, name: &str) -> Option<SmiInputMut<'_>> {
        self.inputs.get_mut(name)
    }

    pub fn set_bool(&mut self, name: &str, value: bool) -> Result<(), InputError> {
        self.inputs.set_bool(name, value)
    }

    pub fn set_number(&mut self, name: &str, value: f32) -> Result<(), InputError> {
        self.inputs.set_number(name, value)
    }

    pub fn fire_trigger(&mut self, name: &str) -> Result<(), InputError> {
        self.inputs.fire(name)
    }

    // ---- change log ----

    /// Number of transitions fired by the last `advance`.
    pub fn state_changed_count(&self) -> usize {
        self.changes.len()
    }

    pub fn state_changes(&self) -> &[StateChange] {
        &self.changes
    }

    pub fn state_changed_by_index(&self, index: usize) -> Option<&LayerState> {
        let change = self.changes.get(index)?;
        self.definition
            .layer(change.layer.index())
            .and_then(|l| l.state(change.to))
    }

    /// Display name of the state entered by the `index`-th change.
    pub fn state_changed_name_by_index(&self, index: usize) -> Option<&str> {
        self.state_changed_by_index(index).map(LayerState::display_name)
    }

    // ---- layer observation ----

    pub fn layer_count(&self) -> usize {
        self.layers.len()
    }

    /// Active state of a layer (the to-state while blending).
    pub fn current_state(&self, layer: usize) -> Option<&LayerState> {
        let rt = self.layers.get(layer)?;
        self.definition.layer(layer)?.state(rt.current)
    }

    /// `(from, mix)` while a cross-fade is in progress.
    pub fn blend(&self, layer: usize) -> Option<(&LayerState, f32)> {
        let rt = self.layers.get(layer)?;
        let from = rt.from.as_ref()?;
        let state = self.definition.layer(layer)?.state(from.state)?;
        Some((state, rt.mix))
    }

    pub fn has_exited(&self, layer: usize) -> bool {
        self.layers.get(layer).map_or(false, |rt| rt.exited)
    }

    pub fn animation_instance(&self, layer: usize) -> Option<&AnimationInstance> {
        self.layers.get(layer)?.instance.as_ref()
    }

    /// Back to entry on every layer, inputs restored to their defaults.
    pub fn reset(&mut self) {
        for (rt, layer) in self.layers.iter_mut().zip(self.definition.layers()) {
            *rt = LayerRuntime::new(layer);
        }
        self.inputs.reset(self.definition.inputs());
        self.changes.clear();
    }

    /// Advance every layer by `dt` seconds and apply the pose to `scene`.
    /// Returns true while any layer is still blending or playing.
    pub fn advance(&mut self, dt: f32, scene: &mut dyn Scene) -> bool {
        self.changes.clear();
        let definition = Arc::clone(&self.definition);
        let mut keep_going = false;
        for (index, layer) in definition.layers().iter().enumerate() {
            keep_going |= self.advance_layer(LayerId::from(index), layer, dt, scene);
        }
        self.inputs.clear_triggers();
        trace!(
            "'{}' advanced {dt}s: {} state change(s), keep_going={keep_going}",
            definition.name(),
            self.changes.len()
        );
        keep_going
    }

    fn advance_layer(&mut self, id: LayerId, layer: &Layer, dt: f32, scene: &mut dyn Scene) -> bool {
        if self.layers[id.index()].exited {
            return false;
        }
        let mut alive = self.layers[id.index()].advance_playback(dt);

        let current = self.layers[id.index()].current;
        let current_state = layer
            .state(current)
            .unwrap_or_else(|| invariant_violation("active state is outside its layer"));

        let fired = if matches!(current_state.kind, StateKind::Entry) {
            self.find_transition(id, current, &current_state.transitions)
        } else {
            let any = layer
                .any
                .and_then(|a| layer.state(a))
                .map_or(&[][..], |s| s.transitions.as_slice());
            self.find_transition(id, current, any)
                .or_else(|| self.find_transition(id, current, &current_state.transitions))
        };

        if let Some(transition) = fired {
            let was_entry = matches!(current_state.kind, StateKind::Entry);
            let target = layer
                .state(transition.target)
                .unwrap_or_else(|| invariant_violation("transition target is outside its layer"));
            debug!(
                "layer '{}': '{}' -> '{}'",
                layer.name, current_state.name, target.name
            );
            self.changes.push(StateChange {
                layer: id,
                from: current,
                to: transition.target,
            });

            let rt = &mut self.layers[id.index()];
            if matches!(target.kind, StateKind::Exit) {
                rt.current = transition.target;
                rt.instance = None;
                rt.from = None;
                rt.mix = 1.0;
                rt.exited = true;
                return false;
            }

            let outgoing = Outgoing {
                state: current,
                instance: rt.instance.take(),
            };
            rt.current = transition.target;
            rt.instance = target
                .animation()
                .map(|anim| AnimationInstance::new(Arc::clone(anim)));
            if was_entry || transition.duration <= 0.0 {
                rt.from = None;
                rt.mix = 1.0;
                rt.blend_duration = 0.0;
            } else {
                rt.from = Some(outgoing);
                rt.mix = transition.start_mix;
                rt.blend_duration = transition.duration;
            }
            alive = rt.instance.is_some() || rt.from.is_some();
        }

        let rt = &self.layers[id.index()];
        if let Some(inst) = rt.from.as_ref().and_then(|f| f.instance.as_ref()) {
            inst.apply_with_mix(scene, 1.0);
        }
        if let Some(inst) = rt.instance.as_ref() {
            let mix = if rt.from.is_some() { rt.mix } else { 1.0 };
            inst.apply_with_mix(scene, mix);
        }
        alive
    }

    /// First transition in `transitions` that may fire from `current`.
    fn find_transition<'t>(
        &mut self,
        layer: LayerId,
        current: StateId,
        transitions: &'t [Transition],
    ) -> Option<&'t Transition> {
        let policy = self.config.trigger_consumption;
        for transition in transitions {
            if transition.disabled {
                continue;
            }
            self.tested_triggers.clear();
            let mut holds = true;
            for condition in &transition.conditions {
                if !condition.evaluate(&self.inputs) {
                    holds = false;
                    break;
                }
                if condition.is_trigger() {
                    match policy {
                        TriggerConsumption::PerCondition => self.consume(condition.input()),
                        TriggerConsumption::PerTransition => {
                            self.tested_triggers.push(condition.input())
                        }
                    }
                }
            }
            if !holds
                || transition.target == current
                || !self.layers[layer.index()].exit_time_reached(transition.exit_time)
            {
                continue;
            }
            for i in 0..self.tested_triggers.len() {
                let input = self.tested_triggers[i];
                self.consume(input);
            }
            return Some(transition);
        }
        None
    }

    fn consume(&mut self, input: InputId) {
        if let Some(trigger) = self.inputs.by_id_mut(input).and_then(SmiInput::as_trigger_mut) {
            trigger.consume();
        }
    }
}
