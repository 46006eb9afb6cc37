//! Typed state machine inputs.
//!
//! Definitions declare inputs once; every instance owns an [`InputSet`] with
//! one [`SmiInput`] per definition, in declaration order and addressable by
//! name. Triggers are one-shot: `fire` marks them pending and the owning
//! instance clears them at the end of the next advance.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::InputError;
use crate::ids::InputId;

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum InputKind {
    Bool,
    Number,
    Trigger,
}

impl InputKind {
    /// Stable numeric type key exposed to hosts.
    pub fn type_key(self) -> u16 {
        match self {
            InputKind::Number => 56,
            InputKind::Trigger => 58,
            InputKind::Bool => 59,
        }
    }

    pub fn from_type_key(key: u16) -> Option<Self> {
        match key {
            56 => Some(InputKind::Number),
            58 => Some(InputKind::Trigger),
            59 => Some(InputKind::Bool),
            _ => None,
        }
    }
}

/// Declared input with its initial value. Triggers start not pending.
#[derive(Clone, Debug, PartialEq)]
pub struct InputDefinition {
    pub name: String,
    pub kind: InputKind,
    pub default_bool: bool,
    pub default_number: f32,
}

impl InputDefinition {
    pub fn boolean(name: impl Into<String>, default: bool) -> Self {
        Self {
            name: name.into(),
            kind: InputKind::Bool,
            default_bool: default,
            default_number: 0.0,
        }
    }

    pub fn number(name: impl Into<String>, default: f32) -> Self {
        Self {
            name: name.into(),
            kind: InputKind::Number,
            default_bool: false,
            default_number: default,
        }
    }

    pub fn trigger(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: InputKind::Trigger,
            default_bool: false,
            default_number: 0.0,
        }
    }

    fn instantiate(&self) -> SmiInput {
        match self.kind {
            InputKind::Bool => SmiInput::Bool(SmiBool {
                value: self.default_bool,
            }),
            InputKind::Number => SmiInput::Number(SmiNumber {
                value: self.default_number,
            }),
            InputKind::Trigger => SmiInput::Trigger(SmiTrigger { pending: false }),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SmiBool {
    value: bool,
}

impl SmiBool {
    pub fn value(&self) -> bool {
        self.value
    }

    pub fn set_value(&mut self, value: bool) {
        self.value = value;
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SmiNumber {
    value: f32,
}

impl SmiNumber {
    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn set_value(&mut self, value: f32) {
        self.value = value;
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SmiTrigger {
    pending: bool,
}

impl SmiTrigger {
    /// Mark pending. Firing an already pending trigger changes nothing.
    pub fn fire(&mut self) {
        self.pending = true;
    }

    pub fn is_pending(&self) -> bool {
        self.pending
    }

    pub(crate) fn consume(&mut self) {
        self.pending = false;
    }
}

/// Runtime value of one input.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SmiInput {
    Bool(SmiBool),
    Number(SmiNumber),
    Trigger(SmiTrigger),
}

impl SmiInput {
    pub fn kind(&self) -> InputKind {
        match self {
            SmiInput::Bool(_) => InputKind::Bool,
            SmiInput::Number(_) => InputKind::Number,
            SmiInput::Trigger(_) => InputKind::Trigger,
        }
    }

    pub fn as_bool(&self) -> Option<&SmiBool> {
        match self {
            SmiInput::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_bool_mut(&mut self) -> Option<&mut SmiBool> {
        match self {
            SmiInput::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<&SmiNumber> {
        match self {
            SmiInput::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_number_mut(&mut self) -> Option<&mut SmiNumber> {
        match self {
            SmiInput::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_trigger(&self) -> Option<&SmiTrigger> {
        match self {
            SmiInput::Trigger(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_trigger_mut(&mut self) -> Option<&mut SmiTrigger> {
        match self {
            SmiInput::Trigger(t) => Some(t),
            _ => None,
        }
    }
}

/// Mutable view of one input. Values can change, the kind cannot:
///
/// ```compile_fail
/// use kinema_state_machine_core::{SmiInput, StateMachineInstance};
///
/// fn overwrite(smi: &mut StateMachineInstance, value: SmiInput) {
///     *smi.input_by_name_mut("on").unwrap() = value;
/// }
/// ```
#[derive(Debug)]
pub enum SmiInputMut<'a> {
    Bool(&'a mut SmiBool),
    Number(&'a mut SmiNumber),
    Trigger(&'a mut SmiTrigger),
}

impl<'a> SmiInputMut<'a> {
    fn new(input: &'a mut SmiInput) -> Self {
        match input {
            SmiInput::Bool(b) => SmiInputMut::Bool(b),
            SmiInput::Number(n) => SmiInputMut::Number(n),
            SmiInput::Trigger(t) => SmiInputMut::Trigger(t),
        }
    }

    pub fn kind(&self) -> InputKind {
        match self {
            SmiInputMut::Bool(_) => InputKind::Bool,
            SmiInputMut::Number(_) => InputKind::Number,
            SmiInputMut::Trigger(_) => InputKind::Trigger,
        }
    }

    pub fn as_bool_mut(self) -> Option<&'a mut SmiBool> {
        match self {
            SmiInputMut::Bool(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_number_mut(self) -> Option<&'a mut SmiNumber> {
        match self {
            SmiInputMut::Number(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_trigger_mut(self) -> Option<&'a mut SmiTrigger> {
        match self {
            SmiInputMut::Trigger(t) => Some(t),
            _ => None,
        }
    }
}

/// Inputs of one instance, in declaration order.
#[derive(Clone, Debug, Default)]
pub struct InputSet {
    inputs: IndexMap<String, SmiInput>,
}

impl InputSet {
    pub(crate) fn from_definitions(definitions: &[InputDefinition]) -> Self {
        Self {
            inputs: definitions
                .iter()
                .map(|d| (d.name.clone(), d.instantiate()))
                .collect(),
        }
    }

    /// Restore every input to its declared default.
    pub(crate) fn reset(&mut self, definitions: &[InputDefinition]) {
        for def in definitions {
            if let Some(slot) = self.inputs.get_mut(&def.name) {
                *slot = def.instantiate();
            }
        }
    }

    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &SmiInput)> {
        self.inputs.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn get_index(&self, index: usize) -> Option<(&str, &SmiInput)> {
        self.inputs.get_index(index).map(|(k, v)| (k.as_str(), v))
    }

    pub fn get_index_mut(&mut self, index: usize) -> Option<(&str, SmiInputMut<'_>)> {
        self.inputs
            .get_index_mut(index)
            .map(|(k, v)| (k.as_str(), SmiInputMut::new(v)))
    }

    pub fn get(&self, name: &str) -> Option<&SmiInput> {
        self.inputs.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<SmiInputMut<'_>> {
        self.inputs.get_mut(name).map(SmiInputMut::new)
    }

    pub fn id_of(&self, name: &str) -> Option<InputId> {
        self.inputs.get_index_of(name).map(InputId::from)
    }

    pub(crate) fn by_id(&self, id: InputId) -> Option<&SmiInput> {
        self.inputs.get_index(id.index()).map(|(_, v)| v)
    }

    pub(crate) fn by_id_mut(&mut self, id: InputId) -> Option<&mut SmiInput> {
        self.inputs.get_index_mut(id.index()).map(|(_, v)| v)
    }

    fn typed_mut(&mut self, name: &str, expected: InputKind) -> Result<&mut SmiInput, InputError> {
        let input = self
            .inputs
            .get_mut(name)
            .ok_or_else(|| InputError::UnknownInput(name.to_string()))?;
        if input.kind() != expected {
            return Err(InputError::TypeMismatch {
                name: name.to_string(),
                expected,
                actual: input.kind(),
            });
        }
        Ok(input)
    }

    pub fn set_bool(&mut self, name: &str, value: bool) -> Result<(), InputError> {
        if let Some(b) = self.typed_mut(name, InputKind::Bool)?.as_bool_mut() {
            b.set_value(value);
        }
        Ok(())
    }

    pub fn set_number(&mut self, name: &str, value: f32) -> Result<(), InputError> {
        if let Some(n) = self.typed_mut(name, InputKind::Number)?.as_number_mut() {
            n.set_value(value);
        }
        Ok(())
    }

    pub fn fire(&mut self, name: &str) -> Result<(), InputError> {
        if let Some(t) = self.typed_mut(name, InputKind::Trigger)?.as_trigger_mut() {
            t.fire();
        }
        Ok(())
    }

    /// Drop every pending trigger.
    pub(crate) fn clear_triggers(&mut self) {
        for input in self.inputs.values_mut() {
            if let SmiInput::Trigger(t) = input {
                t.consume();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set() -> InputSet {
        InputSet::from_definitions(&[
            InputDefinition::boolean("run", true),
            InputDefinition::number("speed", 2.5),
            InputDefinition::trigger("jump"),
        ])
    }

    #[test]
    fn type_keys_round_trip() {
        for kind in [InputKind::Bool, InputKind::Number, InputKind::Trigger] {
            assert_eq!(InputKind::from_type_key(kind.type_key()), Some(kind));
        }
        assert_eq!(InputKind::Bool.type_key(), 59);
        assert_eq!(InputKind::from_type_key(57), None);
    }

    #[test]
    fn declaration_order_and_defaults_are_kept() {
        let inputs = set();
        let names: Vec<_> = inputs.iter().map(|(n, _)| n).collect();
        assert_eq!(names, ["run", "speed", "jump"]);
        assert_eq!(inputs.get("run").and_then(|i| i.as_bool()).map(|b| b.value()), Some(true));
        assert_eq!(
            inputs.get_index(1).and_then(|(_, i)| i.as_number()).map(|n| n.value()),
            Some(2.5)
        );
        assert_eq!(inputs.id_of("jump"), Some(InputId(2)));
    }

    #[test]
    fn typed_views_return_none_on_mismatch() {
        let inputs = set();
        let speed = inputs.get("speed").unwrap();
        assert!(speed.as_bool().is_none());
        assert!(speed.as_trigger().is_none());
        assert!(speed.as_number().is_some());
    }

    #[test]
    fn setters_report_unknown_and_mismatched_inputs() {
        let mut inputs = set();
        assert_eq!(
            inputs.set_bool("missing", true),
            Err(InputError::UnknownInput("missing".into()))
        );
        assert!(matches!(
            inputs.set_number("run", 1.0),
            Err(InputError::TypeMismatch {
                expected: InputKind::Number,
                actual: InputKind::Bool,
                ..
            })
        ));
        inputs.set_number("speed", 7.0).unwrap();
        assert_eq!(inputs.get("speed").unwrap().as_number().unwrap().value(), 7.0);
    }

    #[test]
    fn double_fire_is_a_single_pending_trigger() {
        let mut inputs = set();
        inputs.fire("jump").unwrap();
        inputs.fire("jump").unwrap();
        assert!(inputs.get("jump").unwrap().as_trigger().unwrap().is_pending());
        inputs.clear_triggers();
        assert!(!inputs.get("jump").unwrap().as_trigger().unwrap().is_pending());
    }

    #[test]
    fn mutable_views_keep_the_input_kind() {
        let mut inputs = set();
        let view = inputs.get_mut("run").unwrap();
        assert_eq!(view.kind(), InputKind::Bool);
        assert!(view.as_number_mut().is_none());
        let (name, view) = inputs.get_index_mut(0).unwrap();
        assert_eq!(name, "run");
        view.as_bool_mut().unwrap().set_value(false);
        assert_eq!(inputs.get("run").unwrap().kind(), InputKind::Bool);
        assert!(!inputs.get("run").unwrap().as_bool().unwrap().value());
    }

    #[test]
    fn reset_restores_defaults() {
        let mut inputs = set();
        inputs.set_bool("run", false).unwrap();
        inputs.fire("jump").unwrap();
        inputs.reset(&[
            InputDefinition::boolean("run", true),
            InputDefinition::number("speed", 2.5),
            InputDefinition::trigger("jump"),
        ]);
        assert!(inputs.get("run").unwrap().as_bool().unwrap().value());
        assert!(!inputs.get("jump").unwrap().as_trigger().unwrap().is_pending());
    }
}
