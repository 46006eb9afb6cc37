//! Transition conditions.
//!
//! A condition compares one input against a threshold captured at build
//! time. Inputs are referenced by [`InputId`], so evaluation never looks up
//! names. Trigger consumption is decided by the caller, see
//! [`crate::TriggerConsumption`].

use crate::data::{ConditionData, ConditionOp, ValueData};
use crate::error::{invariant_violation, DefinitionError};
use crate::ids::InputId;
use crate::inputs::{InputKind, InputSet, SmiInput};

/// Compiled transition condition. Only a built definition evaluates it:
///
/// ```compile_fail
/// use kinema_state_machine_core::{Condition, InputId, InputSet};
///
/// fn holds(inputs: &InputSet) -> bool {
///     Condition::Trigger { input: InputId::from(7) }.evaluate(inputs)
/// }
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Condition {
    Bool {
        input: InputId,
        op: ConditionOp,
        value: bool,
    },
    Number {
        input: InputId,
        op: ConditionOp,
        value: f32,
    },
    /// Holds while the trigger is pending.
    Trigger { input: InputId },
}

impl Condition {
    pub fn input(&self) -> InputId {
        match *self {
            Condition::Bool { input, .. }
            | Condition::Number { input, .. }
            | Condition::Trigger { input } => input,
        }
    }

    pub fn is_trigger(&self) -> bool {
        matches!(self, Condition::Trigger { .. })
    }

    /// Evaluate against current input values. Does not consume triggers.
    pub(crate) fn evaluate(&self, inputs: &InputSet) -> bool {
        let Some(current) = inputs.by_id(self.input()) else {
            invariant_violation("condition references an input outside the instance's input set");
        };
        match (self, current) {
            (Condition::Bool { op, value, .. }, SmiInput::Bool(b)) => match op {
                ConditionOp::NotEqual => b.value() != *value,
                _ => b.value() == *value,
            },
            (Condition::Number { op, value, .. }, SmiInput::Number(n)) => {
                compare(*op, n.value(), *value)
            }
            (Condition::Trigger { .. }, SmiInput::Trigger(t)) => t.is_pending(),
            _ => invariant_violation("condition type differs from its input's type"),
        }
    }
}

fn compare(op: ConditionOp, lhs: f32, rhs: f32) -> bool {
    match op {
        ConditionOp::Equal => lhs == rhs,
        ConditionOp::NotEqual => lhs != rhs,
        ConditionOp::LessThan => lhs < rhs,
        ConditionOp::LessThanOrEqual => lhs <= rhs,
        ConditionOp::GreaterThan => lhs > rhs,
        ConditionOp::GreaterThanOrEqual => lhs >= rhs,
    }
}

/// Validate `data` against the resolved input and produce a condition.
pub(crate) fn compile(
    data: &ConditionData,
    input: InputId,
    kind: InputKind,
) -> Result<Condition, DefinitionError> {
    let mismatch = || DefinitionError::ConditionTypeMismatch {
        input: data.input.clone(),
        kind,
    };
    let invalid_op = |op| DefinitionError::InvalidOperator {
        input: data.input.clone(),
        kind,
        op,
    };
    match kind {
        InputKind::Bool => {
            let op = data.op.unwrap_or(ConditionOp::Equal);
            if !matches!(op, ConditionOp::Equal | ConditionOp::NotEqual) {
                return Err(invalid_op(op));
            }
            let value = match data.value {
                None => true,
                Some(ValueData::Bool(v)) => v,
                Some(ValueData::Number(_)) => return Err(mismatch()),
            };
            Ok(Condition::Bool { input, op, value })
        }
        InputKind::Number => {
            let op = data.op.unwrap_or(ConditionOp::Equal);
            let value = match data.value {
                None => 0.0,
                Some(ValueData::Number(v)) if v.is_finite() => v,
                Some(_) => return Err(mismatch()),
            };
            Ok(Condition::Number { input, op, value })
        }
        InputKind::Trigger => {
            if let Some(op) = data.op.filter(|op| *op != ConditionOp::Equal) {
                return Err(invalid_op(op));
            }
            if data.value.is_some() {
                return Err(mismatch());
            }
            Ok(Condition::Trigger { input })
        }
    }
}
