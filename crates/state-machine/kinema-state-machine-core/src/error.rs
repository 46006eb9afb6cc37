//! Construction-time and input-access errors.
//!
//! Everything that can be wrong with a definition is reported by
//! [`DefinitionError`] while building it. A built machine never fails to
//! advance.

use kinema_animation_core::AnimationError;
use thiserror::Error;

use crate::data::ConditionOp;
use crate::inputs::InputKind;

/// Malformed state machine data. Fatal to the build call.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum DefinitionError {
    #[error("input '{name}' is declared more than once")]
    DuplicateInput { name: String },

    #[error("layer '{layer}': state name '{name}' is used more than once")]
    DuplicateState { layer: String, name: String },

    #[error("layer '{layer}' has no entry state")]
    MissingEntry { layer: String },

    #[error("layer '{layer}' has more than one entry state")]
    DuplicateEntry { layer: String },

    #[error("layer '{layer}' has no exit state")]
    MissingExit { layer: String },

    #[error("layer '{layer}' has more than one any state")]
    DuplicateAny { layer: String },

    #[error("layer '{layer}': transition from '{from}' targets unknown state '{target}'")]
    UnknownState {
        layer: String,
        from: String,
        target: String,
    },

    #[error("layer '{layer}': transition from '{from}' may not target '{target}' (entry and any states are not targets)")]
    InvalidTransitionTarget {
        layer: String,
        from: String,
        target: String,
    },

    #[error("layer '{layer}': exit state '{state}' may not have outgoing transitions")]
    ExitHasTransitions { layer: String, state: String },

    #[error("layer '{layer}': transition from '{from}' is invalid: {reason}")]
    InvalidTransition {
        layer: String,
        from: String,
        reason: String,
    },

    #[error("layer '{layer}': state '{state}' references unknown input '{input}'")]
    UnknownInput {
        layer: String,
        state: String,
        input: String,
    },

    #[error("condition on input '{input}' does not match its type {kind:?}")]
    ConditionTypeMismatch { input: String, kind: InputKind },

    #[error("operator {op:?} is not valid for {kind:?} input '{input}'")]
    InvalidOperator {
        input: String,
        kind: InputKind,
        op: ConditionOp,
    },

    #[error("input '{input}' default value does not match its type {kind:?}")]
    InvalidDefault { input: String, kind: InputKind },

    #[error("layer '{layer}': state '{state}' references unknown animation '{animation}'")]
    UnknownAnimation {
        layer: String,
        state: String,
        animation: String,
    },

    #[error(transparent)]
    Animation(#[from] AnimationError),

    #[error("parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for DefinitionError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}

/// Caller asked for an input that does not exist or has another type.
/// Non-fatal; the instance is unchanged.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InputError {
    #[error("no input named '{0}'")]
    UnknownInput(String),

    #[error("input '{name}' is {actual:?}, not {expected:?}")]
    TypeMismatch {
        name: String,
        expected: InputKind,
        actual: InputKind,
    },
}

/// Log and abort on a broken internal invariant. Unreachable for instances
/// built from validated definitions.
#[cold]
pub(crate) fn invariant_violation(what: &str) -> ! {
    log::error!("state machine invariant violated: {what}");
    panic!("state machine invariant violated: {what}");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn animation_errors_pass_through_transparently() {
        let inner = AnimationError::ZeroFps { name: "walk".into() };
        let err: DefinitionError = inner.clone().into();
        assert_eq!(err.to_string(), inner.to_string());
    }

    #[test]
    fn input_error_names_both_types() {
        let err = InputError::TypeMismatch {
            name: "speed".into(),
            expected: InputKind::Bool,
            actual: InputKind::Number,
        };
        let msg = err.to_string();
        assert!(msg.contains("Bool") && msg.contains("Number"), "{msg}");
    }
}
