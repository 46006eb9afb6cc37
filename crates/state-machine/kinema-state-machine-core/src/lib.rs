//! Kinema state machines
//!
//! Layered state machines over [`kinema_animation_core`] timeline animations.
//! A [`StateMachineDefinition`] is validated once and shared; every
//! [`StateMachineInstance`] owns its inputs, active states and cross-fades,
//! and writes the blended pose into a [`kinema_animation_core::Scene`] on
//! each `advance`.

pub mod conditions;
pub mod config;
pub mod data;
pub mod definition;
pub mod error;
pub mod ids;
pub mod inputs;
pub mod instance;
pub mod outputs;

pub use conditions::Condition;
pub use config::{Config, TriggerConsumption};
pub use data::{
    parse_state_machine_json, ConditionData, ConditionOp, ExitTime, InputData, LayerData,
    StateData, StateKindData, StateMachineData, TransitionData, ValueData,
};
pub use definition::{Layer, LayerState, StateKind, StateMachineDefinition, Transition};
pub use error::{DefinitionError, InputError};
pub use ids::{InputId, LayerId, StateId};
pub use inputs::{
    InputDefinition, InputKind, InputSet, SmiBool, SmiInput, SmiInputMut, SmiNumber,
    SmiTrigger,
};
pub use instance::StateMachineInstance;
pub use outputs::StateChange;
