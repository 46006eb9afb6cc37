//! Errors raised while loading a file.

use kinema_animation_core::AnimationError;
use kinema_state_machine_core::DefinitionError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum FileError {
    #[error("file contains no artboards")]
    NoArtboards,

    #[error("artboard '{0}' is declared more than once")]
    DuplicateArtboard(String),

    #[error("artboard '{artboard}': animation '{name}' is declared more than once")]
    DuplicateAnimation { artboard: String, name: String },

    #[error("artboard '{artboard}': state machine '{name}' is declared more than once")]
    DuplicateStateMachine { artboard: String, name: String },

    #[error("artboard '{artboard}': {source}")]
    Animation {
        artboard: String,
        #[source]
        source: AnimationError,
    },

    #[error("artboard '{artboard}': {source}")]
    StateMachine {
        artboard: String,
        #[source]
        source: DefinitionError,
    },

    #[error("parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for FileError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
