//! Error types for animation data and scene construction.
//!
//! Every variant is raised while loading or binding. Sampling, advancing and
//! applying never fail.

use thiserror::Error;

/// Malformed animation or scene data.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum AnimationError {
    #[error("animation '{name}': fps must be greater than zero")]
    ZeroFps { name: String },

    #[error("animation '{name}': speed must be finite, got {speed}")]
    InvalidSpeed { name: String, speed: f32 },

    #[error("animation '{name}': work area {start}..{end} is empty or exceeds duration {duration}")]
    InvalidWorkArea {
        name: String,
        start: u32,
        end: u32,
        duration: u32,
    },

    #[error("animation '{name}': keyframe at frame {frame} on '{target}' lies past duration {duration}")]
    KeyframeOutOfRange {
        name: String,
        target: String,
        frame: u32,
        duration: u32,
    },

    #[error("animation '{name}': keyframes on '{target}' must be ordered by frame (frame {frame})")]
    KeyframeOutOfOrder {
        name: String,
        target: String,
        frame: u32,
    },

    #[error("animation '{name}': keyframe value on '{target}' is not finite")]
    NonFiniteValue { name: String, target: String },

    #[error("invalid property path '{path}': {reason}")]
    InvalidPath { path: String, reason: String },

    #[error("animation '{animation}': target '{path}' does not resolve to a scene property")]
    UnresolvedTarget { animation: String, path: String },

    #[error("scene: component '{name}' already exists")]
    DuplicateComponent { name: String },

    #[error("scene: component '{name}' names unknown parent '{parent}'")]
    UnknownParent { name: String, parent: String },

    #[error("parse error: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for AnimationError {
    fn from(err: serde_json::Error) -> Self {
        Self::Parse(err.to_string())
    }
}
