//! Kinema animation core (engine-agnostic)
//!
//! Timeline animations bound to scene properties, playheads with loop-mode
//! time math, keyframe sampling and a small arena scene graph. State machines
//! build on top of this crate; it knows nothing about them.

pub mod binding;
pub mod data;
pub mod error;
pub mod ids;
pub mod instance;
pub mod interp;
pub mod loader;
pub mod sampling;
pub mod scene;
pub mod timeline;

// Re-exports for consumers (state machines, runtime, adapters)
pub use binding::{PropertyPath, TargetResolver};
pub use data::{Interpolation, KeyFrameData, KeyedPropertyData, LoopMode, TimelineAnimationData, WorkArea};
pub use error::AnimationError;
pub use ids::{ComponentId, PropertyId, PropertyKey};
pub use instance::AnimationInstance;
pub use loader::{load_timeline_json, parse_timeline_json};
pub use sampling::sample_keyframes;
pub use scene::{Component, ComponentKind, Mat2D, Scene, SceneGraph};
pub use timeline::{KeyFrame, KeyedProperty, TimelineAnimation};
