//! Serializable file documents.
//!
//! A file is an ordered list of artboards. Each artboard carries its scene
//! components (parents before children), its timeline animations and its
//! state machines. Everything is referenced by name and resolved at load.

use kinema_animation_core::{ComponentKind, TimelineAnimationData};
use kinema_state_machine_core::StateMachineData;
use serde::{Deserialize, Serialize};

use crate::error::FileError;

fn one() -> f32 {
    1.0
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ComponentData {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: ComponentKind,
    #[serde(default)]
    pub parent: Option<String>,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub rotation: f32,
    #[serde(default = "one")]
    pub scale_x: f32,
    #[serde(default = "one")]
    pub scale_y: f32,
    /// Bones only.
    #[serde(default)]
    pub length: f32,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ArtboardData {
    pub name: String,
    #[serde(default)]
    pub components: Vec<ComponentData>,
    #[serde(default)]
    pub animations: Vec<TimelineAnimationData>,
    #[serde(default)]
    pub state_machines: Vec<StateMachineData>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct FileData {
    pub artboards: Vec<ArtboardData>,
}

/// Parse a file document without building it.
pub fn parse_file_json(s: &str) -> Result<FileData, FileError> {
    Ok(serde_json::from_str(s)?)
}
