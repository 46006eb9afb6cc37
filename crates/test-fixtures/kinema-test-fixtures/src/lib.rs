//! Shared JSON fixtures for the kinema crates.
//!
//! `fixtures/manifest.json` maps fixture names to files below `fixtures/`.
//! State-machine fixtures come with the animations they reference so tests
//! can build the whole definition from one key.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    animations: HashMap<String, String>,
    #[serde(rename = "state-machines")]
    state_machines: HashMap<String, StateMachineEntry>,
    files: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct StateMachineEntry {
    definition: String,
    #[serde(default)]
    animations: Vec<String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a, T>(map: &'a HashMap<String, T>, kind: &str, name: &str) -> Result<&'a T> {
    map.get(name)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

pub mod animations {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.animations.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.animations, "animation", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.animations, "animation", name)?;
        super::load_json(rel)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.animations, "animation", name)?;
        Ok(resolve_path(rel))
    }
}

pub mod state_machines {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.state_machines.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let entry = lookup(&MANIFEST.state_machines, "state machine", name)?;
        read_to_string(&entry.definition)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let entry = lookup(&MANIFEST.state_machines, "state machine", name)?;
        super::load_json(&entry.definition)
    }

    /// Animation fixture keys the machine's states refer to, in manifest order.
    pub fn animation_keys(name: &str) -> Result<Vec<String>> {
        let entry = lookup(&MANIFEST.state_machines, "state machine", name)?;
        Ok(entry.animations.clone())
    }

    /// JSON text of every animation the machine refers to.
    pub fn animation_jsons(name: &str) -> Result<Vec<String>> {
        animation_keys(name)?
            .iter()
            .map(|key| super::animations::json(key))
            .collect()
    }
}

pub mod files {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.files.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.files, "file", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.files, "file", name)?;
        super::load_json(rel)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.files, "file", name)?;
        Ok(resolve_path(rel))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_manifest_entry_is_readable() {
        for key in animations::keys() {
            animations::json(&key).unwrap();
        }
        for key in state_machines::keys() {
            state_machines::json(&key).unwrap();
            assert!(!state_machines::animation_jsons(&key).unwrap().is_empty());
        }
        for key in files::keys() {
            files::json(&key).unwrap();
        }
    }

    #[test]
    fn unknown_keys_report_their_kind() {
        let err = animations::json("does-not-exist").unwrap_err();
        assert!(err.to_string().contains("animation"));
    }
}
