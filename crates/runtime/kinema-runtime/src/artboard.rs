//! Artboards: a scene plus the animations and state machines that drive it.

use std::sync::Arc;

use hashbrown::HashSet;
use kinema_animation_core::{
    AnimationError, AnimationInstance, Component, ComponentKind, PropertyKey, SceneGraph,
    TimelineAnimation,
};
use kinema_state_machine_core::{Config, StateMachineDefinition, StateMachineInstance};
use log::{debug, warn};

use crate::data::{ArtboardData, ComponentData};
use crate::error::FileError;

/// Owns its scene; animations and state machine definitions are shared with
/// every clone.
#[derive(Clone, Debug)]
pub struct Artboard {
    name: String,
    scene: SceneGraph,
    animations: Vec<Arc<TimelineAnimation>>,
    state_machines: Vec<Arc<StateMachineDefinition>>,
}

impl Artboard {
    pub fn from_data(data: &ArtboardData) -> Result<Self, FileError> {
        let with_name = |source: AnimationError| FileError::Animation {
            artboard: data.name.clone(),
            source,
        };
        let scene = build_scene(&data.components).map_err(with_name)?;

        let mut seen = HashSet::new();
        let mut animations = Vec::with_capacity(data.animations.len());
        for anim in &data.animations {
            if !seen.insert(anim.name.as_str()) {
                return Err(FileError::DuplicateAnimation {
                    artboard: data.name.clone(),
                    name: anim.name.clone(),
                });
            }
            let bound = TimelineAnimation::bind(anim, &scene).map_err(with_name)?;
            animations.push(Arc::new(bound));
        }

        let mut seen = HashSet::new();
        let mut state_machines = Vec::with_capacity(data.state_machines.len());
        for machine in &data.state_machines {
            if !seen.insert(machine.name.as_str()) {
                return Err(FileError::DuplicateStateMachine {
                    artboard: data.name.clone(),
                    name: machine.name.clone(),
                });
            }
            let def = StateMachineDefinition::build(machine, &animations).map_err(|source| {
                FileError::StateMachine {
                    artboard: data.name.clone(),
                    source,
                }
            })?;
            state_machines.push(Arc::new(def));
        }

        debug!(
            "loaded artboard '{}' ({} components, {} animations, {} state machines)",
            data.name,
            scene.len(),
            animations.len(),
            state_machines.len()
        );
        let mut artboard = Self {
            name: data.name.clone(),
            scene,
            animations,
            state_machines,
        };
        artboard.advance(0.0);
        Ok(artboard)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }

    // ---- components ----

    pub fn node(&self, name: &str) -> Option<&Component> {
        self.scene.node(name)
    }

    pub fn bone(&self, name: &str) -> Option<&Component> {
        self.scene.bone(name)
    }

    pub fn root_bone(&self, name: &str) -> Option<&Component> {
        self.scene.root_bone(name)
    }

    pub fn transform_component(&self, name: &str) -> Option<&Component> {
        self.scene.transform_component(name)
    }

    // ---- animations ----

    pub fn animation_count(&self) -> usize {
        self.animations.len()
    }

    pub fn animation_by_index(&self, index: usize) -> Option<&Arc<TimelineAnimation>> {
        self.animations.get(index)
    }

    pub fn animation_by_name(&self, name: &str) -> Option<&Arc<TimelineAnimation>> {
        self.animations.iter().find(|a| a.name() == name)
    }

    /// Fresh playhead over the named animation.
    pub fn animation_instance(&self, name: &str) -> Option<AnimationInstance> {
        self.animation_by_name(name)
            .map(|a| AnimationInstance::new(Arc::clone(a)))
    }

    // ---- state machines ----

    pub fn state_machine_count(&self) -> usize {
        self.state_machines.len()
    }

    pub fn state_machine_by_index(&self, index: usize) -> Option<&Arc<StateMachineDefinition>> {
        self.state_machines.get(index)
    }

    pub fn state_machine_by_name(&self, name: &str) -> Option<&Arc<StateMachineDefinition>> {
        self.state_machines.iter().find(|m| m.name() == name)
    }

    /// New instance of the named state machine.
    pub fn state_machine_instance(&self, name: &str, config: Config) -> Option<StateMachineInstance> {
        self.state_machine_by_name(name)
            .map(|def| StateMachineInstance::new(Arc::clone(def), config))
    }

    /// Post-apply update: recompute world transforms from the properties the
    /// animations wrote. Always reports that the artboard may have changed.
    pub fn advance(&mut self, _dt: f32) -> bool {
        self.scene.update_world_transforms();
        true
    }
}

fn build_scene(components: &[ComponentData]) -> Result<SceneGraph, AnimationError> {
    let mut scene = SceneGraph::new();
    for c in components {
        let parent = match &c.parent {
            Some(parent) => Some(scene.find(parent).ok_or_else(|| AnimationError::UnknownParent {
                name: c.name.clone(),
                parent: parent.clone(),
            })?),
            None => None,
        };
        let id = match c.kind {
            ComponentKind::Node => scene.add_node(&c.name, parent)?,
            ComponentKind::Bone => scene.add_bone(&c.name, parent, c.length)?,
            ComponentKind::RootBone => scene.add_root_bone(&c.name, parent, c.length)?,
        };
        let Some(component) = scene.get_mut(id) else {
            continue;
        };
        let initial = [
            (PropertyKey::X, c.x),
            (PropertyKey::Y, c.y),
            (PropertyKey::Rotation, c.rotation),
            (PropertyKey::ScaleX, c.scale_x),
            (PropertyKey::ScaleY, c.scale_y),
        ];
        for (key, value) in initial {
            if !component.set(key, value) && value != 0.0 {
                warn!("component '{}': {:?} has no {key}; ignoring {value}", c.name, c.kind);
            }
        }
    }
    Ok(scene)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn component(name: &str, kind: ComponentKind, parent: Option<&str>) -> ComponentData {
        ComponentData {
            name: name.into(),
            kind,
            parent: parent.map(Into::into),
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            length: 0.0,
        }
    }

    #[test]
    fn scene_keeps_declared_hierarchy() {
        let mut root = component("root", ComponentKind::Node, None);
        root.x = 4.0;
        let mut arm = component("arm", ComponentKind::RootBone, Some("root"));
        arm.length = 3.0;
        let hand = component("hand", ComponentKind::Bone, Some("arm"));
        let scene = build_scene(&[root, arm, hand]).unwrap();
        assert_eq!(scene.len(), 3);
        assert_eq!(scene.node("root").unwrap().x, 4.0);
        assert_eq!(scene.bone("hand").unwrap().parent, scene.find("arm"));
    }

    #[test]
    fn parents_must_precede_children() {
        let child = component("child", ComponentKind::Node, Some("later"));
        let later = component("later", ComponentKind::Node, None);
        assert!(matches!(
            build_scene(&[child, later]),
            Err(AnimationError::UnknownParent { .. })
        ));
    }
}
