//! Scene contract and a minimal arena-backed scene graph.
//!
//! Animations only see the [`Scene`] trait: read and write numeric properties
//! by [`PropertyId`]. [`SceneGraph`] is the arena implementation used by
//! artboards and tests. Components reference their parent by [`ComponentId`],
//! and a parent is always inserted before its children so world transforms
//! resolve in a single forward pass.

use hashbrown::HashMap;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::binding::{PropertyPath, TargetResolver};
use crate::error::AnimationError;
use crate::ids::{ComponentId, PropertyId, PropertyKey};

/// Property access consumed by timeline animations.
pub trait Scene {
    /// Current value, or `None` when the component does not expose `id.key`.
    fn property(&self, id: PropertyId) -> Option<f32>;

    /// Write a value. Unknown properties are ignored.
    fn set_property(&mut self, id: PropertyId, value: f32);
}

#[derive(Copy, Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum ComponentKind {
    Node,
    Bone,
    RootBone,
}

impl ComponentKind {
    /// Properties settable on this kind. Chained bones take their position
    /// from the parent bone's length, so only nodes and root bones expose x/y.
    pub fn supports(self, key: PropertyKey) -> bool {
        match (self, key) {
            (_, PropertyKey::Rotation | PropertyKey::ScaleX | PropertyKey::ScaleY) => true,
            (ComponentKind::Node | ComponentKind::RootBone, PropertyKey::X | PropertyKey::Y) => true,
            (ComponentKind::Bone | ComponentKind::RootBone, PropertyKey::Length) => true,
            _ => false,
        }
    }

    pub fn is_bone(self) -> bool {
        matches!(self, ComponentKind::Bone | ComponentKind::RootBone)
    }
}

/// 2D affine matrix `[xx, xy, yx, yy, tx, ty]` (column-major).
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mat2D {
    pub xx: f32,
    pub xy: f32,
    pub yx: f32,
    pub yy: f32,
    pub tx: f32,
    pub ty: f32,
}

impl Default for Mat2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mat2D {
    pub const IDENTITY: Mat2D = Mat2D {
        xx: 1.0,
        xy: 0.0,
        yx: 0.0,
        yy: 1.0,
        tx: 0.0,
        ty: 0.0,
    };

    /// Compose translation, rotation (radians) and scale.
    pub fn from_trs(x: f32, y: f32, rotation: f32, scale_x: f32, scale_y: f32) -> Self {
        let (sin, cos) = rotation.sin_cos();
        Self {
            xx: cos * scale_x,
            xy: sin * scale_x,
            yx: -sin * scale_y,
            yy: cos * scale_y,
            tx: x,
            ty: y,
        }
    }

    /// `self * rhs`: apply `rhs` first, then `self`.
    pub fn multiply(&self, rhs: &Mat2D) -> Mat2D {
        Mat2D {
            xx: self.xx * rhs.xx + self.yx * rhs.xy,
            xy: self.xy * rhs.xx + self.yy * rhs.xy,
            yx: self.xx * rhs.yx + self.yx * rhs.yy,
            yy: self.xy * rhs.yx + self.yy * rhs.yy,
            tx: self.xx * rhs.tx + self.yx * rhs.ty + self.tx,
            ty: self.xy * rhs.tx + self.yy * rhs.ty + self.ty,
        }
    }

    pub fn transform_point(&self, x: f32, y: f32) -> (f32, f32) {
        (
            self.xx * x + self.yx * y + self.tx,
            self.xy * x + self.yy * y + self.ty,
        )
    }
}

/// One node or bone in the arena.
#[derive(Clone, Debug, PartialEq)]
pub struct Component {
    pub name: String,
    pub kind: ComponentKind,
    pub parent: Option<ComponentId>,
    pub x: f32,
    pub y: f32,
    pub rotation: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub length: f32,
    world: Mat2D,
}

impl Component {
    fn new(name: String, kind: ComponentKind, parent: Option<ComponentId>) -> Self {
        Self {
            name,
            kind,
            parent,
            x: 0.0,
            y: 0.0,
            rotation: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            length: 0.0,
            world: Mat2D::IDENTITY,
        }
    }

    pub fn get(&self, key: PropertyKey) -> Option<f32> {
        if !self.kind.supports(key) {
            return None;
        }
        Some(match key {
            PropertyKey::X => self.x,
            PropertyKey::Y => self.y,
            PropertyKey::Rotation => self.rotation,
            PropertyKey::ScaleX => self.scale_x,
            PropertyKey::ScaleY => self.scale_y,
            PropertyKey::Length => self.length,
        })
    }

    /// Returns false when the kind does not expose `key`.
    pub fn set(&mut self, key: PropertyKey, value: f32) -> bool {
        if !self.kind.supports(key) {
            return false;
        }
        match key {
            PropertyKey::X => self.x = value,
            PropertyKey::Y => self.y = value,
            PropertyKey::Rotation => self.rotation = value,
            PropertyKey::ScaleX => self.scale_x = value,
            PropertyKey::ScaleY => self.scale_y = value,
            PropertyKey::Length => self.length = value,
        }
        true
    }

    /// World transform as of the last [`SceneGraph::update_world_transforms`].
    pub fn world_transform(&self) -> Mat2D {
        self.world
    }
}

/// Arena of components addressed by [`ComponentId`] and by unique name.
#[derive(Clone, Debug, Default)]
pub struct SceneGraph {
    components: Vec<Component>,
    by_name: HashMap<String, ComponentId>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, name: &str, parent: Option<ComponentId>) -> Result<ComponentId, AnimationError> {
        self.insert(name, ComponentKind::Node, parent)
    }

    pub fn add_bone(
        &mut self,
        name: &str,
        parent: Option<ComponentId>,
        length: f32,
    ) -> Result<ComponentId, AnimationError> {
        let id = self.insert(name, ComponentKind::Bone, parent)?;
        self.components[id.index()].length = length;
        Ok(id)
    }

    pub fn add_root_bone(
        &mut self,
        name: &str,
        parent: Option<ComponentId>,
        length: f32,
    ) -> Result<ComponentId, AnimationError> {
        let id = self.insert(name, ComponentKind::RootBone, parent)?;
        self.components[id.index()].length = length;
        Ok(id)
    }

    fn insert(
        &mut self,
        name: &str,
        kind: ComponentKind,
        parent: Option<ComponentId>,
    ) -> Result<ComponentId, AnimationError> {
        if self.by_name.contains_key(name) {
            return Err(AnimationError::DuplicateComponent {
                name: name.to_string(),
            });
        }
        if let Some(p) = parent {
            if p.index() >= self.components.len() {
                return Err(AnimationError::UnknownParent {
                    name: name.to_string(),
                    parent: format!("#{}", p.0),
                });
            }
        }
        let id = ComponentId(self.components.len() as u32);
        self.components
            .push(Component::new(name.to_string(), kind, parent));
        self.by_name.insert(name.to_string(), id);
        Ok(id)
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn get(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(id.index())
    }

    pub fn get_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.components.get_mut(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (ComponentId, &Component)> {
        self.components
            .iter()
            .enumerate()
            .map(|(i, c)| (ComponentId(i as u32), c))
    }

    pub fn find(&self, name: &str) -> Option<ComponentId> {
        self.by_name.get(name).copied()
    }

    /// Any component by name.
    pub fn transform_component(&self, name: &str) -> Option<&Component> {
        self.find(name).and_then(|id| self.get(id))
    }

    pub fn node(&self, name: &str) -> Option<&Component> {
        self.transform_component(name)
            .filter(|c| c.kind == ComponentKind::Node)
    }

    /// Bones by name; root bones are bones too.
    pub fn bone(&self, name: &str) -> Option<&Component> {
        self.transform_component(name).filter(|c| c.kind.is_bone())
    }

    pub fn root_bone(&self, name: &str) -> Option<&Component> {
        self.transform_component(name)
            .filter(|c| c.kind == ComponentKind::RootBone)
    }

    /// Recompute world transforms from local properties.
    pub fn update_world_transforms(&mut self) {
        for i in 0..self.components.len() {
            let (parent_world, parent_bone_length) = match self.components[i].parent {
                Some(p) => {
                    let parent = &self.components[p.index()];
                    let length = parent.kind.is_bone().then_some(parent.length);
                    (parent.world, length)
                }
                None => (Mat2D::IDENTITY, None),
            };
            let c = &self.components[i];
            // A bone chained to a bone sits at the tip of its parent.
            let (x, y) = match (c.kind, parent_bone_length) {
                (ComponentKind::Bone, Some(length)) => (length, 0.0),
                (ComponentKind::Bone, None) => (0.0, 0.0),
                _ => (c.x, c.y),
            };
            let local = Mat2D::from_trs(x, y, c.rotation, c.scale_x, c.scale_y);
            self.components[i].world = parent_world.multiply(&local);
        }
    }
}

impl Scene for SceneGraph {
    fn property(&self, id: PropertyId) -> Option<f32> {
        self.get(id.component).and_then(|c| c.get(id.key))
    }

    fn set_property(&mut self, id: PropertyId, value: f32) {
        let applied = self
            .get_mut(id.component)
            .map(|c| c.set(id.key, value))
            .unwrap_or(false);
        if !applied {
            warn!(
                "scene: ignoring write to unsupported property {:?}.{}",
                id.component, id.key
            );
        }
    }
}

impl TargetResolver for SceneGraph {
    fn resolve(&self, path: &PropertyPath) -> Option<PropertyId> {
        let id = self.find(&path.component)?;
        let component = self.get(id)?;
        component
            .kind
            .supports(path.property)
            .then(|| PropertyId::new(id, path.property))
    }
}
