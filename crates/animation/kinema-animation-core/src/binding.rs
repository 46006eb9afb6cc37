//! Property paths and resolver trait.
//!
//! Keyed properties address their target with a path `component.property`
//! (`"arm/forearm.rotation"`: everything before the last `.` is the component
//! name). Binding happens once; adapters implement [`TargetResolver`] and the
//! resolved [`PropertyId`] handles are stored in the animation.

use std::fmt;
use std::str::FromStr;

use hashbrown::HashMap;

use crate::error::AnimationError;
use crate::ids::{PropertyId, PropertyKey};

/// Parsed `component.property` path.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct PropertyPath {
    pub component: String,
    pub property: PropertyKey,
}

impl PropertyPath {
    pub fn new(component: impl Into<String>, property: PropertyKey) -> Self {
        Self {
            component: component.into(),
            property,
        }
    }

    pub fn parse(s: &str) -> Result<Self, AnimationError> {
        let invalid = |reason: &str| AnimationError::InvalidPath {
            path: s.to_string(),
            reason: reason.to_string(),
        };
        let (component, property) = s
            .rsplit_once('.')
            .ok_or_else(|| invalid("expected 'component.property'"))?;
        if component.is_empty() {
            return Err(invalid("empty component name"));
        }
        if component.chars().any(char::is_whitespace) {
            return Err(invalid("component contains whitespace"));
        }
        let property = PropertyKey::parse(property)
            .ok_or_else(|| invalid(&format!("unknown property '{property}'")))?;
        Ok(Self {
            component: component.to_string(),
            property,
        })
    }
}

impl fmt::Display for PropertyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.component, self.property)
    }
}

impl FromStr for PropertyPath {
    type Err = AnimationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Resolves property paths to scene handles.
/// Scenes (and host adapters) implement this and pass it into
/// [`crate::TimelineAnimation::bind`].
pub trait TargetResolver {
    fn resolve(&self, path: &PropertyPath) -> Option<PropertyId>;
}

/// Explicit path table, keyed by the canonical path string.
impl TargetResolver for HashMap<String, PropertyId> {
    fn resolve(&self, path: &PropertyPath) -> Option<PropertyId> {
        self.get(&path.to_string()).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::ComponentId;

    #[test]
    fn parse_splits_on_last_dot() {
        let p = PropertyPath::parse("rig/arm.v2.rotation").unwrap();
        assert_eq!(p.component, "rig/arm.v2");
        assert_eq!(p.property, PropertyKey::Rotation);
        assert_eq!(p.to_string(), "rig/arm.v2.rotation");
    }

    #[test]
    fn parse_rejects_malformed_paths() {
        for bad in ["root", ".x", "root.opacity", "my node.x"] {
            assert!(
                matches!(
                    PropertyPath::parse(bad),
                    Err(AnimationError::InvalidPath { .. })
                ),
                "{bad} should fail"
            );
        }
    }

    #[test]
    fn map_resolver_uses_canonical_names() {
        let mut table = HashMap::new();
        let id = PropertyId::new(ComponentId(3), PropertyKey::ScaleX);
        table.insert("hip.scaleX".to_string(), id);
        let path = PropertyPath::parse("hip.scale_x").unwrap();
        assert_eq!(table.resolve(&path), Some(id));
    }
}
