//! Identifiers for scene components and their animatable properties.
//!
//! Animations never hold references into the scene. They hold a [`PropertyId`]
//! (component index + property key) resolved once at bind time.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Dense index of a component inside a scene arena.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComponentId(pub u32);

impl ComponentId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Numeric properties a scene component can expose to animations.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyKey {
    X,
    Y,
    Rotation,
    ScaleX,
    ScaleY,
    /// Bone length.
    Length,
}

impl PropertyKey {
    pub const ALL: [PropertyKey; 6] = [
        PropertyKey::X,
        PropertyKey::Y,
        PropertyKey::Rotation,
        PropertyKey::ScaleX,
        PropertyKey::ScaleY,
        PropertyKey::Length,
    ];

    /// Canonical name used in property paths (`"arm.rotation"`).
    pub fn as_str(self) -> &'static str {
        match self {
            PropertyKey::X => "x",
            PropertyKey::Y => "y",
            PropertyKey::Rotation => "rotation",
            PropertyKey::ScaleX => "scaleX",
            PropertyKey::ScaleY => "scaleY",
            PropertyKey::Length => "length",
        }
    }

    /// Parse a property name. Accepts camelCase and snake_case spellings.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "x" => Some(PropertyKey::X),
            "y" => Some(PropertyKey::Y),
            "rotation" => Some(PropertyKey::Rotation),
            "scaleX" | "scale_x" => Some(PropertyKey::ScaleX),
            "scaleY" | "scale_y" => Some(PropertyKey::ScaleY),
            "length" => Some(PropertyKey::Length),
            _ => None,
        }
    }
}

impl fmt::Display for PropertyKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Stable handle of one settable scene property.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct PropertyId {
    pub component: ComponentId,
    pub key: PropertyKey,
}

impl PropertyId {
    #[inline]
    pub fn new(component: ComponentId, key: PropertyKey) -> Self {
        Self { component, key }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn property_keys_round_trip_through_names() {
        for key in PropertyKey::ALL {
            assert_eq!(PropertyKey::parse(key.as_str()), Some(key));
        }
        assert_eq!(PropertyKey::parse("scale_y"), Some(PropertyKey::ScaleY));
        assert_eq!(PropertyKey::parse("opacity"), None);
    }
}
