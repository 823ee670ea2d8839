//! Addressable elements and animatable properties

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Identifier of an element on the rendering surface.
///
/// Cheap to clone; compared by content.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(Arc<str>);

impl ElementId {
    pub fn new(id: impl AsRef<str>) -> Self {
        Self(Arc::from(id.as_ref()))
    }

    /// Id of the `index`-th child of `parent` (`parent/index`)
    pub fn child(parent: &ElementId, index: usize) -> Self {
        Self::new(format!("{}/{}", parent.0, index))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ElementId {
    fn from(value: String) -> Self {
        Self(Arc::from(value))
    }
}

impl Serialize for ElementId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ElementId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(ElementId::from)
    }
}

/// Numeric properties the motion engine can drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Property {
    /// Translation X in pixels
    TranslateX,
    /// Translation Y in pixels
    TranslateY,
    /// Uniform scale factor
    Scale,
    ScaleX,
    ScaleY,
    /// Rotation in degrees (Z-axis)
    Rotate,
    /// Rotation X in degrees (3D tilt)
    RotateX,
    /// Rotation Y in degrees (3D turn)
    RotateY,
    /// Horizontal skew in degrees
    SkewX,
    /// Opacity (0.0 to 1.0)
    Opacity,
    /// Absolute left offset in pixels
    Left,
    /// Absolute top offset in pixels
    Top,
    /// Width in pixels
    Width,
    /// Width as a percentage of the parent (fill indicators)
    WidthPercent,
    /// Shape morph amount: 0.0 is the canonical shape, 1.0 fully deformed
    Morph,
    /// Glow intensity (0.0 to 1.0)
    Glow,
}

impl Property {
    pub const ALL: [Property; 16] = [
        Property::TranslateX,
        Property::TranslateY,
        Property::Scale,
        Property::ScaleX,
        Property::ScaleY,
        Property::Rotate,
        Property::RotateX,
        Property::RotateY,
        Property::SkewX,
        Property::Opacity,
        Property::Left,
        Property::Top,
        Property::Width,
        Property::WidthPercent,
        Property::Morph,
        Property::Glow,
    ];

    /// Value of the property when nothing has touched it
    pub fn rest_value(self) -> f32 {
        match self {
            Property::Scale | Property::ScaleX | Property::ScaleY | Property::Opacity => 1.0,
            _ => 0.0,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Property::TranslateX => "translate_x",
            Property::TranslateY => "translate_y",
            Property::Scale => "scale",
            Property::ScaleX => "scale_x",
            Property::ScaleY => "scale_y",
            Property::Rotate => "rotate",
            Property::RotateX => "rotate_x",
            Property::RotateY => "rotate_y",
            Property::SkewX => "skew_x",
            Property::Opacity => "opacity",
            Property::Left => "left",
            Property::Top => "top",
            Property::Width => "width",
            Property::WidthPercent => "width_percent",
            Property::Morph => "morph",
            Property::Glow => "glow",
        }
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned when parsing an unknown property name
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown property: {0}")]
pub struct UnknownProperty(pub String);

impl FromStr for Property {
    type Err = UnknownProperty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Property::ALL
            .iter()
            .copied()
            .find(|p| p.name() == s)
            .ok_or_else(|| UnknownProperty(s.to_string()))
    }
}
