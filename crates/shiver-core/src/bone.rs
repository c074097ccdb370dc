//! Declarative bone specifications.

use std::fmt;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::color::ColorValue;

/// Width and height in layout units (terminal cells for the ratatui host).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const ZERO: Size = Size {
        width: 0.0,
        height: 0.0,
    };

    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A bone dimension: a fixed length, or a placeholder filled from the
/// measured container size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
    Fixed(f32),
    Fill,
}

impl Default for Dimension {
    fn default() -> Self {
        Dimension::Fixed(0.0)
    }
}

impl Dimension {
    /// Resolve against a measured container length. Missing measurements,
    /// negative and non-finite values all resolve to zero.
    pub fn resolve(self, measured: Option<f32>) -> f32 {
        let value = match self {
            Dimension::Fixed(value) => value,
            Dimension::Fill => measured.unwrap_or(0.0),
        };
        if value.is_finite() {
            value.max(0.0)
        } else {
            0.0
        }
    }
}

impl Serialize for Dimension {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Dimension::Fixed(value) => serializer.serialize_f32(*value),
            Dimension::Fill => serializer.serialize_str("100%"),
        }
    }
}

struct DimensionVisitor;

impl Visitor<'_> for DimensionVisitor {
    type Value = Dimension;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a length or a placeholder string such as \"100%\"")
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Dimension, E> {
        Ok(Dimension::Fixed(value as f32))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Dimension, E> {
        Ok(Dimension::Fixed(value as f32))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Dimension, E> {
        Ok(Dimension::Fixed(value as f32))
    }

    // Any string is a placeholder, the same way percentage widths are.
    fn visit_str<E: de::Error>(self, _value: &str) -> Result<Dimension, E> {
        Ok(Dimension::Fill)
    }
}

impl<'de> Deserialize<'de> for Dimension {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(DimensionVisitor)
    }
}

/// Stable identity of a resolved bone.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BoneKey(String);

impl BoneKey {
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Synthetic key for the bone at `index` below `parent`.
    pub fn positional(parent: Option<&BoneKey>, index: usize) -> Self {
        match parent {
            Some(parent) => Self(format!("{}_{index}", parent.0)),
            None => Self(index.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for BoneKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for BoneKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for BoneKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Int(i64),
            Text(String),
        }
        Ok(match Repr::deserialize(deserializer)? {
            Repr::Int(key) => BoneKey(key.to_string()),
            Repr::Text(key) => BoneKey(key),
        })
    }
}

/// Main axis used to stack a container's children.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FlexDirection {
    #[default]
    Column,
    Row,
}

/// A declarative bone. Specs with children are containers: they only carry
/// layout styling and are never painted themselves.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoneSpec {
    pub width: Dimension,
    pub height: Dimension,
    #[serde(alias = "borderRadius", skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<f32>,
    #[serde(alias = "backgroundColor", skip_serializing_if = "Option::is_none")]
    pub background_color: Option<ColorValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<BoneKey>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<BoneSpec>,
    #[serde(alias = "flexDirection", skip_serializing_if = "Option::is_none")]
    pub flex_direction: Option<FlexDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gap: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin: Option<f32>,
}

impl BoneSpec {
    /// A leaf bone of the given dimensions.
    pub fn new(width: Dimension, height: Dimension) -> Self {
        Self {
            width,
            height,
            ..Self::default()
        }
    }

    /// A fixed-size leaf bone.
    pub fn sized(width: f32, height: f32) -> Self {
        Self::new(Dimension::Fixed(width), Dimension::Fixed(height))
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(BoneKey::new(key));
        self
    }

    pub fn with_radius(mut self, radius: f32) -> Self {
        self.border_radius = Some(radius);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.background_color = Some(ColorValue::Text(color.into()));
        self
    }

    pub fn with_margin(mut self, margin: f32) -> Self {
        self.margin = Some(margin);
        self
    }

    pub fn with_children(mut self, direction: FlexDirection, children: Vec<BoneSpec>) -> Self {
        self.flex_direction = Some(direction);
        self.children = children;
        self
    }

    pub fn with_gap(mut self, gap: f32) -> Self {
        self.gap = Some(gap);
        self
    }

    pub fn is_container(&self) -> bool {
        !self.children.is_empty()
    }
}
