//! The options object a skeleton is mounted with.

use serde::{Deserialize, Serialize};

use crate::animation::{Animation, AnimationMode, Direction};
use crate::bone::{BoneSpec, FlexDirection};
use crate::color::{ColorError, ColorValue, Rgba};

/// Default length of one animation cycle.
pub const DEFAULT_DURATION_MS: u64 = 1200;

pub const DEFAULT_BONE_COLOR: &str = "#E1E9EE";

pub const DEFAULT_HIGHLIGHT_COLOR: &str = "#F2F8FC";

/// Placement of children inside a container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    #[default]
    Center,
    Start,
}

/// Styling of the outer skeleton container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContainerStyle {
    #[serde(alias = "flexDirection")]
    pub flex_direction: FlexDirection,
    pub gap: f32,
    pub align: Align,
    pub padding: f32,
}

impl Default for ContainerStyle {
    fn default() -> Self {
        Self {
            flex_direction: FlexDirection::Column,
            gap: 0.0,
            align: Align::Center,
            padding: 0.0,
        }
    }
}

/// Everything a skeleton is configured with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkeletonOptions {
    #[serde(alias = "isLoading")]
    pub is_loading: bool,
    pub layout: Vec<BoneSpec>,
    #[serde(alias = "animationType")]
    pub animation_type: String,
    #[serde(alias = "animationDirection")]
    pub animation_direction: String,
    /// Cycle length in milliseconds.
    pub duration: u64,
    #[serde(alias = "boneColor")]
    pub bone_color: ColorValue,
    #[serde(alias = "highlightColor")]
    pub highlight_color: ColorValue,
    #[serde(alias = "containerStyle")]
    pub container_style: ContainerStyle,
}

impl Default for SkeletonOptions {
    fn default() -> Self {
        Self {
            is_loading: true,
            layout: Vec::new(),
            animation_type: AnimationMode::default().name().to_string(),
            animation_direction: Direction::default().name().to_string(),
            duration: DEFAULT_DURATION_MS,
            bone_color: DEFAULT_BONE_COLOR.into(),
            highlight_color: DEFAULT_HIGHLIGHT_COLOR.into(),
            container_style: ContainerStyle::default(),
        }
    }
}

impl SkeletonOptions {
    /// The animation these options select. Unknown names resolve to none.
    pub fn animation(&self) -> Animation {
        Animation::from_names(&self.animation_type, &self.animation_direction)
    }

    pub fn set_animation(&mut self, mode: AnimationMode, direction: Direction) {
        self.animation_type = mode.name().to_string();
        self.animation_direction = direction.name().to_string();
    }

    pub fn palette(&self) -> Result<Palette, ColorError> {
        Ok(Palette {
            bone: self.bone_color.parse()?,
            highlight: self.highlight_color.parse()?,
        })
    }
}

/// Parsed base and accent colors.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Palette {
    pub bone: Rgba,
    pub highlight: Rgba,
}
