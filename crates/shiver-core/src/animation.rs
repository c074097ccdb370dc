//! Animation modes and sweep directions.

use tracing::warn;

/// Direction a shimmer band travels across a bone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Direction {
    HorizontalLeft,
    #[default]
    HorizontalRight,
    VerticalTop,
    VerticalDown,
    DiagonalTopLeft,
    DiagonalTopRight,
    DiagonalDownLeft,
    DiagonalDownRight,
}

impl Direction {
    /// All directions, in cycling order.
    pub const ALL: [Direction; 8] = [
        Direction::HorizontalRight,
        Direction::HorizontalLeft,
        Direction::VerticalDown,
        Direction::VerticalTop,
        Direction::DiagonalDownRight,
        Direction::DiagonalDownLeft,
        Direction::DiagonalTopRight,
        Direction::DiagonalTopLeft,
    ];

    /// Parse a direction from its camelCase name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|d| d.name() == name.trim())
    }

    /// The camelCase name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            Direction::HorizontalLeft => "horizontalLeft",
            Direction::HorizontalRight => "horizontalRight",
            Direction::VerticalTop => "verticalTop",
            Direction::VerticalDown => "verticalDown",
            Direction::DiagonalTopLeft => "diagonalTopLeft",
            Direction::DiagonalTopRight => "diagonalTopRight",
            Direction::DiagonalDownLeft => "diagonalDownLeft",
            Direction::DiagonalDownRight => "diagonalDownRight",
        }
    }

    /// Cycle to the next direction.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|d| *d == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// Whether the band travels corner to corner.
    pub fn is_diagonal(self) -> bool {
        matches!(
            self,
            Direction::DiagonalTopLeft
                | Direction::DiagonalTopRight
                | Direction::DiagonalDownLeft
                | Direction::DiagonalDownRight
        )
    }
}

/// How bones are animated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum AnimationMode {
    /// Solid fill interpolated between bone and highlight colors.
    #[default]
    Pulse,
    /// Gradient highlight sweeping across the bone.
    Shiver,
    /// Static bone color.
    None,
}

impl AnimationMode {
    /// Parse a mode from its config name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim() {
            "pulse" => Some(AnimationMode::Pulse),
            "shiver" => Some(AnimationMode::Shiver),
            "none" => Some(AnimationMode::None),
            _ => None,
        }
    }

    /// The name used in configuration files.
    pub fn name(self) -> &'static str {
        match self {
            AnimationMode::Pulse => "pulse",
            AnimationMode::Shiver => "shiver",
            AnimationMode::None => "none",
        }
    }

    /// Cycle to the next mode.
    pub fn next(self) -> Self {
        match self {
            AnimationMode::Pulse => AnimationMode::Shiver,
            AnimationMode::Shiver => AnimationMode::None,
            AnimationMode::None => AnimationMode::Pulse,
        }
    }
}

/// A fully resolved animation: the mode, plus a direction when the mode sweeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Animation {
    #[default]
    None,
    Pulse,
    Shiver(Direction),
}

impl Animation {
    /// Combine a mode and a direction.
    pub fn new(mode: AnimationMode, direction: Direction) -> Self {
        match mode {
            AnimationMode::Pulse => Animation::Pulse,
            AnimationMode::Shiver => Animation::Shiver(direction),
            AnimationMode::None => Animation::None,
        }
    }

    /// Resolve config names. Unknown names fail closed to [`Animation::None`].
    pub fn from_names(mode: &str, direction: &str) -> Self {
        let Some(parsed) = AnimationMode::from_name(mode) else {
            warn!(mode, "unknown animation type, bones will be static");
            return Animation::None;
        };
        match (parsed, Direction::from_name(direction)) {
            (AnimationMode::Shiver, None) => {
                warn!(
                    direction,
                    "unknown animation direction, bones will be static"
                );
                Animation::None
            }
            (mode, direction) => Animation::new(mode, direction.unwrap_or_default()),
        }
    }

    pub fn mode(self) -> AnimationMode {
        match self {
            Animation::None => AnimationMode::None,
            Animation::Pulse => AnimationMode::Pulse,
            Animation::Shiver(_) => AnimationMode::Shiver,
        }
    }

    /// The sweep direction, if any.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Animation::Shiver(direction) => Some(direction),
            _ => None,
        }
    }
}
