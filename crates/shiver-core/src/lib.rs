//! Core types for shiver skeleton placeholders.
//!
//! This crate holds everything that does not depend on a rendering host:
//! color parsing and interpolation, the sweep geometry for shimmer bands,
//! resolution of declarative bone layouts into descriptor trees, and the
//! shared animation timeline.

mod animation;
mod bone;
pub mod color;
pub mod geometry;
mod options;
pub mod resolve;
mod timeline;

pub use animation::{Animation, AnimationMode, Direction};
pub use bone::{BoneKey, BoneSpec, Dimension, FlexDirection, Size};
pub use color::{ColorError, ColorValue, Rgba, interpolate};
pub use geometry::{GradientEndpoint, Sweep, SweepPath, SweepTransform, compute_sweep};
pub use options::{
    Align, ContainerStyle, DEFAULT_BONE_COLOR, DEFAULT_DURATION_MS, DEFAULT_HIGHLIGHT_COLOR,
    Palette, SkeletonOptions,
};
pub use resolve::{BoneSource, BoneTree, ResolvedBone, resolve};
pub use timeline::{Repeat, Timeline, Waveform};
