//! Terminal rendering for shiver skeletons.
//!
//! This crate paints resolved bone trees into a ratatui buffer: box
//! placement of the tree, the solid (pulse and static) and shimmer bone
//! adapters, and the per-mount state that ties them to a timeline.

pub mod bones;
mod color;
mod place;
mod state;

pub use color::{band_color, to_terminal_color};
pub use place::{PlacedBone, place};
pub use state::SkeletonState;
