//! Solid bones: a pulsing fill, or a static one.

use ratatui::{buffer::Buffer, layout::Rect};
use shiver_core::{Animation, Palette, Rgba, interpolate};

use super::{cells, fill, terminal};
use crate::place::PlacedBone;

/// Fill color of a solid bone at timeline value `t`.
///
/// Pulsing bones ignore their own background color.
pub fn fill_color(bone: &PlacedBone, palette: &Palette, t: f32) -> Rgba {
    match bone.animation {
        Animation::Pulse => interpolate(t, &palette.bone, &palette.highlight),
        Animation::None | Animation::Shiver(_) => bone.background_color.unwrap_or(palette.bone),
    }
}

pub fn paint(buf: &mut Buffer, clip: Rect, bone: &PlacedBone, palette: &Palette, t: f32) {
    let color = terminal(fill_color(bone, palette, t));
    for cell in cells(bone, clip) {
        fill(buf, cell.x, cell.y, color);
    }
}
