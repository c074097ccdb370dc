//! Paint adapters for placed bones.

use ratatui::{buffer::Buffer, layout::Rect, style::Color};
use shiver_core::{Animation, Palette, Rgba};

use crate::color::to_terminal_color;
use crate::place::PlacedBone;

pub mod shiver_bone;
pub mod static_bone;

/// Color transparent bone colors are composited over.
pub const BACKDROP: Rgba = Rgba::rgb(0.0, 0.0, 0.0);

/// Paint one bone at timeline value `t`, clipped to `clip`.
pub fn paint(buf: &mut Buffer, clip: Rect, bone: &PlacedBone, palette: &Palette, t: f32) {
    match bone.animation {
        Animation::None | Animation::Pulse => static_bone::paint(buf, clip, bone, palette, t),
        Animation::Shiver(_) => shiver_bone::paint(buf, clip, bone, palette, t),
    }
}

/// A cell covered by a bone.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoneCell {
    pub x: u16,
    pub y: u16,
    /// Offset of the cell centre from the bone centre.
    pub dx: f32,
    pub dy: f32,
}

/// Cells whose centres fall inside the bone's rounded rectangle and `clip`.
pub fn cells(bone: &PlacedBone, clip: Rect) -> impl Iterator<Item = BoneCell> + '_ {
    let clip = clip.intersection(bone_bounds(bone));
    let (cx, cy) = bone.center();
    clip.positions().filter_map(move |pos| {
        let px = pos.x as f32 + 0.5;
        let py = pos.y as f32 + 0.5;
        let inside = px >= bone.x
            && px < bone.x + bone.size.width
            && py >= bone.y
            && py < bone.y + bone.size.height
            && inside_corners(
                px - bone.x,
                py - bone.y,
                bone.size.width,
                bone.size.height,
                bone.border_radius,
            );
        inside.then_some(BoneCell {
            x: pos.x,
            y: pos.y,
            dx: px - cx,
            dy: py - cy,
        })
    })
}

/// Whole-cell bounding box of a bone.
fn bone_bounds(bone: &PlacedBone) -> Rect {
    let left = bone.x.max(0.0).floor();
    let top = bone.y.max(0.0).floor();
    let right = (bone.x + bone.size.width).max(0.0).ceil();
    let bottom = (bone.y + bone.size.height).max(0.0).ceil();
    let clamp = |v: f32| v.min(u16::MAX as f32) as u16;
    Rect::new(
        clamp(left),
        clamp(top),
        clamp(right - left),
        clamp(bottom - top),
    )
}

/// Whether a point, relative to the bone's top-left corner, lies inside the
/// rounded rectangle.
fn inside_corners(px: f32, py: f32, width: f32, height: f32, radius: f32) -> bool {
    let r = radius.min(width / 2.0).min(height / 2.0).max(0.0);
    if r == 0.0 {
        return true;
    }
    let nearest_x = px.clamp(r, width - r);
    let nearest_y = py.clamp(r, height - r);
    let (ox, oy) = (px - nearest_x, py - nearest_y);
    ox * ox + oy * oy <= r * r
}

/// Fill a cell with a background color.
pub(crate) fn fill(buf: &mut Buffer, x: u16, y: u16, color: Color) {
    if let Some(cell) = buf.cell_mut((x, y)) {
        cell.set_symbol(" ").set_bg(color);
    }
}

/// Terminal color for a bone color.
pub(crate) fn terminal(color: Rgba) -> Color {
    to_terminal_color(color, BACKDROP)
}
