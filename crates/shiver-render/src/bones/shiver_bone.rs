//! Shimmer bones: a gradient band swept across a bone-colored base.
//!
//! The band is centred on the bone, then translated and rotated by the
//! sweep transform. Each cell is mapped back into the band's unit square to
//! find its position along the gradient axis; cells the band does not cover
//! keep the base color, as if the band were clipped by the bone.

use ratatui::{buffer::Buffer, layout::Rect};
use shiver_core::{Palette, Rgba, Sweep};

use super::{cells, fill, terminal};
use crate::color::band_color;
use crate::place::PlacedBone;

/// Position along the gradient axis, in `[0, 1]`, of a point at offset
/// `(dx, dy)` from the bone centre. `None` when the band misses the point.
pub fn gradient_position(sweep: &Sweep, dx: f32, dy: f32) -> Option<f32> {
    let Sweep {
        transform,
        gradient_end: end,
        gradient_size: size,
    } = sweep;
    if size.width <= 0.0 || size.height <= 0.0 {
        return None;
    }

    // Undo the translation, then the rotation about the band centre.
    let (sin, cos) = transform.rotate_radians.sin_cos();
    let x = dx - transform.translate_x;
    let y = dy - transform.translate_y;
    let local_x = cos * x + sin * y;
    let local_y = -sin * x + cos * y;

    let u = local_x / size.width + 0.5;
    let v = local_y / size.height + 0.5;
    if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
        return None;
    }

    let axis = end.x * end.x + end.y * end.y;
    if axis == 0.0 {
        return None;
    }
    Some(((u * end.x + v * end.y) / axis).clamp(0.0, 1.0))
}

/// Color of the cell at offset `(dx, dy)` from the bone centre.
pub fn cell_color(sweep: &Sweep, base: &Rgba, highlight: &Rgba, dx: f32, dy: f32) -> Rgba {
    match gradient_position(sweep, dx, dy) {
        Some(s) => band_color(s, base, highlight),
        None => *base,
    }
}

pub fn paint(buf: &mut Buffer, clip: Rect, bone: &PlacedBone, palette: &Palette, t: f32) {
    let sweep = bone.path.at(t);
    let base = bone.background_color.unwrap_or(palette.bone);
    for cell in cells(bone, clip) {
        let color = cell_color(&sweep, &base, &palette.highlight, cell.dx, cell.dy);
        fill(buf, cell.x, cell.y, terminal(color));
    }
}
