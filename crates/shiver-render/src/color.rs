//! Color utility functions for painting bones.

use ratatui::style::Color;
use shiver_core::Rgba;

/// Convert a color to a terminal color, compositing any transparency over
/// `backdrop`.
pub fn to_terminal_color(color: Rgba, backdrop: Rgba) -> Color {
    let alpha = color.a.clamp(0.0, 1.0);
    let blend = |fg: f32, bg: f32| fg * alpha + bg * (1.0 - alpha);
    let [r, g, b, _] = Rgba::rgb(
        blend(color.r, backdrop.r),
        blend(color.g, backdrop.g),
        blend(color.b, backdrop.b),
    )
    .to_bytes();
    Color::Rgb(r, g, b)
}

/// Three-stop gradient `[base, highlight, base]` sampled at `s` in `[0, 1]`.
pub fn band_color(s: f32, base: &Rgba, highlight: &Rgba) -> Rgba {
    let s = s.clamp(0.0, 1.0);
    let mix = 1.0 - (2.0 * s - 1.0).abs();
    shiver_core::interpolate(mix, base, highlight)
}
