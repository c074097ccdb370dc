//! Sweep geometry for shimmer bands.
//!
//! A shimmer band is a linear gradient painted into a rectangle (the band)
//! that is translated, and for diagonal directions rotated, across a bone on
//! every tick. The band itself is always painted the same way, so the travel
//! direction is expressed purely through the order of the output ranges.
//!
//! Diagonal sweeps are derived assuming the bone is taller than wide. For
//! wide bones the rotation gains a correction term and the interpolated
//! offsets are swapped onto the other axes.

use std::f32::consts::FRAC_PI_2;

use crate::animation::{AnimationMode, Direction};
use crate::bone::Size;

/// Oversize factor applied to the longer side of a diagonal band.
const DIAGONAL_BAND_SCALE: f32 = 1.5;

/// Translation and rotation applied to the band at one point in time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SweepTransform {
    pub translate_x: f32,
    pub translate_y: f32,
    pub rotate_radians: f32,
}

/// End point of the gradient axis in the band's unit square. The start point
/// is always the origin.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GradientEndpoint {
    pub x: f32,
    pub y: f32,
}

impl GradientEndpoint {
    pub const NONE: GradientEndpoint = GradientEndpoint { x: 0.0, y: 0.0 };
    pub const HORIZONTAL: GradientEndpoint = GradientEndpoint { x: 1.0, y: 0.0 };
    pub const VERTICAL: GradientEndpoint = GradientEndpoint { x: 0.0, y: 1.0 };
}

/// Everything needed to paint the band at one point in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sweep {
    pub transform: SweepTransform,
    pub gradient_end: GradientEndpoint,
    pub gradient_size: Size,
}

/// Start and end of an output range, sampled linearly.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Span {
    start: f32,
    end: f32,
}

impl Span {
    const ZERO: Span = Span {
        start: 0.0,
        end: 0.0,
    };

    fn new(start: f32, end: f32) -> Self {
        Self { start, end }
    }

    /// `[-extent, +extent]`, or reversed.
    fn symmetric(extent: f32, forward: bool) -> Self {
        if forward {
            Self::new(-extent, extent)
        } else {
            Self::new(extent, -extent)
        }
    }

    fn reversed(self) -> Self {
        Self::new(self.end, self.start)
    }

    fn at(self, t: f32) -> f32 {
        self.start + (self.end - self.start) * t
    }
}

/// Time-invariant part of a sweep, computed once per bone and sampled on
/// every tick with [`SweepPath::at`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SweepPath {
    x: Span,
    y: Span,
    rotate_radians: f32,
    gradient_end: GradientEndpoint,
    gradient_size: Size,
}

impl SweepPath {
    /// Derive the path for a bone of the given resolved size.
    pub fn new(width: f32, height: f32, direction: Direction, mode: AnimationMode) -> Self {
        let width = sanitize(width);
        let height = sanitize(height);
        let size = Size::new(width, height);

        if mode != AnimationMode::Shiver {
            return Self::still(size, GradientEndpoint::NONE);
        }

        let gradient_end = gradient_endpoint(width, height, direction);
        match direction {
            Direction::HorizontalRight | Direction::HorizontalLeft => Self {
                x: Span::symmetric(width, direction == Direction::HorizontalRight),
                ..Self::still(size, gradient_end)
            },
            Direction::VerticalDown | Direction::VerticalTop => Self {
                y: Span::symmetric(height, direction == Direction::VerticalDown),
                ..Self::still(size, gradient_end)
            },
            Direction::DiagonalTopLeft
            | Direction::DiagonalTopRight
            | Direction::DiagonalDownLeft
            | Direction::DiagonalDownRight => diagonal(width, height, direction, gradient_end),
        }
    }

    fn still(gradient_size: Size, gradient_end: GradientEndpoint) -> Self {
        Self {
            x: Span::ZERO,
            y: Span::ZERO,
            rotate_radians: 0.0,
            gradient_end,
            gradient_size,
        }
    }

    /// Sample the path at timeline value `t`, clamped to `[0, 1]`.
    pub fn at(&self, t: f32) -> Sweep {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        Sweep {
            transform: SweepTransform {
                translate_x: self.x.at(t),
                translate_y: self.y.at(t),
                rotate_radians: self.rotate_radians,
            },
            gradient_end: self.gradient_end,
            gradient_size: self.gradient_size,
        }
    }

    /// Size of the band, oversized along the longer side for diagonals.
    pub fn gradient_size(&self) -> Size {
        self.gradient_size
    }
}

fn sanitize(length: f32) -> f32 {
    if length.is_finite() {
        length.max(0.0)
    } else {
        0.0
    }
}

fn gradient_endpoint(width: f32, height: f32, direction: Direction) -> GradientEndpoint {
    match direction {
        Direction::HorizontalLeft | Direction::HorizontalRight => GradientEndpoint::HORIZONTAL,
        Direction::VerticalTop | Direction::VerticalDown => GradientEndpoint::VERTICAL,
        _ if width > 0.0 && height > 0.0 && width > height => GradientEndpoint::VERTICAL,
        _ => GradientEndpoint::HORIZONTAL,
    }
}

fn diagonal(width: f32, height: f32, direction: Direction, end: GradientEndpoint) -> SweepPath {
    let gradient_size = if height < width {
        Size::new(width * DIAGONAL_BAND_SCALE, height)
    } else {
        Size::new(width, height * DIAGONAL_BAND_SCALE)
    };

    let diagonal = width.hypot(height);
    if diagonal == 0.0 {
        return SweepPath::still(gradient_size, end);
    }

    // Ties count as width-main; the correction terms below are skipped for
    // squares, but the final axis swap still applies.
    let width_main = width >= height;
    let (main, opposite) = if width_main {
        (width, height)
    } else {
        (height, width)
    };
    let square = width == height;

    let angle = (main / diagonal).clamp(-1.0, 1.0).acos();
    let falling = matches!(
        direction,
        Direction::DiagonalDownRight | Direction::DiagonalTopLeft
    );

    let mut rotate = if falling {
        FRAC_PI_2 - angle
    } else {
        FRAC_PI_2 + angle
    };
    if width_main && !square {
        rotate += if falling { 2.0 * angle } else { -2.0 * angle };
    }

    let distance = (diagonal + opposite) / 2.0;
    let sin = angle.sin() * distance;
    let cos = angle.cos() * distance;

    // Down-moving sweeps run x from -sin, right-moving ones run y from -cos.
    let forward_x = matches!(
        direction,
        Direction::DiagonalDownRight | Direction::DiagonalDownLeft
    );
    let forward_y = matches!(
        direction,
        Direction::DiagonalDownRight | Direction::DiagonalTopRight
    );
    let mut x = Span::symmetric(sin, forward_x);
    let mut y = Span::symmetric(cos, forward_y);
    if !falling && !width_main && !square {
        x = x.reversed();
        y = y.reversed();
    }
    if width_main {
        std::mem::swap(&mut x, &mut y);
    }

    SweepPath {
        x,
        y,
        rotate_radians: rotate,
        gradient_end: end,
        gradient_size,
    }
}

/// Compute the band placement for a bone at timeline value `t`.
pub fn compute_sweep(
    width: f32,
    height: f32,
    direction: Direction,
    mode: AnimationMode,
    t: f32,
) -> Sweep {
    SweepPath::new(width, height, direction, mode).at(t)
}

#[cfg(test)]
mod tests {
    use std::f32::consts::{FRAC_PI_4, PI};

    use approx::assert_abs_diff_eq;

    use super::*;

    const EPS: f32 = 1e-3;

    fn shiver(w: f32, h: f32, direction: Direction, t: f32) -> SweepTransform {
        compute_sweep(w, h, direction, AnimationMode::Shiver, t).transform
    }

    #[test]
    fn test_wide_diagonal_down_right_scenario() {
        let start = shiver(100.0, 50.0, Direction::DiagonalDownRight, 0.0);
        let angle = (100.0f32 / 12500.0f32.sqrt()).acos();
        assert_abs_diff_eq!(angle, 0.4636, epsilon = EPS);
        assert_abs_diff_eq!(start.rotate_radians, FRAC_PI_2 + angle, epsilon = EPS);
        assert_abs_diff_eq!(start.rotate_radians, 2.034, epsilon = EPS);

        // distance = (diagonal + opposite) / 2, swapped onto the other axes.
        let distance = (12500.0f32.sqrt() + 50.0) / 2.0;
        assert_abs_diff_eq!(distance, 80.90, epsilon = 1e-2);
        assert_abs_diff_eq!(start.translate_x, -angle.cos() * distance, epsilon = EPS);
        assert_abs_diff_eq!(start.translate_y, -angle.sin() * distance, epsilon = EPS);
        assert_abs_diff_eq!(start.translate_x, -72.1, epsilon = 0.5);
        assert_abs_diff_eq!(start.translate_y, -36.1, epsilon = 0.5);

        let end = shiver(100.0, 50.0, Direction::DiagonalDownRight, 1.0);
        assert_abs_diff_eq!(end.translate_x, -start.translate_x, epsilon = EPS);
        assert_abs_diff_eq!(end.translate_y, -start.translate_y, epsilon = EPS);
    }

    #[test]
    fn test_endpoints_and_midpoint() {
        for direction in Direction::ALL {
            let a = shiver(40.0, 90.0, direction, 0.0);
            let b = shiver(40.0, 90.0, direction, 1.0);
            let mid = shiver(40.0, 90.0, direction, 0.5);
            let mid_x = (a.translate_x + b.translate_x) / 2.0;
            let mid_y = (a.translate_y + b.translate_y) / 2.0;
            assert_abs_diff_eq!(mid.translate_x, mid_x, epsilon = EPS);
            assert_abs_diff_eq!(mid.translate_y, mid_y, epsilon = EPS);
            // Every range here is symmetric around zero.
            assert_abs_diff_eq!(mid.translate_x, 0.0, epsilon = EPS);
            assert_abs_diff_eq!(mid.translate_y, 0.0, epsilon = EPS);
            assert_eq!(a.rotate_radians, b.rotate_radians);
        }
    }

    #[test]
    fn test_continuous_in_t() {
        for direction in Direction::ALL {
            let mut prev = shiver(70.0, 30.0, direction, 0.0);
            for step in 1..=100 {
                let next = shiver(70.0, 30.0, direction, step as f32 / 100.0);
                assert!((next.translate_x - prev.translate_x).abs() < 2.0);
                assert!((next.translate_y - prev.translate_y).abs() < 2.0);
                prev = next;
            }
        }
    }

    #[test]
    fn test_deterministic() {
        for direction in Direction::ALL {
            assert_eq!(
                compute_sweep(33.0, 17.0, direction, AnimationMode::Shiver, 0.3),
                compute_sweep(33.0, 17.0, direction, AnimationMode::Shiver, 0.3)
            );
        }
    }

    #[test]
    fn test_cardinal_ranges() {
        let right = shiver(20.0, 5.0, Direction::HorizontalRight, 0.0);
        assert_eq!(
            right,
            SweepTransform {
                translate_x: -20.0,
                translate_y: 0.0,
                rotate_radians: 0.0,
            }
        );
        let up = shiver(20.0, 5.0, Direction::VerticalTop, 0.0);
        assert_eq!(
            up,
            SweepTransform {
                translate_x: 0.0,
                translate_y: 5.0,
                rotate_radians: 0.0,
            }
        );
        let down = shiver(20.0, 5.0, Direction::VerticalDown, 1.0);
        assert_eq!(down.translate_y, 5.0);
    }

    #[test]
    fn test_horizontal_directions_mirror() {
        for step in 0..=10 {
            let t = step as f32 / 10.0;
            let right = shiver(48.0, 12.0, Direction::HorizontalRight, t);
            let left = shiver(48.0, 12.0, Direction::HorizontalLeft, t);
            assert_abs_diff_eq!(right.translate_x, -left.translate_x, epsilon = EPS);
        }
    }

    #[test]
    fn test_square_bones_skip_aspect_correction() {
        let falling = shiver(10.0, 10.0, Direction::DiagonalDownRight, 0.0);
        let rising = shiver(10.0, 10.0, Direction::DiagonalTopRight, 0.0);
        assert_abs_diff_eq!(falling.rotate_radians, FRAC_PI_4, epsilon = EPS);
        assert_abs_diff_eq!(rising.rotate_radians, 3.0 * FRAC_PI_4, epsilon = EPS);

        // Same travel distance, mirrored top to bottom.
        assert_abs_diff_eq!(falling.translate_x, rising.translate_x, epsilon = EPS);
        assert!(falling.translate_x < 0.0);
        assert_abs_diff_eq!(falling.translate_y, -rising.translate_y, epsilon = EPS);
    }

    #[test]
    fn test_top_left_runs_down_right_backwards() {
        for (w, h) in [(100.0, 50.0), (50.0, 100.0), (30.0, 30.0)] {
            for step in 0..=4 {
                let t = step as f32 / 4.0;
                let forward = shiver(w, h, Direction::DiagonalDownRight, t);
                let backward = shiver(w, h, Direction::DiagonalTopLeft, 1.0 - t);
                assert_abs_diff_eq!(forward.translate_x, backward.translate_x, epsilon = EPS);
                assert_abs_diff_eq!(forward.translate_y, backward.translate_y, epsilon = EPS);
                assert_eq!(forward.rotate_radians, backward.rotate_radians);
            }
        }
    }

    #[test]
    fn test_tall_bone_reverses_anti_diagonal_ranges() {
        // Taller than wide: no swap, and the TopRight/DownLeft ranges flip.
        let w: f32 = 50.0;
        let h: f32 = 100.0;
        let diagonal = w.hypot(h);
        let angle = (h / diagonal).acos();
        let distance = (diagonal + w) / 2.0;
        let sin = angle.sin() * distance;
        let cos = angle.cos() * distance;

        let top_right = shiver(w, h, Direction::DiagonalTopRight, 0.0);
        let rotate = FRAC_PI_2 + angle;
        assert_abs_diff_eq!(top_right.translate_x, -sin, epsilon = EPS);
        assert_abs_diff_eq!(top_right.translate_y, cos, epsilon = EPS);
        assert_abs_diff_eq!(top_right.rotate_radians, rotate, epsilon = EPS);

        let down_left = shiver(w, h, Direction::DiagonalDownLeft, 0.0);
        assert_abs_diff_eq!(down_left.translate_x, sin, epsilon = EPS);
        assert_abs_diff_eq!(down_left.translate_y, -cos, epsilon = EPS);
    }

    #[test]
    fn test_wide_bone_anti_diagonal_correction() {
        let top_right = shiver(100.0, 50.0, Direction::DiagonalTopRight, 0.0);
        let angle = (100.0f32 / 12500.0f32.sqrt()).acos();
        let rotate = FRAC_PI_2 - angle;
        assert_abs_diff_eq!(top_right.rotate_radians, rotate, epsilon = EPS);
        // Pre-swap x = +sin, y = -cos; swapped onto the other axes.
        let distance = (12500.0f32.sqrt() + 50.0) / 2.0;
        let sin = angle.sin() * distance;
        let cos = angle.cos() * distance;
        assert_abs_diff_eq!(top_right.translate_x, -cos, epsilon = EPS);
        assert_abs_diff_eq!(top_right.translate_y, sin, epsilon = EPS);
    }

    #[test]
    fn test_zero_size_is_zero_transform() {
        let modes = [
            AnimationMode::Pulse,
            AnimationMode::Shiver,
            AnimationMode::None,
        ];
        for mode in modes {
            for direction in Direction::ALL {
                for t in [0.0, 0.25, 1.0] {
                    let sweep = compute_sweep(0.0, 0.0, direction, mode, t);
                    assert_eq!(sweep.transform, SweepTransform::default());
                    assert!(!sweep.gradient_size.width.is_nan());
                    assert!(!sweep.gradient_size.height.is_nan());
                }
            }
        }
    }

    #[test]
    fn test_degenerate_lines_stay_finite() {
        for direction in Direction::ALL {
            for (w, h) in [(0.0, 10.0), (10.0, 0.0)] {
                let transform = shiver(w, h, direction, 0.7);
                assert!(transform.translate_x.is_finite());
                assert!(transform.translate_y.is_finite());
                assert!(transform.rotate_radians.is_finite());
                assert!(transform.rotate_radians <= PI);
            }
        }
    }

    fn shiver_end(w: f32, h: f32, direction: Direction) -> GradientEndpoint {
        let sweep = compute_sweep(w, h, direction, AnimationMode::Shiver, 0.0);
        sweep.gradient_end
    }

    fn band_size(w: f32, h: f32, direction: Direction) -> Size {
        let path = SweepPath::new(w, h, direction, AnimationMode::Shiver);
        path.gradient_size()
    }

    #[test]
    fn test_gradient_endpoints() {
        let horizontal = GradientEndpoint::HORIZONTAL;
        let vertical = GradientEndpoint::VERTICAL;
        let left = Direction::HorizontalLeft;
        let top_left = Direction::DiagonalTopLeft;
        assert_eq!(shiver_end(10.0, 5.0, left), horizontal);
        assert_eq!(shiver_end(10.0, 5.0, Direction::VerticalTop), vertical);
        assert_eq!(shiver_end(10.0, 5.0, top_left), vertical);
        assert_eq!(shiver_end(5.0, 10.0, top_left), horizontal);
        assert_eq!(shiver_end(10.0, 0.0, top_left), horizontal);

        let pulse = compute_sweep(10.0, 5.0, left, AnimationMode::Pulse, 0.0);
        assert_eq!(pulse.gradient_end, GradientEndpoint::NONE);
    }

    #[test]
    fn test_gradient_band_size() {
        let right = Direction::HorizontalRight;
        let down_right = Direction::DiagonalDownRight;
        let top_left = Direction::DiagonalTopLeft;
        assert_eq!(band_size(10.0, 4.0, right), Size::new(10.0, 4.0));
        assert_eq!(band_size(10.0, 4.0, down_right), Size::new(15.0, 4.0));
        assert_eq!(band_size(4.0, 10.0, down_right), Size::new(4.0, 15.0));
        assert_eq!(band_size(6.0, 6.0, top_left), Size::new(6.0, 9.0));
    }

    #[test]
    fn test_pulse_mode_does_not_move() {
        let direction = Direction::DiagonalDownRight;
        let sweep = compute_sweep(10.0, 4.0, direction, AnimationMode::Pulse, 0.6);
        assert_eq!(sweep.transform, SweepTransform::default());
        assert_eq!(sweep.gradient_size, Size::new(10.0, 4.0));
    }

    #[test]
    fn test_t_is_clamped() {
        let below = shiver(10.0, 2.0, Direction::HorizontalRight, -1.0);
        let above = shiver(10.0, 2.0, Direction::HorizontalRight, 3.0);
        assert_eq!(below.translate_x, -10.0);
        assert_eq!(above.translate_x, 10.0);
        let nan = shiver(10.0, 2.0, Direction::HorizontalRight, f32::NAN);
        assert_eq!(nan.translate_x, -10.0);
    }
}
