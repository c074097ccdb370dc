//! Box placement of resolved bone trees.
//!
//! Containers stack their children along their main axis with a gap between
//! siblings, like a flex column or row. Placement runs whenever the tree is
//! re-resolved, never per tick.

use ratatui::layout::Rect;
use shiver_core::{
    Align, Animation, BoneKey, ContainerStyle, FlexDirection, ResolvedBone, Rgba, Size, SweepPath,
};

/// A leaf bone positioned in terminal cells, with its precomputed sweep.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedBone {
    pub key: BoneKey,
    pub x: f32,
    pub y: f32,
    pub size: Size,
    pub border_radius: f32,
    pub background_color: Option<Rgba>,
    pub animation: Animation,
    pub path: SweepPath,
}

impl PlacedBone {
    /// Centre of the bone in cell coordinates.
    pub fn center(&self) -> (f32, f32) {
        (
            self.x + self.size.width / 2.0,
            self.y + self.size.height / 2.0,
        )
    }
}

/// Lay out `bones` inside `area`.
pub fn place(bones: &[ResolvedBone], area: Rect, style: &ContainerStyle) -> Vec<PlacedBone> {
    let padding = style.padding.max(0.0);
    let frame = Frame {
        x: area.x as f32 + padding,
        y: area.y as f32 + padding,
        width: (area.width as f32 - 2.0 * padding).max(0.0),
        height: (area.height as f32 - 2.0 * padding).max(0.0),
    };
    let mut placed = Vec::new();
    stack(
        bones,
        frame,
        style.flex_direction,
        style.gap.max(0.0),
        style.align,
        &mut placed,
    );
    placed
}

/// A box in cell coordinates.
#[derive(Debug, Clone, Copy)]
struct Frame {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

/// Outer extent of a bone, margins included.
fn outer(bone: &ResolvedBone) -> Size {
    let inner = extent(bone);
    let margin = bone.margin();
    Size::new(inner.width + 2.0 * margin, inner.height + 2.0 * margin)
}

/// Size of a bone; containers without a declared size wrap their children.
fn extent(bone: &ResolvedBone) -> Size {
    match bone {
        ResolvedBone::Leaf { size, .. } => *size,
        ResolvedBone::Container {
            size,
            flex_direction,
            gap,
            children,
            ..
        } => {
            let content = content_extent(children, *flex_direction, *gap);
            Size::new(
                wrap(size.width, content.width),
                wrap(size.height, content.height),
            )
        }
    }
}

/// Declared length, or the content's when none is declared.
fn wrap(declared: f32, content: f32) -> f32 {
    if declared > 0.0 { declared } else { content }
}

fn content_extent(children: &[ResolvedBone], direction: FlexDirection, gap: f32) -> Size {
    let gaps = gap * children.len().saturating_sub(1) as f32;
    let (main, cross) = children
        .iter()
        .map(outer)
        .fold((gaps, 0.0f32), |(main, cross), size| {
            let (m, c) = split(size, direction);
            (main + m, cross.max(c))
        });
    join(main, cross, direction)
}

/// Split a size into (main, cross) lengths for `direction`.
fn split(size: Size, direction: FlexDirection) -> (f32, f32) {
    match direction {
        FlexDirection::Column => (size.height, size.width),
        FlexDirection::Row => (size.width, size.height),
    }
}

fn join(main: f32, cross: f32, direction: FlexDirection) -> Size {
    match direction {
        FlexDirection::Column => Size::new(cross, main),
        FlexDirection::Row => Size::new(main, cross),
    }
}

fn offset(free: f32, align: Align) -> f32 {
    match align {
        Align::Center => free / 2.0,
        Align::Start => 0.0,
    }
}

fn stack(
    children: &[ResolvedBone],
    frame: Frame,
    direction: FlexDirection,
    gap: f32,
    align: Align,
    out: &mut Vec<PlacedBone>,
) {
    let content = content_extent(children, direction, gap);
    let (content_main, _) = split(content, direction);
    let (frame_main, frame_cross) = split(Size::new(frame.width, frame.height), direction);
    let mut cursor = offset(frame_main - content_main, align);

    for child in children {
        let (outer_main, outer_cross) = split(outer(child), direction);
        let cross = offset(frame_cross - outer_cross, align);
        let margin = child.margin();
        let (dx, dy) = match direction {
            FlexDirection::Column => (cross, cursor),
            FlexDirection::Row => (cursor, cross),
        };
        let size = extent(child);
        let x = frame.x + dx + margin;
        let y = frame.y + dy + margin;

        match child {
            ResolvedBone::Leaf {
                key,
                border_radius,
                background_color,
                animation,
                ..
            } => out.push(PlacedBone {
                key: key.clone(),
                x,
                y,
                size,
                border_radius: *border_radius,
                background_color: *background_color,
                animation: *animation,
                path: SweepPath::new(
                    size.width,
                    size.height,
                    animation.direction().unwrap_or_default(),
                    animation.mode(),
                ),
            }),
            ResolvedBone::Container {
                flex_direction,
                gap,
                children,
                ..
            } => stack(
                children,
                Frame {
                    x,
                    y,
                    width: size.width,
                    height: size.height,
                },
                *flex_direction,
                *gap,
                Align::Start,
                out,
            ),
        }

        cursor += outer_main + gap;
    }
}
