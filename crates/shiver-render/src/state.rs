//! Skeleton state management.

use ratatui::{buffer::Buffer, layout::Rect};
use shiver_core::{
    Animation, AnimationMode, BoneSource, BoneSpec, BoneTree, ColorError, Direction, Palette,
    Size, SkeletonOptions, Timeline,
};
use tracing::debug;

use crate::bones;
use crate::place::{PlacedBone, place};

/// State of one mounted skeleton.
#[derive(Debug)]
pub struct SkeletonState {
    /// Options the skeleton was mounted with.
    options: SkeletonOptions,
    /// Parsed bone and highlight colors.
    palette: Palette,
    /// Animation selected by the options.
    animation: Animation,
    /// Shared timeline read by every bone.
    timeline: Timeline,
    /// Memoized bone tree.
    tree: BoneTree,
    /// Leaves placed for the last measured area.
    placed: Vec<PlacedBone>,
    /// Area the placement was computed for.
    last_area: Rect,
}

impl SkeletonState {
    /// Mount a skeleton. Fails if the palette colors do not parse.
    pub fn new(options: SkeletonOptions, now_ms: u64) -> Result<Self, ColorError> {
        let palette = options.palette()?;
        let animation = options.animation();
        let mut timeline = Timeline::for_animation(animation, options.duration, options.is_loading);
        timeline.restart(now_ms);

        Ok(Self {
            options,
            palette,
            animation,
            timeline,
            tree: BoneTree::new(),
            placed: Vec::new(),
            last_area: Rect::default(),
        })
    }

    pub fn options(&self) -> &SkeletonOptions {
        &self.options
    }

    pub fn animation(&self) -> Animation {
        self.animation
    }

    pub fn is_loading(&self) -> bool {
        self.options.is_loading
    }

    /// Replace all options. The palette is validated before anything changes.
    pub fn set_options(
        &mut self,
        options: SkeletonOptions,
        now_ms: u64,
    ) -> Result<(), ColorError> {
        *self = Self::new(options, now_ms)?;
        Ok(())
    }

    /// Flip the loading flag. Finishing loading drops the bone tree.
    pub fn set_loading(&mut self, is_loading: bool, now_ms: u64) {
        if self.options.is_loading == is_loading {
            return;
        }
        self.options.is_loading = is_loading;
        if !is_loading {
            self.tree.clear();
            self.placed.clear();
        }
        self.restart_timeline(now_ms);
    }

    /// Switch animation, keeping layout and colors.
    pub fn set_animation(&mut self, mode: AnimationMode, direction: Direction, now_ms: u64) {
        self.options.set_animation(mode, direction);
        self.animation = self.options.animation();
        self.restart_timeline(now_ms);
    }

    pub fn set_layout(&mut self, layout: Vec<BoneSpec>) {
        self.options.layout = layout;
    }

    fn restart_timeline(&mut self, now_ms: u64) {
        self.timeline = Timeline::for_animation(
            self.animation,
            self.options.duration,
            self.options.is_loading,
        );
        self.timeline.restart(now_ms);
    }

    /// Current timeline value.
    pub fn timeline_value(&self, now_ms: u64) -> f32 {
        self.timeline.value(now_ms)
    }

    /// Leaves placed by the last render.
    pub fn placed(&self) -> &[PlacedBone] {
        &self.placed
    }

    /// How many times the bone tree has been resolved.
    pub fn resolutions(&self) -> u64 {
        self.tree.resolutions()
    }

    /// Paint bones into `area` while loading. `content` is mirrored into
    /// bones when no explicit layout is configured.
    pub fn render<C: BoneSource>(
        &mut self,
        buf: &mut Buffer,
        area: Rect,
        content: &[C],
        now_ms: u64,
    ) {
        if !self.options.is_loading {
            return;
        }

        let measured = Some(Size::new(area.width as f32, area.height as f32));
        let layout = &self.options.layout;
        let animation = self.animation;
        let (resolved, rebuilt) = self.tree.update(layout, content, measured, animation);

        if rebuilt || area != self.last_area {
            self.placed = place(resolved, area, &self.options.container_style);
            self.last_area = area;
            debug!(leaves = self.placed.len(), ?area, "placed bones");
        }

        let t = self.timeline.value(now_ms);
        for bone in &self.placed {
            bones::paint(buf, area, bone, &self.palette, t);
        }
    }
}
