//! Resolution of declarative bone layouts into descriptor trees.
//!
//! Resolution is pure and runs only when its inputs change. The resulting
//! tree is what renderers walk on every tick.

use tracing::{debug, warn};

use crate::animation::Animation;
use crate::bone::{BoneKey, BoneSpec, FlexDirection, Size};
use crate::color::Rgba;

/// Corner radius used when a bone does not declare one.
pub const DEFAULT_BORDER_RADIUS: f32 = 4.0;

/// Real content that can describe its own placeholder shape.
pub trait BoneSource {
    /// The style of this element, read as a bone.
    fn bone_spec(&self) -> BoneSpec;
}

impl BoneSource for BoneSpec {
    fn bone_spec(&self) -> BoneSpec {
        self.clone()
    }
}

/// A bone ready for rendering.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedBone {
    /// Layout-only node wrapping its resolved children.
    Container {
        key: BoneKey,
        size: Size,
        flex_direction: FlexDirection,
        gap: f32,
        margin: f32,
        children: Vec<ResolvedBone>,
    },
    /// A painted, animated placeholder.
    Leaf {
        key: BoneKey,
        size: Size,
        border_radius: f32,
        background_color: Option<Rgba>,
        margin: f32,
        animation: Animation,
    },
}

impl ResolvedBone {
    /// Explicit keys are used as given and are not checked against the
    /// positional keys of their siblings, so a bone keyed `"1"` next to an
    /// unkeyed second bone yields two bones keyed `"1"`.
    pub fn key(&self) -> &BoneKey {
        match self {
            ResolvedBone::Container { key, .. } | ResolvedBone::Leaf { key, .. } => key,
        }
    }

    pub fn size(&self) -> Size {
        match self {
            ResolvedBone::Container { size, .. } | ResolvedBone::Leaf { size, .. } => *size,
        }
    }

    pub fn margin(&self) -> f32 {
        match self {
            ResolvedBone::Container { margin, .. } | ResolvedBone::Leaf { margin, .. } => *margin,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, ResolvedBone::Leaf { .. })
    }

    /// Number of leaves in this subtree.
    pub fn leaf_count(&self) -> usize {
        match self {
            ResolvedBone::Leaf { .. } => 1,
            ResolvedBone::Container { children, .. } => {
                children.iter().map(ResolvedBone::leaf_count).sum()
            }
        }
    }
}

/// Resolve `layout` into bones, or mirror `children` when the layout is empty.
///
/// Unkeyed bones get their index below the parent as a key, prefixed with
/// the parent's key when nested.
///
/// `container` is the measured size of the skeleton container; placeholder
/// dimensions resolve against it, or to zero before it has been measured.
pub fn resolve<C: BoneSource>(
    layout: &[BoneSpec],
    children: &[C],
    container: Option<Size>,
    animation: Animation,
) -> Vec<ResolvedBone> {
    let resolver = Resolver {
        container,
        animation,
    };
    if layout.is_empty() {
        children
            .iter()
            .enumerate()
            .map(|(index, child)| {
                resolver.leaf(&child.bone_spec(), BoneKey::positional(None, index))
            })
            .collect()
    } else {
        resolver.level(layout, None)
    }
}

struct Resolver {
    container: Option<Size>,
    animation: Animation,
}

impl Resolver {
    fn level(&self, specs: &[BoneSpec], parent: Option<&BoneKey>) -> Vec<ResolvedBone> {
        specs
            .iter()
            .enumerate()
            .map(|(index, spec)| {
                let key = spec
                    .key
                    .clone()
                    .unwrap_or_else(|| BoneKey::positional(parent, index));
                if spec.is_container() {
                    let children = self.level(&spec.children, Some(&key));
                    ResolvedBone::Container {
                        size: self.size(spec),
                        flex_direction: spec.flex_direction.unwrap_or_default(),
                        gap: spec.gap.unwrap_or(0.0).max(0.0),
                        margin: spec.margin.unwrap_or(0.0).max(0.0),
                        children,
                        key,
                    }
                } else {
                    self.leaf(spec, key)
                }
            })
            .collect()
    }

    fn leaf(&self, spec: &BoneSpec, key: BoneKey) -> ResolvedBone {
        let background_color = spec.background_color.as_ref().and_then(|color| {
            color
                .parse()
                .inspect_err(|err| warn!(%key, %err, "ignoring bone background color"))
                .ok()
        });
        ResolvedBone::Leaf {
            size: self.size(spec),
            border_radius: spec
                .border_radius
                .filter(|r| r.is_finite())
                .unwrap_or(DEFAULT_BORDER_RADIUS)
                .max(0.0),
            background_color,
            margin: spec.margin.unwrap_or(0.0).max(0.0),
            animation: self.animation,
            key,
        }
    }

    fn size(&self, spec: &BoneSpec) -> Size {
        Size::new(
            spec.width.resolve(self.container.map(|c| c.width)),
            spec.height.resolve(self.container.map(|c| c.height)),
        )
    }
}

/// Inputs a resolved tree was built from.
#[derive(Debug)]
struct TreeInputs {
    layout: Vec<BoneSpec>,
    children: Vec<BoneSpec>,
    container: Option<Size>,
    animation: Animation,
}

impl TreeInputs {
    fn matches<C: BoneSource>(
        &self,
        layout: &[BoneSpec],
        children: &[C],
        container: Option<Size>,
        animation: Animation,
    ) -> bool {
        // Children only feed the tree when there is no layout.
        self.container == container
            && self.animation == animation
            && self.layout.as_slice() == layout
            && (!layout.is_empty() || self.children_match(children))
    }

    fn children_match<C: BoneSource>(&self, children: &[C]) -> bool {
        let stored = &self.children;
        stored.len() == children.len()
            && stored
                .iter()
                .zip(children)
                .all(|(spec, child)| *spec == child.bone_spec())
    }
}

/// Memoized resolution: the tree is rebuilt only when its inputs change.
#[derive(Debug, Default)]
pub struct BoneTree {
    inputs: Option<TreeInputs>,
    bones: Vec<ResolvedBone>,
    resolutions: u64,
}

impl BoneTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the tree for these inputs, resolving only if they changed.
    /// The boolean is true when a new tree was built.
    pub fn update<C: BoneSource>(
        &mut self,
        layout: &[BoneSpec],
        children: &[C],
        container: Option<Size>,
        animation: Animation,
    ) -> (&[ResolvedBone], bool) {
        let fresh = match &self.inputs {
            Some(inputs) => inputs.matches(layout, children, container, animation),
            None => false,
        };
        if fresh {
            return (self.bones.as_slice(), false);
        }

        let inputs = TreeInputs {
            layout: layout.to_vec(),
            children: if layout.is_empty() {
                children.iter().map(BoneSource::bone_spec).collect()
            } else {
                Vec::new()
            },
            container,
            animation,
        };

        self.bones = resolve(&inputs.layout, &inputs.children, container, animation);
        self.resolutions += 1;
        debug!(
            bones = self.bones.len(),
            resolutions = self.resolutions,
            "resolved bone tree"
        );
        self.inputs = Some(inputs);
        (self.bones.as_slice(), true)
    }

    pub fn bones(&self) -> &[ResolvedBone] {
        &self.bones
    }

    /// How many times the tree has actually been resolved.
    pub fn resolutions(&self) -> u64 {
        self.resolutions
    }

    /// Drop the tree, e.g. when loading finishes.
    pub fn clear(&mut self) {
        self.inputs = None;
        self.bones.clear();
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::animation::Direction;
    use crate::bone::Dimension;

    fn keys(bones: &[ResolvedBone]) -> Vec<String> {
        let mut out = Vec::new();
        for bone in bones {
            out.push(bone.key().to_string());
            if let ResolvedBone::Container { children, .. } = bone {
                out.extend(keys(children));
            }
        }
        out
    }

    /// Content that counts how often it is asked for its bone.
    struct Counted<'a>(&'a Cell<usize>);

    impl BoneSource for Counted<'_> {
        fn bone_spec(&self) -> BoneSpec {
            self.0.set(self.0.get() + 1);
            BoneSpec::sized(4.0, 1.0)
        }
    }

    fn nested_layout() -> Vec<BoneSpec> {
        let pair = vec![BoneSpec::sized(5.0, 1.0), BoneSpec::sized(5.0, 1.0)];
        let row = BoneSpec::sized(0.0, 0.0)
            .with_children(FlexDirection::Row, pair);
        let column = vec![BoneSpec::sized(20.0, 1.0), row];
        vec![
            BoneSpec::sized(8.0, 4.0).with_key("avatar"),
            BoneSpec::new(Dimension::Fill, Dimension::Fixed(6.0))
                .with_children(FlexDirection::Column, column),
        ]
    }

    #[test]
    fn test_layout_leaves_and_containers() {
        let bones = resolve::<BoneSpec>(
            &nested_layout(),
            &[],
            Some(Size::new(40.0, 12.0)),
            Animation::Pulse,
        );
        assert_eq!(bones.len(), 2);
        assert!(bones[0].is_leaf());
        assert!(!bones[1].is_leaf());
        assert_eq!(bones[1].size(), Size::new(40.0, 6.0));
        assert_eq!(bones[1].leaf_count(), 3);
        match &bones[0] {
            ResolvedBone::Leaf {
                animation,
                border_radius,
                ..
            } => {
                assert_eq!(*animation, Animation::Pulse);
                assert_eq!(*border_radius, DEFAULT_BORDER_RADIUS);
            }
            other => panic!("expected leaf, got {other:?}"),
        }
    }

    #[test]
    fn test_nested_keys_do_not_collide() {
        let bones = resolve::<BoneSpec>(&nested_layout(), &[], None, Animation::None);
        assert_eq!(
            keys(&bones),
            vec!["avatar", "1", "1_0", "1_1", "1_1_0", "1_1_1"]
        );
    }

    #[test]
    fn test_explicit_keys_prefix_children() {
        let card = BoneSpec::sized(0.0, 0.0)
            .with_key("card")
            .with_children(FlexDirection::Row, vec![BoneSpec::sized(1.0, 1.0)]);
        let bones = resolve::<BoneSpec>(&[card], &[], None, Animation::None);
        assert_eq!(keys(&bones), vec!["card", "card_0"]);
    }

    #[test]
    fn test_explicit_key_may_repeat_a_positional_key() {
        let layout = vec![
            BoneSpec::sized(1.0, 1.0).with_key("1"),
            BoneSpec::sized(1.0, 1.0),
        ];
        let bones = resolve::<BoneSpec>(&layout, &[], None, Animation::None);
        assert_eq!(keys(&bones), vec!["1", "1"]);
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let container = Some(Size::new(30.0, 10.0));
        let animation = Animation::Shiver(Direction::DiagonalDownLeft);
        let first = resolve::<BoneSpec>(&nested_layout(), &[], container, animation);
        let second = resolve::<BoneSpec>(&nested_layout(), &[], container, animation);
        assert_eq!(first, second);
    }

    #[test]
    fn test_children_fallback_mirrors_content() {
        let children = vec![
            BoneSpec::sized(3.0, 1.0),
            BoneSpec::new(Dimension::Fill, Dimension::Fixed(2.0))
                .with_radius(0.0),
        ];
        let container = Some(Size::new(25.0, 9.0));
        let bones = resolve(&[], &children, container, Animation::Pulse);
        assert_eq!(keys(&bones), vec!["0", "1"]);
        assert!(bones.iter().all(ResolvedBone::is_leaf));
        assert_eq!(bones[1].size(), Size::new(25.0, 2.0));
    }

    #[test]
    fn test_children_fallback_flattens_nested_content() {
        let nested = BoneSpec::sized(10.0, 3.0)
            .with_children(FlexDirection::Row, vec![BoneSpec::sized(1.0, 1.0)]);
        let bones = resolve(&[], &[nested], None, Animation::Pulse);
        assert_eq!(bones.len(), 1);
        assert!(bones[0].is_leaf());
        assert_eq!(bones[0].size(), Size::new(10.0, 3.0));
    }

    #[test]
    fn test_placeholder_without_measurement_is_zero() {
        let layout = vec![BoneSpec::new(Dimension::Fill, Dimension::Fill)];
        let bones = resolve::<BoneSpec>(&layout, &[], None, Animation::Pulse);
        assert_eq!(bones[0].size(), Size::ZERO);
    }

    #[test]
    fn test_invalid_background_color_is_dropped() {
        let layout = vec![
            BoneSpec::sized(1.0, 1.0).with_color("not-a-color"),
            BoneSpec::sized(1.0, 1.0).with_color("#102030"),
        ];
        let bones = resolve::<BoneSpec>(&layout, &[], None, Animation::None);
        let colors: Vec<Option<Rgba>> = bones
            .iter()
            .map(|bone| match bone {
                ResolvedBone::Leaf {
                    background_color, ..
                } => *background_color,
                ResolvedBone::Container { .. } => None,
            })
            .collect();
        assert_eq!(colors, vec![None, Some(Rgba::rgb(16.0, 32.0, 48.0))]);
    }

    #[test]
    fn test_bone_tree_memoizes() {
        let mut tree = BoneTree::new();
        let layout = nested_layout();
        let none: &[BoneSpec] = &[];
        let size = Some(Size::new(40.0, 10.0));
        let wider = Some(Size::new(41.0, 10.0));

        let (_, built) = tree.update(&layout, none, size, Animation::Pulse);
        assert!(built);
        let (_, built) = tree.update(&layout, none, size, Animation::Pulse);
        assert!(!built);
        assert_eq!(tree.resolutions(), 1);

        let (_, built) = tree.update(&layout, none, wider, Animation::Pulse);
        assert!(built);
        let (_, built) = tree.update(&layout, none, wider, Animation::None);
        assert!(built);
        assert_eq!(tree.resolutions(), 3);

        tree.clear();
        assert!(tree.bones().is_empty());
    }

    #[test]
    fn test_bone_tree_ignores_children_when_layout_given() {
        let mut tree = BoneTree::new();
        let layout = vec![BoneSpec::sized(2.0, 2.0)];
        let small = [BoneSpec::sized(1.0, 1.0)];
        let large = [BoneSpec::sized(9.0, 9.0)];
        tree.update(&layout, &small, None, Animation::Pulse);
        let (_, built) = tree.update(&layout, &large, None, Animation::Pulse);
        assert!(!built);
    }

    #[test]
    fn test_bone_tree_reads_content_only_when_needed() {
        let calls = Cell::new(0);
        let content = [Counted(&calls), Counted(&calls)];
        let layout = vec![BoneSpec::sized(2.0, 2.0)];
        let mut tree = BoneTree::new();

        tree.update(&layout, &content, None, Animation::Pulse);
        tree.update(&layout, &content, None, Animation::Pulse);
        assert_eq!(calls.get(), 0);

        let (_, built) = tree.update(&[], &content, None, Animation::Pulse);
        assert!(built);
        assert_eq!(calls.get(), 2);

        let (_, built) = tree.update(&[], &content, None, Animation::Pulse);
        assert!(!built);
        assert_eq!(calls.get(), 4);

        // A size change is caught before the content is compared.
        let size = Some(Size::new(10.0, 4.0));
        let (_, built) = tree.update(&[], &content, size, Animation::Pulse);
        assert!(built);
        assert_eq!(calls.get(), 6);
        assert_eq!(tree.resolutions(), 3);
    }
}
