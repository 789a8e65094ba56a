//! Integration tests for the flex layout pass.

#![allow(clippy::float_cmp)]

use std::collections::HashMap;

use flexlay::{
    AlignContent, AlignItems, Axis, Dimension, ExecutionStrategy, FlexDirection, FlexResolution,
    FlexWrap, JustifyContent, LayoutConfig, LayoutTree, NodeId, Position, Rect, Size, Spacing,
    Style, compute_layout, compute_layout_with,
};

/// Helper: lay out `root` in a definite `width` x `height` space.
fn layout(tree: &mut LayoutTree, root: NodeId, width: f32, height: f32) {
    compute_layout(tree, root, Size::definite(width, height)).unwrap();
}

/// Helper: a node's box as `(x, y, width, height)`.
fn rect(tree: &LayoutTree, node: NodeId) -> (f32, f32, f32, f32) {
    let l = tree.layout(node).unwrap();
    (l.x, l.y, l.width, l.height)
}

/// Helper: leaf with a fixed size.
fn sized(tree: &mut LayoutTree, width: f32, height: f32) -> NodeId {
    tree.new_leaf(Style::new().with_size_px(width, height)).unwrap()
}

/// Helper: leaf with only a fixed width.
fn wide(tree: &mut LayoutTree, width: f32) -> NodeId {
    tree.new_leaf(Style::new().with_width(Dimension::Fixed(width)))
        .unwrap()
}

fn grow(tree: &mut LayoutTree, factor: f32) -> NodeId {
    tree.new_leaf(Style::new().with_grow(factor)).unwrap()
}

fn xs(tree: &LayoutTree, nodes: &[NodeId]) -> Vec<f32> {
    nodes.iter().map(|&n| rect(tree, n).0).collect()
}

fn ys(tree: &LayoutTree, nodes: &[NodeId]) -> Vec<f32> {
    nodes.iter().map(|&n| rect(tree, n).1).collect()
}

// ---------------------------------------------------------------------------
// Growing and shrinking
//
// [§ 9.7 Resolving Flexible Lengths](https://www.w3.org/TR/css-flexbox-1/#resolve-flexible-lengths)
// ---------------------------------------------------------------------------

#[test]
fn test_equal_grow_splits_container() {
    let mut tree = LayoutTree::new();
    let a = grow(&mut tree, 1.0);
    let b = grow(&mut tree, 1.0);
    let root = tree.new_with_children(Style::new(), &[a, b]).unwrap();
    layout(&mut tree, root, 200.0, 100.0);

    assert_eq!(rect(&tree, a), (0.0, 0.0, 100.0, 100.0));
    assert_eq!(rect(&tree, b), (100.0, 0.0, 100.0, 100.0));
}

#[test]
fn test_weighted_grow() {
    let mut tree = LayoutTree::new();
    let a = grow(&mut tree, 1.0);
    let b = grow(&mut tree, 2.0);
    let root = tree.new_with_children(Style::new(), &[a, b]).unwrap();
    layout(&mut tree, root, 300.0, 100.0);

    assert_eq!(rect(&tree, a).2, 100.0);
    assert_eq!(rect(&tree, b).2, 200.0);
    assert_eq!(rect(&tree, b).0, 100.0);
}

#[test]
fn test_flex_basis_is_respected_before_growth() {
    let mut tree = LayoutTree::new();
    let item = Style::new()
        .with_basis(Dimension::Fixed(50.0))
        .with_grow(1.0);
    let a = tree.new_leaf(item.clone()).unwrap();
    let b = tree.new_leaf(item).unwrap();
    let root = tree.new_with_children(Style::new(), &[a, b]).unwrap();
    layout(&mut tree, root, 200.0, 100.0);

    assert_eq!(rect(&tree, a).2, 100.0);
    assert_eq!(rect(&tree, b).2, 100.0);
}

#[test]
fn test_overflow_shrinks_by_scaled_factor() {
    let mut tree = LayoutTree::new();
    let a = wide(&mut tree, 100.0);
    let b = wide(&mut tree, 200.0);
    let root = tree.new_with_children(Style::new(), &[a, b]).unwrap();
    layout(&mut tree, root, 150.0, 100.0);

    assert_eq!(rect(&tree, a).2, 50.0);
    assert_eq!(rect(&tree, b).2, 100.0);
}

#[test]
fn test_zero_shrink_overflows() {
    let mut tree = LayoutTree::new();
    let item = Style::new()
        .with_width(Dimension::Fixed(100.0))
        .with_shrink(0.0);
    let a = tree.new_leaf(item.clone()).unwrap();
    let b = tree.new_leaf(item).unwrap();
    let root = tree.new_with_children(Style::new(), &[a, b]).unwrap();
    layout(&mut tree, root, 150.0, 100.0);

    assert_eq!(xs(&tree, &[a, b]), vec![0.0, 100.0]);
    assert_eq!(rect(&tree, b).2, 100.0);
}

#[test]
fn test_max_width_is_applied_after_single_pass() {
    let mut tree = LayoutTree::new();
    let capped = tree
        .new_leaf(
            Style::new()
                .with_grow(1.0)
                .with_max_size(Dimension::Fixed(50.0), Dimension::Undefined),
        )
        .unwrap();
    let b = grow(&mut tree, 1.0);
    let c = grow(&mut tree, 1.0);
    let root = tree.new_with_children(Style::new(), &[capped, b, c]).unwrap();
    layout(&mut tree, root, 300.0, 100.0);

    // The capped item's share is not redistributed.
    assert_eq!(rect(&tree, capped).2, 50.0);
    assert_eq!(rect(&tree, b).2, 100.0);
    assert_eq!(xs(&tree, &[capped, b, c]), vec![0.0, 50.0, 150.0]);
}

#[test]
fn test_iterative_resolution_redistributes_capped_share() {
    let mut tree = LayoutTree::new();
    let capped = tree
        .new_leaf(
            Style::new()
                .with_grow(1.0)
                .with_max_size(Dimension::Fixed(50.0), Dimension::Undefined),
        )
        .unwrap();
    let b = grow(&mut tree, 1.0);
    let c = grow(&mut tree, 1.0);
    let root = tree.new_with_children(Style::new(), &[capped, b, c]).unwrap();
    let config = LayoutConfig::default().with_flex_resolution(FlexResolution::Iterative);
    compute_layout_with(
        &mut tree,
        root,
        Size::definite(300.0, 100.0),
        &config,
        &flexlay::NoMeasure,
    )
    .unwrap();

    assert_eq!(rect(&tree, capped).2, 50.0);
    assert_eq!(rect(&tree, b).2, 125.0);
    assert_eq!(xs(&tree, &[capped, b, c]), vec![0.0, 50.0, 175.0]);
}

#[test]
fn test_min_width_holds_while_shrinking() {
    let mut tree = LayoutTree::new();
    let floor = tree
        .new_leaf(
            Style::new()
                .with_width(Dimension::Fixed(100.0))
                .with_min_size(Dimension::Fixed(80.0), Dimension::Undefined),
        )
        .unwrap();
    let other = wide(&mut tree, 100.0);
    let root = tree.new_with_children(Style::new(), &[floor, other]).unwrap();
    let config = LayoutConfig::default().with_flex_resolution(FlexResolution::Iterative);
    compute_layout_with(
        &mut tree,
        root,
        Size::definite(100.0, 50.0),
        &config,
        &flexlay::NoMeasure,
    )
    .unwrap();

    assert_eq!(rect(&tree, floor).2, 80.0);
    assert_eq!(rect(&tree, other).2, 20.0);
}

// ---------------------------------------------------------------------------
// Justify-content
//
// [§ 8.2 Axis Alignment](https://www.w3.org/TR/css-flexbox-1/#justify-content-property)
// ---------------------------------------------------------------------------

fn justified(mode: JustifyContent, widths: &[f32], container: f32) -> Vec<f32> {
    let mut tree = LayoutTree::new();
    let items: Vec<NodeId> = widths.iter().map(|&w| wide(&mut tree, w)).collect();
    let root = tree
        .new_with_children(Style::new().with_justify_content(mode), &items)
        .unwrap();
    layout(&mut tree, root, container, 50.0);
    xs(&tree, &items)
}

#[test]
fn test_justify_space_between() {
    assert_eq!(
        justified(JustifyContent::SpaceBetween, &[50.0, 50.0], 200.0),
        vec![0.0, 150.0]
    );
}

#[test]
fn test_justify_space_around() {
    assert_eq!(
        justified(JustifyContent::SpaceAround, &[50.0, 50.0], 200.0),
        vec![25.0, 125.0]
    );
}

#[test]
fn test_justify_space_evenly() {
    assert_eq!(
        justified(JustifyContent::SpaceEvenly, &[40.0, 40.0, 40.0], 200.0),
        vec![20.0, 80.0, 140.0]
    );
}

#[test]
fn test_justify_end_and_center() {
    assert_eq!(
        justified(JustifyContent::FlexEnd, &[50.0, 50.0], 200.0),
        vec![100.0, 150.0]
    );
    assert_eq!(
        justified(JustifyContent::Center, &[50.0, 50.0], 200.0),
        vec![50.0, 100.0]
    );
}

#[test]
fn test_column_gap_separates_items() {
    let mut tree = LayoutTree::new();
    let items: Vec<NodeId> = (0..3).map(|_| wide(&mut tree, 20.0)).collect();
    let root = tree
        .new_with_children(Style::new().with_row_column_gap(99.0, 10.0), &items)
        .unwrap();
    layout(&mut tree, root, 200.0, 50.0);

    assert_eq!(xs(&tree, &items), vec![0.0, 30.0, 60.0]);
}

// ---------------------------------------------------------------------------
// Align-items / align-self
//
// [§ 8.3 Cross-axis Alignment](https://www.w3.org/TR/css-flexbox-1/#align-items-property)
// ---------------------------------------------------------------------------

#[test]
fn test_align_center() {
    let mut tree = LayoutTree::new();
    let items = [
        sized(&mut tree, 10.0, 30.0),
        sized(&mut tree, 10.0, 40.0),
        sized(&mut tree, 10.0, 20.0),
    ];
    let root = tree
        .new_with_children(Style::new().with_align_items(AlignItems::Center), &items)
        .unwrap();
    layout(&mut tree, root, 300.0, 100.0);

    assert_eq!(ys(&tree, &items), vec![35.0, 30.0, 40.0]);
}

#[test]
fn test_stretch_overrides_cross_dimension() {
    let mut tree = LayoutTree::new();
    let item = sized(&mut tree, 10.0, 30.0);
    let root = tree.new_with_children(Style::new(), &[item]).unwrap();
    layout(&mut tree, root, 300.0, 100.0);

    assert_eq!(rect(&tree, item), (0.0, 0.0, 10.0, 100.0));
}

#[test]
fn test_stretch_respects_max_cross_size() {
    let mut tree = LayoutTree::new();
    let item = tree
        .new_leaf(
            Style::new()
                .with_width(Dimension::Fixed(10.0))
                .with_max_size(Dimension::Undefined, Dimension::Fixed(30.0)),
        )
        .unwrap();
    let root = tree.new_with_children(Style::new(), &[item]).unwrap();
    layout(&mut tree, root, 300.0, 100.0);

    assert_eq!(rect(&tree, item).3, 30.0);
}

#[test]
fn test_align_self_overrides_container() {
    let mut tree = LayoutTree::new();
    let follows = sized(&mut tree, 10.0, 20.0);
    let overrides = tree
        .new_leaf(
            Style::new()
                .with_size_px(10.0, 20.0)
                .with_align_self(AlignItems::FlexStart),
        )
        .unwrap();
    let root = tree
        .new_with_children(
            Style::new().with_align_items(AlignItems::FlexEnd),
            &[follows, overrides],
        )
        .unwrap();
    layout(&mut tree, root, 100.0, 100.0);

    assert_eq!(ys(&tree, &[follows, overrides]), vec![80.0, 0.0]);
}

#[test]
fn test_baseline_falls_back_to_flex_start() {
    let mut tree = LayoutTree::new();
    let item = sized(&mut tree, 10.0, 10.0);
    let root = tree
        .new_with_children(Style::new().with_align_items(AlignItems::Baseline), &[item])
        .unwrap();
    layout(&mut tree, root, 100.0, 100.0);

    assert_eq!(rect(&tree, item), (0.0, 0.0, 10.0, 10.0));
}

// ---------------------------------------------------------------------------
// Wrapping and align-content
//
// [§ 5.2 Flex Line Wrapping](https://www.w3.org/TR/css-flexbox-1/#flex-wrap-property)
// ---------------------------------------------------------------------------

fn wrapped(tree: &mut LayoutTree, style: Style, count: usize) -> (NodeId, Vec<NodeId>) {
    let items: Vec<NodeId> = (0..count).map(|_| sized(tree, 60.0, 20.0)).collect();
    let root = tree.new_with_children(style, &items).unwrap();
    (root, items)
}

#[test]
fn test_wrap_puts_each_oversized_pair_on_its_own_line() {
    let mut tree = LayoutTree::new();
    let style = Style::new()
        .with_wrap(FlexWrap::Wrap)
        .with_align_items(AlignItems::FlexStart)
        .with_align_content(AlignContent::FlexStart);
    let (root, items) = wrapped(&mut tree, style, 3);
    layout(&mut tree, root, 100.0, 300.0);

    assert_eq!(xs(&tree, &items), vec![0.0, 0.0, 0.0]);
    assert_eq!(ys(&tree, &items), vec![0.0, 20.0, 40.0]);
}

#[test]
fn test_wrapped_lines_stretch_by_default() {
    let mut tree = LayoutTree::new();
    let (root, items) = wrapped(&mut tree, Style::new().with_wrap(FlexWrap::Wrap), 3);
    layout(&mut tree, root, 100.0, 300.0);

    assert_eq!(ys(&tree, &items), vec![0.0, 100.0, 200.0]);
    assert!(items.iter().all(|&item| rect(&tree, item).3 == 100.0));
}

#[test]
fn test_row_gap_separates_lines() {
    let mut tree = LayoutTree::new();
    let style = Style::new()
        .with_wrap(FlexWrap::Wrap)
        .with_align_items(AlignItems::FlexStart)
        .with_align_content(AlignContent::FlexStart)
        .with_row_column_gap(5.0, 0.0);
    let (root, items) = wrapped(&mut tree, style, 2);
    layout(&mut tree, root, 100.0, 200.0);

    assert_eq!(ys(&tree, &items), vec![0.0, 25.0]);
}

#[test]
fn test_align_content_center() {
    let mut tree = LayoutTree::new();
    let style = Style::new()
        .with_wrap(FlexWrap::Wrap)
        .with_align_items(AlignItems::FlexStart)
        .with_align_content(AlignContent::Center);
    let (root, items) = wrapped(&mut tree, style, 2);
    layout(&mut tree, root, 100.0, 100.0);

    assert_eq!(ys(&tree, &items), vec![30.0, 50.0]);
}

#[test]
fn test_align_content_space_between() {
    let mut tree = LayoutTree::new();
    let style = Style::new()
        .with_wrap(FlexWrap::Wrap)
        .with_align_items(AlignItems::FlexStart)
        .with_align_content(AlignContent::SpaceBetween);
    let (root, items) = wrapped(&mut tree, style, 2);
    layout(&mut tree, root, 100.0, 100.0);

    assert_eq!(ys(&tree, &items), vec![0.0, 80.0]);
}

#[test]
fn test_wrap_reverse_stacks_lines_from_cross_end() {
    let mut tree = LayoutTree::new();
    let style = Style::new()
        .with_wrap(FlexWrap::WrapReverse)
        .with_align_items(AlignItems::FlexStart)
        .with_align_content(AlignContent::FlexStart);
    let (root, items) = wrapped(&mut tree, style, 2);
    layout(&mut tree, root, 100.0, 100.0);

    assert_eq!(ys(&tree, &items), vec![80.0, 60.0]);
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

#[test]
fn test_column_matches_row_along_y() {
    let mut tree = LayoutTree::new();
    let ra = grow(&mut tree, 1.0);
    let rb = grow(&mut tree, 1.0);
    let row = tree.new_with_children(Style::new(), &[ra, rb]).unwrap();
    layout(&mut tree, row, 200.0, 100.0);

    let ca = grow(&mut tree, 1.0);
    let cb = grow(&mut tree, 1.0);
    let column = tree
        .new_with_children(Style::new().with_direction(FlexDirection::Column), &[ca, cb])
        .unwrap();
    layout(&mut tree, column, 100.0, 200.0);

    for (r, c) in [(ra, ca), (rb, cb)] {
        let (rx, ry, rw, rh) = rect(&tree, r);
        assert_eq!(rect(&tree, c), (ry, rx, rh, rw));
    }
}

#[test]
fn test_column_reverse_packs_from_bottom() {
    let mut tree = LayoutTree::new();
    let a = sized(&mut tree, 10.0, 50.0);
    let b = sized(&mut tree, 10.0, 30.0);
    let root = tree
        .new_with_children(
            Style::new()
                .with_direction(FlexDirection::ColumnReverse)
                .with_align_items(AlignItems::FlexStart),
            &[a, b],
        )
        .unwrap();
    layout(&mut tree, root, 100.0, 200.0);

    assert_eq!(ys(&tree, &[a, b]), vec![150.0, 120.0]);
}

// ---------------------------------------------------------------------------
// Sizing
// ---------------------------------------------------------------------------

#[test]
fn test_percentages_resolve_against_content_box() {
    let mut tree = LayoutTree::new();
    let child = tree
        .new_leaf(
            Style::new()
                .with_width(Dimension::Percent(50.0))
                .with_height(Dimension::Percent(25.0))
                .with_align_self(AlignItems::FlexStart),
        )
        .unwrap();
    let root = tree
        .new_with_children(
            Style::new().with_padding(Spacing::uniform(Dimension::Percent(10.0))),
            &[child],
        )
        .unwrap();
    layout(&mut tree, root, 400.0, 200.0);

    // Content box is 320 x 160.
    assert_eq!(rect(&tree, child), (0.0, 0.0, 160.0, 40.0));
    assert_eq!(tree.layout(root).unwrap().padding.left, 40.0);
    assert_eq!(tree.layout(root).unwrap().padding.top, 20.0);
}

#[test]
fn test_aspect_ratio_on_root() {
    let mut tree = LayoutTree::new();
    let root = tree
        .new_leaf(
            Style::new()
                .with_width(Dimension::Fixed(160.0))
                .with_aspect_ratio(16.0 / 9.0),
        )
        .unwrap();
    layout(&mut tree, root, 800.0, 600.0);

    let (_, _, width, height) = rect(&tree, root);
    assert_eq!(width, 160.0);
    assert!((height - 90.0).abs() < 1e-3);
}

#[test]
fn test_measure_hook_sizes_leaves() {
    let mut tree = LayoutTree::new();
    let short = tree.new_leaf(Style::new()).unwrap();
    let long = tree.new_leaf(Style::new()).unwrap();
    let text: HashMap<NodeId, Size> = HashMap::from([
        (short, Size::new(40.0, 12.0)),
        (long, Size::new(120.0, 12.0)),
    ]);
    let measure = |node: NodeId, _: Option<f32>, _: Option<f32>, _: Axis| {
        text.get(&node).copied()
    };
    let root = tree
        .new_with_children(
            Style::new()
                .with_align_items(AlignItems::FlexStart)
                .with_gap(8.0),
            &[short, long],
        )
        .unwrap();
    compute_layout_with(
        &mut tree,
        root,
        Size::definite(300.0, 50.0),
        &LayoutConfig::default(),
        &measure,
    )
    .unwrap();

    assert_eq!(rect(&tree, short), (0.0, 0.0, 40.0, 12.0));
    assert_eq!(rect(&tree, long), (48.0, 0.0, 120.0, 12.0));
}

#[test]
fn test_unconstrained_root_wraps_its_content() {
    let mut tree = LayoutTree::new();
    let a = sized(&mut tree, 30.0, 10.0);
    let b = sized(&mut tree, 50.0, 20.0);
    let root = tree
        .new_with_children(
            Style::new()
                .with_direction(FlexDirection::Column)
                .with_gap(4.0),
            &[a, b],
        )
        .unwrap();
    compute_layout(&mut tree, root, Size::UNDEFINED).unwrap();

    assert_eq!(rect(&tree, root), (0.0, 0.0, 50.0, 34.0));
    assert_eq!(ys(&tree, &[a, b]), vec![0.0, 14.0]);
}

#[test]
fn test_measured_leaf_adds_its_padding() {
    let mut tree = LayoutTree::new();
    let label = tree
        .new_leaf(
            Style::new()
                .with_padding(Spacing::all_px(5.0))
                .with_align_self(AlignItems::FlexStart),
        )
        .unwrap();
    let root = tree.new_with_children(Style::new(), &[label]).unwrap();
    let measure = |_: NodeId, _: Option<f32>, _: Option<f32>, _: Axis| Some(Size::new(40.0, 12.0));
    compute_layout_with(
        &mut tree,
        root,
        Size::definite(300.0, 50.0),
        &LayoutConfig::default(),
        &measure,
    )
    .unwrap();

    assert_eq!(rect(&tree, label), (0.0, 0.0, 50.0, 22.0));
}

#[test]
fn test_padding_does_not_enter_the_basis() {
    let mut tree = LayoutTree::new();
    let padded = tree
        .new_leaf(
            Style::new()
                .with_grow(1.0)
                .with_padding(Spacing::all_px(20.0)),
        )
        .unwrap();
    let plain = grow(&mut tree, 1.0);
    let root = tree.new_with_children(Style::new(), &[padded, plain]).unwrap();
    layout(&mut tree, root, 200.0, 100.0);

    assert_eq!(rect(&tree, padded).2, 100.0);
    assert_eq!(rect(&tree, plain), (100.0, 0.0, 100.0, 100.0));
}

#[test]
fn test_container_item_is_not_sized_by_its_children() {
    let mut tree = LayoutTree::new();
    let content = wide(&mut tree, 100.0);
    let panel = tree
        .new_with_children(Style::new().with_grow(1.0), &[content])
        .unwrap();
    let sibling = grow(&mut tree, 1.0);
    let root = tree.new_with_children(Style::new(), &[panel, sibling]).unwrap();
    layout(&mut tree, root, 200.0, 100.0);

    assert_eq!(rect(&tree, panel).2, 100.0);
    assert_eq!(rect(&tree, sibling), (100.0, 0.0, 100.0, 100.0));
}

#[test]
fn test_container_without_size_has_zero_basis() {
    let mut tree = LayoutTree::new();
    let a = sized(&mut tree, 30.0, 10.0);
    let b = sized(&mut tree, 40.0, 10.0);
    let inner = tree
        .new_with_children(Style::new().with_align_self(AlignItems::FlexStart), &[a, b])
        .unwrap();
    let root = tree.new_with_children(Style::new(), &[inner]).unwrap();
    layout(&mut tree, root, 300.0, 100.0);

    // No basis and no width: the container collapses along the main axis
    // and follows the line along the cross axis.
    assert_eq!(rect(&tree, inner), (0.0, 0.0, 0.0, 100.0));
}

#[test]
fn test_item_without_cross_size_takes_line_cross_size() {
    let mut tree = LayoutTree::new();
    let item = wide(&mut tree, 50.0);
    let root = tree
        .new_with_children(Style::new().with_align_items(AlignItems::Center), &[item])
        .unwrap();
    layout(&mut tree, root, 200.0, 100.0);

    assert_eq!(rect(&tree, item), (0.0, 0.0, 50.0, 100.0));
}

#[test]
fn test_wrapped_item_without_cross_size_takes_its_line_height() {
    let mut tree = LayoutTree::new();
    let tall = sized(&mut tree, 40.0, 20.0);
    let open = wide(&mut tree, 40.0);
    let next = sized(&mut tree, 40.0, 30.0);
    let root = tree
        .new_with_children(
            Style::new()
                .with_wrap(FlexWrap::Wrap)
                .with_align_items(AlignItems::FlexEnd)
                .with_align_content(AlignContent::FlexStart),
            &[tall, open, next],
        )
        .unwrap();
    layout(&mut tree, root, 100.0, 200.0);

    assert_eq!(rect(&tree, open), (40.0, 0.0, 40.0, 20.0));
    assert_eq!(rect(&tree, next), (0.0, 20.0, 40.0, 30.0));
}

#[test]
fn test_degenerate_space_never_goes_negative() {
    let mut tree = LayoutTree::new();
    let a = grow(&mut tree, 1.0);
    let b = wide(&mut tree, 40.0);
    let root = tree
        .new_with_children(Style::new().with_padding(Spacing::all_px(10.0)), &[a, b])
        .unwrap();
    compute_layout(&mut tree, root, Size::definite(-50.0, 0.0)).unwrap();

    for node in [root, a, b] {
        let (_, _, width, height) = rect(&tree, node);
        assert!(width >= 0.0 && height >= 0.0, "{node:?}: {width}x{height}");
    }
}

// ---------------------------------------------------------------------------
// Absolute positioning
// ---------------------------------------------------------------------------

#[test]
fn test_absolute_child_does_not_take_space() {
    let mut tree = LayoutTree::new();
    let filler = grow(&mut tree, 1.0);
    let badge = tree
        .new_leaf(
            Style::new()
                .with_position(Position::Absolute)
                .with_size_px(20.0, 10.0)
                .with_inset(Spacing {
                    top: Dimension::Fixed(5.0),
                    right: Dimension::Fixed(5.0),
                    bottom: Dimension::Undefined,
                    left: Dimension::Undefined,
                }),
        )
        .unwrap();
    let root = tree
        .new_with_children(
            Style::new()
                .with_padding(Spacing::all_px(10.0))
                .with_gap(50.0),
            &[filler, badge],
        )
        .unwrap();
    layout(&mut tree, root, 200.0, 100.0);

    assert_eq!(rect(&tree, filler), (0.0, 0.0, 180.0, 80.0));
    assert_eq!(rect(&tree, badge), (155.0, 5.0, 20.0, 10.0));
    assert_eq!(
        tree.absolute_rect(badge),
        Some(Rect::new(165.0, 15.0, 20.0, 10.0))
    );
}

// ---------------------------------------------------------------------------
// Whole-tree behavior
// ---------------------------------------------------------------------------

/// Helper: a card with a header row and a wrapping body, nested a few
/// levels deep.
fn build_page(tree: &mut LayoutTree) -> NodeId {
    let mut cards = Vec::new();
    for i in 0..6 {
        let title = tree
            .new_leaf(Style::new().with_grow(1.0).with_height(Dimension::Fixed(20.0)))
            .unwrap();
        let icon = sized(tree, 16.0, 16.0);
        let header = tree
            .new_with_children(
                Style::new()
                    .with_align_items(AlignItems::Center)
                    .with_gap(4.0),
                &[icon, title],
            )
            .unwrap();
        let tags: Vec<NodeId> = (0..5)
            .map(|j| sized(tree, 30.0 + (i * 5 + j) as f32, 12.0))
            .collect();
        let body = tree
            .new_with_children(
                Style::new()
                    .with_wrap(FlexWrap::Wrap)
                    .with_gap(3.0)
                    .with_grow(1.0),
                &tags,
            )
            .unwrap();
        let card = tree
            .new_with_children(
                Style::new()
                    .with_direction(FlexDirection::Column)
                    .with_padding(Spacing::all_px(6.0))
                    .with_basis(Dimension::Percent(30.0))
                    .with_grow(1.0),
                &[header, body],
            )
            .unwrap();
        cards.push(card);
    }
    tree.new_with_children(
        Style::new()
            .with_wrap(FlexWrap::Wrap)
            .with_justify_content(JustifyContent::SpaceBetween)
            .with_gap(10.0),
        &cards,
    )
    .unwrap()
}

/// Helper: every box in the subtree under `root`, in depth-first order.
fn snapshot(tree: &LayoutTree, root: NodeId) -> Vec<(f32, f32, f32, f32)> {
    let mut boxes = Vec::new();
    let mut stack = vec![root];
    while let Some(node) = stack.pop() {
        boxes.push(rect(tree, node));
        stack.extend(tree.children(node).iter().rev());
    }
    boxes
}

#[test]
fn test_layout_is_idempotent() {
    let mut tree = LayoutTree::new();
    let root = build_page(&mut tree);
    layout(&mut tree, root, 640.0, 480.0);
    let first = snapshot(&tree, root);
    layout(&mut tree, root, 640.0, 480.0);
    assert_eq!(first, snapshot(&tree, root));
}

#[test]
fn test_parallel_matches_sequential() {
    let mut sequential = LayoutTree::new();
    let root = build_page(&mut sequential);
    let mut parallel = sequential.clone();

    layout(&mut sequential, root, 640.0, 480.0);
    let config = LayoutConfig::default().with_strategy(ExecutionStrategy::Parallel);
    compute_layout_with(
        &mut parallel,
        root,
        Size::definite(640.0, 480.0),
        &config,
        &flexlay::NoMeasure,
    )
    .unwrap();

    assert_eq!(snapshot(&sequential, root), snapshot(&parallel, root));
}
