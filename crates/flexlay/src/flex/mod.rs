//! CSS Flexbox layout of a container's in-flow children.
//!
//! [§ 9 Flex Layout Algorithm](https://www.w3.org/TR/css-flexbox-1/#layout-algorithm)
//!
//! The algorithm is split into pure numeric stages that only see slices
//! of lengths:
//! - [`line`]: collect items into flex lines (§ 9.3)
//! - [`resolve`]: grow/shrink each line's items (§ 9.7)
//! - [`align`]: justify-content, align-items/self, align-content (§ 8)
//!
//! [`layout_flex_items`] feeds them from the tree and maps their flow
//! coordinates (main-start/cross-start relative) back to physical x/y.

pub mod align;
pub mod line;
pub mod resolve;

use flexlay_common::warning::warn_once;

use crate::compute::{LayoutContext, Placement, own_size};
use crate::error::LayoutError;
use crate::geometry::{Axis, Edges, Size};
use crate::style::{AlignItems, FlexWrap, Style};
use crate::tree::{LayoutResult, NodeId};
use crate::values::clamp;

use self::align::{align_content, align_offset, justify};
use self::line::collect_flex_lines;
use self::resolve::{FlexFactors, resolve_flexible_lengths};

/// Per-item data collected during flex layout.
///
/// [§ 9.2 Line Length Determination](https://www.w3.org/TR/css-flexbox-1/#algo-main-item)
struct FlexItem<'a> {
    node: NodeId,
    style: &'a Style,
    /// Resolved margins.
    margin: Edges,
    /// Resolved padding, handed to the child's own layout.
    padding: Edges,
    factors: FlexFactors,
    /// Used main size after resolution and clamping.
    main: f32,
    /// Cross size before stretching, `None` when the item follows the
    /// line's cross size.
    hypothetical_cross: Option<f32>,
}

/// Lay out `children` (all in-flow) inside a content box of size
/// `content`, returning their boxes relative to the content origin.
pub(crate) fn layout_flex_items(
    ctx: &LayoutContext<'_>,
    container: &Style,
    content: Size,
    children: &[NodeId],
) -> Result<Vec<Placement>, LayoutError> {
    if children.is_empty() {
        return Ok(Vec::new());
    }

    let main_axis = container.main_axis();
    let cross_axis = main_axis.other();
    let container_main = content.get(main_axis);
    let container_cross = content.get(cross_axis);
    let reference = Size::new(Some(content.width), Some(content.height));
    let main_gap = container.main_gap();
    let cross_gap = container.cross_gap();

    // STEP 1 (§ 9.2): Determine the flex base size and hypothetical main
    // size of each item.
    let mut items = Vec::with_capacity(children.len());
    for &child in children {
        let style = ctx.tree.node(child)?.style();
        let margin = style.margin.resolve(reference.width, reference.height);
        let padding = style.padding.resolve(reference.width, reference.height);
        let basis = flex_base_size(ctx, child, style, padding, reference, main_axis)?;
        let min = style
            .min_size(main_axis)
            .resolve(Some(container_main))
            .unwrap_or(0.0);
        let max = style
            .max_size(main_axis)
            .resolve(Some(container_main))
            .unwrap_or(f32::INFINITY);
        let factors = FlexFactors::new(basis, style.flex_grow, style.flex_shrink)
            .with_margin(margin.sum(main_axis))
            .with_limits(min, max.max(min));
        items.push(FlexItem {
            node: child,
            style,
            margin,
            padding,
            factors,
            main: 0.0,
            hypothetical_cross: None,
        });
    }

    // STEP 2 (§ 9.3): Collect flex items into flex lines.
    let hypothetical_outer: Vec<f32> = items
        .iter()
        .map(|item| item.factors.hypothetical() + item.factors.margin)
        .collect();
    let mut lines = collect_flex_lines(
        &hypothetical_outer,
        container_main,
        container.flex_wrap,
        main_gap,
    );
    let single_line = container.flex_wrap == FlexWrap::NoWrap;

    // STEP 3 (§ 9.7): Resolve flexible lengths per line, then determine
    // each item's hypothetical cross size with its used main size (§ 9.4).
    for line in &mut lines {
        let factors: Vec<FlexFactors> = items[line.items.clone()]
            .iter()
            .map(|item| item.factors)
            .collect();
        let sizes = resolve_flexible_lengths(
            &factors,
            container_main,
            main_gap,
            ctx.config.flex_resolution,
        );

        let mut line_cross = 0.0_f32;
        for (item, size) in items[line.items.clone()].iter_mut().zip(sizes) {
            item.main = clamp(
                size,
                item.style.min_size(main_axis),
                item.style.max_size(main_axis),
                Some(container_main),
            )
            .max(0.0);
            item.hypothetical_cross = intrinsic_cross_size(
                ctx,
                item.node,
                item.style,
                item.padding,
                item.main,
                reference,
                main_axis,
            )?
            .map(|cross| clamp_cross(item.style, cross, cross_axis, container_cross));
            let contribution = item
                .hypothetical_cross
                .unwrap_or_else(|| clamp_cross(item.style, 0.0, cross_axis, container_cross));
            line_cross = line_cross.max(contribution + item.margin.sum(cross_axis));
        }

        let outer_mains: Vec<f32> = items[line.items.clone()]
            .iter()
            .map(|item| item.main + item.factors.margin)
            .collect();
        line.resolve_main_size(&outer_mains, main_gap);

        // [§ 9.4 step 8](https://www.w3.org/TR/css-flexbox-1/#algo-cross-line)
        //
        // "If the flex container is single-line and has a definite cross
        // size, the cross size of the flex line is the flex container's
        // inner cross size." Otherwise it is the largest outer
        // hypothetical cross size among the line's items.
        line.cross_size = if single_line {
            container_cross
        } else {
            line_cross
        };

        #[cfg(feature = "layout-trace")]
        log::trace!(
            target: "flexlay",
            "line {:?}: main {} of {container_main}, cross {}, sizes {:?}",
            line.items,
            line.main_size,
            line.cross_size,
            items[line.items.clone()].iter().map(|item| item.main).collect::<Vec<_>>()
        );
    }

    // STEP 4 (§ 9.4 step 15): Distribute the lines along the cross axis.
    let mut line_sizes: Vec<f32> = lines.iter().map(|line| line.cross_size).collect();
    let line_offsets = if single_line {
        vec![0.0; lines.len()]
    } else {
        align_content(
            container.align_content,
            &mut line_sizes,
            container_cross,
            cross_gap,
        )
    };

    // STEP 5 (§ 9.5, § 9.6): Main-axis and cross-axis alignment, then
    // map flow coordinates to physical ones.
    let reverse_main = container.flex_direction.is_reverse();
    let reverse_cross = container.flex_wrap == FlexWrap::WrapReverse;
    let mut placements = Vec::with_capacity(items.len());
    for ((line, line_offset), line_cross) in lines.iter().zip(line_offsets).zip(line_sizes) {
        let line_items = &items[line.items.clone()];
        let outer_mains: Vec<f32> = line_items
            .iter()
            .map(|item| item.main + item.factors.margin)
            .collect();
        let positions = justify(
            container.justify_content,
            &outer_mains,
            container_main,
            main_gap,
        );

        for ((item, outer_main), flow_main) in line_items.iter().zip(outer_mains).zip(positions) {
            let align = item.style.effective_align(container.align_items);
            if align == AlignItems::Baseline {
                let _ = warn_once(
                    "flex",
                    "align baseline needs text metrics; falling back to flex-start",
                );
            }

            // Stretched items, and items with no cross size of their own,
            // take the line's cross size.
            let cross_margin = item.margin.sum(cross_axis);
            let cross = match item.hypothetical_cross {
                Some(cross) if align != AlignItems::Stretch => cross,
                _ => clamp_cross(item.style, line_cross - cross_margin, cross_axis, container_cross),
            };
            let outer_cross = cross + cross_margin;
            let flow_cross = line_offset + align_offset(align, outer_cross, line_cross);

            // Outer box start, measured from the physical left/top edge.
            let main_start = if reverse_main {
                container_main - flow_main - outer_main
            } else {
                flow_main
            };
            let cross_start = if reverse_cross {
                container_cross - flow_cross - outer_cross
            } else {
                flow_cross
            };

            let main_pos = main_start + item.margin.start_end(main_axis).0;
            let cross_pos = cross_start + item.margin.start_end(cross_axis).0;
            let (x, y) = match main_axis {
                Axis::Horizontal => (main_pos, cross_pos),
                Axis::Vertical => (cross_pos, main_pos),
            };
            let size = Size::from_main_cross(main_axis, item.main, cross);
            placements.push((
                item.node,
                LayoutResult {
                    x,
                    y,
                    width: size.width,
                    height: size.height,
                    padding: item.padding,
                },
            ));
        }
    }

    Ok(placements)
}

/// [§ 9.2 step 3](https://www.w3.org/TR/css-flexbox-1/#algo-main-item)
///
/// "Determine the flex base size and hypothetical main size of each item."
///
/// - A: definite `flex-basis`.
/// - The item's main-axis dimension.
/// - B: "If the flex item has a preferred aspect ratio [...] and a definite
///   cross size, the flex base size is calculated from its used cross size
///   and the flex item's aspect ratio."
/// - A leaf the size provider knows: its measured main size plus padding.
/// - Otherwise 0. Containers are never sized from their children here.
pub(crate) fn flex_base_size(
    ctx: &LayoutContext<'_>,
    node: NodeId,
    style: &Style,
    padding: Edges,
    reference: Size<Option<f32>>,
    main_axis: Axis,
) -> Result<f32, LayoutError> {
    let reference_main = reference.get(main_axis);
    if let Some(basis) = style.flex_basis.resolve(reference_main) {
        return Ok(basis);
    }
    if let Some(main) = style.size(main_axis).resolve(reference_main) {
        return Ok(main);
    }
    let cross_axis = main_axis.other();
    if let (Some(ratio), Some(cross)) = (
        style.aspect_ratio,
        style.size(cross_axis).resolve(reference.get(cross_axis)),
    ) {
        return Ok(match main_axis {
            Axis::Horizontal => cross * ratio,
            Axis::Vertical => cross / ratio,
        });
    }
    let own = own_size(style, reference);
    let available = Size::new(
        own.width.or(reference.width),
        own.height.or(reference.height),
    );
    Ok(ctx
        .measured_size(node, padding, available, main_axis)?
        .map_or(0.0, |size| size.get(main_axis)))
}

/// [§ 9.4 step 7](https://www.w3.org/TR/css-flexbox-1/#algo-cross-item)
///
/// "Determine the hypothetical cross size of each item by performing
/// layout with the used main size and the available space."
///
/// The item's own cross dimension if it has one, else derived from the
/// used main size `main` through the aspect ratio, else the measured cross
/// size of a leaf the size provider knows. `None` otherwise: the item then
/// takes the line's cross size. Not clamped.
pub(crate) fn intrinsic_cross_size(
    ctx: &LayoutContext<'_>,
    node: NodeId,
    style: &Style,
    padding: Edges,
    main: f32,
    reference: Size<Option<f32>>,
    main_axis: Axis,
) -> Result<Option<f32>, LayoutError> {
    let cross_axis = main_axis.other();
    if let Some(cross) = style.size(cross_axis).resolve(reference.get(cross_axis)) {
        return Ok(Some(cross));
    }
    if let Some(ratio) = style.aspect_ratio {
        return Ok(Some(match main_axis {
            Axis::Horizontal => main / ratio,
            Axis::Vertical => main * ratio,
        }));
    }
    let available = Size::from_main_cross(main_axis, Some(main), reference.get(cross_axis));
    Ok(ctx
        .measured_size(node, padding, available, main_axis)?
        .map(|size| size.get(cross_axis)))
}

/// `cross` clamped by the item's min/max cross size, never negative.
fn clamp_cross(style: &Style, cross: f32, cross_axis: Axis, container_cross: f32) -> f32 {
    clamp(
        cross,
        style.min_size(cross_axis),
        style.max_size(cross_axis),
        Some(container_cross),
    )
    .max(0.0)
}
