//! The layout compute driver.
//!
//! [§ 9 Flex Layout Algorithm](https://www.w3.org/TR/css-flexbox-1/#layout-algorithm)
//!
//! # Design
//!
//! A pass runs in two phases. The recursion only reads the tree: every
//! node's box is computed into a placement buffer while the tree is
//! borrowed immutably. Once the whole pass has succeeded the buffer is
//! written back and the dirty flags are cleared. A failed pass therefore
//! leaves the tree untouched, and sibling subtrees can be computed on
//! different threads without any locking.

use std::time::Instant;

use rayon::prelude::*;

use crate::config::{ExecutionStrategy, LayoutConfig};
use crate::error::LayoutError;
use crate::flex;
use crate::flex::line::gap_total;
use crate::geometry::{Axis, Edges, Size};
use crate::measure::{Measure, NoMeasure};
use crate::positioned;
use crate::style::Style;
use crate::tree::{LayoutResult, LayoutTree, NodeId};
use crate::values::clamp;

/// A node's computed box, waiting to be written back into the tree.
pub(crate) type Placement = (NodeId, LayoutResult);

/// Lay out the subtree rooted at `root` with the default configuration
/// and no size provider.
///
/// `available` is the space the root may occupy; `None` on an axis means
/// unconstrained. The root is placed at (0, 0).
///
/// # Errors
///
/// See [`compute_layout_with`].
pub fn compute_layout(
    tree: &mut LayoutTree,
    root: NodeId,
    available: Size<Option<f32>>,
) -> Result<(), LayoutError> {
    compute_layout_with(tree, root, available, &LayoutConfig::default(), &NoMeasure)
}

/// Lay out the subtree rooted at `root`.
///
/// Every node reachable from `root` receives a fresh [`LayoutResult`] and
/// is marked clean. Nodes outside the subtree are not touched, so any node
/// (attached or not) may serve as the root of a pass.
///
/// # Errors
///
/// - [`LayoutError::UnknownNode`] if `root` is not in `tree`.
/// - [`LayoutError::DepthExceeded`] if the subtree is nested deeper than
///   [`LayoutConfig::max_depth`]. The tree is left unchanged.
pub fn compute_layout_with(
    tree: &mut LayoutTree,
    root: NodeId,
    available: Size<Option<f32>>,
    config: &LayoutConfig,
    measure: &dyn Measure,
) -> Result<(), LayoutError> {
    let started = Instant::now();
    let placements = LayoutContext {
        tree: &*tree,
        config,
        measure,
    }
    .layout_root(root, available.normalized())?;

    let count = placements.len();
    for (node, layout) in placements {
        tree.apply_result(node, layout);
    }
    log::debug!(
        target: "flexlay",
        "laid out {count} nodes from {root:?} ({} strategy) in {:?}",
        config.strategy,
        started.elapsed()
    );
    Ok(())
}

/// Everything the recursion needs, passed down explicitly.
pub(crate) struct LayoutContext<'a> {
    pub(crate) tree: &'a LayoutTree,
    pub(crate) config: &'a LayoutConfig,
    pub(crate) measure: &'a dyn Measure,
}

impl LayoutContext<'_> {
    fn layout_root(
        &self,
        root: NodeId,
        available: Size<Option<f32>>,
    ) -> Result<Vec<Placement>, LayoutError> {
        let style = self.tree.node(root)?.style();
        let size = self.resolve_box_size(
            root,
            own_size(style, available),
            available,
            available,
            Axis::Horizontal,
            0,
        )?;
        let padding = style.padding.resolve(available.width, available.height);

        let mut placements = Vec::with_capacity(self.tree.len());
        placements.push((
            root,
            LayoutResult {
                x: 0.0,
                y: 0.0,
                width: size.width,
                height: size.height,
                padding,
            },
        ));
        self.layout_subtree(root, size, padding, 0, &mut placements)?;
        Ok(placements)
    }

    /// Place the children of `node`, whose border box is `size`, and
    /// recurse into each of them.
    fn layout_subtree(
        &self,
        node: NodeId,
        size: Size,
        padding: Edges,
        depth: usize,
        out: &mut Vec<Placement>,
    ) -> Result<(), LayoutError> {
        self.check_depth(depth)?;
        let node_data = self.tree.node(node)?;
        let children = node_data.children();
        if children.is_empty() {
            return Ok(());
        }
        let style = node_data.style();

        // [§ 4.1 Absolutely-Positioned Flex Children](https://www.w3.org/TR/css-flexbox-1/#abspos-items)
        //
        // "An absolutely-positioned child of a flex container does not
        // participate in flex layout."
        let (absolute, in_flow): (Vec<NodeId>, Vec<NodeId>) = children
            .iter()
            .copied()
            .partition(|&child| self.tree.style(child).is_some_and(Style::is_absolute));

        let content = padding.deflate(size);
        log::trace!(
            target: "flexlay",
            "{node:?}: content box {}x{}, {} in-flow, {} absolute",
            content.width,
            content.height,
            in_flow.len(),
            absolute.len()
        );

        let mut placed = flex::layout_flex_items(self, style, content, &in_flow)?;
        for child in absolute {
            let layout = positioned::layout_absolute(self, child, content, depth)?;
            placed.push((child, layout));
        }

        match self.config.strategy {
            ExecutionStrategy::Sequential => {
                for (child, layout) in placed {
                    out.push((child, layout));
                    self.layout_subtree(child, layout.size(), layout.padding, depth + 1, out)?;
                }
            }
            ExecutionStrategy::Parallel => {
                let subtrees = placed
                    .into_par_iter()
                    .map(|(child, layout)| {
                        let mut buffer = vec![(child, layout)];
                        self.layout_subtree(
                            child,
                            layout.size(),
                            layout.padding,
                            depth + 1,
                            &mut buffer,
                        )?;
                        Ok(buffer)
                    })
                    .collect::<Result<Vec<_>, LayoutError>>()?;
                for buffer in subtrees {
                    out.extend(buffer);
                }
            }
        }
        Ok(())
    }

    fn check_depth(&self, depth: usize) -> Result<(), LayoutError> {
        if depth > self.config.max_depth {
            return Err(LayoutError::DepthExceeded {
                limit: self.config.max_depth,
            });
        }
        Ok(())
    }

    /// Border-box size of `node`.
    ///
    /// STEP 1: take the axes `known` already fixes (own dimensions or
    ///         inset stretching).
    /// STEP 2: derive a missing axis through the aspect ratio.
    /// STEP 3: fill what is still open from `fill`, then retry STEP 2.
    /// STEP 4: size whatever remains from the content.
    /// STEP 5: clamp against min/max, resolved against `reference`.
    pub(crate) fn resolve_box_size(
        &self,
        node: NodeId,
        known: Size<Option<f32>>,
        reference: Size<Option<f32>>,
        fill: Size<Option<f32>>,
        main_axis: Axis,
        depth: usize,
    ) -> Result<Size, LayoutError> {
        let style = self.tree.node(node)?.style();
        let size = apply_aspect_ratio(known, style.aspect_ratio);
        let size = Size::new(size.width.or(fill.width), size.height.or(fill.height));
        let size = apply_aspect_ratio(size, style.aspect_ratio);

        let (width, height) = match (size.width, size.height) {
            (Some(width), Some(height)) => (width, height),
            (width, height) => {
                let available = Size::new(
                    width.or(reference.width),
                    height.or(reference.height),
                );
                let content = self.content_size(node, available, main_axis, depth)?;
                (
                    width.unwrap_or(content.width),
                    height.unwrap_or(content.height),
                )
            }
        };

        Ok(Size::new(
            clamp(width, style.min_width, style.max_width, reference.width).max(0.0),
            clamp(height, style.min_height, style.max_height, reference.height).max(0.0),
        ))
    }

    /// [CSS Box Sizing § 5 Intrinsic Size Determination](https://www.w3.org/TR/css-sizing-3/#intrinsic-sizes)
    ///
    /// The size `node` would take if only its content decided. Only boxes
    /// that nothing else sizes ask for it: the root and absolutely
    /// positioned children.
    ///
    /// Leaves ask the size provider; `main_axis` is the main axis of the
    /// container asking. Containers put their in-flow children on a single
    /// line at their flex base sizes: the main extent is the sum of the
    /// children's outer sizes plus gaps, the cross extent the largest
    /// child. Padding is added in both cases.
    pub(crate) fn content_size(
        &self,
        node: NodeId,
        available: Size<Option<f32>>,
        main_axis: Axis,
        depth: usize,
    ) -> Result<Size, LayoutError> {
        self.check_depth(depth)?;
        let node_data = self.tree.node(node)?;
        let style = node_data.style();
        let padding = style.padding.resolve(available.width, available.height);
        let padding_box = Size::new(padding.horizontal(), padding.vertical());

        if node_data.children().is_empty() {
            let measured = self.measured_size(node, padding, available, main_axis)?;
            return Ok(measured.unwrap_or(padding_box));
        }

        let inner = inner_space(available, padding);
        let axis = style.main_axis();
        let cross_axis = axis.other();
        let mut main = 0.0_f32;
        let mut cross = 0.0_f32;
        let mut count = 0;
        for &child in node_data.children() {
            let child_style = self.tree.node(child)?.style();
            if child_style.is_absolute() {
                continue;
            }
            let margin = child_style.margin.resolve(inner.width, inner.height);
            let child_padding = child_style.padding.resolve(inner.width, inner.height);
            let child_main = clamp(
                flex::flex_base_size(self, child, child_style, child_padding, inner, axis)?,
                child_style.min_size(axis),
                child_style.max_size(axis),
                inner.get(axis),
            );
            let child_cross = flex::intrinsic_cross_size(
                self,
                child,
                child_style,
                child_padding,
                child_main,
                inner,
                axis,
            )?
            .unwrap_or(0.0);
            let child_cross = clamp(
                child_cross,
                child_style.min_size(cross_axis),
                child_style.max_size(cross_axis),
                inner.get(cross_axis),
            );
            main += child_main.max(0.0) + margin.sum(axis);
            cross = cross.max(child_cross.max(0.0) + margin.sum(cross_axis));
            count += 1;
        }
        let content = Size::from_main_cross(axis, main + gap_total(style.main_gap(), count), cross);
        Ok(Size::new(
            content.width + padding_box.width,
            content.height + padding_box.height,
        ))
    }

    /// Border-box size of a leaf as reported by the size provider, with
    /// `padding` added. The provider sees the space left inside the
    /// padding.
    ///
    /// `None` for containers and for leaves the provider does not know.
    pub(crate) fn measured_size(
        &self,
        node: NodeId,
        padding: Edges,
        available: Size<Option<f32>>,
        main_axis: Axis,
    ) -> Result<Option<Size>, LayoutError> {
        if !self.tree.node(node)?.children().is_empty() {
            return Ok(None);
        }
        let inner = inner_space(available, padding);
        let measured = self.measure.measure(
            node,
            inner.get(main_axis),
            inner.get(main_axis.other()),
            main_axis,
        );
        Ok(measured.map(|content| {
            Size::new(
                content.width + padding.horizontal(),
                content.height + padding.vertical(),
            )
        }))
    }
}

/// `available` shrunk by `padding`, never below zero.
fn inner_space(available: Size<Option<f32>>, padding: Edges) -> Size<Option<f32>> {
    Size::new(
        available.width.map(|w| (w - padding.horizontal()).max(0.0)),
        available.height.map(|h| (h - padding.vertical()).max(0.0)),
    )
}

/// A node's `width`/`height` resolved against `reference`.
pub(crate) fn own_size(style: &Style, reference: Size<Option<f32>>) -> Size<Option<f32>> {
    Size::new(
        style.width.resolve(reference.width),
        style.height.resolve(reference.height),
    )
}

/// [CSS Box Sizing Level 4 § 5.1](https://www.w3.org/TR/css-sizing-4/#aspect-ratio)
///
/// Fill in exactly one missing axis from the other.
///
/// # Formulas
///
/// ```text
/// height = width / ratio
/// width  = height * ratio
/// ```
pub(crate) fn apply_aspect_ratio(size: Size<Option<f32>>, ratio: Option<f32>) -> Size<Option<f32>> {
    match (ratio, size.width, size.height) {
        (Some(ratio), Some(width), None) => Size::new(Some(width), Some(width / ratio)),
        (Some(ratio), None, Some(height)) => Size::new(Some(height * ratio), Some(height)),
        _ => size,
    }
}
