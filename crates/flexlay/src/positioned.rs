//! Absolutely positioned children.
//!
//! [§ 4.1 Absolutely-Positioned Flex Children](https://www.w3.org/TR/css-flexbox-1/#abspos-items)
//!
//! "As it is out-of-flow, an absolutely-positioned child of a flex
//! container does not participate in flex layout."
//!
//! The containing block is the parent's content box. Offsets resolve
//! against it: `left`/`right` percentages against its width, `top`/`bottom`
//! against its height.

use crate::compute::{LayoutContext, own_size};
use crate::error::LayoutError;
use crate::geometry::{Axis, Size};
use crate::tree::{LayoutResult, NodeId};

/// [§ 10.3.7 Absolutely positioned, non-replaced elements](https://www.w3.org/TR/CSS2/visudet.html#abs-non-replaced-width)
///
/// Size and place one absolutely positioned child inside `content`.
///
/// The size follows the same rules as a layout root, with the content box
/// as the available space. When both offsets on an axis are set and the
/// box has no size of its own on that axis, it stretches between them:
///
/// ```text
/// width = content.width - left - right - margin.left - margin.right
/// ```
///
/// Position uses `left` (or `top`) when set, otherwise `right` (or
/// `bottom`) measured from the far edge, otherwise 0; margins push the box
/// away from the edge it is anchored to.
pub(crate) fn layout_absolute(
    ctx: &LayoutContext<'_>,
    node: NodeId,
    content: Size,
    depth: usize,
) -> Result<LayoutResult, LayoutError> {
    let style = ctx.tree.node(node)?.style();
    let reference = Size::new(Some(content.width), Some(content.height));
    let margin = style.margin.resolve(reference.width, reference.height);
    let padding = style.padding.resolve(reference.width, reference.height);

    let left = style.inset.left.resolve(reference.width);
    let right = style.inset.right.resolve(reference.width);
    let top = style.inset.top.resolve(reference.height);
    let bottom = style.inset.bottom.resolve(reference.height);

    let between = |start: Option<f32>, end: Option<f32>, extent: f32, margins: f32| {
        start
            .zip(end)
            .map(|(start, end)| (extent - start - end - margins).max(0.0))
    };
    let own = own_size(style, reference);
    let known = Size::new(
        own.width
            .or_else(|| between(left, right, content.width, margin.horizontal())),
        own.height
            .or_else(|| between(top, bottom, content.height, margin.vertical())),
    );

    let size = ctx.resolve_box_size(
        node,
        known,
        reference,
        reference,
        Axis::Horizontal,
        depth + 1,
    )?;

    let place = |start: Option<f32>, end: Option<f32>, extent: f32, size: f32, margins: (f32, f32)| {
        match (start, end) {
            (Some(start), _) => start + margins.0,
            (None, Some(end)) => extent - end - size - margins.1,
            (None, None) => margins.0,
        }
    };
    let x = place(
        left,
        right,
        content.width,
        size.width,
        margin.start_end(Axis::Horizontal),
    );
    let y = place(
        top,
        bottom,
        content.height,
        size.height,
        margin.start_end(Axis::Vertical),
    );

    Ok(LayoutResult {
        x,
        y,
        width: size.width,
        height: size.height,
        padding,
    })
}
