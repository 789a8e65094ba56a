//! Flex line collection.
//!
//! [§ 9.3 Main Size Determination](https://www.w3.org/TR/css-flexbox-1/#algo-main-container)

use std::ops::Range;

use crate::style::FlexWrap;

/// [§ 6 Flex Lines](https://www.w3.org/TR/css-flexbox-1/#flex-lines)
///
/// "Flex items in a flex container are laid out and aligned within flex
/// lines, hypothetical containers used for grouping and alignment by the
/// layout algorithm."
///
/// A contiguous run of the container's in-flow items.
#[derive(Debug, Clone, PartialEq)]
pub struct FlexLine {
    /// Indices into the container's in-flow item list.
    pub items: Range<usize>,
    /// Sum of the items' outer main sizes plus the gaps between them.
    /// Hypothetical sizes as collected; the used sizes once
    /// [`FlexLine::resolve_main_size`] has run.
    pub main_size: f32,
    /// The line's cross size. Zero until the driver has sized the items.
    pub cross_size: f32,
}

impl FlexLine {
    fn new(start: usize) -> Self {
        Self {
            items: start..start,
            main_size: 0.0,
            cross_size: 0.0,
        }
    }

    /// Whether the line holds no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replace the hypothetical main size with the used one, given the
    /// items' resolved outer main sizes.
    pub fn resolve_main_size(&mut self, outer_mains: &[f32], gap: f32) {
        self.main_size = outer_mains.iter().sum::<f32>() + gap_total(gap, outer_mains.len());
    }
}

/// [§ 9.3 step 5](https://www.w3.org/TR/css-flexbox-1/#algo-line-break)
///
/// "Collect flex items into flex lines:
///
/// - If the flex container is single-line, collect all the flex items into
///   a single flex line.
/// - Otherwise, starting from the first uncollected item, collect
///   consecutive items one by one until the first time that the next
///   collected item would not fit into the flex container's inner main
///   size. If the very first uncollected item wouldn't fit, collect just
///   it into the line."
///
/// `sizes` are the items' hypothetical outer main sizes. `wrap-reverse`
/// collects exactly like `wrap`; mirroring the line order is left to the
/// caller.
#[must_use]
pub fn collect_flex_lines(
    sizes: &[f32],
    container_main: f32,
    wrap: FlexWrap,
    gap: f32,
) -> Vec<FlexLine> {
    if sizes.is_empty() {
        return Vec::new();
    }

    if wrap == FlexWrap::NoWrap {
        let total: f32 = sizes.iter().sum();
        return vec![FlexLine {
            items: 0..sizes.len(),
            main_size: total + gap_total(gap, sizes.len()),
            cross_size: 0.0,
        }];
    }

    let mut lines = Vec::new();
    let mut line = FlexLine::new(0);
    for (index, &size) in sizes.iter().enumerate() {
        let gap_before = if line.is_empty() { 0.0 } else { gap };
        if !line.is_empty() && line.main_size + gap_before + size > container_main {
            let next = FlexLine::new(index);
            lines.push(std::mem::replace(&mut line, next));
            line.items.end = index + 1;
            line.main_size = size;
        } else {
            line.items.end = index + 1;
            line.main_size += gap_before + size;
        }
    }
    lines.push(line);
    lines
}

/// `gap * (n - 1)`, or 0 for fewer than two items.
pub(crate) fn gap_total(gap: f32, count: usize) -> f32 {
    if count > 1 {
        gap * (count - 1) as f32
    } else {
        0.0
    }
}
