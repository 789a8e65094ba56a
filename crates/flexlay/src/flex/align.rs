//! Main-axis and cross-axis distribution.
//!
//! [§ 8 Alignment](https://www.w3.org/TR/css-flexbox-1/#alignment)
//!
//! All sizes here are outer sizes (margins included). Free space may be
//! negative, in which case items overflow and the same formulas apply.

use crate::style::{AlignContent, AlignItems, JustifyContent};

use super::line::gap_total;

/// [§ 8.2 Axis Alignment: the justify-content property](https://www.w3.org/TR/css-flexbox-1/#justify-content-property)
///
/// Start positions of `sizes` packed along a container of length
/// `container` with `gap` between neighbours.
///
/// # Formulas
///
/// ```text
/// free          = container - Σ sizes - gap * (n - 1)
/// flex-start    lead = 0
/// flex-end      lead = free
/// center        lead = free / 2
/// space-between lead = 0,       between = gap + free / (n - 1)
/// space-around  lead = s / 2,   between = gap + s,   s = free / n
/// space-evenly  lead = s,       between = gap + s,   s = free / (n + 1)
/// ```
#[must_use]
pub fn justify(mode: JustifyContent, sizes: &[f32], container: f32, gap: f32) -> Vec<f32> {
    let n = sizes.len();
    if n == 0 {
        return Vec::new();
    }
    let free_space = container - sizes.iter().sum::<f32>() - gap_total(gap, n);

    let (lead, extra) = match mode {
        JustifyContent::FlexStart => (0.0, 0.0),
        // "Flex items are packed toward the end of the line."
        JustifyContent::FlexEnd => (free_space, 0.0),
        // "Flex items are packed toward the center of the line."
        JustifyContent::Center => (free_space / 2.0, 0.0),
        // A single item has nowhere to spread to and stays at the start.
        JustifyContent::SpaceBetween => {
            if n > 1 {
                (0.0, free_space / (n - 1) as f32)
            } else {
                (0.0, 0.0)
            }
        }
        JustifyContent::SpaceAround => {
            let spacing = free_space / n as f32;
            (spacing / 2.0, spacing)
        }
        JustifyContent::SpaceEvenly => {
            let spacing = free_space / (n + 1) as f32;
            (spacing, spacing)
        }
    };

    let mut cursor = lead;
    sizes
        .iter()
        .map(|size| {
            let position = cursor;
            cursor += size + gap + extra;
            position
        })
        .collect()
}

/// [§ 8.3 Cross-axis Alignment](https://www.w3.org/TR/css-flexbox-1/#align-items-property)
///
/// Offset of an item of outer cross size `size` inside a line of cross
/// size `line`.
///
/// `stretch` places the item at the line start; the caller is responsible
/// for growing it to the line's size. `baseline` has no text metrics to
/// work with and behaves like `flex-start`.
#[must_use]
pub fn align_offset(mode: AlignItems, size: f32, line: f32) -> f32 {
    match mode {
        AlignItems::FlexStart | AlignItems::Baseline | AlignItems::Stretch => 0.0,
        AlignItems::FlexEnd => line - size,
        AlignItems::Center => (line - size) / 2.0,
    }
}

/// [§ 8.4 Packing Flex Lines: the align-content property](https://www.w3.org/TR/css-flexbox-1/#align-content-property)
///
/// Distribute the lines of a multi-line container along the cross axis.
///
/// `line_sizes` holds each line's cross size and is grown in place for
/// `stretch`: "If the leftover free-space is positive, this value is
/// equal to flex-start, except that the free-space is split equally among
/// all of the lines, increasing their cross size." Returns each line's
/// cross offset.
pub fn align_content(
    mode: AlignContent,
    line_sizes: &mut [f32],
    container: f32,
    gap: f32,
) -> Vec<f32> {
    let n = line_sizes.len();
    if n == 0 {
        return Vec::new();
    }

    let justify_mode = match mode {
        AlignContent::FlexStart => JustifyContent::FlexStart,
        AlignContent::FlexEnd => JustifyContent::FlexEnd,
        AlignContent::Center => JustifyContent::Center,
        AlignContent::SpaceBetween => JustifyContent::SpaceBetween,
        AlignContent::SpaceAround => JustifyContent::SpaceAround,
        AlignContent::SpaceEvenly => JustifyContent::SpaceEvenly,
        AlignContent::Stretch => {
            let free_space = container - line_sizes.iter().sum::<f32>() - gap_total(gap, n);
            if free_space > 0.0 {
                let share = free_space / n as f32;
                for size in line_sizes.iter_mut() {
                    *size += share;
                }
            }
            JustifyContent::FlexStart
        }
    };
    justify(justify_mode, line_sizes, container, gap)
}
