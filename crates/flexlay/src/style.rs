//! The style model: every property the flex algorithm reads.
//!
//! [CSS Flexible Box Layout Module Level 1](https://www.w3.org/TR/css-flexbox-1/)
//!
//! A [`Style`] is an immutable snapshot. The `with_*` builder methods
//! consume a style and return a modified copy, so a caller holding a
//! clone never observes the change.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::error::LayoutError;
use crate::geometry::Axis;
use crate::values::{Dimension, Spacing};

/// [§ 9.3.1 Choosing a positioning scheme](https://www.w3.org/TR/CSS2/visuren.html#choose-position)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Position {
    /// "The box's position is calculated according to the normal flow."
    #[default]
    Relative,
    /// [§ 4.1 Absolutely-Positioned Flex Children](https://www.w3.org/TR/css-flexbox-1/#abspos-items)
    ///
    /// "An absolutely-positioned child of a flex container does not
    /// participate in flex layout."
    Absolute,
}

/// [§ 5.1 Flex Flow Direction: the flex-direction property](https://www.w3.org/TR/css-flexbox-1/#flex-direction-property)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FlexDirection {
    /// "The flex container's main axis has the same orientation as the
    /// inline axis of the current writing mode."
    #[default]
    Row,
    /// "Same as row, except the main-start and main-end directions are swapped."
    RowReverse,
    /// "The flex container's main axis has the same orientation as the
    /// block axis of the current writing mode."
    Column,
    /// "Same as column, except the main-start and main-end directions are swapped."
    ColumnReverse,
}

impl FlexDirection {
    /// The physical axis items are laid out along.
    #[must_use]
    pub const fn main_axis(self) -> Axis {
        match self {
            Self::Row | Self::RowReverse => Axis::Horizontal,
            Self::Column | Self::ColumnReverse => Axis::Vertical,
        }
    }

    /// Whether main-start is the right (or bottom) edge.
    #[must_use]
    pub const fn is_reverse(self) -> bool {
        matches!(self, Self::RowReverse | Self::ColumnReverse)
    }
}

/// [§ 5.2 Flex Line Wrapping: the flex-wrap property](https://www.w3.org/TR/css-flexbox-1/#flex-wrap-property)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FlexWrap {
    /// "The flex container is single-line."
    #[default]
    NoWrap,
    /// "The flex container is multi-line."
    Wrap,
    /// "Same as wrap", with cross-start and cross-end swapped.
    WrapReverse,
}

/// [§ 8.2 Axis Alignment: the justify-content property](https://www.w3.org/TR/css-flexbox-1/#justify-content-property)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum JustifyContent {
    /// "Flex items are packed toward the start of the line."
    #[default]
    FlexStart,
    /// "Flex items are packed toward the end of the line."
    FlexEnd,
    /// "Flex items are packed toward the center of the line."
    Center,
    /// "Flex items are evenly distributed in the line."
    SpaceBetween,
    /// "Flex items are evenly distributed in the line, with half-size
    /// spaces on either end."
    SpaceAround,
    /// Equal spaces before, between and after every item.
    SpaceEvenly,
}

/// [§ 8.3 Cross-axis Alignment: the align-items and align-self properties](https://www.w3.org/TR/css-flexbox-1/#align-items-property)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AlignItems {
    /// "The cross-start margin edge of the flex item is placed flush with
    /// the cross-start edge of the line."
    FlexStart,
    /// "The cross-end margin edge of the flex item is placed flush with
    /// the cross-end edge of the line."
    FlexEnd,
    /// "The flex item's margin box is centered in the cross axis within
    /// the line."
    Center,
    /// Treated as `flex-start`: no text metrics are available.
    Baseline,
    /// The item fills the line's cross size.
    #[default]
    Stretch,
}

/// [§ 8.4 Packing Flex Lines: the align-content property](https://www.w3.org/TR/css-flexbox-1/#align-content-property)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AlignContent {
    /// "Lines are packed toward the start of the flex container."
    FlexStart,
    /// "Lines are packed toward the end of the flex container."
    FlexEnd,
    /// "Lines are packed toward the center of the flex container."
    Center,
    /// "Lines are evenly distributed in the flex container."
    SpaceBetween,
    /// "Lines are evenly distributed in the flex container, with half-size
    /// spaces on either end."
    SpaceAround,
    /// Equal spaces before, between and after every line.
    SpaceEvenly,
    /// "Lines stretch to take up the remaining space."
    #[default]
    Stretch,
}

/// An immutable snapshot of one node's layout-relevant style.
///
/// Field names and serialized keys follow the CSS property names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Style {
    /// In-flow or absolutely positioned.
    pub position: Position,

    // ===== Container properties =====
    /// Main axis and its orientation.
    pub flex_direction: FlexDirection,
    /// Single-line or multi-line.
    pub flex_wrap: FlexWrap,
    /// Main-axis distribution of items within a line.
    pub justify_content: JustifyContent,
    /// Default cross-axis alignment of items within a line.
    pub align_items: AlignItems,
    /// Cross-axis distribution of lines in a multi-line container.
    pub align_content: AlignContent,

    // ===== Item properties =====
    /// [§ 7.3.1 The flex-grow property](https://www.w3.org/TR/css-flexbox-1/#flex-grow-property)
    ///
    /// "Negative numbers are invalid."
    pub flex_grow: f32,
    /// [§ 7.3.2 The flex-shrink property](https://www.w3.org/TR/css-flexbox-1/#flex-shrink-property)
    ///
    /// "Negative numbers are invalid." Defaults to 1.
    pub flex_shrink: f32,
    /// [§ 7.3.3 The flex-basis property](https://www.w3.org/TR/css-flexbox-1/#flex-basis-property)
    pub flex_basis: Dimension,
    /// Per-item override of the container's `align-items`.
    pub align_self: Option<AlignItems>,

    // ===== Sizing =====
    /// Preferred width.
    pub width: Dimension,
    /// Preferred height.
    pub height: Dimension,
    /// Lower bound on the width.
    pub min_width: Dimension,
    /// Lower bound on the height.
    pub min_height: Dimension,
    /// Upper bound on the width.
    pub max_width: Dimension,
    /// Upper bound on the height.
    pub max_height: Dimension,
    /// [CSS Box Sizing Level 4 § 5.1](https://www.w3.org/TR/css-sizing-4/#aspect-ratio)
    ///
    /// Width divided by height. Must be positive.
    pub aspect_ratio: Option<f32>,

    // ===== Spacing =====
    /// Outer spacing. Undefined sides are 0.
    pub margin: Spacing,
    /// Inner spacing between the border box and the content box.
    pub padding: Spacing,
    /// [CSS Box Alignment § 8 Gaps](https://www.w3.org/TR/css-align-3/#gaps)
    ///
    /// Gap used for both axes unless overridden below.
    pub gap: f32,
    /// Gap between rows (vertical spacing).
    pub row_gap: Option<f32>,
    /// Gap between columns (horizontal spacing).
    pub column_gap: Option<f32>,

    /// [§ 9.3.2 Box offsets](https://www.w3.org/TR/CSS2/visuren.html#position-props)
    ///
    /// `top`/`right`/`bottom`/`left` for absolutely positioned boxes.
    pub inset: Spacing,
}

impl Default for Style {
    fn default() -> Self {
        Self {
            position: Position::Relative,
            flex_direction: FlexDirection::Row,
            flex_wrap: FlexWrap::NoWrap,
            justify_content: JustifyContent::FlexStart,
            align_items: AlignItems::Stretch,
            align_content: AlignContent::Stretch,
            flex_grow: 0.0,
            flex_shrink: 1.0,
            flex_basis: Dimension::Undefined,
            align_self: None,
            width: Dimension::Undefined,
            height: Dimension::Undefined,
            min_width: Dimension::Undefined,
            min_height: Dimension::Undefined,
            max_width: Dimension::Undefined,
            max_height: Dimension::Undefined,
            aspect_ratio: None,
            margin: Spacing::ZERO,
            padding: Spacing::ZERO,
            gap: 0.0,
            row_gap: None,
            column_gap: None,
            inset: Spacing::ZERO,
        }
    }
}

impl Style {
    /// The initial style: a relative, row-direction, no-wrap box.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check the invariants a caller could violate.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidStyle`] for a negative or non-finite
    /// grow/shrink factor, a non-positive or non-finite aspect ratio, or a
    /// negative gap.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(self.flex_grow.is_finite() && self.flex_grow >= 0.0) {
            return Err(LayoutError::invalid_style(format!(
                "flex-grow must be a non-negative number, got {}",
                self.flex_grow
            )));
        }
        if !(self.flex_shrink.is_finite() && self.flex_shrink >= 0.0) {
            return Err(LayoutError::invalid_style(format!(
                "flex-shrink must be a non-negative number, got {}",
                self.flex_shrink
            )));
        }
        if let Some(ratio) = self.aspect_ratio
            && !(ratio.is_finite() && ratio > 0.0)
        {
            return Err(LayoutError::invalid_style(format!(
                "aspect-ratio must be positive, got {ratio}"
            )));
        }
        for (name, gap) in [
            ("gap", Some(self.gap)),
            ("row-gap", self.row_gap),
            ("column-gap", self.column_gap),
        ] {
            if let Some(gap) = gap
                && !(gap.is_finite() && gap >= 0.0)
            {
                return Err(LayoutError::invalid_style(format!(
                    "{name} must be a non-negative length, got {gap}"
                )));
            }
        }
        Ok(())
    }

    /// Whether this box is taken out of flow.
    #[must_use]
    pub fn is_absolute(&self) -> bool {
        self.position == Position::Absolute
    }

    /// The physical main axis of this box as a container.
    #[must_use]
    pub const fn main_axis(&self) -> Axis {
        self.flex_direction.main_axis()
    }

    /// Preferred size along `axis`.
    #[must_use]
    pub const fn size(&self, axis: Axis) -> Dimension {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Minimum size along `axis`.
    #[must_use]
    pub const fn min_size(&self, axis: Axis) -> Dimension {
        match axis {
            Axis::Horizontal => self.min_width,
            Axis::Vertical => self.min_height,
        }
    }

    /// Maximum size along `axis`.
    #[must_use]
    pub const fn max_size(&self, axis: Axis) -> Dimension {
        match axis {
            Axis::Horizontal => self.max_width,
            Axis::Vertical => self.max_height,
        }
    }

    /// Gap between items on the same line.
    ///
    /// Rows are separated horizontally (`column-gap`), columns vertically
    /// (`row-gap`); both fall back to `gap`.
    #[must_use]
    pub fn main_gap(&self) -> f32 {
        match self.main_axis() {
            Axis::Horizontal => self.column_gap.unwrap_or(self.gap),
            Axis::Vertical => self.row_gap.unwrap_or(self.gap),
        }
    }

    /// Gap between adjacent flex lines.
    #[must_use]
    pub fn cross_gap(&self) -> f32 {
        match self.main_axis() {
            Axis::Horizontal => self.row_gap.unwrap_or(self.gap),
            Axis::Vertical => self.column_gap.unwrap_or(self.gap),
        }
    }

    /// The alignment this box uses inside a container whose
    /// `align-items` is `parent_align`.
    #[must_use]
    pub fn effective_align(&self, parent_align: AlignItems) -> AlignItems {
        self.align_self.unwrap_or(parent_align)
    }

    // ===== Builders =====

    /// Copy with `position` replaced.
    #[must_use]
    pub const fn with_position(mut self, position: Position) -> Self {
        self.position = position;
        self
    }

    /// Copy with `flex-direction` replaced.
    #[must_use]
    pub const fn with_direction(mut self, direction: FlexDirection) -> Self {
        self.flex_direction = direction;
        self
    }

    /// Copy with `flex-wrap` replaced.
    #[must_use]
    pub const fn with_wrap(mut self, wrap: FlexWrap) -> Self {
        self.flex_wrap = wrap;
        self
    }

    /// Copy with `justify-content` replaced.
    #[must_use]
    pub const fn with_justify_content(mut self, justify: JustifyContent) -> Self {
        self.justify_content = justify;
        self
    }

    /// Copy with `align-items` replaced.
    #[must_use]
    pub const fn with_align_items(mut self, align: AlignItems) -> Self {
        self.align_items = align;
        self
    }

    /// Copy with `align-content` replaced.
    #[must_use]
    pub const fn with_align_content(mut self, align: AlignContent) -> Self {
        self.align_content = align;
        self
    }

    /// Copy with `align-self` set.
    #[must_use]
    pub const fn with_align_self(mut self, align: AlignItems) -> Self {
        self.align_self = Some(align);
        self
    }

    /// Copy with `flex-grow` replaced.
    #[must_use]
    pub const fn with_grow(mut self, grow: f32) -> Self {
        self.flex_grow = grow;
        self
    }

    /// Copy with `flex-shrink` replaced.
    #[must_use]
    pub const fn with_shrink(mut self, shrink: f32) -> Self {
        self.flex_shrink = shrink;
        self
    }

    /// Copy with `flex-basis` replaced.
    #[must_use]
    pub const fn with_basis(mut self, basis: Dimension) -> Self {
        self.flex_basis = basis;
        self
    }

    /// Copy with `width` replaced.
    #[must_use]
    pub const fn with_width(mut self, width: Dimension) -> Self {
        self.width = width;
        self
    }

    /// Copy with `height` replaced.
    #[must_use]
    pub const fn with_height(mut self, height: Dimension) -> Self {
        self.height = height;
        self
    }

    /// Copy with fixed `width` and `height`.
    #[must_use]
    pub const fn with_size_px(self, width: f32, height: f32) -> Self {
        self.with_width(Dimension::Fixed(width))
            .with_height(Dimension::Fixed(height))
    }

    /// Copy with `min-width`/`min-height` replaced.
    #[must_use]
    pub const fn with_min_size(mut self, width: Dimension, height: Dimension) -> Self {
        self.min_width = width;
        self.min_height = height;
        self
    }

    /// Copy with `max-width`/`max-height` replaced.
    #[must_use]
    pub const fn with_max_size(mut self, width: Dimension, height: Dimension) -> Self {
        self.max_width = width;
        self.max_height = height;
        self
    }

    /// Copy with `aspect-ratio` set.
    #[must_use]
    pub const fn with_aspect_ratio(mut self, ratio: f32) -> Self {
        self.aspect_ratio = Some(ratio);
        self
    }

    /// Copy with `margin` replaced.
    #[must_use]
    pub const fn with_margin(mut self, margin: Spacing) -> Self {
        self.margin = margin;
        self
    }

    /// Copy with `padding` replaced.
    #[must_use]
    pub const fn with_padding(mut self, padding: Spacing) -> Self {
        self.padding = padding;
        self
    }

    /// Copy with `gap` replaced.
    #[must_use]
    pub const fn with_gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    /// Copy with `row-gap` and `column-gap` set.
    #[must_use]
    pub const fn with_row_column_gap(mut self, row_gap: f32, column_gap: f32) -> Self {
        self.row_gap = Some(row_gap);
        self.column_gap = Some(column_gap);
        self
    }

    /// Copy with the box offsets replaced.
    #[must_use]
    pub const fn with_inset(mut self, inset: Spacing) -> Self {
        self.inset = inset;
        self
    }
}
