//! A standalone Flexbox layout engine.
//!
//! Build a [`LayoutTree`] of styled boxes, call [`compute_layout`] with the
//! space available to the root, then read each node's [`LayoutResult`].
//!
//! # Scope
//!
//! This crate implements:
//! - **Flex lines** ([§ 9.3](https://www.w3.org/TR/css-flexbox-1/#algo-main-container))
//!   - `flex-wrap: nowrap | wrap | wrap-reverse`
//!   - Row and column gaps
//!
//! - **Flexible lengths** ([§ 9.7](https://www.w3.org/TR/css-flexbox-1/#resolve-flexible-lengths))
//!   - `flex-grow`, `flex-shrink`, `flex-basis`
//!   - Single-pass distribution or the iterative min/max freeze loop
//!
//! - **Alignment** ([§ 8](https://www.w3.org/TR/css-flexbox-1/#alignment))
//!   - `justify-content`, `align-items`, `align-self`, `align-content`
//!   - Reverse directions
//!
//! - **Sizing**
//!   - Fixed and percentage lengths, min/max constraints, `aspect-ratio`
//!   - Intrinsic sizes from a caller-supplied [`Measure`] hook
//!   - Absolutely positioned children with `top`/`right`/`bottom`/`left`
//!
//! # Not Implemented
//!
//! - Baseline alignment (falls back to `flex-start`)
//! - Auto margins (undefined margins are zero)
//! - `order`, CSS parsing, grid layout
//!
//! # Example
//!
//! ```
//! use flexlay::{compute_layout, LayoutTree, Size, Style};
//!
//! let mut tree = LayoutTree::new();
//! let a = tree.new_leaf(Style::new().with_grow(1.0))?;
//! let b = tree.new_leaf(Style::new().with_grow(1.0))?;
//! let root = tree.new_with_children(Style::new(), &[a, b])?;
//!
//! compute_layout(&mut tree, root, Size::definite(200.0, 100.0))?;
//! assert_eq!(tree.layout(b).map(|l| (l.x, l.width)), Some((100.0, 100.0)));
//! # Ok::<(), flexlay::LayoutError>(())
//! ```

#![cfg_attr(test, allow(clippy::float_cmp))]

/// The compute driver and its entry points.
pub mod compute;
/// Layout pass options.
pub mod config;
/// Error type.
pub mod error;
/// The flex algorithm stages per [§ 9](https://www.w3.org/TR/css-flexbox-1/#layout-algorithm).
pub mod flex;
/// Sizes, points, rectangles and edges.
pub mod geometry;
/// Intrinsic size hook.
pub mod measure;
mod positioned;
/// Per-node style snapshot.
pub mod style;
/// Arena tree of layout nodes.
pub mod tree;
/// Dimensions and their resolution per [CSS Values Level 4](https://www.w3.org/TR/css-values-4/).
pub mod values;

// Re-exports for convenience
pub use compute::{compute_layout, compute_layout_with};
pub use config::{ExecutionStrategy, FlexResolution, LayoutConfig};
pub use error::LayoutError;
pub use geometry::{Axis, Edges, Point, Rect, Size};
pub use measure::{Measure, NoMeasure};
pub use style::{
    AlignContent, AlignItems, FlexDirection, FlexWrap, JustifyContent, Position, Style,
};
pub use tree::{AncestorIterator, LayoutNode, LayoutResult, LayoutTree, NodeId};
pub use values::{Dimension, Spacing, clamp};
