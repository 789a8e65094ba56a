//! Geometry primitives.
//!
//! [CSS Box Model Module Level 3](https://www.w3.org/TR/css-box-3/)
//!
//! Plain value types with no identity. The only behavior here is the
//! axis bookkeeping the flex algorithm needs to talk about "main" and
//! "cross" sizes without caring whether they are widths or heights.

use serde::{Deserialize, Serialize};

/// [§ 2 Flex Layout Box Model](https://www.w3.org/TR/css-flexbox-1/#box-model)
///
/// A physical axis. The flex algorithm maps its main and cross axes onto
/// these depending on `flex-direction`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    /// The x axis (widths, left/right).
    Horizontal,
    /// The y axis (heights, top/bottom).
    Vertical,
}

impl Axis {
    /// The perpendicular axis.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// A two-dimensional size.
///
/// `Size<f32>` is a resolved size; `Size<Option<f32>>` is an available
/// space where `None` means "no constraint on this axis" (which is not
/// the same thing as a constraint of zero).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size<T = f32> {
    /// Horizontal extent.
    pub width: T,
    /// Vertical extent.
    pub height: T,
}

impl<T: Copy> Size<T> {
    /// Create a size from its two extents.
    pub const fn new(width: T, height: T) -> Self {
        Self { width, height }
    }

    /// The extent along `axis`.
    pub fn get(self, axis: Axis) -> T {
        match axis {
            Axis::Horizontal => self.width,
            Axis::Vertical => self.height,
        }
    }

    /// Build a size from a main/cross pair, where `main` is the main axis.
    pub fn from_main_cross(main: Axis, main_size: T, cross_size: T) -> Self {
        match main {
            Axis::Horizontal => Self::new(main_size, cross_size),
            Axis::Vertical => Self::new(cross_size, main_size),
        }
    }

    /// Apply `f` to both extents.
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Size<U> {
        Size {
            width: f(self.width),
            height: f(self.height),
        }
    }
}

impl Size<f32> {
    /// The zero size.
    pub const ZERO: Self = Self::new(0.0, 0.0);
}

impl Size<Option<f32>> {
    /// No constraint on either axis.
    pub const UNDEFINED: Self = Self::new(None, None);

    /// A fully definite available space.
    #[must_use]
    pub const fn definite(width: f32, height: f32) -> Self {
        Self::new(Some(width), Some(height))
    }

    /// Treat infinite or NaN extents as "no constraint".
    #[must_use]
    pub fn normalized(self) -> Self {
        self.map(|v| v.filter(|v| v.is_finite()))
    }
}

/// A point in 2D space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

/// A rectangle positioned in 2D space.
///
/// [§ 3 The CSS Box Model](https://www.w3.org/TR/css-box-3/#box-model)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Horizontal position of the top-left corner.
    pub x: f32,
    /// Vertical position of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rect {
    /// Create a rectangle from its origin and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Left edge.
    #[must_use]
    pub const fn left(&self) -> f32 {
        self.x
    }

    /// Top edge.
    #[must_use]
    pub const fn top(&self) -> f32 {
        self.y
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Top-left corner.
    #[must_use]
    pub const fn origin(&self) -> Point {
        Point {
            x: self.x,
            y: self.y,
        }
    }

    /// Width and height.
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// Resolved edge sizes for padding, margin, or insets.
///
/// [§ 3 The CSS Box Model](https://www.w3.org/TR/css-box-3/#box-model)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Edges {
    /// Top edge size.
    pub top: f32,
    /// Right edge size.
    pub right: f32,
    /// Bottom edge size.
    pub bottom: f32,
    /// Left edge size.
    pub left: f32,
}

impl Edges {
    /// All four edges zero.
    pub const ZERO: Self = Self {
        top: 0.0,
        right: 0.0,
        bottom: 0.0,
        left: 0.0,
    };

    /// `left + right`.
    #[must_use]
    pub fn horizontal(&self) -> f32 {
        self.left + self.right
    }

    /// `top + bottom`.
    #[must_use]
    pub fn vertical(&self) -> f32 {
        self.top + self.bottom
    }

    /// Sum of both edges along `axis`.
    #[must_use]
    pub fn sum(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Horizontal => self.horizontal(),
            Axis::Vertical => self.vertical(),
        }
    }

    /// The (start, end) edges along `axis`, in physical order.
    #[must_use]
    pub const fn start_end(&self, axis: Axis) -> (f32, f32) {
        match axis {
            Axis::Horizontal => (self.left, self.right),
            Axis::Vertical => (self.top, self.bottom),
        }
    }

    /// Shrink `size` by these edges, never going below zero.
    ///
    /// # Formulas
    ///
    /// ```text
    /// width  = max(0, size.width - left - right)
    /// height = max(0, size.height - top - bottom)
    /// ```
    #[must_use]
    pub fn deflate(&self, size: Size) -> Size {
        Size::new(
            (size.width - self.horizontal()).max(0.0),
            (size.height - self.vertical()).max(0.0),
        )
    }
}
