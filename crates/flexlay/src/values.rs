//! Unresolved values and their resolution against a reference length.
//!
//! [§ 6 Computed Values](https://www.w3.org/TR/css-cascade-4/#computed)

use serde::{Deserialize, Serialize};

use super::geometry::Edges;

/// [§ 6 Computed Values](https://www.w3.org/TR/css-cascade-4/#computed)
///
/// A length that may still depend on the size of its container.
///
/// [§ 4.4 Automatic values](https://www.w3.org/TR/CSS2/cascade.html#value-def-auto)
///
/// `Undefined` plays the role of `auto`: "the user agent computes the value
/// based on other properties". It resolves to `None`, never to zero, so
/// callers can tell "no constraint" apart from "a constraint of zero".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Dimension {
    /// No value; resolved by the layout algorithm.
    #[default]
    Undefined,
    /// An absolute length in pixels.
    Fixed(f32),
    /// [§ 5.1 Percentages](https://www.w3.org/TR/css-values-4/#percentages)
    ///
    /// A percentage on a 0–100 scale of the reference length.
    Percent(f32),
}

impl Dimension {
    /// Shorthand for [`Dimension::Fixed`].
    #[must_use]
    pub const fn px(value: f32) -> Self {
        Self::Fixed(value)
    }

    /// Shorthand for [`Dimension::Percent`].
    #[must_use]
    pub const fn percent(value: f32) -> Self {
        Self::Percent(value)
    }

    /// Whether this is [`Dimension::Undefined`].
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self, Self::Undefined)
    }

    /// [§ 6.1 Used Values](https://www.w3.org/TR/css-cascade-4/#used)
    ///
    /// "The used value is the result of taking the computed value and
    /// completing any remaining calculations to make it the absolute
    /// theoretical value used in the layout of the document."
    ///
    /// [§ 5.1 Percentages](https://www.w3.org/TR/css-values-4/#percentages)
    ///
    /// "If a percentage is resolved against an indefinite size, it behaves
    /// as auto." A percentage resolves only when `reference` is a finite
    /// number.
    #[must_use]
    pub fn resolve(&self, reference: Option<f32>) -> Option<f32> {
        match *self {
            Self::Undefined => None,
            Self::Fixed(value) => Some(value),
            Self::Percent(ratio) => reference
                .filter(|r| r.is_finite())
                .map(|r| ratio / 100.0 * r),
        }
    }
}

/// [§ 10.4 Minimum and maximum widths](https://www.w3.org/TR/CSS2/visudet.html#min-max-widths)
///
/// Clamp `value` between `min` and `max`, both resolved against `reference`.
///
/// An undefined `min` is 0 and an undefined `max` is +∞. When the two
/// conflict the minimum wins: "If the computed value of 'min-width' is
/// greater than the value of 'max-width', 'max-width' is set to the value
/// of 'min-width'."
///
/// # Formulas
///
/// ```text
/// result = max(min, min(value, max))
/// ```
#[must_use]
pub fn clamp(value: f32, min: Dimension, max: Dimension, reference: Option<f32>) -> f32 {
    let min = min.resolve(reference).unwrap_or(0.0);
    let max = max.resolve(reference).unwrap_or(f32::INFINITY);
    value.min(max).max(min)
}

/// Edge sizes storing unresolved values (margin, padding, insets).
///
/// [§ 8.3 Margin properties](https://www.w3.org/TR/CSS2/box.html#margin-properties)
///
/// Percentages on the left/right sides resolve against the container's
/// width, top/bottom against its height.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Spacing {
    /// Top edge (unresolved).
    pub top: Dimension,
    /// Right edge (unresolved).
    pub right: Dimension,
    /// Bottom edge (unresolved).
    pub bottom: Dimension,
    /// Left edge (unresolved).
    pub left: Dimension,
}

impl Spacing {
    /// No spacing on any side.
    pub const ZERO: Self = Self::uniform(Dimension::Undefined);

    /// The same value on all four sides.
    #[must_use]
    pub const fn uniform(value: Dimension) -> Self {
        Self {
            top: value,
            right: value,
            bottom: value,
            left: value,
        }
    }

    /// The same fixed length on all four sides.
    #[must_use]
    pub const fn all_px(value: f32) -> Self {
        Self::uniform(Dimension::Fixed(value))
    }

    /// Vertical sides get `vertical`, horizontal sides get `horizontal`.
    #[must_use]
    pub const fn symmetric(vertical: Dimension, horizontal: Dimension) -> Self {
        Self {
            top: vertical,
            right: horizontal,
            bottom: vertical,
            left: horizontal,
        }
    }

    /// [§ 6.1 Used Values](https://www.w3.org/TR/css-cascade-4/#used)
    ///
    /// Resolve to concrete pixel values. Undefined sides (and percentages
    /// against an undefined container axis) become 0; an auto margin is
    /// never used to center a box.
    #[must_use]
    pub fn resolve(&self, container_width: Option<f32>, container_height: Option<f32>) -> Edges {
        Edges {
            top: self.top.resolve(container_height).unwrap_or(0.0),
            right: self.right.resolve(container_width).unwrap_or(0.0),
            bottom: self.bottom.resolve(container_height).unwrap_or(0.0),
            left: self.left.resolve(container_width).unwrap_or(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_ignores_reference() {
        assert_eq!(Dimension::Fixed(40.0).resolve(None), Some(40.0));
        assert_eq!(Dimension::Fixed(40.0).resolve(Some(500.0)), Some(40.0));
    }

    #[test]
    fn test_percent_resolution() {
        assert_eq!(Dimension::Percent(50.0).resolve(Some(300.0)), Some(150.0));
        assert_eq!(Dimension::Percent(50.0).resolve(None), None);
        assert_eq!(Dimension::Percent(50.0).resolve(Some(f32::INFINITY)), None);
    }

    #[test]
    fn test_undefined_is_not_zero() {
        assert_eq!(Dimension::Undefined.resolve(Some(300.0)), None);
    }

    #[test]
    fn test_clamp_defaults() {
        let undefined = Dimension::Undefined;
        assert_eq!(clamp(-5.0, undefined, undefined, None), 0.0);
        assert_eq!(clamp(1.0e9, undefined, undefined, None), 1.0e9);
    }

    #[test]
    fn test_clamp_min_wins_over_max() {
        let value = clamp(50.0, Dimension::Fixed(80.0), Dimension::Fixed(60.0), None);
        assert_eq!(value, 80.0);
    }

    #[test]
    fn test_clamp_percent_bounds() {
        let value = clamp(
            500.0,
            Dimension::Undefined,
            Dimension::Percent(25.0),
            Some(400.0),
        );
        assert_eq!(value, 100.0);
    }

    #[test]
    fn test_spacing_resolves_per_axis() {
        let spacing = Spacing::symmetric(Dimension::Percent(10.0), Dimension::Percent(10.0));
        let edges = spacing.resolve(Some(200.0), Some(100.0));
        assert_eq!(edges.left, 20.0);
        assert_eq!(edges.right, 20.0);
        assert_eq!(edges.top, 10.0);
        assert_eq!(edges.bottom, 10.0);
    }

    #[test]
    fn test_undefined_spacing_is_zero() {
        assert_eq!(Spacing::ZERO.resolve(Some(100.0), Some(100.0)), Edges::ZERO);
    }
}
