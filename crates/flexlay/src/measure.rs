//! Intrinsic size provider.
//!
//! The engine has no notion of text or images. Leaves whose main size is
//! not given by their style ask a [`Measure`] implementation instead; a
//! leaf the provider knows nothing about has no intrinsic size at all.

use crate::geometry::{Axis, Size};
use crate::tree::NodeId;

/// Trait for measuring content that the layout engine cannot size itself.
///
/// This abstraction allows the layout engine to work with different
/// measurement backends (text shapers, image decoders, fixed sizes in
/// tests). It is only consulted for leaves.
///
/// `available_main` and `available_cross` are the space along the parent
/// container's main and cross axes, `None` when unconstrained. The
/// returned size is the content size in physical (width, height) order,
/// not main/cross; the engine adds the leaf's padding. `None` means the
/// leaf has no intrinsic size: its flex basis falls back to 0 and its
/// cross size follows the line.
///
/// Implementations must be `Sync` because the parallel strategy measures
/// sibling subtrees on several threads at once.
pub trait Measure: Sync {
    /// Report the intrinsic size of `node`.
    fn measure(
        &self,
        node: NodeId,
        available_main: Option<f32>,
        available_cross: Option<f32>,
        main_axis: Axis,
    ) -> Option<Size>;
}

impl<F> Measure for F
where
    F: Fn(NodeId, Option<f32>, Option<f32>, Axis) -> Option<Size> + Sync,
{
    fn measure(
        &self,
        node: NodeId,
        available_main: Option<f32>,
        available_cross: Option<f32>,
        main_axis: Axis,
    ) -> Option<Size> {
        self(node, available_main, available_cross, main_axis)
    }
}

/// A provider that knows no leaf.
///
/// Leaves are sized by their style alone.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMeasure;

impl Measure for NoMeasure {
    fn measure(&self, _: NodeId, _: Option<f32>, _: Option<f32>, _: Axis) -> Option<Size> {
        None
    }
}
