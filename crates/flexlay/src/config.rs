//! Knobs for a layout pass.

use serde::{Deserialize, Serialize};
use strum_macros::Display;

/// How child subtrees are dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ExecutionStrategy {
    /// Depth-first on the calling thread.
    #[default]
    Sequential,
    /// Sibling subtrees are laid out on the rayon thread pool once their
    /// boxes are known, then joined.
    Parallel,
}

/// Which flexible-length algorithm distributes free space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum FlexResolution {
    /// One proportional distribution; min/max are applied afterwards.
    #[default]
    SinglePass,
    /// [§ 9.7 Resolving Flexible Lengths](https://www.w3.org/TR/css-flexbox-1/#resolve-flexible-lengths)
    ///
    /// Freeze min/max violators and redistribute until stable.
    Iterative,
}

/// Options for [`compute_layout_with`](crate::compute_layout_with).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct LayoutConfig {
    /// Sequential or parallel recursion.
    pub strategy: ExecutionStrategy,
    /// Single-pass or iterative grow/shrink.
    pub flex_resolution: FlexResolution,
    /// Deepest nesting accepted before the pass fails with
    /// [`LayoutError::DepthExceeded`](crate::LayoutError::DepthExceeded).
    pub max_depth: usize,
}

impl LayoutConfig {
    /// Default nesting limit.
    pub const DEFAULT_MAX_DEPTH: usize = 512;

    /// Copy with `strategy` replaced.
    #[must_use]
    pub const fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Copy with `flex_resolution` replaced.
    #[must_use]
    pub const fn with_flex_resolution(mut self, resolution: FlexResolution) -> Self {
        self.flex_resolution = resolution;
        self
    }

    /// Copy with `max_depth` replaced.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            strategy: ExecutionStrategy::Sequential,
            flex_resolution: FlexResolution::SinglePass,
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}
