//! Errors reported by tree construction and layout.
//!
//! Everything here is a caller bug caught at the point it happens
//! (building a style, attaching a node). Unresolvable values such as a
//! percentage against an undefined reference are *not* errors; they
//! resolve to "undefined" and the algorithm's fallbacks apply.

use thiserror::Error;

use crate::tree::NodeId;

/// Failure conditions of the layout engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// A style violates a property's value range.
    #[error("invalid style: {reason}")]
    InvalidStyle {
        /// Human-readable description of the violated constraint.
        reason: String,
    },

    /// The id does not belong to this tree.
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),

    /// The child already has a parent; detach it first.
    #[error("node {child:?} is already attached to {parent:?}")]
    AlreadyAttached {
        /// The node being attached.
        child: NodeId,
        /// Its current parent.
        parent: NodeId,
    },

    /// Attaching would make a node its own ancestor.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    Cycle {
        /// The prospective parent.
        parent: NodeId,
        /// The prospective child (the parent itself or one of its ancestors).
        child: NodeId,
    },

    /// The node is not a child of the given parent.
    #[error("node {child:?} is not a child of {parent:?}")]
    NotAChild {
        /// The supposed parent.
        parent: NodeId,
        /// The node that was not found among its children.
        child: NodeId,
    },

    /// A child index past the end of the child list.
    #[error("child index {index} out of bounds for {parent:?} with {len} children")]
    ChildIndexOutOfBounds {
        /// The container.
        parent: NodeId,
        /// The requested index.
        index: usize,
        /// The number of children the container has.
        len: usize,
    },

    /// The tree is deeper than the configured recursion limit.
    #[error("layout recursion exceeded the depth limit of {limit}")]
    DepthExceeded {
        /// The configured limit.
        limit: usize,
    },
}

impl LayoutError {
    pub(crate) fn invalid_style(reason: impl Into<String>) -> Self {
        Self::InvalidStyle {
            reason: reason.into(),
        }
    }
}
