//! The layout tree.
//!
//! # Design
//!
//! The tree uses arena allocation with [`NodeId`] indices for all
//! relationships, providing O(1) access and traversal without borrow
//! checker issues. A node exclusively owns its ordered child list; the
//! `parent` index is a non-owning back-reference used only for dirty
//! propagation and ancestry checks. Attaching a node that already has a
//! parent is rejected, so a node can never be shared by two containers.

use serde::{Deserialize, Serialize};

use crate::error::LayoutError;
use crate::geometry::{Edges, Rect, Size};
use crate::style::Style;

/// A type-safe index into a [`LayoutTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(usize);

impl NodeId {
    /// The arena slot of this node.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// The computed box of one node.
///
/// `x`/`y` are relative to the content-box origin of the node's parent
/// (the root sits at (0, 0)). `padding` is the resolved padding, so the
/// node's own content origin is `(x + padding.left, y + padding.top)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LayoutResult {
    /// Horizontal offset within the parent's content box.
    pub x: f32,
    /// Vertical offset within the parent's content box.
    pub y: f32,
    /// Border-box width.
    pub width: f32,
    /// Border-box height.
    pub height: f32,
    /// Resolved padding of this node.
    pub padding: Edges,
}

impl LayoutResult {
    /// The box as a rectangle in parent content coordinates.
    #[must_use]
    pub const fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Width and height.
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

/// One node of the arena.
#[derive(Debug, Clone)]
pub struct LayoutNode {
    style: Style,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    dirty: bool,
    layout: LayoutResult,
}

impl LayoutNode {
    fn new(style: Style) -> Self {
        Self {
            style,
            parent: None,
            children: Vec::new(),
            dirty: true,
            layout: LayoutResult::default(),
        }
    }

    /// The style snapshot.
    #[must_use]
    pub const fn style(&self) -> &Style {
        &self.style
    }

    /// The containing node, if attached.
    #[must_use]
    pub const fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in document order.
    #[must_use]
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Whether the node needs a layout pass.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// The most recent layout result.
    #[must_use]
    pub const fn layout(&self) -> &LayoutResult {
        &self.layout
    }
}

/// Arena-based layout tree with O(1) node access and traversal.
///
/// This structure stores all nodes in a contiguous vector, using indices
/// for all relationships. Removing a child detaches it; the detached node
/// keeps its subtree and can be attached elsewhere or laid out as a root
/// of its own.
#[derive(Debug, Clone, Default)]
pub struct LayoutTree {
    nodes: Vec<LayoutNode>,
}

impl LayoutTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty tree with room for `capacity` nodes.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
        }
    }

    /// Get the number of nodes in the arena (attached or not).
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if no node was ever allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get a node by its ID.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&LayoutNode> {
        self.nodes.get(id.0)
    }

    pub(crate) fn node(&self, id: NodeId) -> Result<&LayoutNode, LayoutError> {
        self.nodes.get(id.0).ok_or(LayoutError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut LayoutNode, LayoutError> {
        self.nodes.get_mut(id.0).ok_or(LayoutError::UnknownNode(id))
    }

    /// Allocate a detached node with no children.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidStyle`] if the style fails validation.
    pub fn new_leaf(&mut self, style: Style) -> Result<NodeId, LayoutError> {
        style.validate()?;
        let id = NodeId(self.nodes.len());
        self.nodes.push(LayoutNode::new(style));
        Ok(id)
    }

    /// Allocate a node and attach `children` to it in order.
    ///
    /// # Errors
    ///
    /// Fails on an invalid style or on the first child that cannot be
    /// attached (see [`LayoutTree::add_child`]).
    pub fn new_with_children(
        &mut self,
        style: Style,
        children: &[NodeId],
    ) -> Result<NodeId, LayoutError> {
        let id = self.new_leaf(style)?;
        for &child in children {
            self.add_child(id, child)?;
        }
        Ok(id)
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// Marks `parent` and all of its ancestors dirty.
    ///
    /// # Errors
    ///
    /// - [`LayoutError::UnknownNode`] if either id is not in this tree.
    /// - [`LayoutError::AlreadyAttached`] if `child` has a parent.
    /// - [`LayoutError::Cycle`] if `child` is `parent` or one of its ancestors.
    pub fn add_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), LayoutError> {
        let len = self.node(parent)?.children.len();
        self.insert_child(parent, len, child)
    }

    /// Insert `child` at `index` in `parent`'s child list.
    ///
    /// # Errors
    ///
    /// Same as [`LayoutTree::add_child`], plus
    /// [`LayoutError::ChildIndexOutOfBounds`] if `index` is past the end.
    pub fn insert_child(
        &mut self,
        parent: NodeId,
        index: usize,
        child: NodeId,
    ) -> Result<(), LayoutError> {
        let len = self.node(parent)?.children.len();
        if let Some(current) = self.node(child)?.parent {
            return Err(LayoutError::AlreadyAttached {
                child,
                parent: current,
            });
        }
        if child == parent || self.is_descendant_of(parent, child) {
            return Err(LayoutError::Cycle { parent, child });
        }
        if index > len {
            return Err(LayoutError::ChildIndexOutOfBounds { parent, index, len });
        }

        self.node_mut(parent)?.children.insert(index, child);
        self.node_mut(child)?.parent = Some(parent);
        self.mark_dirty(parent)
    }

    /// Detach `child` from `parent`.
    ///
    /// Marks `parent` and all of its ancestors dirty.
    ///
    /// # Errors
    ///
    /// [`LayoutError::UnknownNode`] for foreign ids and
    /// [`LayoutError::NotAChild`] if `child` is not among `parent`'s children.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), LayoutError> {
        let index = self
            .node(parent)?
            .children
            .iter()
            .position(|&c| c == child)
            .ok_or(LayoutError::NotAChild { parent, child })?;
        let _ = self.remove_child_at(parent, index)?;
        Ok(())
    }

    /// Detach the child at `index` and return it.
    ///
    /// # Errors
    ///
    /// [`LayoutError::ChildIndexOutOfBounds`] if `index` is past the end.
    pub fn remove_child_at(&mut self, parent: NodeId, index: usize) -> Result<NodeId, LayoutError> {
        let node = self.node_mut(parent)?;
        let len = node.children.len();
        if index >= len {
            return Err(LayoutError::ChildIndexOutOfBounds { parent, index, len });
        }
        let child = node.children.remove(index);
        self.node_mut(child)?.parent = None;
        self.mark_dirty(parent)?;
        Ok(child)
    }

    /// Replace a node's style snapshot.
    ///
    /// Marks the node and all of its ancestors dirty.
    ///
    /// # Errors
    ///
    /// Fails on an unknown id or a style that does not validate; the old
    /// style is kept in both cases.
    pub fn set_style(&mut self, id: NodeId, style: Style) -> Result<(), LayoutError> {
        style.validate()?;
        self.node_mut(id)?.style = style;
        self.mark_dirty(id)
    }

    /// Mark a node and every ancestor up to its root as dirty.
    ///
    /// # Errors
    ///
    /// [`LayoutError::UnknownNode`] if `id` is not in this tree.
    pub fn mark_dirty(&mut self, id: NodeId) -> Result<(), LayoutError> {
        let mut current = Some(id);
        while let Some(node_id) = current {
            let node = self.node_mut(node_id)?;
            node.dirty = true;
            current = node.parent;
        }
        Ok(())
    }

    /// The style of a node.
    #[must_use]
    pub fn style(&self, id: NodeId) -> Option<&Style> {
        self.get(id).map(LayoutNode::style)
    }

    /// Get the parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Get all children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Number of children of a node.
    #[must_use]
    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).len()
    }

    /// Whether a node needs a layout pass. Unknown ids are never dirty.
    #[must_use]
    pub fn is_dirty(&self, id: NodeId) -> bool {
        self.get(id).is_some_and(LayoutNode::is_dirty)
    }

    /// The last computed layout of a node.
    #[must_use]
    pub fn layout(&self, id: NodeId) -> Option<LayoutResult> {
        self.get(id).map(|n| n.layout)
    }

    /// Check if `descendant` is a descendant of `ancestor`.
    #[must_use]
    pub fn is_descendant_of(&self, descendant: NodeId, ancestor: NodeId) -> bool {
        self.ancestors(descendant).any(|id| id == ancestor)
    }

    /// Iterate over all ancestors of a node, from parent to root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// The node's border box in the coordinate space of its root.
    ///
    /// Walks the parent chain adding each ancestor's position and padding,
    /// which is what a renderer needs to paint the box.
    #[must_use]
    pub fn absolute_rect(&self, id: NodeId) -> Option<Rect> {
        let layout = self.layout(id)?;
        let mut rect = layout.rect();
        for ancestor in self.ancestors(id) {
            let parent = self.layout(ancestor)?;
            rect.x += parent.x + parent.padding.left;
            rect.y += parent.y + parent.padding.top;
        }
        Some(rect)
    }

    pub(crate) fn apply_result(&mut self, id: NodeId, layout: LayoutResult) {
        if let Some(node) = self.nodes.get_mut(id.0) {
            node.layout = layout;
            node.dirty = false;
        }
    }
}

/// Iterator over ancestors of a node.
pub struct AncestorIterator<'a> {
    tree: &'a LayoutTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}
