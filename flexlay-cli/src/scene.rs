//! JSON scene description.
//!
//! A scene is a nested object: every node carries its style properties
//! inline (kebab-case CSS names), an optional `label`, an optional
//! `measure` standing in for intrinsic content such as text, and its
//! `children`.
//!
//! ```json
//! {
//!   "label": "toolbar",
//!   "justify-content": "space-between",
//!   "padding": { "left": { "fixed": 8 }, "right": { "fixed": 8 } },
//!   "children": [
//!     { "label": "title", "measure": { "width": 120, "height": 16 } },
//!     { "label": "close", "width": { "fixed": 24 }, "height": { "fixed": 24 } }
//!   ]
//! }
//! ```

use std::collections::HashMap;

use flexlay::{Axis, LayoutError, LayoutTree, Measure, NodeId, Size, Style};
use serde::Deserialize;

/// One node of a scene file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SceneNode {
    /// Name shown in the output.
    #[serde(default)]
    pub label: Option<String>,
    /// Fixed intrinsic content size of a leaf.
    #[serde(default)]
    pub measure: Option<MeasuredSize>,
    /// Child nodes in order.
    #[serde(default)]
    pub children: Vec<SceneNode>,
    /// Everything else is style.
    #[serde(flatten)]
    pub style: Style,
}

/// Intrinsic content size of a leaf.
#[derive(Debug, Clone, Copy, PartialEq, Default, Deserialize)]
pub struct MeasuredSize {
    /// Content width.
    pub width: f32,
    /// Content height.
    pub height: f32,
}

/// Size provider backed by the `measure` entries of a scene.
#[derive(Debug, Default)]
pub struct SceneMeasure {
    sizes: HashMap<NodeId, Size>,
}

impl Measure for SceneMeasure {
    fn measure(
        &self,
        node: NodeId,
        _available_main: Option<f32>,
        _available_cross: Option<f32>,
        _main_axis: Axis,
    ) -> Option<Size> {
        self.sizes.get(&node).copied()
    }
}

/// A scene loaded into a layout tree.
#[derive(Debug)]
pub struct Scene {
    /// The tree built from the scene.
    pub tree: LayoutTree,
    /// The top-level node.
    pub root: NodeId,
    /// Intrinsic sizes for the layout pass.
    pub measure: SceneMeasure,
    labels: HashMap<NodeId, String>,
}

impl Scene {
    /// Parse a scene from JSON text.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or on a style that does not validate.
    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let root: SceneNode = serde_json::from_str(json)?;
        Ok(Self::build(&root)?)
    }

    /// Build the layout tree for `root` and everything under it.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidStyle`] for the first node whose style
    /// does not validate.
    pub fn build(root: &SceneNode) -> Result<Self, LayoutError> {
        let mut builder = SceneBuilder::default();
        let root = builder.add(root)?;
        Ok(Self {
            tree: builder.tree,
            root,
            measure: SceneMeasure {
                sizes: builder.sizes,
            },
            labels: builder.labels,
        })
    }

    /// The display name of a node: its label, or its id.
    #[must_use]
    pub fn label(&self, node: NodeId) -> String {
        self.labels
            .get(&node)
            .cloned()
            .unwrap_or_else(|| format!("#{}", node.index()))
    }
}

/// Children are added before their parent, so ids are post-order.
#[derive(Default)]
struct SceneBuilder {
    tree: LayoutTree,
    labels: HashMap<NodeId, String>,
    sizes: HashMap<NodeId, Size>,
}

impl SceneBuilder {
    fn add(&mut self, node: &SceneNode) -> Result<NodeId, LayoutError> {
        let children = node
            .children
            .iter()
            .map(|child| self.add(child))
            .collect::<Result<Vec<_>, _>>()?;
        let id = self.tree.new_with_children(node.style.clone(), &children)?;
        if let Some(label) = &node.label {
            let _ = self.labels.insert(id, label.clone());
        }
        if let Some(size) = node.measure {
            let _ = self.sizes.insert(id, Size::new(size.width, size.height));
        }
        Ok(id)
    }
}
