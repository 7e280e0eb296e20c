//! Scene documents.
//!
//! A scene document is the serialized form of a transform hierarchy: a flat
//! node list with per-node transformation data and child index lists, plus
//! the indices of the root nodes. Documents are validated structurally
//! before instantiation; transformation payloads themselves are taken as-is.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use sceneview_scene::{Transform, TransformData, TransformRef};

use crate::error::{ResourceError, ResourceResult};

/// One node of a scene document.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct NodeData {
    /// Display name, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Transformation payload.
    #[serde(flatten)]
    pub transform: TransformData,

    /// Indices of child nodes within the document's node list.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<usize>,
}

/// A complete scene description.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDocument {
    /// Indices of the root nodes.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roots: Vec<usize>,

    /// All nodes, referenced by index.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<NodeData>,
}

impl SceneDocument {
    /// Load a scene document from a JSON file.
    pub fn load(path: &Path) -> ResourceResult<Self> {
        if !path.exists() {
            return Err(ResourceError::FileNotFound(path.to_path_buf()));
        }

        let text = std::fs::read_to_string(path)?;
        let document = Self::from_json(&text).map_err(|e| ResourceError::DocumentLoad {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        info!(
            "Loaded scene document '{}': {} nodes, {} roots",
            path.display(),
            document.nodes.len(),
            document.roots.len()
        );

        Ok(document)
    }

    /// Parse a scene document from JSON text.
    pub fn from_json(text: &str) -> ResourceResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serialize the document to pretty-printed JSON.
    pub fn to_json(&self) -> ResourceResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check structural integrity: every root and child index must be in
    /// range, and no node may be referenced more than once.
    ///
    /// Single-reference implies the reachable graph is a forest, so
    /// instantiation cannot alias nodes or loop.
    pub fn validate(&self) -> ResourceResult<()> {
        let count = self.nodes.len();
        let mut referenced = vec![0usize; count];

        let references = self
            .roots
            .iter()
            .chain(self.nodes.iter().flat_map(|node| node.children.iter()));
        for &index in references {
            if index >= count {
                return Err(ResourceError::NodeIndexOutOfRange { index, count });
            }
            referenced[index] += 1;
            if referenced[index] > 1 {
                return Err(ResourceError::NodeReused(index));
            }
        }

        Ok(())
    }

    /// Build a live transform hierarchy from the document.
    ///
    /// Returns one [`TransformRef`] per document root, with descendants
    /// attached. TRS nodes have their local matrix computed immediately;
    /// nodes carrying an explicit matrix adopt it on their first update
    /// cycle.
    pub fn instantiate(&self) -> ResourceResult<Vec<TransformRef>> {
        self.validate()?;

        let roots: Vec<TransformRef> = self
            .roots
            .iter()
            .map(|&index| self.build_node(index))
            .collect();

        debug!("Instantiated {} root transform(s)", roots.len());
        Ok(roots)
    }

    /// Serialize a live transform hierarchy into a document.
    ///
    /// The inverse of [`SceneDocument::instantiate`]: nodes are emitted in
    /// depth-first order, identity transformations as empty payloads.
    pub fn capture(roots: &[TransformRef]) -> Self {
        let mut document = Self::default();
        for root in roots {
            let index = Self::capture_node(root, &mut document.nodes);
            document.roots.push(index);
        }
        document
    }

    fn build_node(&self, index: usize) -> TransformRef {
        let data = &self.nodes[index];

        let transform = Transform::new();
        transform.borrow_mut().from_data(&data.transform);

        for &child_index in &data.children {
            let child = self.build_node(child_index);
            Transform::add_child(&transform, &child);
        }

        transform
    }

    fn capture_node(node: &TransformRef, nodes: &mut Vec<NodeData>) -> usize {
        let index = nodes.len();
        nodes.push(NodeData {
            name: None,
            transform: node.borrow().to_data(),
            children: Vec::new(),
        });

        let children: Vec<TransformRef> = node.borrow().children().to_vec();
        for child in &children {
            let child_index = Self::capture_node(child, nodes);
            nodes[index].children.push(child_index);
        }

        index
    }
}
