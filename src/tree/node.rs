//! Directory node representation and the nested forest input shape

use crate::types::NodeId;
use serde::{Deserialize, Serialize};

/// A single directory entry in the forest.
///
/// The materialized path is kept in the store's path index, not on the node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: NodeId,
    pub name: String,
    pub parent_id: Option<NodeId>,
    pub sort_order: i64,
}

impl Node {
    pub fn new(id: NodeId, name: impl Into<String>, parent_id: Option<NodeId>) -> Self {
        Self {
            id,
            name: name.into(),
            parent_id,
            sort_order: 0,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Nested `{id, name, children}` item accepted by `load`/`reset` and
/// produced by `export_forest`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForestItem {
    pub id: NodeId,
    pub name: String,
    #[serde(default)]
    pub children: Vec<ForestItem>,
}

impl ForestItem {
    pub fn new(id: impl Into<NodeId>, name: impl Into<String>, children: Vec<ForestItem>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            children,
        }
    }

    /// Leaf item without children
    pub fn leaf(id: impl Into<NodeId>, name: impl Into<String>) -> Self {
        Self::new(id, name, Vec::new())
    }
}

/// Sample forest used when the widget starts without data.
pub fn sample_forest() -> Vec<ForestItem> {
    vec![
        ForestItem::new(
            "1",
            "Root Directory 1",
            vec![
                ForestItem::leaf("2", "Subdirectory 1-1"),
                ForestItem::leaf("3", "Subdirectory 1-2"),
            ],
        ),
        ForestItem::leaf("4", "Root Directory 2"),
    ]
}
