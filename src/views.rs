//! Render Views
//!
//! Read-only snapshots handed to the renderer. A view is rooted at the
//! current directory (or at the roots for the root view) and descends only
//! into expanded nodes.

use crate::error::TreeError;
use crate::store::TreeStore;
use crate::types::{NodeId, PathSegment};
use serde::{Deserialize, Serialize};

/// One visible node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderNode {
    pub id: NodeId,
    pub name: String,
    /// 0 for the top level of the view
    pub depth: usize,
    pub expanded: bool,
    pub has_children: bool,
    /// Populated only when `expanded` is true
    pub children: Vec<RenderNode>,
}

/// Everything the renderer needs for one frame
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeView {
    pub breadcrumbs: Vec<PathSegment>,
    pub nodes: Vec<RenderNode>,
}

impl TreeView {
    /// Ids in display order, depth-first.
    pub fn visible_ids(&self) -> Vec<NodeId> {
        fn walk(nodes: &[RenderNode], out: &mut Vec<NodeId>) {
            for node in nodes {
                out.push(node.id.clone());
                walk(&node.children, out);
            }
        }
        let mut out = Vec::new();
        walk(&self.nodes, &mut out);
        out
    }
}

/// Consumer of tree views (DOM, terminal, test double)
pub trait Renderer {
    fn render(&mut self, view: &TreeView);
}

/// Build the view for the store's current directory.
pub fn build_view(store: &TreeStore) -> Result<TreeView, TreeError> {
    let top = store.current_dir();
    Ok(TreeView {
        breadcrumbs: store.current_path().to_vec(),
        nodes: render_level(store, top, 0)?,
    })
}

fn render_level(
    store: &TreeStore,
    parent: Option<&NodeId>,
    depth: usize,
) -> Result<Vec<RenderNode>, TreeError> {
    store
        .get_children(parent)?
        .into_iter()
        .map(|node| {
            let expanded = store.is_expanded(&node.id);
            let children = if expanded {
                render_level(store, Some(&node.id), depth + 1)?
            } else {
                Vec::new()
            };
            Ok(RenderNode {
                id: node.id.clone(),
                name: node.name.clone(),
                depth,
                expanded,
                has_children: store.has_children(&node.id),
                children,
            })
        })
        .collect()
}
