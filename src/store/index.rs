//! ForestIndex: the four structural indexes of the directory forest.
//!
//! Every helper here assumes the caller has already validated its inputs.
//! `TreeStore` owns one `ForestIndex` and only calls these helpers after
//! all checks for an operation have passed.

use crate::error::TreeError;
use crate::tree::{ForestItem, Node};
use crate::types::{path_key, NodeId, PathSegment};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ForestIndex {
    pub(crate) by_id: HashMap<NodeId, Node>,
    /// `None` holds the roots. Lists are kept sorted by `sort_order`,
    /// ties in insertion order. Empty lists are removed.
    pub(crate) children_of: HashMap<Option<NodeId>, Vec<NodeId>>,
    pub(crate) path_of: HashMap<NodeId, Vec<PathSegment>>,
    /// Last writer wins when two nodes share a name path.
    pub(crate) path_key_to_id: HashMap<String, NodeId>,
}

impl ForestIndex {
    /// Build a fresh index from nested input, depth-first.
    pub(crate) fn from_forest(forest: &[ForestItem]) -> Result<Self, TreeError> {
        let mut index = ForestIndex::default();
        let mut stack: Vec<(&ForestItem, Option<NodeId>, Vec<PathSegment>)> = forest
            .iter()
            .rev()
            .map(|item| (item, None, Vec::new()))
            .collect();

        while let Some((item, parent_id, parent_path)) = stack.pop() {
            if index.by_id.contains_key(&item.id) {
                return Err(TreeError::DuplicateId(item.id.clone()));
            }
            let mut path = parent_path;
            path.push(PathSegment::new(item.id.clone(), item.name.clone()));

            for child in item.children.iter().rev() {
                stack.push((child, Some(item.id.clone()), path.clone()));
            }

            let node = Node::new(item.id.clone(), item.name.clone(), parent_id);
            index.insert(node, path);
        }

        Ok(index)
    }

    pub(crate) fn len(&self) -> usize {
        self.by_id.len()
    }

    pub(crate) fn children(&self, parent: Option<&NodeId>) -> &[NodeId] {
        self.children_of
            .get(&parent.cloned())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Sort order a node appended under `parent` should take so it lands last.
    pub(crate) fn append_order(&self, parent: Option<&NodeId>) -> i64 {
        self.children(parent)
            .iter()
            .filter_map(|id| self.by_id.get(id))
            .map(|node| node.sort_order)
            .max()
            .unwrap_or(0)
    }

    /// Insert a node into all four indexes.
    pub(crate) fn insert(&mut self, node: Node, path: Vec<PathSegment>) {
        let id = node.id.clone();
        let parent = node.parent_id.clone();
        self.path_key_to_id.insert(path_key(&path), id.clone());
        self.path_of.insert(id.clone(), path);
        self.by_id.insert(id.clone(), node);
        self.attach(parent.as_ref(), id);
    }

    /// Place `id` in its parent's child list, after any sibling with an
    /// equal or lower sort order.
    pub(crate) fn attach(&mut self, parent: Option<&NodeId>, id: NodeId) {
        let order = self.by_id.get(&id).map(|n| n.sort_order).unwrap_or(0);
        let by_id = &self.by_id;
        let siblings = self.children_of.entry(parent.cloned()).or_default();
        let position = siblings
            .iter()
            .position(|sibling| by_id.get(sibling).map(|n| n.sort_order).unwrap_or(0) > order)
            .unwrap_or(siblings.len());
        siblings.insert(position, id);
    }

    pub(crate) fn detach(&mut self, parent: Option<&NodeId>, id: &NodeId) {
        let key = parent.cloned();
        if let Some(siblings) = self.children_of.get_mut(&key) {
            siblings.retain(|sibling| sibling != id);
            if siblings.is_empty() {
                self.children_of.remove(&key);
            }
        }
    }

    /// Stable re-sort of one child list after sort orders changed.
    pub(crate) fn resort(&mut self, parent: Option<&NodeId>) {
        let by_id = &self.by_id;
        if let Some(siblings) = self.children_of.get_mut(&parent.cloned()) {
            siblings.sort_by_key(|id| by_id.get(id).map(|n| n.sort_order).unwrap_or(0));
        }
    }

    /// Move `id` to `position` among its siblings under `parent` and
    /// renumber their sort orders 0..n. Positions past the end append.
    pub(crate) fn place_at(&mut self, parent: Option<&NodeId>, id: &NodeId, position: usize) {
        let mut order: Vec<NodeId> = self
            .children(parent)
            .iter()
            .filter(|child| *child != id)
            .cloned()
            .collect();
        order.insert(position.min(order.len()), id.clone());
        for (rank, child) in order.iter().enumerate() {
            if let Some(node) = self.by_id.get_mut(child) {
                node.sort_order = rank as i64;
            }
        }
        self.resort(parent);
    }

    /// `id` and all its descendants, parents before children.
    pub(crate) fn subtree(&self, id: &NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id.clone()];
        while let Some(current) = stack.pop() {
            for child in self.children(Some(&current)).iter().rev() {
                stack.push(child.clone());
            }
            out.push(current);
        }
        out
    }

    /// Remove a path key only while it still points at `id`.
    fn release_key(&mut self, key: &str, id: &NodeId) {
        if self.path_key_to_id.get(key) == Some(id) {
            self.path_key_to_id.remove(key);
        }
    }

    /// Recompute materialized paths and path keys for `id` and every
    /// descendant from the current parent links.
    pub(crate) fn rewrite_paths(&mut self, id: &NodeId) -> Vec<NodeId> {
        let prefix = self
            .by_id
            .get(id)
            .and_then(|node| node.parent_id.as_ref())
            .and_then(|parent| self.path_of.get(parent))
            .cloned()
            .unwrap_or_default();

        let mut touched = Vec::new();
        let mut stack = vec![(id.clone(), prefix)];
        while let Some((current, parent_path)) = stack.pop() {
            let name = match self.by_id.get(&current) {
                Some(node) => node.name.clone(),
                None => continue,
            };
            let mut path = parent_path;
            path.push(PathSegment::new(current.clone(), name));

            if let Some(stale) = self.path_of.get(&current).map(|p| path_key(p)) {
                self.release_key(&stale, &current);
            }
            self.path_key_to_id.insert(path_key(&path), current.clone());

            for child in self.children(Some(&current)).iter().rev() {
                stack.push((child.clone(), path.clone()));
            }
            self.path_of.insert(current.clone(), path);
            touched.push(current);
        }
        touched
    }

    /// Remove `id` and its whole subtree. Returns the removed ids.
    pub(crate) fn remove_subtree(&mut self, id: &NodeId) -> Vec<NodeId> {
        let removed = self.subtree(id);
        let parent = self.by_id.get(id).and_then(|n| n.parent_id.clone());
        self.detach(parent.as_ref(), id);

        for gone in &removed {
            if let Some(path) = self.path_of.remove(gone) {
                self.release_key(&path_key(&path), gone);
            }
            self.by_id.remove(gone);
            self.children_of.remove(&Some(gone.clone()));
        }
        removed
    }

    pub(crate) fn max_depth(&self) -> usize {
        self.path_of.values().map(Vec::len).max().unwrap_or(0)
    }

    /// Check every structural invariant of the forest.
    pub(crate) fn verify(&self) -> Result<(), TreeError> {
        let corrupted = |msg: String| -> Result<(), TreeError> { Err(TreeError::Corrupted(msg)) };

        let mut listed = HashSet::new();
        for (parent, children) in &self.children_of {
            if children.is_empty() {
                return corrupted(format!("empty child list kept for {:?}", parent));
            }
            if let Some(parent) = parent {
                if !self.by_id.contains_key(parent) {
                    return corrupted(format!("child list for missing parent {}", parent));
                }
            }
            let mut last_order = i64::MIN;
            for child in children {
                let Some(node) = self.by_id.get(child) else {
                    return corrupted(format!("child list references missing node {}", child));
                };
                if node.parent_id != *parent {
                    return corrupted(format!("node {} listed under wrong parent", child));
                }
                if node.sort_order < last_order {
                    return corrupted(format!("child list of {:?} out of order", parent));
                }
                last_order = node.sort_order;
                if !listed.insert(child.clone()) {
                    return corrupted(format!("node {} listed twice", child));
                }
            }
        }

        for (id, node) in &self.by_id {
            if !listed.contains(id) {
                return corrupted(format!("node {} missing from its parent's child list", id));
            }
            let Some(path) = self.path_of.get(id) else {
                return corrupted(format!("node {} has no materialized path", id));
            };
            let mut expected = match &node.parent_id {
                Some(parent) => match self.path_of.get(parent) {
                    Some(parent_path) => parent_path.clone(),
                    None => return corrupted(format!("parent {} of {} has no path", parent, id)),
                },
                None => Vec::new(),
            };
            expected.push(PathSegment::new(id.clone(), node.name.clone()));
            if *path != expected {
                return corrupted(format!("stale materialized path for {}", id));
            }
            if path[..path.len() - 1].iter().any(|segment| segment.id == *id) {
                return corrupted(format!("node {} is its own ancestor", id));
            }
        }

        if self.path_of.len() != self.by_id.len() {
            return corrupted("path index size differs from node index".to_string());
        }
        for (key, id) in &self.path_key_to_id {
            match self.path_of.get(id) {
                Some(path) if path_key(path) == *key => {}
                _ => return corrupted(format!("path key {:?} points at stale node {}", key, id)),
            }
        }
        Ok(())
    }

    /// Nested snapshot in the `load` input shape.
    pub(crate) fn export(&self, parent: Option<&NodeId>) -> Vec<ForestItem> {
        self.children(parent)
            .iter()
            .filter_map(|id| self.by_id.get(id))
            .map(|node| ForestItem {
                id: node.id.clone(),
                name: node.name.clone(),
                children: self.export(Some(&node.id)),
            })
            .collect()
    }
}
