//! TreeStore
//!
//! Owns the directory forest, its derived indexes, and the UI view state.
//! Every mutation validates first and only then touches the indexes, so a
//! rejected call leaves the store exactly as it was. Observers run after
//! the mutation has committed.

pub(crate) mod index;
pub(crate) mod view_state;

use crate::config::StoreConfig;
use crate::error::{ApiError, TreeError};
use crate::notify::{TreeEvent, TreeObserver};
use crate::tree::{ForestItem, IdGenerator, Node};
use crate::types::{path_key, NodeId, PathSegment};
use index::ForestIndex;
use serde::Serialize;
use tracing::{debug, error, info, warn};
use view_state::ViewState;

/// Result of `navigate_up`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigateUp {
    /// Already at the root view; nothing changed
    AtRoot,
    /// New current path (empty for the root view)
    Moved(Vec<PathSegment>),
}

/// Result of `open` (double-click drill-down)
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OpenOutcome {
    Entered(Vec<PathSegment>),
    /// The node has no children; the view did not move
    Empty,
}

/// Counters over the current indexes
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub nodes: usize,
    pub roots: usize,
    pub path_keys: usize,
    pub max_depth: usize,
    pub expanded: usize,
}

pub struct TreeStore {
    index: ForestIndex,
    view: ViewState,
    ids: IdGenerator,
    observers: Vec<Box<dyn TreeObserver>>,
    config: StoreConfig,
}

impl Default for TreeStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeStore {
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            index: ForestIndex::default(),
            view: ViewState::default(),
            ids: IdGenerator::new(config.id_prefix.clone()),
            observers: Vec::new(),
            config,
        }
    }

    /// Register a change observer.
    pub fn subscribe(&mut self, observer: Box<dyn TreeObserver>) {
        self.observers.push(observer);
    }

    /// Replace the whole forest. Expand state and current path are cleared.
    ///
    /// Input with a repeated id is rejected and the previous state is kept.
    pub fn load(&mut self, forest: &[ForestItem]) -> Result<(), TreeError> {
        let index = match ForestIndex::from_forest(forest) {
            Ok(index) => index,
            Err(e) => {
                warn!(error = %e, "Rejected forest load");
                return Err(e);
            }
        };
        self.index = index;
        self.view.clear();
        let node_count = self.index.len();
        info!(node_count, "Loaded directory forest");
        self.committed(TreeEvent::Loaded { node_count });
        Ok(())
    }

    /// Parse a JSON array of `{id, name, children}` and load it.
    pub fn load_json(&mut self, json: &str) -> Result<(), ApiError> {
        let forest: Vec<ForestItem> = serde_json::from_str(json)?;
        self.load(&forest)?;
        Ok(())
    }

    /// Reload sample data. Same as `load`: expand state is not preserved.
    pub fn reset(&mut self, sample: &[ForestItem]) -> Result<(), TreeError> {
        debug!("Resetting directory forest");
        self.load(sample)
    }

    pub fn get_node(&self, id: &NodeId) -> Result<&Node, TreeError> {
        self.index
            .by_id
            .get(id)
            .ok_or_else(|| TreeError::NotFound(id.clone()))
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.index.by_id.contains_key(id)
    }

    /// Direct children ordered by sort order, then insertion.
    /// `None` lists the roots.
    pub fn get_children(&self, id: Option<&NodeId>) -> Result<Vec<&Node>, TreeError> {
        if let Some(id) = id {
            self.get_node(id)?;
        }
        Ok(self
            .index
            .children(id)
            .iter()
            .filter_map(|child| self.index.by_id.get(child))
            .collect())
    }

    pub fn get_root_nodes(&self) -> Vec<&Node> {
        self.index
            .children(None)
            .iter()
            .filter_map(|root| self.index.by_id.get(root))
            .collect()
    }

    pub fn has_children(&self, id: &NodeId) -> bool {
        !self.index.children(Some(id)).is_empty()
    }

    /// Materialized path from a root down to and including `id`.
    pub fn path_of(&self, id: &NodeId) -> Result<&[PathSegment], TreeError> {
        self.index
            .path_of
            .get(id)
            .map(Vec::as_slice)
            .ok_or_else(|| TreeError::NotFound(id.clone()))
    }

    /// `/`-joined name path of `id`.
    pub fn path_key(&self, id: &NodeId) -> Result<String, TreeError> {
        self.path_of(id).map(path_key)
    }

    /// Look up a node by its `/`-joined name path. When two nodes share a
    /// name path the most recently indexed one wins.
    pub fn find_by_path(&self, key: &str) -> Option<&NodeId> {
        self.index.path_key_to_id.get(key)
    }

    /// True iff `ancestor` lies strictly above `descendant`. Runs in
    /// O(depth) over the materialized path.
    pub fn is_ancestor(&self, ancestor: &NodeId, descendant: &NodeId) -> bool {
        if !self.contains(ancestor) {
            return false;
        }
        match self.index.path_of.get(descendant) {
            Some(path) => path[..path.len().saturating_sub(1)]
                .iter()
                .any(|segment| segment.id == *ancestor),
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.len() == 0
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            nodes: self.index.len(),
            roots: self.index.children(None).len(),
            path_keys: self.index.path_key_to_id.len(),
            max_depth: self.index.max_depth(),
            expanded: self.view.expanded.values().filter(|e| **e).count(),
        }
    }

    /// Full invariant check over all indexes.
    pub fn verify(&self) -> Result<(), TreeError> {
        self.index.verify()
    }

    /// Nested snapshot of the forest in the `load` input shape.
    pub fn export_forest(&self) -> Vec<ForestItem> {
        self.index.export(None)
    }

    /// Create a directory under `parent` (or a root when `None`).
    pub fn add_node(&mut self, parent: Option<&NodeId>, name: &str) -> Result<NodeId, TreeError> {
        let name = name.trim();
        if name.is_empty() {
            warn!("Rejected add with empty name");
            return Err(TreeError::EmptyName);
        }
        let mut path = match parent {
            Some(parent_id) => match self.index.path_of.get(parent_id) {
                Some(parent_path) => parent_path.clone(),
                None => {
                    warn!(parent = %parent_id, "Rejected add under missing parent");
                    return Err(TreeError::InvalidParent(parent_id.clone()));
                }
            },
            None => Vec::new(),
        };

        let index = &self.index;
        let id = self.ids.next_id(|candidate| index.by_id.contains_key(candidate));
        path.push(PathSegment::new(id.clone(), name));

        let mut node = Node::new(id.clone(), name, parent.cloned());
        node.sort_order = self.index.append_order(parent);
        self.index.insert(node, path);
        if let Some(parent_id) = parent {
            self.view.expanded.insert(parent_id.clone(), true);
        }

        debug!(id = %id, parent = ?parent, name, "Added directory");
        self.committed(TreeEvent::Added {
            id: id.clone(),
            parent_id: parent.cloned(),
        });
        Ok(id)
    }

    pub fn add_root_node(&mut self, name: &str) -> Result<NodeId, TreeError> {
        self.add_node(None, name)
    }

    /// Remove `id` and its entire subtree. Returns every removed id,
    /// parents before children.
    pub fn delete_node(&mut self, id: &NodeId) -> Result<Vec<NodeId>, TreeError> {
        if !self.contains(id) {
            warn!(id = %id, "Rejected delete of missing node");
            return Err(TreeError::NotFound(id.clone()));
        }
        let removed = self.index.remove_subtree(id);
        self.view.prune(&removed);

        debug!(id = %id, removed = removed.len(), "Deleted directory subtree");
        self.committed(TreeEvent::Deleted {
            id: id.clone(),
            removed: removed.clone(),
        });
        Ok(removed)
    }

    /// Reparent `id` under `new_parent`.
    pub fn move_node(&mut self, id: &NodeId, new_parent: &NodeId) -> Result<(), TreeError> {
        self.validate_move(id, Some(new_parent))?;
        self.reparent(id, Some(new_parent), None);
        Ok(())
    }

    /// Reparent `id` under `new_parent` (a root for `None`) and place it at
    /// `position` among its new siblings. Sibling sort orders are
    /// renumbered; a position past the end appends.
    pub fn move_node_at(
        &mut self,
        id: &NodeId,
        new_parent: Option<&NodeId>,
        position: usize,
    ) -> Result<(), TreeError> {
        self.validate_move(id, new_parent)?;
        self.reparent(id, new_parent, Some(position));
        Ok(())
    }

    /// Make `id` a root (drop on the empty tree area).
    pub fn move_to_root(&mut self, id: &NodeId) -> Result<(), TreeError> {
        self.validate_move(id, None)?;
        self.reparent(id, None, None);
        Ok(())
    }

    fn validate_move(&self, id: &NodeId, new_parent: Option<&NodeId>) -> Result<(), TreeError> {
        let rejected = |e: TreeError| -> Result<(), TreeError> {
            warn!(id = %id, target = ?new_parent, error = %e, "Rejected move");
            Err(e)
        };
        if !self.contains(id) {
            return rejected(TreeError::NotFound(id.clone()));
        }
        let Some(target) = new_parent else {
            return Ok(());
        };
        if !self.contains(target) {
            return rejected(TreeError::NotFound(target.clone()));
        }
        if id == target {
            return rejected(TreeError::SelfMove(id.clone()));
        }
        if self.is_ancestor(id, target) {
            return rejected(TreeError::CycleDetected {
                node: id.clone(),
                target: target.clone(),
            });
        }
        Ok(())
    }

    /// Commit a validated move: detach, attach, rewrite subtree paths.
    fn reparent(&mut self, id: &NodeId, new_parent: Option<&NodeId>, position: Option<usize>) {
        let old_parent = self.index.by_id.get(id).and_then(|n| n.parent_id.clone());
        self.index.detach(old_parent.as_ref(), id);

        let sort_order = self.index.append_order(new_parent);
        if let Some(node) = self.index.by_id.get_mut(id) {
            node.parent_id = new_parent.cloned();
            node.sort_order = sort_order;
        }
        self.index.attach(new_parent, id.clone());
        if let Some(position) = position {
            self.index.place_at(new_parent, id, position);
        }
        let touched = self.index.rewrite_paths(id);

        if let Some(parent_id) = new_parent {
            self.view.expanded.insert(parent_id.clone(), true);
        }
        self.view.refresh_path(&self.index, &touched);

        debug!(
            id = %id,
            from = ?old_parent,
            to = ?new_parent,
            rewritten = touched.len(),
            "Moved directory"
        );
        self.committed(TreeEvent::Moved {
            id: id.clone(),
            from: old_parent,
            to: new_parent.cloned(),
        });
    }

    /// Rename `id`; the paths of the node and all descendants follow.
    pub fn rename_node(&mut self, id: &NodeId, name: &str) -> Result<(), TreeError> {
        let name = name.trim();
        if name.is_empty() {
            warn!(id = %id, "Rejected rename to empty name");
            return Err(TreeError::EmptyName);
        }
        let Some(node) = self.index.by_id.get_mut(id) else {
            warn!(id = %id, "Rejected rename of missing node");
            return Err(TreeError::NotFound(id.clone()));
        };
        node.name = name.to_string();
        let touched = self.index.rewrite_paths(id);
        self.view.refresh_path(&self.index, &touched);

        debug!(id = %id, name, "Renamed directory");
        self.committed(TreeEvent::Renamed {
            id: id.clone(),
            name: name.to_string(),
        });
        Ok(())
    }

    /// Assign sort orders by position in `order`. Children of `parent` not
    /// named in `order` keep their current sort order.
    pub fn reorder_children(
        &mut self,
        parent: Option<&NodeId>,
        order: &[NodeId],
    ) -> Result<(), TreeError> {
        if let Some(parent_id) = parent {
            if !self.contains(parent_id) {
                warn!(parent = %parent_id, "Rejected reorder under missing parent");
                return Err(TreeError::NotFound(parent_id.clone()));
            }
        }
        if let Some(stray) = order
            .iter()
            .find(|id| self.index.by_id.get(*id).map(|n| n.parent_id.as_ref()) != Some(parent))
        {
            warn!(id = %stray, parent = ?parent, "Rejected reorder of non-child");
            return Err(TreeError::NotAChild {
                node: stray.clone(),
                parent: parent.cloned(),
            });
        }

        for (position, id) in order.iter().enumerate() {
            if let Some(node) = self.index.by_id.get_mut(id) {
                node.sort_order = position as i64;
            }
        }
        self.index.resort(parent);

        debug!(parent = ?parent, count = order.len(), "Reordered directories");
        self.committed(TreeEvent::Reordered {
            parent_id: parent.cloned(),
        });
        Ok(())
    }

    /// Record an expand flag. Unknown ids are ignored.
    pub fn set_expanded(&mut self, id: &NodeId, expanded: bool) {
        if !self.contains(id) {
            debug!(id = %id, "Ignoring expand flag for unknown node");
            return;
        }
        self.view.expanded.insert(id.clone(), expanded);
        self.committed(TreeEvent::ExpandChanged {
            id: id.clone(),
            expanded,
        });
    }

    pub fn is_expanded(&self, id: &NodeId) -> bool {
        self.view.is_expanded(id)
    }

    /// Flip the expand flag of `id` and return the new value.
    pub fn toggle_expanded(&mut self, id: &NodeId) -> Result<bool, TreeError> {
        self.get_node(id)?;
        let expanded = !self.is_expanded(id);
        self.set_expanded(id, expanded);
        Ok(expanded)
    }

    pub fn current_path(&self) -> &[PathSegment] {
        &self.view.current_path
    }

    /// Directory shown by the current view, `None` at the root view.
    pub fn current_dir(&self) -> Option<&NodeId> {
        self.view.current_path.last().map(|segment| &segment.id)
    }

    /// Point the view at `id` (or the root view for `None`). An explicit
    /// `path` overrides the node's materialized path.
    pub fn navigate(
        &mut self,
        id: Option<&NodeId>,
        path: Option<Vec<PathSegment>>,
    ) -> Result<(), TreeError> {
        let new_path = match id {
            None => Vec::new(),
            Some(id) => match path {
                Some(path) => {
                    self.get_node(id)?;
                    if let Some(stale) = path.iter().find(|segment| !self.contains(&segment.id)) {
                        return Err(TreeError::NotFound(stale.id.clone()));
                    }
                    path
                }
                None => self.path_of(id)?.to_vec(),
            },
        };
        self.view.current_path = new_path;
        debug!(depth = self.view.current_path.len(), "Navigated");
        self.committed(TreeEvent::Navigated {
            path: self.view.current_path.clone(),
        });
        Ok(())
    }

    /// Step the view one level up.
    pub fn navigate_up(&mut self) -> NavigateUp {
        if self.view.current_path.is_empty() {
            debug!("Navigate up ignored at root");
            return NavigateUp::AtRoot;
        }
        self.view.current_path.pop();
        let path = self.view.current_path.clone();
        self.committed(TreeEvent::Navigated { path: path.clone() });
        NavigateUp::Moved(path)
    }

    /// Drill into `id` if it has children.
    pub fn open(&mut self, id: &NodeId) -> Result<OpenOutcome, TreeError> {
        self.get_node(id)?;
        if !self.has_children(id) {
            return Ok(OpenOutcome::Empty);
        }
        self.navigate(Some(id), None)?;
        Ok(OpenOutcome::Entered(self.view.current_path.clone()))
    }

    fn committed(&mut self, event: TreeEvent) {
        if self.config.check_invariants {
            if let Err(e) = self.index.verify() {
                error!(error = %e, event = ?event, "Invariant violation after mutation");
            }
        }
        for observer in &mut self.observers {
            observer.on_event(&event);
        }
    }
}
