//! UI-only state kept next to the forest: expand flags and the current
//! navigation path. Neither affects the structural invariants.

use crate::store::index::ForestIndex;
use crate::types::{NodeId, PathSegment};
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct ViewState {
    pub(crate) expanded: HashMap<NodeId, bool>,
    /// Empty means the root view.
    pub(crate) current_path: Vec<PathSegment>,
}

impl ViewState {
    pub(crate) fn clear(&mut self) {
        self.expanded.clear();
        self.current_path.clear();
    }

    pub(crate) fn is_expanded(&self, id: &NodeId) -> bool {
        self.expanded.get(id).copied().unwrap_or(false)
    }

    /// Drop state that refers to deleted nodes. The current path is cut
    /// back to the deepest surviving ancestor.
    pub(crate) fn prune(&mut self, removed: &[NodeId]) {
        let removed: HashSet<&NodeId> = removed.iter().collect();
        self.expanded.retain(|id, _| !removed.contains(id));
        if let Some(cut) = self
            .current_path
            .iter()
            .position(|segment| removed.contains(&segment.id))
        {
            self.current_path.truncate(cut);
        }
    }

    /// Re-derive the current path after nodes on it were moved or renamed.
    /// Returns true if the path changed.
    pub(crate) fn refresh_path(&mut self, index: &ForestIndex, touched: &[NodeId]) -> bool {
        let touched: HashSet<&NodeId> = touched.iter().collect();
        if !self
            .current_path
            .iter()
            .any(|segment| touched.contains(&segment.id))
        {
            return false;
        }
        let refreshed = self
            .current_path
            .last()
            .and_then(|segment| index.path_of.get(&segment.id))
            .cloned()
            .unwrap_or_default();
        let changed = refreshed != self.current_path;
        self.current_path = refreshed;
        changed
    }
}
