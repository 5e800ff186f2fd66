//! Helpers shared by the integration tests

use dirtree::{ForestItem, NodeId, PathSegment, TreeStore};

pub fn id(s: &str) -> NodeId {
    NodeId::new(s)
}

/// Every id currently in the store, depth-first from the roots.
pub fn all_ids(store: &TreeStore) -> Vec<NodeId> {
    fn walk(items: &[ForestItem], out: &mut Vec<NodeId>) {
        for item in items {
            out.push(item.id.clone());
            walk(&item.children, out);
        }
    }
    let mut out = Vec::new();
    walk(&store.export_forest(), &mut out);
    out
}

/// Ancestor check by walking parent links, used as an oracle.
pub fn ancestor_by_walk(store: &TreeStore, ancestor: &NodeId, descendant: &NodeId) -> bool {
    let Ok(mut current) = store.get_node(descendant) else {
        return false;
    };
    while let Some(parent) = &current.parent_id {
        if parent == ancestor {
            return true;
        }
        current = match store.get_node(parent) {
            Ok(node) => node,
            Err(_) => return false,
        };
    }
    false
}

/// Assert `path_of[x] == path_of[parent(x)] + [x]` for every node.
pub fn assert_paths_consistent(store: &TreeStore) {
    for node_id in all_ids(store) {
        let node = store.get_node(&node_id).unwrap();
        let mut expected: Vec<PathSegment> = match &node.parent_id {
            Some(parent) => store.path_of(parent).unwrap().to_vec(),
            None => Vec::new(),
        };
        expected.push(PathSegment::new(node_id.clone(), node.name.clone()));
        assert_eq!(store.path_of(&node_id).unwrap(), expected.as_slice());
    }
}

/// Everything a caller can observe about the forest's structure.
pub fn observable_state(store: &TreeStore) -> (Vec<ForestItem>, Vec<(NodeId, Vec<PathSegment>, bool)>) {
    let mut rows: Vec<_> = all_ids(store)
        .into_iter()
        .map(|node_id| {
            let path = store.path_of(&node_id).unwrap().to_vec();
            let expanded = store.is_expanded(&node_id);
            (node_id, path, expanded)
        })
        .collect();
    rows.sort_by(|a, b| a.0.cmp(&b.0));
    (store.export_forest(), rows)
}
