//! Property-based invariant tests for the forest indexes.
//!
//! 1. Materialized paths match parent paths after any operation sequence.
//! 2. `is_ancestor` is irreflexive and agrees with a parent-pointer walk.
//! 3. Moving a node under itself or a descendant fails without side effects.
//! 4. Deleting a node removes its whole subtree and leaves no dangling parent.

use dirtree::{NodeId, TreeError, TreeStore};
use proptest::prelude::*;
use std::collections::HashSet;

use super::support::{all_ids, ancestor_by_walk, assert_paths_consistent, observable_state};

#[derive(Debug, Clone)]
enum Op {
    Add(usize, bool),
    Delete(usize),
    Move(usize, usize),
    MoveToRoot(usize),
    Rename(usize, u8),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (any::<usize>(), any::<bool>()).prop_map(|(p, root)| Op::Add(p, root)),
        1 => any::<usize>().prop_map(Op::Delete),
        3 => (any::<usize>(), any::<usize>()).prop_map(|(a, b)| Op::Move(a, b)),
        1 => any::<usize>().prop_map(Op::MoveToRoot),
        1 => (any::<usize>(), any::<u8>()).prop_map(|(a, n)| Op::Rename(a, n)),
    ]
}

fn pick(ids: &[NodeId], i: usize) -> Option<NodeId> {
    if ids.is_empty() {
        None
    } else {
        Some(ids[i % ids.len()].clone())
    }
}

/// Apply ops, ignoring rejected ones (rejections are checked elsewhere).
fn build(ops: &[Op]) -> TreeStore {
    let mut store = TreeStore::new();
    for op in ops {
        let ids = all_ids(&store);
        match op {
            Op::Add(p, root) => {
                let parent = if *root { None } else { pick(&ids, *p) };
                store.add_node(parent.as_ref(), "n").unwrap();
            }
            Op::Delete(i) => {
                if let Some(target) = pick(&ids, *i) {
                    store.delete_node(&target).unwrap();
                }
            }
            Op::Move(a, b) => {
                if let (Some(a), Some(b)) = (pick(&ids, *a), pick(&ids, *b)) {
                    let _ = store.move_node(&a, &b);
                }
            }
            Op::MoveToRoot(a) => {
                if let Some(a) = pick(&ids, *a) {
                    store.move_to_root(&a).unwrap();
                }
            }
            Op::Rename(a, n) => {
                if let Some(a) = pick(&ids, *a) {
                    store.rename_node(&a, &format!("r{}", n)).unwrap();
                }
            }
        }
    }
    store
}

proptest! {
    #[test]
    fn paths_stay_consistent(ops in prop::collection::vec(op_strategy(), 1..60)) {
        let store = build(&ops);
        assert_paths_consistent(&store);
        prop_assert!(store.verify().is_ok());
    }

    #[test]
    fn is_ancestor_matches_parent_walk(ops in prop::collection::vec(op_strategy(), 1..40)) {
        let store = build(&ops);
        let ids = all_ids(&store);
        for a in &ids {
            prop_assert!(!store.is_ancestor(a, a));
            for b in &ids {
                prop_assert_eq!(
                    store.is_ancestor(a, b),
                    ancestor_by_walk(&store, a, b),
                    "a={} b={}", a, b
                );
            }
        }
    }

    #[test]
    fn moves_into_own_subtree_are_rejected_cleanly(
        ops in prop::collection::vec(op_strategy(), 1..40),
        pick_node in any::<usize>(),
        pick_target in any::<usize>(),
    ) {
        let mut store = build(&ops);
        let ids = all_ids(&store);
        prop_assume!(!ids.is_empty());
        let node = ids[pick_node % ids.len()].clone();
        let subtree: Vec<NodeId> = ids
            .iter()
            .filter(|other| **other == node || store.is_ancestor(&node, other))
            .cloned()
            .collect();
        let target = subtree[pick_target % subtree.len()].clone();

        let before = observable_state(&store);
        let result = store.move_node(&node, &target);
        if target == node {
            prop_assert_eq!(result, Err(TreeError::SelfMove(node.clone())));
        } else {
            let is_cycle = matches!(result, Err(TreeError::CycleDetected { .. }));
            prop_assert!(is_cycle);
        }
        prop_assert_eq!(observable_state(&store), before);
    }

    #[test]
    fn delete_is_subtree_complete(
        ops in prop::collection::vec(op_strategy(), 1..40),
        pick_node in any::<usize>(),
    ) {
        let mut store = build(&ops);
        let ids = all_ids(&store);
        prop_assume!(!ids.is_empty());
        let node = ids[pick_node % ids.len()].clone();
        let expected: HashSet<NodeId> = ids
            .iter()
            .filter(|other| **other == node || store.is_ancestor(&node, other))
            .cloned()
            .collect();

        let removed: HashSet<NodeId> = store.delete_node(&node).unwrap().into_iter().collect();
        prop_assert_eq!(&removed, &expected);
        for gone in &removed {
            prop_assert!(store.get_node(gone).is_err());
        }
        for survivor in all_ids(&store) {
            if let Some(parent) = &store.get_node(&survivor).unwrap().parent_id {
                prop_assert!(!removed.contains(parent));
            }
        }
        prop_assert!(store.verify().is_ok());
    }
}
