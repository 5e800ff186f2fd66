use dirtree::{ForestItem, TreeError, TreeStore};

use super::support::{assert_paths_consistent, id, observable_state};

fn ids(store: &TreeStore, parent: Option<&str>) -> Vec<String> {
    let parent = parent.map(id);
    store
        .get_children(parent.as_ref())
        .unwrap()
        .iter()
        .map(|n| n.id.to_string())
        .collect()
}

fn scenario() -> TreeStore {
    let mut store = TreeStore::new();
    store
        .load(&[
            ForestItem::new("1", "R1", vec![ForestItem::leaf("2", "C1")]),
            ForestItem::leaf("4", "R2"),
        ])
        .unwrap();
    store
}

#[test]
fn move_then_cycle_then_delete() {
    let mut store = scenario();

    store.move_node(&id("4"), &id("1")).unwrap();
    assert_eq!(ids(&store, Some("1")), vec!["2", "4"]);
    assert!(store.is_ancestor(&id("1"), &id("4")));
    assert_paths_consistent(&store);

    let before = observable_state(&store);
    assert!(matches!(
        store.move_node(&id("1"), &id("2")),
        Err(TreeError::CycleDetected { .. })
    ));
    assert_eq!(observable_state(&store), before);

    let mut removed = store.delete_node(&id("1")).unwrap();
    removed.sort();
    assert_eq!(removed, vec![id("1"), id("2"), id("4")]);
    assert!(store.get_children(None).unwrap().is_empty());
    for gone in ["1", "2", "4"] {
        assert_eq!(store.get_node(&id(gone)), Err(TreeError::NotFound(id(gone))));
    }
}

#[test]
fn add_under_moved_parent_uses_new_prefix() {
    let mut store = scenario();
    store.move_node(&id("1"), &id("4")).unwrap();
    let child = store.add_node(Some(&id("2")), "Deep").unwrap();
    assert_eq!(store.path_key(&child).unwrap(), "R2/R1/C1/Deep");
    assert_eq!(store.find_by_path("R2/R1/C1/Deep"), Some(&child));
    assert_paths_consistent(&store);
    store.verify().unwrap();
}

#[test]
fn delete_missing_node_is_not_found() {
    let mut store = scenario();
    let before = observable_state(&store);
    assert_eq!(store.delete_node(&id("404")), Err(TreeError::NotFound(id("404"))));
    assert_eq!(observable_state(&store), before);
}

#[test]
fn same_name_paths_are_last_writer_wins() {
    let mut store = TreeStore::new();
    store
        .load(&[
            ForestItem::new("a", "Docs", vec![ForestItem::leaf("a1", "notes")]),
            ForestItem::new("b", "Docs", vec![ForestItem::leaf("b1", "notes")]),
        ])
        .unwrap();
    assert_eq!(store.find_by_path("Docs/notes"), Some(&id("b1")));

    store.delete_node(&id("a")).unwrap();
    assert_eq!(store.find_by_path("Docs/notes"), Some(&id("b1")));
    store.verify().unwrap();
}

#[test]
fn load_replaces_previous_forest_and_view_state() {
    let mut store = scenario();
    store.set_expanded(&id("1"), true);
    store.navigate(Some(&id("2")), None).unwrap();

    store
        .load(&[ForestItem::new("1", "Other", vec![ForestItem::leaf("9", "X")])])
        .unwrap();
    assert!(!store.is_expanded(&id("1")));
    assert!(store.current_path().is_empty());
    assert_eq!(store.get_node(&id("2")), Err(TreeError::NotFound(id("2"))));
    assert_eq!(store.path_key(&id("9")).unwrap(), "Other/X");
}
