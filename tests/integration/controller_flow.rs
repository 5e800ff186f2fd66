use dirtree::notify::TracingSink;
use dirtree::tree::sample_forest;
use dirtree::views::TreeView;
use dirtree::{DirectoryController, NavigateUp, NotificationKind, NotificationSink, Renderer, TreeStore};

use super::support::id;

#[derive(Default)]
struct LastFrame(Option<TreeView>, usize);

impl Renderer for LastFrame {
    fn render(&mut self, view: &TreeView) {
        self.0 = Some(view.clone());
        self.1 += 1;
    }
}

#[derive(Default)]
struct Toasts(Vec<(String, NotificationKind)>);

impl NotificationSink for Toasts {
    fn notify(&mut self, message: &str, kind: NotificationKind) {
        self.0.push((message.to_string(), kind));
    }
}

#[test]
fn drill_down_add_and_navigate_back_up() {
    let mut store = TreeStore::new();
    store.load(&sample_forest()).unwrap();
    let mut c = DirectoryController::new(store, LastFrame::default(), Toasts::default());

    c.open(&id("1")).unwrap();
    let frame = c.renderer().0.clone().unwrap();
    assert_eq!(frame.breadcrumbs.len(), 1);
    assert_eq!(frame.visible_ids(), vec![id("2"), id("3")]);

    let added = c.add_directory(&id("2"), "Reports").unwrap();
    let frame = c.renderer().0.clone().unwrap();
    assert!(frame.visible_ids().contains(&added));

    assert_eq!(c.navigate_up(), NavigateUp::Moved(Vec::new()));
    assert_eq!(c.navigate_up(), NavigateUp::AtRoot);

    let kinds: Vec<NotificationKind> = c.sink().0.iter().map(|(_, k)| *k).collect();
    assert_eq!(kinds, vec![NotificationKind::Success, NotificationKind::Info]);
    assert_eq!(c.renderer().1, 5);
}

#[test]
fn deleting_current_directory_falls_back_to_surviving_ancestor() {
    let mut store = TreeStore::new();
    store.load(&sample_forest()).unwrap();
    let mut c = DirectoryController::new(store, LastFrame::default(), TracingSink);

    c.navigate(Some(&id("2"))).unwrap();
    c.delete_directory(&id("2")).unwrap();
    assert_eq!(c.store().current_dir(), Some(&id("1")));

    let frame = c.renderer().0.clone().unwrap();
    assert_eq!(frame.visible_ids(), vec![id("3")]);
}

#[test]
fn rename_and_reset() {
    let mut store = TreeStore::new();
    store.load(&sample_forest()).unwrap();
    let mut c = DirectoryController::new(store, LastFrame::default(), Toasts::default());

    c.rename_directory(&id("4"), "Archive").unwrap();
    assert_eq!(c.store().find_by_path("Archive"), Some(&id("4")));

    c.toggle(&id("1")).unwrap();
    c.reset(&sample_forest()).unwrap();
    assert!(!c.store().is_expanded(&id("1")));
    assert_eq!(c.store().find_by_path("Root Directory 2"), Some(&id("4")));
}
