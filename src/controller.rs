//! Directory controller
//!
//! Boundary between the UI glue and the store. Each user gesture maps to
//! one method: it runs a single store operation, reports the outcome to the
//! notification sink, and re-renders. Errors are returned as well so the
//! caller can react, but the store is never left half-updated.

use crate::error::TreeError;
use crate::notify::{NotificationKind, NotificationSink};
use crate::store::{NavigateUp, OpenOutcome, TreeStore};
use crate::tree::ForestItem;
use crate::types::NodeId;
use crate::views::{build_view, Renderer};
use tracing::warn;

pub struct DirectoryController<R: Renderer, N: NotificationSink> {
    store: TreeStore,
    renderer: R,
    sink: N,
}

impl<R: Renderer, N: NotificationSink> DirectoryController<R, N> {
    /// Wire an explicitly constructed store to its collaborators and draw
    /// the first frame.
    pub fn new(store: TreeStore, renderer: R, sink: N) -> Self {
        let mut controller = Self {
            store,
            renderer,
            sink,
        };
        controller.refresh();
        controller
    }

    pub fn store(&self) -> &TreeStore {
        &self.store
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn sink(&self) -> &N {
        &self.sink
    }

    pub fn into_parts(self) -> (TreeStore, R, N) {
        (self.store, self.renderer, self.sink)
    }

    pub fn add_directory(&mut self, parent: &NodeId, name: &str) -> Result<NodeId, TreeError> {
        let result = self.store.add_node(Some(parent), name);
        self.report(&result, |_| format!("Directory '{}' added", name.trim()));
        result
    }

    pub fn add_root_directory(&mut self, name: &str) -> Result<NodeId, TreeError> {
        let result = self.store.add_root_node(name);
        self.report(&result, |_| format!("Root directory '{}' added", name.trim()));
        result
    }

    pub fn delete_directory(&mut self, id: &NodeId) -> Result<Vec<NodeId>, TreeError> {
        let name = self.node_name(id);
        let result = self.store.delete_node(id);
        self.report(&result, |removed| match removed.len() {
            1 => format!("Directory '{}' deleted", name),
            n => format!("Directory '{}' and {} subdirectories deleted", name, n - 1),
        });
        result
    }

    /// Drag-and-drop of `id` onto `target`.
    pub fn drop_onto(&mut self, id: &NodeId, target: &NodeId) -> Result<(), TreeError> {
        if self.is_current_parent(id, Some(target)) {
            let message = format!("'{}' is already in '{}'", self.node_name(id), self.node_name(target));
            self.sink.notify(&message, NotificationKind::Warning);
            self.refresh();
            return Ok(());
        }
        let result = self.store.move_node(id, target);
        let (moved, into) = (self.node_name(id), self.node_name(target));
        self.report(&result, |_| format!("Moved '{}' into '{}'", moved, into));
        result
    }

    /// Drag-and-drop of `id` onto the empty tree area.
    pub fn drop_on_root(&mut self, id: &NodeId) -> Result<(), TreeError> {
        if self.is_current_parent(id, None) {
            let message = format!("'{}' is already a root directory", self.node_name(id));
            self.sink.notify(&message, NotificationKind::Warning);
            self.refresh();
            return Ok(());
        }
        let result = self.store.move_to_root(id);
        let moved = self.node_name(id);
        self.report(&result, |_| format!("Moved '{}' to the top level", moved));
        result
    }

    pub fn rename_directory(&mut self, id: &NodeId, name: &str) -> Result<(), TreeError> {
        let result = self.store.rename_node(id, name);
        self.report(&result, |_| format!("Directory renamed to '{}'", name.trim()));
        result
    }

    /// Expand/collapse toggle. Silent on success.
    pub fn toggle(&mut self, id: &NodeId) -> Result<bool, TreeError> {
        let result = self.store.toggle_expanded(id);
        if let Err(e) = &result {
            self.sink.notify(&e.to_string(), NotificationKind::Error);
        }
        self.refresh();
        result
    }

    /// Double-click: enter the directory if it has children.
    pub fn open(&mut self, id: &NodeId) -> Result<OpenOutcome, TreeError> {
        let result = self.store.open(id);
        match &result {
            Ok(OpenOutcome::Empty) => {
                let message = format!("'{}' is an empty directory", self.node_name(id));
                self.sink.notify(&message, NotificationKind::Info);
            }
            Ok(OpenOutcome::Entered(_)) => {}
            Err(e) => self.sink.notify(&e.to_string(), NotificationKind::Error),
        }
        self.refresh();
        result
    }

    /// Breadcrumb click; `None` returns to the root view.
    pub fn navigate(&mut self, id: Option<&NodeId>) -> Result<(), TreeError> {
        let result = self.store.navigate(id, None);
        if let Err(e) = &result {
            self.sink.notify(&e.to_string(), NotificationKind::Error);
        }
        self.refresh();
        result
    }

    pub fn navigate_up(&mut self) -> NavigateUp {
        let outcome = self.store.navigate_up();
        if outcome == NavigateUp::AtRoot {
            self.sink
                .notify("Already at the top-level directory", NotificationKind::Info);
        }
        self.refresh();
        outcome
    }

    pub fn reset(&mut self, sample: &[ForestItem]) -> Result<(), TreeError> {
        let result = self.store.reset(sample);
        self.report(&result, |_| "Directory tree reset".to_string());
        result
    }

    fn is_current_parent(&self, id: &NodeId, target: Option<&NodeId>) -> bool {
        self.store
            .get_node(id)
            .map(|node| node.parent_id.as_ref() == target)
            .unwrap_or(false)
    }

    fn node_name(&self, id: &NodeId) -> String {
        self.store
            .get_node(id)
            .map(|node| node.name.clone())
            .unwrap_or_else(|_| id.to_string())
    }

    fn report<T>(&mut self, result: &Result<T, TreeError>, success: impl FnOnce(&T) -> String) {
        match result {
            Ok(value) => self.sink.notify(&success(value), NotificationKind::Success),
            Err(e) => self.sink.notify(&e.to_string(), NotificationKind::Error),
        }
        self.refresh();
    }

    fn refresh(&mut self) {
        match build_view(&self.store) {
            Ok(view) => self.renderer.render(&view),
            Err(e) => warn!(error = %e, "Failed to build tree view"),
        }
    }
}
