//! Dirtree: In-Memory Directory Forest
//!
//! Keeps a forest of named directories for an interactive tree widget.
//! `TreeStore` maintains the id, child, materialized-path and path-key
//! indexes together, rejects cycle-forming moves before touching state,
//! and tells observers about each committed change. Rendering and toast
//! display stay outside the crate behind the `Renderer` and
//! `NotificationSink` traits.

pub mod concurrency;
pub mod config;
pub mod controller;
pub mod error;
pub mod logging;
pub mod notify;
pub mod store;
pub mod tree;
pub mod types;
pub mod views;

pub use controller::DirectoryController;
pub use error::{ApiError, TreeError};
pub use notify::{NotificationKind, NotificationSink, TreeEvent, TreeObserver};
pub use store::{NavigateUp, OpenOutcome, StoreStats, TreeStore};
pub use tree::{ForestItem, Node};
pub use types::{NodeId, PathSegment};
pub use views::{Renderer, TreeView};
