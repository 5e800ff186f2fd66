//! Change events and user-facing notifications
//!
//! `TreeObserver` is the store's change hook: observers run after a
//! mutation has fully committed and only see the event value, never the
//! store itself. `NotificationSink` receives the `(message, kind)` pairs
//! shown to the user.

use crate::types::{NodeId, PathSegment};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Committed change to the store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TreeEvent {
    Loaded {
        node_count: usize,
    },
    Added {
        id: NodeId,
        parent_id: Option<NodeId>,
    },
    Deleted {
        id: NodeId,
        removed: Vec<NodeId>,
    },
    Moved {
        id: NodeId,
        from: Option<NodeId>,
        to: Option<NodeId>,
    },
    Renamed {
        id: NodeId,
        name: String,
    },
    Reordered {
        parent_id: Option<NodeId>,
    },
    ExpandChanged {
        id: NodeId,
        expanded: bool,
    },
    Navigated {
        path: Vec<PathSegment>,
    },
}

/// Change hook registered with `TreeStore::subscribe`
pub trait TreeObserver: Send {
    fn on_event(&mut self, event: &TreeEvent);
}

impl<F> TreeObserver for F
where
    F: FnMut(&TreeEvent) + Send,
{
    fn on_event(&mut self, event: &TreeEvent) {
        self(event)
    }
}

/// Severity of a user-facing notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Info,
    Success,
    Error,
    Warning,
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NotificationKind::Info => "info",
            NotificationKind::Success => "success",
            NotificationKind::Error => "error",
            NotificationKind::Warning => "warning",
        };
        f.write_str(label)
    }
}

/// Receiver for user-visible feedback (toasts, status bars)
pub trait NotificationSink {
    fn notify(&mut self, message: &str, kind: NotificationKind);
}

/// Sink that forwards notifications to `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingSink;

impl NotificationSink for TracingSink {
    fn notify(&mut self, message: &str, kind: NotificationKind) {
        match kind {
            NotificationKind::Error => tracing::error!(kind = %kind, "{}", message),
            NotificationKind::Warning => tracing::warn!(kind = %kind, "{}", message),
            NotificationKind::Info | NotificationKind::Success => {
                tracing::info!(kind = %kind, "{}", message)
            }
        }
    }
}
