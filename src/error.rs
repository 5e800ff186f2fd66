//! Error types

use crate::types::NodeId;
use thiserror::Error;

/// Errors raised by tree queries and mutations.
///
/// Every mutating operation validates before touching any index, so a
/// returned error always means the store is unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("Node not found: {0}")]
    NotFound(NodeId),

    #[error("Parent node not found: {0}")]
    InvalidParent(NodeId),

    #[error("Cannot move node {0} into itself")]
    SelfMove(NodeId),

    #[error("Cannot move node {node} into its own descendant {target}")]
    CycleDetected { node: NodeId, target: NodeId },

    #[error("Directory name cannot be empty")]
    EmptyName,

    #[error("Duplicate node id in forest: {0}")]
    DuplicateId(NodeId),

    #[error("Node {node} is not a child of {}", parent_label(.parent))]
    NotAChild {
        node: NodeId,
        parent: Option<NodeId>,
    },

    #[error("Tree index corrupted: {0}")]
    Corrupted(String),
}

fn parent_label(parent: &Option<NodeId>) -> &str {
    parent.as_ref().map(NodeId::as_str).unwrap_or("root")
}

/// Errors surfaced by the ambient layers (configuration, logging, JSON input).
#[derive(Debug, Error)]
pub enum ApiError {
    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid forest JSON: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<config::ConfigError> for ApiError {
    fn from(err: config::ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}
