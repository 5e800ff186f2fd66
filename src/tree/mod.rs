//! Directory node types and id allocation

pub mod ids;
pub mod node;

pub use ids::IdGenerator;
pub use node::{sample_forest, ForestItem, Node};
