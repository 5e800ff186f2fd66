//! NodeId allocation for newly created directories

use crate::types::NodeId;

/// Monotonic id generator.
///
/// Ids are `{prefix}{counter}`; the counter never goes backwards, even
/// across `load`, so two rapid adds can never collide.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    prefix: String,
    next: u64,
}

impl IdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }

    /// Allocate the next id for which `in_use` returns false.
    pub fn next_id(&mut self, in_use: impl Fn(&NodeId) -> bool) -> NodeId {
        loop {
            let candidate = NodeId::new(format!("{}{}", self.prefix, self.next));
            self.next += 1;
            if !in_use(&candidate) {
                return candidate;
            }
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new("dir-")
    }
}
