//! Shared access for multi-threaded hosts
//!
//! The store's indexes must never be observed half-updated, so the whole
//! `TreeStore` sits behind one mutex and every public operation runs with
//! that lock held for its full duration.

use crate::store::TreeStore;
use parking_lot::Mutex;
use std::sync::Arc;

/// Cloneable handle to a single locked `TreeStore`
#[derive(Clone)]
pub struct SharedTreeStore {
    inner: Arc<Mutex<TreeStore>>,
}

impl SharedTreeStore {
    pub fn new(store: TreeStore) -> Self {
        Self {
            inner: Arc::new(Mutex::new(store)),
        }
    }

    /// Run a query with the lock held.
    pub fn read<T>(&self, f: impl FnOnce(&TreeStore) -> T) -> T {
        let guard = self.inner.lock();
        f(&guard)
    }

    /// Run a mutation with the lock held.
    pub fn write<T>(&self, f: impl FnOnce(&mut TreeStore) -> T) -> T {
        let mut guard = self.inner.lock();
        f(&mut guard)
    }
}

impl Default for SharedTreeStore {
    fn default() -> Self {
        Self::new(TreeStore::new())
    }
}
