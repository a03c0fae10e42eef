//! Per-collection mutual exclusion
//!
//! Each store operation is a read-modify-write of a whole file. Two such
//! cycles on the same collection must not interleave, or one write is lost.
//! Operations on different collections do not contend.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;

/// Lazily created lock per collection name
#[derive(Debug, Default)]
pub struct CollectionLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl CollectionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the lock guarding `collection`, creating it on first use.
    ///
    /// The registry lock is released before the caller blocks on the
    /// returned collection lock.
    pub fn lock_for(&self, collection: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock();
        Arc::clone(locks.entry(collection.to_string()).or_default())
    }

    /// Number of collections that have been locked at least once
    pub fn len(&self) -> usize {
        self.locks.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
