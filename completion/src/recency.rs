use std::sync::Arc;

use parking_lot::RwLock;

/// Upper bound on remembered commits; the oldest entry is evicted first.
pub const MAX_RECENT: usize = 10;

/// Bounded most-recently-committed identifier list, shared by every
/// session and used to break selection ties.
///
/// The list itself is an immutable snapshot behind the lock; readers
/// clone the `Arc` and observe one consistent state for an entire
/// filtering pass. Writers rebuild the list from the snapshot they read
/// and install it with a compare-and-retry loop, so concurrent commits
/// from independent sessions never lose an update.
#[derive(Debug, Default)]
pub struct RecencyCache {
    items: RwLock<Arc<Vec<String>>>,
}

impl RecencyCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move `id` to the most-recent position, evicting the least recent
    /// entry when the cache is full.
    pub fn record_commit(&self, id: &str) {
        loop {
            let observed = Arc::clone(&*self.items.read());
            let mut next: Vec<String> = observed
                .iter()
                .filter(|existing| existing.as_str() != id)
                .cloned()
                .collect();
            if next.len() == MAX_RECENT {
                next.remove(0);
            }
            next.push(id.to_string());

            let mut slot = self.items.write();
            if Arc::ptr_eq(&*slot, &observed) {
                *slot = Arc::new(next);
                tracing::trace!(id, len = slot.len(), "recorded recent commit");
                return;
            }
            // Another commit landed between our read and the swap;
            // retry against the newer snapshot.
        }
    }

    /// One consistent view of the cache, least recent first.
    pub fn snapshot(&self) -> Arc<Vec<String>> {
        Arc::clone(&*self.items.read())
    }

    pub fn len(&self) -> usize {
        self.items.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.read().is_empty()
    }
}
