//! Keyed in-memory repository.
//!
//! Records are stored as `Arc<V>` behind a single `RwLock`. Readers clone the `Arc`
//! and release the lock immediately, so a lookup returns either the previous record or
//! its replacement in full. `create` holds the write lock across delete-then-insert.

use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::debug;

/// A record that can live in a [`Repository`].
pub trait StoredRecord: Send + Sync + 'static {
    /// Logical key; unique within a repository.
    type Key: Eq + Hash + Ord + Clone + Debug + Send + Sync + 'static;

    fn key(&self) -> &Self::Key;

    /// Assigns a fresh process-unique id. Called by the repository on every insert.
    fn renew_id(&mut self);
}

/// Keyed storage with upsert-by-key semantics.
pub trait Repository<K, V>: Send + Sync {
    /// Returns the record stored under `key`, if any.
    fn get_by_id(&self, key: &K) -> Option<Arc<V>>;

    /// Stores `record`, replacing any record with the same key. Returns the stored value.
    fn create(&self, record: V) -> Arc<V>;

    /// Removes the record under `key`. Returns `false` if there was none.
    fn delete(&self, key: &K) -> bool;

    /// Number of stored records.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stored keys in ascending order.
    fn keys(&self) -> Vec<K>;
}

/// [`Repository`] backed by a `parking_lot::RwLock<HashMap<..>>`.
pub struct MemoryRepository<V: StoredRecord> {
    entries: RwLock<HashMap<V::Key, Arc<V>>>,
}

impl<V: StoredRecord> MemoryRepository<V> {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Builds a repository from `records`; later duplicates replace earlier ones.
    pub fn with_records(records: impl IntoIterator<Item = V>) -> Self {
        let repo = Self::new();
        for record in records {
            repo.create(record);
        }
        repo
    }
}

impl<V: StoredRecord> Default for MemoryRepository<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: StoredRecord> Repository<V::Key, V> for MemoryRepository<V> {
    fn get_by_id(&self, key: &V::Key) -> Option<Arc<V>> {
        self.entries.read().get(key).cloned()
    }

    fn create(&self, mut record: V) -> Arc<V> {
        record.renew_id();
        let key = record.key().clone();
        let record = Arc::new(record);

        let mut entries = self.entries.write();
        if entries.remove(&key).is_some() {
            debug!(key = ?key, "Replacing existing record");
        }
        entries.insert(key, Arc::clone(&record));

        record
    }

    fn delete(&self, key: &V::Key) -> bool {
        self.entries.write().remove(key).is_some()
    }

    fn len(&self) -> usize {
        self.entries.read().len()
    }

    fn keys(&self) -> Vec<V::Key> {
        let mut keys: Vec<V::Key> = self.entries.read().keys().cloned().collect();
        keys.sort();
        keys
    }
}

impl<V: StoredRecord> std::fmt::Debug for MemoryRepository<V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MemoryRepository")
            .field("entries", &self.len())
            .finish()
    }
}
