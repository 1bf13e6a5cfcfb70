//! Concurrent registry of live supply entities.
//!
//! Entities are stored as `Arc<SupplyEntity>` in a sharded `DashMap`, keyed by
//! id. An update swaps the whole `Arc` under the shard lock, so readers see
//! either the previous entity or the new one, never a mix of fields.
//!
//! # Thread Safety
//!
//! - `upsert`/`get` lock a single shard for the duration of the call
//! - `scan` clones the `Arc`s out of each shard under a brief read lock and
//!   releases it before handing out the first entity, so callers never hold
//!   a lock while computing distances
//! - There is no global lock; a scan may observe a mix of pre- and
//!   post-update entities across shards

use std::sync::Arc;

use dashmap::DashMap;
use log::trace;

use crate::SupplyEntity;

/// Default initial capacity, sized for a small city fleet.
const DEFAULT_CAPACITY: usize = 100;

/// Shared key -> entity map scanned by every query.
#[derive(Debug)]
pub struct SupplyRegistry {
    entries: DashMap<String, Arc<SupplyEntity>>,
}

impl Default for SupplyRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SupplyRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create an empty registry with room for `capacity` entities.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: DashMap::with_capacity(capacity),
        }
    }

    /// Insert an entity or atomically replace the one with the same id.
    ///
    /// Returns the replaced entity, if any.
    pub fn upsert(&self, entity: SupplyEntity) -> Option<Arc<SupplyEntity>> {
        trace!(
            "upsert {} at ({}, {})",
            entity.id,
            entity.location.lat_degrees(),
            entity.location.lon_degrees()
        );
        let id = entity.id.clone();
        self.entries.insert(id, Arc::new(entity))
    }

    /// Look up an entity by id. `None` means no such entity.
    pub fn get(&self, id: &str) -> Option<Arc<SupplyEntity>> {
        self.entries.get(id).map(|entry| Arc::clone(entry.value()))
    }

    /// Check if an entity is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    /// Iterate over the current entities.
    ///
    /// The iterator is single-pass; call `scan` again to restart. It holds
    /// no shard lock, so upserts proceed while it is being consumed and are
    /// not observed by it.
    pub fn scan(&self) -> std::vec::IntoIter<Arc<SupplyEntity>> {
        self.snapshot().into_iter()
    }

    /// Copy the current entities into a vector.
    ///
    /// Each shard is read-locked only while its `Arc`s are cloned.
    pub fn snapshot(&self) -> Vec<Arc<SupplyEntity>> {
        let mut entities = Vec::with_capacity(self.entries.len());
        entities.extend(self.entries.iter().map(|entry| Arc::clone(entry.value())));
        entities
    }

    /// Get the number of registered entities.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
