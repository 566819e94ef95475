//! A lockable index with a write-through query cache.
//!
//! [`SearchIndex`] itself is cache-free and relies on `&mut self` for
//! exclusion. `SharedIndex` is the layer for callers that share one index
//! between threads: searches take a read lock and may run concurrently,
//! mutations take the write lock and clear the cache before releasing it.
//!
//! Lock order is always index, then cache. A search inserts its result while
//! still holding the read lock, so a writer can't slip in between computing a
//! result and caching it.

use parking_lot::{Mutex, RwLock, RwLockReadGuard};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::debug;

use crate::error::Result;
use crate::index::SearchIndex;
use crate::query::SearchCriteria;
use crate::types::{DocumentId, JobRecord};

/// Cache counters since construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub entries: usize,
}

pub struct SharedIndex {
    index: RwLock<SearchIndex>,
    cache: Mutex<HashMap<SearchCriteria, Arc<[DocumentId]>>>,
    capacity: usize,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl SharedIndex {
    /// Wrap `index`; cache capacity comes from its config. Zero disables caching.
    pub fn new(index: SearchIndex) -> Self {
        let capacity = index.config().cache_capacity;
        SharedIndex {
            index: RwLock::new(index),
            cache: Mutex::new(HashMap::new()),
            capacity,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn add(&self, record: JobRecord) -> DocumentId {
        let mut index = self.index.write();
        let id = index.add(record);
        self.cache.lock().clear();
        id
    }

    pub fn bulk_add(&self, records: Vec<JobRecord>) -> Result<Vec<DocumentId>> {
        let mut index = self.index.write();
        let ids = index.bulk_add(records)?;
        self.cache.lock().clear();
        Ok(ids)
    }

    /// Matching ids, served from the cache when this exact criteria was seen
    /// since the last mutation.
    pub fn search_ids(&self, criteria: &SearchCriteria) -> Arc<[DocumentId]> {
        if let Some(cached) = self.cache.lock().get(criteria) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Arc::clone(cached);
        }
        self.misses.fetch_add(1, Ordering::Relaxed);

        let index = self.index.read();
        let ids: Arc<[DocumentId]> = index.search_ids(criteria).into();
        if self.capacity > 0 {
            let mut cache = self.cache.lock();
            if cache.len() >= self.capacity {
                debug!(entries = cache.len(), "query cache full, starting over");
                cache.clear();
            }
            cache.insert(criteria.clone(), Arc::clone(&ids));
        }
        ids
    }

    /// Matching records, cloned out from under the lock.
    pub fn search(&self, criteria: &SearchCriteria) -> Vec<JobRecord> {
        let ids = self.search_ids(criteria);
        let index = self.index.read();
        ids.iter()
            .filter_map(|id| index.get(*id).ok().cloned())
            .collect()
    }

    /// Shared access for anything else the index offers.
    pub fn read(&self) -> RwLockReadGuard<'_, SearchIndex> {
        self.index.read()
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            entries: self.cache.lock().len(),
        }
    }

    pub fn into_inner(self) -> SearchIndex {
        self.index.into_inner()
    }
}
