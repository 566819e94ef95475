//! Exact-match lookup for categorical fields (industry, location).

use std::collections::HashMap;

use crate::types::{DocumentId, IdSet};
use crate::utils::normalize_category;

static EMPTY: IdSet = IdSet::new();

/// Normalized category value → documents carrying it.
///
/// Lookups never allocate a bucket, so read-only queries can't grow the map.
#[derive(Debug, Clone, Default)]
pub struct CategoricalIndex {
    buckets: HashMap<String, IdSet>,
}

impl CategoricalIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// File `id` under the normalized `key`. Blank keys contribute nothing.
    pub fn add(&mut self, key: &str, id: DocumentId) {
        let key = normalize_category(key);
        if key.is_empty() {
            return;
        }
        self.buckets.entry(key).or_default().insert(id);
    }

    /// Apply precomputed `normalized key → ids` updates.
    pub fn merge(&mut self, updates: &HashMap<String, IdSet>) {
        for (key, ids) in updates {
            if key.is_empty() {
                continue;
            }
            self.buckets
                .entry(key.clone())
                .or_default()
                .extend(ids.iter().copied());
        }
    }

    pub fn lookup(&self, key: &str) -> &IdSet {
        self.buckets.get(&normalize_category(key)).unwrap_or(&EMPTY)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// Distinct normalized keys, sorted.
    pub fn keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.buckets.keys().map(String::as_str).collect();
        keys.sort_unstable();
        keys
    }

    pub(crate) fn all_ids(&self) -> impl Iterator<Item = DocumentId> + '_ {
        self.buckets.values().flat_map(|ids| ids.iter().copied())
    }
}
