//! Canonical record storage keyed by [`DocumentId`].
//!
//! Ids are handed out densely from zero, so the store is a plain vector and
//! an id is its record's slot.

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{IndexError, Result};
use crate::types::{DocumentId, JobRecord};

#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    records: Vec<JobRecord>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `record` under the next id.
    pub fn insert(&mut self, record: JobRecord) -> DocumentId {
        let id = self.next_id();
        self.records.push(record);
        id
    }

    /// Store a batch under consecutive ids, returned in input order.
    ///
    /// With the `parallel` feature the copy into the store is split across the
    /// current rayon pool; slot order (and so id pairing) is preserved.
    pub fn append(&mut self, records: Vec<JobRecord>) -> Vec<DocumentId> {
        let start = self.next_id().get();
        let count = records.len() as u64;

        #[cfg(feature = "parallel")]
        self.records.par_extend(records);
        #[cfg(not(feature = "parallel"))]
        self.records.extend(records);

        (start..start + count).map(DocumentId).collect()
    }

    pub fn get(&self, id: DocumentId) -> Result<&JobRecord> {
        self.records
            .get(id.as_usize())
            .ok_or(IndexError::NotFound(id))
    }

    /// Every stored record in id order.
    pub fn all(&self) -> impl Iterator<Item = &JobRecord> + '_ {
        self.records.iter()
    }

    /// `(id, record)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (DocumentId, &JobRecord)> + '_ {
        self.records
            .iter()
            .enumerate()
            .map(|(slot, record)| (DocumentId(slot as u64), record))
    }

    /// The id the next insertion will receive.
    pub fn next_id(&self) -> DocumentId {
        DocumentId(self.records.len() as u64)
    }

    pub fn contains(&self, id: DocumentId) -> bool {
        id.as_usize() < self.records.len()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
