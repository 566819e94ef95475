//! Per-worker index updates for one bulk load.
//!
//! An [`IndexBatch`] is what a worker produces for its share of the records:
//! token → id-set maps for both tries and normalized key → id-set maps for
//! both categorical indexes. Batches from different workers are combined with
//! [`IndexBatch::absorb`] without touching the shared index, then applied in
//! one serial merge.

use std::collections::HashMap;

use crate::index::TrieBatch;
use crate::types::{DocumentId, IdSet, JobRecord};
use crate::utils::normalize_category;

#[derive(Debug, Clone, Default)]
pub struct IndexBatch {
    pub titles: TrieBatch,
    pub skills: TrieBatch,
    pub industries: HashMap<String, IdSet>,
    pub locations: HashMap<String, IdSet>,
    /// Records that left at least one indexed field empty.
    pub incomplete: usize,
    /// Records folded into this batch.
    pub documents: usize,
}

impl IndexBatch {
    /// Tokenize `record` exactly the way `SearchIndex::add` indexes it.
    pub fn record(&mut self, id: DocumentId, record: &JobRecord) {
        self.titles.record(&record.title_text(), id);
        for skill in &record.tech_skills {
            self.skills.record(skill, id);
        }
        add_category(&mut self.industries, &record.industry, id);
        add_category(&mut self.locations, &record.location, id);

        if !record.missing_fields().is_empty() {
            self.incomplete += 1;
        }
        self.documents += 1;
    }

    pub fn absorb(&mut self, other: IndexBatch) {
        self.titles.absorb(other.titles);
        self.skills.absorb(other.skills);
        absorb_categories(&mut self.industries, other.industries);
        absorb_categories(&mut self.locations, other.locations);
        self.incomplete += other.incomplete;
        self.documents += other.documents;
    }
}

fn add_category(map: &mut HashMap<String, IdSet>, value: &str, id: DocumentId) {
    let key = normalize_category(value);
    if key.is_empty() {
        return;
    }
    map.entry(key).or_default().insert(id);
}

fn absorb_categories(into: &mut HashMap<String, IdSet>, from: HashMap<String, IdSet>) {
    for (key, ids) in from {
        into.entry(key).or_default().extend(ids);
    }
}
