// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The multi-field job index.
//!
//! ```text
//! ┌──────────────┐   title + position   ┌────────────┐
//! │              │─────────────────────▶│ Trie       │
//! │              │   tech skills        ├────────────┤
//! │  JobRecord   │─────────────────────▶│ Trie       │
//! │              │   industry           ├────────────┤      ┌───────────────┐
//! │              │─────────────────────▶│ Categorical│─────▶│ DocumentStore │
//! │              │   location           ├────────────┤ ids  │ (id → record) │
//! │              │─────────────────────▶│ Categorical│      └───────────────┘
//! └──────────────┘                      └────────────┘
//! ```
//!
//! Queries are AND across fields and OR within a field. Every structure
//! answers with an id set; the query intersects the per-field unions and the
//! store turns the survivors back into records.
//!
//! Mutation takes `&mut self` and queries take `&self`, so the borrow checker
//! already rules out a search racing a load. For an index shared between
//! threads, wrap it in [`crate::SharedIndex`].

mod categorical;
mod store;
mod trie;

pub use categorical::CategoricalIndex;
pub use store::DocumentStore;
pub use trie::{Trie, TrieBatch};

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::build::{BulkLoader, IndexBatch};
use crate::config::IndexConfig;
use crate::contracts;
use crate::error::Result;
use crate::query::{Field, SearchCriteria};
use crate::types::{DocumentId, IdSet, JobRecord};

/// In-memory job index: two tries, two categorical maps and the record store.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    titles: Trie,
    skills: Trie,
    industries: CategoricalIndex,
    locations: CategoricalIndex,
    store: DocumentStore,
    config: IndexConfig,
}

impl SearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: IndexConfig) -> Self {
        SearchIndex {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// Store and index one record.
    pub fn add(&mut self, record: JobRecord) -> DocumentId {
        let missing = record.missing_fields();
        if !missing.is_empty() {
            debug!(?missing, link = %record.link, "indexing record with empty fields");
        }

        let id = self.store.next_id();
        self.titles.insert(&record.title_text(), id);
        for skill in &record.tech_skills {
            self.skills.insert(skill, id);
        }
        self.industries.add(&record.industry, id);
        self.locations.add(&record.location, id);

        let stored = self.store.insert(record);
        debug_assert_eq!(stored, id);
        id
    }

    /// Index a whole batch. Searches afterwards see exactly what the
    /// equivalent `add` calls would have produced.
    ///
    /// Phase one assigns ids, stores records and tokenizes them on a
    /// `config.workers`-thread pool that lives only for this call. Phase two
    /// merges the reduced updates into the tries and maps on this thread.
    /// Returned ids pair positionally with `records`.
    pub fn bulk_add(&mut self, records: Vec<JobRecord>) -> Result<Vec<DocumentId>> {
        self.config.validate()?;
        let loader = BulkLoader::new(self.config.workers);
        self.bulk_add_with(&loader, records)
    }

    /// [`bulk_add`](Self::bulk_add) reporting tokenization progress.
    #[cfg(feature = "parallel")]
    pub fn bulk_add_with_progress(
        &mut self,
        records: Vec<JobRecord>,
        progress: &ProgressBar,
    ) -> Result<Vec<DocumentId>> {
        self.config.validate()?;
        let loader = BulkLoader::new(self.config.workers).with_progress(progress.clone());
        self.bulk_add_with(&loader, records)
    }

    fn bulk_add_with(&mut self, loader: &BulkLoader, records: Vec<JobRecord>) -> Result<Vec<DocumentId>> {
        let started = Instant::now();
        let first = self.store.next_id();
        let count = records.len();

        let loaded = loader.load(&mut self.store, records)?;
        let tokenized = started.elapsed();

        self.merge(&loaded.batch);

        contracts::check_bulk_ids_contiguous(&loaded.ids, first);
        contracts::check_ids_issued(self);

        if loaded.batch.incomplete > 0 {
            warn!(
                records = loaded.batch.incomplete,
                "records with missing fields indexed with empty contributions"
            );
        }
        info!(
            records = count,
            workers = loader.workers(),
            title_tokens = loaded.batch.titles.tokens.len(),
            skill_tokens = loaded.batch.skills.tokens.len(),
            tokenize_ms = tokenized.as_millis() as u64,
            total_ms = started.elapsed().as_millis() as u64,
            "bulk load complete"
        );
        Ok(loaded.ids)
    }

    /// The serial merge phase. Only called with exclusive access.
    fn merge(&mut self, batch: &IndexBatch) {
        self.titles.merge(&batch.titles);
        self.skills.merge(&batch.skills);
        self.industries.merge(&batch.industries);
        self.locations.merge(&batch.locations);
    }

    /// Records matching `criteria`, in ascending id order.
    ///
    /// With no criteria at all this is every stored record.
    pub fn search(&self, criteria: &SearchCriteria) -> Vec<&JobRecord> {
        self.search_ids(criteria)
            .into_iter()
            .filter_map(|id| self.store.get(id).ok())
            .collect()
    }

    /// Ids matching `criteria`, ascending.
    pub fn search_ids(&self, criteria: &SearchCriteria) -> Vec<DocumentId> {
        let mut matching: Option<IdSet> = None;

        for field in Field::ALL {
            let values = criteria.values(field);
            if values.is_empty() {
                continue;
            }
            let union = self.field_union(field, values);
            let narrowed = match matching {
                None => union,
                Some(current) => current.intersection(&union).copied().collect(),
            };
            if narrowed.is_empty() {
                return Vec::new();
            }
            matching = Some(narrowed);
        }

        let ids: Vec<DocumentId> = match matching {
            Some(ids) => ids.into_iter().collect(),
            None => self.store.iter().map(|(id, _)| id).collect(),
        };
        contracts::check_ids_sorted(&ids);
        ids
    }

    /// Documents matching any of `values` in `field`.
    pub fn field_union(&self, field: Field, values: &[String]) -> IdSet {
        let mut union = IdSet::new();
        for value in values {
            union.extend(self.lookup(field, value).iter().copied());
        }
        union
    }

    fn lookup(&self, field: Field, value: &str) -> &IdSet {
        match field {
            Field::Title => self.titles.search(value),
            Field::Skill => self.skills.search(value),
            Field::Industry => self.industries.lookup(value),
            Field::Location => self.locations.lookup(value),
        }
    }

    pub fn get(&self, id: DocumentId) -> Result<&JobRecord> {
        self.store.get(id)
    }

    /// The id the next added record will receive.
    pub fn next_id(&self) -> DocumentId {
        self.store.next_id()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    pub fn store(&self) -> &DocumentStore {
        &self.store
    }

    pub fn title_trie(&self) -> &Trie {
        &self.titles
    }

    pub fn skill_trie(&self) -> &Trie {
        &self.skills
    }

    pub fn industries(&self) -> &CategoricalIndex {
        &self.industries
    }

    pub fn locations(&self) -> &CategoricalIndex {
        &self.locations
    }
}
