// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Parallel tokenization and store insertion for bulk loads.
//!
//! Tokenizing a record touches nothing but the record, so the map phase is
//! embarrassingly parallel: `par_iter()` over records, `fold` into one
//! [`IndexBatch`] per rayon split, `reduce` the batches pairwise. None of this
//! touches the index. The caller applies the reduced batch afterwards on its
//! own thread, which is the only place the tries and maps are mutated.
//!
//! The pool is built per load and dropped before [`BulkLoader::load`]
//! returns, so no worker outlives the call and nothing is half-merged when
//! the caller gets control back.

#[cfg(feature = "parallel")]
use indicatif::ProgressBar;
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::Result;
use crate::index::DocumentStore;
use crate::types::{DocumentId, JobRecord};

use super::IndexBatch;

/// Output of the parallel phase: ids in input order plus the merged updates.
#[derive(Debug)]
pub struct LoadedBatch {
    pub ids: Vec<DocumentId>,
    pub batch: IndexBatch,
}

/// Fixed-size worker pool scoped to a single bulk load.
#[derive(Clone)]
pub struct BulkLoader {
    workers: usize,
    #[cfg(feature = "parallel")]
    progress: Option<ProgressBar>,
}

impl BulkLoader {
    pub fn new(workers: usize) -> Self {
        BulkLoader {
            workers: workers.max(1),
            #[cfg(feature = "parallel")]
            progress: None,
        }
    }

    /// Tick `progress` once per tokenized record.
    #[cfg(feature = "parallel")]
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = Some(progress);
        self
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Assign ids, store the records and tokenize them.
    ///
    /// Record `i` of the input gets id `store.next_id() + i`.
    #[cfg(feature = "parallel")]
    pub fn load(&self, store: &mut DocumentStore, records: Vec<JobRecord>) -> Result<LoadedBatch> {
        let base = store.next_id().get();
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("jobtrie-bulk-{}", i))
            .build()?;

        if let Some(progress) = &self.progress {
            progress.set_length(records.len() as u64);
        }

        let loaded = pool.install(|| {
            let batch = tokenize_parallel(&records, base, self.progress.as_ref());
            let ids = store.append(records);
            LoadedBatch { ids, batch }
        });
        drop(pool);

        if let Some(progress) = &self.progress {
            progress.finish_with_message(format!("tokenized {} records", loaded.ids.len()));
        }
        Ok(loaded)
    }

    /// Single-threaded fallback: same phases, same output.
    #[cfg(not(feature = "parallel"))]
    pub fn load(&self, store: &mut DocumentStore, records: Vec<JobRecord>) -> Result<LoadedBatch> {
        let base = store.next_id().get();
        let mut batch = IndexBatch::default();
        for (offset, record) in records.iter().enumerate() {
            batch.record(DocumentId(base + offset as u64), record);
        }
        let ids = store.append(records);
        Ok(LoadedBatch { ids, batch })
    }
}

#[cfg(feature = "parallel")]
fn tokenize_parallel(records: &[JobRecord], base: u64, progress: Option<&ProgressBar>) -> IndexBatch {
    records
        .par_iter()
        .enumerate()
        .fold(IndexBatch::default, |mut batch, (offset, record)| {
            batch.record(DocumentId(base + offset as u64), record);
            if let Some(progress) = progress {
                progress.inc(1);
            }
            batch
        })
        .reduce(IndexBatch::default, |mut left, right| {
            left.absorb(right);
            left
        })
}
