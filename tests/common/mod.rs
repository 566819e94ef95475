//! Shared test utilities and fixtures.

#![allow(dead_code)]

use jobtrie::{DocumentId, IndexConfig, JobRecord, SearchCriteria, SearchIndex};

// Re-export canonical test utilities from jobtrie::testing
pub use jobtrie::testing::{make_job, make_record, sample_records};

/// Build an index with `bulk_add`.
pub fn bulk_index(records: Vec<JobRecord>) -> SearchIndex {
    let mut index = SearchIndex::with_config(IndexConfig::default());
    index.bulk_add(records).expect("bulk_add failed");
    index
}

/// Build an index with one `add` per record.
pub fn sequential_index(records: Vec<JobRecord>) -> SearchIndex {
    let mut index = SearchIndex::new();
    for record in records {
        index.add(record);
    }
    index
}

pub fn ids(raw: &[u64]) -> Vec<DocumentId> {
    raw.iter().copied().map(DocumentId).collect()
}

/// Titles of the matching records, sorted, so results can be compared across
/// indexes that assigned ids differently.
pub fn matching_titles(index: &SearchIndex, criteria: &SearchCriteria) -> Vec<String> {
    let mut titles: Vec<String> = index
        .search(criteria)
        .into_iter()
        .map(|r| r.title.clone())
        .collect();
    titles.sort();
    titles
}

/// A handful of criteria that exercise every field, alone and combined.
pub fn probe_criteria() -> Vec<SearchCriteria> {
    vec![
        SearchCriteria::new(),
        SearchCriteria::new().title("software"),
        SearchCriteria::new().title("s"),
        SearchCriteria::new().title(""),
        SearchCriteria::new().skill("py"),
        SearchCriteria::new().skill("testing").skill("excel"),
        SearchCriteria::new().industry("tech"),
        SearchCriteria::new().industry("Finance").industry("Health"),
        SearchCriteria::new().location("nairobi"),
        SearchCriteria::new().title("eng").industry("TECH"),
        SearchCriteria::new().title("zzz"),
    ]
}
