//! Concurrent readers over a `SharedIndex`.

use crate::common::*;
use jobtrie::{IndexConfig, SearchCriteria, SearchIndex, SharedIndex};
use std::sync::Arc;
use std::thread;

#[test]
fn test_concurrent_searches_agree_with_direct_search() {
    let direct = bulk_index(sample_records());
    let expected: Vec<_> = probe_criteria()
        .iter()
        .map(|c| direct.search_ids(c))
        .collect();

    let shared = Arc::new(SharedIndex::new(bulk_index(sample_records())));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                probe_criteria()
                    .iter()
                    .map(|c| shared.search_ids(c).to_vec())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
    let stats = shared.stats();
    assert_eq!(stats.hits + stats.misses, 4 * expected.len() as u64);
}

#[test]
fn test_writes_invalidate_cached_results() {
    let shared = SharedIndex::new(SearchIndex::with_config(IndexConfig::default()));
    shared.bulk_add(sample_records()).unwrap();

    let criteria = SearchCriteria::new().industry("finance");
    assert_eq!(shared.search(&criteria).len(), 1);
    assert_eq!(shared.search(&criteria).len(), 1);
    assert_eq!(shared.stats().hits, 1);

    shared.add(make_record("Auditor", "Finance", &[]));
    assert_eq!(shared.stats().entries, 0);
    assert_eq!(shared.search(&criteria).len(), 2);
}

#[test]
fn test_writer_interleaved_with_readers() {
    let batches: Vec<Vec<jobtrie::JobRecord>> = (0..20)
        .map(|round| {
            vec![
                make_job(&format!("Software Engineer {}", round), "Tech", "Nairobi", &["rust"]),
                make_job(&format!("Accountant {}", round), "Finance", "Mombasa", &["excel"]),
            ]
        })
        .collect();

    let shared = Arc::new(SharedIndex::new(SearchIndex::with_config(
        IndexConfig::default().with_workers(2),
    )));

    let writer = {
        let shared = Arc::clone(&shared);
        let batches = batches.clone();
        thread::spawn(move || {
            for (round, batch) in batches.into_iter().enumerate() {
                if round % 2 == 0 {
                    shared.bulk_add(batch).unwrap();
                } else {
                    for record in batch {
                        shared.add(record);
                    }
                }
            }
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                let criteria = SearchCriteria::new().title("soft").industry("tech");
                let mut seen = 0;
                for _ in 0..200 {
                    let hits = shared.search_ids(&criteria);
                    // Only adds happen, so a reader never sees the result shrink.
                    assert!(hits.len() >= seen, "{} after {}", hits.len(), seen);
                    assert!(hits.windows(2).all(|w| w[0] < w[1]));
                    seen = hits.len();
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    let direct = sequential_index(batches.into_iter().flatten().collect());
    for criteria in probe_criteria() {
        assert_eq!(
            shared.search_ids(&criteria).to_vec(),
            direct.search_ids(&criteria),
            "{:?}",
            criteria
        );
    }
    assert_eq!(shared.read().len(), 40);
}
