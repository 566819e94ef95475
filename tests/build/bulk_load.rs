//! `bulk_add` against sequential `add`, plus pool configuration.

use crate::common::*;
use jobtrie::{DocumentId, IndexConfig, IndexError, SearchCriteria, SearchIndex};

fn corpus() -> Vec<jobtrie::JobRecord> {
    let mut records = sample_records();
    records.extend([
        make_job("Backend Engineer", "Tech", "Nairobi", &["python", "postgres"]),
        make_job("Staff Nurse", "Health", "Mombasa", &[]),
        make_job("Software Sales", "Retail", "nairobi", &["crm"]),
        make_job("Payroll Accountant", "Finance", "Kisumu", &["excel", "sage"]),
    ]);
    records
}

#[test]
fn test_bulk_matches_sequential_for_every_probe() {
    let bulk = bulk_index(corpus());
    let sequential = sequential_index(corpus());

    for criteria in probe_criteria() {
        assert_eq!(
            bulk.search_ids(&criteria),
            sequential.search_ids(&criteria),
            "diverged on {:?}",
            criteria
        );
    }
}

#[test]
fn test_bulk_ids_pair_with_input_order() {
    let mut index = SearchIndex::new();
    index.add(make_record("Existing", "Tech", &[]));

    let records = corpus();
    let ids = index.bulk_add(records.clone()).unwrap();

    assert_eq!(ids.len(), records.len());
    for (offset, (id, record)) in ids.iter().zip(&records).enumerate() {
        assert_eq!(*id, DocumentId(offset as u64 + 1));
        assert_eq!(index.get(*id).unwrap(), record);
    }
    assert_eq!(index.next_id(), DocumentId(records.len() as u64 + 1));
}

#[test]
fn test_mixed_add_and_bulk_add() {
    let mut mixed = SearchIndex::new();
    let records = corpus();
    let (head, tail) = records.split_at(3);
    for record in head {
        mixed.add(record.clone());
    }
    mixed.bulk_add(tail.to_vec()).unwrap();

    let sequential = sequential_index(corpus());
    for criteria in probe_criteria() {
        assert_eq!(mixed.search_ids(&criteria), sequential.search_ids(&criteria));
    }
}

#[test]
fn test_empty_batch_is_a_no_op() {
    let mut index = bulk_index(sample_records());
    let ids = index.bulk_add(Vec::new()).unwrap();
    assert!(ids.is_empty());
    assert_eq!(index.len(), 3);
}

#[test]
fn test_single_worker_gives_same_index() {
    let mut single = SearchIndex::with_config(IndexConfig::default().with_workers(1));
    single.bulk_add(corpus()).unwrap();
    let pooled = bulk_index(corpus());

    for criteria in probe_criteria() {
        assert_eq!(single.search_ids(&criteria), pooled.search_ids(&criteria));
    }
    assert_eq!(single.title_trie().node_count(), pooled.title_trie().node_count());
}

#[test]
fn test_zero_workers_is_rejected_before_touching_the_index() {
    let mut index = SearchIndex::with_config(IndexConfig::default().with_workers(0));
    let err = index.bulk_add(sample_records()).unwrap_err();
    assert!(matches!(err, IndexError::InvalidConfig(_)), "{}", err);
    assert!(index.is_empty());
    assert!(index.search(&SearchCriteria::new()).is_empty());
}

#[test]
fn test_bulk_load_of_many_records() {
    let records: Vec<_> = (0..2_000)
        .map(|i| {
            make_job(
                &format!("Role{} Engineer", i % 50),
                ["Tech", "Finance", "Health", ""][i % 4],
                ["Nairobi", "Mombasa", ""][i % 3],
                &["rust", "go", "sql"][..(i % 3) + 1],
            )
        })
        .collect();

    let bulk = bulk_index(records.clone());
    let sequential = sequential_index(records);

    assert_eq!(bulk.len(), 2_000);
    assert_eq!(
        bulk.search_ids(&SearchCriteria::new().title("role1").industry("tech")),
        sequential.search_ids(&SearchCriteria::new().title("role1").industry("tech"))
    );
    assert_eq!(
        bulk.search_ids(&SearchCriteria::new().skill("sq")).len(),
        (0..2_000).filter(|i| i % 3 == 2).count()
    );
}
