//! Empty patterns, empty indexes and records with missing fields.

use crate::common::*;
use jobtrie::{DocumentId, IndexError, JobRecord, SearchCriteria, SearchIndex};

#[test]
fn test_empty_index_answers_every_query_with_nothing() {
    let index = SearchIndex::new();
    for criteria in probe_criteria() {
        assert!(index.search(&criteria).is_empty(), "{:?}", criteria);
    }
}

#[test]
fn test_empty_title_pattern_matches_all_indexed_titles() {
    let index = bulk_index(sample_records());
    assert_eq!(index.search_ids(&SearchCriteria::new().title("")), ids(&[0, 1, 2]));
}

#[test]
fn test_empty_string_differs_from_omitted_criterion() {
    // The empty skill pattern hits the skill trie's root, which only holds
    // documents that contributed at least one skill token.
    let mut index = SearchIndex::new();
    index.add(make_record("Cashier", "Retail", &[]));
    index.add(make_record("Developer", "Tech", &["rust"]));

    assert_eq!(index.search_ids(&SearchCriteria::new()), ids(&[0, 1]));
    assert_eq!(index.search_ids(&SearchCriteria::new().skill("")), ids(&[1]));
}

#[test]
fn test_blank_industry_is_never_matched() {
    let index = sequential_index(vec![make_record("Porter", "", &[])]);
    assert!(index.search_ids(&SearchCriteria::new().industry("")).is_empty());
    assert!(index.search_ids(&SearchCriteria::new().industry("  ")).is_empty());
}

#[test]
fn test_record_with_no_fields_is_still_stored() {
    let mut index = SearchIndex::new();
    let id = index.add(JobRecord::default());

    assert_eq!(index.len(), 1);
    assert_eq!(index.search_ids(&SearchCriteria::new()), vec![id]);
    assert!(index.search_ids(&SearchCriteria::new().title("a")).is_empty());
}

#[test]
fn test_pattern_case_and_punctuation() {
    let index = sequential_index(vec![make_record("C++/Qt Developer (Remote)", "Tech", &[])]);
    assert_eq!(index.search_ids(&SearchCriteria::new().title("QT")), ids(&[0]));
    assert_eq!(index.search_ids(&SearchCriteria::new().title("remote")), ids(&[0]));
    // Patterns are walked character by character; punctuation never appears in the trie.
    assert!(index.search_ids(&SearchCriteria::new().title("c++")).is_empty());
}

#[test]
fn test_get_unknown_id_is_not_found() {
    let index = bulk_index(sample_records());
    match index.get(DocumentId(99)) {
        Err(IndexError::NotFound(id)) => assert_eq!(id, DocumentId(99)),
        other => panic!("expected NotFound, got {:?}", other),
    }
}

#[test]
fn test_unknown_filter_field_fails_fast() {
    let err = SearchCriteria::from_filters(["salary=100"]).unwrap_err();
    assert!(matches!(err, IndexError::UnknownField(_)), "{}", err);

    let err = SearchCriteria::from_filters(["industry"]).unwrap_err();
    assert!(matches!(err, IndexError::MalformedFilter(_)), "{}", err);
}
