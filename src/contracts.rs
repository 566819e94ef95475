//! Runtime contracts for the index invariants.
//!
//! These are debug-mode assertions:
//!
//! 1. **Zero-cost in release builds** (`debug_assert!` / `cfg(debug_assertions)`)
//! 2. **Early failure detection** while tests run
//!
//! # INVARIANTS (DO NOT REMOVE THESE CHECKS)
//!
//! | Contract Function             | Invariant                                     |
//! |-------------------------------|-----------------------------------------------|
//! | `check_bulk_ids_contiguous`   | bulk ids are `first, first+1, ...` in order   |
//! | `check_ids_issued`            | every indexed id resolves in the store        |
//! | `check_ids_sorted`            | query output is strictly ascending            |

use crate::index::SearchIndex;
use crate::types::DocumentId;

/// Check that a bulk load issued consecutive ids starting at `first`.
///
/// # Panics (debug builds only)
#[inline]
pub fn check_bulk_ids_contiguous(ids: &[DocumentId], first: DocumentId) {
    debug_assert!(
        ids.iter()
            .enumerate()
            .all(|(offset, id)| id.get() == first.get() + offset as u64),
        "bulk ids not contiguous from {}: {:?}",
        first,
        ids
    );
}

/// Check that every id held by a trie or categorical map was issued by the store.
///
/// Walks every node, so this is only compiled into debug builds.
///
/// # Panics (debug builds only)
#[inline]
pub fn check_ids_issued(index: &SearchIndex) {
    #[cfg(debug_assertions)]
    {
        let store = index.store();
        let dangling = index
            .title_trie()
            .all_ids()
            .chain(index.skill_trie().all_ids())
            .chain(index.industries().all_ids())
            .chain(index.locations().all_ids())
            .find(|id| !store.contains(*id));
        assert!(
            dangling.is_none(),
            "index refers to document {:?} that the store never issued",
            dangling
        );
    }
    #[cfg(not(debug_assertions))]
    let _ = index;
}

/// Check that query output is strictly ascending (sorted, no duplicates).
///
/// # Panics (debug builds only)
#[inline]
pub fn check_ids_sorted(ids: &[DocumentId]) {
    debug_assert!(
        ids.windows(2).all(|pair| pair[0] < pair[1]),
        "query ids not strictly ascending: {:?}",
        ids
    );
}
