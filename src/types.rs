// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks of the job index.
//!
//! Two things flow through every module: the [`JobRecord`] that upstream feed
//! parsing hands us, and the [`DocumentId`] the index assigns to it. Records
//! are read-only once stored. Ids are dense and monotonic, which the store
//! relies on. They are only meaningful inside one index instance.
//!
//! # Invariants
//!
//! - **DocumentId**: issued once, in increasing order, starting at 0.
//!   `id.as_usize() < store.len()` for every id the index hands out.
//! - **JobRecord**: never mutated after insertion. Missing fields are empty,
//!   never absent, so tokenization has nothing to fail on.

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Type-safe document identifier.
///
/// Opaque to callers. Inside the crate it doubles as the record's slot in the
/// document store, since ids are assigned densely from zero.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[repr(transparent)]
pub struct DocumentId(pub u64);

impl DocumentId {
    /// Get the underlying value.
    #[inline]
    pub fn get(self) -> u64 {
        self.0
    }

    /// Convert to usize for store indexing.
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }

    /// The id issued right after this one.
    #[inline]
    pub fn next(self) -> Self {
        DocumentId(self.0 + 1)
    }
}

impl From<u64> for DocumentId {
    fn from(id: u64) -> Self {
        DocumentId(id)
    }
}

impl From<DocumentId> for u64 {
    fn from(id: DocumentId) -> Self {
        id.0
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Set of matching documents. Ordered so query output is reproducible.
pub type IdSet = BTreeSet<DocumentId>;

/// A normalized job posting as delivered by the feed parser.
///
/// Every field tolerates being missing or `null` in the input and falls back
/// to its empty value. A record with no skills or no industry is still a
/// valid record; it just contributes nothing to those indexes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRecord {
    #[serde(default, deserialize_with = "lenient")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient")]
    pub position: String,
    #[serde(default, deserialize_with = "lenient")]
    pub company: String,
    #[serde(default, deserialize_with = "lenient")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient")]
    pub industry: String,
    #[serde(default, deserialize_with = "lenient")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient")]
    pub tech_skills: Vec<String>,
    #[serde(default, deserialize_with = "lenient")]
    pub soft_skills: Vec<String>,
    /// Publication timestamp exactly as the feed spelled it.
    #[serde(default, deserialize_with = "lenient")]
    pub publication_date: String,
    /// Unique posting URL. Upstream dedups on it; the index does not.
    #[serde(default, deserialize_with = "lenient", alias = "job_link")]
    pub link: String,
}

impl JobRecord {
    /// Free text indexed into the title trie.
    pub fn title_text(&self) -> String {
        format!("{} {}", self.title, self.position)
    }

    /// Names of the indexed fields this record leaves empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() && self.position.trim().is_empty() {
            missing.push("title");
        }
        if self.tech_skills.is_empty() {
            missing.push("tech_skills");
        }
        if self.industry.trim().is_empty() {
            missing.push("industry");
        }
        if self.location.trim().is_empty() {
            missing.push("location");
        }
        missing
    }
}

/// Treat `null` like a missing field.
fn lenient<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
