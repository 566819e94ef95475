//! Saved searches that report postings they haven't reported before.
//!
//! Document ids only mean something inside one index instance, and the index
//! is rebuilt from the feed on every run. So an alert remembers *which
//! postings* it already reported, keyed by the posting link (upstream dedups
//! on it), and survives being saved and reloaded against a fresh index.
//!
//! After a run, the remembered set is replaced by the keys of everything that
//! currently matches. Postings that drop out of the feed are forgotten, so
//! the set stays bounded by the feed size. Delivery (email templating and
//! sending) is someone else's job; this module produces the digests.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;

use crate::error::Result;
use crate::index::SearchIndex;
use crate::query::SearchCriteria;
use crate::types::{DocumentId, JobRecord};

fn default_active() -> bool {
    true
}

/// Stable identity of a posting across index rebuilds.
///
/// The link when there is one; otherwise title, company and publication date.
pub fn posting_key(record: &JobRecord) -> String {
    if !record.link.trim().is_empty() {
        return record.link.trim().to_string();
    }
    format!(
        "{}\u{1f}{}\u{1f}{}",
        record.title.trim(),
        record.company.trim(),
        record.publication_date.trim()
    )
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedSearch {
    pub email: String,
    #[serde(flatten)]
    pub criteria: SearchCriteria,
    #[serde(default = "default_active", alias = "is_active")]
    pub active: bool,
    /// Keys of postings already sent to this recipient.
    #[serde(default)]
    pub reported: BTreeSet<String>,
}

impl SavedSearch {
    pub fn new(email: impl Into<String>, criteria: SearchCriteria) -> Self {
        SavedSearch {
            email: email.into(),
            criteria,
            active: true,
            reported: BTreeSet::new(),
        }
    }

    /// Matching ids whose postings haven't been reported yet. Inactive
    /// searches match nothing.
    pub fn pending(&self, index: &SearchIndex) -> Vec<DocumentId> {
        if !self.active {
            return Vec::new();
        }
        index
            .search_ids(&self.criteria)
            .into_iter()
            .filter(|id| {
                index
                    .get(*id)
                    .is_ok_and(|record| !self.reported.contains(&posting_key(record)))
            })
            .collect()
    }

    /// Mark everything currently matching in `index` as reported.
    pub fn advance(&mut self, index: &SearchIndex) {
        self.reported = index
            .search(&self.criteria)
            .into_iter()
            .map(posting_key)
            .collect();
    }
}

/// One alert's worth of new postings.
#[derive(Debug, Clone, Serialize)]
pub struct AlertDigest<'a> {
    pub email: String,
    pub jobs: Vec<&'a JobRecord>,
}

/// Evaluate every alert, advancing each one that produced a digest. Alerts
/// with nothing new are left untouched.
pub fn run_alerts<'a>(alerts: &mut [SavedSearch], index: &'a SearchIndex) -> Vec<AlertDigest<'a>> {
    let mut digests = Vec::new();
    for alert in alerts.iter_mut() {
        let pending = alert.pending(index);
        if pending.is_empty() {
            continue;
        }
        let jobs: Vec<&JobRecord> = pending
            .into_iter()
            .filter_map(|id| index.get(id).ok())
            .collect();
        tracing::info!(email = %alert.email, jobs = jobs.len(), "alert has new matches");
        alert.advance(index);
        digests.push(AlertDigest {
            email: alert.email.clone(),
            jobs,
        });
    }
    digests
}

/// Load saved searches from a JSON array.
pub fn load_saved_searches(path: &Path) -> Result<Vec<SavedSearch>> {
    let content = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}
