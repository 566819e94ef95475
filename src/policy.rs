//! Which freshly parsed postings are worth keeping.
//!
//! A posting is admitted when its industry is on the allow-list and its title
//! or position matches one of the known job-title patterns. Either list left
//! empty means that side is not checked.
//!
//! Title patterns may be phrases. A phrase matches when every one of its words
//! is a prefix of some title token, so "software eng" admits "Senior Software
//! Engineer". Single-word patterns behave exactly like a title search.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::IndexConfig;
use crate::error::Result;
use crate::index::SearchIndex;
use crate::query::Field;
use crate::skills::{SkillExtractor, SkillTagger};
use crate::types::{DocumentId, IdSet, JobRecord};
use crate::utils::tokenize;

/// Feed filtering and tagging vocabulary, usually loaded from JSON.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyConfig {
    pub allowed_industries: Vec<String>,
    #[serde(alias = "tech_job_titles")]
    pub job_titles: Vec<String>,
    pub tech_skills: Vec<String>,
    pub soft_skills: Vec<String>,
}

impl PolicyConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn policy(&self) -> InclusionPolicy {
        InclusionPolicy::new(self.allowed_industries.clone(), self.job_titles.clone())
    }

    pub fn tagger(&self) -> Result<SkillTagger> {
        Ok(SkillTagger::new(
            SkillExtractor::new(&self.tech_skills)?,
            SkillExtractor::new(&self.soft_skills)?,
        ))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InclusionPolicy {
    industries: Vec<String>,
    title_patterns: Vec<String>,
}

impl InclusionPolicy {
    pub fn new(industries: Vec<String>, title_patterns: Vec<String>) -> Self {
        InclusionPolicy {
            industries,
            title_patterns,
        }
    }

    /// Every document in `index` this policy admits.
    pub fn admitted(&self, index: &SearchIndex) -> IdSet {
        let all = || -> IdSet { index.store().iter().map(|(id, _)| id).collect() };

        let by_industry = if self.industries.is_empty() {
            all()
        } else {
            index.field_union(Field::Industry, &self.industries)
        };
        if by_industry.is_empty() {
            return IdSet::new();
        }

        let by_title = if self.title_patterns.is_empty() {
            all()
        } else {
            let mut union = IdSet::new();
            for pattern in &self.title_patterns {
                union.extend(phrase_matches(index, pattern));
            }
            union
        };

        by_industry.intersection(&by_title).copied().collect()
    }

    /// Whether `id` is admitted, without building the whole admitted set.
    pub fn admits(&self, index: &SearchIndex, id: DocumentId) -> bool {
        if !index.store().contains(id) {
            return false;
        }
        let industry_ok = self.industries.is_empty()
            || self
                .industries
                .iter()
                .any(|industry| index.industries().lookup(industry).contains(&id));
        industry_ok
            && (self.title_patterns.is_empty()
                || self
                    .title_patterns
                    .iter()
                    .any(|pattern| phrase_admits(index, pattern, id)))
    }

    /// Index `records` on a scratch index and keep the admitted ones, in
    /// input order.
    pub fn filter(&self, records: Vec<JobRecord>, config: &IndexConfig) -> Result<Vec<JobRecord>> {
        let mut scratch = SearchIndex::with_config(config.clone());
        let ids = scratch.bulk_add(records)?;
        let admitted = self.admitted(&scratch);
        tracing::info!(
            received = ids.len(),
            admitted = admitted.len(),
            "applied inclusion policy"
        );

        Ok(ids
            .into_iter()
            .filter(|id| admitted.contains(id))
            .filter_map(|id| scratch.get(id).ok().cloned())
            .collect())
    }
}

/// Documents whose title tokens cover every word of `pattern` as prefixes.
fn phrase_matches(index: &SearchIndex, pattern: &str) -> IdSet {
    let words = tokenize(pattern);
    let trie = index.title_trie();
    if words.is_empty() {
        // Same as an empty title criterion.
        return trie.search(pattern).clone();
    }

    let mut matched: Option<IdSet> = None;
    for word in &words {
        let ids = trie.search(word);
        matched = Some(match matched {
            None => ids.clone(),
            Some(current) => current.intersection(ids).copied().collect(),
        });
        if matched.as_ref().is_some_and(IdSet::is_empty) {
            break;
        }
    }
    matched.unwrap_or_default()
}

/// [`phrase_matches`] for a single document.
fn phrase_admits(index: &SearchIndex, pattern: &str, id: DocumentId) -> bool {
    let trie = index.title_trie();
    let words = tokenize(pattern);
    if words.is_empty() {
        return trie.search(pattern).contains(&id);
    }
    words.iter().all(|word| trie.search(word).contains(&id))
}
