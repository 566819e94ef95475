//! Pull known skills out of free-text job descriptions.
//!
//! Feeds rarely carry structured skill lists, so the usual source is the
//! description itself matched against a configured vocabulary. Matching is
//! case-insensitive and whole-word: "java" must not fire inside "javascript".
//! Multi-word skills ("machine learning") match as phrases.

use regex::{Regex, RegexBuilder};
use std::collections::BTreeSet;

use crate::error::Result;
use crate::types::JobRecord;

#[derive(Debug, Clone)]
pub struct SkillExtractor {
    /// `None` for an empty vocabulary, which matches nothing.
    pattern: Option<Regex>,
}

impl SkillExtractor {
    pub fn new<I, S>(vocabulary: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut terms: Vec<String> = vocabulary
            .into_iter()
            .map(|s| s.as_ref().trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        if terms.is_empty() {
            return Ok(SkillExtractor { pattern: None });
        }
        // Longest first so "react native" wins over "react".
        terms.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        terms.dedup();

        let alternation = terms
            .iter()
            .map(|term| guarded(term))
            .collect::<Vec<_>>()
            .join("|");
        let pattern = RegexBuilder::new(&alternation)
            .case_insensitive(true)
            .build()?;
        Ok(SkillExtractor {
            pattern: Some(pattern),
        })
    }

    /// Distinct vocabulary terms found in `text`, lowercased.
    pub fn extract(&self, text: &str) -> BTreeSet<String> {
        let Some(pattern) = &self.pattern else {
            return BTreeSet::new();
        };
        pattern
            .captures_iter(text)
            .filter_map(|caps| caps.iter().skip(1).flatten().next())
            .map(|m| m.as_str().to_lowercase())
            .collect()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// One alternative capturing `term`.
///
/// `\b` only holds next to a word character. A term starting with
/// punctuation (`.net`) needs a non-word character or the start of text
/// before it instead; a term ending with punctuation (`c++`, `c#`) gets no
/// right-hand guard.
fn guarded(term: &str) -> String {
    let left = match term.chars().next() {
        Some(c) if is_word_char(c) => r"\b",
        _ => r"(?:^|[^\w])",
    };
    let right = match term.chars().last() {
        Some(c) if is_word_char(c) => r"\b",
        _ => "",
    };
    format!("{}({}){}", left, regex::escape(term), right)
}

/// Extractors for both skill lists a record carries.
#[derive(Debug, Clone)]
pub struct SkillTagger {
    tech: SkillExtractor,
    soft: SkillExtractor,
}

impl SkillTagger {
    pub fn new(tech: SkillExtractor, soft: SkillExtractor) -> Self {
        SkillTagger { tech, soft }
    }

    /// Fill whichever skill lists the feed left empty from the description.
    /// Lists the feed did provide are kept as they are.
    pub fn tag(&self, record: &mut JobRecord) {
        if record.tech_skills.is_empty() {
            record.tech_skills = self.tech.extract(&record.description).into_iter().collect();
        }
        if record.soft_skills.is_empty() {
            record.soft_skills = self.soft.extract(&record.description).into_iter().collect();
        }
    }
}
