//! Query criteria: AND across fields, OR within a field.
//!
//! An empty list means the field is not constrained at all. That's different
//! from a list containing the empty string, which for the trie-backed fields
//! matches every document indexed into that field.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{IndexError, Result};

/// The four searchable fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    /// Title and position text, prefix-matched.
    Title,
    /// Technical skills, prefix-matched.
    Skill,
    /// Industry, exact match after normalization.
    Industry,
    /// Location, exact match after normalization.
    Location,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Title, Field::Skill, Field::Industry, Field::Location];

    pub fn as_str(self) -> &'static str {
        match self {
            Field::Title => "title",
            Field::Skill => "skill",
            Field::Industry => "industry",
            Field::Location => "location",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = IndexError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "title" | "titles" | "position" => Ok(Field::Title),
            "skill" | "skills" => Ok(Field::Skill),
            "industry" | "industries" => Ok(Field::Industry),
            "location" | "locations" => Ok(Field::Location),
            _ => Err(IndexError::UnknownField(s.to_string())),
        }
    }
}

/// What to look for. Build with the chained helpers or deserialize from JSON.
///
/// ```ignore
/// let criteria = SearchCriteria::new().title("software").industry("Tech");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchCriteria {
    #[serde(alias = "job_titles")]
    pub title_patterns: Vec<String>,
    pub skills: Vec<String>,
    pub industries: Vec<String>,
    pub locations: Vec<String>,
}

impl SearchCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(self, pattern: impl Into<String>) -> Self {
        self.with(Field::Title, pattern)
    }

    pub fn skill(self, pattern: impl Into<String>) -> Self {
        self.with(Field::Skill, pattern)
    }

    pub fn industry(self, value: impl Into<String>) -> Self {
        self.with(Field::Industry, value)
    }

    pub fn location(self, value: impl Into<String>) -> Self {
        self.with(Field::Location, value)
    }

    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.push(field, value);
        self
    }

    pub fn push(&mut self, field: Field, value: impl Into<String>) {
        self.values_mut(field).push(value.into());
    }

    pub fn values(&self, field: Field) -> &[String] {
        match field {
            Field::Title => &self.title_patterns,
            Field::Skill => &self.skills,
            Field::Industry => &self.industries,
            Field::Location => &self.locations,
        }
    }

    fn values_mut(&mut self, field: Field) -> &mut Vec<String> {
        match field {
            Field::Title => &mut self.title_patterns,
            Field::Skill => &mut self.skills,
            Field::Industry => &mut self.industries,
            Field::Location => &mut self.locations,
        }
    }

    /// No field is constrained.
    pub fn is_empty(&self) -> bool {
        Field::ALL.iter().all(|&field| self.values(field).is_empty())
    }

    /// Build criteria from `field=value` strings, failing on the first bad one.
    pub fn from_filters<I, S>(filters: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut criteria = SearchCriteria::new();
        for filter in filters {
            let (field, value) = parse_filter(filter.as_ref())?;
            criteria.push(field, value);
        }
        Ok(criteria)
    }
}

/// Split `field=value`. The value is kept verbatim (it may be empty).
pub fn parse_filter(filter: &str) -> Result<(Field, String)> {
    let (field, value) = filter
        .split_once('=')
        .ok_or_else(|| IndexError::MalformedFilter(filter.to_string()))?;
    Ok((field.parse()?, value.to_string()))
}
