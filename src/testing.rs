//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical record builders to avoid duplication.

#![doc(hidden)]

use crate::types::JobRecord;

/// Create a record with the fields the index cares about most.
pub fn make_record(title: &str, industry: &str, skills: &[&str]) -> JobRecord {
    make_job(title, industry, "", skills)
}

/// Create a record with a location as well.
pub fn make_job(title: &str, industry: &str, location: &str, skills: &[&str]) -> JobRecord {
    JobRecord {
        title: title.to_string(),
        industry: industry.to_string(),
        location: location.to_string(),
        company: format!("{} Ltd", industry),
        description: format!("We are hiring a {}", title),
        tech_skills: skills.iter().map(|s| s.to_string()).collect(),
        link: format!("https://jobs.example/{}", slug(title)),
        ..Default::default()
    }
}

/// The three postings used throughout the docs and tests:
/// two software roles in Tech and an accountant in Finance.
pub fn sample_records() -> Vec<JobRecord> {
    vec![
        make_record("Senior Software Engineer", "Tech", &["python"]),
        make_record("Software Tester", "Tech", &["manual testing"]),
        make_record("Accountant", "Finance", &["excel"]),
    ]
}

fn slug(title: &str) -> String {
    title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}
