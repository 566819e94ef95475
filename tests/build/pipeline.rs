//! Feed file to admitted, tagged, indexed postings and alert digests.

use crate::common::*;
use jobtrie::alerts::load_saved_searches;
use jobtrie::feed::load_records_from_path;
use jobtrie::{run_alerts, IndexConfig, PolicyConfig, SearchCriteria};
use std::fs;
use tempfile::TempDir;

const FEED: &str = r#"[
    {
        "title": "Python Developer",
        "position": "Engineering",
        "company": "Acme",
        "location": "Nairobi",
        "industry": "ICT / Computer",
        "description": "Django, PostgreSQL and Docker. Strong communication needed.",
        "tech_skills": null,
        "publication_date": "Tue, 01 Oct 2024 09:00:00 +0300",
        "job_link": "https://jobs.example/1"
    },
    {
        "title": "Accountant",
        "industry": "Accounting",
        "location": "Nairobi",
        "description": "Excel wizard",
        "job_link": "https://jobs.example/2"
    },
    "not a record",
    {
        "title": "Frontend Developer",
        "industry": "ict / computer",
        "location": "Remote",
        "description": "React and TypeScript",
        "tech_skills": ["react"],
        "job_link": "https://jobs.example/3"
    },
    {
        "title": 17
    }
]"#;

const POLICY: &str = r#"{
    "allowed_industries": ["ICT / Computer"],
    "tech_job_titles": ["developer", "data scientist"],
    "tech_skills": ["python", "django", "postgresql", "docker", "react", "typescript"],
    "soft_skills": ["communication", "teamwork"]
}"#;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_feed_to_policy_to_search() {
    let dir = TempDir::new().unwrap();
    let feed = load_records_from_path(&write(&dir, "feed.json", FEED)).unwrap();
    assert_eq!(feed.records.len(), 3);
    assert_eq!(feed.skipped, 2);

    let policy = PolicyConfig::from_file(&write(&dir, "policy.json", POLICY)).unwrap();
    let tagger = policy.tagger().unwrap();
    let mut records = feed.records;
    for record in &mut records {
        tagger.tag(record);
    }
    assert_eq!(records[0].tech_skills, vec!["django", "docker", "postgresql"]);
    assert_eq!(records[0].soft_skills, vec!["communication"]);
    assert_eq!(records[2].tech_skills, vec!["react"]);

    let admitted = policy.policy().filter(records, &IndexConfig::default()).unwrap();
    let titles: Vec<&str> = admitted.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Python Developer", "Frontend Developer"]);

    let index = bulk_index(admitted);
    assert_eq!(
        matching_titles(&index, &SearchCriteria::new().skill("post")),
        vec!["Python Developer"]
    );
    assert_eq!(
        matching_titles(&index, &SearchCriteria::new().title("eng").location("nairobi")),
        vec!["Python Developer"]
    );
}

#[test]
fn test_alerts_from_file() {
    let dir = TempDir::new().unwrap();
    let alerts_json = r#"[
        {"email": "a@example.com", "industries": ["tech"], "skills": ["py"]},
        {"email": "b@example.com", "job_titles": ["accountant"], "is_active": false},
        {"email": "c@example.com", "locations": ["Atlantis"]}
    ]"#;
    let mut alerts = load_saved_searches(&write(&dir, "alerts.json", alerts_json)).unwrap();

    let index = bulk_index(sample_records());
    let digests = run_alerts(&mut alerts, &index);

    assert_eq!(digests.len(), 1);
    assert_eq!(digests[0].email, "a@example.com");
    assert_eq!(digests[0].jobs[0].title, "Senior Software Engineer");

    let json = serde_json::to_value(&digests).unwrap();
    assert_eq!(json[0]["jobs"][0]["industry"], "Tech");
}

#[test]
fn test_alerts_saved_between_runs_report_only_new_postings() {
    let dir = TempDir::new().unwrap();
    let alerts_path = write(
        &dir,
        "alerts.json",
        r#"[{"email": "a@example.com", "industries": ["tech"]}]"#,
    );

    let run = |records: Vec<jobtrie::JobRecord>| -> Vec<String> {
        let mut alerts = load_saved_searches(&alerts_path).unwrap();
        let index = bulk_index(records);
        let titles = run_alerts(&mut alerts, &index)
            .iter()
            .flat_map(|d| d.jobs.iter().map(|j| j.title.clone()))
            .collect();
        fs::write(&alerts_path, serde_json::to_string_pretty(&alerts).unwrap()).unwrap();
        titles
    };

    let day1 = run(vec![
        make_record("Backend Engineer", "Tech", &["go"]),
        make_record("Frontend Engineer", "Tech", &["react"]),
        make_record("Data Engineer", "Tech", &["spark"]),
    ]);
    assert_eq!(day1.len(), 3);

    let day2 = run(vec![
        make_record("Platform Engineer", "Tech", &["k8s"]),
        make_record("Security Engineer", "Tech", &["iam"]),
        make_record("Data Engineer", "Tech", &["spark"]),
    ]);
    assert_eq!(day2, vec!["Platform Engineer", "Security Engineer"]);

    assert!(run(Vec::new()).is_empty());
}
