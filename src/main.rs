use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[cfg(feature = "parallel")]
use indicatif::{ProgressBar, ProgressStyle};

use jobtrie::alerts::load_saved_searches;
use jobtrie::feed::load_records_from_path;
use jobtrie::{
    run_alerts, DocumentId, IndexConfig, JobRecord, PolicyConfig, SearchCriteria, SearchIndex,
};

mod cli;
use cli::{Cli, Commands};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("❌ {:#}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(cli.config.as_deref(), cli.workers)?;

    match cli.command {
        Commands::Search {
            feed,
            filters,
            limit,
        } => run_search(&feed, &filters, limit, config),
        Commands::Filter {
            feed,
            policy,
            output,
        } => run_filter(&feed, &policy, output.as_deref(), &config),
        Commands::Alerts { feed, alerts, save } => run_alert_digests(&feed, &alerts, save, config),
        Commands::Stats { feed } => run_stats(&feed, config),
    }
}

/// File settings win over the environment; `--workers` wins over both.
fn resolve_config(path: Option<&Path>, workers: Option<usize>) -> Result<IndexConfig> {
    let mut config = match path {
        Some(path) => IndexConfig::from_file(path)
            .with_context(|| format!("reading config {}", path.display()))?,
        None => IndexConfig::from_env(),
    };
    if let Some(workers) = workers {
        config = config.with_workers(workers);
    }
    config.validate()?;
    Ok(config)
}

#[cfg(feature = "parallel")]
fn create_progress_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{spinner:.cyan} {prefix:<12} [{bar:40.cyan/dim}] {pos}/{len} {msg}",
    )
    .unwrap_or_else(|_| ProgressStyle::default_bar())
    .progress_chars("━━╸")
}

fn read_feed(path: &Path) -> Result<Vec<JobRecord>> {
    let feed = load_records_from_path(path)
        .with_context(|| format!("reading feed {}", path.display()))?;
    if feed.skipped > 0 {
        info!(skipped = feed.skipped, "some feed elements were dropped");
    }
    Ok(feed.records)
}

fn build_index(records: Vec<JobRecord>, config: IndexConfig) -> Result<SearchIndex> {
    let mut index = SearchIndex::with_config(config);

    #[cfg(feature = "parallel")]
    {
        let progress = ProgressBar::new(records.len() as u64);
        progress.set_style(create_progress_style());
        progress.set_prefix("Tokenizing");
        index.bulk_add_with_progress(records, &progress)?;
    }
    #[cfg(not(feature = "parallel"))]
    index.bulk_add(records)?;

    Ok(index)
}

#[derive(Serialize)]
struct Hit<'a> {
    id: DocumentId,
    #[serde(flatten)]
    record: &'a JobRecord,
}

fn run_search(
    feed: &Path,
    filters: &[String],
    limit: Option<usize>,
    config: IndexConfig,
) -> Result<()> {
    let criteria = SearchCriteria::from_filters(filters)?;

    let index = build_index(read_feed(feed)?, config)?;
    let ids = index.search_ids(&criteria);
    info!(matches = ids.len(), "search complete");

    let hits = ids
        .into_iter()
        .take(limit.unwrap_or(usize::MAX))
        .map(|id| Ok(Hit { id, record: index.get(id)? }))
        .collect::<Result<Vec<_>>>()?;
    print_json(&hits)
}

fn run_filter(feed: &Path, policy: &Path, output: Option<&Path>, config: &IndexConfig) -> Result<()> {
    let policy_config = PolicyConfig::from_file(policy)
        .with_context(|| format!("reading policy {}", policy.display()))?;
    let tagger = policy_config.tagger()?;

    let mut records = read_feed(feed)?;
    for record in &mut records {
        tagger.tag(record);
    }
    let admitted = policy_config.policy().filter(records, config)?;

    match output {
        Some(path) => {
            let json = serde_json::to_string_pretty(&admitted)?;
            fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
            info!(records = admitted.len(), path = %path.display(), "wrote admitted records");
            Ok(())
        }
        None => print_json(&admitted),
    }
}

fn run_alert_digests(feed: &Path, alerts_path: &Path, save: bool, config: IndexConfig) -> Result<()> {
    let mut alerts = load_saved_searches(alerts_path)
        .with_context(|| format!("reading alerts {}", alerts_path.display()))?;
    let index = build_index(read_feed(feed)?, config)?;

    let digests = run_alerts(&mut alerts, &index);
    info!(alerts = alerts.len(), digests = digests.len(), "alerts evaluated");
    print_json(&digests)?;

    if save {
        let json = serde_json::to_string_pretty(&alerts)?;
        fs::write(alerts_path, json)
            .with_context(|| format!("writing {}", alerts_path.display()))?;
    }
    Ok(())
}

#[derive(Serialize)]
struct Stats<'a> {
    documents: usize,
    title_tokens: usize,
    title_nodes: usize,
    skill_tokens: usize,
    skill_nodes: usize,
    industries: BTreeMap<&'a str, usize>,
    locations: BTreeMap<&'a str, usize>,
}

fn run_stats(feed: &Path, config: IndexConfig) -> Result<()> {
    let index = build_index(read_feed(feed)?, config)?;

    let stats = Stats {
        documents: index.len(),
        title_tokens: index.title_trie().token_count(),
        title_nodes: index.title_trie().node_count(),
        skill_tokens: index.skill_trie().token_count(),
        skill_nodes: index.skill_trie().node_count(),
        industries: index
            .industries()
            .keys()
            .into_iter()
            .map(|k| (k, index.industries().lookup(k).len()))
            .collect(),
        locations: index
            .locations()
            .keys()
            .into_iter()
            .map(|k| (k, index.locations().lookup(k).len()))
            .collect(),
    };
    print_json(&stats)
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value)?;
    writeln!(out)?;
    Ok(())
}
