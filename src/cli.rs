use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "jobtrie",
    about = "In-memory job posting index with prefix search",
    version
)]
pub struct Cli {
    /// JSON file with index settings (workers, cache_capacity)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Worker threads for bulk loading (overrides config and JOBTRIE_WORKERS)
    #[arg(long, global = true)]
    pub workers: Option<usize>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Index a feed and print the postings matching every filter
    Search {
        /// JSON array of job records
        #[arg(short, long)]
        feed: PathBuf,

        /// Criterion as field=value; repeat a field to OR its values
        #[arg(short = 'F', long = "filter")]
        filters: Vec<String>,

        /// Print at most this many postings
        #[arg(short, long)]
        limit: Option<usize>,
    },

    /// Tag skills and keep only postings the inclusion policy admits
    Filter {
        /// JSON array of job records
        #[arg(short, long)]
        feed: PathBuf,

        /// Policy file: allowed_industries, job_titles, tech_skills, soft_skills
        #[arg(short, long)]
        policy: PathBuf,

        /// Write admitted records here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Run saved searches against a feed and print one digest per recipient
    Alerts {
        /// JSON array of job records
        #[arg(short, long)]
        feed: PathBuf,

        /// JSON array of saved searches
        #[arg(short, long)]
        alerts: PathBuf,

        /// Write reported postings back into the alerts file
        #[arg(long)]
        save: bool,
    },

    /// Print index statistics for a feed
    Stats {
        /// JSON array of job records
        #[arg(short, long)]
        feed: PathBuf,
    },
}
