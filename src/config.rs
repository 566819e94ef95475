//! Runtime knobs for index construction and the shared query cache.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{IndexError, Result};

fn default_workers() -> usize {
    4
}

fn default_cache_capacity() -> usize {
    1024
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Threads in the pool a single `bulk_add` spins up.
    #[serde(default = "default_workers")]
    pub workers: usize,
    /// Distinct criteria `SharedIndex` remembers before starting over.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

impl Default for IndexConfig {
    fn default() -> Self {
        IndexConfig {
            workers: default_workers(),
            cache_capacity: default_cache_capacity(),
        }
    }
}

impl IndexConfig {
    /// Read `JOBTRIE_WORKERS` and `JOBTRIE_CACHE_CAPACITY`, falling back to
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let workers = std::env::var("JOBTRIE_WORKERS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(default_workers);
        let cache_capacity = std::env::var("JOBTRIE_CACHE_CAPACITY")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(default_cache_capacity);
        IndexConfig {
            workers,
            cache_capacity,
        }
    }

    /// Load from a JSON file. Missing keys take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: IndexConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = workers;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.workers == 0 {
            return Err(IndexError::InvalidConfig(
                "workers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
