//! In-memory job search index with trie prefix matching.
//!
//! Feed ingestion hands over a batch of [`JobRecord`]s; the index files each
//! one under a [`DocumentId`] and answers AND-of-OR queries over four fields:
//! title (title + position text) and tech skills by token prefix, industry and
//! location by normalized exact match.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌──────────────┐     ┌──────────────────────┐
//! │  feed.rs    │────▶│  build/      │────▶│  index/              │
//! │ (load JSON) │     │ (parallel    │     │ (Trie, Categorical,  │
//! │  skills.rs  │     │  tokenize)   │     │  DocumentStore)      │
//! └─────────────┘     └──────────────┘     └──────────────────────┘
//!                                                     │
//!        ┌──────────────────┬─────────────────────────┤
//!        ▼                  ▼                         ▼
//! ┌─────────────┐    ┌─────────────┐          ┌───────────────┐
//! │  query.rs   │    │  policy.rs  │          │  cache.rs     │
//! │ (criteria)  │    │  alerts.rs  │          │ (SharedIndex) │
//! └─────────────┘    └─────────────┘          └───────────────┘
//! ```
//!
//! Bulk loads run in two phases: ids, storage and tokenization on a bounded
//! rayon pool that lives for one call, then a single-threaded merge into the
//! tries and maps. Searches after `bulk_add` returns are indistinguishable
//! from sequential `add` calls.
//!
//! # Usage
//!
//! ```ignore
//! use jobtrie::{SearchCriteria, SearchIndex};
//!
//! let mut index = SearchIndex::new();
//! index.bulk_add(records)?;
//!
//! let criteria = SearchCriteria::new().title("software").industry("Tech");
//! for job in index.search(&criteria) {
//!     println!("{} at {}", job.title, job.company);
//! }
//! ```

// Module declarations
pub mod alerts;
pub mod build;
mod cache;
pub mod config;
pub mod contracts;
mod error;
pub mod feed;
mod index;
pub mod policy;
mod query;
pub mod skills;
pub mod testing;
mod types;
mod utils;

// Re-exports for public API
pub use alerts::{run_alerts, AlertDigest, SavedSearch};
pub use build::{BulkLoader, IndexBatch};
pub use cache::{CacheStats, SharedIndex};
pub use config::IndexConfig;
pub use error::{IndexError, Result};
pub use feed::{load_records, LoadedFeed};
pub use index::{CategoricalIndex, DocumentStore, SearchIndex, Trie, TrieBatch};
pub use policy::{InclusionPolicy, PolicyConfig};
pub use query::{parse_filter, Field, SearchCriteria};
pub use skills::{SkillExtractor, SkillTagger};
pub use types::{DocumentId, IdSet, JobRecord};
pub use utils::{normalize_category, tokenize};
