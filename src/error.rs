//! Error types for the index and its loaders.
//!
//! Most of the index never fails: queries are pure, and records with missing
//! fields simply contribute nothing to the affected field. What remains are
//! programming errors (an id this index never issued, a filter naming a field
//! that doesn't exist) and input problems at the edges (config files, the
//! record loader, the skill vocabulary).

use crate::types::DocumentId;

/// Crate-wide result type, defaulting to [`IndexError`].
pub type Result<T, E = IndexError> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// The id was never issued by this index.
    #[error("document {0} was never issued by this index")]
    NotFound(DocumentId),

    /// A filter named a field the index doesn't have.
    #[error("unknown search field '{0}' (expected title, skill, industry or location)")]
    UnknownField(String),

    /// A `field=value` filter without the `=`.
    #[error("malformed filter '{0}', expected field=value")]
    MalformedFilter(String),

    /// The bounded worker pool for a bulk load could not be started.
    #[cfg(feature = "parallel")]
    #[error("failed to start bulk worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The skill vocabulary could not be compiled into a matcher.
    #[error("invalid skill vocabulary: {0}")]
    SkillPattern(#[from] regex::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
