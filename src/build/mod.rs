//! Bulk index construction: parallel map, serial merge.

pub mod batch;
pub mod parallel;

pub use batch::IndexBatch;
pub use parallel::{BulkLoader, LoadedBatch};
