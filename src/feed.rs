//! Lenient loading of already-parsed feed records.
//!
//! Input is a JSON array of record objects. One bad element must not sink the
//! batch: elements that aren't objects, or whose fields have the wrong type,
//! are skipped with a warning, and missing or `null` fields come through as
//! empty values.

use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use tracing::warn;

use crate::error::Result;
use crate::types::JobRecord;

/// Records that made it through, plus how many elements were dropped.
#[derive(Debug, Clone, Default)]
pub struct LoadedFeed {
    pub records: Vec<JobRecord>,
    pub skipped: usize,
}

/// Parse a JSON array of records from `reader`.
///
/// Fails only if the input isn't a JSON array at all.
pub fn load_records<R: Read>(reader: R) -> Result<LoadedFeed> {
    let elements: Vec<Value> = serde_json::from_reader(reader)?;
    let mut feed = LoadedFeed {
        records: Vec::with_capacity(elements.len()),
        skipped: 0,
    };

    for (position, element) in elements.into_iter().enumerate() {
        if !element.is_object() {
            warn!(position, "skipping feed element that is not an object");
            feed.skipped += 1;
            continue;
        }
        match JobRecord::deserialize(element) {
            Ok(record) => feed.records.push(record),
            Err(err) => {
                warn!(position, error = %err, "skipping malformed feed record");
                feed.skipped += 1;
            }
        }
    }
    Ok(feed)
}

pub fn load_records_from_path(path: &Path) -> Result<LoadedFeed> {
    let file = File::open(path)?;
    load_records(BufReader::new(file))
}
