//! Run metadata - the singleton record describing the last successful scrape.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Metadata written after every successful run, overwriting the
/// previous value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeMetadata {
    pub last_successful_scrape: DateTime<Utc>,
    pub total_heroes: usize,
    /// Raw record counts per extractor, before merging.
    #[serde(default)]
    pub per_source_counts: BTreeMap<String, usize>,
}

impl ScrapeMetadata {
    pub fn new(
        last_successful_scrape: DateTime<Utc>,
        total_heroes: usize,
        per_source_counts: BTreeMap<String, usize>,
    ) -> Self {
        Self {
            last_successful_scrape,
            total_heroes,
            per_source_counts,
        }
    }
}
