//! Scrape run orchestration.
//!
//! One `run()` serves both triggers (on-demand HTTP and the daily
//! schedule). Extractors run concurrently as independent tasks; a
//! failed or panicked extractor contributes zero records for its
//! source and never aborts the run. Only merge/persist failures reach
//! the caller.

use chrono::Utc;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::error::{Result, ScrapeError};
use crate::extractors::Extractor;
use crate::merge::merge_records;
use crate::sinks::HeroSink;
use crate::types::ScrapeMetadata;

/// Outcome of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub total_heroes: usize,
    pub per_source_counts: BTreeMap<String, usize>,
}

/// Runs the full scrape-merge-persist pipeline.
///
/// The sink is an injected dependency constructed once at startup,
/// not ambient module state. The run lock guarantees at most one
/// concurrent run; overlapping triggers are rejected, not queued.
pub struct ScrapeRunner {
    extractors: Vec<Arc<dyn Extractor>>,
    sink: Arc<dyn HeroSink>,
    run_lock: Mutex<()>,
}

impl ScrapeRunner {
    pub fn new(extractors: Vec<Arc<dyn Extractor>>, sink: Arc<dyn HeroSink>) -> Self {
        Self {
            extractors,
            sink,
            run_lock: Mutex::new(()),
        }
    }

    /// Execute one full scrape run.
    ///
    /// Returns [`ScrapeError::RunInProgress`] when another run holds
    /// the lock, and surfaces persistence failures; everything else
    /// degrades and is logged.
    pub async fn run(&self) -> Result<RunSummary> {
        let _guard = self
            .run_lock
            .try_lock()
            .map_err(|_| ScrapeError::RunInProgress)?;

        info!(extractors = self.extractors.len(), "starting scrape run");

        let handles: Vec<_> = self
            .extractors
            .iter()
            .map(|extractor| {
                let extractor = Arc::clone(extractor);
                let source = extractor.source().to_string();
                (source, tokio::spawn(async move { extractor.extract().await }))
            })
            .collect();

        let mut per_source = Vec::with_capacity(handles.len());
        let mut counts = BTreeMap::new();

        for (source, handle) in handles {
            let records = match handle.await {
                Ok(records) => records,
                Err(e) => {
                    warn!(source = %source, error = %e,
                          "extractor task failed, contributing no records");
                    Vec::new()
                }
            };
            info!(source = %source, count = records.len(), "extractor settled");
            counts.insert(source.clone(), records.len());
            per_source.push((source, records));
        }

        let merged_at = Utc::now();
        let heroes = merge_records(per_source, merged_at);
        let metadata = ScrapeMetadata::new(merged_at, heroes.len(), counts.clone());

        self.sink.persist(&heroes, &metadata).await?;

        info!(total = heroes.len(), "scrape run complete");
        Ok(RunSummary {
            total_heroes: heroes.len(),
            per_source_counts: counts,
        })
    }
}
