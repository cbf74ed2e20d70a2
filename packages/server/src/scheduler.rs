//! Scheduled background scraping using tokio-cron-scheduler.
//!
//! The daily job goes through the same `run()` as the manual trigger.
//! Scheduled runs only log - failures never surface to any caller,
//! and a run that overlaps a manual trigger is skipped.

use anyhow::Result;
use std::sync::Arc;
use tokio_cron_scheduler::{Job, JobScheduler};

use scraping::{ScrapeError, ScrapeRunner};

/// Start the scheduler with the daily scrape job.
///
/// The returned handle must be kept alive for the jobs to keep firing.
pub async fn start_scheduler(runner: Arc<ScrapeRunner>, schedule: &str) -> Result<JobScheduler> {
    let scheduler = JobScheduler::new().await?;

    let job = Job::new_async(schedule, move |_uuid, _lock| {
        let runner = Arc::clone(&runner);
        Box::pin(async move {
            run_scheduled_scrape(&runner).await;
        })
    })?;

    scheduler.add(job).await?;
    scheduler.start().await?;

    tracing::info!(schedule, "scheduled scraping started");
    Ok(scheduler)
}

async fn run_scheduled_scrape(runner: &ScrapeRunner) {
    tracing::info!("running scheduled scraping");
    match runner.run().await {
        Ok(summary) => {
            tracing::info!(
                total = summary.total_heroes,
                "scheduled scraping completed successfully"
            );
        }
        Err(ScrapeError::RunInProgress) => {
            tracing::info!("scheduled scraping skipped, another run is in progress");
        }
        Err(e) => {
            tracing::error!(error = %e, "scheduled scraping failed");
        }
    }
}
