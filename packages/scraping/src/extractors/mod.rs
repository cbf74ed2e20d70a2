//! Source extractors - one per external site.
//!
//! Each extractor turns one site's pages into raw [`HeroRecord`]s. The
//! contract is deliberately infallible: on any failure an extractor
//! returns whatever it managed to gather, down to an empty list. Total
//! failure recovery (fallback snapshots) is layered on top by
//! [`FallbackExtractor`](crate::fallback::FallbackExtractor).

use async_trait::async_trait;
use futures::future;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

use crate::types::HeroRecord;

pub mod fandom;
pub mod mlbbhero;
pub mod oneesports;

pub use fandom::FandomExtractor;
pub use mlbbhero::MlbbHeroExtractor;
pub use oneesports::OneEsportsExtractor;

/// A source-specific extractor.
#[async_trait]
pub trait Extractor: Send + Sync {
    /// Stable identifier for this source, used for tagging records,
    /// per-source counts, and fallback snapshot names.
    fn source(&self) -> &str;

    /// Extract every hero this source knows about.
    ///
    /// Never fails: network and parse problems degrade individual
    /// items (or the whole list) rather than raising.
    async fn extract(&self) -> Vec<HeroRecord>;
}

/// Run `f` over `items` in bounded concurrent windows.
///
/// Results come back in input order - each window is joined as a unit,
/// so a slot's result lands at the slot's position. A fixed pause is
/// inserted between windows; this is politeness towards the source
/// site, required to avoid being blocked, not a throughput knob.
pub(crate) async fn map_batched<T, R, F, Fut>(
    items: Vec<T>,
    width: usize,
    pause: Duration,
    f: F,
) -> Vec<R>
where
    F: Fn(T) -> Fut,
    Fut: Future<Output = R>,
{
    let width = width.max(1);
    let total = items.len();
    let mut out = Vec::with_capacity(total);
    let mut iter = items.into_iter();

    loop {
        let batch: Vec<T> = iter.by_ref().take(width).collect();
        if batch.is_empty() {
            break;
        }
        let results = future::join_all(batch.into_iter().map(&f)).await;
        out.extend(results);

        if out.len() < total {
            debug!(done = out.len(), total, "pausing between detail batches");
            tokio::time::sleep(pause).await;
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn batched_map_preserves_input_order() {
        let items: Vec<usize> = (0..13).collect();
        let out = map_batched(items, 4, Duration::from_millis(1), |n| async move { n * 2 }).await;
        assert_eq!(out, (0..13).map(|n| n * 2).collect::<Vec<_>>());
    }

    #[tokio::test]
    async fn batched_map_bounds_concurrency() {
        let live = Arc::new(AtomicUsize::new(0));
        let peak = Arc::new(AtomicUsize::new(0));

        let items: Vec<usize> = (0..10).collect();
        let out = map_batched(items, 3, Duration::from_millis(1), |n| {
            let live = Arc::clone(&live);
            let peak = Arc::clone(&peak);
            async move {
                let now = live.fetch_add(1, Ordering::SeqCst) + 1;
                peak.fetch_max(now, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_millis(5)).await;
                live.fetch_sub(1, Ordering::SeqCst);
                n
            }
        })
        .await;

        assert_eq!(out.len(), 10);
        assert!(peak.load(Ordering::SeqCst) <= 3);
    }

    #[tokio::test]
    async fn batched_map_handles_empty_input() {
        let out: Vec<usize> =
            map_batched(Vec::new(), 5, Duration::from_secs(1), |n: usize| async move { n }).await;
        assert!(out.is_empty());
    }
}
