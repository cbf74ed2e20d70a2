//! Mock implementations for testing.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::extractors::Extractor;
use crate::types::HeroRecord;

/// Configurable extractor double: canned records, optional delay,
/// optional panic, call counting.
///
/// # Example
///
/// ```rust
/// use scraping::testing::MockExtractor;
/// use scraping::types::HeroRecord;
///
/// let mock = MockExtractor::new("fandom")
///     .with_records(vec![HeroRecord::new("Chou")]);
/// ```
pub struct MockExtractor {
    source: String,
    records: Vec<HeroRecord>,
    delay: Option<Duration>,
    panic_on_extract: bool,
    calls: Arc<AtomicUsize>,
}

impl MockExtractor {
    /// Create a mock with no records (an "empty" source).
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            records: Vec::new(),
            delay: None,
            panic_on_extract: false,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Canned records returned by every `extract` call.
    pub fn with_records(mut self, records: Vec<HeroRecord>) -> Self {
        self.records = records;
        self
    }

    /// Sleep this long inside `extract` (for overlap tests).
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Panic inside `extract` (for isolation tests).
    pub fn panicking(mut self) -> Self {
        self.panic_on_extract = true;
        self
    }

    /// Number of times `extract` was called.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Shared handle to the call counter, usable after the mock has
    /// been moved into a runner.
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl Extractor for MockExtractor {
    fn source(&self) -> &str {
        &self.source
    }

    async fn extract(&self) -> Vec<HeroRecord> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        if self.panic_on_extract {
            panic!("mock extractor configured to panic");
        }
        self.records.clone()
    }
}
