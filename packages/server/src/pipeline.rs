//! Production pipeline wiring.
//!
//! Builds the extractor set and the flat-file sink once at startup;
//! the runner and sink are injected into the HTTP layer and the
//! scheduler rather than living as ambient globals.

use std::path::Path;
use std::sync::Arc;

use scraping::{
    Extractor, FallbackCache, FallbackExtractor, FandomExtractor, HeroSink, JsonFileSink,
    MlbbHeroExtractor, OneEsportsExtractor, PageFetcher, ScrapeRunner,
};

/// Construct the full production pipeline rooted at `data_dir`.
///
/// Returns the runner plus a handle to its sink for the read API.
pub fn build_pipeline(
    data_dir: &Path,
    user_agent: Option<&str>,
) -> (Arc<ScrapeRunner>, Arc<dyn HeroSink>) {
    let mut fetcher = PageFetcher::new();
    if let Some(ua) = user_agent {
        fetcher = fetcher.with_user_agent(ua);
    }

    let fallback_dir = data_dir.join("fallback");
    let extractors: Vec<Arc<dyn Extractor>> = vec![
        Arc::new(FallbackExtractor::new(
            FandomExtractor::new(fetcher.clone()),
            FallbackCache::new(&fallback_dir, scraping::extractors::fandom::SOURCE),
        )),
        Arc::new(FallbackExtractor::new(
            MlbbHeroExtractor::new(fetcher.clone()),
            FallbackCache::new(&fallback_dir, scraping::extractors::mlbbhero::SOURCE),
        )),
        Arc::new(FallbackExtractor::new(
            OneEsportsExtractor::new(fetcher),
            FallbackCache::new(&fallback_dir, scraping::extractors::oneesports::SOURCE),
        )),
    ];

    let sink: Arc<dyn HeroSink> = Arc::new(JsonFileSink::new(data_dir));
    let runner = Arc::new(ScrapeRunner::new(extractors, Arc::clone(&sink)));

    (runner, sink)
}
