//! Multi-Source Hero Statistics Pipeline
//!
//! Scrapes Mobile Legends hero data (tier, roles, counters, builds,
//! emblems, patch notes) from several fan sites, merges the per-source
//! records into one canonical document per hero, and persists the
//! result for the read API.
//!
//! # Design
//!
//! - Extractors are independent and replaceable; each one degrades
//!   rather than fails, and a fallback snapshot covers total outages.
//! - The merge is a pure reduction with fixed reconciliation rules,
//!   run only after every extractor has settled.
//! - Sinks are injected dependencies behind the [`HeroSink`] trait;
//!   the orchestrator never knows which storage variant it is feeding.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use scraping::{
//!     FallbackCache, FallbackExtractor, FandomExtractor, JsonFileSink,
//!     PageFetcher, ScrapeRunner,
//! };
//!
//! let fetcher = PageFetcher::new();
//! let runner = ScrapeRunner::new(
//!     vec![Arc::new(FallbackExtractor::new(
//!         FandomExtractor::new(fetcher.clone()),
//!         FallbackCache::new("data/fallback", "fandom"),
//!     ))],
//!     Arc::new(JsonFileSink::new("data")),
//! );
//! let summary = runner.run().await?;
//! ```
//!
//! # Modules
//!
//! - [`extractors`] - site-specific extractors and the [`Extractor`] trait
//! - [`fallback`] - last-known-good snapshots for empty extractions
//! - [`merge`] - the cross-source record merge
//! - [`sinks`] - persistence backends behind the [`HeroSink`] trait
//! - [`orchestrator`] - run sequencing, isolation, and the run lock
//! - [`testing`] - mock implementations for tests

pub mod error;
pub mod extractors;
pub mod fallback;
pub mod fetch;
pub mod merge;
pub mod orchestrator;
pub mod sinks;
pub mod testing;
pub mod types;

// Re-export core types at crate root
pub use error::{FetchError, PersistError, ScrapeError};
pub use extractors::{
    Extractor, FandomExtractor, MlbbHeroExtractor, OneEsportsExtractor,
};
pub use fallback::{FallbackCache, FallbackExtractor};
pub use fetch::PageFetcher;
pub use merge::merge_records;
pub use orchestrator::{RunSummary, ScrapeRunner};
pub use sinks::{DocumentSink, HeroSink, JsonFileSink};
pub use types::{
    slugify, Build, CanonicalHero, Emblem, Grade, HeroRecord, HeroStub, PatchNote,
    ScrapeMetadata, Tier, TierModifier,
};
