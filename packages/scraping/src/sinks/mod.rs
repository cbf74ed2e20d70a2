//! Persistence sinks for canonical hero records.
//!
//! A sink owns durable storage for the merged records plus the run
//! metadata singleton, and backs the read API. Two forms exist:
//! a flat-file tree ([`JsonFileSink`]) and an in-memory document
//! collection with merge-field upserts ([`DocumentSink`]).

use async_trait::async_trait;

use crate::error::PersistResult;
use crate::types::{CanonicalHero, ScrapeMetadata};

pub mod document;
pub mod flat_file;

pub use document::DocumentSink;
pub use flat_file::JsonFileSink;

/// Durable storage for canonical records and run metadata.
///
/// `persist` must be idempotent: writing the same canonical set twice
/// leaves the same stored state, timestamps aside.
#[async_trait]
pub trait HeroSink: Send + Sync {
    /// Write the full canonical set and the metadata record.
    async fn persist(
        &self,
        heroes: &[CanonicalHero],
        metadata: &ScrapeMetadata,
    ) -> PersistResult<()>;

    /// All stored canonical records.
    async fn list_heroes(&self) -> PersistResult<Vec<CanonicalHero>>;

    /// One stored record by slug.
    async fn get_hero(&self, slug: &str) -> PersistResult<Option<CanonicalHero>>;

    /// The metadata singleton, if a run has completed.
    async fn metadata(&self) -> PersistResult<Option<ScrapeMetadata>>;
}
