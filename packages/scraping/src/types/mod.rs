//! Data types for the scrape-merge pipeline.

pub mod hero;
pub mod metadata;

pub use hero::{
    slugify, Build, CanonicalHero, Emblem, Grade, HeroRecord, HeroStub, PatchNote, Tier,
    TierModifier,
};
pub use metadata::ScrapeMetadata;
