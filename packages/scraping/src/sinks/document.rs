//! In-memory document-collection sink.
//!
//! Models a managed document store: one document per hero keyed by
//! slug, upserted with merge-field semantics - keys present in the
//! incoming document overwrite, keys absent from it preserve whatever
//! the stored document already had. The metadata document is a plain
//! overwrite. Also serves as the test sink.

use async_trait::async_trait;
use serde_json::Value;
use std::collections::BTreeMap;
use std::sync::RwLock;
use tracing::info;

use super::HeroSink;
use crate::error::PersistResult;
use crate::types::{CanonicalHero, ScrapeMetadata};

#[derive(Default)]
pub struct DocumentSink {
    heroes: RwLock<BTreeMap<String, Value>>,
    metadata: RwLock<Option<ScrapeMetadata>>,
}

impl DocumentSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored hero documents.
    pub fn hero_count(&self) -> usize {
        self.heroes.read().unwrap().len()
    }

    /// Raw stored document for a slug. Exposes the merge-field
    /// behavior that the typed read path hides.
    pub fn document(&self, slug: &str) -> Option<Value> {
        self.heroes.read().unwrap().get(slug).cloned()
    }

    /// Upsert a raw document with merge-field semantics.
    pub fn upsert_document(&self, slug: &str, incoming: Value) {
        let mut heroes = self.heroes.write().unwrap();
        match heroes.get_mut(slug) {
            Some(existing) => merge_fields(existing, incoming),
            None => {
                heroes.insert(slug.to_string(), incoming);
            }
        }
    }

    /// Drop all stored documents.
    pub fn clear(&self) {
        self.heroes.write().unwrap().clear();
        *self.metadata.write().unwrap() = None;
    }
}

/// Recursive merge: incoming object keys overwrite, absent keys keep
/// their prior values; non-object values replace wholesale.
fn merge_fields(existing: &mut Value, incoming: Value) {
    match (existing, incoming) {
        (Value::Object(existing), Value::Object(incoming)) => {
            for (key, value) in incoming {
                match existing.get_mut(&key) {
                    Some(slot) => merge_fields(slot, value),
                    None => {
                        existing.insert(key, value);
                    }
                }
            }
        }
        (existing, incoming) => *existing = incoming,
    }
}

#[async_trait]
impl HeroSink for DocumentSink {
    async fn persist(
        &self,
        heroes: &[CanonicalHero],
        metadata: &ScrapeMetadata,
    ) -> PersistResult<()> {
        for hero in heroes {
            let doc = serde_json::to_value(hero)?;
            self.upsert_document(&hero.slug(), doc);
        }
        *self.metadata.write().unwrap() = Some(metadata.clone());

        info!(count = heroes.len(), "persisted hero documents");
        Ok(())
    }

    async fn list_heroes(&self) -> PersistResult<Vec<CanonicalHero>> {
        self.heroes
            .read()
            .unwrap()
            .values()
            .map(|doc| serde_json::from_value(doc.clone()).map_err(Into::into))
            .collect()
    }

    async fn get_hero(&self, slug: &str) -> PersistResult<Option<CanonicalHero>> {
        match self.heroes.read().unwrap().get(slug) {
            Some(doc) => Ok(Some(serde_json::from_value(doc.clone())?)),
            None => Ok(None),
        }
    }

    async fn metadata(&self) -> PersistResult<Option<ScrapeMetadata>> {
        Ok(self.metadata.read().unwrap().clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn canonical(name: &str) -> CanonicalHero {
        CanonicalHero {
            name: name.to_string(),
            role: vec!["Tank".into()],
            tier: crate::types::Tier::parse("A"),
            counters: Vec::new(),
            builds: Vec::new(),
            emblems: Vec::new(),
            patch_changes: Vec::new(),
            sources: vec!["fandom".into()],
            last_updated: Utc::now(),
        }
    }

    fn metadata(total: usize) -> ScrapeMetadata {
        ScrapeMetadata::new(Utc::now(), total, Default::default())
    }

    #[tokio::test]
    async fn persist_then_read_back() {
        let sink = DocumentSink::new();
        let heroes = vec![canonical("Franco"), canonical("Luo Yi")];

        sink.persist(&heroes, &metadata(2)).await.unwrap();

        let listed = sink.list_heroes().await.unwrap();
        assert_eq!(listed.len(), 2);
        assert!(sink.get_hero("luo-yi").await.unwrap().is_some());
        assert!(sink.get_hero("fanny").await.unwrap().is_none());
        assert_eq!(sink.metadata().await.unwrap().unwrap().total_heroes, 2);
    }

    #[tokio::test]
    async fn upsert_preserves_fields_absent_from_incoming_document() {
        let sink = DocumentSink::new();
        sink.upsert_document(
            "chou",
            json!({"name": "Chou", "tier": "S", "note": "kept"}),
        );
        sink.upsert_document("chou", json!({"name": "Chou", "tier": "A"}));

        let doc = sink.document("chou").unwrap();
        // Incoming keys overwrite, absent keys survive.
        assert_eq!(doc["tier"], "A");
        assert_eq!(doc["note"], "kept");
    }

    #[tokio::test]
    async fn persist_is_idempotent() {
        let sink = DocumentSink::new();
        let heroes = vec![canonical("Franco")];
        let meta = metadata(1);

        sink.persist(&heroes, &meta).await.unwrap();
        let first = sink.document("franco").unwrap();
        sink.persist(&heroes, &meta).await.unwrap();

        assert_eq!(sink.document("franco").unwrap(), first);
        assert_eq!(sink.hero_count(), 1);
    }

    #[tokio::test]
    async fn empty_persist_still_updates_metadata() {
        let sink = DocumentSink::new();
        sink.persist(&[], &metadata(0)).await.unwrap();

        assert!(sink.list_heroes().await.unwrap().is_empty());
        assert!(sink.metadata().await.unwrap().is_some());
    }
}
