//! Flat-file JSON sink.
//!
//! Writes an aggregate listing file, one file per hero keyed by slug,
//! and the metadata singleton. Every file is a full overwrite - this
//! variant has no partial-field preservation across runs. Writes are
//! staged to a `.tmp` sibling and renamed into place so readers never
//! observe a half-written file.

use async_trait::async_trait;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::info;

use super::HeroSink;
use crate::error::PersistResult;
use crate::types::{CanonicalHero, ScrapeMetadata};

const ALL_HEROES_FILE: &str = "heroes.json";
const HEROES_DIR: &str = "heroes";
const METADATA_FILE: &str = "metadata.json";

pub struct JsonFileSink {
    data_dir: PathBuf,
}

impl JsonFileSink {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    fn heroes_dir(&self) -> PathBuf {
        self.data_dir.join(HEROES_DIR)
    }

    async fn write_staged<T: Serialize>(&self, path: &Path, value: &T) -> PersistResult<()> {
        let json = serde_json::to_vec_pretty(value)?;
        let staged = path.with_extension("json.tmp");
        tokio::fs::write(&staged, json).await?;
        tokio::fs::rename(&staged, path).await?;
        Ok(())
    }

    async fn read_json<T: serde::de::DeserializeOwned>(
        &self,
        path: &Path,
    ) -> PersistResult<Option<T>> {
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[async_trait]
impl HeroSink for JsonFileSink {
    async fn persist(
        &self,
        heroes: &[CanonicalHero],
        metadata: &ScrapeMetadata,
    ) -> PersistResult<()> {
        tokio::fs::create_dir_all(self.heroes_dir()).await?;

        self.write_staged(&self.data_dir.join(ALL_HEROES_FILE), &heroes)
            .await?;

        for hero in heroes {
            let path = self.heroes_dir().join(format!("{}.json", hero.slug()));
            self.write_staged(&path, hero).await?;
        }

        self.write_staged(&self.data_dir.join(METADATA_FILE), metadata)
            .await?;

        info!(
            dir = %self.data_dir.display(),
            count = heroes.len(),
            "persisted hero data to flat files"
        );
        Ok(())
    }

    async fn list_heroes(&self) -> PersistResult<Vec<CanonicalHero>> {
        Ok(self
            .read_json(&self.data_dir.join(ALL_HEROES_FILE))
            .await?
            .unwrap_or_default())
    }

    async fn get_hero(&self, slug: &str) -> PersistResult<Option<CanonicalHero>> {
        self.read_json(&self.heroes_dir().join(format!("{slug}.json")))
            .await
    }

    async fn metadata(&self) -> PersistResult<Option<ScrapeMetadata>> {
        self.read_json(&self.data_dir.join(METADATA_FILE)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::collections::BTreeMap;

    fn canonical(name: &str) -> CanonicalHero {
        CanonicalHero {
            name: name.to_string(),
            role: vec!["Fighter".into()],
            tier: crate::types::Tier::parse("S"),
            counters: Vec::new(),
            builds: Vec::new(),
            emblems: Vec::new(),
            patch_changes: Vec::new(),
            sources: vec!["fandom".into()],
            last_updated: Utc::now(),
        }
    }

    fn metadata(total: usize) -> ScrapeMetadata {
        ScrapeMetadata::new(Utc::now(), total, BTreeMap::new())
    }

    #[tokio::test]
    async fn persist_then_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonFileSink::new(dir.path());

        let heroes = vec![canonical("Chou"), canonical("Luo Yi")];
        sink.persist(&heroes, &metadata(2)).await.unwrap();

        assert_eq!(sink.list_heroes().await.unwrap(), heroes);
        assert_eq!(
            sink.get_hero("luo-yi").await.unwrap().as_ref(),
            Some(&heroes[1])
        );
        assert_eq!(sink.metadata().await.unwrap().unwrap().total_heroes, 2);
    }

    #[tokio::test]
    async fn unknown_slug_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonFileSink::new(dir.path());
        sink.persist(&[canonical("Chou")], &metadata(1)).await.unwrap();

        assert!(sink.get_hero("fanny").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn reads_before_first_persist_are_empty() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonFileSink::new(dir.path().join("data"));

        assert!(sink.list_heroes().await.unwrap().is_empty());
        assert!(sink.metadata().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn persist_is_idempotent_and_leaves_no_staging_residue() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonFileSink::new(dir.path());

        let heroes = vec![canonical("Chou")];
        let meta = metadata(1);
        sink.persist(&heroes, &meta).await.unwrap();
        let first = tokio::fs::read(dir.path().join("heroes.json")).await.unwrap();

        sink.persist(&heroes, &meta).await.unwrap();
        let second = tokio::fs::read(dir.path().join("heroes.json")).await.unwrap();
        assert_eq!(first, second);

        let mut entries = tokio::fs::read_dir(dir.path()).await.unwrap();
        while let Some(entry) = entries.next_entry().await.unwrap() {
            let name = entry.file_name();
            assert!(
                !name.to_string_lossy().ends_with(".tmp"),
                "staging file left behind: {name:?}"
            );
        }
    }

    #[tokio::test]
    async fn empty_canonical_set_still_persists() {
        let dir = tempfile::tempdir().unwrap();
        let sink = JsonFileSink::new(dir.path());

        sink.persist(&[canonical("Chou")], &metadata(1)).await.unwrap();
        sink.persist(&[], &metadata(0)).await.unwrap();

        assert!(sink.list_heroes().await.unwrap().is_empty());
        assert_eq!(sink.metadata().await.unwrap().unwrap().total_heroes, 0);
    }
}
