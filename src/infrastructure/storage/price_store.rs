//! Price snapshot store with optional JSON file persistence

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::domain::price::{PriceSnapshot, PriceSnapshotRepository, StorefrontPrices};
use crate::shared::errors::RepositoryError;
use crate::shared::utils::generate_id;

type History = HashMap<String, Vec<PriceSnapshot>>;

/// Snapshot history per game, oldest first.
///
/// Writes hold the lock for the whole insert, including the file write, so
/// snapshots of one game are recorded one at a time.
pub struct InMemoryPriceStore {
    history: RwLock<History>,
    file: Option<PathBuf>,
}

impl InMemoryPriceStore {
    pub fn new() -> Self {
        Self {
            history: RwLock::new(HashMap::new()),
            file: None,
        }
    }

    /// Store backed by a JSON file. Existing history is loaded.
    pub fn with_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let path = path.as_ref().to_path_buf();
        let history: History = if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            serde_json::from_str(&content)?
        } else {
            HashMap::new()
        };
        info!(
            "Loaded price history for {} game(s) from {}",
            history.len(),
            path.display()
        );

        Ok(Self {
            history: RwLock::new(history),
            file: Some(path),
        })
    }

    /// Every snapshot of a game, oldest first
    pub async fn history(&self, game_id: &str) -> Vec<PriceSnapshot> {
        self.history
            .read()
            .await
            .get(game_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Write to a sibling temp file, then rename it over the history file
    async fn persist(&self, history: &History) -> Result<(), RepositoryError> {
        let Some(path) = &self.file else {
            return Ok(());
        };
        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        let content = serde_json::to_vec_pretty(history)?;
        tokio::fs::write(&tmp, content).await?;
        if let Err(e) = tokio::fs::rename(&tmp, path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        debug!("Price history written to {}", path.display());
        Ok(())
    }
}

impl Default for InMemoryPriceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PriceSnapshotRepository for InMemoryPriceStore {
    async fn latest(&self, game_id: &str) -> Result<Option<PriceSnapshot>, RepositoryError> {
        Ok(self
            .history
            .read()
            .await
            .get(game_id)
            .and_then(|snapshots| snapshots.last().cloned()))
    }

    async fn insert(&self, game_id: &str, prices: &StorefrontPrices) -> Result<(), RepositoryError> {
        let mut history = self.history.write().await;
        history
            .entry(game_id.to_string())
            .or_default()
            .push(PriceSnapshot {
                id: generate_id(),
                game_id: game_id.to_string(),
                steam_price: prices.steam,
                nuuvem_price: prices.nuuvem,
                green_man_gaming_price: prices.green_man_gaming,
                recorded_at: Utc::now(),
            });

        // Memory only keeps what the file has
        if let Err(e) = self.persist(&history).await {
            if let Some(snapshots) = history.get_mut(game_id) {
                snapshots.pop();
                if snapshots.is_empty() {
                    history.remove(game_id);
                }
            }
            return Err(e);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_latest_returns_most_recent_snapshot() {
        let store = InMemoryPriceStore::new();
        assert!(store.latest("g1").await.unwrap().is_none());

        store
            .insert("g1", &StorefrontPrices::new(50.0, None, None))
            .await
            .unwrap();
        store
            .insert("g1", &StorefrontPrices::new(40.0, Some(35.0), None))
            .await
            .unwrap();
        store
            .insert("g2", &StorefrontPrices::new(10.0, None, None))
            .await
            .unwrap();

        let latest = store.latest("g1").await.unwrap().unwrap();
        assert_eq!(latest.steam_price, 40.0);
        assert_eq!(latest.nuuvem_price, Some(35.0));
        assert_eq!(store.history("g1").await.len(), 2);
    }

    #[tokio::test]
    async fn test_snapshots_are_new_records() {
        let store = InMemoryPriceStore::new();
        let prices = StorefrontPrices::new(50.0, None, None);
        store.insert("g1", &prices).await.unwrap();
        store.insert("g1", &prices).await.unwrap();

        let history = store.history("g1").await;
        assert_eq!(history.len(), 2);
        assert_ne!(history[0].id, history[1].id);
    }

    #[tokio::test]
    async fn test_history_survives_reload_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshots.json");

        let store = InMemoryPriceStore::with_file(&path).unwrap();
        store
            .insert("g1", &StorefrontPrices::new(19.99, None, Some(17.5)))
            .await
            .unwrap();
        drop(store);

        let reloaded = InMemoryPriceStore::with_file(&path).unwrap();
        let latest = reloaded.latest("g1").await.unwrap().unwrap();
        assert_eq!(latest.steam_price, 19.99);
        assert_eq!(latest.green_man_gaming_price, Some(17.5));
        assert!(!dir.path().join("snapshots.json.tmp").exists());
    }

    #[tokio::test]
    async fn test_failed_write_leaves_memory_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshots.json");

        let store = InMemoryPriceStore::with_file(&path).unwrap();
        store
            .insert("g1", &StorefrontPrices::new(60.0, None, None))
            .await
            .unwrap();

        // A directory in place of the file makes the rename fail
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        let result = store
            .insert("g1", &StorefrontPrices::new(50.0, None, None))
            .await;
        assert!(result.is_err());
        assert_eq!(store.latest("g1").await.unwrap().unwrap().steam_price, 60.0);
        assert_eq!(store.history("g1").await.len(), 1);

        let result = store
            .insert("g2", &StorefrontPrices::new(10.0, None, None))
            .await;
        assert!(result.is_err());
        assert!(store.latest("g2").await.unwrap().is_none());
        assert!(!dir.path().join("snapshots.json.tmp").exists());
    }
}
