//! Price snapshot persistence interface

use async_trait::async_trait;
use crate::shared::errors::RepositoryError;
use super::{PriceSnapshot, StorefrontPrices};

#[async_trait]
pub trait PriceSnapshotRepository: Send + Sync {
    /// Most recently recorded snapshot of a game
    async fn latest(&self, game_id: &str) -> Result<Option<PriceSnapshot>, RepositoryError>;

    /// Record a new snapshot. Existing snapshots are never updated.
    async fn insert(&self, game_id: &str, prices: &StorefrontPrices) -> Result<(), RepositoryError>;
}
