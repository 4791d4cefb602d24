//! Game lookup interface

use async_trait::async_trait;
use crate::shared::errors::RepositoryError;
use crate::shared::types::Game;

#[async_trait]
pub trait GameRepository: Send + Sync {
    async fn find_by_id(&self, game_id: &str) -> Result<Option<Game>, RepositoryError>;

    /// All tracked games, ordered by title
    async fn list(&self) -> Result<Vec<Game>, RepositoryError>;
}
