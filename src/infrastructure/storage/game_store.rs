//! Game catalogue store

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::game::GameRepository;
use crate::shared::errors::RepositoryError;
use crate::shared::types::Game;

pub struct InMemoryGameRepository {
    games: RwLock<Vec<Game>>,
}

impl InMemoryGameRepository {
    pub fn new() -> Self {
        Self {
            games: RwLock::new(Vec::new()),
        }
    }

    /// Build a catalogue, rejecting duplicate titles
    pub async fn from_games(games: Vec<Game>) -> Result<Self, RepositoryError> {
        let repository = Self::new();
        for game in games {
            repository.add(game).await?;
        }
        Ok(repository)
    }

    pub async fn is_game_already_inserted(&self, title: &str) -> bool {
        self.games
            .read()
            .await
            .iter()
            .any(|g| g.title.eq_ignore_ascii_case(title))
    }

    pub async fn add(&self, game: Game) -> Result<(), RepositoryError> {
        let mut games = self.games.write().await;
        if games.iter().any(|g| g.title.eq_ignore_ascii_case(&game.title)) {
            return Err(RepositoryError::DuplicateGame(game.title));
        }
        games.push(game);
        Ok(())
    }
}

impl Default for InMemoryGameRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    async fn find_by_id(&self, game_id: &str) -> Result<Option<Game>, RepositoryError> {
        Ok(self
            .games
            .read()
            .await
            .iter()
            .find(|g| g.id == game_id)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<Game>, RepositoryError> {
        let mut games = self.games.read().await.clone();
        games.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(games)
    }
}
