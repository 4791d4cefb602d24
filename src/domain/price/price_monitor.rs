//! Per-game price monitoring cycle

use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::game::GameRepository;
use crate::domain::notification::{NotificationQueue, NotificationRequest};
use crate::shared::errors::MonitorError;
use crate::shared::types::Storefront;
use super::{
    find_price_drop, PriceSnapshotRepository, ScrapeGamePrice, StorefrontPrices,
    StorefrontScraper,
};

/// One scraper per storefront
#[derive(Clone)]
pub struct StorefrontScrapers {
    pub steam: Arc<dyn StorefrontScraper>,
    pub nuuvem: Arc<dyn StorefrontScraper>,
    pub green_man_gaming: Arc<dyn StorefrontScraper>,
}

/// How a cycle ended when it did not fail
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// Steam had no price; nothing was recorded
    SteamUnavailable,
    /// First observation of the game; snapshot recorded, nothing to compare
    FirstSnapshot,
    /// Snapshot recorded but the game record is gone
    GameNotFound,
    /// Snapshot recorded, no storefront dropped
    NoDrop,
    /// Snapshot recorded and one alert enqueued
    Notified(Storefront),
}

impl fmt::Display for CycleOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CycleOutcome::SteamUnavailable => f.write_str("steam price unavailable"),
            CycleOutcome::FirstSnapshot => f.write_str("first snapshot recorded"),
            CycleOutcome::GameNotFound => f.write_str("game not found"),
            CycleOutcome::NoDrop => f.write_str("no price drop"),
            CycleOutcome::Notified(storefront) => write!(f, "price drop on {}", storefront),
        }
    }
}

/// Scrapes every storefront for a game, records the snapshot and enqueues at
/// most one drop alert
pub struct PriceMonitorJob {
    scrapers: StorefrontScrapers,
    snapshots: Arc<dyn PriceSnapshotRepository>,
    games: Arc<dyn GameRepository>,
    queue: Arc<dyn NotificationQueue>,
}

impl PriceMonitorJob {
    pub fn new(
        scrapers: StorefrontScrapers,
        snapshots: Arc<dyn PriceSnapshotRepository>,
        games: Arc<dyn GameRepository>,
        queue: Arc<dyn NotificationQueue>,
    ) -> Self {
        Self {
            scrapers,
            snapshots,
            games,
            queue,
        }
    }

    /// Run one monitoring cycle.
    ///
    /// Scraper transport errors abort the cycle before anything is written.
    pub async fn monitor(&self, request: &ScrapeGamePrice) -> Result<CycleOutcome, MonitorError> {
        let Some(steam) = self.scrapers.steam.scrape(&request.steam_url).await? else {
            warn!("No Steam price for game {}, skipping cycle", request.game_id);
            return Ok(CycleOutcome::SteamUnavailable);
        };

        let nuuvem = match &request.nuuvem_url {
            Some(url) => self.scrapers.nuuvem.scrape(url).await?,
            None => None,
        };
        let green_man_gaming = match &request.green_man_gaming_url {
            Some(url) => self.scrapers.green_man_gaming.scrape(url).await?,
            None => None,
        };
        let current = StorefrontPrices::new(steam, nuuvem, green_man_gaming);
        debug!("Game {} current prices: {:?}", request.game_id, current);

        let previous = self.snapshots.latest(&request.game_id).await?;
        self.snapshots.insert(&request.game_id, &current).await?;

        let Some(previous) = previous else {
            info!("First price snapshot recorded for game {}", request.game_id);
            return Ok(CycleOutcome::FirstSnapshot);
        };

        let Some(game) = self.games.find_by_id(&request.game_id).await? else {
            warn!("Game {} not found, skipping drop check", request.game_id);
            return Ok(CycleOutcome::GameNotFound);
        };

        let previous = previous.prices();
        let Some(storefront) = find_price_drop(&previous, &current) else {
            return Ok(CycleOutcome::NoDrop);
        };

        // The comparator only names a storefront with both prices known
        let (Some(current_price), Some(old_price)) =
            (current.get(storefront), previous.get(storefront))
        else {
            return Ok(CycleOutcome::NoDrop);
        };
        let game_url = game
            .url_for(storefront)
            .or_else(|| Self::requested_url(request, storefront))
            .unwrap_or_default()
            .to_string();

        info!(
            "📉 {} dropped on {}: {:.2} -> {:.2}",
            game.title, storefront, old_price, current_price
        );
        self.queue
            .enqueue(NotificationRequest {
                game_title: game.title,
                platform: storefront,
                game_url,
                current_price,
                old_price,
            })
            .await?;

        Ok(CycleOutcome::Notified(storefront))
    }

    fn requested_url(request: &ScrapeGamePrice, storefront: Storefront) -> Option<&str> {
        match storefront {
            Storefront::Steam => Some(request.steam_url.as_str()),
            Storefront::Nuuvem => request.nuuvem_url.as_deref(),
            Storefront::GreenManGaming => request.green_man_gaming_url.as_deref(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::price::PriceSnapshot;
    use crate::shared::errors::{QueueError, RepositoryError, ScrapeError};
    use crate::shared::types::Game;
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::Mutex;

    enum Scripted {
        Price(Option<f64>),
        Transport,
    }

    struct FakeScraper {
        result: Scripted,
        calls: Mutex<Vec<String>>,
    }

    impl FakeScraper {
        fn price(price: Option<f64>) -> Arc<Self> {
            Arc::new(Self {
                result: Scripted::Price(price),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn broken() -> Arc<Self> {
            Arc::new(Self {
                result: Scripted::Transport,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl StorefrontScraper for FakeScraper {
        async fn scrape(&self, url: &str) -> Result<Option<f64>, ScrapeError> {
            self.calls.lock().unwrap().push(url.to_string());
            match self.result {
                Scripted::Price(price) => Ok(price),
                Scripted::Transport => Err(ScrapeError::Transport {
                    url: url.to_string(),
                    message: "connection reset".to_string(),
                }),
            }
        }
    }

    #[derive(Default)]
    struct FakeSnapshots {
        previous: Option<StorefrontPrices>,
        inserted: Mutex<Vec<StorefrontPrices>>,
    }

    #[async_trait]
    impl PriceSnapshotRepository for FakeSnapshots {
        async fn latest(&self, game_id: &str) -> Result<Option<PriceSnapshot>, RepositoryError> {
            Ok(self.previous.map(|p| PriceSnapshot {
                id: "snap-1".to_string(),
                game_id: game_id.to_string(),
                steam_price: p.steam,
                nuuvem_price: p.nuuvem,
                green_man_gaming_price: p.green_man_gaming,
                recorded_at: Utc::now(),
            }))
        }

        async fn insert(&self, _game_id: &str, prices: &StorefrontPrices) -> Result<(), RepositoryError> {
            self.inserted.lock().unwrap().push(*prices);
            Ok(())
        }
    }

    struct FakeGames(Option<Game>);

    #[async_trait]
    impl GameRepository for FakeGames {
        async fn find_by_id(&self, _game_id: &str) -> Result<Option<Game>, RepositoryError> {
            Ok(self.0.clone())
        }

        async fn list(&self) -> Result<Vec<Game>, RepositoryError> {
            Ok(self.0.iter().cloned().collect())
        }
    }

    #[derive(Default)]
    struct FakeQueue(Mutex<Vec<NotificationRequest>>);

    #[async_trait]
    impl NotificationQueue for FakeQueue {
        async fn enqueue(&self, request: NotificationRequest) -> Result<(), QueueError> {
            self.0.lock().unwrap().push(request);
            Ok(())
        }
    }

    fn game() -> Game {
        Game {
            id: "game-1".to_string(),
            title: "Hollow Knight".to_string(),
            steam_url: "https://store.steampowered.com/app/367520/Hollow_Knight/".to_string(),
            nuuvem_url: Some("https://www.nuuvem.com/br-en/item/hollow-knight".to_string()),
            green_man_gaming_url: None,
        }
    }

    struct Harness {
        steam: Arc<FakeScraper>,
        nuuvem: Arc<FakeScraper>,
        gmg: Arc<FakeScraper>,
        snapshots: Arc<FakeSnapshots>,
        queue: Arc<FakeQueue>,
        job: PriceMonitorJob,
    }

    fn harness(
        steam: Arc<FakeScraper>,
        nuuvem: Arc<FakeScraper>,
        previous: Option<StorefrontPrices>,
        game: Option<Game>,
    ) -> Harness {
        let gmg = FakeScraper::price(None);
        let snapshots = Arc::new(FakeSnapshots {
            previous,
            ..Default::default()
        });
        let queue = Arc::new(FakeQueue::default());
        let job = PriceMonitorJob::new(
            StorefrontScrapers {
                steam: steam.clone(),
                nuuvem: nuuvem.clone(),
                green_man_gaming: gmg.clone(),
            },
            snapshots.clone(),
            Arc::new(FakeGames(game)),
            queue.clone(),
        );
        Harness {
            steam,
            nuuvem,
            gmg,
            snapshots,
            queue,
            job,
        }
    }

    fn request() -> ScrapeGamePrice {
        ScrapeGamePrice::from(&game())
    }

    #[tokio::test]
    async fn test_steam_drop_enqueues_one_alert() {
        let h = harness(
            FakeScraper::price(Some(40.0)),
            FakeScraper::price(None),
            Some(StorefrontPrices::new(50.0, None, None)),
            Some(game()),
        );

        let outcome = h.job.monitor(&request()).await.unwrap();
        assert_eq!(outcome, CycleOutcome::Notified(Storefront::Steam));

        let queued = h.queue.0.lock().unwrap();
        assert_eq!(queued.len(), 1);
        assert_eq!(queued[0].platform, Storefront::Steam);
        assert_eq!(queued[0].current_price, 40.0);
        assert_eq!(queued[0].old_price, 50.0);
        assert_eq!(queued[0].game_title, "Hollow Knight");
        assert_eq!(queued[0].game_url, game().steam_url);
        assert_eq!(h.snapshots.inserted.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_nuuvem_drop_uses_nuuvem_prices_and_url() {
        let h = harness(
            FakeScraper::price(Some(50.0)),
            FakeScraper::price(Some(30.0)),
            Some(StorefrontPrices::new(50.0, Some(45.0), None)),
            Some(game()),
        );

        let outcome = h.job.monitor(&request()).await.unwrap();
        assert_eq!(outcome, CycleOutcome::Notified(Storefront::Nuuvem));

        let queued = h.queue.0.lock().unwrap();
        assert_eq!(queued.len(), 1);
        assert_eq!(queued[0].current_price, 30.0);
        assert_eq!(queued[0].old_price, 45.0);
        assert_eq!(queued[0].game_url, "https://www.nuuvem.com/br-en/item/hollow-knight");
    }

    #[tokio::test]
    async fn test_nuuvem_without_history_does_not_notify() {
        let h = harness(
            FakeScraper::price(Some(50.0)),
            FakeScraper::price(Some(20.0)),
            Some(StorefrontPrices::new(50.0, None, None)),
            Some(game()),
        );

        let outcome = h.job.monitor(&request()).await.unwrap();
        assert_eq!(outcome, CycleOutcome::NoDrop);
        assert!(h.queue.0.lock().unwrap().is_empty());
        assert_eq!(
            *h.snapshots.inserted.lock().unwrap(),
            vec![StorefrontPrices::new(50.0, Some(20.0), None)]
        );
    }

    #[tokio::test]
    async fn test_first_snapshot_is_recorded_without_comparison() {
        let h = harness(
            FakeScraper::price(Some(50.0)),
            FakeScraper::price(Some(45.0)),
            None,
            Some(game()),
        );

        let outcome = h.job.monitor(&request()).await.unwrap();
        assert_eq!(outcome, CycleOutcome::FirstSnapshot);
        assert_eq!(h.snapshots.inserted.lock().unwrap().len(), 1);
        assert!(h.queue.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_steam_price_aborts_cycle() {
        let h = harness(
            FakeScraper::price(None),
            FakeScraper::price(Some(10.0)),
            Some(StorefrontPrices::new(50.0, Some(45.0), None)),
            Some(game()),
        );

        let outcome = h.job.monitor(&request()).await.unwrap();
        assert_eq!(outcome, CycleOutcome::SteamUnavailable);
        assert!(h.snapshots.inserted.lock().unwrap().is_empty());
        assert!(h.queue.0.lock().unwrap().is_empty());
        assert_eq!(h.nuuvem.call_count(), 0);
    }

    #[tokio::test]
    async fn test_transport_error_aborts_without_writes() {
        let h = harness(
            FakeScraper::price(Some(40.0)),
            FakeScraper::broken(),
            Some(StorefrontPrices::new(50.0, None, None)),
            Some(game()),
        );

        let result = h.job.monitor(&request()).await;
        assert!(matches!(result, Err(MonitorError::Scrape(_))));
        assert!(h.snapshots.inserted.lock().unwrap().is_empty());
        assert!(h.queue.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_game_records_snapshot_without_alert() {
        let h = harness(
            FakeScraper::price(Some(10.0)),
            FakeScraper::price(None),
            Some(StorefrontPrices::new(50.0, None, None)),
            None,
        );

        let outcome = h.job.monitor(&request()).await.unwrap();
        assert_eq!(outcome, CycleOutcome::GameNotFound);
        assert_eq!(h.snapshots.inserted.lock().unwrap().len(), 1);
        assert!(h.queue.0.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_absent_urls_are_not_scraped() {
        let h = harness(
            FakeScraper::price(Some(50.0)),
            FakeScraper::price(Some(45.0)),
            Some(StorefrontPrices::new(50.0, None, None)),
            Some(game()),
        );
        let mut request = request();
        request.nuuvem_url = None;

        h.job.monitor(&request).await.unwrap();
        assert_eq!(h.steam.call_count(), 1);
        assert_eq!(h.nuuvem.call_count(), 0);
        assert_eq!(h.gmg.call_count(), 0);
        assert_eq!(
            *h.snapshots.inserted.lock().unwrap(),
            vec![StorefrontPrices::new(50.0, None, None)]
        );
    }
}
