// src/app.rs
use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::time::Duration;
use tracing::{error, info, warn};

use crate::application::services::MonitorService;
use crate::domain::game::GameValidator;
use crate::domain::notification::{NotificationService, Notifier};
use crate::domain::price::{PriceMonitorJob, StorefrontScrapers};
use crate::infrastructure::{
    ChannelNotificationQueue, ConsoleNotifier, GreenManGamingScraper, HttpClient,
    InMemoryGameRepository, InMemoryPriceStore, NotificationWorker, NuuvemScraper,
    SteamScraper, TelegramNotifier,
};
use crate::shared::types::{AppConfig, Game};

/// Wired application components
pub struct App {
    pub config: AppConfig,
    pub http: HttpClient,
    pub games: Arc<InMemoryGameRepository>,
    pub snapshots: Arc<InMemoryPriceStore>,
    pub notifications: Arc<NotificationService>,
}

impl App {
    pub async fn build(config: AppConfig) -> Result<Self> {
        let http = HttpClient::new(&config.http).context("build HTTP client")?;
        let games = Arc::new(
            InMemoryGameRepository::from_games(load_catalogue(&config)?)
                .await
                .context("register games")?,
        );
        let snapshots = Arc::new(match &config.storage.snapshot_file {
            Some(path) => InMemoryPriceStore::with_file(path)
                .with_context(|| format!("load price history from {}", path))?,
            None => InMemoryPriceStore::new(),
        });
        let notifications = Arc::new(NotificationService::new(
            build_notifiers(&config, &http),
            config.monitor.delivery_policy,
        ));

        Ok(Self {
            config,
            http,
            games,
            snapshots,
            notifications,
        })
    }

    pub fn scrapers(&self) -> Result<StorefrontScrapers> {
        Ok(StorefrontScrapers {
            steam: Arc::new(SteamScraper::new(self.http.clone())?),
            nuuvem: Arc::new(NuuvemScraper::new(self.http.clone())?),
            green_man_gaming: Arc::new(GreenManGamingScraper::new(self.http.clone())?),
        })
    }

    /// Start notifiers, monitor prices until Ctrl-C (or for a single round), then shut down
    pub async fn run(self, once: bool) -> Result<()> {
        info!("Starting gamedeal price monitor");
        self.notifications
            .start()
            .await
            .context("start notification service")?;

        let (queue, receiver) = ChannelNotificationQueue::channel();
        let worker = tokio::spawn(NotificationWorker::new(receiver, self.notifications.clone()).run());

        let job = PriceMonitorJob::new(
            self.scrapers()?,
            self.snapshots.clone(),
            self.games.clone(),
            Arc::new(queue),
        );
        let monitor = MonitorService::new(
            Arc::new(job),
            self.games.clone(),
            self.config.monitor.max_concurrent_cycles,
        );

        if once {
            monitor.run_once().await;
        } else {
            let period = Duration::from_secs(self.config.monitor.interval_secs.max(1));
            info!("Checking prices every {}s", period.as_secs());
            monitor.run_until(period, shutdown_signal()).await;
        }

        // Dropping the job closes the queue so the worker can drain and exit
        drop(monitor);
        match worker.await {
            Ok(stats) => info!("{} alert(s) delivered, {} failed", stats.delivered, stats.failed),
            Err(e) => error!("Notification worker panicked: {}", e),
        }

        self.notifications
            .stop()
            .await
            .context("stop notification service")?;
        Ok(())
    }
}

/// Validate the configured catalogue
pub fn load_catalogue(config: &AppConfig) -> Result<Vec<Game>> {
    let validator = GameValidator::new()?;
    let games = config
        .games
        .iter()
        .map(|entry| validator.validate(entry))
        .collect::<Result<Vec<_>, _>>()?;
    if games.is_empty() {
        warn!("No games configured");
    }
    Ok(games)
}

fn build_notifiers(config: &AppConfig, http: &HttpClient) -> Vec<Arc<dyn Notifier>> {
    let mut notifiers: Vec<Arc<dyn Notifier>> = Vec::new();
    if config.console.enabled {
        notifiers.push(Arc::new(ConsoleNotifier::new(config.currency.clone())));
    }
    if let Some(telegram) = &config.telegram {
        notifiers.push(Arc::new(TelegramNotifier::new(
            http.client().clone(),
            telegram.clone(),
            config.currency.clone(),
        )));
    }
    if notifiers.is_empty() {
        warn!("No notifiers configured, price drops will only be recorded");
    }
    notifiers
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
