//! Application services and use cases

use futures::future::join_all;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::time::{interval, Duration, MissedTickBehavior};
use tracing::{error, info};

use crate::domain::game::GameRepository;
use crate::domain::price::{CycleOutcome, PriceMonitorJob, ScrapeGamePrice};
use crate::shared::errors::{AppError, MonitorError};

/// Result of one game's cycle within a round
#[derive(Debug)]
pub struct CycleReport {
    pub game_id: String,
    pub title: String,
    pub result: Result<CycleOutcome, MonitorError>,
}

/// Summary of a monitoring round
#[derive(Debug, Default)]
pub struct RoundReport {
    pub cycles: Vec<CycleReport>,
}

impl RoundReport {
    pub fn notified(&self) -> usize {
        self.cycles
            .iter()
            .filter(|c| matches!(c.result, Ok(CycleOutcome::Notified(_))))
            .count()
    }

    pub fn failed(&self) -> usize {
        self.cycles.iter().filter(|c| c.result.is_err()).count()
    }
}

/// Runs the price monitor job for every tracked game
pub struct MonitorService {
    job: Arc<PriceMonitorJob>,
    games: Arc<dyn GameRepository>,
    max_concurrent_cycles: usize,
}

impl MonitorService {
    pub fn new(
        job: Arc<PriceMonitorJob>,
        games: Arc<dyn GameRepository>,
        max_concurrent_cycles: usize,
    ) -> Self {
        Self {
            job,
            games,
            max_concurrent_cycles: max_concurrent_cycles.max(1),
        }
    }

    /// Run one cycle per game. A failed cycle is logged and does not affect the others.
    pub async fn run_round(&self) -> Result<RoundReport, AppError> {
        let games = self.games.list().await?;
        info!("🔄 Checking prices of {} game(s)", games.len());

        let permits = Semaphore::new(self.max_concurrent_cycles);
        let cycles = games.into_iter().map(|game| {
            let permits = &permits;
            async move {
                let _permit = permits.acquire().await.ok();
                let result = self.job.monitor(&ScrapeGamePrice::from(&game)).await;
                match &result {
                    Ok(outcome) => info!("[{}] {}", game.title, outcome),
                    Err(e) => error!("❌ [{}] cycle failed: {}", game.title, e),
                }
                CycleReport {
                    game_id: game.id,
                    title: game.title,
                    result,
                }
            }
        });

        let report = RoundReport {
            cycles: join_all(cycles).await,
        };
        info!(
            "Round finished: {} game(s), {} alert(s), {} failure(s)",
            report.cycles.len(),
            report.notified(),
            report.failed()
        );
        Ok(report)
    }

    /// Run a single round, logging a failure instead of returning it
    pub async fn run_once(&self) -> Option<RoundReport> {
        match self.run_round().await {
            Ok(report) => Some(report),
            Err(e) => {
                error!("❌ Monitoring round failed: {}", e);
                None
            }
        }
    }

    /// Run rounds every `period` until `shutdown` resolves
    pub async fn run_until<F>(&self, period: Duration, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("🛑 Stopping price monitoring");
                    break;
                }
                _ = ticker.tick() => {
                    self.run_once().await;
                }
            }
        }
    }
}
