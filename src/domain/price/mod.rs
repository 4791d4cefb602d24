//! Price domain - storefront price monitoring and drop detection

mod price_comparator;
mod price_feed;
mod price_monitor;
mod price_repository;

pub use price_comparator::{find_price_drop, lowest_price};
pub use price_feed::StorefrontScraper;
pub use price_monitor::{CycleOutcome, PriceMonitorJob, StorefrontScrapers};
pub use price_repository::PriceSnapshotRepository;

use crate::shared::types::Storefront;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Prices of one game across every storefront.
///
/// Steam is mandatory; the other storefronts are `None` when the game is
/// not listed there or its price could not be scraped.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StorefrontPrices {
    pub steam: f64,
    pub nuuvem: Option<f64>,
    pub green_man_gaming: Option<f64>,
}

impl StorefrontPrices {
    pub fn new(steam: f64, nuuvem: Option<f64>, green_man_gaming: Option<f64>) -> Self {
        Self {
            steam,
            nuuvem,
            green_man_gaming,
        }
    }

    /// Price on the given storefront
    pub fn get(&self, storefront: Storefront) -> Option<f64> {
        match storefront {
            Storefront::Steam => Some(self.steam),
            Storefront::Nuuvem => self.nuuvem,
            Storefront::GreenManGaming => self.green_man_gaming,
        }
    }
}

/// Immutable record of a game's prices at one point in time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    pub id: String,
    pub game_id: String,
    pub steam_price: f64,
    pub nuuvem_price: Option<f64>,
    pub green_man_gaming_price: Option<f64>,
    pub recorded_at: DateTime<Utc>,
}

impl PriceSnapshot {
    pub fn prices(&self) -> StorefrontPrices {
        StorefrontPrices::new(
            self.steam_price,
            self.nuuvem_price,
            self.green_man_gaming_price,
        )
    }
}

/// Input of one monitoring cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeGamePrice {
    pub game_id: String,
    pub steam_url: String,
    pub nuuvem_url: Option<String>,
    pub green_man_gaming_url: Option<String>,
}

impl From<&crate::shared::types::Game> for ScrapeGamePrice {
    fn from(game: &crate::shared::types::Game) -> Self {
        Self {
            game_id: game.id.clone(),
            steam_url: game.steam_url.clone(),
            nuuvem_url: game.nuuvem_url.clone(),
            green_man_gaming_url: game.green_man_gaming_url.clone(),
        }
    }
}
