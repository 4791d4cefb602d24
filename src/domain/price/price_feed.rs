//! Storefront price feed interface

use async_trait::async_trait;
use crate::shared::errors::ScrapeError;

/// Fetches the current price of a game from one storefront
#[async_trait]
pub trait StorefrontScraper: Send + Sync {
    /// Current price shown on the product page.
    ///
    /// Returns `Ok(None)` when the page has no price, the game is marked
    /// unavailable or the price cannot be parsed. `Err` is reserved for
    /// transport failures.
    async fn scrape(&self, url: &str) -> Result<Option<f64>, ScrapeError>;
}
