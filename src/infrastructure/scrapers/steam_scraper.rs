//! Steam store page scraper

use async_trait::async_trait;

use crate::domain::price::StorefrontScraper;
use crate::infrastructure::http::HttpClient;
use crate::shared::errors::ScrapeError;
use super::HtmlPriceExtractor;

// Discounted games show `discount_final_price`, others `game_purchase_price`
const PRICE_PATTERN: &str =
    r#"(?s)class="(?:discount_final_price|game_purchase_price price)"[^>]*>(.*?)</div>"#;
const UNAVAILABLE: &[&str] = &["Free", "Free to Play", "Gratuito", "Gratuito para jogar"];

pub struct SteamScraper {
    http: HttpClient,
    extractor: HtmlPriceExtractor,
}

impl SteamScraper {
    pub fn new(http: HttpClient) -> Result<Self, regex::Error> {
        Ok(Self {
            http,
            extractor: HtmlPriceExtractor::new("SteamScraper", PRICE_PATTERN, &[], UNAVAILABLE)?,
        })
    }

    pub fn extractor(&self) -> &HtmlPriceExtractor {
        &self.extractor
    }
}

#[async_trait]
impl StorefrontScraper for SteamScraper {
    async fn scrape(&self, url: &str) -> Result<Option<f64>, ScrapeError> {
        let page = self.http.get_text(url).await?;
        Ok(self.extractor.extract(&page, url))
    }
}
