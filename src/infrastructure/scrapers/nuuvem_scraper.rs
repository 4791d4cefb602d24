//! Nuuvem item page scraper

use async_trait::async_trait;

use crate::domain::price::StorefrontScraper;
use crate::infrastructure::http::HttpClient;
use crate::shared::errors::ScrapeError;
use super::HtmlPriceExtractor;

const PRICE_PATTERN: &str = r#"(?s)class="[^"]*product-price--val[^"]*"[^>]*>(.*?)</span>"#;
const REMOVE_PATTERNS: &[&str] = &[
    r#"(?s)<[a-z]+[^>]*class="[^"]*product-price--old[^"]*"[^>]*>.*?</[a-z]+>"#,
    r#"(?s)<[a-z]+[^>]*class="[^"]*currency-symbol[^"]*"[^>]*>.*?</[a-z]+>"#,
];
const UNAVAILABLE: &[&str] = &["Unavailable", "Indisponível"];

pub struct NuuvemScraper {
    http: HttpClient,
    extractor: HtmlPriceExtractor,
}

impl NuuvemScraper {
    pub fn new(http: HttpClient) -> Result<Self, regex::Error> {
        Ok(Self {
            http,
            extractor: HtmlPriceExtractor::new(
                "NuuvemScraper",
                PRICE_PATTERN,
                REMOVE_PATTERNS,
                UNAVAILABLE,
            )?,
        })
    }

    pub fn extractor(&self) -> &HtmlPriceExtractor {
        &self.extractor
    }
}

#[async_trait]
impl StorefrontScraper for NuuvemScraper {
    async fn scrape(&self, url: &str) -> Result<Option<f64>, ScrapeError> {
        let page = self.http.get_text(url).await?;
        Ok(self.extractor.extract(&page, url))
    }
}
