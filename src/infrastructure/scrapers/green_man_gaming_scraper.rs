//! GreenManGaming game page scraper

use async_trait::async_trait;

use crate::domain::price::StorefrontScraper;
use crate::infrastructure::http::HttpClient;
use crate::shared::errors::ScrapeError;
use super::HtmlPriceExtractor;

const PRICE_PATTERN: &str = r#"(?s)class="[^"]*current-price[^"]*"[^>]*>(.*?)</[a-z]+>"#;
const UNAVAILABLE: &[&str] = &["Unavailable", "Out of stock", "Coming soon"];

pub struct GreenManGamingScraper {
    http: HttpClient,
    extractor: HtmlPriceExtractor,
}

impl GreenManGamingScraper {
    pub fn new(http: HttpClient) -> Result<Self, regex::Error> {
        Ok(Self {
            http,
            extractor: HtmlPriceExtractor::new(
                "GreenManGamingScraper",
                PRICE_PATTERN,
                &[],
                UNAVAILABLE,
            )?,
        })
    }

    pub fn extractor(&self) -> &HtmlPriceExtractor {
        &self.extractor
    }
}

#[async_trait]
impl StorefrontScraper for GreenManGamingScraper {
    async fn scrape(&self, url: &str) -> Result<Option<f64>, ScrapeError> {
        let page = self.http.get_text(url).await?;
        Ok(self.extractor.extract(&page, url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::types::HttpConfig;

    fn scraper() -> GreenManGamingScraper {
        GreenManGamingScraper::new(HttpClient::new(&HttpConfig::default()).unwrap()).unwrap()
    }

    #[test]
    fn test_current_price() {
        let html = r#"<div class="prices"><price class="prev-price">R$ 199,00</price>
            <price class="current-price pdp-price">R$ 1.149,50</price></div>"#;
        assert_eq!(scraper().extractor().extract(html, "gmg"), Some(1149.50));
    }

    #[test]
    fn test_out_of_stock() {
        let html = r#"<span class="current-price">Out of stock</span>"#;
        assert_eq!(scraper().extractor().extract(html, "gmg"), None);
    }
}
