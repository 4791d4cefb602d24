//! Price extraction from storefront HTML

use regex::Regex;
use tracing::{error, warn};

use crate::shared::utils::parse_price;

/// Pulls a price out of a product page.
///
/// `remove` patterns are stripped from the page first (old prices, currency
/// symbols), then capture group 1 of `price` is read, tags are stripped and the
/// text is checked against the unavailable markers before being parsed.
pub struct HtmlPriceExtractor {
    source: &'static str,
    price: Regex,
    remove: Vec<Regex>,
    tags: Regex,
    unavailable: &'static [&'static str],
}

impl HtmlPriceExtractor {
    pub fn new(
        source: &'static str,
        price_pattern: &str,
        remove_patterns: &[&str],
        unavailable: &'static [&'static str],
    ) -> Result<Self, regex::Error> {
        let remove = remove_patterns
            .iter()
            .map(|p| Regex::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            source,
            price: Regex::new(price_pattern)?,
            remove,
            tags: Regex::new(r"<[^>]*>")?,
            unavailable,
        })
    }

    /// Price on the page, or `None` when missing, unavailable or unparseable
    pub fn extract(&self, html: &str, url: &str) -> Option<f64> {
        let mut page = html.to_string();
        for pattern in &self.remove {
            page = pattern.replace_all(&page, "").into_owned();
        }

        let Some(fragment) = self.price.captures(&page).and_then(|c| c.get(1)) else {
            error!("[{}] no price found for \"{}\"", self.source, url);
            return None;
        };
        let text = self.tags.replace_all(fragment.as_str(), "");
        let text = text.split_whitespace().collect::<Vec<_>>().join(" ");

        if self
            .unavailable
            .iter()
            .any(|marker| text.eq_ignore_ascii_case(marker))
        {
            warn!("[{}] the game \"{}\" is unavailable", self.source, url);
            return None;
        }

        let price = parse_price(&text);
        if price.is_none() {
            error!("[{}] error parsing the price \"{}\" of \"{}\"", self.source, text, url);
        }
        price
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> HtmlPriceExtractor {
        HtmlPriceExtractor::new(
            "Test",
            r#"(?s)class="price"[^>]*>(.*?)</div>"#,
            &[r#"(?s)<s class="old">.*?</s>"#],
            &["Unavailable"],
        )
        .unwrap()
    }

    #[test]
    fn test_extracts_price_after_removals() {
        let html = r#"<div class="price"><s class="old">R$ 99,90</s> <b>R$ 49,90</b></div>"#;
        assert_eq!(extractor().extract(html, "u"), Some(49.90));
    }

    #[test]
    fn test_missing_selector() {
        assert_eq!(extractor().extract("<div>nothing</div>", "u"), None);
    }

    #[test]
    fn test_unavailable_marker() {
        let html = r#"<div class="price"> unavailable </div>"#;
        assert_eq!(extractor().extract(html, "u"), None);
    }

    #[test]
    fn test_unparseable_price() {
        let html = r#"<div class="price">soon</div>"#;
        assert_eq!(extractor().extract(html, "u"), None);
    }
}
