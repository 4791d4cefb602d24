//! Storefront scrapers

mod green_man_gaming_scraper;
mod html_price;
mod nuuvem_scraper;
mod steam_scraper;

pub use green_man_gaming_scraper::GreenManGamingScraper;
pub use html_price::HtmlPriceExtractor;
pub use nuuvem_scraper::NuuvemScraper;
pub use steam_scraper::SteamScraper;
