//! gamedeal - game price tracker
//! Scrapes storefront prices, records snapshots and alerts on price drops

pub mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod shared;

// Re-export main types for convenience
pub use domain::notification::{NotificationService, Notifier};
pub use domain::price::{find_price_drop, PriceMonitorJob};
pub use shared::types::{Game, Storefront};
