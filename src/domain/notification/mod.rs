//! Notification domain - price drop alerts and their delivery channels

mod notification_queue;
mod notification_service;
mod notifier;

pub use notification_queue::NotificationQueue;
pub use notification_service::{NotificationService, ServiceState};
pub use notifier::Notifier;

use crate::shared::types::Storefront;
use crate::shared::utils::CurrencyFormat;
use serde::{Deserialize, Serialize};

/// A detected price drop, ready to be delivered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotificationRequest {
    pub game_title: String,
    pub platform: Storefront,
    pub game_url: String,
    pub current_price: f64,
    pub old_price: f64,
}

impl NotificationRequest {
    /// Plain-text alert, one field per line
    pub fn summary(&self, currency: &CurrencyFormat) -> String {
        format!(
            "Price drop: {}\nPlatform: {}\nCurrent price: {}\nPrevious price: {}\n{}",
            self.game_title,
            self.platform,
            currency.format(self.current_price),
            currency.format(self.old_price),
            self.game_url
        )
    }
}
