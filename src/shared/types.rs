//! Common types used across the application

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::shared::utils::CurrencyFormat;

/// Storefronts a game price is tracked on.
///
/// Declaration order is the tie-break priority used when more than one
/// storefront qualifies for a drop notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Storefront {
    Steam,
    Nuuvem,
    GreenManGaming,
}

impl Storefront {
    /// All storefronts in priority order
    pub const ALL: [Storefront; 3] = [
        Storefront::Steam,
        Storefront::Nuuvem,
        Storefront::GreenManGaming,
    ];

    /// Get display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Storefront::Steam => "Steam",
            Storefront::Nuuvem => "Nuuvem",
            Storefront::GreenManGaming => "GreenManGaming",
        }
    }
}

impl fmt::Display for Storefront {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tracked game and its storefront pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    pub title: String,
    pub steam_url: String,
    pub nuuvem_url: Option<String>,
    pub green_man_gaming_url: Option<String>,
}

impl Game {
    /// Storefront page URL, if the game is listed there
    pub fn url_for(&self, storefront: Storefront) -> Option<&str> {
        match storefront {
            Storefront::Steam => Some(self.steam_url.as_str()),
            Storefront::Nuuvem => self.nuuvem_url.as_deref(),
            Storefront::GreenManGaming => self.green_man_gaming_url.as_deref(),
        }
    }
}

/// What to do when one notifier fails during a fan-out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeliveryPolicy {
    /// Propagate the first failure and skip the remaining notifiers
    #[default]
    HaltOnError,
    /// Attempt every notifier, then report the first failure
    ContinueOnError,
}

/// Monitoring loop configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorConfig {
    pub interval_secs: u64,
    pub max_concurrent_cycles: usize,
    pub delivery_policy: DeliveryPolicy,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            interval_secs: 3600,
            max_concurrent_cycles: 4,
            delivery_policy: DeliveryPolicy::HaltOnError,
        }
    }
}

/// HTTP client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) gamedeal/0.2".to_string(),
        }
    }
}

/// Telegram bot configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    #[serde(default)]
    pub bot_token: Option<String>,
    #[serde(default)]
    pub chat_id: Option<i64>,
    #[serde(default = "default_telegram_api_url")]
    pub api_url: String,
}

fn default_telegram_api_url() -> String {
    "https://api.telegram.org".to_string()
}

/// Log-only notifier configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConsoleConfig {
    pub enabled: bool,
}

/// Snapshot storage configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub snapshot_file: Option<String>,
}

/// A game entry in the configuration catalogue
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameEntry {
    #[serde(default)]
    pub id: Option<String>,
    pub title: String,
    pub steam_url: String,
    #[serde(default)]
    pub nuuvem_url: Option<String>,
    #[serde(default)]
    pub green_man_gaming_url: Option<String>,
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub log_level: String,
    pub monitor: MonitorConfig,
    pub http: HttpConfig,
    pub currency: CurrencyFormat,
    pub telegram: Option<TelegramConfig>,
    pub console: ConsoleConfig,
    pub storage: StorageConfig,
    pub games: Vec<GameEntry>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            monitor: MonitorConfig::default(),
            http: HttpConfig::default(),
            currency: CurrencyFormat::default(),
            telegram: None,
            console: ConsoleConfig { enabled: true },
            storage: StorageConfig::default(),
            games: Vec::new(),
        }
    }
}
