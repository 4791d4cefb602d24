//! Error handling for the application

use thiserror::Error;

/// Scraper-related errors
///
/// Only transport problems end up here. A page without a usable price is
/// reported as `Ok(None)` by the scrapers, never as an error.
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Request to {url} failed: {message}")]
    Transport { url: String, message: String },

    #[error("Request to {url} returned status {status}")]
    Status { url: String, status: u16 },
}

/// Persistence-related errors
#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Game already registered: {0}")]
    DuplicateGame(String),
}

/// Notification queue errors
#[derive(Error, Debug, Clone)]
pub enum QueueError {
    #[error("Notification queue is closed")]
    Closed,
}

/// Errors raised by a single notification channel
#[derive(Error, Debug)]
pub enum NotifierError {
    #[error("Notifier is not configured: {0}")]
    NotConfigured(String),

    #[error("Notifier was not started")]
    NotStarted,

    #[error("Authentication failed: {0}")]
    Auth(String),

    #[error("Delivery failed: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for NotifierError {
    fn from(err: reqwest::Error) -> Self {
        NotifierError::Transport(err.to_string())
    }
}

/// Notification fan-out errors
#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Notification service is not running (state: {0})")]
    NotRunning(String),

    #[error("Notification service cannot {action} while {state}")]
    InvalidState { action: &'static str, state: String },

    #[error("Notifier \"{name}\" failed: {source}")]
    Notifier {
        name: String,
        #[source]
        source: NotifierError,
    },
}

/// Errors that abort a single monitoring cycle
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Scrape failed: {0}")]
    Scrape(#[from] ScrapeError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),
}

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Read(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid game \"{title}\": {reason}")]
    InvalidGame { title: String, reason: String },
}

/// General application error
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Notification error: {0}")]
    Notification(#[from] NotificationError),

    #[error("Monitor error: {0}")]
    Monitor(#[from] MonitorError),
}
