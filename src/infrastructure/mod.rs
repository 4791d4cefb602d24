//! Infrastructure layer - HTTP, scrapers, storage, queue and notification channels

pub mod http;
pub mod notifiers;
pub mod queue;
pub mod scrapers;
pub mod storage;

pub use http::HttpClient;
pub use notifiers::{ConsoleNotifier, TelegramNotifier};
pub use queue::{ChannelNotificationQueue, NotificationWorker, WorkerStats};
pub use scrapers::{GreenManGamingScraper, NuuvemScraper, SteamScraper};
pub use storage::{InMemoryGameRepository, InMemoryPriceStore};
