//! Notification channels

mod console_notifier;
mod telegram_notifier;

pub use console_notifier::ConsoleNotifier;
pub use telegram_notifier::TelegramNotifier;
