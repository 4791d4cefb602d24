//! In-process notification dispatch queue

mod channel_queue;

pub use channel_queue::{ChannelNotificationQueue, NotificationWorker, WorkerStats};
