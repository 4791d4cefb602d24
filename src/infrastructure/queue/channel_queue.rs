//! mpsc-backed notification queue and the worker draining it

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{error, info};

use crate::domain::notification::{NotificationQueue, NotificationRequest, NotificationService};
use crate::shared::errors::QueueError;

/// Producer side of the queue. The worker stops once every clone is dropped.
#[derive(Clone)]
pub struct ChannelNotificationQueue {
    sender: UnboundedSender<NotificationRequest>,
}

impl ChannelNotificationQueue {
    pub fn channel() -> (Self, UnboundedReceiver<NotificationRequest>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

#[async_trait]
impl NotificationQueue for ChannelNotificationQueue {
    async fn enqueue(&self, request: NotificationRequest) -> Result<(), QueueError> {
        self.sender.send(request).map_err(|_| QueueError::Closed)
    }
}

/// Delivery counters of a finished worker
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorkerStats {
    pub delivered: u64,
    pub failed: u64,
}

/// Consumer side: hands every queued request to the notification service
pub struct NotificationWorker {
    receiver: UnboundedReceiver<NotificationRequest>,
    service: Arc<NotificationService>,
}

impl NotificationWorker {
    pub fn new(
        receiver: UnboundedReceiver<NotificationRequest>,
        service: Arc<NotificationService>,
    ) -> Self {
        Self { receiver, service }
    }

    /// Drain the queue until it is closed
    pub async fn run(mut self) -> WorkerStats {
        let mut stats = WorkerStats::default();
        while let Some(request) = self.receiver.recv().await {
            match self.service.notify(&request).await {
                Ok(()) => {
                    stats.delivered += 1;
                    info!(
                        "🔔 Price drop alert sent: {} on {}",
                        request.game_title, request.platform
                    );
                }
                Err(e) => {
                    stats.failed += 1;
                    error!(
                        "❌ Failed to deliver alert for {} on {}: {}",
                        request.game_title, request.platform, e
                    );
                }
            }
        }
        info!(
            "Notification worker finished ({} delivered, {} failed)",
            stats.delivered, stats.failed
        );
        stats
    }
}
