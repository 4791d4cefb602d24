//! Notification dispatch queue interface

use async_trait::async_trait;
use crate::shared::errors::QueueError;
use super::NotificationRequest;

/// Decouples alert production from delivery
#[async_trait]
pub trait NotificationQueue: Send + Sync {
    async fn enqueue(&self, request: NotificationRequest) -> Result<(), QueueError>;
}
