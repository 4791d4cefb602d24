//! Notification channel interface

use async_trait::async_trait;
use crate::shared::errors::NotifierError;
use super::NotificationRequest;

/// One delivery channel for price drop alerts
#[async_trait]
pub trait Notifier: Send + Sync {
    /// Channel name used in logs and errors
    fn name(&self) -> &str;

    /// Acquire channel resources (credentials, connections)
    async fn start(&self) -> Result<(), NotifierError>;

    /// Release channel resources
    async fn stop(&self) -> Result<(), NotifierError>;

    /// Render and deliver one alert
    async fn notify(&self, request: &NotificationRequest) -> Result<(), NotifierError>;
}
