//! Log-only delivery channel

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::info;

use crate::domain::notification::{NotificationRequest, Notifier};
use crate::shared::errors::NotifierError;
use crate::shared::utils::CurrencyFormat;

/// Writes alerts to the application log
pub struct ConsoleNotifier {
    currency: CurrencyFormat,
    started: AtomicBool,
}

impl ConsoleNotifier {
    pub fn new(currency: CurrencyFormat) -> Self {
        Self {
            currency,
            started: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl Notifier for ConsoleNotifier {
    fn name(&self) -> &str {
        "console"
    }

    async fn start(&self) -> Result<(), NotifierError> {
        self.started.store(true, Ordering::SeqCst);
        Ok(())
    }

    async fn stop(&self) -> Result<(), NotifierError> {
        self.started.store(false, Ordering::SeqCst);
        Ok(())
    }

    async fn notify(&self, request: &NotificationRequest) -> Result<(), NotifierError> {
        if !self.started.load(Ordering::SeqCst) {
            return Err(NotifierError::NotStarted);
        }
        info!("⚠️ {}", request.summary(&self.currency).replace('\n', " | "));
        Ok(())
    }
}
