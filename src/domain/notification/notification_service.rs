//! Fan-out of price drop alerts to every registered notifier

use std::fmt;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, error, info};

use crate::shared::errors::{NotificationError, NotifierError};
use crate::shared::types::DeliveryPolicy;
use super::{NotificationRequest, Notifier};

/// Lifecycle of the notification service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceState {
    Stopped,
    Starting,
    Running,
    Stopping,
}

impl fmt::Display for ServiceState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = match self {
            ServiceState::Stopped => "stopped",
            ServiceState::Starting => "starting",
            ServiceState::Running => "running",
            ServiceState::Stopping => "stopping",
        };
        f.write_str(state)
    }
}

/// Holds the notifiers registered at startup and drives them in registration order.
///
/// `start()` must complete before `notify()` is called.
pub struct NotificationService {
    notifiers: Vec<Arc<dyn Notifier>>,
    policy: DeliveryPolicy,
    state: RwLock<ServiceState>,
}

impl NotificationService {
    pub fn new(notifiers: Vec<Arc<dyn Notifier>>, policy: DeliveryPolicy) -> Self {
        Self {
            notifiers,
            policy,
            state: RwLock::new(ServiceState::Stopped),
        }
    }

    pub async fn state(&self) -> ServiceState {
        *self.state.read().await
    }

    pub fn policy(&self) -> DeliveryPolicy {
        self.policy
    }

    pub fn notifier_count(&self) -> usize {
        self.notifiers.len()
    }

    /// Start every notifier in order.
    ///
    /// The first failure is returned and later notifiers are not started.
    /// The service then stays `Stopped`.
    pub async fn start(&self) -> Result<(), NotificationError> {
        self.transition("start", ServiceState::Stopped, ServiceState::Starting)
            .await?;
        info!("Starting {} notifier(s)", self.notifiers.len());

        for notifier in &self.notifiers {
            if let Err(source) = notifier.start().await {
                let err = Self::notifier_error(notifier.as_ref(), source);
                error!("❌ {}", err);
                *self.state.write().await = ServiceState::Stopped;
                return Err(err);
            }
            info!("Notifier \"{}\" started", notifier.name());
        }

        *self.state.write().await = ServiceState::Running;
        info!("✅ Notification service started");
        Ok(())
    }

    /// Deliver one alert to every notifier in order
    pub async fn notify(&self, request: &NotificationRequest) -> Result<(), NotificationError> {
        let state = self.state().await;
        if state != ServiceState::Running {
            error!("notify() called while the notification service is {}", state);
            return Err(NotificationError::NotRunning(state.to_string()));
        }

        let mut first_error = None;
        for notifier in &self.notifiers {
            match notifier.notify(request).await {
                Ok(()) => debug!(
                    "Notifier \"{}\" delivered {} alert for {}",
                    notifier.name(),
                    request.platform,
                    request.game_title
                ),
                Err(source) => {
                    let err = Self::notifier_error(notifier.as_ref(), source);
                    error!("❌ {}", err);
                    match self.policy {
                        DeliveryPolicy::HaltOnError => return Err(err),
                        DeliveryPolicy::ContinueOnError => {
                            first_error.get_or_insert(err);
                        }
                    }
                }
            }
        }

        first_error.map_or(Ok(()), Err)
    }

    /// Stop every notifier in order. The service ends up `Stopped` either way.
    pub async fn stop(&self) -> Result<(), NotificationError> {
        if self.state().await == ServiceState::Stopped {
            debug!("Notification service already stopped");
            return Ok(());
        }
        self.transition("stop", ServiceState::Running, ServiceState::Stopping)
            .await?;
        info!("Stopping notification service");

        let mut first_error = None;
        for notifier in &self.notifiers {
            match notifier.stop().await {
                Ok(()) => info!("Notifier \"{}\" stopped", notifier.name()),
                Err(source) => {
                    let err = Self::notifier_error(notifier.as_ref(), source);
                    error!("❌ {}", err);
                    first_error.get_or_insert(err);
                    if self.policy == DeliveryPolicy::HaltOnError {
                        break;
                    }
                }
            }
        }

        *self.state.write().await = ServiceState::Stopped;
        match first_error {
            Some(err) => Err(err),
            None => {
                info!("✅ Notification service stopped");
                Ok(())
            }
        }
    }

    async fn transition(
        &self,
        action: &'static str,
        from: ServiceState,
        to: ServiceState,
    ) -> Result<(), NotificationError> {
        let mut state = self.state.write().await;
        if *state != from {
            return Err(NotificationError::InvalidState {
                action,
                state: state.to_string(),
            });
        }
        *state = to;
        Ok(())
    }

    fn notifier_error(notifier: &dyn Notifier, source: NotifierError) -> NotificationError {
        NotificationError::Notifier {
            name: notifier.name().to_string(),
            source,
        }
    }
}
