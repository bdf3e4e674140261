use async_trait::async_trait;
use tracing::info;

use crate::error::{Result, WorkerError};
use crate::model::{DisplayedNotification, NotificationDescriptor};
use crate::routing::Destination;
use crate::settings::WorkerSettings;

/// Notification capabilities of the host the worker runs in.
#[async_trait]
pub trait NotificationHost: Send + Sync {
    async fn show_notification(&self, descriptor: &NotificationDescriptor) -> Result<()>;

    async fn close_notification(&self, notification: &DisplayedNotification) -> Result<()>;

    /// Opens (or focuses) the application at a symbolic destination.
    async fn open_view(&self, destination: Destination) -> Result<()>;
}

/// Worker lifecycle capabilities of the host.
#[async_trait]
pub trait LifecycleHost: Send + Sync {
    /// Activate immediately instead of waiting for existing clients to close.
    async fn skip_waiting(&self) -> Result<()>;

    /// Take control of already-open application instances.
    async fn claim_clients(&self) -> Result<()>;
}

/// Host used by the replay binary: resolves destinations against the
/// configured routes and logs each request instead of touching a real display.
pub struct LoggingHost {
    settings: WorkerSettings,
}

impl LoggingHost {
    pub fn new(settings: WorkerSettings) -> Self {
        Self { settings }
    }
}

#[async_trait]
impl NotificationHost for LoggingHost {
    async fn show_notification(&self, descriptor: &NotificationDescriptor) -> Result<()> {
        let options = serde_json::to_string(descriptor)
            .map_err(|error| WorkerError::Display(format!("unserializable descriptor: {error}")))?;
        info!(tag = descriptor.group_tag, %options, "show notification");
        Ok(())
    }

    async fn close_notification(&self, notification: &DisplayedNotification) -> Result<()> {
        let session_id = notification
            .metadata
            .as_ref()
            .map(|metadata| metadata.session_id.as_str())
            .unwrap_or_default();
        info!(tag = %notification.tag, session_id, "close notification");
        Ok(())
    }

    async fn open_view(&self, destination: Destination) -> Result<()> {
        let route = self.settings.route_for(destination);
        info!(?destination, route, "open view");
        Ok(())
    }
}

#[async_trait]
impl LifecycleHost for LoggingHost {
    async fn skip_waiting(&self) -> Result<()> {
        info!("skip waiting");
        Ok(())
    }

    async fn claim_clients(&self) -> Result<()> {
        info!("claim clients");
        Ok(())
    }
}
