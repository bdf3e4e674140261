use std::fmt;

use tracing::{info, warn};

use crate::{
    error::{Result, WorkerError},
    host::LifecycleHost,
};

/// Phase a lifecycle hook leaves the worker in once it completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    Installed,
    Activated,
}

impl fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LifecyclePhase::Installed => write!(f, "installed"),
            LifecyclePhase::Activated => write!(f, "activated"),
        }
    }
}

/// Requests activation right away instead of waiting for old clients to close.
pub async fn on_install<H>(host: &H) -> Result<LifecyclePhase>
where
    H: LifecycleHost + ?Sized,
{
    host.skip_waiting().await.map_err(|error| lifecycle_failure("install", error))?;
    info!(phase = %LifecyclePhase::Installed, "worker lifecycle transition complete");
    Ok(LifecyclePhase::Installed)
}

/// Takes control of already-open application instances.
pub async fn on_activate<H>(host: &H) -> Result<LifecyclePhase>
where
    H: LifecycleHost + ?Sized,
{
    host.claim_clients().await.map_err(|error| lifecycle_failure("activate", error))?;
    info!(phase = %LifecyclePhase::Activated, "worker lifecycle transition complete");
    Ok(LifecyclePhase::Activated)
}

fn lifecycle_failure(transition: &str, error: WorkerError) -> WorkerError {
    warn!(transition, %error, "worker lifecycle transition failed");
    match error {
        WorkerError::Lifecycle(_) => error,
        other => WorkerError::Lifecycle(format!("{transition}: {other}")),
    }
}
