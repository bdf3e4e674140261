use tracing::{debug, warn};

use crate::{
    consts::{ACTION_DISMISS, ACTION_DISMISS_LABEL, ACTION_VIEW_DETAILS, ACTION_VIEW_DETAILS_LABEL},
    host::NotificationHost,
    model::InteractionEvent,
};

/// Application views the worker can ask the host to open. Concrete routes
/// live in the settings, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Destination {
    /// Critical alerts view, opened with its section parameter set.
    CriticalAlerts,
    /// Default landing view.
    Landing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Navigate(Destination),
    NoOp,
}

/// Actions declared on every critical alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeclaredAction {
    ViewDetails,
    Dismiss,
}

impl DeclaredAction {
    pub fn parse(action: &str) -> Option<Self> {
        match action {
            ACTION_VIEW_DETAILS => Some(Self::ViewDetails),
            ACTION_DISMISS => Some(Self::Dismiss),
            _ => None,
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ViewDetails => ACTION_VIEW_DETAILS,
            Self::Dismiss => ACTION_DISMISS,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ViewDetails => ACTION_VIEW_DETAILS_LABEL,
            Self::Dismiss => ACTION_DISMISS_LABEL,
        }
    }
}

/// Body clicks, empty strings and unknown actions all land on the default view.
pub fn route(action: Option<&str>) -> Outcome {
    match action.and_then(DeclaredAction::parse) {
        Some(DeclaredAction::ViewDetails) => Outcome::Navigate(Destination::CriticalAlerts),
        Some(DeclaredAction::Dismiss) => Outcome::NoOp,
        None => Outcome::Navigate(Destination::Landing),
    }
}

/// Closes the originating notification, then carries out the routed outcome.
///
/// Close and navigation failures belong to the host; they are logged and the
/// outcome is still returned.
pub async fn handle_interaction<H>(host: &H, event: &InteractionEvent) -> Outcome
where
    H: NotificationHost + ?Sized,
{
    if let Err(error) = host.close_notification(&event.notification).await {
        warn!(%error, tag = %event.notification.tag, "failed to close notification");
    }

    let outcome = route(event.action.as_deref());
    debug!(action = ?event.action, ?outcome, "routed notification interaction");

    if let Outcome::Navigate(destination) = outcome {
        if let Err(error) = host.open_view(destination).await {
            warn!(%error, ?destination, "failed to open view");
        }
    }
    outcome
}
