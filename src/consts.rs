pub const GROUP_TAG: &str = "critical-workout-alert";

pub const FALLBACK_TITLE: &str = "Critical Alert";
pub const FALLBACK_BODY: &str = "Critical error detected during workout";
pub const FALLBACK_ERROR_TYPE: &str = "unknown";
pub const FALLBACK_SEVERITY: &str = "critical";

pub const ACTION_VIEW_DETAILS: &str = "view-details";
pub const ACTION_VIEW_DETAILS_LABEL: &str = "View Details";
pub const ACTION_DISMISS: &str = "dismiss";
pub const ACTION_DISMISS_LABEL: &str = "Dismiss";

pub(crate) const DEFAULT_ICON: &str = "/icons/icon-192x192.png";
pub(crate) const DEFAULT_BADGE: &str = "/icons/badge-72x72.png";
pub(crate) const DEFAULT_CRITICAL_ALERTS_ROUTE: &str = "/dashboard?section=critical-alerts";
pub(crate) const DEFAULT_LANDING_ROUTE: &str = "/";
pub const DEFAULT_LOG_FILTER: &str = "info";

pub(crate) const DEFAULT_MAX_CONCURRENT_EVENTS: usize = 8;
pub(crate) const MAX_CONCURRENT_EVENTS: usize = 64;

pub(crate) const SETTINGS_PATH_ENV: &str = "ALERT_WORKER_SETTINGS";
