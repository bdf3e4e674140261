use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    consts::{
        DEFAULT_BADGE, DEFAULT_CRITICAL_ALERTS_ROUTE, DEFAULT_ICON, DEFAULT_LANDING_ROUTE,
        DEFAULT_LOG_FILTER, DEFAULT_MAX_CONCURRENT_EVENTS, MAX_CONCURRENT_EVENTS,
        SETTINGS_PATH_ENV,
    },
    error::{Result, WorkerError},
    routing::Destination,
};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct WorkerSettings {
    pub icon: String,
    pub badge: String,
    pub critical_alerts_route: String,
    pub landing_route: String,
    pub max_concurrent_events: usize,
    pub log_filter: String,
}

impl Default for WorkerSettings {
    fn default() -> Self {
        Self {
            icon: DEFAULT_ICON.to_string(),
            badge: DEFAULT_BADGE.to_string(),
            critical_alerts_route: DEFAULT_CRITICAL_ALERTS_ROUTE.to_string(),
            landing_route: DEFAULT_LANDING_ROUTE.to_string(),
            max_concurrent_events: DEFAULT_MAX_CONCURRENT_EVENTS,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl WorkerSettings {
    pub fn route_for(&self, destination: Destination) -> &str {
        match destination {
            Destination::CriticalAlerts => &self.critical_alerts_route,
            Destination::Landing => &self.landing_route,
        }
    }
}

pub fn settings_path_from_env() -> Option<PathBuf> {
    std::env::var_os(SETTINGS_PATH_ENV)
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

/// Reads settings from `path`. A missing path or file yields the defaults.
pub fn read_settings(path: Option<&Path>) -> Result<WorkerSettings> {
    let Some(path) = path else {
        return Ok(WorkerSettings::default());
    };
    if !path.exists() {
        return Ok(WorkerSettings::default());
    }

    let content = fs::read_to_string(path)
        .map_err(|error| WorkerError::Config(format!("failed to read settings: {error}")))?;
    parse_settings(&content)
}

pub fn parse_settings(content: &str) -> Result<WorkerSettings> {
    let stored = serde_json::from_str::<WorkerSettings>(content)
        .map_err(|error| WorkerError::Config(format!("failed to parse settings: {error}")))?;
    normalize_settings(stored)
}

fn normalize_settings(stored: WorkerSettings) -> Result<WorkerSettings> {
    let log_filter = stored.log_filter.trim();
    Ok(WorkerSettings {
        icon: stored.icon.trim().to_string(),
        badge: stored.badge.trim().to_string(),
        critical_alerts_route: normalize_route(&stored.critical_alerts_route)?,
        landing_route: normalize_route(&stored.landing_route)?,
        max_concurrent_events: stored.max_concurrent_events.clamp(1, MAX_CONCURRENT_EVENTS),
        log_filter: if log_filter.is_empty() {
            DEFAULT_LOG_FILTER.to_string()
        } else {
            log_filter.to_string()
        },
    })
}

pub fn normalize_route(input: &str) -> Result<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(WorkerError::Config("route is required".to_string()));
    }
    if !trimmed.starts_with('/') {
        return Err(WorkerError::Config(format!(
            "route must be app-relative and start with '/': {trimmed:?}"
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let settings = parse_settings(r#"{"landing_route": " /home "}"#).unwrap();
        assert_eq!(settings.landing_route, "/home");
        assert_eq!(settings.critical_alerts_route, DEFAULT_CRITICAL_ALERTS_ROUTE);
        assert_eq!(settings.icon, DEFAULT_ICON);
        assert_eq!(settings.max_concurrent_events, DEFAULT_MAX_CONCURRENT_EVENTS);
    }

    #[test]
    fn rejects_routes_outside_the_app() {
        let err = parse_settings(r#"{"critical_alerts_route": "https://example.com/alerts"}"#)
            .unwrap_err();
        assert!(matches!(err, WorkerError::Config(_)));
        assert!(normalize_route("   ").is_err());
    }

    #[test]
    fn clamps_concurrency_and_blank_filter() {
        let settings = parse_settings(r#"{"max_concurrent_events": 0, "log_filter": " "}"#).unwrap();
        assert_eq!(settings.max_concurrent_events, 1);
        assert_eq!(settings.log_filter, DEFAULT_LOG_FILTER);

        let settings = parse_settings(r#"{"max_concurrent_events": 1000}"#).unwrap();
        assert_eq!(settings.max_concurrent_events, MAX_CONCURRENT_EVENTS);
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join("critical-alert-worker-no-such-settings.json");
        assert_eq!(read_settings(Some(&path)).unwrap(), WorkerSettings::default());
        assert_eq!(read_settings(None).unwrap(), WorkerSettings::default());
    }

    #[test]
    fn resolves_destinations_to_routes() {
        let settings = WorkerSettings::default();
        assert_eq!(
            settings.route_for(Destination::CriticalAlerts),
            DEFAULT_CRITICAL_ALERTS_ROUTE
        );
        assert_eq!(settings.route_for(Destination::Landing), "/");
    }
}
