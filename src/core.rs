use chrono::{DateTime, SecondsFormat, Utc};
use tracing_subscriber::EnvFilter;

/// ISO-8601 in UTC with millisecond precision, e.g. `2026-03-14T07:30:05.000Z`.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

pub(crate) fn truncate_message(input: &str, max_chars: usize) -> String {
    if input.chars().count() <= max_chars {
        return input.to_string();
    }

    let truncated: String = input.chars().take(max_chars).collect();
    format!("{truncated}...")
}

/// Installs the fmt subscriber. `RUST_LOG` wins over `default_filter`.
pub fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn timestamp_matches_browser_iso_format() {
        let at = Utc.with_ymd_and_hms(2026, 10, 16, 9, 14, 0).unwrap();
        assert_eq!(iso_timestamp(at), "2026-10-16T09:14:00.000Z");
    }

    #[test]
    fn truncates_on_char_boundaries() {
        assert_eq!(truncate_message("squat", 10), "squat");
        assert_eq!(truncate_message("ünïcödé", 3), "ünï...");
    }
}
