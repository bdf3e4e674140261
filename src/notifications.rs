use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use crate::{
    consts::{
        FALLBACK_BODY, FALLBACK_ERROR_TYPE, FALLBACK_SEVERITY, FALLBACK_TITLE, GROUP_TAG,
    },
    core::iso_timestamp,
    error::Result,
    host::NotificationHost,
    model::{AlertMetadata, NotificationDescriptor, PushDataWire, PushPayloadWire, DECLARED_ACTIONS},
    settings::WorkerSettings,
};

impl NotificationDescriptor {
    /// Builds the descriptor for one push payload. Every field has a default,
    /// so this never fails; `now` stands in for a missing `data.timestamp`.
    pub fn from_payload(
        payload: &PushPayloadWire,
        settings: &WorkerSettings,
        now: DateTime<Utc>,
    ) -> Self {
        let notification = payload.notification.clone().unwrap_or_default();
        let data = payload.data.clone().unwrap_or_default();

        Self {
            title: or_fallback(notification.title, FALLBACK_TITLE),
            body: or_fallback(notification.body, FALLBACK_BODY),
            icon_ref: settings.icon.clone(),
            badge_ref: settings.badge.clone(),
            group_tag: GROUP_TAG,
            require_ack: true,
            metadata: AlertMetadata::from_data(data, now),
            actions: DECLARED_ACTIONS,
        }
    }
}

impl AlertMetadata {
    fn from_data(data: PushDataWire, now: DateTime<Utc>) -> Self {
        Self {
            error_type: or_fallback(data.error_type, FALLBACK_ERROR_TYPE),
            severity: or_fallback(data.severity, FALLBACK_SEVERITY),
            session_id: data.session_id.unwrap_or_default(),
            exercise_type: data.exercise_type.unwrap_or_default(),
            timestamp: data.timestamp.unwrap_or_else(|| iso_timestamp(now)),
        }
    }
}

fn or_fallback(value: Option<String>, fallback: &str) -> String {
    value.unwrap_or_else(|| fallback.to_string())
}

/// Turns one background push into exactly one display request.
///
/// A host display failure is returned to the caller as-is; nothing is retried.
pub async fn dispatch_push<H>(
    host: &H,
    settings: &WorkerSettings,
    payload: &PushPayloadWire,
) -> Result<NotificationDescriptor>
where
    H: NotificationHost + ?Sized,
{
    let descriptor = NotificationDescriptor::from_payload(payload, settings, Utc::now());
    debug!(
        title = %descriptor.title,
        error_type = %descriptor.metadata.error_type,
        severity = %descriptor.metadata.severity,
        session_id = %descriptor.metadata.session_id,
        "dispatching critical alert"
    );

    if let Err(error) = host.show_notification(&descriptor).await {
        warn!(%error, tag = descriptor.group_tag, "failed to show notification");
        return Err(error);
    }
    Ok(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::PushNotificationWire;
    use chrono::TimeZone;

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 14, 7, 30, 5).unwrap()
    }

    fn payload(json: &str) -> PushPayloadWire {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn empty_payload_uses_every_fallback() {
        let descriptor =
            NotificationDescriptor::from_payload(&payload("{}"), &WorkerSettings::default(), fixed_now());

        assert_eq!(descriptor.title, "Critical Alert");
        assert_eq!(descriptor.body, "Critical error detected during workout");
        assert_eq!(
            descriptor.metadata,
            AlertMetadata {
                error_type: "unknown".to_string(),
                severity: "critical".to_string(),
                session_id: String::new(),
                exercise_type: String::new(),
                timestamp: "2026-03-14T07:30:05.000Z".to_string(),
            }
        );
        assert!(descriptor.require_ack);
        assert_eq!(descriptor.group_tag, GROUP_TAG);
    }

    #[test]
    fn present_fields_pass_through_and_missing_ones_default() {
        let descriptor = NotificationDescriptor::from_payload(
            &payload(
                r#"{"notification":{"title":"Form Error","body":"Bad squat depth"},
                    "data":{"severity":"high","sessionId":"s1"}}"#,
            ),
            &WorkerSettings::default(),
            fixed_now(),
        );

        assert_eq!(descriptor.title, "Form Error");
        assert_eq!(descriptor.body, "Bad squat depth");
        assert_eq!(descriptor.metadata.error_type, "unknown");
        assert_eq!(descriptor.metadata.severity, "high");
        assert_eq!(descriptor.metadata.session_id, "s1");
        assert_eq!(descriptor.metadata.exercise_type, "");
        assert_eq!(descriptor.metadata.timestamp, "2026-03-14T07:30:05.000Z");
    }

    #[test]
    fn title_and_body_default_independently() {
        let only_title = PushPayloadWire {
            notification: Some(PushNotificationWire {
                title: Some("Knee valgus".to_string()),
                body: None,
            }),
            data: None,
        };
        let descriptor =
            NotificationDescriptor::from_payload(&only_title, &WorkerSettings::default(), fixed_now());
        assert_eq!(descriptor.title, "Knee valgus");
        assert_eq!(descriptor.body, FALLBACK_BODY);
    }

    #[test]
    fn supplied_timestamp_and_unknown_keys() {
        let descriptor = NotificationDescriptor::from_payload(
            &payload(
                r#"{"data":{"timestamp":"2025-01-01T00:00:00Z","exerciseType":"deadlift",
                    "errorType":"form","coachNote":"ignored"}}"#,
            ),
            &WorkerSettings::default(),
            fixed_now(),
        );
        assert_eq!(descriptor.metadata.timestamp, "2025-01-01T00:00:00Z");
        assert_eq!(descriptor.metadata.exercise_type, "deadlift");
        assert_eq!(descriptor.metadata.error_type, "form");
    }

    #[test]
    fn empty_strings_count_as_present() {
        let descriptor = NotificationDescriptor::from_payload(
            &payload(r#"{"notification":{"title":""},"data":{"severity":""}}"#),
            &WorkerSettings::default(),
            fixed_now(),
        );
        assert_eq!(descriptor.title, "");
        assert_eq!(descriptor.metadata.severity, "");
    }

    #[test]
    fn serializes_to_host_notification_options() {
        let descriptor =
            NotificationDescriptor::from_payload(&payload("{}"), &WorkerSettings::default(), fixed_now());
        let value = serde_json::to_value(&descriptor).unwrap();

        assert_eq!(value["tag"], GROUP_TAG);
        assert_eq!(value["requireInteraction"], true);
        assert_eq!(value["icon"], "/icons/icon-192x192.png");
        assert_eq!(value["badge"], "/icons/badge-72x72.png");
        assert_eq!(value["data"]["errorType"], "unknown");
        assert_eq!(value["actions"][0]["action"], "view-details");
        assert_eq!(value["actions"][0]["title"], "View Details");
        assert_eq!(value["actions"][1]["action"], "dismiss");
        assert_eq!(value["actions"][1]["title"], "Dismiss");
    }
}
