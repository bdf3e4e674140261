use serde::{de::DeserializeOwned, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::routing::DeclaredAction;

/// Push payload as delivered by the messaging provider. Every field is optional,
/// and a field of the wrong shape is treated as absent.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct PushPayloadWire {
    #[serde(default, deserialize_with = "lenient_object")]
    pub notification: Option<PushNotificationWire>,
    #[serde(default, deserialize_with = "lenient_object")]
    pub data: Option<PushDataWire>,
}

#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
pub struct PushNotificationWire {
    #[serde(default, deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub body: Option<String>,
}

/// Known keys of the payload's `data` map. Anything else the sender adds is ignored.
#[derive(Debug, Default, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushDataWire {
    #[serde(default, deserialize_with = "lenient_string")]
    pub error_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub severity: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub session_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub exercise_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub timestamp: Option<String>,
}

/// Strings pass through, numbers and booleans keep their JSON text, anything
/// else (null, arrays, objects) is absent.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(value) => Some(value),
        Value::Number(value) => Some(value.to_string()),
        Value::Bool(value) => Some(value.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    })
}

/// A nested object that does not decode is absent rather than an error.
fn lenient_object<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// `null` or a non-object payload decodes to an empty one.
pub(crate) fn lenient_payload<'de, D>(deserializer: D) -> Result<PushPayloadWire, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_object(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AlertMetadata {
    pub error_type: String,
    pub severity: String,
    pub session_id: String,
    pub exercise_type: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NotificationAction {
    pub action: &'static str,
    pub title: &'static str,
}

impl NotificationAction {
    pub const fn declared(action: DeclaredAction) -> Self {
        Self {
            action: action.as_str(),
            title: action.label(),
        }
    }
}

pub const DECLARED_ACTIONS: [NotificationAction; 2] = [
    NotificationAction::declared(DeclaredAction::ViewDetails),
    NotificationAction::declared(DeclaredAction::Dismiss),
];

/// Fully defaulted notification handed to the host's display primitive.
///
/// Serializes to the host's notification-options shape, so field names on the
/// wire differ from the Rust names (`tag`, `requireInteraction`, `data`, ...).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationDescriptor {
    pub title: String,
    pub body: String,
    #[serde(rename = "icon")]
    pub icon_ref: String,
    #[serde(rename = "badge")]
    pub badge_ref: String,
    #[serde(rename = "tag")]
    pub group_tag: &'static str,
    #[serde(rename = "requireInteraction")]
    pub require_ack: bool,
    #[serde(rename = "data")]
    pub metadata: AlertMetadata,
    pub actions: [NotificationAction; 2],
}

/// Reference to a notification the host is currently displaying.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayedNotification {
    #[serde(default)]
    pub tag: String,
    #[serde(default, rename = "data", deserialize_with = "lenient_object")]
    pub metadata: Option<AlertMetadata>,
}

/// User interaction with a displayed notification. `action` is absent (or
/// empty) when the body itself was clicked.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InteractionEvent {
    #[serde(default)]
    pub action: Option<String>,
    pub notification: DisplayedNotification,
}
