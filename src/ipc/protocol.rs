use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::error::DecodeError;

/// Placeholder shown for any status field the backend did not report
pub const UNKNOWN_FIELD: &str = "?";

/// Message sent from the launcher to the backend, one JSON object per line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum OutboundMessage {
    /// Greeting sent once right after connecting
    Hello { client: String },
    /// Ask the backend for the current power and network status
    GetStatus,
    /// Ask the backend to start an application
    LaunchApp {
        #[serde(rename = "appId")]
        app_id: String,
        origin: String,
    },
}

impl OutboundMessage {
    pub fn hello(client: impl Into<String>) -> Self {
        Self::Hello {
            client: client.into(),
        }
    }

    pub fn launch_app(app_id: impl Into<String>, origin: impl Into<String>) -> Self {
        Self::LaunchApp {
            app_id: app_id.into(),
            origin: origin.into(),
        }
    }

    /// Wire tag of this message
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Hello { .. } => "hello",
            Self::GetStatus => "get-status",
            Self::LaunchApp { .. } => "launch-app",
        }
    }
}

const KNOWN_TYPES: [&str; 3] = ["hello", "get-status", "launch-app"];

/// Status reported by the backend, ready for display
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusSnapshot {
    pub battery: String,
    pub wifi: String,
}

impl Default for StatusSnapshot {
    fn default() -> Self {
        Self {
            battery: UNKNOWN_FIELD.to_string(),
            wifi: UNKNOWN_FIELD.to_string(),
        }
    }
}

impl StatusSnapshot {
    pub fn new(battery: impl Into<String>, wifi: impl Into<String>) -> Self {
        Self {
            battery: battery.into(),
            wifi: wifi.into(),
        }
    }

    /// Two-field summary shown on the status line
    pub fn display_text(&self) -> String {
        format!("\u{1F50B} {}   |   \u{1F4F6} {}", self.battery, self.wifi)
    }
}

/// Serialize a message as a single newline-terminated JSON line
pub fn encode(message: &OutboundMessage) -> Vec<u8> {
    let mut line = serde_json::to_vec(message).unwrap_or_default();
    line.push(b'\n');
    line
}

/// Decode one backend response into a snapshot.
///
/// The bytes must hold exactly one JSON object (surrounding whitespace is fine).
/// Missing fields become `"?"`, unknown fields are ignored. A tagged message
/// (one with a `type` field) is not a status reply and is rejected. A response
/// split across reads is not reassembled; it simply fails to parse.
pub fn decode(bytes: &[u8]) -> Result<StatusSnapshot, DecodeError> {
    let value: Value =
        serde_json::from_slice(bytes).map_err(|e| DecodeError::Malformed(e.to_string()))?;

    let fields = match value {
        Value::Object(fields) => fields,
        other => {
            return Err(DecodeError::Malformed(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            )));
        }
    };

    // Status replies are untagged, anything carrying `type` is a message of its own
    match fields.get("type") {
        Some(Value::String(tag)) => return Err(DecodeError::UnknownType(tag.clone())),
        Some(_) => return Err(DecodeError::Malformed("unexpected `type` field".into())),
        None => {}
    }

    Ok(StatusSnapshot {
        battery: field_text(&fields, "battery"),
        wifi: field_text(&fields, "wifi"),
    })
}

/// Parse one client request line, rejecting tags this client never sends
pub fn parse_request_line(line: &str) -> Result<OutboundMessage, DecodeError> {
    let value: Value =
        serde_json::from_str(line.trim()).map_err(|e| DecodeError::Malformed(e.to_string()))?;

    let tag = match value.get("type") {
        Some(Value::String(tag)) => tag.clone(),
        Some(_) => return Err(DecodeError::Malformed("`type` is not a string".into())),
        None => return Err(DecodeError::Malformed("missing `type` field".into())),
    };

    if !KNOWN_TYPES.contains(&tag.as_str()) {
        return Err(DecodeError::UnknownType(tag));
    }

    serde_json::from_value(value).map_err(|e| DecodeError::Malformed(e.to_string()))
}

fn field_text(fields: &Map<String, Value>, key: &str) -> String {
    match fields.get(key) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Null) | None => UNKNOWN_FIELD.to_string(),
        Some(other) => other.to_string(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
