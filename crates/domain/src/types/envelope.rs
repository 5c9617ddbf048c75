//! The backend response envelope
//!
//! Every endpoint except the "current user" one answers with
//! `{ statusCode, error, message, data }`. The backend is loose about the
//! types of `error` (boolean, `null`, or a reason phrase such as
//! `"Bad Request"`) and `message` (usually a string, occasionally a JSON
//! value), so both are normalized while decoding.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Decoded response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T = Value> {
    pub status_code: u16,
    #[serde(default, deserialize_with = "lenient_flag")]
    pub error: bool,
    #[serde(default, deserialize_with = "lenient_text")]
    pub message: String,
    #[serde(default)]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// `true` when the envelope reports success under the given status set
    pub fn is_success(&self, success_codes: &[u16]) -> bool {
        !self.error && success_codes.contains(&self.status_code)
    }

    /// `true` when the envelope itself reports an authentication failure
    pub const fn is_auth_failure(&self) -> bool {
        matches!(self.status_code, 401 | 403)
    }
}

impl Envelope<Value> {
    /// Build a success envelope; mostly useful for tests and fixtures
    pub fn ok(data: Value) -> Self {
        Self { status_code: 200, error: false, message: "ok".into(), data: Some(data) }
    }

    /// Build a failure envelope
    pub fn failure(status_code: u16, message: impl Into<String>) -> Self {
        Self { status_code, error: true, message: message.into(), data: None }
    }
}

fn lenient_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(flag)) => flag,
        Some(Value::String(reason)) => !reason.trim().is_empty(),
        Some(Value::Number(n)) => n.as_f64().is_some_and(|n| n != 0.0),
        Some(_) => true,
    })
}

fn lenient_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(text)) => text,
        Some(other) => other.to_string(),
    })
}
