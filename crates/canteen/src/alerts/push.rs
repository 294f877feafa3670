//! Payload of a push message announcing a ready order.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

pub const DEFAULT_TITLE: &str = "Order ready";
pub const DEFAULT_BODY: &str = "Your order is ready for pickup";
pub const DEFAULT_ICON: &str = "/icon-192.png";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PushPayload {
    pub title: String,
    pub body: String,
    pub icon: String,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MalformedPayload {
    #[error("Push payload is not JSON: {0}")]
    NotJson(String),
    #[error("Push payload is not a JSON object")]
    NotAnObject,
    #[error("Push payload field `{0}` is not a string")]
    NotAString(&'static str),
}

impl Default for PushPayload {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            body: DEFAULT_BODY.to_string(),
            icon: DEFAULT_ICON.to_string(),
        }
    }
}

impl PushPayload {
    /// Parses a push message. An empty message and missing or empty fields take the defaults;
    /// anything that is not an object of optional strings is rejected.
    pub fn parse(raw: &str) -> Result<Self, MalformedPayload> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        let value: Value =
            serde_json::from_str(raw).map_err(|e| MalformedPayload::NotJson(e.to_string()))?;
        let Value::Object(fields) = value else {
            return Err(MalformedPayload::NotAnObject);
        };

        let field = |name: &'static str, default: &str| -> Result<String, MalformedPayload> {
            match fields.get(name) {
                None | Some(Value::Null) => Ok(default.to_string()),
                Some(Value::String(s)) if s.is_empty() => Ok(default.to_string()),
                Some(Value::String(s)) => Ok(s.clone()),
                Some(_) => Err(MalformedPayload::NotAString(name)),
            }
        };
        Ok(Self {
            title: field("title", DEFAULT_TITLE)?,
            body: field("body", DEFAULT_BODY)?,
            icon: field("icon", DEFAULT_ICON)?,
        })
    }

    /// The notification shown for an order of `venue_name` going ready.
    pub fn order_ready(venue_name: &str) -> Self {
        Self {
            body: format!("{DEFAULT_BODY} at {venue_name}"),
            ..Self::default()
        }
    }
}
