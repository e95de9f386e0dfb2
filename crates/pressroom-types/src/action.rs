//! Builder action request and result shapes.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Body of `POST /api`: an action name plus its free-form payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActionRequest {
    pub action: String,
    #[serde(default)]
    pub data: Value,
}

/// Non-streaming result of a builder action.
///
/// `body` is returned to the caller verbatim. `status` and `tags` are read
/// out of the body when it is an object carrying them.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionResult {
    pub status: u16,
    pub body: Value,
    pub tags: Vec<String>,
}

impl ActionResult {
    /// A 200 result with no tags.
    pub fn ok(body: Value) -> Self {
        Self {
            status: 200,
            body,
            tags: Vec::new(),
        }
    }

    /// Build a result from an action's JSON output.
    ///
    /// - `status`: numeric `status` field in `200..=599`, else 200
    /// - `tags`: string items of a `tags` array, else empty
    pub fn from_value(body: Value) -> Self {
        let status = declared_status(&body).unwrap_or(200);
        let tags = body
            .get("tags")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        Self { status, body, tags }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn has_tags(&self) -> bool {
        !self.tags.is_empty()
    }
}

/// The `status` field of a JSON object, when it is a final HTTP status code.
///
/// Informational codes are excluded: a JSON body cannot travel with a 1xx.
pub fn declared_status(body: &Value) -> Option<u16> {
    body.get("status")
        .and_then(Value::as_u64)
        .filter(|s| (200..=599).contains(s))
        .map(|s| s as u16)
}
