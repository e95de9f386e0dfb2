//! Builder action dispatch.
//!
//! Actions are named operations (`LOGIN`, `UPLOAD_ASSET`, `ASK_AI`, ...) sent
//! by the builder UI as `{ "action": NAME, "data": ... }`. Handlers are
//! registered by name in an [`ActionRegistry`]; names nobody registered are
//! routed to an optional fallback handler.

pub mod box_handler;
pub mod handler;
pub mod registry;

use std::fmt;
use std::pin::Pin;

use futures_util::Stream;

use pressroom_types::action::ActionResult;
use pressroom_types::error::ActionError;

pub use box_handler::BoxActionHandler;
pub use handler::ActionHandler;
pub use registry::ActionRegistry;

/// Stream of text chunks produced by a streaming action.
pub type TextStream = Pin<Box<dyn Stream<Item = Result<String, ActionError>> + Send + 'static>>;

/// Per-request information handed to every action handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionContext {
    /// Name of the action being run.
    pub action: String,
    /// Id of the authenticated caller.
    pub user_id: String,
}

impl ActionContext {
    pub fn new(action: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            action: action.into(),
            user_id: user_id.into(),
        }
    }
}

/// What an action produced.
pub enum ActionOutput {
    /// A JSON body with a status code and optional cache tags.
    Json(ActionResult),
    /// Plain text re-emitted to the caller chunk by chunk.
    Stream(TextStream),
}

impl ActionOutput {
    /// Shorthand for a 200 JSON result without tags.
    pub fn ok(body: serde_json::Value) -> Self {
        ActionOutput::Json(ActionResult::ok(body))
    }
}

impl fmt::Debug for ActionOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionOutput::Json(result) => f.debug_tuple("Json").field(result).finish(),
            ActionOutput::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// Read a required, non-empty string field from an action payload.
pub fn required_str<'a>(data: &'a serde_json::Value, key: &str) -> Result<&'a str, ActionError> {
    optional_str(data, key).ok_or_else(|| ActionError::InvalidPayload(format!("'{key}' is required")))
}

/// Read an optional string field from an action payload; empty strings count as absent.
pub fn optional_str<'a>(data: &'a serde_json::Value, key: &str) -> Option<&'a str> {
    data.get(key)
        .and_then(serde_json::Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_payload_field_helpers() {
        let data = json!({ "email": " a@b.dev ", "blank": "", "n": 3 });
        assert_eq!(required_str(&data, "email").unwrap(), "a@b.dev");
        assert!(matches!(required_str(&data, "blank"), Err(ActionError::InvalidPayload(_))));
        assert!(required_str(&data, "n").is_err());
        assert_eq!(optional_str(&data, "missing"), None);
        assert_eq!(optional_str(&serde_json::Value::Null, "email"), None);
    }
}
