//! Remote builder backend.
//!
//! Forwards any action without a local handler to the builder's hosted API.
//! The backend's reply becomes the action result as-is: a `status` field in
//! the body wins over the HTTP status, and a `tags` array drives cache
//! invalidation like a local handler's tags would.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde_json::{Value, json};

use pressroom_core::action::{ActionContext, ActionHandler, ActionOutput};
use pressroom_types::action::{ActionResult, declared_status};
use pressroom_types::error::ActionError;

use crate::http::{build_client, transport_error};

const SERVICE: &str = "builder backend";

pub struct RemoteActionBackend {
    client: reqwest::Client,
    api_url: String,
    app_key: SecretString,
}

impl RemoteActionBackend {
    pub fn new(api_url: &str, app_key: SecretString) -> reqwest::Result<Self> {
        Ok(Self {
            client: build_client(Duration::from_secs(60))?,
            api_url: api_url.to_string(),
            app_key,
        })
    }
}

impl ActionHandler for RemoteActionBackend {
    async fn handle(&self, ctx: &ActionContext, data: Value) -> Result<ActionOutput, ActionError> {
        tracing::debug!(action = %ctx.action, user_id = %ctx.user_id, "forwarding action to builder backend");
        let response = self
            .client
            .post(&self.api_url)
            .header("x-chai-api-key", self.app_key.expose_secret())
            .header("x-chai-user-id", &ctx.user_id)
            .json(&json!({ "action": ctx.action, "data": data }))
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;

        let http_status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;
        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            // Non-JSON replies are passed through as a string body.
            serde_json::from_str(&text).unwrap_or(Value::String(text))
        };

        let status = declared_status(&body).unwrap_or(http_status);
        let result = ActionResult::from_value(body).with_status(status);
        if status >= 400 {
            tracing::warn!(action = %ctx.action, status, "builder backend rejected action");
        }
        Ok(ActionOutput::Json(result))
    }
}
