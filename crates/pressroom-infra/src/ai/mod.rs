//! AI content actions backed by an OpenAI-compatible chat completions API.
//!
//! `ASK_AI` streams generated text back to the builder. The API key is a
//! [`SecretString`] and never appears in logs.

pub mod streaming;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde_json::Value;

use pressroom_core::action::{
    ActionContext, ActionHandler, ActionOutput, BoxActionHandler, optional_str,
};
use pressroom_types::config::AiConfig;
use pressroom_types::error::ActionError;

use crate::http::{build_client, error_from_response, transport_error};

use self::streaming::create_text_stream;

const SERVICE: &str = "ai";

#[derive(Debug, Clone, PartialEq, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
    stream: bool,
}

/// `ASK_AI { prompt | messages, system?, model? }` -- streamed completion.
pub struct AskAiAction {
    client: reqwest::Client,
    api_key: SecretString,
    base_url: String,
    model: String,
}

impl AskAiAction {
    pub fn new(config: &AiConfig, api_key: SecretString) -> reqwest::Result<Self> {
        Ok(Self {
            // Generations can run for minutes.
            client: build_client(Duration::from_secs(300))?,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }
}

impl ActionHandler for AskAiAction {
    async fn handle(&self, ctx: &ActionContext, data: Value) -> Result<ActionOutput, ActionError> {
        let messages = build_messages(&data)?;
        let model = optional_str(&data, "model").unwrap_or(&self.model);

        tracing::info!(user_id = %ctx.user_id, model = %model, messages = messages.len(), "starting AI generation");
        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(self.api_key.expose_secret())
            .json(&ChatCompletionRequest {
                model,
                messages,
                stream: true,
            })
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;

        if !response.status().is_success() {
            return Err(error_from_response(SERVICE, response).await);
        }
        Ok(ActionOutput::Stream(create_text_stream(response)))
    }
}

/// All AI content actions, keyed by action name.
pub fn ai_actions(action: AskAiAction) -> Vec<(&'static str, BoxActionHandler)> {
    vec![("ASK_AI", BoxActionHandler::new(action))]
}

/// Build the chat transcript from either `messages` or `prompt`, with an optional `system`.
fn build_messages(data: &Value) -> Result<Vec<ChatMessage>, ActionError> {
    let mut messages = Vec::new();
    if let Some(system) = text_field(data, "system") {
        messages.push(ChatMessage {
            role: "system".to_string(),
            content: system.to_string(),
        });
    }

    if let Some(items) = data.get("messages").and_then(Value::as_array) {
        for item in items {
            let role = optional_str(item, "role").unwrap_or("user");
            let content = text_field(item, "content").ok_or_else(|| {
                ActionError::InvalidPayload("every message needs a 'content' string".to_string())
            })?;
            messages.push(ChatMessage {
                role: role.to_string(),
                content: content.to_string(),
            });
        }
    } else if let Some(prompt) = text_field(data, "prompt") {
        messages.push(ChatMessage {
            role: "user".to_string(),
            content: prompt.to_string(),
        });
    }

    if !messages.iter().any(|m| m.role != "system") {
        return Err(ActionError::InvalidPayload(
            "either 'prompt' or 'messages' is required".to_string(),
        ));
    }
    Ok(messages)
}

/// A non-blank string field, untrimmed so code indentation survives.
fn text_field<'a>(data: &'a Value, key: &str) -> Option<&'a str> {
    data.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
}
