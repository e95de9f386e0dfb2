//! Shared outbound HTTP helpers.

use std::time::Duration;

use pressroom_types::error::ActionError;

/// Build the reqwest client shared by the backend adapters.
pub fn build_client(timeout: Duration) -> reqwest::Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("pressroom/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Map a transport failure to an action error.
pub fn transport_error(service: &str, e: reqwest::Error) -> ActionError {
    ActionError::Backend {
        status: 502,
        message: format!("{service} request failed: {e}"),
    }
}

/// Turn a non-2xx backend response into an action error.
///
/// 401/403 become `Unauthorized`; anything else keeps its status. The error
/// message is taken from the JSON body (`msg`, `message`, `error_description`,
/// `error`) when present, else from the raw body text.
pub async fn error_from_response(service: &str, response: reqwest::Response) -> ActionError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = extract_message(&body).unwrap_or(body);
    tracing::warn!(service, status = %status, message = %message, "backend returned an error");

    match status.as_u16() {
        401 | 403 => ActionError::Unauthorized(format!("{service}: {message}")),
        code => ActionError::Backend {
            status: code,
            message: format!("{service}: {message}"),
        },
    }
}

fn extract_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["msg", "message", "error_description", "error"]
        .iter()
        .find_map(|key| value.get(key).and_then(|v| v.as_str()))
        .map(str::to_string)
}
