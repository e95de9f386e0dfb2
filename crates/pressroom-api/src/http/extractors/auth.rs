//! Credential extractors.
//!
//! - [`BearerToken`]: the editor's token from `Authorization`, checked later
//!   against the auth provider
//! - [`WebhookSecret`]: rejects the request unless `x-webhook-secret` matches
//!   `CHAIBUILDER_WEBHOOK_SECRET`

use std::convert::Infallible;

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::http::error::AppError;
use crate::state::AppState;

/// Header carrying the webhook shared secret.
pub const WEBHOOK_SECRET_HEADER: &str = "x-webhook-secret";

/// Second whitespace-separated segment of `Authorization`, empty when absent.
///
/// The scheme word is not checked: `Bearer abc` and `Token abc` both yield `abc`.
pub struct BearerToken(pub String);

impl<S: Send + Sync> FromRequestParts<S> for BearerToken {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.split_whitespace().nth(1))
            .unwrap_or_default()
            .to_string();
        Ok(BearerToken(token))
    }
}

/// Verified webhook caller. Extracting this checks the shared secret.
pub struct WebhookSecret;

impl FromRequestParts<AppState> for WebhookSecret {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let presented = parts
            .headers
            .get(WEBHOOK_SECRET_HEADER)
            .and_then(|value| value.to_str().ok());

        match presented {
            Some(secret) if state.secrets.verify_webhook_secret(secret) => Ok(WebhookSecret),
            _ => {
                tracing::warn!(
                    has_header = presented.is_some(),
                    configured = state.secrets.webhook_secret.is_some(),
                    "rejected revalidation webhook"
                );
                Err(AppError::InvalidSecret)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::http::Request;

    use super::*;

    async fn token_for(header: Option<&str>) -> String {
        let mut builder = Request::builder().uri("/api");
        if let Some(value) = header {
            builder = builder.header("authorization", value);
        }
        let (mut parts, _) = builder.body(()).unwrap().into_parts();
        let BearerToken(token) = BearerToken::from_request_parts(&mut parts, &()).await.unwrap();
        token
    }

    #[tokio::test]
    async fn test_bearer_token_second_segment() {
        assert_eq!(token_for(Some("Bearer abc.def")).await, "abc.def");
        assert_eq!(token_for(Some("Bearer   spaced")).await, "spaced");
        assert_eq!(token_for(Some("Bearer")).await, "");
        assert_eq!(token_for(None).await, "");
    }
}
