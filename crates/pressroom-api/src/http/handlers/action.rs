//! Builder action dispatcher.
//!
//! Authenticates the editor, runs the named action, invalidates any cache tags
//! the action reports, and returns its result as JSON or as a text stream.

use axum::Json;
use axum::body::{Body, Bytes};
use axum::extract::State;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use futures_util::TryStreamExt;
use futures_util::future::ready;
use serde_json::Value;

use pressroom_core::action::{ActionOutput, TextStream};
use pressroom_core::auth::AuthProvider;
use pressroom_types::error::AuthError;
use pressroom_types::warmup::WarmupSource;

use crate::http::error::AppError;
use crate::http::extractors::auth::BearerToken;
use crate::http::extractors::origin::RequestOrigin;
use crate::state::AppState;

/// POST /api
pub async fn dispatch_action(
    State(state): State<AppState>,
    BearerToken(token): BearerToken,
    RequestOrigin(origin): RequestOrigin,
    body: Bytes,
) -> Result<Response, AppError> {
    if state.secrets.app_key.is_none() {
        return Err(AppError::MissingAppKey);
    }

    let body: Value = serde_json::from_slice(&body)
        .map_err(|e| AppError::Internal(format!("invalid request body: {e}")))?;

    let provider = state.auth.as_deref().ok_or(AuthError::NotConfigured)?;
    let user = provider.get_user(&token).await?;

    let output = state.actions.dispatch(&user.id, body).await?;
    match output {
        ActionOutput::Json(result) => {
            if result.has_tags() {
                state
                    .revalidation
                    .revalidate_tags(&result.tags)
                    .await
                    .map_err(|e| AppError::Internal(e.to_string()))?;
                tracing::info!(user_id = %user.id, tags = ?result.tags, "tags revalidated after action");
                state
                    .revalidation
                    .warm_in_background(&origin, &result.tags, WarmupSource::Publish);
            }
            Ok((response_status(result.status), Json(result.body)).into_response())
        }
        ActionOutput::Stream(stream) => Ok(stream_response(stream)),
    }
}

/// Final status for a JSON result. Anything outside `200..=599` becomes 200.
fn response_status(status: u16) -> StatusCode {
    match StatusCode::from_u16(status) {
        Ok(code) if (200..=599).contains(&status) => code,
        _ => StatusCode::OK,
    }
}

/// Plain-text streaming response. Empty chunks are skipped; a chunk error
/// aborts the body.
fn stream_response(stream: TextStream) -> Response {
    let chunks = stream
        .try_filter(|chunk| ready(!chunk.is_empty()))
        .map_ok(Bytes::from)
        .inspect_err(|e| tracing::error!(error = %e, "action stream failed"));

    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8"),
            (header::CACHE_CONTROL, "no-cache"),
        ],
        Body::from_stream(chunks),
    )
        .into_response()
}
