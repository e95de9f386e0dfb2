//! Revalidation webhook.
//!
//! The builder calls this after publishing with the cache tags and paths to
//! invalidate. Pages under the paths are warmed in the background.

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::response::{IntoResponse, Redirect, Response};
use serde_json::json;

use pressroom_core::warmup::normalize_paths;
use pressroom_types::revalidate::RevalidateRequest;
use pressroom_types::warmup::WarmupSource;

use crate::http::error::AppError;
use crate::http::extractors::auth::WebhookSecret;
use crate::http::extractors::origin::RequestOrigin;
use crate::state::AppState;

/// POST /api/revalidate
pub async fn revalidate(
    State(state): State<AppState>,
    _secret: WebhookSecret,
    RequestOrigin(origin): RequestOrigin,
    body: Bytes,
) -> Result<Response, AppError> {
    let request: RevalidateRequest = serde_json::from_slice(&body)
        .map_err(|e| AppError::RevalidationFailed(format!("invalid request body: {e}")))?;

    state
        .revalidation
        .revalidate_tags(request.tags.as_slice())
        .await
        .map_err(|e| AppError::RevalidationFailed(e.to_string()))?;
    state
        .revalidation
        .revalidate_paths(request.paths.as_slice())
        .await
        .map_err(|e| AppError::RevalidationFailed(e.to_string()))?;

    tracing::info!(
        tags = ?request.tags.as_slice(),
        paths = ?request.paths.as_slice(),
        "tags and paths revalidated"
    );
    state
        .revalidation
        .warm_in_background(&origin, request.paths.as_slice(), WarmupSource::Revalidate);

    if request.redirect {
        let first = normalize_paths(request.paths.as_slice())
            .into_iter()
            .next()
            .unwrap_or_else(|| "/".to_string());
        return Ok(Redirect::temporary(&format!("{origin}{first}")).into_response());
    }

    Ok(Json(json!({ "message": "Tags and paths revalidated successfully" })).into_response())
}
