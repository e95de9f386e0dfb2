//! Builder asset actions backed by Supabase Storage.

use std::sync::Arc;

use base64::Engine;
use serde_json::{Value, json};

use pressroom_core::action::{
    ActionContext, ActionHandler, ActionOutput, BoxActionHandler, optional_str, required_str,
};
use pressroom_types::error::ActionError;

use super::SupabaseClient;

/// `UPLOAD_ASSET { name, file, folderId? }` where `file` is base64 or a data URL.
pub struct UploadAssetAction {
    client: Arc<SupabaseClient>,
}

impl ActionHandler for UploadAssetAction {
    async fn handle(&self, ctx: &ActionContext, data: Value) -> Result<ActionOutput, ActionError> {
        let name = required_str(&data, "name")?;
        let file = required_str(&data, "file")?;
        let (declared_type, bytes) = decode_file(file)?;
        let content_type = declared_type.unwrap_or_else(|| content_type_for(name).to_string());

        let object_path = object_path(optional_str(&data, "folderId"), name)?;
        let size = bytes.len();
        self.client
            .upload_object(&object_path, bytes, &content_type)
            .await?;

        tracing::info!(user_id = %ctx.user_id, object = %object_path, size, "asset uploaded");
        Ok(ActionOutput::ok(json!({
            "id": object_path,
            "name": name,
            "url": self.client.public_url(&object_path),
            "size": size,
            "contentType": content_type,
        })))
    }
}

/// `DELETE_ASSET { id }`.
pub struct DeleteAssetAction {
    client: Arc<SupabaseClient>,
}

impl ActionHandler for DeleteAssetAction {
    async fn handle(&self, ctx: &ActionContext, data: Value) -> Result<ActionOutput, ActionError> {
        let id = required_str(&data, "id")?;
        self.client.remove_objects(&[id]).await?;
        tracing::info!(user_id = %ctx.user_id, object = %id, "asset deleted");
        Ok(ActionOutput::ok(json!({ "success": true })))
    }
}

/// `GET_ASSET { id }`. Resolves the public URL without a remote call.
pub struct GetAssetAction {
    client: Arc<SupabaseClient>,
}

impl ActionHandler for GetAssetAction {
    async fn handle(&self, _ctx: &ActionContext, data: Value) -> Result<ActionOutput, ActionError> {
        let id = required_str(&data, "id")?;
        Ok(ActionOutput::ok(json!({
            "id": id,
            "url": self.client.public_url(id),
        })))
    }
}

/// All Supabase storage actions, keyed by action name.
pub fn storage_actions(client: Arc<SupabaseClient>) -> Vec<(&'static str, BoxActionHandler)> {
    vec![
        (
            "UPLOAD_ASSET",
            BoxActionHandler::new(UploadAssetAction {
                client: Arc::clone(&client),
            }),
        ),
        (
            "DELETE_ASSET",
            BoxActionHandler::new(DeleteAssetAction {
                client: Arc::clone(&client),
            }),
        ),
        ("GET_ASSET", BoxActionHandler::new(GetAssetAction { client })),
    ]
}

/// Decode a base64 payload, optionally wrapped in a `data:<type>;base64,` URL.
fn decode_file(file: &str) -> Result<(Option<String>, Vec<u8>), ActionError> {
    let (content_type, encoded) = match file.strip_prefix("data:") {
        Some(rest) => {
            let (meta, encoded) = rest
                .split_once(',')
                .ok_or_else(|| ActionError::InvalidPayload("malformed data URL".to_string()))?;
            let content_type = meta
                .strip_suffix(";base64")
                .filter(|t| !t.is_empty())
                .map(str::to_string);
            (content_type, encoded)
        }
        None => (None, file),
    };

    let bytes = base64::engine::general_purpose::STANDARD
        .decode(encoded.trim())
        .map_err(|e| ActionError::InvalidPayload(format!("file is not valid base64: {e}")))?;
    Ok((content_type, bytes))
}

/// Unique object path `{folder}/{uuid}-{name}` with filesystem-safe segments.
///
/// The path is appended to a service-role URL, so folder segments that would
/// be collapsed as `.`/`..` are rejected.
fn object_path(folder: Option<&str>, name: &str) -> Result<String, ActionError> {
    let file_name = format!("{}-{}", uuid::Uuid::now_v7(), safe_segment(name));
    let Some(folder) = folder else {
        return Ok(file_name);
    };

    let mut segments = Vec::new();
    for segment in folder.split('/').filter(|s| !s.is_empty()) {
        if segment == "." || segment == ".." {
            return Err(ActionError::InvalidPayload(format!(
                "folderId '{folder}' contains a relative segment"
            )));
        }
        segments.push(safe_segment(segment));
    }
    segments.push(file_name);
    Ok(segments.join("/"))
}

fn safe_segment(segment: &str) -> String {
    segment
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

fn content_type_for(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        "ico" => "image/x-icon",
        "mp4" => "video/mp4",
        "webm" => "video/webm",
        "pdf" => "application/pdf",
        "json" => "application/json",
        "css" => "text/css",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}
