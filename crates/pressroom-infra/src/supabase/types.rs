//! Supabase REST payloads (GoTrue auth + storage).

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A GoTrue user object.
#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: Value,
}

impl SupabaseUser {
    /// Display name from the user metadata, falling back to the email.
    pub fn display_name(&self) -> Option<String> {
        ["full_name", "name"]
            .iter()
            .find_map(|key| self.user_metadata.get(key).and_then(Value::as_str))
            .map(str::to_string)
            .or_else(|| self.email.clone())
    }

    /// Avatar URL from the user metadata.
    pub fn avatar(&self) -> Option<String> {
        ["avatar_url", "picture"]
            .iter()
            .find_map(|key| self.user_metadata.get(key).and_then(Value::as_str))
            .map(str::to_string)
    }
}

/// Response of `POST /auth/v1/token?grant_type=password`.
#[derive(Debug, Clone, Deserialize)]
pub struct SupabaseSession {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub expires_at: Option<i64>,
    pub user: SupabaseUser,
}

/// Body of `POST /auth/v1/token?grant_type=password`.
#[derive(Debug, Serialize)]
pub struct PasswordGrant<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

/// Body of `DELETE /storage/v1/object/{bucket}`.
#[derive(Debug, Serialize)]
pub struct RemoveObjects<'a> {
    pub prefixes: Vec<&'a str>,
}
