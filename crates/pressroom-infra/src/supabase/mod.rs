//! Supabase backend adapter.
//!
//! - `SupabaseClient`: thin REST client for GoTrue auth and storage, also the
//!   [`AuthProvider`] used to authenticate action callers
//! - `auth_actions`: `LOGIN`, `LOGOUT`, `GET_CHAI_USER`
//! - `storage_actions`: `UPLOAD_ASSET`, `DELETE_ASSET`, `GET_ASSET`
//!
//! Every request carries the service-role key as `apikey`. The key is a
//! [`SecretString`] and is only exposed when building request headers.

pub mod auth_actions;
pub mod storage_actions;
pub mod types;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use uuid::Uuid;

use pressroom_core::auth::AuthProvider;
use pressroom_types::auth::AuthUser;
use pressroom_types::error::{ActionError, AuthError};

use crate::http::{build_client, error_from_response, transport_error};

use self::types::{PasswordGrant, RemoveObjects, SupabaseSession, SupabaseUser};

const SERVICE: &str = "supabase";

/// Supabase REST client authenticated with the service-role key.
pub struct SupabaseClient {
    client: reqwest::Client,
    url: String,
    service_key: SecretString,
    bucket: String,
}

impl SupabaseClient {
    /// Create a client for the project at `url`.
    pub fn new(url: &str, service_key: SecretString, bucket: &str) -> reqwest::Result<Self> {
        Ok(Self {
            client: build_client(Duration::from_secs(30))?,
            url: url.trim_end_matches('/').to_string(),
            service_key,
            bucket: bucket.to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.url, path)
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, self.endpoint(path))
            .header("apikey", self.service_key.expose_secret())
    }

    /// Request authorized as the service role (admin and storage endpoints).
    fn service_request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.request(method, path)
            .bearer_auth(self.service_key.expose_secret())
    }

    /// `POST /auth/v1/token?grant_type=password`.
    pub async fn sign_in_with_password(
        &self,
        email: &str,
        password: &str,
    ) -> Result<SupabaseSession, ActionError> {
        let response = self
            .request(reqwest::Method::POST, "/auth/v1/token?grant_type=password")
            .json(&PasswordGrant { email, password })
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;

        match response.status().as_u16() {
            200..=299 => response
                .json::<SupabaseSession>()
                .await
                .map_err(|e| transport_error(SERVICE, e)),
            400 | 401 | 403 => Err(ActionError::Unauthorized(
                "Invalid login credentials".to_string(),
            )),
            _ => Err(error_from_response(SERVICE, response).await),
        }
    }

    /// `POST /auth/v1/logout` with the user's own access token.
    pub async fn sign_out(&self, access_token: &str) -> Result<(), ActionError> {
        let response = self
            .request(reqwest::Method::POST, "/auth/v1/logout")
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;

        // An already-expired session counts as logged out.
        if response.status().is_success() || response.status().as_u16() == 401 {
            Ok(())
        } else {
            Err(error_from_response(SERVICE, response).await)
        }
    }

    /// `GET /auth/v1/admin/users/{id}`.
    pub async fn admin_get_user(&self, user_id: Uuid) -> Result<SupabaseUser, ActionError> {
        let response = self
            .service_request(reqwest::Method::GET, &format!("/auth/v1/admin/users/{user_id}"))
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;

        if !response.status().is_success() {
            return Err(error_from_response(SERVICE, response).await);
        }
        response
            .json::<SupabaseUser>()
            .await
            .map_err(|e| transport_error(SERVICE, e))
    }

    /// `POST /storage/v1/object/{bucket}/{object_path}`.
    pub async fn upload_object(
        &self,
        object_path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), ActionError> {
        let response = self
            .service_request(
                reqwest::Method::POST,
                &format!("/storage/v1/object/{}/{}", self.bucket, object_path),
            )
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .header("x-upsert", "false")
            .body(bytes)
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(error_from_response(SERVICE, response).await)
        }
    }

    /// `DELETE /storage/v1/object/{bucket}` with the given object prefixes.
    pub async fn remove_objects(&self, prefixes: &[&str]) -> Result<(), ActionError> {
        let response = self
            .service_request(
                reqwest::Method::DELETE,
                &format!("/storage/v1/object/{}", self.bucket),
            )
            .json(&RemoveObjects {
                prefixes: prefixes.to_vec(),
            })
            .send()
            .await
            .map_err(|e| transport_error(SERVICE, e))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(error_from_response(SERVICE, response).await)
        }
    }

    /// Public URL of an object in the configured bucket.
    pub fn public_url(&self, object_path: &str) -> String {
        self.endpoint(&format!(
            "/storage/v1/object/public/{}/{}",
            self.bucket, object_path
        ))
    }
}

impl AuthProvider for SupabaseClient {
    async fn get_user(&self, token: &str) -> Result<AuthUser, AuthError> {
        if token.is_empty() {
            return Err(AuthError::MissingToken);
        }

        let response = self
            .request(reqwest::Method::GET, "/auth/v1/user")
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        let status = response.status();
        if status.is_client_error() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = %status, body = %body, "supabase rejected access token");
            return Err(AuthError::InvalidToken(format!("HTTP {status}")));
        }
        if !status.is_success() {
            return Err(AuthError::Provider(format!("unexpected HTTP {status}")));
        }

        let user: SupabaseUser = response
            .json()
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;
        Ok(AuthUser {
            id: user.id,
            email: user.email,
        })
    }
}
