//! Builder auth actions backed by Supabase GoTrue.

use std::sync::Arc;

use serde_json::{Value, json};
use uuid::Uuid;

use pressroom_core::action::{
    ActionContext, ActionHandler, ActionOutput, BoxActionHandler, optional_str, required_str,
};
use pressroom_types::error::ActionError;

use super::SupabaseClient;

/// `LOGIN { email, password }`.
pub struct LoginAction {
    client: Arc<SupabaseClient>,
}

impl ActionHandler for LoginAction {
    async fn handle(&self, _ctx: &ActionContext, data: Value) -> Result<ActionOutput, ActionError> {
        let email = required_str(&data, "email")?;
        let password = required_str(&data, "password")?;

        let session = self.client.sign_in_with_password(email, password).await?;
        tracing::info!(user_id = %session.user.id, "user logged in");
        Ok(ActionOutput::ok(json!({
            "id": session.user.id,
            "email": session.user.email,
            "accessToken": session.access_token,
            "refreshToken": session.refresh_token,
            "expiresAt": session.expires_at,
        })))
    }
}

/// `LOGOUT { accessToken? }`. Without a token there is no remote session to end.
pub struct LogoutAction {
    client: Arc<SupabaseClient>,
}

impl ActionHandler for LogoutAction {
    async fn handle(&self, ctx: &ActionContext, data: Value) -> Result<ActionOutput, ActionError> {
        if let Some(token) = optional_str(&data, "accessToken") {
            self.client.sign_out(token).await?;
        }
        tracing::info!(user_id = %ctx.user_id, "user logged out");
        Ok(ActionOutput::ok(json!({ "success": true })))
    }
}

/// `GET_CHAI_USER { userId? }`, defaulting to the caller.
///
/// Any editor may look up another editor; the builder shows who holds a page
/// lock and who last published. Only the public profile fields are returned.
pub struct GetUserAction {
    client: Arc<SupabaseClient>,
}

impl ActionHandler for GetUserAction {
    async fn handle(&self, ctx: &ActionContext, data: Value) -> Result<ActionOutput, ActionError> {
        let raw = optional_str(&data, "userId").unwrap_or(&ctx.user_id);
        let user_id = Uuid::parse_str(raw)
            .map_err(|_| ActionError::InvalidPayload(format!("userId '{raw}' is not a UUID")))?;
        let user = self.client.admin_get_user(user_id).await?;
        Ok(ActionOutput::ok(json!({
            "id": user.id,
            "email": user.email,
            "name": user.display_name(),
            "avatar": user.avatar(),
        })))
    }
}

/// All Supabase auth actions, keyed by action name.
pub fn auth_actions(client: Arc<SupabaseClient>) -> Vec<(&'static str, BoxActionHandler)> {
    vec![
        (
            "LOGIN",
            BoxActionHandler::new(LoginAction {
                client: Arc::clone(&client),
            }),
        ),
        (
            "LOGOUT",
            BoxActionHandler::new(LogoutAction {
                client: Arc::clone(&client),
            }),
        ),
        ("GET_CHAI_USER", BoxActionHandler::new(GetUserAction { client })),
    ]
}

#[cfg(test)]
mod tests {
    use pressroom_core::action::ActionRegistry;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::supabase::tests::client_for;

    fn registry(server: &MockServer) -> ActionRegistry {
        let mut registry = ActionRegistry::new();
        registry.register_actions(auth_actions(Arc::new(client_for(server))));
        registry
    }

    fn json_body(output: ActionOutput) -> Value {
        match output {
            ActionOutput::Json(result) => result.body,
            ActionOutput::Stream(_) => panic!("expected JSON output"),
        }
    }

    #[tokio::test]
    async fn test_login_returns_session_fields() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "at",
                "refresh_token": "rt",
                "expires_at": 42,
                "user": { "id": "u1", "email": "ed@site.dev" }
            })))
            .mount(&server)
            .await;

        let output = registry(&server)
            .dispatch(
                "anonymous",
                json!({ "action": "LOGIN", "data": { "email": "ed@site.dev", "password": "pw" } }),
            )
            .await
            .unwrap();
        let body = json_body(output);
        assert_eq!(body["id"], "u1");
        assert_eq!(body["accessToken"], "at");
        assert_eq!(body["expiresAt"], 42);
    }

    #[tokio::test]
    async fn test_login_requires_credentials() {
        let server = MockServer::start().await;
        let err = registry(&server)
            .dispatch("u", json!({ "action": "LOGIN", "data": { "email": "ed@site.dev" } }))
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::InvalidPayload(_)));
    }

    #[tokio::test]
    async fn test_logout_without_token_skips_remote_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(204))
            .expect(0)
            .mount(&server)
            .await;

        let output = registry(&server)
            .dispatch("u1", json!({ "action": "LOGOUT" }))
            .await
            .unwrap();
        assert_eq!(json_body(output)["success"], true);
    }

    #[tokio::test]
    async fn test_logout_with_token_ends_session() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/v1/logout"))
            .and(header("authorization", "Bearer user-at"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let output = registry(&server)
            .dispatch("u1", json!({ "action": "LOGOUT", "data": { "accessToken": "user-at" } }))
            .await
            .unwrap();
        assert_eq!(json_body(output)["success"], true);
    }

    const CALLER: &str = "0192a6f0-7c1e-7b3a-9d2e-5f4c3b2a1908";

    #[tokio::test]
    async fn test_get_chai_user_defaults_to_caller() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(format!("/auth/v1/admin/users/{CALLER}")))
            .and(header("authorization", "Bearer service-role-key"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": CALLER,
                "email": "ed@site.dev",
                "user_metadata": { "full_name": "Ed Itor", "avatar_url": "https://img/ed.png" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let output = registry(&server)
            .dispatch(CALLER, json!({ "action": "GET_CHAI_USER" }))
            .await
            .unwrap();
        let body = json_body(output);
        assert_eq!(body["name"], "Ed Itor");
        assert_eq!(body["avatar"], "https://img/ed.png");
    }

    #[tokio::test]
    async fn test_get_chai_user_not_found_keeps_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "msg": "User not found" })))
            .mount(&server)
            .await;

        let err = registry(&server)
            .dispatch(
                CALLER,
                json!({
                    "action": "GET_CHAI_USER",
                    "data": { "userId": "0192a6f0-0000-7000-8000-000000000000" }
                }),
            )
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_get_chai_user_rejects_non_uuid_ids() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(0)
            .mount(&server)
            .await;

        for user_id in ["../../../../rest/v1/profiles", "u1?select=*", "ghost"] {
            let err = registry(&server)
                .dispatch(
                    CALLER,
                    json!({ "action": "GET_CHAI_USER", "data": { "userId": user_id } }),
                )
                .await
                .unwrap_err();
            assert!(
                matches!(err, ActionError::InvalidPayload(_)),
                "accepted {user_id:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_get_chai_user_rejects_non_uuid_caller() {
        let server = MockServer::start().await;
        let err = registry(&server)
            .dispatch("../admin", json!({ "action": "GET_CHAI_USER" }))
            .await
            .unwrap_err();
        assert!(matches!(err, ActionError::InvalidPayload(_)));
    }
}
