//! ActionHandler trait definition.

use serde_json::Value;

use pressroom_types::error::ActionError;

use super::{ActionContext, ActionOutput};

/// Trait for a single named builder action.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). Wrap an
/// implementation in [`super::BoxActionHandler`] to register it.
///
/// Implementations live in pressroom-infra (Supabase auth/storage, AI, remote
/// builder backend).
pub trait ActionHandler: Send + Sync {
    /// Run the action with the caller context and the request's `data` payload.
    fn handle(
        &self,
        ctx: &ActionContext,
        data: Value,
    ) -> impl std::future::Future<Output = Result<ActionOutput, ActionError>> + Send;
}
