//! Name -> handler registry for builder actions.

use std::collections::HashMap;

use serde_json::Value;

use pressroom_types::action::ActionRequest;
use pressroom_types::error::ActionError;

use super::{ActionContext, ActionOutput, BoxActionHandler};

/// Registry of named action handlers plus an optional fallback.
///
/// Registering a name twice replaces the earlier handler.
#[derive(Default)]
pub struct ActionRegistry {
    handlers: HashMap<String, BoxActionHandler>,
    fallback: Option<BoxActionHandler>,
}

impl ActionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a single handler under `name`.
    pub fn register(&mut self, name: impl Into<String>, handler: BoxActionHandler) {
        let name = name.into();
        tracing::debug!(action = %name, "registered action");
        self.handlers.insert(name, handler);
    }

    /// Register a set of handlers, e.g. everything an adapter exposes.
    pub fn register_actions<I, N>(&mut self, actions: I)
    where
        I: IntoIterator<Item = (N, BoxActionHandler)>,
        N: Into<String>,
    {
        for (name, handler) in actions {
            self.register(name, handler);
        }
    }

    /// Handler for actions nobody registered.
    pub fn set_fallback(&mut self, handler: BoxActionHandler) {
        self.fallback = Some(handler);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.handlers.contains_key(name)
    }

    /// Registered action names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.keys().cloned().collect();
        names.sort();
        names
    }

    /// Parse a raw request body and run the matching handler for `user_id`.
    pub async fn dispatch(&self, user_id: &str, body: Value) -> Result<ActionOutput, ActionError> {
        let request: ActionRequest = serde_json::from_value(body)
            .map_err(|e| ActionError::InvalidPayload(e.to_string()))?;
        let action = request.action.trim();
        if action.is_empty() {
            return Err(ActionError::InvalidPayload("action name is empty".to_string()));
        }

        let ctx = ActionContext::new(action, user_id);
        let handler = match (self.handlers.get(action), &self.fallback) {
            (Some(handler), _) => handler,
            (None, Some(fallback)) => {
                tracing::debug!(action = %action, "routing unregistered action to fallback");
                fallback
            }
            (None, None) => return Err(ActionError::UnknownAction(action.to_string())),
        };

        tracing::info!(action = %action, user_id = %user_id, "dispatching action");
        handler.handle(&ctx, request.data).await
    }
}
