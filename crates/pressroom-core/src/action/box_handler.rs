//! BoxActionHandler -- object-safe dynamic dispatch wrapper for ActionHandler.
//!
//! 1. Define an object-safe `ActionHandlerDyn` trait with boxed futures
//! 2. Blanket-impl `ActionHandlerDyn` for all `T: ActionHandler`
//! 3. `BoxActionHandler` wraps `Box<dyn ActionHandlerDyn>` and delegates

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

use pressroom_types::error::ActionError;

use super::handler::ActionHandler;
use super::{ActionContext, ActionOutput};

/// Object-safe version of [`ActionHandler`] with boxed futures.
pub trait ActionHandlerDyn: Send + Sync {
    fn handle_boxed<'a>(
        &'a self,
        ctx: &'a ActionContext,
        data: Value,
    ) -> Pin<Box<dyn Future<Output = Result<ActionOutput, ActionError>> + Send + 'a>>;
}

impl<T: ActionHandler> ActionHandlerDyn for T {
    fn handle_boxed<'a>(
        &'a self,
        ctx: &'a ActionContext,
        data: Value,
    ) -> Pin<Box<dyn Future<Output = Result<ActionOutput, ActionError>> + Send + 'a>> {
        Box::pin(self.handle(ctx, data))
    }
}

/// Type-erased action handler, so handlers of different types can share a registry.
pub struct BoxActionHandler {
    inner: Box<dyn ActionHandlerDyn + Send + Sync>,
}

impl BoxActionHandler {
    pub fn new<T: ActionHandler + 'static>(handler: T) -> Self {
        Self {
            inner: Box::new(handler),
        }
    }

    pub async fn handle(
        &self,
        ctx: &ActionContext,
        data: Value,
    ) -> Result<ActionOutput, ActionError> {
        self.inner.handle_boxed(ctx, data).await
    }
}
