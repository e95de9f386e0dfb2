//! HTTP layer for Pressroom.
//!
//! Axum router with the revalidation webhook, the builder action dispatcher,
//! and a health check. Errors are returned as `{"error": "<message>"}`.

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod router;
