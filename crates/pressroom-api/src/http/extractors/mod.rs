//! Request extractors for the Pressroom handlers.

pub mod auth;
pub mod origin;
