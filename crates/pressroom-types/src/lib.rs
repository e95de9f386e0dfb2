//! Shared domain types for Pressroom.
//!
//! Request and response shapes for the revalidation webhook and the action
//! dispatcher, configuration types, and the error enums shared by every layer.
//!
//! Zero infrastructure dependencies -- only serde and thiserror.

pub mod action;
pub mod auth;
pub mod config;
pub mod error;
pub mod revalidate;
pub mod warmup;
