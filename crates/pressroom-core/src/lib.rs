//! Business logic and port traits for Pressroom.
//!
//! This crate defines the "ports" (traits) that the infrastructure layer
//! implements -- page cache, page fetcher, auth provider, action handlers --
//! plus the logic shared by both HTTP endpoints. It depends only on
//! `pressroom-types`, never on `pressroom-infra` or any HTTP client.

pub mod action;
pub mod auth;
pub mod cache;
pub mod revalidate;
pub mod warmup;
