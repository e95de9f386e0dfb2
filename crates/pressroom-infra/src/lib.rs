//! Infrastructure layer for Pressroom.
//!
//! Contains implementations of the traits defined in `pressroom-core`:
//! the reqwest page fetcher, the in-memory page cache, the Supabase client
//! (auth provider plus auth/storage actions), the AI content actions, and the
//! remote builder backend. Also loads configuration and environment secrets.

pub mod ai;
pub mod cache;
pub mod config;
pub mod http;
pub mod remote;
pub mod secret;
pub mod supabase;
pub mod warmup;
