//! Page cache trait definition.
//!
//! The rendered-page cache itself is owned by whatever serves the pages;
//! Pressroom only tells it which tags and paths are stale.

use pressroom_types::error::CacheError;

/// Trait for caches of rendered pages keyed by tag and by path.
///
/// Uses RPITIT (native async fn in traits, Rust 2024 edition).
/// Implementations live in pressroom-infra.
pub trait PageCache: Send + Sync {
    /// Mark every entry carrying `tag` as stale.
    fn revalidate_tag(
        &self,
        tag: &str,
    ) -> impl std::future::Future<Output = Result<(), CacheError>> + Send;

    /// Mark the page rendered at `path` as stale.
    fn revalidate_path(
        &self,
        path: &str,
    ) -> impl std::future::Future<Output = Result<(), CacheError>> + Send;
}
