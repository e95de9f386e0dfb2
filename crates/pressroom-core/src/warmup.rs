//! Page warm-up after cache invalidation.
//!
//! After tags or paths are revalidated, the affected pages are requested once
//! so the next real visitor is served a freshly rendered copy. Warm-up is
//! strictly best-effort:
//!
//! 1. Path-like values are normalized (`normalize_paths`).
//! 2. One GET per path is issued concurrently through a [`PageFetcher`].
//! 3. Non-2xx answers and transport errors are logged, never propagated.
//! 4. The batch resolves once every request has settled.

use std::sync::Arc;

use futures_util::future::join_all;
use tokio::task::JoinHandle;

use pressroom_types::error::WarmupError;
use pressroom_types::warmup::{THEME_SENTINEL, WarmupReport, WarmupSource};

/// Trait for the HTTP transport used to request pages.
///
/// Implementations live in pressroom-infra (e.g., the reqwest fetcher).
pub trait PageFetcher: Send + Sync {
    /// GET `url` and return the response status code.
    fn fetch(
        &self,
        url: &str,
    ) -> impl std::future::Future<Output = Result<u16, WarmupError>> + Send;
}

/// Normalize page slugs into absolute paths.
///
/// Entries are trimmed; empty entries and the theme sentinel are dropped; a
/// leading `/` is added when missing. Order is preserved.
pub fn normalize_paths<S: AsRef<str>>(slugs: &[S]) -> Vec<String> {
    slugs
        .iter()
        .map(|slug| slug.as_ref().trim())
        .filter(|slug| !slug.is_empty() && *slug != THEME_SENTINEL)
        .map(|slug| {
            if slug.starts_with('/') {
                slug.to_string()
            } else {
                format!("/{slug}")
            }
        })
        .collect()
}

/// Join a base URL and an absolute path without doubling the slash.
pub fn page_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Issues warm-up requests through a [`PageFetcher`].
pub struct PageWarmer<F> {
    fetcher: F,
}

impl<F: PageFetcher> PageWarmer<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Request every normalized path under `base_url` and wait for all of them.
    ///
    /// Never fails: each request outcome is logged and counted in the report.
    pub async fn warm<S: AsRef<str>>(
        &self,
        base_url: &str,
        slugs: &[S],
        source: WarmupSource,
    ) -> WarmupReport {
        let paths = normalize_paths(slugs);
        if paths.is_empty() {
            return WarmupReport::default();
        }

        let requests = paths.iter().map(|path| {
            let url = page_url(base_url, path);
            async move {
                tracing::info!(source = %source, url = %url, "triggering page generation");
                match self.fetcher.fetch(&url).await {
                    Ok(status) if (200..300).contains(&status) => true,
                    Ok(status) => {
                        tracing::warn!(source = %source, url = %url, status, "failed to generate page");
                        false
                    }
                    Err(e) => {
                        tracing::error!(source = %source, path = %path, error = %e, "error triggering page generation");
                        false
                    }
                }
            }
        });

        let outcomes = join_all(requests).await;
        let succeeded = outcomes.iter().filter(|ok| **ok).count();
        let report = WarmupReport {
            attempted: outcomes.len(),
            succeeded,
            failed: outcomes.len() - succeeded,
        };
        tracing::debug!(
            source = %source,
            attempted = report.attempted,
            succeeded = report.succeeded,
            failed = report.failed,
            "page generation batch settled"
        );
        report
    }
}

impl<F: PageFetcher + 'static> PageWarmer<F> {
    /// Run a warm-up batch on a detached task.
    ///
    /// The caller does not need to await the handle; dropping it leaves the
    /// batch running to completion.
    pub fn spawn(
        self: Arc<Self>,
        base_url: String,
        slugs: Vec<String>,
        source: WarmupSource,
    ) -> JoinHandle<WarmupReport> {
        tokio::spawn(async move { self.warm(&base_url, &slugs, source).await })
    }
}
