//! Cache revalidation service shared by the webhook and the action dispatcher.

use std::sync::Arc;

use futures_util::future::try_join_all;
use tokio::task::JoinHandle;

use pressroom_types::error::CacheError;
use pressroom_types::warmup::{WarmupReport, WarmupSource};

use crate::cache::PageCache;
use crate::warmup::{PageFetcher, PageWarmer};

/// Invalidates cache entries and schedules warm-up of the affected pages.
pub struct RevalidationService<C, F> {
    cache: Arc<C>,
    warmer: Arc<PageWarmer<F>>,
}

impl<C, F> Clone for RevalidationService<C, F> {
    fn clone(&self) -> Self {
        Self {
            cache: Arc::clone(&self.cache),
            warmer: Arc::clone(&self.warmer),
        }
    }
}

impl<C: PageCache, F: PageFetcher + 'static> RevalidationService<C, F> {
    pub fn new(cache: Arc<C>, warmer: Arc<PageWarmer<F>>) -> Self {
        Self { cache, warmer }
    }

    pub fn cache(&self) -> &Arc<C> {
        &self.cache
    }

    /// Revalidate every tag concurrently. Fails if any single tag fails.
    pub async fn revalidate_tags(&self, tags: &[String]) -> Result<(), CacheError> {
        try_join_all(tags.iter().map(|tag| {
            tracing::debug!(tag = %tag, "revalidating tag");
            self.cache.revalidate_tag(tag)
        }))
        .await?;
        Ok(())
    }

    /// Revalidate every path concurrently. Fails if any single path fails.
    pub async fn revalidate_paths(&self, paths: &[String]) -> Result<(), CacheError> {
        try_join_all(paths.iter().map(|path| {
            tracing::debug!(path = %path, "revalidating path");
            self.cache.revalidate_path(path)
        }))
        .await?;
        Ok(())
    }

    /// Start warming `slugs` under `base_url` without waiting for it.
    pub fn warm_in_background(
        &self,
        base_url: &str,
        slugs: &[String],
        source: WarmupSource,
    ) -> JoinHandle<WarmupReport> {
        Arc::clone(&self.warmer).spawn(base_url.to_string(), slugs.to_vec(), source)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use pressroom_types::error::WarmupError;

    use super::*;

    #[derive(Default)]
    struct RecordingCache {
        tags: Mutex<Vec<String>>,
        paths: Mutex<Vec<String>>,
    }

    impl PageCache for RecordingCache {
        async fn revalidate_tag(&self, tag: &str) -> Result<(), CacheError> {
            if tag == "broken" {
                return Err(CacheError::Backend("tag store offline".to_string()));
            }
            self.tags.lock().unwrap().push(tag.to_string());
            Ok(())
        }

        async fn revalidate_path(&self, path: &str) -> Result<(), CacheError> {
            self.paths.lock().unwrap().push(path.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct CountingFetcher {
        urls: Mutex<Vec<String>>,
    }

    impl PageFetcher for CountingFetcher {
        async fn fetch(&self, url: &str) -> Result<u16, WarmupError> {
            self.urls.lock().unwrap().push(url.to_string());
            Ok(200)
        }
    }

    fn service() -> RevalidationService<RecordingCache, CountingFetcher> {
        RevalidationService::new(
            Arc::new(RecordingCache::default()),
            Arc::new(PageWarmer::new(CountingFetcher::default())),
        )
    }

    #[tokio::test]
    async fn test_revalidate_tags_and_paths() {
        let svc = service();
        svc.revalidate_tags(&["home".to_string(), "nav".to_string()])
            .await
            .unwrap();
        svc.revalidate_paths(&["/about".to_string()]).await.unwrap();

        assert_eq!(svc.cache().tags.lock().unwrap().len(), 2);
        assert_eq!(*svc.cache().paths.lock().unwrap(), vec!["/about".to_string()]);
    }

    #[tokio::test]
    async fn test_revalidate_tags_propagates_cache_error() {
        let svc = service();
        let result = svc
            .revalidate_tags(&["home".to_string(), "broken".to_string()])
            .await;
        assert!(matches!(result, Err(CacheError::Backend(_))));
    }

    #[tokio::test]
    async fn test_warm_in_background_fetches_one_url_per_slug() {
        let svc = service();
        let report = svc
            .warm_in_background("http://site", &["x".to_string()], WarmupSource::Publish)
            .await
            .unwrap();

        assert_eq!(report.attempted, 1);
        assert_eq!(
            *svc.warmer.fetcher().urls.lock().unwrap(),
            vec!["http://site/x".to_string()]
        );
    }
}
