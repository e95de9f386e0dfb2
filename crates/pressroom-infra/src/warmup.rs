//! reqwest-backed [`PageFetcher`] used for page warm-up.

use std::time::Duration;

use pressroom_core::warmup::PageFetcher;
use pressroom_types::config::WarmupConfig;
use pressroom_types::error::WarmupError;

/// Issues warm-up GETs with a fixed `User-Agent` and per-request timeout.
#[derive(Debug, Clone)]
pub struct ReqwestPageFetcher {
    client: reqwest::Client,
}

impl ReqwestPageFetcher {
    pub fn new(config: &WarmupConfig) -> reqwest::Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client })
    }
}

impl PageFetcher for ReqwestPageFetcher {
    async fn fetch(&self, url: &str) -> Result<u16, WarmupError> {
        let response = self.client.get(url).send().await.map_err(|e| {
            if e.is_timeout() {
                WarmupError::Timeout {
                    url: url.to_string(),
                }
            } else {
                WarmupError::Request {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            }
        })?;
        Ok(response.status().as_u16())
    }
}

#[cfg(test)]
mod tests {
    use pressroom_core::warmup::PageWarmer;
    use pressroom_types::warmup::WarmupSource;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;

    #[tokio::test]
    async fn test_fetch_sends_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/about"))
            .and(header("user-agent", "ChaiBuilder-PageGeneration"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let fetcher = ReqwestPageFetcher::new(&WarmupConfig::default()).unwrap();
        let status = fetcher.fetch(&format!("{}/about", server.uri())).await.unwrap();
        assert_eq!(status, 200);
    }

    #[tokio::test]
    async fn test_fetch_reports_non_success_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let fetcher = ReqwestPageFetcher::new(&WarmupConfig::default()).unwrap();
        let status = fetcher.fetch(&format!("{}/broken", server.uri())).await.unwrap();
        assert_eq!(status, 500);
    }

    #[tokio::test]
    async fn test_fetch_connection_error() {
        let fetcher = ReqwestPageFetcher::new(&WarmupConfig::default()).unwrap();
        // Port 9 (discard) on localhost is not listening in test environments.
        let result = fetcher.fetch("http://127.0.0.1:9/page").await;
        assert!(matches!(result, Err(WarmupError::Request { .. })));
    }

    #[tokio::test]
    async fn test_warmer_end_to_end_with_partial_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/about"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/contact"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        let warmer = PageWarmer::new(ReqwestPageFetcher::new(&WarmupConfig::default()).unwrap());
        let report = warmer
            .warm(&server.uri(), &["", "THEME", "about", "/contact"], WarmupSource::Revalidate)
            .await;

        assert_eq!(report.attempted, 2);
        assert_eq!(report.succeeded, 1);
        assert_eq!(report.failed, 1);
    }
}
