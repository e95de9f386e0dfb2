//! `pressroom warm`: one warm-up batch from the command line.

use anyhow::Result;

use pressroom_core::warmup::PageWarmer;
use pressroom_infra::warmup::ReqwestPageFetcher;
use pressroom_types::config::ServerConfig;
use pressroom_types::warmup::WarmupSource;

/// Warm `paths` under `base_url` and print the report.
///
/// Exits non-zero only when the fetcher cannot be built; failed pages are
/// reported, not treated as errors.
pub async fn warm(
    config: &ServerConfig,
    base_url: &str,
    paths: &[String],
    source: WarmupSource,
    json: bool,
) -> Result<()> {
    let warmer = PageWarmer::new(ReqwestPageFetcher::new(&config.warmup)?);
    let report = warmer.warm(base_url, paths, source).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{source}: {} attempted, {} succeeded, {} failed",
            report.attempted, report.succeeded, report.failed
        );
    }
    Ok(())
}
