//! Page warm-up types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Path value the builder uses for the global theme; never a real page.
pub const THEME_SENTINEL: &str = "THEME";

/// Default `User-Agent` sent on warm-up requests.
pub const DEFAULT_WARMUP_USER_AGENT: &str = "ChaiBuilder-PageGeneration";

/// Which endpoint triggered a warm-up batch. Used to tag log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarmupSource {
    Revalidate,
    Publish,
}

impl fmt::Display for WarmupSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarmupSource::Revalidate => write!(f, "Revalidate"),
            WarmupSource::Publish => write!(f, "Publish"),
        }
    }
}

impl FromStr for WarmupSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "revalidate" => Ok(WarmupSource::Revalidate),
            "publish" => Ok(WarmupSource::Publish),
            other => Err(format!("invalid warm-up source: '{other}'")),
        }
    }
}

/// Outcome of one warm-up batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WarmupReport {
    /// Requests issued.
    pub attempted: usize,
    /// Requests answered with a 2xx status.
    pub succeeded: usize,
    /// Requests answered with a non-2xx status or that failed in transport.
    pub failed: usize,
}
