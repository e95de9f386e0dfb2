//! Server configuration types for Pressroom.
//!
//! `ServerConfig` represents the optional `pressroom.toml`. Every section and
//! field has a default so an empty or missing file yields a runnable server.
//! Secrets never live here; they come from the environment.

use serde::{Deserialize, Serialize};

use crate::warmup::DEFAULT_WARMUP_USER_AGENT;

/// Top-level configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Socket address the HTTP server binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Fixed origin (e.g. `https://www.example.com`) used for warm-up requests
    /// and redirects. When unset, the origin is derived from request headers.
    #[serde(default)]
    pub public_origin: Option<String>,

    #[serde(default)]
    pub warmup: WarmupConfig,

    #[serde(default)]
    pub supabase: SupabaseConfig,

    #[serde(default)]
    pub ai: AiConfig,

    #[serde(default)]
    pub builder: BuilderConfig,
}

fn default_bind_addr() -> String {
    "0.0.0.0:3000".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            public_origin: None,
            warmup: WarmupConfig::default(),
            supabase: SupabaseConfig::default(),
            ai: AiConfig::default(),
            builder: BuilderConfig::default(),
        }
    }
}

/// Page warm-up settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WarmupConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_user_agent() -> String {
    DEFAULT_WARMUP_USER_AGENT.to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

impl Default for WarmupConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Supabase project settings. The service-role key comes from the environment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupabaseConfig {
    /// Project URL (e.g. `https://abc.supabase.co`). Overridden by `SUPABASE_URL`.
    #[serde(default)]
    pub url: Option<String>,
    /// Storage bucket used by the asset actions.
    #[serde(default = "default_storage_bucket")]
    pub storage_bucket: String,
}

fn default_storage_bucket() -> String {
    "dam-assets".to_string()
}

impl Default for SupabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            storage_bucket: default_storage_bucket(),
        }
    }
}

/// OpenAI-compatible chat completions endpoint for the AI content actions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiConfig {
    #[serde(default = "default_ai_base_url")]
    pub base_url: String,
    #[serde(default = "default_ai_model")]
    pub model: String,
}

fn default_ai_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_ai_model() -> String {
    "gpt-4o-mini".to_string()
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            base_url: default_ai_base_url(),
            model: default_ai_model(),
        }
    }
}

/// Remote builder backend that handles actions not registered locally.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BuilderConfig {
    #[serde(default)]
    pub api_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_config_default_values() {
        let config = ServerConfig::default();
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert!(config.public_origin.is_none());
        assert_eq!(config.warmup.user_agent, "ChaiBuilder-PageGeneration");
        assert_eq!(config.warmup.timeout_secs, 30);
        assert_eq!(config.supabase.storage_bucket, "dam-assets");
        assert!(config.builder.api_url.is_none());
    }

    #[test]
    fn test_server_config_empty_toml_uses_defaults() {
        let config: ServerConfig = toml::from_str("").unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert_eq!(config.ai.model, "gpt-4o-mini");
    }

    #[test]
    fn test_server_config_partial_toml() {
        let config: ServerConfig = toml::from_str(
            r#"
public_origin = "https://www.example.com"

[warmup]
timeout_secs = 5

[supabase]
url = "https://abc.supabase.co"
"#,
        )
        .unwrap();
        assert_eq!(config.public_origin.as_deref(), Some("https://www.example.com"));
        assert_eq!(config.warmup.timeout_secs, 5);
        assert_eq!(config.warmup.user_agent, "ChaiBuilder-PageGeneration");
        assert_eq!(config.supabase.url.as_deref(), Some("https://abc.supabase.co"));
        assert_eq!(config.supabase.storage_bucket, "dam-assets");
    }
}
