//! Server configuration loader for Pressroom.
//!
//! Reads `pressroom.toml` (or the file named by `--config` / `PRESSROOM_CONFIG`)
//! and deserializes it into [`ServerConfig`]. Falls back to defaults when the
//! file is missing or malformed.

use std::path::Path;

use pressroom_types::config::ServerConfig;

/// Default config file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "pressroom.toml";

/// Load server configuration from `path`.
///
/// - If the file does not exist, returns [`ServerConfig::default()`].
/// - If the file exists but fails to parse, logs a warning and returns the default.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_server_config(path: &Path) -> ServerConfig {
    let content = match tokio::fs::read_to_string(path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return ServerConfig::default();
        }
        Err(err) => {
            tracing::warn!("Failed to read {}: {err}, using defaults", path.display());
            return ServerConfig::default();
        }
    };

    match toml::from_str::<ServerConfig>(&content) {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Failed to parse {}: {err}, using defaults", path.display());
            ServerConfig::default()
        }
    }
}

/// Apply environment overrides on top of the file config.
///
/// `SUPABASE_URL` replaces `supabase.url`; blank values are ignored.
pub fn apply_env_overrides<F>(mut config: ServerConfig, lookup: F) -> ServerConfig
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(url) = lookup("SUPABASE_URL").filter(|v| !v.trim().is_empty()) {
        config.supabase.url = Some(url.trim().to_string());
    }
    config
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn load_server_config_missing_file_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config = load_server_config(&tmp.path().join(DEFAULT_CONFIG_FILE)).await;
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
        assert!(config.public_origin.is_none());
    }

    #[tokio::test]
    async fn load_server_config_valid_toml_returns_parsed() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(DEFAULT_CONFIG_FILE);
        tokio::fs::write(
            &config_path,
            r#"
bind_addr = "127.0.0.1:8080"
public_origin = "https://www.example.com"

[warmup]
user_agent = "Warmer/1.0"

[builder]
api_url = "https://builder.example.com/api"
"#,
        )
        .await
        .unwrap();

        let config = load_server_config(&config_path).await;
        assert_eq!(config.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.public_origin.as_deref(), Some("https://www.example.com"));
        assert_eq!(config.warmup.user_agent, "Warmer/1.0");
        assert_eq!(config.warmup.timeout_secs, 30);
        assert_eq!(
            config.builder.api_url.as_deref(),
            Some("https://builder.example.com/api")
        );
    }

    #[tokio::test]
    async fn load_server_config_invalid_toml_returns_default() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(DEFAULT_CONFIG_FILE);
        tokio::fs::write(&config_path, "bind_addr = [not valid").await.unwrap();

        let config = load_server_config(&config_path).await;
        assert_eq!(config.bind_addr, "0.0.0.0:3000");
    }

    #[test]
    fn env_override_replaces_supabase_url() {
        let config = apply_env_overrides(ServerConfig::default(), |key| {
            (key == "SUPABASE_URL").then(|| " https://abc.supabase.co ".to_string())
        });
        assert_eq!(config.supabase.url.as_deref(), Some("https://abc.supabase.co"));
    }

    #[test]
    fn env_override_ignores_blank_values() {
        let mut base = ServerConfig::default();
        base.supabase.url = Some("https://file.supabase.co".to_string());
        let config = apply_env_overrides(base, |_| Some("  ".to_string()));
        assert_eq!(config.supabase.url.as_deref(), Some("https://file.supabase.co"));
    }
}
