//! Secret loading.
//!
//! Pressroom reads its secrets from environment variables only. Each one is
//! wrapped in a [`SecretString`] as soon as it is read so it cannot end up in
//! logs or `Debug` output.

pub mod env;

use secrecy::{ExposeSecret, SecretString};

pub use self::env::{
    APP_KEY_VAR, OPENAI_API_KEY_VAR, SUPABASE_SERVICE_KEY_VAR, WEBHOOK_SECRET_VAR,
};

/// Process secrets. A `None` field means the variable is unset or blank.
#[derive(Debug, Clone, Default)]
pub struct Secrets {
    /// Shared secret expected in `x-webhook-secret`.
    pub webhook_secret: Option<SecretString>,
    /// Application key required before any action is dispatched.
    pub app_key: Option<SecretString>,
    pub supabase_service_key: Option<SecretString>,
    pub ai_api_key: Option<SecretString>,
}

impl Secrets {
    /// Read every secret from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(env::read_var)
    }

    /// Read every secret through `lookup` (the environment in production).
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let secret = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .map(SecretString::from)
        };
        Self {
            webhook_secret: secret(WEBHOOK_SECRET_VAR),
            app_key: secret(APP_KEY_VAR),
            supabase_service_key: secret(SUPABASE_SERVICE_KEY_VAR),
            ai_api_key: secret(OPENAI_API_KEY_VAR),
        }
    }

    /// Constant-time check of a presented webhook secret.
    ///
    /// Always false when no webhook secret is configured.
    pub fn verify_webhook_secret(&self, presented: &str) -> bool {
        match &self.webhook_secret {
            Some(expected) => {
                constant_time_eq(expected.expose_secret().as_bytes(), presented.as_bytes())
            }
            None => false,
        }
    }
}

/// Constant-time byte comparison. Length mismatch returns early; only the
/// length leaks, never the content.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter()
        .zip(b.iter())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn secrets(vars: &[(&str, &str)]) -> Secrets {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Secrets::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_from_lookup_reads_known_vars() {
        let s = secrets(&[
            ("CHAIBUILDER_WEBHOOK_SECRET", "hook"),
            ("CHAIBUILDER_APP_KEY", "app"),
            ("SUPABASE_SERVICE_ROLE_KEY", "srk"),
        ]);
        assert_eq!(s.webhook_secret.unwrap().expose_secret(), "hook");
        assert_eq!(s.app_key.unwrap().expose_secret(), "app");
        assert_eq!(s.supabase_service_key.unwrap().expose_secret(), "srk");
        assert!(s.ai_api_key.is_none());
    }

    #[test]
    fn test_blank_values_are_unset() {
        let s = secrets(&[("CHAIBUILDER_APP_KEY", "   ")]);
        assert!(s.app_key.is_none());
    }

    #[test]
    fn test_verify_webhook_secret() {
        let s = secrets(&[("CHAIBUILDER_WEBHOOK_SECRET", "s3cret")]);
        assert!(s.verify_webhook_secret("s3cret"));
        assert!(!s.verify_webhook_secret("s3creT"));
        assert!(!s.verify_webhook_secret("s3cret-longer"));
        assert!(!s.verify_webhook_secret(""));
    }

    #[test]
    fn test_unset_webhook_secret_rejects_everything() {
        let s = Secrets::default();
        assert!(!s.verify_webhook_secret(""));
        assert!(!s.verify_webhook_secret("anything"));
    }

    #[test]
    fn test_debug_does_not_leak_values() {
        let s = secrets(&[("CHAIBUILDER_APP_KEY", "do-not-print")]);
        assert!(!format!("{s:?}").contains("do-not-print"));
    }
}
