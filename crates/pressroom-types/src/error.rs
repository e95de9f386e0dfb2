use thiserror::Error;

/// Errors from authenticating a caller against the auth provider.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("missing bearer token")]
    MissingToken,

    #[error("invalid or expired token: {0}")]
    InvalidToken(String),

    #[error("auth provider error: {0}")]
    Provider(String),

    #[error("auth provider not configured")]
    NotConfigured,
}

/// Errors raised while dispatching or running a builder action.
#[derive(Debug, Error)]
pub enum ActionError {
    #[error("unknown action '{0}'")]
    UnknownAction(String),

    #[error("invalid action payload: {0}")]
    InvalidPayload(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("backend returned HTTP {status}: {message}")]
    Backend { status: u16, message: String },

    #[error("stream error: {0}")]
    Stream(String),

    #[error("action misconfigured: {0}")]
    Misconfigured(String),
}

impl ActionError {
    /// HTTP status code this error maps to when returned to a caller.
    pub fn status_code(&self) -> u16 {
        match self {
            ActionError::UnknownAction(_) | ActionError::InvalidPayload(_) => 400,
            ActionError::Unauthorized(_) => 401,
            ActionError::Backend { status, .. } => *status,
            ActionError::Stream(_) | ActionError::Misconfigured(_) => 500,
        }
    }
}

/// Errors from the page cache.
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("invalid cache key: '{0}'")]
    InvalidKey(String),

    #[error("cache backend error: {0}")]
    Backend(String),
}

/// Errors from a single warm-up fetch. Logged, never propagated to callers.
#[derive(Debug, Error)]
pub enum WarmupError {
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    #[error("request to {url} timed out")]
    Timeout { url: String },
}

/// Errors loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required setting: {0}")]
    Missing(String),

    #[error("invalid setting {key}: {message}")]
    Invalid { key: String, message: String },
}
