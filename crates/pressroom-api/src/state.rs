//! Application state wiring all services together.
//!
//! `RevalidationService` and the auth provider are generic over core traits;
//! AppState pins them to the concrete infra implementations.

use std::sync::Arc;

use pressroom_core::action::{ActionRegistry, BoxActionHandler};
use pressroom_core::revalidate::RevalidationService;
use pressroom_core::warmup::PageWarmer;
use pressroom_infra::ai::{AskAiAction, ai_actions};
use pressroom_infra::cache::InMemoryPageCache;
use pressroom_infra::remote::RemoteActionBackend;
use pressroom_infra::secret::Secrets;
use pressroom_infra::supabase::SupabaseClient;
use pressroom_infra::supabase::auth_actions::auth_actions;
use pressroom_infra::supabase::storage_actions::storage_actions;
use pressroom_infra::warmup::ReqwestPageFetcher;
use pressroom_types::config::ServerConfig;
use pressroom_types::error::ConfigError;

/// Concrete revalidation service pinned to infra implementations.
pub type ConcreteRevalidation = RevalidationService<InMemoryPageCache, ReqwestPageFetcher>;

/// Shared application state used by every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    pub secrets: Arc<Secrets>,
    pub revalidation: ConcreteRevalidation,
    /// `None` when Supabase is not configured; every action call then fails
    /// authentication with a 500.
    pub auth: Option<Arc<SupabaseClient>>,
    pub actions: Arc<ActionRegistry>,
}

impl AppState {
    /// Wire services from configuration and secrets.
    pub fn init(config: ServerConfig, secrets: Secrets) -> anyhow::Result<Self> {
        validate(&config)?;

        let fetcher = ReqwestPageFetcher::new(&config.warmup)?;
        let revalidation = RevalidationService::new(
            Arc::new(InMemoryPageCache::new()),
            Arc::new(PageWarmer::new(fetcher)),
        );

        let mut registry = ActionRegistry::new();

        let auth = match (&config.supabase.url, &secrets.supabase_service_key) {
            (Some(url), Some(key)) => {
                let client = Arc::new(SupabaseClient::new(
                    url,
                    key.clone(),
                    &config.supabase.storage_bucket,
                )?);
                registry.register_actions(auth_actions(Arc::clone(&client)));
                registry.register_actions(storage_actions(Arc::clone(&client)));
                Some(client)
            }
            (Some(_), None) => {
                tracing::warn!("SUPABASE_URL is set but SUPABASE_SERVICE_ROLE_KEY is not; auth and storage actions disabled");
                None
            }
            _ => {
                tracing::warn!("Supabase is not configured; action requests will be rejected");
                None
            }
        };

        if let Some(key) = &secrets.ai_api_key {
            registry.register_actions(ai_actions(AskAiAction::new(&config.ai, key.clone())?));
        } else {
            tracing::debug!("OPENAI_API_KEY not set; AI actions disabled");
        }

        if let (Some(api_url), Some(app_key)) = (&config.builder.api_url, &secrets.app_key) {
            registry.set_fallback(BoxActionHandler::new(RemoteActionBackend::new(
                api_url,
                app_key.clone(),
            )?));
        }

        tracing::info!(actions = ?registry.names(), "action registry ready");

        Ok(Self {
            config: Arc::new(config),
            secrets: Arc::new(secrets),
            revalidation,
            auth,
            actions: Arc::new(registry),
        })
    }

    pub fn cache(&self) -> &Arc<InMemoryPageCache> {
        self.revalidation.cache()
    }
}

fn validate(config: &ServerConfig) -> Result<(), ConfigError> {
    if let Some(origin) = &config.public_origin {
        if !(origin.starts_with("http://") || origin.starts_with("https://")) {
            return Err(ConfigError::Invalid {
                key: "public_origin".to_string(),
                message: format!("expected an http(s) URL, got '{origin}'"),
            });
        }
    }
    if config.warmup.timeout_secs == 0 {
        return Err(ConfigError::Invalid {
            key: "warmup.timeout_secs".to_string(),
            message: "must be greater than zero".to_string(),
        });
    }
    Ok(())
}
