//! `pressroom serve`: run the HTTP server until Ctrl+C or SIGTERM.

use anyhow::{Context, Result};

use pressroom_infra::secret::Secrets;
use pressroom_types::config::ServerConfig;

use crate::http::router::build_router;
use crate::state::AppState;

pub async fn serve(mut config: ServerConfig, bind: Option<String>) -> Result<()> {
    if let Some(bind) = bind {
        config.bind_addr = bind;
    }
    let addr = config.bind_addr.clone();

    let state = AppState::init(config, Secrets::from_env())?;
    if state.secrets.webhook_secret.is_none() {
        tracing::warn!("CHAIBUILDER_WEBHOOK_SECRET is not set; every revalidation webhook will be rejected");
    }
    if state.secrets.app_key.is_none() {
        tracing::warn!("CHAIBUILDER_APP_KEY is not set; every action request will fail");
    }

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!(addr = %addr, "pressroom listening");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
