//! Standalone REST API server binary.
//!
//! Runs the HTTP surface on its own; the workspace's main `inspo-run` binary is
//! the same thing with the canonical name. Useful for development when only the
//! endpoint is needed.

use inspo_api_rest::{app, ApiConfig, AppState};
use inspo_core::CoreConfig;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env().add_directive("inspo=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let addr = std::env::var("INSPO_REST_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".into());
    let core_cfg = CoreConfig::resolve(
        std::env::var("INSPO_DATA_DIR").ok(),
        std::env::var("INSPO_LOCAL_STORE").is_ok(),
    );
    let api_cfg = ApiConfig::from_env_values(
        std::env::var("API_AUTH_TOKEN").ok(),
        std::env::var("INSPO_SHORTCUT_OWNER").ok(),
    )?;

    let store = core_cfg.open_store()?;
    let state = AppState {
        store,
        cfg: Arc::new(api_cfg),
    };

    tracing::info!("++ Starting inspo REST on {}", addr);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app(state)).await?;
    Ok(())
}
