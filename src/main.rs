use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use inspo_api_rest::{serve, ApiConfig, AppState};
use inspo_core::CoreConfig;

/// Main entry point for the inspo application.
///
/// Starts the REST server carrying the shortcut insert endpoint, the diagnostics
/// endpoint and Swagger UI. Storage is the relational adapter by default; set
/// `INSPO_LOCAL_STORE` to use the single-file JSON variant instead.
///
/// # Environment Variables
/// - `INSPO_REST_ADDR`: server address (default: "0.0.0.0:3000")
/// - `INSPO_DATA_DIR`: directory for the database / card file (default: "inspo-data")
/// - `INSPO_LOCAL_STORE`: when set, use the local JSON store
/// - `API_AUTH_TOKEN`: static bearer secret for the shortcut endpoint (required)
/// - `INSPO_SHORTCUT_OWNER`: owner id shortcut inserts are scoped to (required)
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

    tracing::info!("++ Starting inspo REST on {}", addr);
    tracing::info!(backend = ?core_cfg.backend(), "++ Storage backend");

    let store = core_cfg.open_store()?;
    serve(
        &addr,
        AppState {
            store,
            cfg: Arc::new(api_cfg),
        },
    )
    .await
}
