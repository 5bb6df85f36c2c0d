use portfolio_api::config::AppConfig;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up SUPABASE_URL and friends
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Read once; handlers only ever see this value
    let config = AppConfig::from_env()?;
    tracing::info!(
        "Starting Portfolio API in {:?} mode with {} collections (schema {})",
        config.environment,
        config.collections.len(),
        config.backend.schema
    );
    if let Err(e) = config.backend.credentials() {
        tracing::warn!("{}; lookups will fail until this is fixed", e);
    }

    portfolio_api::server::serve(config).await
}
