use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method, Uri},
    routing::get,
    Json, Router,
};
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, trace::TraceLayer};

use crate::backend::{Backend, PostgrestClient};
use crate::config::AppConfig;
use crate::error::{panic_response, ApiError};
use crate::handlers::{self, AppState};
use crate::services::PortfolioService;

/// Router backed by the real Supabase client
pub fn app_from_config(config: AppConfig) -> anyhow::Result<Router> {
    let client = PostgrestClient::new(config.backend.clone())?;
    Ok(app(Arc::new(config), Arc::new(client)))
}

/// Router over any backend; tests inject their own
pub fn app(config: Arc<AppConfig>, backend: Arc<dyn Backend>) -> Router {
    let cors = cors_layer(&config);
    let state = AppState::new(PortfolioService::new(config, backend));

    let router = Router::new()
        .route("/", get(root))
        .merge(routes())
        // Function hosts mount everything under /api by default
        .nest("/api", routes())
        .fallback(fallback)
        .with_state(state);

    let router = match cors {
        Some(cors) => router.layer(cors),
        None => router,
    };

    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CatchPanicLayer::custom(panic_response)),
    )
}

fn routes() -> Router<AppState> {
    Router::new()
        .route("/ping", get(handlers::ping::get))
        .route("/portfolio/:collection", get(handlers::portfolio::get))
        .route("/legal/cases", get(handlers::legal::cases_get))
        .route("/legal/export/cases", get(handlers::legal::export_cases_get))
        .method_not_allowed_fallback(method_not_allowed)
}

fn cors_layer(config: &AppConfig) -> Option<CorsLayer> {
    if !config.security.enable_cors {
        return None;
    }
    if config.security.cors_origins.is_empty() {
        return Some(CorsLayer::permissive());
    }

    let origins: Vec<HeaderValue> = config
        .security
        .cors_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin {:?}", o);
                None
            }
        })
        .collect();
    Some(
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([Method::GET]),
    )
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "name": "Portfolio API",
        "version": version,
        "timestamp": chrono::Utc::now(),
        "endpoints": {
            "ping": "/ping",
            "portfolio": "/portfolio/:collection?q=&limit=&offset=&order=&select=&debug=",
            "legal_cases": "/legal/cases",
            "legal_export": "/legal/export/cases",
        }
    }))
}

async fn fallback(uri: Uri) -> ApiError {
    ApiError::not_found(format!("No route for {}", uri.path()))
}

async fn method_not_allowed(method: Method, uri: Uri) -> ApiError {
    ApiError::method_not_allowed(format!("{} is not allowed on {}", method, uri.path()))
}

/// Bind and serve until the process is stopped
pub async fn serve(config: AppConfig) -> anyhow::Result<()> {
    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let app = app_from_config(config)?;

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", bind_addr, e))?;
    tracing::info!("Portfolio API listening on http://{}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}
