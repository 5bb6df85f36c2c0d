#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use axum::{
    extract::{Path, RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use portfolio_api::config::AppConfig;

pub const SERVICE_KEY: &str = "test-service-role-key-0042";

/// One request seen by the mock PostgREST server
#[derive(Debug, Clone)]
pub struct Captured {
    pub table: String,
    pub query: HashMap<String, String>,
    pub headers: HashMap<String, String>,
}

/// What the mock PostgREST server answers with
#[derive(Clone)]
pub struct MockReply {
    pub status: u16,
    pub body: String,
    pub content_range: Option<String>,
}

impl MockReply {
    pub fn json(body: serde_json::Value) -> Self {
        Self { status: 200, body: body.to_string(), content_range: None }
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self { status, body: body.to_string(), content_range: None }
    }

    pub fn content_range(mut self, header: &str) -> Self {
        self.content_range = Some(header.to_string());
        self
    }
}

#[derive(Clone)]
struct MockState {
    reply: MockReply,
    seen: Arc<Mutex<Vec<Captured>>>,
}

pub struct MockSupabase {
    pub base_url: String,
    seen: Arc<Mutex<Vec<Captured>>>,
}

impl MockSupabase {
    pub async fn start(reply: MockReply) -> Result<Self> {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let state = MockState { reply, seen: seen.clone() };
        let router = Router::new().route("/rest/v1/:table", get(mock_table)).with_state(state);
        let base_url = spawn(router).await?;
        Ok(Self { base_url, seen })
    }

    pub fn requests(&self) -> Vec<Captured> {
        self.seen.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

async fn mock_table(
    State(state): State<MockState>,
    Path(table): Path<String>,
    RawQuery(raw): RawQuery,
    headers: HeaderMap,
) -> impl IntoResponse {
    let query = url::form_urlencoded::parse(raw.unwrap_or_default().as_bytes())
        .into_owned()
        .collect();
    let headers = headers
        .iter()
        .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.as_str().to_string(), v.to_string())))
        .collect();
    state.seen.lock().unwrap().push(Captured { table, query, headers });

    let mut response_headers = HeaderMap::new();
    response_headers.insert("content-type", "application/json".parse().unwrap());
    if let Some(range) = &state.reply.content_range {
        response_headers.insert("content-range", range.parse().unwrap());
    }
    let status = StatusCode::from_u16(state.reply.status).unwrap();
    (status, response_headers, state.reply.body.clone())
}

/// Serve a router on a free local port and wait until it accepts connections
async fn spawn(router: Router) -> Result<String> {
    let port = portpicker::pick_unused_port().context("failed to pick free port")?;
    let listener = tokio::net::TcpListener::bind(("127.0.0.1", port)).await?;
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    let base_url = format!("http://127.0.0.1:{}", port);
    wait_ready(&base_url, Duration::from_secs(5)).await?;
    Ok(base_url)
}

async fn wait_ready(base_url: &str, timeout: Duration) -> Result<()> {
    let deadline = Instant::now() + timeout;
    let addr = base_url.trim_start_matches("http://").to_string();
    while Instant::now() < deadline {
        if tokio::net::TcpStream::connect(&addr).await.is_ok() {
            return Ok(());
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    anyhow::bail!("server did not become ready on {} within {:?}", base_url, timeout)
}

/// The Portfolio API wired to `config`
pub async fn start_app(config: AppConfig) -> Result<String> {
    let router = portfolio_api::server::app_from_config(config)?;
    spawn(router).await
}

/// Mock backend plus an app pointed at it
pub async fn start_with_backend(reply: MockReply) -> Result<(MockSupabase, String)> {
    let mock = MockSupabase::start(reply).await?;
    let config = AppConfig::development().with_backend(&mock.base_url, SERVICE_KEY);
    let app_url = start_app(config).await?;
    Ok((mock, app_url))
}
