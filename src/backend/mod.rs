pub mod client;
pub mod response;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::ConfigError;

pub use client::PostgrestClient;

/// One read against a PostgREST table endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendRequest {
    pub table: String,
    pub params: Vec<(&'static str, String)>,
}

/// Raw upstream reply. Status handling and body parsing happen in the service.
#[derive(Debug, Clone)]
pub struct BackendResponse {
    /// Fully resolved request URL, including query string
    pub url: String,
    pub status: u16,
    pub content_range: Option<String>,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum BackendError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    #[error("Invalid backend header: {0}")]
    InvalidHeader(String),

    #[error("Supabase request timed out after {0}s")]
    Timeout(u64),

    #[error("Supabase request failed: {0}")]
    Transport(#[source] reqwest::Error),
}

/// Read-only access to a PostgREST-style data service
#[async_trait]
pub trait Backend: Send + Sync {
    async fn fetch(&self, request: &BackendRequest) -> Result<BackendResponse, BackendError>;
}
