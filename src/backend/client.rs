use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_RANGE};
use tracing::{debug, info};
use url::Url;

use super::{Backend, BackendError, BackendRequest, BackendResponse};
use crate::config::{BackendConfig, BackendCredentials};

/// Supabase/PostgREST client over reqwest.
///
/// Credentials are checked per request, so a server with missing settings
/// still starts and reports the problem on the first lookup.
pub struct PostgrestClient {
    config: BackendConfig,
    http: reqwest::Client,
}

impl PostgrestClient {
    pub fn new(config: BackendConfig) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(BackendError::Transport)?;
        Ok(Self { config, http })
    }

    /// `{base}/rest/v1/{table}` with the table encoded as a single path segment
    pub fn table_url(base: &str, table: &str) -> Result<Url, BackendError> {
        let mut url = Url::parse(base).map_err(|e| BackendError::InvalidUrl(e.to_string()))?;
        url.path_segments_mut()
            .map_err(|_| BackendError::InvalidUrl(format!("{} cannot be a base URL", base)))?
            .pop_if_empty()
            .extend(["rest", "v1", table]);
        Ok(url)
    }

    fn headers(creds: &BackendCredentials<'_>) -> Result<HeaderMap, BackendError> {
        let invalid = |name: &str| BackendError::InvalidHeader(format!("{} contains characters not allowed in a header", name));

        let mut key = HeaderValue::from_str(creds.service_key.expose()).map_err(|_| invalid("SUPABASE_SERVICE_ROLE_KEY"))?;
        key.set_sensitive(true);
        let mut bearer = HeaderValue::from_str(&format!("Bearer {}", creds.service_key.expose()))
            .map_err(|_| invalid("SUPABASE_SERVICE_ROLE_KEY"))?;
        bearer.set_sensitive(true);
        let schema = HeaderValue::from_str(creds.schema).map_err(|_| invalid("SUPABASE_SCHEMA"))?;

        let mut headers = HeaderMap::new();
        headers.insert("apikey", key);
        headers.insert(AUTHORIZATION, bearer);
        headers.insert("accept-profile", schema.clone());
        headers.insert("content-profile", schema);
        // Ask PostgREST for the total in Content-Range
        headers.insert("prefer", HeaderValue::from_static("count=exact"));
        Ok(headers)
    }
}

#[async_trait]
impl Backend for PostgrestClient {
    async fn fetch(&self, request: &BackendRequest) -> Result<BackendResponse, BackendError> {
        let creds = self.config.credentials()?;
        let url = Self::table_url(creds.url, &request.table)?;
        debug!("GET {} params={:?}", url, request.params);

        let response = self
            .http
            .get(url)
            .headers(Self::headers(&creds)?)
            .query(&request.params)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let url = response.url().to_string();
        let status = response.status().as_u16();
        let content_range = response
            .headers()
            .get(CONTENT_RANGE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        let body = response.text().await.map_err(|e| self.classify(e))?;

        info!("Supabase {} -> {}", request.table, status);
        Ok(BackendResponse { url, status, content_range, body })
    }
}

impl PostgrestClient {
    fn classify(&self, err: reqwest::Error) -> BackendError {
        if err.is_timeout() {
            BackendError::Timeout(self.config.timeout_secs)
        } else {
            BackendError::Transport(err.without_url())
        }
    }
}
