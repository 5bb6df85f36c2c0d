use std::sync::Arc;
use tracing::{debug, warn};

use super::error::PortfolioError;
use crate::backend::response::{excerpt, normalize_rows, parse_content_range_total};
use crate::backend::{Backend, BackendRequest};
use crate::config::{AppConfig, Collection};
use crate::filter::{Filter, FilterData};
use crate::types::{DebugInfo, QueryResult};

/// Translates collection lookups into PostgREST reads and normalizes the replies
#[derive(Clone)]
pub struct PortfolioService {
    config: Arc<AppConfig>,
    backend: Arc<dyn Backend>,
}

impl PortfolioService {
    pub fn new(config: Arc<AppConfig>, backend: Arc<dyn Backend>) -> Self {
        Self { config, backend }
    }

    /// Trimmed, case-insensitive collection lookup
    pub fn resolve_collection(&self, name: &str) -> Result<&Collection, PortfolioError> {
        let normalized = name.trim().to_lowercase();
        self.config
            .collections
            .get(&normalized)
            .ok_or_else(|| PortfolioError::unknown_collection(&normalized, &self.config.collections.names()))
    }

    /// Validate parameters and build the outbound request without sending it
    pub fn build_request(&self, collection: &str, data: &FilterData) -> Result<(Collection, Filter), PortfolioError> {
        let collection = self.resolve_collection(collection)?.clone();
        let mut filter = Filter::new(&collection);
        filter.assign(data)?;
        Ok((collection, filter))
    }

    pub async fn lookup(&self, collection: &str, data: &FilterData) -> Result<QueryResult, PortfolioError> {
        let (collection, filter) = self.build_request(collection, data)?;
        debug!(
            "Lookup {} -> {} limit={} offset={} search={:?}",
            collection.name,
            filter.table_name(),
            filter.effective_limit(),
            filter.effective_offset(),
            filter.search_text()
        );

        let request = BackendRequest {
            table: filter.table_name().to_string(),
            params: filter.to_query_pairs(),
        };
        let response = self.backend.fetch(&request).await?;

        let secret = self.config.backend.service_key.as_ref().map(|k| k.expose());
        if response.status >= 400 {
            let body = excerpt(&response.body, secret);
            warn!("Supabase returned {} for {}", response.status, collection.name);
            return Err(PortfolioError::upstream_status(response.status, &body));
        }

        let items = normalize_rows(&response.body).map_err(|message| PortfolioError::Backend {
            status: Some(response.status),
            message,
        })?;
        let total = response.content_range.as_deref().and_then(parse_content_range_total);

        let debug = data.debug_enabled().then(|| DebugInfo {
            url: response.url.clone(),
            status: response.status,
            content_range: response.content_range.clone(),
            schema: self.config.backend.schema.clone(),
        });

        Ok(QueryResult {
            collection: collection.name,
            items,
            total,
            debug,
        })
    }
}
