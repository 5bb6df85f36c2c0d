//! Shared types used across the codebase

use serde::Serialize;
use serde_json::Value;

/// Normalized lookup result, serialized as the response envelope
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryResult {
    pub collection: String,
    pub items: Vec<Value>,
    pub total: Option<u64>,
    #[serde(rename = "_debug", skip_serializing_if = "Option::is_none")]
    pub debug: Option<DebugInfo>,
}

/// Diagnostics attached when the caller passes `debug=1`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebugInfo {
    pub url: String,
    pub status: u16,
    pub content_range: Option<String>,
    pub schema: String,
}
