use axum::Json;
use serde_json::{json, Value};

/// GET /legal/cases - no case source is wired up yet, so the list is always empty
pub async fn cases_get() -> Json<Value> {
    Json(json!([]))
}

/// GET /legal/export/cases
pub async fn export_cases_get() -> Json<Value> {
    Json(json!({ "export": "cases", "status": "ok" }))
}
