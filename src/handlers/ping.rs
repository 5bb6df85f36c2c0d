use axum::Json;
use serde_json::{json, Value};

/// GET /ping - liveness check
pub async fn get() -> Json<Value> {
    Json(json!({ "ok": true }))
}
