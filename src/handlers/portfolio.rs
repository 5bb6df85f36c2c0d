use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};

use super::AppState;
use crate::error::ApiError;
use crate::filter::FilterData;
use crate::types::QueryResult;

/// GET /portfolio/:collection - filtered, paginated collection lookup
///
/// Query: `q`, `limit`, `offset`, `order`, `select`, `debug`. All optional.
/// Undecodable paths and query strings are answered with a JSON 400.
pub async fn get(
    State(state): State<AppState>,
    collection: Result<Path<String>, PathRejection>,
    query: Result<Query<FilterData>, QueryRejection>,
) -> Result<Json<QueryResult>, ApiError> {
    let Path(collection) = collection?;
    let Query(query) = query?;
    let result = state.portfolio.lookup(&collection, &query).await?;
    Ok(Json(result))
}
