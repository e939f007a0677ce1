//! Natural-language query endpoint.

use axum::Json;
use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Request body for a natural-language memory query.
#[derive(Debug, Deserialize)]
pub struct QueryRequest {
    /// The patron's question ("smoky mezcal drinks I rated highly").
    pub text: String,
}

/// POST /api/v1/query — construct a query from natural language and run it.
pub async fn run_query(
    State(state): State<AppState>,
    Json(req): Json<QueryRequest>,
) -> ApiResult<Json<Value>> {
    let Some(constructed) = state.constructor.construct(&req.text).await else {
        return Err(ApiError::BadRequest(format!(
            "could not construct a query from '{}'",
            req.text
        )));
    };

    tracing::info!(
        tier = %constructed.tier,
        confidence = constructed.confidence,
        filters = constructed.query.filters.len(),
        "query constructed"
    );

    let results = {
        let store = state.store.read().await;
        store.search(&constructed.query)
    };

    Ok(Json(json!({
        "query": constructed.query,
        "tier": constructed.tier,
        "results": results,
    })))
}
