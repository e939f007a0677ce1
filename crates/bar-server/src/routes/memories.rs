//! Drink-memory endpoints.

use axum::Json;
use axum::extract::{Path, State};
use bar_query::DrinkMemory;
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Request body for recording a drink memory.
#[derive(Debug, Deserialize)]
pub struct RecordMemoryRequest {
    /// Patron this memory belongs to.
    pub patron_id: String,
    /// Drink name.
    pub drink: String,
    /// Base spirit. Omit for zero-proof drinks.
    #[serde(default)]
    pub spirit: Option<String>,
    /// Flavor tags.
    #[serde(default)]
    pub flavors: Vec<String>,
    /// Alcohol by volume, percent.
    #[serde(default)]
    pub abv: f64,
    /// Patron rating, 1-5.
    #[serde(default)]
    pub rating: Option<u8>,
    /// Free-form notes.
    #[serde(default)]
    pub notes: String,
}

/// POST /api/v1/memories — record a drink memory.
pub async fn record_memory(
    State(state): State<AppState>,
    Json(req): Json<RecordMemoryRequest>,
) -> ApiResult<Json<DrinkMemory>> {
    if req.drink.trim().is_empty() {
        return Err(ApiError::BadRequest("drink name must not be empty".into()));
    }
    if let Some(rating) = req.rating
        && !(1..=5).contains(&rating)
    {
        return Err(ApiError::BadRequest(format!(
            "rating must be 1-5, got {rating}"
        )));
    }

    let mut memory = DrinkMemory::new(req.patron_id, req.drink);
    memory.spirit = req.spirit;
    memory.flavors = req.flavors;
    memory.abv = req.abv;
    memory.rating = req.rating;
    memory.notes = req.notes;

    tracing::info!(memory_id = %memory.id, drink = %memory.drink, "memory recorded");

    let mut store = state.store.write().await;
    store.add(memory.clone());

    Ok(Json(memory))
}

/// GET /api/v1/memories — list recent memories, newest first.
pub async fn list_memories(State(state): State<AppState>) -> Json<Vec<DrinkMemory>> {
    let store = state.store.read().await;
    Json(store.recent())
}

/// GET /api/v1/memories/{id} — fetch one memory.
pub async fn get_memory(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<DrinkMemory>> {
    let store = state.store.read().await;
    store
        .get(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("memory '{id}' not found")))
}
