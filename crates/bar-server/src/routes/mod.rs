//! API route definitions and router builder.

pub mod health;
pub mod memories;
pub mod query;

use axum::Router;
use axum::routing::{get, post};
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the base application router: memory-layer routes and middleware.
///
/// The health route is NOT registered here — bootstrap attaches it onto the
/// finished router via [`health::attach`].
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/query", post(query::run_query))
        .route(
            "/memories",
            get(memories::list_memories).post(memories::record_memory),
        )
        .route("/memories/{id}", get(memories::get_memory));

    Router::new()
        .nest("/api/v1", api)
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(cors)
        .with_state(state)
}
