//! Health check endpoint.

use axum::routing::get;
use axum::{Json, Router};
use serde_json::{Value, json};

/// Register the liveness route on an already-built application router.
///
/// Called exactly once, by bootstrap, after the base router is assembled.
/// Axum panics on duplicate route paths, so a second attachment is a
/// programming error rather than a silent overwrite.
pub fn attach(app: Router) -> Router {
    app.route("/health", get(health))
}

/// GET /health — liveness check.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "bar-server",
    }))
}
