// handlers/public/status.rs - GET / and GET /health

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

use crate::state::AppState;

pub async fn root_get() -> Json<Value> {
    Json(json!({
        "data": {
            "name": "Canchas API",
            "version": env!("CARGO_PKG_VERSION"),
            "description": "Sports court listings and reviews",
            "endpoints": {
                "users": "POST /users, POST /users/login (public); /users/me[/courts|/reviews] (bearer)",
                "courts": "GET /courts[/:id] (public); POST, PUT, DELETE /courts[/:id] (bearer, owner or admin)",
                "reviews": "GET /courts/:id/reviews (public); POST /courts/:id/reviews, PUT, DELETE /reviews/:id (bearer)",
                "admin": "GET /admin/users, DELETE /admin/users/:id (admin)",
                "health": "GET /health",
            }
        },
        "message": "OK"
    }))
}

/// 503 while the database is unreachable
pub async fn health_get(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "data": { "status": "ok", "timestamp": now, "database": "ok" },
                "message": "OK"
            })),
        ),
        Err(e) => {
            tracing::error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "data": { "status": "degraded", "timestamp": now, "database": "unavailable" },
                    "message": "Database unavailable"
                })),
            )
        }
    }
}
