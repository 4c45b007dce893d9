//! Liveness endpoints.

use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::state::SharedState;

/// GET /
pub async fn root() -> &'static str {
    "Hello from workwave backend!"
}

/// GET /health
pub async fn health(State(state): State<SharedState>) -> Json<Value> {
    let database = match state.db.stats().await {
        Ok(stats) => json!(stats),
        Err(e) => {
            tracing::warn!(error = %e, "health check could not read database stats");
            Value::Null
        }
    };
    Json(json!({
        "status": "healthy",
        "service": "workwave",
        "timestamp": Utc::now().to_rfc3339(),
        "database": database,
    }))
}
