use axum::response::Json;
use serde_json::{Value, json};

/// Health probe for the local callback server.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION")
    }))
}
