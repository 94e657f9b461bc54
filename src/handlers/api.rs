use axum::{extract::State, response::Json};
use serde_json::{Value, json};
use std::sync::Arc;

use crate::state::AppState;

/// Health check handler
///
/// The state only exists once both the model runtime and the speaker store
/// have loaded, so `models_loaded` is the readiness signal.
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "models_loaded": state.models_loaded,
    }))
}
