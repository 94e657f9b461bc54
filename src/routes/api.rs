use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::handlers::{api, speak, speakers};
use crate::state::AppState;
use std::sync::Arc;

/// Create the API router for the synthesis service
pub fn create_api_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(api::health_check))
        .route("/synthesize", post(speak::synthesize))
        .route("/synthesize_json", post(speak::synthesize_json))
        .route("/speakers", get(speakers::list_speakers))
        .layer(TraceLayer::new_for_http())
}
