//! Application error taxonomy.
//!
//! Every failure the pipeline or encoder can produce is one of these
//! variants, and the single [`IntoResponse`] impl below is the only place
//! where errors are translated to HTTP statuses. Handlers return
//! `AppResult<T>` and never map errors themselves.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// Application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Missing or empty required input. Client fault.
    #[error("validation error: {0}")]
    Validation(String),

    /// Speaker id outside the loaded embedding range. Client fault.
    #[error("speaker_id {id} out of range (0..{total})")]
    SpeakerOutOfRange { id: usize, total: usize },

    /// Failure during model invocation. Server fault.
    #[error("synthesis failed: {0}")]
    Synthesis(String),

    /// Failure serializing the waveform. Server fault.
    #[error("audio encoding failed: {0}")]
    Encoding(String),

    /// Startup failure loading the model or the embedding dataset.
    /// Fatal: the server never starts accepting traffic with this pending.
    #[error("initialization failed: {0}")]
    Initialization(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Validation(_) | AppError::SpeakerOutOfRange { .. } => {
                tracing::warn!("bad request: {self}");
                StatusCode::BAD_REQUEST
            }
            AppError::Synthesis(_) | AppError::Encoding(_) | AppError::Initialization(_) => {
                tracing::error!("request failed: {self}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;
