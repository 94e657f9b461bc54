//! Speech synthesis endpoints.
//!
//! Both endpoints run the same pipeline; they differ only in how the
//! waveform leaves the process. `/synthesize` streams the WAV container as
//! a file attachment, `/synthesize_json` wraps the identical bytes in
//! base64 with transport metadata.
//!
//! The pipeline is synchronous and the model serializes synthesis calls, so
//! handlers bridge onto a blocking thread rather than stalling the runtime.

use axum::{
    Json,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use std::sync::Arc;
use tracing::info;

use crate::core::{AudioPayload, SynthesisRequest, Waveform, wav_bytes};
use crate::errors::{AppError, AppResult};
use crate::state::AppState;

/// Synthesize speech and return it as a WAV file attachment.
pub async fn synthesize(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SynthesisRequest>,
) -> AppResult<Response> {
    let waveform = run_blocking(&state, request).await?;
    let bytes = wav_bytes(&waveform)?;

    info!(
        "synthesized {:.2}s of audio ({} bytes)",
        waveform.duration_secs(),
        bytes.len()
    );

    Ok((
        [
            (header::CONTENT_TYPE, "audio/wav"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"speech.wav\"",
            ),
        ],
        bytes,
    )
        .into_response())
}

/// Synthesize speech and return it as base64 WAV in a JSON envelope.
pub async fn synthesize_json(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SynthesisRequest>,
) -> AppResult<Json<AudioPayload>> {
    let waveform = run_blocking(&state, request).await?;
    let payload = AudioPayload::from_waveform(&waveform)?;
    Ok(Json(payload))
}

/// Run the synchronous pipeline on a blocking thread.
async fn run_blocking(state: &AppState, request: SynthesisRequest) -> AppResult<Waveform> {
    let pipeline = state.pipeline.clone();
    tokio::task::spawn_blocking(move || pipeline.run(&request))
        .await
        .map_err(|e| AppError::Synthesis(format!("synthesis task panicked: {e}")))?
}
