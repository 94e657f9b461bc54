use axum::{Json, extract::State};
use serde::Serialize;
use std::sync::Arc;

use crate::state::AppState;

/// Number of speaker ids surfaced as quick-start examples.
const SAMPLE_COUNT: usize = 5;

#[derive(Debug, Serialize)]
pub struct SpeakersResponse {
    pub total_speakers: usize,
    /// All ids in dataset order
    pub speaker_ids: Vec<usize>,
    /// First few ids, for clients that just want something that works
    pub sample_speakers: Vec<usize>,
}

/// List the available speaker embedding ids.
pub async fn list_speakers(State(state): State<Arc<AppState>>) -> Json<SpeakersResponse> {
    Json(SpeakersResponse {
        total_speakers: state.speakers.len(),
        speaker_ids: state.speakers.ids(),
        sample_speakers: state.speakers.sample_ids(SAMPLE_COUNT),
    })
}
