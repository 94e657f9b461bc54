//! Per-request synthesis pipeline.
//!
//! One call to [`SynthesisPipeline::run`] handles a full request: validate
//! the text, resolve the speaker embedding, invoke the model, hand the
//! waveform back untouched. No retries, no post-processing, no caching.

use std::sync::Arc;

use serde::Deserialize;
use tracing::debug;

use crate::core::audio::Waveform;
use crate::core::model::SpeechModel;
use crate::core::speakers::SpeakerStore;
use crate::errors::{AppError, AppResult};

/// One synthesis request, as posted by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct SynthesisRequest {
    /// Text to synthesize; an absent field deserializes to "" and is
    /// rejected by validation
    #[serde(default)]
    pub text: String,
    /// Speaker embedding index, first speaker when omitted
    #[serde(default)]
    pub speaker_id: usize,
}

/// Stateless per-request orchestrator over the shared model and store.
#[derive(Clone)]
pub struct SynthesisPipeline {
    model: Arc<dyn SpeechModel>,
    speakers: Arc<SpeakerStore>,
}

impl SynthesisPipeline {
    pub fn new(model: Arc<dyn SpeechModel>, speakers: Arc<SpeakerStore>) -> Self {
        Self { model, speakers }
    }

    /// Run one request end to end.
    ///
    /// Validation happens before any embedding lookup or model work. An
    /// out-of-range speaker id propagates unchanged; any model fault is
    /// wrapped as a synthesis error carrying the cause message.
    pub fn run(&self, request: &SynthesisRequest) -> AppResult<Waveform> {
        if request.text.trim().is_empty() {
            return Err(AppError::Validation("no text provided".into()));
        }

        let embedding = self.speakers.get(request.speaker_id)?;

        debug!(
            "synthesizing {} chars for speaker {}",
            request.text.len(),
            request.speaker_id
        );

        let waveform = self
            .model
            .synthesize(&request.text, embedding)
            .map_err(|e| AppError::Synthesis(e.to_string()))?;

        Ok(waveform)
    }
}
