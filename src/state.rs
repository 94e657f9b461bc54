//! Shared application state.
//!
//! The model runtime and the speaker store are loaded exactly once here and
//! shared read-only across all requests. The state is only constructible
//! from completed loads, so "no request before initialization" holds by
//! construction; there is no degraded mode with a partially loaded model.

use std::sync::Arc;

use tracing::info;

use crate::config::ServerConfig;
use crate::core::model::assets::ModelAssets;
use crate::core::{SpeakerStore, SpeechModel, SpeechT5Runtime, SynthesisPipeline};
use crate::errors::{AppError, AppResult};

/// Process-wide dependencies, injected into handlers via axum state.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: SynthesisPipeline,
    pub speakers: Arc<SpeakerStore>,
    /// Always true once the state exists; reported by /health
    pub models_loaded: bool,
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("models_loaded", &self.models_loaded)
            .finish_non_exhaustive()
    }
}

impl AppState {
    /// Load the model runtime and speaker store, then wire the pipeline.
    ///
    /// Any failure here is an initialization error and aborts startup.
    pub async fn new(config: &ServerConfig) -> AppResult<Self> {
        let assets = ModelAssets::resolve(&config.model)
            .map_err(|e| AppError::Initialization(e.to_string()))?;

        let speakers = SpeakerStore::load(&assets.xvectors, config.model.speaker_dim)
            .map_err(|e| AppError::Initialization(e.to_string()))?;

        let runtime = SpeechT5Runtime::load(config.model.clone())
            .await
            .map_err(|e| AppError::Initialization(e.to_string()))?;

        info!("Models loaded successfully");
        Ok(Self::from_parts(Arc::new(runtime), Arc::new(speakers)))
    }

    /// Wire state from already-built components. Tests use this to inject
    /// a mock model without touching ONNX.
    pub fn from_parts(model: Arc<dyn SpeechModel>, speakers: Arc<SpeakerStore>) -> Self {
        Self {
            pipeline: SynthesisPipeline::new(model, speakers.clone()),
            speakers,
            models_loaded: true,
        }
    }
}
