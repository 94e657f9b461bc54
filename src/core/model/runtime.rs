//! ONNX-backed SpeechT5 runtime

use anyhow::{Context, Result, anyhow, bail};
use ort::session::Session;
use ort::session::builder::SessionBuilder;
use ort::value::Value;
use parking_lot::Mutex;
use std::path::Path;
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use super::SpeechModel;
use super::assets::ModelAssets;
use super::config::ModelConfig;
use crate::core::audio::{SAMPLE_RATE, Waveform};

/// Both sessions live behind one lock: ONNX Runtime does not document
/// concurrent-run safety for a shared session, and a synthesis call must
/// see the acoustic and vocoder passes as one unit. One synthesis is in
/// flight at a time.
struct Sessions {
    acoustic: Session,
    vocoder: Session,
}

/// Loaded SpeechT5 synthesis stack: tokenizer, acoustic model, vocoder.
///
/// Constructed exactly once at startup via [`SpeechT5Runtime::load`];
/// immutable afterwards apart from transient inference state inside the
/// ONNX sessions.
pub struct SpeechT5Runtime {
    tokenizer: Tokenizer,
    sessions: Mutex<Sessions>,
    config: ModelConfig,
    /// Cached acoustic model input names
    acoustic_inputs: Vec<String>,
    /// Cached acoustic model output name (spectrogram)
    acoustic_output: String,
    /// Cached vocoder input name
    vocoder_input: String,
    /// Cached vocoder output name (waveform)
    vocoder_output: String,
}

impl SpeechT5Runtime {
    /// Load the tokenizer and both ONNX sessions from the model directory.
    ///
    /// Session creation runs on a blocking thread. Any missing or
    /// malformed asset fails the load; there is no partial-load fallback.
    pub async fn load(config: ModelConfig) -> Result<Self> {
        let assets = ModelAssets::resolve(&config)?;

        info!("Loading SpeechT5 model from: {}", config.model_dir.display());

        let (tokenizer, acoustic, vocoder) = tokio::task::spawn_blocking({
            let assets = assets.clone();
            let config = config.clone();
            move || -> Result<(Tokenizer, Session, Session)> {
                let tokenizer = Tokenizer::from_file(&assets.tokenizer)
                    .map_err(|e| anyhow!("failed to load tokenizer: {e}"))?;
                let acoustic = Self::create_session(&assets.acoustic, &config)
                    .context("failed to load acoustic model")?;
                let vocoder = Self::create_session(&assets.vocoder, &config)
                    .context("failed to load vocoder")?;
                Ok((tokenizer, acoustic, vocoder))
            }
        })
        .await
        .context("failed to spawn blocking task for model loading")??;

        let acoustic_inputs: Vec<String> =
            acoustic.inputs().iter().map(|i| i.name().to_string()).collect();
        let acoustic_output = acoustic
            .outputs()
            .first()
            .map(|o| o.name().to_string())
            .context("acoustic model declares no outputs")?;
        let vocoder_input = vocoder
            .inputs()
            .first()
            .map(|i| i.name().to_string())
            .context("vocoder model declares no inputs")?;
        let vocoder_output = vocoder
            .outputs()
            .first()
            .map(|o| o.name().to_string())
            .context("vocoder model declares no outputs")?;

        info!("Acoustic model inputs: {:?}", acoustic_inputs);
        info!("Acoustic model output: {}", acoustic_output);
        info!("Vocoder input: {}, output: {}", vocoder_input, vocoder_output);

        Ok(Self {
            tokenizer,
            sessions: Mutex::new(Sessions { acoustic, vocoder }),
            config,
            acoustic_inputs,
            acoustic_output,
            vocoder_input,
            vocoder_output,
        })
    }

    fn create_session(model_path: &Path, config: &ModelConfig) -> Result<Session> {
        let mut builder = SessionBuilder::new()?
            .with_optimization_level(config.graph_optimization_level.to_ort_level())
            .map_err(ort::Error::<()>::from)?;

        if let Some(num_threads) = config.num_threads {
            builder = builder
                .with_intra_threads(num_threads)
                .map_err(ort::Error::<()>::from)?
                .with_inter_threads(1)
                .map_err(ort::Error::<()>::from)?;
        }

        Ok(builder.commit_from_file(model_path)?)
    }

    /// Tokenize text into the i64 ids the acoustic model consumes.
    fn tokenize(&self, text: &str) -> Result<Vec<i64>> {
        let encoding = self
            .tokenizer
            .encode(text, true)
            .map_err(|e| anyhow!("tokenization failed: {e}"))?;

        let ids: Vec<i64> = encoding.get_ids().iter().map(|&id| i64::from(id)).collect();
        if ids.is_empty() {
            bail!("tokenizer produced no tokens for the input text");
        }
        Ok(ids)
    }
}

impl SpeechModel for SpeechT5Runtime {
    fn synthesize(&self, text: &str, speaker_embedding: &[f32]) -> Result<Waveform> {
        if speaker_embedding.len() != self.config.speaker_dim {
            bail!(
                "speaker embedding has {} values, model expects {}",
                speaker_embedding.len(),
                self.config.speaker_dim
            );
        }

        let input_ids = self.tokenize(text)?;
        debug!("synthesizing {} tokens", input_ids.len());

        let mut guard = self.sessions.lock();
        let Sessions { acoustic, vocoder } = &mut *guard;

        // Acoustic pass: tokens + xvector -> mel spectrogram
        let inputs: Vec<(&str, Value)> = self
            .acoustic_inputs
            .iter()
            .filter_map(|name| {
                let value: Option<Value> = match name.as_str() {
                    "input_ids" => {
                        Value::from_array(([1usize, input_ids.len()], input_ids.clone()))
                            .ok()
                            .map(|v| v.into())
                    }
                    "speaker_embeddings" => Value::from_array((
                        [1usize, speaker_embedding.len()],
                        speaker_embedding.to_vec(),
                    ))
                    .ok()
                    .map(|v| v.into()),
                    other => {
                        warn!("Unknown acoustic model input name: {}", other);
                        None
                    }
                };
                value.map(|v| (name.as_str(), v))
            })
            .collect();

        let outputs = acoustic.run(inputs).context("acoustic model inference failed")?;
        let (spectrogram_shape, spectrogram) = outputs
            .get(&self.acoustic_output)
            .context("no spectrogram output from acoustic model")?
            .try_extract_tensor::<f32>()
            .context("failed to extract spectrogram tensor")?;
        if spectrogram.is_empty() {
            bail!("acoustic model produced an empty spectrogram");
        }

        let frame_dims: Vec<usize> = spectrogram_shape.iter().map(|&d| d as usize).collect();
        let spectrogram = spectrogram.to_vec();
        drop(outputs);

        // Vocoder pass: spectrogram -> waveform
        let spectrogram_value: Value = Value::from_array((frame_dims, spectrogram))
            .context("failed to build vocoder input tensor")?
            .into();
        let outputs = vocoder
            .run(vec![(self.vocoder_input.as_str(), spectrogram_value)])
            .context("vocoder inference failed")?;
        let (_, samples) = outputs
            .get(&self.vocoder_output)
            .context("no waveform output from vocoder")?
            .try_extract_tensor::<f32>()
            .context("failed to extract waveform tensor")?;
        if samples.is_empty() {
            bail!("vocoder produced no samples");
        }

        let waveform = Waveform::new(samples.to_vec(), SAMPLE_RATE);
        debug!(
            "synthesized {:.2}s of audio ({} samples)",
            waveform.duration_secs(),
            waveform.samples.len()
        );
        Ok(waveform)
    }
}
