//! SpeechT5 model runtime.
//!
//! Owns the three pieces of the synthesis stack: the text tokenizer, the
//! acoustic model (text tokens + speaker embedding -> mel spectrogram) and
//! the HiFi-GAN vocoder (spectrogram -> waveform), all loaded from ONNX
//! exports once at startup.
//!
//! The [`SpeechModel`] trait is the seam between the pipeline and the
//! runtime: production wires in [`SpeechT5Runtime`], tests substitute a
//! mock without touching ONNX at all.

pub mod assets;
pub mod config;
pub mod runtime;

pub use config::{GraphOptimizationLevel, ModelConfig};
pub use runtime::SpeechT5Runtime;

use anyhow::Result;

use crate::core::audio::Waveform;

/// Text-to-speech model conditioned on a speaker embedding.
///
/// Implementations must be safe to share across request handlers; the
/// runtime serializes its ONNX sessions internally, so a call never
/// observes another call's in-flight state.
pub trait SpeechModel: Send + Sync {
    /// Synthesize a mono waveform from `text`, conditioned on the given
    /// xvector. Performs no input validation beyond what the tokenizer
    /// itself imposes.
    fn synthesize(&self, text: &str, speaker_embedding: &[f32]) -> Result<Waveform>;
}
