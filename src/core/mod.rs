//! Core synthesis components: audio encoding, speaker embeddings, the
//! model runtime and the per-request pipeline.

pub mod audio;
pub mod model;
pub mod pipeline;
pub mod speakers;

pub use audio::{AudioPayload, SAMPLE_RATE, Waveform, wav_bytes};
pub use model::{ModelConfig, SpeechModel, SpeechT5Runtime};
pub use pipeline::{SynthesisPipeline, SynthesisRequest};
pub use speakers::SpeakerStore;
