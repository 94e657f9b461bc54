//! Model runtime configuration types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::speakers::DEFAULT_XVECTOR_DIM;

/// ONNX graph optimization level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum GraphOptimizationLevel {
    Disable,
    Level1,
    Level2,
    #[default]
    Level3,
}

impl GraphOptimizationLevel {
    pub fn to_ort_level(self) -> ort::session::builder::GraphOptimizationLevel {
        use ort::session::builder::GraphOptimizationLevel as OrtLevel;
        match self {
            Self::Disable => OrtLevel::Disable,
            Self::Level1 => OrtLevel::Level1,
            Self::Level2 => OrtLevel::Level2,
            Self::Level3 => OrtLevel::Level3,
        }
    }
}

/// Configuration for the SpeechT5 runtime
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Directory holding the ONNX exports, tokenizer and xvector file
    pub model_dir: PathBuf,

    /// Number of intra-op threads for ONNX inference
    pub num_threads: Option<usize>,

    /// ONNX graph optimization level
    pub graph_optimization_level: GraphOptimizationLevel,

    /// Dimensionality of the speaker xvectors (512 for SpeechT5)
    pub speaker_dim: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            num_threads: None,
            graph_optimization_level: GraphOptimizationLevel::default(),
            speaker_dim: DEFAULT_XVECTOR_DIM,
        }
    }
}
