//! Model asset resolution.
//!
//! The runtime expects a model directory laid out as the Optimum export of
//! `microsoft/speecht5_tts` plus the xvector dataset dump:
//!
//! ```text
//! models/
//!   speecht5_tts.onnx       acoustic model
//!   speecht5_hifigan.onnx   vocoder
//!   tokenizer.json          text preprocessor
//!   xvectors.bin            N x 512 little-endian f32 speaker embeddings
//! ```
//!
//! Resolution only checks presence; a missing file fails startup with a
//! message naming the exact path, there is no download fallback.

use std::path::{Path, PathBuf};

use anyhow::{Result, bail};

use super::config::ModelConfig;

const ACOUSTIC_FILENAME: &str = "speecht5_tts.onnx";
const VOCODER_FILENAME: &str = "speecht5_hifigan.onnx";
const TOKENIZER_FILENAME: &str = "tokenizer.json";
const XVECTORS_FILENAME: &str = "xvectors.bin";

/// Resolved on-disk locations of every asset the runtime loads.
#[derive(Debug, Clone)]
pub struct ModelAssets {
    pub acoustic: PathBuf,
    pub vocoder: PathBuf,
    pub tokenizer: PathBuf,
    pub xvectors: PathBuf,
}

impl ModelAssets {
    /// Resolve all asset paths under the configured model directory.
    pub fn resolve(config: &ModelConfig) -> Result<Self> {
        let dir = &config.model_dir;
        if !dir.is_dir() {
            bail!(
                "model directory {} does not exist; set MODEL_DIR or model.model_dir",
                dir.display()
            );
        }

        Ok(Self {
            acoustic: require(dir, ACOUSTIC_FILENAME)?,
            vocoder: require(dir, VOCODER_FILENAME)?,
            tokenizer: require(dir, TOKENIZER_FILENAME)?,
            xvectors: require(dir, XVECTORS_FILENAME)?,
        })
    }
}

fn require(dir: &Path, filename: &str) -> Result<PathBuf> {
    let path = dir.join(filename);
    if !path.is_file() {
        bail!("required model asset {} is missing", path.display());
    }
    Ok(path)
}
