//! Speaker embedding store.
//!
//! Holds the fixed, ordered collection of xvectors the model is conditioned
//! on. Loaded once at startup from a raw little-endian f32 file of N x DIM
//! values (the CMU Arctic xvector export) and read-only afterwards.

use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::info;

use crate::errors::{AppError, AppResult};

/// Default xvector dimensionality for the SpeechT5 speaker encoder.
pub const DEFAULT_XVECTOR_DIM: usize = 512;

/// Fixed-size, ordered collection of speaker embedding vectors.
pub struct SpeakerStore {
    /// All vectors, row-major, `len * dim` values
    vectors: Vec<f32>,
    dim: usize,
}

impl SpeakerStore {
    /// Load xvectors from a raw little-endian f32 file.
    ///
    /// The file must hold a whole number of `dim`-sized rows; anything else
    /// indicates a truncated or mismatched export and fails the load.
    pub fn load(path: &Path, dim: usize) -> Result<Self> {
        let bytes = std::fs::read(path)
            .with_context(|| format!("failed to read speaker embeddings from {}", path.display()))?;

        if dim == 0 {
            bail!("speaker embedding dimension must be non-zero");
        }
        let row_bytes = dim * size_of::<f32>();
        if bytes.is_empty() || bytes.len() % row_bytes != 0 {
            bail!(
                "{} holds {} bytes, not a whole number of {}-float vectors",
                path.display(),
                bytes.len(),
                dim
            );
        }

        let vectors: Vec<f32> = bytes
            .chunks_exact(size_of::<f32>())
            .map(|b| f32::from_le_bytes([b[0], b[1], b[2], b[3]]))
            .collect();

        let store = Self { vectors, dim };
        info!(
            "Loaded {} speaker embeddings (dim {}) from {}",
            store.len(),
            dim,
            path.display()
        );
        Ok(store)
    }

    /// Build a store from in-memory vectors. Panics on ragged input.
    pub fn from_vectors(vectors: Vec<Vec<f32>>) -> Self {
        let dim = vectors.first().map_or(DEFAULT_XVECTOR_DIM, Vec::len);
        assert!(vectors.iter().all(|v| v.len() == dim));
        Self {
            vectors: vectors.into_iter().flatten().collect(),
            dim,
        }
    }

    /// Number of speakers in the store.
    pub fn len(&self) -> usize {
        self.vectors.len() / self.dim
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Embedding dimensionality.
    pub fn dim(&self) -> usize {
        self.dim
    }

    /// Look up the xvector for a speaker id.
    pub fn get(&self, index: usize) -> AppResult<&[f32]> {
        if index >= self.len() {
            return Err(AppError::SpeakerOutOfRange {
                id: index,
                total: self.len(),
            });
        }
        let start = index * self.dim;
        Ok(&self.vectors[start..start + self.dim])
    }

    /// All speaker ids in dataset order.
    pub fn ids(&self) -> Vec<usize> {
        (0..self.len()).collect()
    }

    /// First `n` speaker ids, for discovery responses.
    pub fn sample_ids(&self, n: usize) -> Vec<usize> {
        (0..self.len().min(n)).collect()
    }
}
