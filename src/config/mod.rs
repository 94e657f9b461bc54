//! Server configuration.
//!
//! Configuration comes from environment variables (with `.env` support via
//! dotenvy) and an optional YAML file passed on the command line. Priority:
//! YAML > environment variables > defaults.
//!
//! # Example
//! ```rust,no_run
//! use speecht5_server::config::ServerConfig;
//! use std::path::PathBuf;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Load from environment variables only
//! let config = ServerConfig::from_env()?;
//!
//! // Load from YAML file with environment variable fallbacks
//! let config = ServerConfig::from_file(&PathBuf::from("config.yaml"))?;
//!
//! println!("Server listening on {}", config.address());
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::core::ModelConfig;

mod yaml;

pub use yaml::YamlConfig;

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
    /// CORS allowed origins: "*", a comma-separated list, or unset for
    /// same-origin only
    pub cors_allowed_origins: Option<String>,
    /// Model runtime settings
    pub model: ModelConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            cors_allowed_origins: None,
            model: ModelConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from environment variables only.
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("HOST") {
            config.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            config.port = port
                .parse()
                .with_context(|| format!("invalid PORT value: {port}"))?;
        }
        if let Ok(origins) = std::env::var("CORS_ALLOWED_ORIGINS") {
            config.cors_allowed_origins = Some(origins);
        }
        if let Ok(dir) = std::env::var("MODEL_DIR") {
            config.model.model_dir = PathBuf::from(dir);
        }
        if let Ok(threads) = std::env::var("MODEL_NUM_THREADS") {
            config.model.num_threads = Some(
                threads
                    .parse()
                    .with_context(|| format!("invalid MODEL_NUM_THREADS value: {threads}"))?,
            );
        }
        if let Ok(dim) = std::env::var("SPEAKER_DIM") {
            config.model.speaker_dim = dim
                .parse()
                .with_context(|| format!("invalid SPEAKER_DIM value: {dim}"))?;
        }

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a YAML file, falling back to environment
    /// variables for anything the file leaves unset.
    pub fn from_file(path: &Path) -> Result<Self> {
        let mut config = Self::from_env()?;
        let yaml = YamlConfig::load(path)?;

        if let Some(host) = yaml.server.host {
            config.host = host;
        }
        if let Some(port) = yaml.server.port {
            config.port = port;
        }
        if let Some(origins) = yaml.server.cors_allowed_origins {
            config.cors_allowed_origins = Some(origins);
        }
        if let Some(dir) = yaml.model.model_dir {
            config.model.model_dir = dir;
        }
        if let Some(threads) = yaml.model.num_threads {
            config.model.num_threads = Some(threads);
        }
        if let Some(level) = yaml.model.graph_optimization_level {
            config.model.graph_optimization_level = level;
        }
        if let Some(dim) = yaml.model.speaker_dim {
            config.model.speaker_dim = dim;
        }

        config.validate()?;
        Ok(config)
    }

    /// Bind address in `host:port` form.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            bail!("host must not be empty");
        }
        if self.model.speaker_dim == 0 {
            bail!("speaker_dim must be non-zero");
        }
        Ok(())
    }
}
