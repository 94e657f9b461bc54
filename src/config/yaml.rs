use serde::Deserialize;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::core::model::config::GraphOptimizationLevel;

/// Complete YAML configuration structure
///
/// All fields are optional to allow partial configuration; anything left
/// unset falls back to environment variables and then defaults.
///
/// # Example YAML structure
/// ```yaml
/// server:
///   host: "0.0.0.0"
///   port: 8000
///   cors_allowed_origins: "*"
///
/// model:
///   model_dir: "/opt/speecht5/models"
///   num_threads: 4
///   graph_optimization_level: level3
///   speaker_dim: 512
/// ```
#[derive(Debug, Clone, Deserialize, Default)]
pub struct YamlConfig {
    #[serde(default)]
    pub server: YamlServerSection,
    #[serde(default)]
    pub model: YamlModelSection,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct YamlServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub cors_allowed_origins: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct YamlModelSection {
    pub model_dir: Option<PathBuf>,
    pub num_threads: Option<usize>,
    pub graph_optimization_level: Option<GraphOptimizationLevel>,
    pub speaker_dim: Option<usize>,
}

impl YamlConfig {
    /// Parse a YAML configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        serde_yaml::from_str(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn partial_yaml_leaves_other_sections_default() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server:\n  port: 3001").unwrap();

        let yaml = YamlConfig::load(file.path()).unwrap();
        assert_eq!(yaml.server.port, Some(3001));
        assert!(yaml.server.host.is_none());
        assert!(yaml.model.model_dir.is_none());
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "server: [not a mapping").unwrap();
        assert!(YamlConfig::load(file.path()).is_err());
    }
}
