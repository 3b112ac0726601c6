//! Engine configuration
//!
//! Loaded from YAML; every field is optional and falls back to its default.

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// YAML parse error
    #[error("Parse error: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Value rejected by validation
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Name carried by log spans
    pub graph_name: String,
    /// Initial capacity of vertex tables
    pub vertex_capacity: usize,
    /// Initial capacity of edge tables
    pub edge_capacity: usize,
    /// Default `tracing` filter when `RUST_LOG` is unset
    pub log_filter: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            graph_name: "graph".to_string(),
            vertex_capacity: 1024,
            edge_capacity: 4096,
            log_filter: "info".to_string(),
        }
    }
}

impl EngineConfig {
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        let config: EngineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml_str(&contents)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.graph_name.trim().is_empty() {
            return Err(ConfigError::Invalid("graph_name must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.graph_name, "graph");
        assert_eq!(config.vertex_capacity, 1024);
        assert_eq!(config.edge_capacity, 4096);
        assert_eq!(config.log_filter, "info");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let config = EngineConfig::from_yaml_str("graph_name: social\nedge_capacity: 16\n").unwrap();
        assert_eq!(config.graph_name, "social");
        assert_eq!(config.edge_capacity, 16);
        assert_eq!(config.vertex_capacity, 1024);
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            EngineConfig::from_yaml_str("vertex_capacity: lots"),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            EngineConfig::from_yaml_str("graph_name: ''"),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "graph_name: from-disk").unwrap();
        writeln!(file, "log_filter: debug").unwrap();

        let config = EngineConfig::from_file(file.path()).unwrap();
        assert_eq!(config.graph_name, "from-disk");
        assert_eq!(config.log_filter, "debug");
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = EngineConfig::from_file(dir.path().join("absent.yaml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
