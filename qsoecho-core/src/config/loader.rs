//! Configuration loader

use crate::config::EchoConfig;
use crate::error::{Error, Result};
use std::path::Path;

/// Configuration loader for JSON and TOML files
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load and validate configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<EchoConfig> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read config file {}: {}", path.display(), e)))?;

        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

        let config = match ext {
            "json" => Self::from_json(&content)?,
            "toml" => Self::from_toml(&content)?,
            _ => return Err(Error::Config(format!("Unknown config format: '{}'", ext))),
        };

        config.validate()?;
        Ok(config)
    }

    /// Parse JSON configuration
    pub fn from_json(content: &str) -> Result<EchoConfig> {
        serde_json::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid JSON: {}", e)))
    }

    /// Parse TOML configuration
    pub fn from_toml(content: &str) -> Result<EchoConfig> {
        toml::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid TOML: {}", e)))
    }
}
