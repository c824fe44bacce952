//! Configuration type definitions

use serde::{Deserialize, Serialize};
use std::net::{SocketAddr, ToSocketAddrs};

use crate::error::{Error, Result};

/// Root configuration for the debug server
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EchoConfig {
    /// Listen address. A leading `:` binds all interfaces.
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Maximum request body size in bytes (default: 10MB)
    #[serde(default = "default_body_limit")]
    pub max_body_size: usize,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for EchoConfig {
    fn default() -> Self {
        Self {
            listen: default_listen(),
            max_body_size: default_body_limit(),
            logging: LoggingConfig::default(),
        }
    }
}

fn default_listen() -> String {
    ":8080".to_string()
}

fn default_body_limit() -> usize {
    10 * 1024 * 1024 // 10MB
}

impl EchoConfig {
    /// Resolve `listen` to a socket address
    pub fn listen_addr(&self) -> Result<SocketAddr> {
        let listen = if self.listen.starts_with(':') {
            format!("0.0.0.0{}", self.listen)
        } else {
            self.listen.clone()
        };

        listen
            .to_socket_addrs()
            .map_err(|e| Error::Config(format!("Invalid listen address '{}': {}", self.listen, e)))?
            .next()
            .ok_or_else(|| Error::Config(format!("Listen address '{}' resolved to nothing", self.listen)))
    }

    /// Check the configuration before the server starts
    pub fn validate(&self) -> Result<()> {
        self.listen_addr()?;
        if self.max_body_size == 0 {
            return Err(Error::Config("max_body_size must be greater than 0".to_string()));
        }
        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Log format
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Full,
    Compact,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EchoConfig::default();
        assert_eq!(config.listen, ":8080");
        assert_eq!(config.max_body_size, 10 * 1024 * 1024);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Full);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_colon_listen_binds_all_interfaces() {
        let config = EchoConfig::default();
        assert_eq!(config.listen_addr().unwrap(), "0.0.0.0:8080".parse::<SocketAddr>().unwrap());
    }

    #[test]
    fn test_explicit_listen() {
        let config = EchoConfig {
            listen: "127.0.0.1:9000".to_string(),
            ..Default::default()
        };
        assert_eq!(config.listen_addr().unwrap().port(), 9000);
    }

    #[test]
    fn test_invalid_listen() {
        let config = EchoConfig {
            listen: "not an address".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_zero_body_limit_rejected() {
        let config = EchoConfig {
            max_body_size: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_json_partial_deserialize() {
        let json = r#"{ "logging": { "format": "compact" } }"#;
        let config: EchoConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.listen, ":8080");
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Compact);
    }
}
