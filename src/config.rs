//! Configuration management for Paper Reader

use serde::Deserialize;
use std::env;
use std::path::PathBuf;
use thiserror::Error;

/// MIME type the acquisition view accepts
pub const PDF_MIME_TYPE: &str = "application/pdf";

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub conversion: ConversionConfig,
    pub storage: StorageConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Where uploaded papers are sent for conversion
#[derive(Debug, Clone, Deserialize)]
pub struct ConversionConfig {
    pub endpoint: String,
    /// Multipart field carrying the file bytes
    pub field_name: String,
    pub accepted_type: String,
    pub timeout_secs: u64,
}

/// Location of the single-slot document store
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    pub dir: PathBuf,
    pub key: String,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {name}: {value}")]
    InvalidValue { name: &'static str, value: String },
}

impl Default for Config {
    fn default() -> Self {
        Config {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
            },
            conversion: ConversionConfig {
                endpoint: "http://localhost:8000/upload".to_string(),
                field_name: "file".to_string(),
                accepted_type: PDF_MIME_TYPE.to_string(),
                timeout_secs: 120,
            },
            storage: StorageConfig {
                dir: PathBuf::from("./data"),
                key: "ebookData".to_string(),
            },
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Config::default();

        Ok(Config {
            server: ServerConfig {
                host: env::var("SERVER_HOST").unwrap_or(defaults.server.host),
                port: parse_var("SERVER_PORT", defaults.server.port)?,
            },
            conversion: ConversionConfig {
                endpoint: env::var("CONVERSION_ENDPOINT").unwrap_or(defaults.conversion.endpoint),
                field_name: defaults.conversion.field_name,
                accepted_type: defaults.conversion.accepted_type,
                timeout_secs: parse_var("CONVERSION_TIMEOUT_SECS", defaults.conversion.timeout_secs)?,
            },
            storage: StorageConfig {
                dir: env::var("STORAGE_DIR").map(PathBuf::from).unwrap_or(defaults.storage.dir),
                key: env::var("STORAGE_KEY").unwrap_or(defaults.storage.key),
            },
        })
    }

    /// Socket address string for the listener
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_var<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    match env::var(name) {
        Ok(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        Err(_) => Ok(default),
    }
}
