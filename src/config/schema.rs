//! Configuration schema definitions.
//!
//! This module defines the structure of the configuration file using serde.
//! All configuration sections are defined here with appropriate defaults.

use super::error::{ConfigError, ConfigResult};
use crate::codec::{build_codec, Dimension, DEFAULT_MAX_BLOCK_SIZE};
use crate::render::RenderOptions;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Codec defaults applied when a request leaves a field out
    pub codec: CodecConfig,
    /// Control page configuration
    pub ui: UiConfig,
    /// SVG visualizer configuration
    pub render: RenderOptions,
    /// Logging configuration
    pub logging: LoggingConfig,
}

impl Config {
    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.server.port == 0 {
            return Err(ConfigError::validation("server.port", "must be non-zero"));
        }
        if self.render.cell_size == 0 {
            return Err(ConfigError::validation("render.cell_size", "must be non-zero"));
        }
        build_codec(
            self.codec.default_dimension,
            self.codec.default_block_size,
            self.codec.max_block_size,
        )
        .map_err(|e| ConfigError::validation("codec.default_block_size", e.to_string()))?;
        Ok(())
    }
}

/// Server configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Host address to bind to
    pub host: String,
    /// Port number for HTTP server
    pub port: u16,
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            log_level: "info".to_string(),
        }
    }
}

/// Codec configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CodecConfig {
    pub default_dimension: Dimension,
    pub default_block_size: usize,
    /// Upper bound on N2 block sizes accepted from requests
    pub max_block_size: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            default_dimension: Dimension::Two,
            default_block_size: 64,
            max_block_size: DEFAULT_MAX_BLOCK_SIZE,
        }
    }
}

/// Control page configuration section.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Document title of the control page
    pub title: String,
    /// Text shown in the page's text panel
    pub display_text: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            title: "Spatial Codec".to_string(),
            display_text: "Spatial Codec control panel".to_string(),
        }
    }
}

/// Logging configuration section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Append logs to this file instead of stderr
    pub file: Option<PathBuf>,
    /// Log format: "json", "pretty", "compact"
    pub format: LogFormat,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON format
    Json,
    /// Pretty format with colors
    #[default]
    Pretty,
    /// Compact format
    Compact,
}
