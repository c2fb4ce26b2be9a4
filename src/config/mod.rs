//! Configuration module for scodec.
//!
//! This module provides TOML-based configuration with environment variable overrides.
//!
//! # Configuration Resolution
//!
//! Configuration is loaded from the following locations (in order of priority):
//!
//! 1. `SCODEC_CONFIG` environment variable (explicit path)
//! 2. `./scodec.toml` (current directory)
//! 3. `~/.config/scodec/scodec.toml` (or under `$XDG_CONFIG_HOME`)
//! 4. Built-in defaults (no file required)
//!
//! # Environment Overrides
//!
//! The pattern is `SCODEC_<SECTION>_<KEY>`, for example:
//! - `SCODEC_SERVER_PORT=8080`
//! - `SCODEC_CODEC_DEFAULT_BLOCK_SIZE=256`
//! - `SCODEC_LOGGING_FORMAT=json`
//!
//! # Example
//!
//! ```rust,ignore
//! use scodec::config::ConfigLoader;
//!
//! let loader = ConfigLoader::load()?;
//! let config = loader.config();
//! println!("Default block: {}", config.codec.default_block_size);
//! ```

mod error;
mod loader;
mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{default_config_path, resolve_config_path, ConfigLoader};
pub use schema::{CodecConfig, Config, LogFormat, LoggingConfig, ServerConfig, UiConfig};
