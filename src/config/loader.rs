//! Configuration loader with file resolution and environment override support.

use super::error::{ConfigError, ConfigResult};
use super::schema::{Config, LogFormat};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Environment variable prefix for overrides
const ENV_PREFIX: &str = "SCODEC";

/// Config file name
const CONFIG_FILE_NAME: &str = "scodec.toml";

/// Environment variable for explicit config path
const CONFIG_PATH_ENV: &str = "SCODEC_CONFIG";

/// Configuration loader with resolution and override logic.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Resolved config file path (if any)
    pub config_path: Option<PathBuf>,
    /// The loaded configuration
    pub config: Config,
}

impl ConfigLoader {
    /// Load configuration using standard resolution order.
    ///
    /// Resolution priority (highest to lowest):
    /// 1. `SCODEC_CONFIG` environment variable (explicit path)
    /// 2. `./scodec.toml` (current directory)
    /// 3. `$XDG_CONFIG_HOME/scodec/scodec.toml` or `~/.config/scodec/scodec.toml`
    /// 4. Built-in defaults (no file required)
    ///
    /// `SCODEC_<SECTION>_<KEY>` variables override file values, and the
    /// result is validated before it is returned.
    pub fn load() -> ConfigResult<Self> {
        let config_path = resolve_config_path();

        let mut config = match config_path {
            Some(ref path) => load_from_file(path)?,
            None => Config::default(),
        };
        apply_env_overrides(&mut config)?;
        config.validate()?;

        Ok(Self {
            config_path,
            config,
        })
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref().to_path_buf();
        if !path.exists() {
            return Err(ConfigError::NotFound(path));
        }
        let mut config = load_from_file(&path)?;
        apply_env_overrides(&mut config)?;
        config.validate()?;

        Ok(Self {
            config_path: Some(path),
            config,
        })
    }

    /// Create a loader with default configuration (no file).
    pub fn with_defaults() -> Self {
        let mut config = Config::default();
        // Still apply env overrides even with defaults
        if apply_env_overrides(&mut config).is_err() || config.validate().is_err() {
            config = Config::default();
        }

        Self {
            config_path: None,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn into_config(self) -> Config {
        self.config
    }

    /// Write the current configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: impl AsRef<Path>) -> ConfigResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let content = toml::to_string_pretty(&self.config)?;
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Resolve the configuration file path using standard locations.
pub fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(path);
        if path.exists() {
            return Some(path);
        }
    }

    let cwd_config = PathBuf::from(CONFIG_FILE_NAME);
    if cwd_config.exists() {
        return Some(cwd_config);
    }

    default_config_path().filter(|p| p.exists())
}

/// Per-user config file location, whether or not it exists.
pub fn default_config_path() -> Option<PathBuf> {
    std::env::var("XDG_CONFIG_HOME")
        .ok()
        .map(PathBuf::from)
        .or_else(|| {
            std::env::var("HOME")
                .ok()
                .map(|h| PathBuf::from(h).join(".config"))
        })
        .map(|dir| dir.join("scodec").join(CONFIG_FILE_NAME))
}

fn load_from_file(path: &Path) -> ConfigResult<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    toml::from_str(&content).map_err(ConfigError::Parse)
}

/// Read `SCODEC_<suffix>` and parse it, naming the variable on failure.
fn env_parse<T: FromStr>(suffix: &str, what: &str) -> ConfigResult<Option<T>> {
    let var = format!("{ENV_PREFIX}_{suffix}");
    match std::env::var(&var) {
        Ok(val) => val
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::env_parse(var, format!("Invalid {what}: '{val}'"))),
        Err(_) => Ok(None),
    }
}

/// Apply environment variable overrides to the configuration.
///
/// Environment variables follow the pattern: `SCODEC_<SECTION>_<KEY>`
/// For example:
/// - `SCODEC_SERVER_PORT=8080`
/// - `SCODEC_CODEC_DEFAULT_DIMENSION=3`
/// - `SCODEC_UI_DISPLAY_TEXT="Bench 2"`
fn apply_env_overrides(config: &mut Config) -> ConfigResult<()> {
    if let Some(host) = env_parse("SERVER_HOST", "host")? {
        config.server.host = host;
    }
    if let Some(port) = env_parse("SERVER_PORT", "port number")? {
        config.server.port = port;
    }
    if let Some(level) = env_parse("SERVER_LOG_LEVEL", "log level")? {
        config.server.log_level = level;
    }

    if let Some(dimension) = env_parse("CODEC_DEFAULT_DIMENSION", "dimension")? {
        config.codec.default_dimension = dimension;
    }
    if let Some(size) = env_parse("CODEC_DEFAULT_BLOCK_SIZE", "block size")? {
        config.codec.default_block_size = size;
    }
    if let Some(size) = env_parse("CODEC_MAX_BLOCK_SIZE", "block size")? {
        config.codec.max_block_size = size;
    }

    if let Some(title) = env_parse("UI_TITLE", "title")? {
        config.ui.title = title;
    }
    if let Some(text) = env_parse("UI_DISPLAY_TEXT", "display text")? {
        config.ui.display_text = text;
    }

    if let Some(format) = env_parse::<String>("LOGGING_FORMAT", "log format")? {
        config.logging.format = match format.to_lowercase().as_str() {
            "json" => LogFormat::Json,
            "pretty" => LogFormat::Pretty,
            "compact" => LogFormat::Compact,
            _ => {
                return Err(ConfigError::env_parse(
                    format!("{ENV_PREFIX}_LOGGING_FORMAT"),
                    "expected json, pretty or compact",
                ))
            }
        };
    }
    if let Some(file) = env_parse::<PathBuf>("LOGGING_FILE", "path")? {
        config.logging.file = Some(file);
    }

    Ok(())
}
