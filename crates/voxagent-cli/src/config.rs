//! CLI configuration loading from file and environment variables.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use voxagent_client::BackendConfig;
use voxagent_session::{SessionSettings, DEFAULT_NOTICE_TTL};
use voxagent_types::{Catalog, CatalogError, LanguageOption, ModelOption};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Backend location and request timeout.
    #[serde(default)]
    pub backend: BackendConfig,

    /// Session behaviour.
    #[serde(default)]
    pub session: SessionConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Optional replacements for the built-in option tables.
    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Session tunables.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// How long a notice stays visible, in milliseconds.
    #[serde(default = "default_notice_ttl_ms")]
    pub notice_ttl_ms: u64,
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "voxagent_client=debug,info").
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Whether to output logs in JSON format.
    #[serde(default)]
    pub json: bool,
}

/// Per-table catalog overrides. A table left out keeps its built-in
/// contents.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogConfig {
    pub languages: Option<Vec<LanguageOption>>,
    pub llm_models: Option<Vec<ModelOption>>,
    pub tts_models: Option<Vec<ModelOption>>,
    pub stt_models: Option<Vec<ModelOption>>,
    pub default_voice: Option<String>,
}

fn default_notice_ttl_ms() -> u64 {
    DEFAULT_NOTICE_TTL.as_millis() as u64
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            notice_ttl_ms: default_notice_ttl_ms(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

impl SessionConfig {
    pub fn settings(&self) -> SessionSettings {
        SessionSettings {
            notice_ttl: Duration::from_millis(self.notice_ttl_ms),
        }
    }
}

impl CatalogConfig {
    /// Applies the overrides on top of [`Catalog::builtin`].
    pub fn build(&self) -> Catalog {
        let mut catalog = Catalog::builtin();
        if let Some(languages) = &self.languages {
            catalog.languages = languages.clone();
        }
        if let Some(models) = &self.llm_models {
            catalog.llm_models = models.clone();
        }
        if let Some(models) = &self.tts_models {
            catalog.tts_models = models.clone();
        }
        if let Some(models) = &self.stt_models {
            catalog.stt_models = models.clone();
        }
        if let Some(voice) = &self.default_voice {
            catalog.default_voice = voice.clone();
        }
        catalog
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the configuration file.
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse the configuration file.
    #[error("failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),

    /// A value is out of range.
    #[error("invalid config: {0}")]
    Invalid(String),

    /// The configured catalog cannot back a session.
    #[error("invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Loads configuration from a TOML file, falling back to defaults.
///
/// Environment variable overrides:
/// - `VOXAGENT_BACKEND_URL` overrides `backend.base_url`
/// - `VOXAGENT_TIMEOUT_MS` overrides `backend.timeout_ms`
/// - `VOXAGENT_NOTICE_TTL_MS` overrides `session.notice_ttl_ms`
/// - `VOXAGENT_LOG_LEVEL` overrides `logging.level`
/// - `VOXAGENT_LOG_JSON` overrides `logging.json` (set to "true" to enable)
///
/// # Errors
///
/// Returns `ConfigError` if the file exists but cannot be read or parsed,
/// if `backend.timeout_ms` is zero, or if the resulting catalog has an
/// empty table.
pub fn load_config(path: Option<&str>) -> Result<Config, ConfigError> {
    load_config_with_env(path, |key| std::env::var(key).ok())
}

/// [`load_config`] with an explicit environment lookup.
pub fn load_config_with_env(
    path: Option<&str>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Config, ConfigError> {
    let mut config = match path {
        Some(p) => match std::fs::read_to_string(p) {
            Ok(contents) => toml::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::info!(path = p, "config file not found, using defaults");
                Config::default()
            }
            Err(e) => return Err(ConfigError::FileRead(e)),
        },
        None => Config::default(),
    };

    if let Some(url) = env("VOXAGENT_BACKEND_URL") {
        if !url.trim().is_empty() {
            config.backend.base_url = url;
        }
    }
    if let Some(timeout) = env("VOXAGENT_TIMEOUT_MS") {
        match timeout.parse::<u64>() {
            Ok(0) | Err(_) => {
                tracing::warn!(value = %timeout, "ignoring invalid VOXAGENT_TIMEOUT_MS");
            }
            Ok(parsed) => config.backend.timeout_ms = parsed,
        }
    }
    if let Some(ttl) = env("VOXAGENT_NOTICE_TTL_MS") {
        if let Ok(parsed) = ttl.parse() {
            config.session.notice_ttl_ms = parsed;
        }
    }
    if let Some(level) = env("VOXAGENT_LOG_LEVEL") {
        config.logging.level = level;
    }
    if let Some(json) = env("VOXAGENT_LOG_JSON") {
        config.logging.json = json == "true" || json == "1";
    }

    if config.backend.timeout_ms == 0 {
        return Err(ConfigError::Invalid(
            "backend.timeout_ms must be greater than zero".to_string(),
        ));
    }
    config.catalog.build().check()?;
    Ok(config)
}
