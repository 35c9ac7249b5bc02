use serde::{Deserialize, Serialize};
use std::{env, fmt, fs, path::Path, str::FromStr, time::Duration};
use thiserror::Error;
use url::Url;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
const DEFAULT_HEALTH_URL: &str = "http://localhost:8000/";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_HEALTH_INTERVAL_SECS: u64 = 30;

/// Errors raised while loading or validating a [`ClientConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("failed to read configuration file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The file extension is not one of yaml, yml, json, toml.
    #[error("Unsupported configuration format. Use 'yaml', 'json', or 'toml'.")]
    UnsupportedFormat,

    /// The file contents did not parse.
    #[error("failed to parse configuration file {path}: {message}")]
    Parse { path: String, message: String },

    /// An environment override held an unusable value.
    #[error("Invalid {name} value: {value}")]
    InvalidEnv { name: &'static str, value: String },

    /// The merged configuration is inconsistent.
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    /// Serializing the configuration failed.
    #[error("failed to serialize configuration: {0}")]
    Serialize(String),
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

impl FromStr for LogFormat {
    type Err = &'static str;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            _ => Err("unknown log format"),
        }
    }
}

impl fmt::Display for LogFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Text => "text",
            Self::Json => "json",
        })
    }
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level directive when `RUST_LOG` is unset.
    pub level: String,
    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Text,
        }
    }
}

/// Configuration of the MarketMind client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL every API endpoint path is appended to.
    pub api_base_url: String,

    /// Liveness probe URL (the backend root).
    pub health_url: String,

    /// Per-request timeout; a timeout counts as the backend being unreachable.
    pub request_timeout_secs: u64,

    /// Delay between health probes.
    pub health_interval_secs: u64,

    /// Logging settings.
    pub logging: LoggingConfig,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ClientConfig {
    /// Generates a default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            health_url: DEFAULT_HEALTH_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            health_interval_secs: DEFAULT_HEALTH_INTERVAL_SECS,
            logging: LoggingConfig::default(),
        }
    }

    /// Loads the configuration from a file, environment variables, or defaults.
    ///
    /// Values from the file win; an environment variable only fills a value the
    /// file left at its default.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if the file cannot be read or parsed, an
    /// environment override is malformed, or the result fails validation.
    pub fn load_config(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match config_path {
            Some(path) => Self::from_file(path)?,
            None => Self::with_defaults(),
        };

        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Parses a configuration file, choosing the format by extension.
    ///
    /// # Errors
    /// Returns a [`ConfigError`] if reading or parsing fails.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: display.clone(),
            source,
        })?;
        let parse_error = |message: String| ConfigError::Parse {
            path: display.clone(),
            message,
        };

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml" | "yml") => {
                serde_yml::from_str(&content).map_err(|err| parse_error(err.to_string()))
            }
            Some("json") => {
                serde_json::from_str(&content).map_err(|err| parse_error(err.to_string()))
            }
            Some("toml") => toml::from_str(&content).map_err(|err| parse_error(err.to_string())),
            _ => Err(ConfigError::UnsupportedFormat),
        }
    }

    fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        let defaults = Self::with_defaults();

        if self.api_base_url == defaults.api_base_url
            && let Some(value) = env_value("MARKETMIND_API_BASE_URL")
        {
            self.api_base_url = value;
        }
        if self.health_url == defaults.health_url
            && let Some(value) = env_value("MARKETMIND_HEALTH_URL")
        {
            self.health_url = value;
        }
        if self.request_timeout_secs == defaults.request_timeout_secs
            && let Some(value) = env_value("MARKETMIND_REQUEST_TIMEOUT_SECS")
        {
            self.request_timeout_secs = parse_env("MARKETMIND_REQUEST_TIMEOUT_SECS", &value)?;
        }
        if self.health_interval_secs == defaults.health_interval_secs
            && let Some(value) = env_value("MARKETMIND_HEALTH_INTERVAL_SECS")
        {
            self.health_interval_secs = parse_env("MARKETMIND_HEALTH_INTERVAL_SECS", &value)?;
        }
        if self.logging.level == defaults.logging.level
            && let Some(value) = env_value("MARKETMIND_LOG_LEVEL")
        {
            self.logging.level = value;
        }
        if self.logging.format == defaults.logging.format
            && let Some(value) = env_value("MARKETMIND_LOG_FORMAT")
        {
            self.logging.format = parse_env("MARKETMIND_LOG_FORMAT", &value)?;
        }

        Ok(())
    }

    /// Checks the merged configuration for unusable values.
    ///
    /// # Errors
    /// Returns [`ConfigError::Invalid`] describing the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, raw) in [
            ("api_base_url", &self.api_base_url),
            ("health_url", &self.health_url),
        ] {
            let url = Url::parse(raw)
                .map_err(|err| ConfigError::Invalid(format!("{name} is not a valid URL: {err}")))?;
            if !matches!(url.scheme(), "http" | "https") {
                return Err(ConfigError::Invalid(format!(
                    "{name} must use http or https, got {}",
                    url.scheme()
                )));
            }
        }
        if self.request_timeout_secs == 0 {
            return Err(ConfigError::Invalid(
                "request_timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.health_interval_secs == 0 {
            return Err(ConfigError::Invalid(
                "health_interval_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Per-request timeout.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Delay between health probes.
    #[must_use]
    pub const fn health_interval(&self) -> Duration {
        Duration::from_secs(self.health_interval_secs)
    }

    /// Renders the configuration as YAML.
    ///
    /// # Errors
    /// Returns [`ConfigError::Serialize`] if serialization fails.
    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yml::to_string(self).map_err(|err| ConfigError::Serialize(err.to_string()))
    }

    /// Renders the configuration as pretty JSON.
    ///
    /// # Errors
    /// Returns [`ConfigError::Serialize`] if serialization fails.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string_pretty(self).map_err(|err| ConfigError::Serialize(err.to_string()))
    }

    /// Renders the configuration as TOML.
    ///
    /// # Errors
    /// Returns [`ConfigError::Serialize`] if serialization fails.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|err| ConfigError::Serialize(err.to_string()))
    }
}

fn env_value(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_env<T: FromStr>(name: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::InvalidEnv {
        name,
        value: value.to_string(),
    })
}
