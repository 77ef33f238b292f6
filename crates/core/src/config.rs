use std::env;
use std::fs;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

/// Effective application configuration: built-in defaults, overlaid by an
/// optional TOML file, overlaid by `FREIGHTDESK_*` environment variables.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub broker: BrokerConfig,
    pub currency: String,
    pub logging: LoggingConfig,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BrokerConfig {
    pub broker_id: String,
    pub display_name: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    Compact,
    Pretty,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file `{path}`: {source}")]
    ReadFile { path: PathBuf, source: std::io::Error },
    #[error("could not parse config file `{path}`: {source}")]
    ParseFile { path: PathBuf, source: toml::de::Error },
    #[error("invalid environment override for `{key}`: `{value}`")]
    InvalidEnvOverride { key: String, value: String },
    #[error("configuration validation failed: {0}")]
    Validation(String),
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    broker: Option<FileBroker>,
    currency: Option<String>,
    logging: Option<FileLogging>,
}

#[derive(Debug, Default, Deserialize)]
struct FileBroker {
    broker_id: Option<String>,
    display_name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct FileLogging {
    level: Option<String>,
    format: Option<LogFormat>,
}

#[derive(Clone, Debug, Default)]
pub struct LoadOptions {
    pub config_path: Option<PathBuf>,
}

const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            broker: BrokerConfig {
                broker_id: "broker-001".to_owned(),
                display_name: "FreightDesk".to_owned(),
            },
            currency: "USD".to_owned(),
            logging: LoggingConfig { level: "info".to_owned(), format: LogFormat::Compact },
        }
    }
}

impl AppConfig {
    pub fn load(options: LoadOptions) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        let path = options
            .config_path
            .or_else(|| env::var("FREIGHTDESK_CONFIG").ok().map(PathBuf::from));
        if let Some(path) = path {
            let contents = fs::read_to_string(&path)
                .map_err(|source| ConfigError::ReadFile { path: path.clone(), source })?;
            let file: FileConfig = toml::from_str(&contents)
                .map_err(|source| ConfigError::ParseFile { path: path.clone(), source })?;
            config.apply_file(file);
        }

        config.apply_env()?;
        config.validate()?;
        Ok(config)
    }

    fn apply_file(&mut self, file: FileConfig) {
        if let Some(broker) = file.broker {
            if let Some(broker_id) = broker.broker_id {
                self.broker.broker_id = broker_id;
            }
            if let Some(display_name) = broker.display_name {
                self.broker.display_name = display_name;
            }
        }
        if let Some(currency) = file.currency {
            self.currency = currency;
        }
        if let Some(logging) = file.logging {
            if let Some(level) = logging.level {
                self.logging.level = level;
            }
            if let Some(format) = logging.format {
                self.logging.format = format;
            }
        }
    }

    fn apply_env(&mut self) -> Result<(), ConfigError> {
        if let Ok(broker_id) = env::var("FREIGHTDESK_BROKER_ID") {
            self.broker.broker_id = broker_id;
        }
        if let Ok(currency) = env::var("FREIGHTDESK_CURRENCY") {
            self.currency = currency;
        }
        if let Ok(level) = env::var("FREIGHTDESK_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = env::var("FREIGHTDESK_LOG_FORMAT") {
            self.logging.format = match format.as_str() {
                "compact" => LogFormat::Compact,
                "pretty" => LogFormat::Pretty,
                other => {
                    return Err(ConfigError::InvalidEnvOverride {
                        key: "FREIGHTDESK_LOG_FORMAT".to_owned(),
                        value: other.to_owned(),
                    });
                }
            };
        }
        Ok(())
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.broker.broker_id.trim().is_empty() {
            return Err(ConfigError::Validation("broker_id must not be empty".to_owned()));
        }
        if self.currency.len() != 3 {
            return Err(ConfigError::Validation(format!(
                "currency must be a 3-letter code, got `{}`",
                self.currency
            )));
        }
        if !VALID_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "log level must be one of {VALID_LEVELS:?}, got `{}`",
                self.logging.level
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;
    use std::sync::{Mutex, OnceLock};

    use super::{AppConfig, LoadOptions, LogFormat};

    // Env-var tests share process state; serialize them.
    fn env_lock() -> &'static Mutex<()> {
        static LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        LOCK.get_or_init(Mutex::default)
    }

    fn clear_env() {
        for key in [
            "FREIGHTDESK_CONFIG",
            "FREIGHTDESK_BROKER_ID",
            "FREIGHTDESK_CURRENCY",
            "FREIGHTDESK_LOG_LEVEL",
            "FREIGHTDESK_LOG_FORMAT",
        ] {
            std::env::remove_var(key);
        }
    }

    #[test]
    fn defaults_load_without_a_config_file() {
        let _guard = env_lock().lock().expect("env lock");
        clear_env();

        let config = AppConfig::load(LoadOptions::default()).expect("defaults are valid");
        assert_eq!(config.broker.broker_id, "broker-001");
        assert_eq!(config.currency, "USD");
        assert_eq!(config.logging.format, LogFormat::Compact);
    }

    #[test]
    fn file_values_override_defaults() {
        let _guard = env_lock().lock().expect("env lock");
        clear_env();

        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(
            file,
            "currency = \"EUR\"\n\n[broker]\nbroker_id = \"broker-042\"\n\n[logging]\nlevel = \"debug\"\nformat = \"pretty\"\n"
        )
        .expect("write config");

        let config = AppConfig::load(LoadOptions {
            config_path: Some(file.path().to_path_buf()),
        })
        .expect("file config is valid");

        assert_eq!(config.currency, "EUR");
        assert_eq!(config.broker.broker_id, "broker-042");
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn env_overrides_take_precedence_over_file_values() {
        let _guard = env_lock().lock().expect("env lock");
        clear_env();

        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "currency = \"EUR\"").expect("write config");
        std::env::set_var("FREIGHTDESK_CURRENCY", "CAD");

        let config = AppConfig::load(LoadOptions {
            config_path: Some(file.path().to_path_buf()),
        })
        .expect("config is valid");
        clear_env();

        assert_eq!(config.currency, "CAD");
    }

    #[test]
    fn invalid_log_level_fails_validation() {
        let _guard = env_lock().lock().expect("env lock");
        clear_env();
        std::env::set_var("FREIGHTDESK_LOG_LEVEL", "verbose");

        let error = AppConfig::load(LoadOptions::default()).expect_err("level must be rejected");
        clear_env();

        assert!(matches!(error, super::ConfigError::Validation(_)));
    }

    #[test]
    fn invalid_log_format_override_is_rejected() {
        let _guard = env_lock().lock().expect("env lock");
        clear_env();
        std::env::set_var("FREIGHTDESK_LOG_FORMAT", "json5");

        let error = AppConfig::load(LoadOptions::default()).expect_err("format must be rejected");
        clear_env();

        assert!(matches!(error, super::ConfigError::InvalidEnvOverride { .. }));
    }
}
