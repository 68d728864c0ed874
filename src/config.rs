use std::env;
use std::net::SocketAddr;
use thiserror::Error;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub listen: String,
    pub db_path: String,
    pub static_dir: String,
    pub log_level: String,
    pub log_format: LogFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("`{0}` must not be empty")]
    Empty(&'static str),
    #[error("invalid `LISTEN` address `{value}`: {source}")]
    InvalidListen {
        value: String,
        source: std::net::AddrParseError,
    },
    #[error("invalid `LOG_FORMAT` value `{0}` (expected `text` or `json`)")]
    InvalidLogFormat(String),
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let config = Self {
            listen: lookup("LISTEN").unwrap_or_else(|| "127.0.0.1:8080".to_string()),
            db_path: lookup("DB_PATH").unwrap_or_else(|| "data/app.db".to_string()),
            static_dir: lookup("STATIC_DIR").unwrap_or_else(|| "static".to_string()),
            log_level: lookup("LOG_LEVEL").unwrap_or_else(|| "info".to_string()),
            log_format: parse_log_format(lookup("LOG_FORMAT"))?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.listen.trim().is_empty() {
            return Err(ConfigError::Empty("LISTEN"));
        }
        if let Err(source) = self.listen.parse::<SocketAddr>() {
            return Err(ConfigError::InvalidListen {
                value: self.listen.clone(),
                source,
            });
        }
        if self.db_path.trim().is_empty() {
            return Err(ConfigError::Empty("DB_PATH"));
        }
        if self.static_dir.trim().is_empty() {
            return Err(ConfigError::Empty("STATIC_DIR"));
        }
        if self.log_level.trim().is_empty() {
            return Err(ConfigError::Empty("LOG_LEVEL"));
        }
        Ok(())
    }
}

fn parse_log_format(value: Option<String>) -> Result<LogFormat, ConfigError> {
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(LogFormat::default()),
        Some(text) if text.eq_ignore_ascii_case("text") => Ok(LogFormat::Text),
        Some(json) if json.eq_ignore_ascii_case("json") => Ok(LogFormat::Json),
        Some(other) => Err(ConfigError::InvalidLogFormat(other.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::{AppConfig, ConfigError, LogFormat};
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<&str, &str> = vars.iter().copied().collect();
        AppConfig::from_lookup(|name| vars.get(name).map(ToString::to_string))
    }

    #[test]
    fn defaults_apply_when_env_is_empty() {
        let config = load(&[]).expect("config should load");
        assert_eq!(config.listen, "127.0.0.1:8080");
        assert_eq!(config.db_path, "data/app.db");
        assert_eq!(config.static_dir, "static");
        assert_eq!(config.log_level, "info");
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    fn env_values_override_defaults() {
        let config = load(&[
            ("LISTEN", "0.0.0.0:9000"),
            ("DB_PATH", "/tmp/tasks.db"),
            ("LOG_FORMAT", "json"),
        ])
        .expect("config should load");
        assert_eq!(config.listen, "0.0.0.0:9000");
        assert_eq!(config.db_path, "/tmp/tasks.db");
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn reject_unparsable_listen_address() {
        let error = load(&[("LISTEN", "not-an-address")]).expect_err("config should fail");
        assert!(error.to_string().contains("invalid `LISTEN` address"));
    }

    #[test]
    fn reject_unknown_log_format() {
        let error = load(&[("LOG_FORMAT", "xml")]).expect_err("config should fail");
        assert!(error.to_string().contains("invalid `LOG_FORMAT`"));
    }

    #[test]
    fn reject_blank_db_path() {
        let error = load(&[("DB_PATH", "  ")]).expect_err("config should fail");
        assert_eq!(error.to_string(), "`DB_PATH` must not be empty");
    }
}
