//! Конфигурация внешнего источника решений из окружения.

use std::time::Duration;

use thiserror::Error;

pub const ENV_API_KEY: &str = "GOOGLE_API_KEY";
pub const ENV_MODEL: &str = "HOLDEM_REMOTE_MODEL";
pub const ENV_ENDPOINT: &str = "HOLDEM_REMOTE_ENDPOINT";
pub const ENV_TIMEOUT_SECS: &str = "HOLDEM_REMOTE_TIMEOUT_SECS";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Переменная {0} не задана – удалённые игроки отключены")]
    MissingApiKey(&'static str),

    #[error("Переменная {name}: некорректное значение {value:?}")]
    InvalidValue { name: &'static str, value: String },
}

/// Куда и с чем ходить за решением.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteConfig {
    pub api_key: String,
    pub model: String,
    /// Полный URL generateContent (без ключа).
    pub endpoint: String,
    pub timeout: Duration,
}

impl RemoteConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        let model = DEFAULT_MODEL.to_string();
        Self {
            api_key: api_key.into(),
            endpoint: default_endpoint(&model),
            model,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// То же, что `from_env`, но с произвольным источником переменных.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let api_key = lookup(ENV_API_KEY)
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigError::MissingApiKey(ENV_API_KEY))?;

        let model = lookup(ENV_MODEL)
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let endpoint = lookup(ENV_ENDPOINT)
            .filter(|e| !e.trim().is_empty())
            .unwrap_or_else(|| default_endpoint(&model));

        let timeout = match lookup(ENV_TIMEOUT_SECS) {
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidValue {
                        name: ENV_TIMEOUT_SECS,
                        value: raw,
                    })
                }
            },
        };

        Ok(Self {
            api_key,
            model,
            endpoint,
            timeout,
        })
    }
}

fn default_endpoint(model: &str) -> String {
    format!("https://generativelanguage.googleapis.com/v1beta/models/{model}:generateContent")
}
