use std::fmt;
use std::time::Duration;

use thiserror::Error;
use tracing::error;
use url::Url;

use crate::error::ErrorKind;

pub const PRACTICUM_TOKEN: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN: &str = "TELEGRAM_TOKEN";
pub const TELEGRAM_CHAT_ID: &str = "TELEGRAM_CHAT_ID";

pub const PRACTICUM_ENDPOINT: &str = "PRACTICUM_ENDPOINT";
pub const TELEGRAM_API_URL: &str = "TELEGRAM_API_URL";
pub const RETRY_TIME: &str = "RETRY_TIME";
pub const REQUEST_TIMEOUT: &str = "REQUEST_TIMEOUT";

/// Variables that must be set and non-empty before polling starts.
pub const REQUIRED_VARS: [&str; 3] = [PRACTICUM_TOKEN, TELEGRAM_TOKEN, TELEGRAM_CHAT_ID];

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_RETRY_TIME: Duration = Duration::from_secs(600);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("missing required environment variables: {}", .0.join(", "))]
    MissingVars(Vec<&'static str>),
    #[error("invalid value for {var}: {message}")]
    Invalid { var: &'static str, message: String },
}

impl ConfigError {
    pub fn kind(&self) -> ErrorKind {
        ErrorKind::Config
    }
}

/// Runtime configuration, built once at startup and passed by reference.
#[derive(Clone)]
pub struct BotConfig {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
    /// Homework statuses endpoint.
    pub endpoint: Url,
    /// Base URL of the Telegram Bot API.
    pub telegram_api_url: Url,
    /// Pause between poll iterations, after successes and failures alike.
    pub retry_interval: Duration,
    /// Timeout applied to every outbound HTTP request.
    pub request_timeout: Duration,
}

impl fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BotConfig")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("telegram_chat_id", &self.telegram_chat_id)
            .field("endpoint", &self.endpoint.as_str())
            .field("telegram_api_url", &self.telegram_api_url.as_str())
            .field("retry_interval", &self.retry_interval)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl BotConfig {
    /// Reads configuration from the process environment.
    ///
    /// After a passing [`check_tokens`] only the optional values can fail here.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    /// Reads configuration through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let missing = missing_vars(&lookup);
        if !missing.is_empty() {
            return Err(ConfigError::MissingVars(missing));
        }

        let required = |name: &'static str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .ok_or(ConfigError::MissingVars(vec![name]))
        };

        let mut config = Self {
            practicum_token: required(PRACTICUM_TOKEN)?,
            telegram_token: required(TELEGRAM_TOKEN)?,
            telegram_chat_id: required(TELEGRAM_CHAT_ID)?,
            endpoint: parse_url(DEFAULT_ENDPOINT, PRACTICUM_ENDPOINT)?,
            telegram_api_url: parse_url(DEFAULT_TELEGRAM_API_URL, TELEGRAM_API_URL)?,
            retry_interval: DEFAULT_RETRY_TIME,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        };

        if let Some(raw) = optional(&lookup, PRACTICUM_ENDPOINT) {
            config.endpoint = parse_url(&raw, PRACTICUM_ENDPOINT)?;
        }
        if let Some(raw) = optional(&lookup, TELEGRAM_API_URL) {
            config.telegram_api_url = parse_url(&raw, TELEGRAM_API_URL)?;
        }
        if let Some(raw) = optional(&lookup, RETRY_TIME) {
            config = config.with_retry_interval(parse_secs(&raw, RETRY_TIME)?);
        }
        if let Some(raw) = optional(&lookup, REQUEST_TIMEOUT) {
            config = config.with_request_timeout(parse_secs(&raw, REQUEST_TIMEOUT)?);
        }

        Ok(config)
    }

    pub fn with_endpoint(mut self, endpoint: Url) -> Self {
        self.endpoint = endpoint;
        self
    }

    pub fn with_telegram_api_url(mut self, url: Url) -> Self {
        self.telegram_api_url = url;
        self
    }

    pub fn with_retry_interval(mut self, interval: Duration) -> Self {
        self.retry_interval = interval;
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

pub fn env_lookup(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Names of required variables that are absent or blank.
pub fn missing_vars<F>(lookup: F) -> Vec<&'static str>
where
    F: Fn(&str) -> Option<String>,
{
    REQUIRED_VARS
        .into_iter()
        .filter(|name| lookup(*name).map_or(true, |v| v.trim().is_empty()))
        .collect()
}

/// Returns `true` when every required variable is present and non-empty.
///
/// Each missing variable is logged at error level.
pub fn check_tokens<F>(lookup: F) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    let missing = missing_vars(lookup);
    for var in &missing {
        error!(var, "Missing required environment variable");
    }
    missing.is_empty()
}

fn optional<F>(lookup: &F, name: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_url(raw: &str, var: &'static str) -> Result<Url, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::Invalid {
        var,
        message: e.to_string(),
    })?;
    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Invalid {
            var,
            message: format!("{raw} must use http or https"),
        });
    }
    Ok(url)
}

fn parse_secs(raw: &str, var: &'static str) -> Result<Duration, ConfigError> {
    match raw.parse::<u64>() {
        Ok(0) => Err(ConfigError::Invalid {
            var,
            message: "must be greater than zero".into(),
        }),
        Ok(secs) => Ok(Duration::from_secs(secs)),
        Err(e) => Err(ConfigError::Invalid {
            var,
            message: format!("{raw:?} is not a number of seconds: {e}"),
        }),
    }
}
