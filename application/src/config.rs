//! [`Config`]-related definitions.

use std::time;

use config::{builder::DefaultState, ConfigBuilder, ConfigError};
use secrecy::SecretString;
use serde::Deserialize;
use smart_default::SmartDefault;

/// Application configuration.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// LIMS API configuration.
    pub api: Api,

    /// Worklist configuration.
    pub worklist: Worklist,

    /// Attachment upload configuration.
    pub upload: Upload,

    /// Log configuration.
    pub log: Log,
}

impl Config {
    /// Creates a new [`Config`] by:
    /// - loading it from the provided `path` (if any);
    /// - merging it with the environment variables (if any);
    /// - using default values for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(path: impl AsRef<str>) -> Result<Self, ConfigError> {
        ConfigBuilder::<DefaultState>::default()
            .add_source(config::File::with_name(path.as_ref()).required(false))
            .add_source(config::Environment::with_prefix("CONF").separator("."))
            .build()?
            .try_deserialize()
    }
}

impl From<&Config> for service::Config {
    fn from(value: &Config) -> Self {
        Self {
            artificial_delay: value.worklist.artificial_delay,
            upload_progress_interval: value.upload.progress_interval,
        }
    }
}

/// LIMS API configuration.
#[derive(Clone, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Api {
    /// Base URL of the BFF serving both `/bff` and `/api` paths.
    #[default("http://127.0.0.1:5000".to_owned())]
    pub base_url: String,

    /// Session cookie (e.g. `.AspNetCore.Cookies=...`) to authenticate with.
    pub cookie: Option<SecretString>,

    /// Timeout of a single request.
    #[default(time::Duration::from_secs(30))]
    #[serde(with = "humantime_serde")]
    pub timeout: time::Duration,
}

impl TryFrom<Api> for service::infra::rest::Config {
    type Error = url::ParseError;

    fn try_from(value: Api) -> Result<Self, Self::Error> {
        let Api {
            base_url,
            cookie,
            timeout,
        } = value;

        Ok(Self {
            base_url: base_url.parse()?,
            cookie,
            timeout,
        })
    }
}

/// Worklist configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Worklist {
    /// Number of accessions on a page.
    #[default(service::worklist::DEFAULT_PAGE_SIZE)]
    pub page_size: u32,

    /// Quiet period after which the typed search is applied.
    #[default(time::Duration::from_millis(400))]
    #[serde(with = "humantime_serde")]
    pub debounce: time::Duration,

    /// Artificial delay of worklist fetches, if any.
    #[serde(with = "humantime_serde")]
    pub artificial_delay: Option<time::Duration>,
}

/// Attachment upload configuration.
#[derive(Clone, Copy, Debug, Deserialize, SmartDefault)]
#[serde(default)]
pub struct Upload {
    /// Interval between simulated progress ticks.
    #[default(time::Duration::from_millis(200))]
    #[serde(with = "humantime_serde")]
    pub progress_interval: time::Duration,
}

/// Log configuration.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(default)]
pub struct Log {
    /// Log level.
    pub level: LogLevel,
}

/// Log level.
#[derive(Clone, Copy, Debug, Default, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LogLevel {
    /// Designates very low priority, often extremely verbose, information.
    Trace,

    /// Designates lower priority information.
    Debug,

    /// Designates useful information.
    #[default]
    Info,

    /// Designates hazardous situations.
    Warn,

    /// Designates very serious errors.
    Error,
}

impl From<LogLevel> for tracing::Level {
    fn from(value: LogLevel) -> Self {
        match value {
            LogLevel::Trace => Self::TRACE,
            LogLevel::Debug => Self::DEBUG,
            LogLevel::Info => Self::INFO,
            LogLevel::Warn => Self::WARN,
            LogLevel::Error => Self::ERROR,
        }
    }
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use super::Config;

    #[test]
    fn falls_back_to_defaults() {
        let config = Config::new("does-not-exist.toml").unwrap();

        assert_eq!(config.api.base_url, "http://127.0.0.1:5000");
        assert!(config.api.cookie.is_none());
        assert_eq!(config.worklist.page_size, 10);
        assert_eq!(config.worklist.debounce, Duration::from_millis(400));
        assert_eq!(config.worklist.artificial_delay, None);

        let service = service::Config::from(&config);
        assert_eq!(
            service.upload_progress_interval,
            Duration::from_millis(200),
        );
    }

    #[test]
    fn rejects_invalid_base_url() {
        let mut config = Config::default();
        config.api.base_url = "not a url".into();

        assert!(service::infra::rest::Config::try_from(config.api).is_err());
    }
}
