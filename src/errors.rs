use thiserror::Error;
use crate::manager_openweather::errors::WeatherError;

#[derive(Error, Debug)]
#[error("error loading configuration: {0}")]
pub struct ConfigError(pub String);
impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError(format!("config file error: {}", e))
    }
}
impl From<toml::de::Error> for ConfigError {
    fn from(e: toml::de::Error) -> Self {
        ConfigError(format!("config document error: {}", e))
    }
}
impl From<&str> for ConfigError {
    fn from(e: &str) -> Self { ConfigError(e.to_string()) }
}

#[derive(Error, Debug)]
#[error("error setting up logging: {0}")]
pub struct LoggingError(pub String);

/// Outcomes of the forecast pipeline that end a request
///
/// `ShortRangeSource` is produced by the short-range fetch but is degraded by the
/// pipeline rather than returned to callers.
#[derive(Error, Debug)]
pub enum ForecastError {
    #[error("location resolution failed: {0}")]
    Resolution(String),
    #[error("daily forecast source failed: {0}")]
    DailySource(String),
    #[error("short range forecast source failed: {0}")]
    ShortRangeSource(String),
    #[error("upstream request failed: {0}")]
    Upstream(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("internal error: {0}")]
    Internal(String),
}

impl ForecastError {
    /// Classifies a weather source error for a pipeline stage.
    /// Unreachable hosts, timeouts and non-success statuses belong to the stage,
    /// while documents that can't be decoded are internal faults.
    ///
    /// # Arguments
    ///
    /// * 'e' - the weather source error
    /// * 'stage' - constructor for the stage specific variant
    pub fn from_source(e: WeatherError, stage: fn(String) -> ForecastError) -> ForecastError {
        match e {
            WeatherError::Document(_) => ForecastError::Internal(e.to_string()),
            _ => stage(e.to_string()),
        }
    }

    /// Returns true if the error should be reported as an upstream failure
    pub fn is_upstream(&self) -> bool {
        matches!(self,
            ForecastError::Resolution(_)
            | ForecastError::DailySource(_)
            | ForecastError::ShortRangeSource(_)
            | ForecastError::Upstream(_))
    }
}
