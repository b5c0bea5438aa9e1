use std::env;
use std::fs;
use log::LevelFilter;
use serde::Deserialize;
use crate::errors::ConfigError;

#[derive(Deserialize)]
pub struct General {
    pub log_path: String,
    pub log_level: LevelFilter,
    pub log_to_stdout: bool,
}

#[derive(Deserialize)]
pub struct Server {
    #[serde(default = "default_bind_address")]
    pub bind_address: String,
}

#[derive(Deserialize)]
pub struct OpenWeatherParameters {
    #[serde(default)]
    pub api_key: String,
    pub current_url: String,
    pub forecast_url: String,
    pub onecall_url: String,
    #[serde(default = "default_units")]
    pub units: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Deserialize)]
pub struct Config {
    pub general: General,
    pub server: Server,
    pub open_weather: OpenWeatherParameters,
}

fn default_bind_address() -> String {
    "0.0.0.0:5000".to_string()
}

fn default_units() -> String {
    "metric".to_string()
}

fn default_timeout_secs() -> u64 {
    20
}

/// Loads the configuration file and returns a struct with all configuration items
///
/// The API key given in the environment variable OPENWEATHER_API_KEY takes
/// precedence over any key in the file.
///
/// # Arguments
///
/// * 'config_path' - path to the configuration file
pub fn load_config(config_path: &str) -> Result<Config, ConfigError> {

    let toml = fs::read_to_string(config_path)?;
    let mut config = parse_config(&toml)?;

    if let Ok(api_key) = env::var("OPENWEATHER_API_KEY") {
        config.open_weather.api_key = api_key;
    }

    if config.open_weather.api_key.trim().is_empty() {
        return Err(ConfigError::from("no OpenWeather API key configured"));
    }

    Ok(config)
}

/// Parses a configuration document
///
/// # Arguments
///
/// * 'toml' - the configuration as a toml string
fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(toml)?;

    if config.open_weather.timeout_secs == 0 {
        return Err(ConfigError::from("open_weather.timeout_secs must be greater than zero"));
    }

    Ok(config)
}
