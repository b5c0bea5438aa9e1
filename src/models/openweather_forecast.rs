use serde::Deserialize;
use crate::models::openweather_onecall::WeatherDescriptor;

#[derive(Deserialize, Debug, Clone, Default)]
pub struct MainMetrics {
    pub temp: Option<f64>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Wind {
    pub speed: Option<f64>,
    pub deg: Option<f64>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Clouds {
    pub all: Option<f64>,
}

/// One sub-daily forecast point, every metric group may be absent
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ForecastEntry {
    pub dt: i64,
    pub main: Option<MainMetrics>,
    pub wind: Option<Wind>,
    pub clouds: Option<Clouds>,
    /// Visibility in metres
    pub visibility: Option<f64>,
    #[serde(default)]
    pub weather: Vec<WeatherDescriptor>,
}

#[derive(Deserialize, Debug)]
pub struct ShortRangeForecast {
    #[serde(default)]
    pub list: Vec<ForecastEntry>,
}
