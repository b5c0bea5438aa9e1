use serde::Deserialize;

#[derive(Deserialize, Debug, Clone)]
pub struct WeatherDescriptor {
    pub main: Option<String>,
    pub description: Option<String>,
    pub icon: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct DayTemperature {
    pub day: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

#[derive(Deserialize, Debug)]
pub struct DailyEntry {
    pub dt: i64,
    pub temp: Option<DayTemperature>,
    pub humidity: Option<f64>,
    pub pressure: Option<f64>,
    pub clouds: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_deg: Option<f64>,
    #[serde(default)]
    pub weather: Vec<WeatherDescriptor>,
}

#[derive(Deserialize, Debug)]
pub struct OneCall {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    #[serde(default)]
    pub daily: Vec<DailyEntry>,
}
