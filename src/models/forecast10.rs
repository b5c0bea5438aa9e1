use std::fmt;
use std::fmt::Formatter;
use chrono::NaiveDate;
use serde::Serialize;

/// Provenance of a day in the 10-day forecast
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceTag {
    #[serde(rename = "onecall-daily")]
    OneCallDaily,
    #[serde(rename = "3h-aggregate")]
    ThreeHourAggregate,
    #[serde(rename = "extrapolated")]
    Extrapolated,
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for SourceTag {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            SourceTag::OneCallDaily       => write!(f, "onecall-daily"),
            SourceTag::ThreeHourAggregate => write!(f, "3h-aggregate"),
            SourceTag::Extrapolated       => write!(f, "extrapolated"),
        }
    }
}

/// One day of the 10-day forecast, serialized the way the client expects it
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct DayForecast {
    pub day: String,
    pub date: NaiveDate,
    /// Wind speed in knots
    pub wind: i64,
    /// Estimated wave height in metres, one decimal
    pub waves: f64,
    /// Temperature in degrees Celsius
    pub temp: i64,
    pub condition: String,
    pub description: String,
    pub humidity: i64,
    pub pressure: i64,
    /// Visibility in km formatted with one decimal
    pub visibility: String,
    pub clouds: i64,
    pub icon: String,
    #[serde(rename = "windDirection")]
    pub wind_direction: i64,
    pub source: SourceTag,
}

/// Implementation of the Display Trait for pretty print
impl fmt::Display for DayForecast {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{} {:<9} Wind {:>3} kn, Waves {:>4.1} m, Temp {:>3}, {:<12} ({})",
               self.date, self.day, self.wind, self.waves, self.temp, self.condition, self.source)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ResolvedLocation {
    pub name: String,
    pub country: String,
    pub lat: f64,
    pub lon: f64,
}

#[derive(Serialize, Debug, Clone)]
pub struct Forecast10Response {
    pub location: ResolvedLocation,
    pub days: Vec<DayForecast>,
}

impl Forecast10Response {
    /// Returns false when no source produced any day, an empty sequence is never padded
    pub fn is_available(&self) -> bool {
        !self.days.is_empty()
    }
}
