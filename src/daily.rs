use chrono::{DateTime, NaiveDate};
use log::info;
use crate::errors::ForecastError;
use crate::manager_openweather::{fetch_document, Endpoint, WeatherSource};
use crate::marine::*;
use crate::models::forecast10::{DayForecast, ResolvedLocation, SourceTag};
use crate::models::openweather_onecall::{DailyEntry, OneCall, WeatherDescriptor};

/// Fetches the long-range daily forecast for a location and normalizes it.
/// Any failure here is fatal to the forecast.
///
/// # Arguments
///
/// * 'source' - the weather source
/// * 'location' - resolved location to get the forecast for
pub fn fetch_daily(source: &dyn WeatherSource, location: &ResolvedLocation) -> Result<Vec<DayForecast>, ForecastError> {
    let params = [
        ("lat", location.lat.to_string()),
        ("lon", location.lon.to_string()),
        ("exclude", "minutely,hourly,alerts".to_string()),
    ];

    let one_call: OneCall = fetch_document(source, Endpoint::OneCall, &params)
        .map_err(|e| ForecastError::from_source(e, ForecastError::DailySource))?;

    let days = normalize_daily(&one_call.daily)?;
    info!("daily source returned {} days for {}", days.len(), location.name);

    Ok(days)
}

/// Converts raw daily entries into forecast days, in source order
///
/// # Arguments
///
/// * 'entries' - daily entries from the one-call document
pub fn normalize_daily(entries: &[DailyEntry]) -> Result<Vec<DayForecast>, ForecastError> {
    entries.iter().map(normalize_entry).collect()
}

/// Normalizes one daily entry, filling in defaults for anything the source left out.
/// The source has no daily visibility so it is fixed at 10 km.
///
/// # Arguments
///
/// * 'entry' - the daily entry
fn normalize_entry(entry: &DailyEntry) -> Result<DayForecast, ForecastError> {
    let wind_ms = entry.wind_speed.unwrap_or(DEFAULT_WIND_SPEED);
    let temp = entry.temp.as_ref().and_then(|t| t.day).unwrap_or(DEFAULT_TEMP);
    let weather = entry.weather.first();

    Ok(DayForecast {
        day: String::new(),
        date: utc_date(entry.dt)?,
        wind: wind_knots(wind_ms),
        waves: wave_height(wind_ms),
        temp: round_whole(temp),
        condition: descriptor_field(weather, |w| &w.main, DEFAULT_CONDITION),
        description: descriptor_field(weather, |w| &w.description, DEFAULT_DESCRIPTION),
        humidity: round_whole(entry.humidity.unwrap_or(DEFAULT_HUMIDITY)),
        pressure: round_whole(entry.pressure.unwrap_or(DEFAULT_PRESSURE)),
        visibility: DEFAULT_VISIBILITY.to_string(),
        clouds: round_whole(entry.clouds.unwrap_or(DEFAULT_CLOUDS)),
        icon: descriptor_field(weather, |w| &w.icon, DEFAULT_ICON),
        wind_direction: round_whole(entry.wind_deg.unwrap_or(DEFAULT_WIND_DIRECTION)),
        source: SourceTag::OneCallDaily,
    })
}

fn descriptor_field(
    weather: Option<&WeatherDescriptor>,
    field: fn(&WeatherDescriptor) -> &Option<String>,
    default: &str) -> String {

    weather
        .and_then(|w| field(w).clone())
        .unwrap_or_else(|| default.to_string())
}

/// Returns the UTC calendar date of an epoch timestamp
///
/// # Arguments
///
/// * 'timestamp' - seconds since the unix epoch
pub fn utc_date(timestamp: i64) -> Result<NaiveDate, ForecastError> {
    DateTime::from_timestamp(timestamp, 0)
        .map(|dt| dt.date_naive())
        .ok_or_else(|| ForecastError::Internal(format!("timestamp {} out of range", timestamp)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manager_openweather::errors::WeatherError;
    use crate::manager_openweather::RawResponse;
    use crate::models::openweather_onecall::DayTemperature;

    // 2025-06-01 12:00:00 UTC
    const JUNE_1_NOON: i64 = 1748779200;

    fn entry(dt: i64) -> DailyEntry {
        DailyEntry {
            dt,
            temp: None,
            humidity: None,
            pressure: None,
            clouds: None,
            wind_speed: None,
            wind_deg: None,
            weather: Vec::new(),
        }
    }

    #[test]
    fn converts_units() {
        let mut e = entry(JUNE_1_NOON);
        e.wind_speed = Some(10.0);
        e.wind_deg = Some(225.0);
        e.temp = Some(DayTemperature { day: Some(17.6), min: Some(12.0), max: Some(19.0) });
        e.humidity = Some(81.0);
        e.pressure = Some(1008.0);
        e.clouds = Some(75.0);
        e.weather = vec![WeatherDescriptor {
            main: Some("Rain".to_string()),
            description: Some("light rain".to_string()),
            icon: Some("10d".to_string()),
        }];

        let day = normalize_entry(&e).unwrap();

        assert_eq!(day.date, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap());
        assert_eq!(day.wind, 19);
        assert_eq!(day.waves, 3.8);
        assert_eq!(day.temp, 18);
        assert_eq!(day.humidity, 81);
        assert_eq!(day.pressure, 1008);
        assert_eq!(day.clouds, 75);
        assert_eq!(day.wind_direction, 225);
        assert_eq!(day.condition, "Rain");
        assert_eq!(day.description, "light rain");
        assert_eq!(day.icon, "10d");
        assert_eq!(day.visibility, "10.0");
        assert_eq!(day.source, SourceTag::OneCallDaily);
    }

    #[test]
    fn defaults_when_source_is_silent() {
        let day = normalize_entry(&entry(JUNE_1_NOON)).unwrap();

        assert_eq!(day.wind, 8);
        assert_eq!(day.waves, 2.0);
        assert_eq!(day.temp, 22);
        assert_eq!(day.humidity, 60);
        assert_eq!(day.pressure, 1013);
        assert_eq!(day.clouds, 20);
        assert_eq!(day.wind_direction, 0);
        assert_eq!(day.condition, "Clear");
        assert_eq!(day.description, "clear sky");
        assert_eq!(day.icon, "01d");
    }

    #[test]
    fn partial_descriptor_defaults_per_field() {
        let mut e = entry(JUNE_1_NOON);
        e.weather = vec![WeatherDescriptor { main: Some("Clouds".to_string()), description: None, icon: None }];

        let day = normalize_entry(&e).unwrap();

        assert_eq!(day.condition, "Clouds");
        assert_eq!(day.description, "clear sky");
        assert_eq!(day.icon, "01d");
    }

    #[test]
    fn keeps_source_order() {
        let days = normalize_daily(&[entry(JUNE_1_NOON), entry(JUNE_1_NOON + 86400)]).unwrap();

        assert_eq!(days.len(), 2);
        assert_eq!(days[1].date, NaiveDate::from_ymd_opt(2025, 6, 2).unwrap());
    }

    struct Daily(Result<RawResponse, WeatherError>);

    impl WeatherSource for Daily {
        fn fetch(&self, endpoint: Endpoint, params: &[(&str, String)]) -> Result<RawResponse, WeatherError> {
            assert_eq!(endpoint, Endpoint::OneCall);
            assert!(params.iter().any(|(k, v)| *k == "exclude" && v == "minutely,hourly,alerts"));
            match &self.0 {
                Ok(r) => Ok(r.clone()),
                Err(e) => Err(WeatherError::Transport(e.to_string())),
            }
        }
    }

    fn location() -> ResolvedLocation {
        ResolvedLocation { name: "Test".to_string(), country: String::new(), lat: 1.0, lon: 2.0 }
    }

    #[test]
    fn missing_daily_list_is_empty() {
        let source = Daily(Ok(RawResponse { status: 200, body: r#"{"lat":1.0,"lon":2.0}"#.to_string() }));
        assert!(fetch_daily(&source, &location()).unwrap().is_empty());
    }

    #[test]
    fn upstream_failure_is_daily_source_error() {
        let source = Daily(Err(WeatherError::Transport("timed out".to_string())));
        assert!(matches!(fetch_daily(&source, &location()), Err(ForecastError::DailySource(_))));

        let source = Daily(Ok(RawResponse { status: 401, body: "{}".to_string() }));
        assert!(matches!(fetch_daily(&source, &location()), Err(ForecastError::DailySource(_))));
    }

    #[test]
    fn malformed_document_is_internal_error() {
        let source = Daily(Ok(RawResponse { status: 200, body: r#"{"daily":[{"dt":"soon"}]}"#.to_string() }));
        assert!(matches!(fetch_daily(&source, &location()), Err(ForecastError::Internal(_))));
    }
}
