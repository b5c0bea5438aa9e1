use std::collections::BTreeMap;
use chrono::NaiveDate;
use log::{info, warn};
use crate::errors::ForecastError;
use crate::daily::utc_date;
use crate::location::LocationQuery;
use crate::manager_openweather::{fetch_document, Endpoint, WeatherSource};
use crate::marine::*;
use crate::models::forecast10::{DayForecast, ResolvedLocation, SourceTag};
use crate::models::openweather_forecast::{ForecastEntry, ShortRangeForecast};

/// Fetches the short-range (3-hourly) forecast and aggregates it into days.
///
/// A source that can't be reached, times out or answers with a non-success
/// status gives `ForecastError::ShortRangeSource`, which callers are expected to
/// degrade on. A document that can't be decoded is an internal error.
///
/// # Arguments
///
/// * 'source' - the weather source
/// * 'query' - the location as asked for by the caller
/// * 'location' - the resolved location
pub fn fetch_short_range(
    source: &dyn WeatherSource,
    query: &LocationQuery,
    location: &ResolvedLocation) -> Result<Vec<DayForecast>, ForecastError> {

    let params = query.short_range_params(location);
    let forecast: ShortRangeForecast = fetch_document(source, Endpoint::Forecast, &params)
        .map_err(|e| ForecastError::from_source(e, ForecastError::ShortRangeSource))?;

    let days = aggregate_to_daily(&forecast.list)?;
    info!("short range source returned {} entries covering {} days", forecast.list.len(), days.len());

    Ok(days)
}

/// Like `fetch_short_range` but an unavailable source yields no days instead of an error
///
/// # Arguments
///
/// * 'source' - the weather source
/// * 'query' - the location as asked for by the caller
/// * 'location' - the resolved location
pub fn fetch_short_range_or_empty(
    source: &dyn WeatherSource,
    query: &LocationQuery,
    location: &ResolvedLocation) -> Result<Vec<DayForecast>, ForecastError> {

    match fetch_short_range(source, query, location) {
        Err(ForecastError::ShortRangeSource(e)) => {
            warn!("continuing without short range forecast: {}", e);
            Ok(Vec::new())
        },
        other => other,
    }
}

/// Running arithmetic mean over the values actually reported
#[derive(Default)]
struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    fn add(&mut self, value: Option<f64>) {
        if let Some(v) = value {
            self.sum += v;
            self.count += 1;
        }
    }

    fn get(&self) -> Option<f64> {
        if self.count == 0 {
            None
        } else {
            Some(self.sum / self.count as f64)
        }
    }
}

/// Most frequent value, ties go to the value seen first
#[derive(Default)]
struct Mode {
    counts: Vec<(String, usize)>,
}

impl Mode {
    fn add(&mut self, value: Option<&String>) {
        if let Some(v) = value {
            match self.counts.iter_mut().find(|(seen, _)| seen == v) {
                Some((_, count)) => *count += 1,
                None => self.counts.push((v.to_string(), 1)),
            }
        }
    }

    fn get(&self) -> Option<&str> {
        let mut best: Option<&(String, usize)> = None;
        for candidate in &self.counts {
            if best.is_none_or(|b| candidate.1 > b.1) {
                best = Some(candidate);
            }
        }

        best.map(|(value, _)| value.as_str())
    }
}

/// Statistics collected for one calendar day
#[derive(Default)]
struct DayBucket {
    temp: Mean,
    humidity: Mean,
    pressure: Mean,
    wind_speed: Mean,
    wind_direction: Mean,
    clouds: Mean,
    visibility: Mean,
    condition: Mode,
    description: Mode,
    icon: Mode,
}

impl DayBucket {
    fn add(&mut self, entry: &ForecastEntry) {
        if let Some(main) = &entry.main {
            self.temp.add(main.temp);
            self.humidity.add(main.humidity);
            self.pressure.add(main.pressure);
        }
        if let Some(wind) = &entry.wind {
            self.wind_speed.add(wind.speed);
            self.wind_direction.add(wind.deg);
        }
        if let Some(clouds) = &entry.clouds {
            self.clouds.add(clouds.all);
        }
        self.visibility.add(entry.visibility);

        if let Some(weather) = entry.weather.first() {
            self.condition.add(weather.main.as_ref());
            self.description.add(weather.description.as_ref());
            self.icon.add(weather.icon.as_ref());
        }
    }

    fn to_day(&self, date: NaiveDate) -> DayForecast {
        let wind_ms = self.wind_speed.get().unwrap_or(DEFAULT_WIND_SPEED);
        let visibility = self.visibility.get()
            .map_or_else(|| DEFAULT_VISIBILITY.to_string(), |metres| format!("{:.1}", metres / 1000.0));

        DayForecast {
            day: String::new(),
            date,
            wind: wind_knots(wind_ms),
            waves: wave_height(wind_ms),
            temp: round_whole(self.temp.get().unwrap_or(DEFAULT_TEMP)),
            condition: self.condition.get().unwrap_or(DEFAULT_CONDITION).to_string(),
            description: self.description.get().unwrap_or(DEFAULT_DESCRIPTION).to_string(),
            humidity: round_whole(self.humidity.get().unwrap_or(DEFAULT_HUMIDITY)),
            pressure: round_whole(self.pressure.get().unwrap_or(DEFAULT_PRESSURE)),
            visibility,
            clouds: round_whole(self.clouds.get().unwrap_or(DEFAULT_CLOUDS)),
            icon: self.icon.get().unwrap_or(DEFAULT_ICON).to_string(),
            wind_direction: round_whole(self.wind_direction.get().unwrap_or(DEFAULT_WIND_DIRECTION)),
            source: SourceTag::ThreeHourAggregate,
        }
    }
}

/// Buckets sub-daily entries by their UTC calendar date and aggregates each bucket into a day.
///
/// Numeric metrics are averaged over the entries reporting them, each metric with
/// its own denominator. Condition, description and icon take the most frequent
/// value of the bucket. Days are returned in ascending date order, one per date
/// present in the entries.
///
/// # Arguments
///
/// * 'entries' - sub-daily forecast entries in source order
pub fn aggregate_to_daily(entries: &[ForecastEntry]) -> Result<Vec<DayForecast>, ForecastError> {
    let mut buckets: BTreeMap<NaiveDate, DayBucket> = BTreeMap::new();

    for entry in entries {
        buckets.entry(utc_date(entry.dt)?).or_default().add(entry);
    }

    Ok(buckets.iter().map(|(date, bucket)| bucket.to_day(*date)).collect())
}
