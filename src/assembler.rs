use std::collections::BTreeSet;
use chrono::NaiveDate;
use log::{debug, info, warn};
use crate::aggregate::fetch_short_range_or_empty;
use crate::daily::fetch_daily;
use crate::errors::ForecastError;
use crate::extrapolate::extend_to;
use crate::location::{resolve, LocationQuery};
use crate::manager_openweather::WeatherSource;
use crate::models::forecast10::{DayForecast, Forecast10Response};

/// Number of days in a forecast
pub const FORECAST_DAYS: usize = 10;

/// Produces a 10-day forecast for a location.
///
/// Days come from the daily source first. When it gives fewer than ten days the
/// short-range source is aggregated to fill in dates not yet covered, and if the
/// sequence is still short it is extended by extrapolating from its last day.
/// Resolution and daily source failures end the forecast, a failing short-range
/// source only means more extrapolated days.
///
/// If neither source gives a single day the returned forecast has no days at all.
///
/// # Arguments
///
/// * 'source' - the weather source
/// * 'query' - location as asked for by the caller
pub fn forecast10(source: &dyn WeatherSource, query: &LocationQuery) -> Result<Forecast10Response, ForecastError> {
    let location = resolve(source, query)?;

    let daily = fetch_daily(source, &location)?;
    let short_range = if daily.len() < FORECAST_DAYS {
        fetch_short_range_or_empty(source, query, &location)?
    } else {
        Vec::new()
    };

    let days = assemble_days(daily, short_range)?;
    let response = Forecast10Response { location, days };
    if !response.is_available() {
        warn!("no forecast data available for {}", response.location.name);
    }

    Ok(response)
}

/// Merges daily and aggregated days into a labelled sequence of exactly `FORECAST_DAYS` days.
///
/// Daily days have priority. Aggregated days are only taken for dates not already
/// present, in ascending order, until ten distinct dates are reached. The merged
/// days are ordered by date before any missing days are extrapolated, and the
/// result is cut to ten days. No days in gives no days out.
///
/// # Arguments
///
/// * 'daily' - normalized days from the daily source
/// * 'short_range' - aggregated days from the short-range source, ascending
pub fn assemble_days(daily: Vec<DayForecast>, short_range: Vec<DayForecast>) -> Result<Vec<DayForecast>, ForecastError> {
    let mut dates: BTreeSet<NaiveDate> = BTreeSet::new();
    let mut days: Vec<DayForecast> = Vec::with_capacity(FORECAST_DAYS);

    for day in daily {
        if dates.insert(day.date) {
            days.push(day);
        }
    }
    let from_daily = days.len();

    for day in short_range {
        if dates.len() >= FORECAST_DAYS {
            break;
        }
        if dates.insert(day.date) {
            days.push(day);
        }
    }
    let from_short_range = days.len() - from_daily;

    days.sort_by_key(|d| d.date);

    let extrapolated = extend_to(&mut days, FORECAST_DAYS)?;
    days.truncate(FORECAST_DAYS);
    label_days(&mut days);

    for day in &days {
        debug!("{}", day);
    }
    info!("assembled {} days: {} daily, {} aggregated, {} extrapolated",
          days.len(), from_daily.min(days.len()), from_short_range, extrapolated);

    Ok(days)
}

/// Sets the day label of each day from its position in the sequence
///
/// # Arguments
///
/// * 'days' - the days to label
fn label_days(days: &mut [DayForecast]) {
    for (i, day) in days.iter_mut().enumerate() {
        day.day = match i {
            0 => "Today".to_string(),
            1 => "Tomorrow".to_string(),
            _ => format!("Day {}", i + 1),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;
    use crate::models::forecast10::SourceTag;

    fn start() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn day(offset: u64, source: SourceTag) -> DayForecast {
        DayForecast {
            day: String::new(),
            date: start().checked_add_days(Days::new(offset)).unwrap(),
            wind: 12,
            waves: 1.5,
            temp: 18,
            condition: "Clear".to_string(),
            description: "clear sky".to_string(),
            humidity: 60,
            pressure: 1013,
            visibility: "10.0".to_string(),
            clouds: 20,
            icon: "01d".to_string(),
            wind_direction: 180,
            source,
        }
    }

    fn daily(range: std::ops::Range<u64>) -> Vec<DayForecast> {
        range.map(|i| day(i, SourceTag::OneCallDaily)).collect()
    }

    fn aggregated(range: std::ops::Range<u64>) -> Vec<DayForecast> {
        range.map(|i| day(i, SourceTag::ThreeHourAggregate)).collect()
    }

    fn sources(days: &[DayForecast]) -> Vec<SourceTag> {
        days.iter().map(|d| d.source).collect()
    }

    fn assert_consecutive(days: &[DayForecast]) {
        assert!(days.windows(2).all(|w| Some(w[1].date) == w[0].date.succ_opt()));
    }

    #[test]
    fn daily_has_priority_then_aggregates_then_extrapolation() {
        let days = assemble_days(daily(0..8), aggregated(3..9)).unwrap();

        assert_eq!(days.len(), 10);
        assert_consecutive(&days);
        let mut expected = vec![SourceTag::OneCallDaily; 8];
        expected.push(SourceTag::ThreeHourAggregate);
        expected.push(SourceTag::Extrapolated);
        assert_eq!(sources(&days), expected);
    }

    #[test]
    fn labels_days() {
        let days = assemble_days(daily(0..10), Vec::new()).unwrap();

        assert_eq!(days[0].day, "Today");
        assert_eq!(days[1].day, "Tomorrow");
        for (k, d) in days.iter().enumerate().skip(2) {
            assert_eq!(d.day, format!("Day {}", k + 1));
        }
    }

    #[test]
    fn truncates_long_daily_source() {
        let days = assemble_days(daily(0..14), Vec::new()).unwrap();

        assert_eq!(days.len(), 10);
        assert_eq!(days[9].date, start().checked_add_days(Days::new(9)).unwrap());
        assert!(days.iter().all(|d| d.source == SourceTag::OneCallDaily));
    }

    #[test]
    fn stops_supplementing_at_ten_dates() {
        let days = assemble_days(daily(0..7), aggregated(0..6).into_iter().chain(aggregated(7..12)).collect()).unwrap();

        assert_eq!(days.len(), 10);
        assert_consecutive(&days);
        assert_eq!(days.iter().filter(|d| d.source == SourceTag::ThreeHourAggregate).count(), 3);
    }

    #[test]
    fn short_range_only() {
        let days = assemble_days(Vec::new(), aggregated(0..5)).unwrap();

        assert_eq!(days.len(), 10);
        assert_consecutive(&days);
        assert_eq!(days.iter().filter(|d| d.source == SourceTag::Extrapolated).count(), 5);
    }

    #[test]
    fn duplicate_daily_dates_are_dropped() {
        let mut input = daily(0..3);
        input.push(day(2, SourceTag::OneCallDaily));
        let days = assemble_days(input, Vec::new()).unwrap();

        assert_eq!(days.len(), 10);
        assert_consecutive(&days);
    }

    #[test]
    fn earlier_short_range_date_sorts_first() {
        let days = assemble_days(daily(1..8), aggregated(0..3)).unwrap();

        assert_eq!(days.len(), 10);
        assert_consecutive(&days);
        assert_eq!(days[0].date, start());
        assert_eq!(days[0].day, "Today");
        let mut expected = vec![SourceTag::ThreeHourAggregate];
        expected.extend([SourceTag::OneCallDaily; 7]);
        expected.extend([SourceTag::Extrapolated; 2]);
        assert_eq!(sources(&days), expected);
    }

    #[test]
    fn extrapolation_alternates_from_last_day() {
        let days = assemble_days(daily(0..1), Vec::new()).unwrap();

        assert_eq!(days.iter().map(|d| d.wind).collect::<Vec<_>>(), vec![12, 11, 12, 11, 12, 11, 12, 11, 12, 11]);
        assert_eq!(days[1].waves, 1.4);
        assert_eq!(days[2].waves, 1.5);
    }

    #[test]
    fn nothing_in_nothing_out() {
        assert!(assemble_days(Vec::new(), Vec::new()).unwrap().is_empty());
    }
}
