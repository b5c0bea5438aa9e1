use chrono::Days;
use crate::errors::ForecastError;
use crate::marine::round_tenth;
use crate::models::forecast10::{DayForecast, SourceTag};

/// Lowest wave height an extrapolated day may get, in metres
pub const MIN_EXTRAPOLATED_WAVES: f64 = 0.5;

/// Creates the day following the last day of the assembled sequence.
///
/// Everything is copied from the last day except the date, the source tag, and
/// wind and waves which are nudged up when the assembled length is even and
/// down when it is odd. Keying the nudge off the live length makes repeated calls
/// alternate. Returns None when there is no day to continue from.
///
/// # Arguments
///
/// * 'assembled' - the days assembled so far
pub fn next_day(assembled: &[DayForecast]) -> Result<Option<DayForecast>, ForecastError> {
    let Some(last) = assembled.last() else {
        return Ok(None);
    };
    let even = assembled.len() % 2 == 0;

    let mut day = last.clone();
    day.date = last.date.checked_add_days(Days::new(1))
        .ok_or_else(|| ForecastError::Internal(format!("no day after {}", last.date)))?;
    day.source = SourceTag::Extrapolated;
    day.wind = (last.wind + if even { 1 } else { -1 }).max(0);
    day.waves = round_tenth(last.waves + if even { 0.1 } else { -0.1 }).max(MIN_EXTRAPOLATED_WAVES);

    Ok(Some(day))
}

/// Appends extrapolated days until the sequence holds `target` days.
/// An empty sequence stays empty. Returns the number of days added.
///
/// # Arguments
///
/// * 'days' - the days assembled so far
/// * 'target' - the wanted number of days
pub fn extend_to(days: &mut Vec<DayForecast>, target: usize) -> Result<usize, ForecastError> {
    let mut added = 0;
    while days.len() < target {
        match next_day(days)? {
            Some(day) => days.push(day),
            None => break,
        }
        added += 1;
    }

    Ok(added)
}
