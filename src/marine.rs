/// Metres per second to knots
pub const MS_TO_KNOTS: f64 = 1.94384;

/// Wind speed in m/s assumed when a source reports none
pub const DEFAULT_WIND_SPEED: f64 = 4.0;

pub const DEFAULT_TEMP: f64 = 22.0;
pub const DEFAULT_HUMIDITY: f64 = 60.0;
pub const DEFAULT_PRESSURE: f64 = 1013.0;
pub const DEFAULT_CLOUDS: f64 = 20.0;
pub const DEFAULT_WIND_DIRECTION: f64 = 0.0;
pub const DEFAULT_VISIBILITY: &str = "10.0";

pub const DEFAULT_CONDITION: &str = "Clear";
pub const DEFAULT_DESCRIPTION: &str = "clear sky";
pub const DEFAULT_ICON: &str = "01d";

/// Rounds to the nearest integer, halves go to the even neighbour
///
/// # Arguments
///
/// * 'value' - the value to round
pub fn round_whole(value: f64) -> i64 {
    value.round_ties_even() as i64
}

/// Rounds to one decimal.
///
/// The decision is taken on the exact binary value, so 2.45 (stored slightly
/// above) rounds up to 2.5 and 2.15 (stored slightly below) rounds down to 2.1.
///
/// # Arguments
///
/// * 'value' - the value to round
pub fn round_tenth(value: f64) -> f64 {
    format!("{:.1}", value).parse::<f64>().unwrap_or(value)
}

/// Converts a wind speed to whole knots
///
/// # Arguments
///
/// * 'wind_ms' - wind speed in m/s
pub fn wind_knots(wind_ms: f64) -> i64 {
    round_whole(wind_ms * MS_TO_KNOTS)
}

/// Estimates wave height in metres from wind speed.
///
/// This is a linear rule of thumb (0.3 m per m/s on top of a 0.8 m swell), not
/// a sea state model.
///
/// # Arguments
///
/// * 'wind_ms' - wind speed in m/s
pub fn wave_height(wind_ms: f64) -> f64 {
    round_tenth(wind_ms * 0.3 + 0.8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_ms_is_nineteen_knots() {
        assert_eq!(wind_knots(10.0), 19);
    }

    #[test]
    fn calm_wind_gives_base_swell() {
        assert_eq!(wind_knots(0.0), 0);
        assert_eq!(wave_height(0.0), 0.8);
    }

    #[test]
    fn default_wind_waves() {
        assert_eq!(wave_height(DEFAULT_WIND_SPEED), 2.0);
        assert_eq!(wind_knots(DEFAULT_WIND_SPEED), 8);
    }

    #[test]
    fn halves_round_to_even() {
        assert_eq!(round_whole(22.5), 22);
        assert_eq!(round_whole(23.5), 24);
        assert_eq!(round_whole(-0.4), 0);
    }

    #[test]
    fn tenths_follow_stored_value() {
        assert_eq!(wave_height(3.5), 1.9);
        assert_eq!(wave_height(4.5), 2.1);
        assert_eq!(wave_height(5.5), 2.5);
        assert_eq!(wave_height(8.5), 3.3);
    }
}
