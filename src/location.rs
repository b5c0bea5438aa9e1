use log::info;
use crate::errors::ForecastError;
use crate::manager_openweather::{fetch_document, Endpoint, WeatherSource};
use crate::models::forecast10::ResolvedLocation;
use crate::models::openweather_current::CurrentWeather;

/// Name used when coordinates are given without a city name
pub const UNNAMED_LOCATION: &str = "Selected location";

/// What the caller asked a forecast for
#[derive(Debug, Clone, PartialEq)]
pub enum LocationQuery {
    City(String),
    Coordinates { lat: f64, lon: f64, city: Option<String> },
}

impl LocationQuery {
    /// Builds a query from raw request parameters.
    /// Coordinates take precedence over a city name when both lat and lon are present.
    ///
    /// # Arguments
    ///
    /// * 'city' - optional place name
    /// * 'lat' - optional latitude as given by the caller
    /// * 'lon' - optional longitude as given by the caller
    pub fn from_params(city: Option<&str>, lat: Option<&str>, lon: Option<&str>) -> Result<LocationQuery, ForecastError> {
        let city = city.map(str::trim).filter(|c| !c.is_empty());
        let lat = lat.map(str::trim).filter(|v| !v.is_empty());
        let lon = lon.map(str::trim).filter(|v| !v.is_empty());

        match (lat, lon) {
            (Some(lat), Some(lon)) => Ok(LocationQuery::Coordinates {
                lat: parse_coordinate("lat", lat)?,
                lon: parse_coordinate("lon", lon)?,
                city: city.map(str::to_string),
            }),
            _ => match city {
                Some(city) => Ok(LocationQuery::City(city.to_string())),
                None => Err(ForecastError::BadRequest("provide city or lat/lon".to_string())),
            },
        }
    }

    /// Query parameters identifying this location for the short-range source.
    /// A city name is preferred whenever the caller gave one.
    ///
    /// # Arguments
    ///
    /// * 'resolved' - the resolved location, used for its coordinates
    pub fn short_range_params(&self, resolved: &ResolvedLocation) -> Vec<(&'static str, String)> {
        match self {
            LocationQuery::City(city) | LocationQuery::Coordinates { city: Some(city), .. } =>
                vec![("q", city.to_string())],
            LocationQuery::Coordinates { city: None, .. } =>
                vec![("lat", resolved.lat.to_string()), ("lon", resolved.lon.to_string())],
        }
    }
}

fn parse_coordinate(name: &str, value: &str) -> Result<f64, ForecastError> {
    value.trim().parse::<f64>()
        .map_err(|e| ForecastError::Internal(format!("could not convert {} '{}' to float: {}", name, value, e)))
}

/// Resolves a location query into coordinates and display names.
/// Coordinates given by the caller are used as is, without any lookup.
///
/// # Arguments
///
/// * 'source' - weather source offering current conditions by place name
/// * 'query' - the location asked for
pub fn resolve(source: &dyn WeatherSource, query: &LocationQuery) -> Result<ResolvedLocation, ForecastError> {
    match query {
        LocationQuery::Coordinates { lat, lon, city } => Ok(ResolvedLocation {
            name: city.clone().unwrap_or_else(|| UNNAMED_LOCATION.to_string()),
            country: String::new(),
            lat: *lat,
            lon: *lon,
        }),
        LocationQuery::City(city) => {
            let current: CurrentWeather = fetch_document(source, Endpoint::Current, &[("q", city.to_string())])
                .map_err(|e| ForecastError::from_source(e, ForecastError::Resolution))?;

            let location = ResolvedLocation {
                name: current.name.unwrap_or_else(|| city.to_string()),
                country: current.sys.country.unwrap_or_default(),
                lat: current.coord.lat,
                lon: current.coord.lon,
            };
            info!("resolved '{}' to {}, {} ({:.4}, {:.4})",
                  city, location.name, location.country, location.lat, location.lon);

            Ok(location)
        }
    }
}
