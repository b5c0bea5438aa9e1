pub mod errors;

use std::time::Duration;
use log::debug;
use serde::de::DeserializeOwned;
use ureq::Agent;
use crate::config::OpenWeatherParameters;
use crate::manager_openweather::errors::WeatherError;

/// The upstream endpoints used by the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    /// Current conditions, also used to resolve place names to coordinates
    Current,
    /// Short-range multi-point forecast (3-hour steps, about 5 days)
    Forecast,
    /// One-call document including the daily forecast
    OneCall,
}

/// Status and body of an upstream response, regardless of the status code
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// A source of weather documents.
///
/// Each call is made at most once and blocks until the response arrives or the
/// source's timeout elapses.
pub trait WeatherSource: Send + Sync {
    /// Fetches a raw document from the given endpoint
    ///
    /// # Arguments
    ///
    /// * 'endpoint' - the endpoint to query
    /// * 'params' - endpoint specific query parameters
    fn fetch(&self, endpoint: Endpoint, params: &[(&str, String)]) -> Result<RawResponse, WeatherError>;
}

/// Fetches a document and deserializes it, failing on any non-success status
///
/// # Arguments
///
/// * 'source' - the weather source to query
/// * 'endpoint' - the endpoint to query
/// * 'params' - endpoint specific query parameters
pub fn fetch_document<T: DeserializeOwned>(
    source: &dyn WeatherSource,
    endpoint: Endpoint,
    params: &[(&str, String)]) -> Result<T, WeatherError> {

    let response = source.fetch(endpoint, params)?;
    if !(200..300).contains(&response.status) {
        return Err(WeatherError::Status(response.status));
    }

    Ok(serde_json::from_str(&response.body)?)
}

/// Struct for fetching weather documents from an OpenWeather compatible API
pub struct OpenWeather {
    agent: Agent,
    api_key: String,
    units: String,
    current_url: String,
    forecast_url: String,
    onecall_url: String,
}

impl OpenWeather {
    /// Returns an OpenWeather struct ready for fetching documents
    ///
    /// Status codes are not turned into errors by the agent, callers decide
    /// what a non-success response means for them.
    ///
    /// # Arguments
    ///
    /// * 'config' - OpenWeather endpoints, key and timeout
    pub fn new(config: &OpenWeatherParameters) -> OpenWeather {
        let agent_config = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(config.timeout_secs)))
            .http_status_as_error(false)
            .build();

        let agent = agent_config.into();

        Self {
            agent,
            api_key: config.api_key.to_string(),
            units: config.units.to_string(),
            current_url: config.current_url.to_string(),
            forecast_url: config.forecast_url.to_string(),
            onecall_url: config.onecall_url.to_string(),
        }
    }

    fn url(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Current => &self.current_url,
            Endpoint::Forecast => &self.forecast_url,
            Endpoint::OneCall => &self.onecall_url,
        }
    }
}

impl WeatherSource for OpenWeather {
    fn fetch(&self, endpoint: Endpoint, params: &[(&str, String)]) -> Result<RawResponse, WeatherError> {
        let url = self.url(endpoint);
        debug!("fetching {:?} from {}", endpoint, url);

        let mut request = self.agent.get(url);
        for (key, value) in params {
            request = request.query(*key, value);
        }

        let mut response = request
            .query("appid", &self.api_key)
            .query("units", &self.units)
            .call()?;

        let status = response.status().as_u16();
        let body = response.body_mut().read_to_string()?;

        Ok(RawResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    struct Canned(RawResponse);

    impl WeatherSource for Canned {
        fn fetch(&self, _: Endpoint, _: &[(&str, String)]) -> Result<RawResponse, WeatherError> {
            Ok(self.0.clone())
        }
    }

    #[derive(Deserialize)]
    struct Doc {
        value: i64,
    }

    #[test]
    fn fetch_document_rejects_non_success_status() {
        let source = Canned(RawResponse { status: 404, body: r#"{"value":1}"#.to_string() });
        let res = fetch_document::<Doc>(&source, Endpoint::Current, &[]);

        assert!(matches!(res, Err(WeatherError::Status(404))));
    }

    #[test]
    fn fetch_document_reports_malformed_body() {
        let source = Canned(RawResponse { status: 200, body: "<html>".to_string() });
        let res = fetch_document::<Doc>(&source, Endpoint::Current, &[]);

        assert!(matches!(res, Err(WeatherError::Document(_))));
    }

    #[test]
    fn fetch_document_decodes_success() {
        let source = Canned(RawResponse { status: 200, body: r#"{"value":7}"#.to_string() });
        let doc = fetch_document::<Doc>(&source, Endpoint::OneCall, &[]).unwrap();

        assert_eq!(doc.value, 7);
    }
}
