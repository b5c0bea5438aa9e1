//! HTTP API
//!
//! Serves the 10-day forecast and relays a few weather documents unchanged.
//! Every upstream call is blocking and runs on tokio's blocking pool.

use std::sync::Arc;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use log::{error, warn};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use crate::assembler::forecast10;
use crate::errors::ForecastError;
use crate::location::LocationQuery;
use crate::manager_openweather::{Endpoint, WeatherSource};
use crate::models::forecast10::Forecast10Response;

/// City used by the current conditions relay when none is given
const DEFAULT_CITY: &str = "London";

/// Shared state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn WeatherSource>,
}

/// Location query params, kept as text so bad numbers are reported by the pipeline
#[derive(Deserialize)]
pub struct LocationParams {
    pub city: Option<String>,
    pub lat: Option<String>,
    pub lon: Option<String>,
}

/// JSON body for failed requests
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub detail: String,
}

impl IntoResponse for ForecastError {
    fn into_response(self) -> Response {
        let (status, error) = match &self {
            ForecastError::BadRequest(_) => (StatusCode::BAD_REQUEST, "Bad request"),
            e if e.is_upstream() => (StatusCode::BAD_GATEWAY, "Upstream API error"),
            _ => (StatusCode::INTERNAL_SERVER_ERROR, "Server error"),
        };

        if status == StatusCode::BAD_REQUEST {
            warn!("{}", self);
        } else {
            error!("{}", self);
        }

        (status, Json(ErrorResponse { error: error.to_string(), detail: self.to_string() })).into_response()
    }
}

/// Builds the router with all routes
///
/// # Arguments
///
/// * 'state' - state shared by the handlers
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(home))
        .route("/forecast10", get(get_forecast10))
        .route("/api/forecast10", get(get_forecast10))
        .route("/api/weather/city", get(weather_city))
        .route("/api/weather/coords", get(weather_coords))
        .route("/api/marine", get(weather_coords))
        .route("/api/forecast", get(short_range_forecast))
        .layer(cors)
        .with_state(state)
}

/// GET / - Health message
async fn home() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "message": "Maritime Weather Backend Running!",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /forecast10 - Exactly ten days for a city or a lat/lon pair
async fn get_forecast10(
    State(state): State<AppState>,
    Query(params): Query<LocationParams>,
) -> Result<Json<Forecast10Response>, ForecastError> {
    let query = LocationQuery::from_params(params.city.as_deref(), params.lat.as_deref(), params.lon.as_deref())?;

    let source = state.source.clone();
    let response = tokio::task::spawn_blocking(move || forecast10(source.as_ref(), &query))
        .await
        .map_err(|e| ForecastError::Internal(format!("forecast worker failed: {}", e)))??;

    Ok(Json(response))
}

/// GET /api/weather/city - Current conditions for a city
async fn weather_city(State(state): State<AppState>, Query(params): Query<LocationParams>) -> Response {
    let city = present(params.city).unwrap_or_else(|| DEFAULT_CITY.to_string());

    relay(state, Endpoint::Current, vec![("q", city)]).await
}

/// GET /api/weather/coords and /api/marine - One-call document for a lat/lon pair
async fn weather_coords(State(state): State<AppState>, Query(params): Query<LocationParams>) -> Response {
    match (present(params.lat), present(params.lon)) {
        (Some(lat), Some(lon)) => {
            let query = vec![("lat", lat), ("lon", lon), ("exclude", "minutely".to_string())];
            relay(state, Endpoint::OneCall, query).await
        },
        _ => ForecastError::BadRequest("Latitude and Longitude required".to_string()).into_response(),
    }
}

/// GET /api/forecast - Short-range forecast for a city or a lat/lon pair
async fn short_range_forecast(State(state): State<AppState>, Query(params): Query<LocationParams>) -> Response {
    let query = match (present(params.city), present(params.lat), present(params.lon)) {
        (Some(city), _, _) => vec![("q", city)],
        (None, Some(lat), Some(lon)) => vec![("lat", lat), ("lon", lon)],
        _ => return ForecastError::BadRequest("Provide city or lat/lon".to_string()).into_response(),
    };

    relay(state, Endpoint::Forecast, query).await
}

/// Trims a query parameter, an empty value counts as absent
///
/// # Arguments
///
/// * 'value' - the parameter as received
fn present(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

/// Fetches a document once and passes its status and JSON body on unchanged
///
/// # Arguments
///
/// * 'state' - handler state holding the weather source
/// * 'endpoint' - the upstream endpoint
/// * 'params' - query parameters for the endpoint
async fn relay(state: AppState, endpoint: Endpoint, params: Vec<(&'static str, String)>) -> Response {
    let source = state.source.clone();
    let fetched = tokio::task::spawn_blocking(move || source.fetch(endpoint, &params)).await;

    let raw = match fetched {
        Ok(Ok(raw)) => raw,
        Ok(Err(e)) => return ForecastError::Upstream(e.to_string()).into_response(),
        Err(e) => return ForecastError::Internal(format!("relay worker failed: {}", e)).into_response(),
    };

    let body: serde_json::Value = match serde_json::from_str(&raw.body) {
        Ok(body) => body,
        Err(e) => return ForecastError::Upstream(format!("{:?} returned a non json body: {}", endpoint, e)).into_response(),
    };
    let status = StatusCode::from_u16(raw.status).unwrap_or(StatusCode::BAD_GATEWAY);

    (status, Json(body)).into_response()
}
