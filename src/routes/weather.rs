//! Weather HTTP endpoint.
//!
//! - GET /weather?lat=<latitude>&lon=<longitude>

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::errors::{AppError, ErrorResponse};
use crate::services::weather::{classify_temperature, TemperatureCategory, WeatherService};

/// Shared application state for the weather endpoint.
#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) weather: WeatherService,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct WeatherQuery {
    /// Latitude of the location (decimal degrees, e.g. "35.6895")
    pub lat: Option<String>,
    /// Longitude of the location (decimal degrees, e.g. "139.6917")
    pub lon: Option<String>,
}

/// Temperature reading with its derived category.
#[derive(Debug, Serialize, ToSchema)]
pub struct TemperatureReading {
    /// Temperature value as reported by the upstream (°F)
    pub value: i32,
    /// Coarse classification of the value
    pub category: TemperatureCategory,
}

/// Current-day weather response.
#[derive(Debug, Serialize, ToSchema)]
pub struct WeatherResponse {
    /// Short forecast text for today (e.g. "Partly Cloudy")
    pub forecast: String,
    pub temperature: TemperatureReading,
}

pub(crate) fn router(state: AppState) -> Router {
    Router::new()
        .route("/weather", get(get_weather))
        .with_state(state)
}

/// Get today's forecast and temperature category for a coordinate.
///
/// Resolves the coordinate through the upstream points endpoint to its
/// forecast feed, then returns the feed's "Today" period with the
/// temperature classified as hot, cold, or moderate.
#[utoipa::path(
    get,
    path = "/weather",
    tag = "Weather",
    params(WeatherQuery),
    responses(
        (status = 200, description = "Today's forecast for the location", body = WeatherResponse),
        (status = 400, description = "Missing latitude or longitude", body = ErrorResponse),
        (status = 500, description = "Upstream weather API failure", body = ErrorResponse),
    )
)]
pub async fn get_weather(
    State(state): State<AppState>,
    Query(params): Query<WeatherQuery>,
) -> Result<Json<WeatherResponse>, AppError> {
    let lat = params.lat.filter(|s| !s.is_empty());
    let lon = params.lon.filter(|s| !s.is_empty());
    let (lat, lon) = match (lat, lon) {
        (Some(lat), Some(lon)) => (lat, lon),
        _ => {
            return Err(AppError::BadRequest(
                "Latitude and Longitude are required".to_string(),
            ))
        }
    };

    let daily = state.weather.resolve(&lat, &lon).await?;
    let category = classify_temperature(daily.temperature);

    Ok(Json(WeatherResponse {
        forecast: daily.short_forecast,
        temperature: TemperatureReading {
            value: daily.temperature,
            category,
        },
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::transport::HttpTransport;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn app(points_url_template: &str) -> Router {
        let transport = HttpTransport::new("DailyWeatherApi/0.1 tests");
        let weather = WeatherService::new(Arc::new(transport), points_url_template);
        router(AppState { weather })
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_weather_missing_params_is_400() {
        let app = app("http://unused/points/{lat},{lon}");

        let response = app
            .oneshot(Request::builder().uri("/weather").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Latitude and Longitude are required"})
        );
    }

    #[tokio::test]
    async fn test_weather_empty_params_is_400() {
        let app = app("http://unused/points/{lat},{lon}");

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/weather?lat=&lon=139.6917")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({"error": "Latitude and Longitude are required"})
        );
    }

    #[tokio::test]
    async fn test_weather_success_against_stubbed_upstream() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/points/35.6895,139.6917"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                format!(r#"{{"properties": {{"forecast": "{}/forecast"}}}}"#, server.uri()),
                "application/json",
            ))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{
                    "properties": {
                        "periods": [{
                            "name": "Today",
                            "temperature": 70,
                            "temperatureUnit": "F",
                            "shortForecast": "Partly Cloudy"
                        }]
                    }
                }"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let app = app(&format!("{}/points/{{lat}},{{lon}}", server.uri()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/weather?lat=35.6895&lon=139.6917")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({
                "forecast": "Partly Cloudy",
                "temperature": {"value": 70, "category": "moderate"}
            })
        );
    }

    #[tokio::test]
    async fn test_weather_upstream_failure_is_500() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/points/35.6895,139.6917"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let app = app(&format!("{}/points/{{lat}},{{lon}}", server.uri()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/weather?lat=35.6895&lon=139.6917")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({"error": "failed to get points data: status code 500"})
        );
    }

    #[tokio::test]
    async fn test_weather_no_today_period_is_500() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/points/40.7128,-74.0060"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                format!(r#"{{"properties": {{"forecast": "{}/forecast"}}}}"#, server.uri()),
                "application/json",
            ))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/forecast"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"{"properties": {"periods": []}}"#,
                "application/json",
            ))
            .mount(&server)
            .await;

        let app = app(&format!("{}/points/{{lat}},{{lon}}", server.uri()));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/weather?lat=40.7128&lon=-74.0060")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({"error": "no forecast found for 'Today'"})
        );
    }
}
