//! Current-day forecast resolution against an api.weather.gov-style API.
//!
//! The upstream splits "which forecast feed covers this coordinate" from
//! "what does that feed currently say": a points lookup returns the feed URL,
//! and the feed returns an ordered list of named periods. Both calls are made
//! on every resolution — there is no static coordinate→feed mapping.
//! See: https://www.weather.gov/documentation/services-web-api

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

use crate::errors::{AppError, Stage};
use crate::services::transport::Transport;

/// Period name selecting the current-day entry. Exact, case-sensitive match.
const TODAY_PERIOD_NAME: &str = "Today";

/// Inclusive lower bound of the "hot" category, in °F.
const HOT_THRESHOLD: i32 = 85;

/// Inclusive upper bound of the "cold" category, in °F.
const COLD_THRESHOLD: i32 = 60;

/// Coarse temperature classification derived from a period's temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureCategory {
    Hot,
    Cold,
    Moderate,
}

/// Classify a temperature (°F) into hot/cold/moderate.
///
/// Both classifying edges are inclusive: 85 is hot, 60 is cold, and the
/// remaining 61..=84 band is moderate. Hot is checked before cold.
pub fn classify_temperature(temperature: i32) -> TemperatureCategory {
    if temperature >= HOT_THRESHOLD {
        TemperatureCategory::Hot
    } else if temperature <= COLD_THRESHOLD {
        TemperatureCategory::Cold
    } else {
        TemperatureCategory::Moderate
    }
}

/// Today's forecast extracted from the upstream feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyForecast {
    pub short_forecast: String,
    pub temperature: i32,
}

// --- upstream JSON response types ---

#[derive(Debug, Deserialize)]
struct PointsResponse {
    properties: PointsProperties,
}

#[derive(Debug, Deserialize)]
struct PointsProperties {
    /// URL of the forecast feed covering the requested coordinate.
    forecast: String,
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    properties: ForecastProperties,
}

#[derive(Debug, Deserialize)]
struct ForecastProperties {
    periods: Vec<ForecastPeriod>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ForecastPeriod {
    name: String,
    temperature: i32,
    /// Unit label reported by the upstream ("F"). Logged, never converted.
    temperature_unit: String,
    short_forecast: String,
}

/// Resolver for the two-stage points → forecast lookup.
#[derive(Debug, Clone)]
pub struct WeatherService {
    transport: Arc<dyn Transport>,
    /// Points URL template with `{lat}` and `{lon}` placeholders.
    points_url_template: String,
}

impl WeatherService {
    pub fn new(transport: Arc<dyn Transport>, points_url_template: &str) -> Self {
        Self {
            transport,
            points_url_template: points_url_template.to_string(),
        }
    }

    fn points_url(&self, lat: &str, lon: &str) -> String {
        self.points_url_template
            .replacen("{lat}", lat, 1)
            .replacen("{lon}", lon, 1)
    }

    /// GET `url` through the transport and deserialize the body.
    ///
    /// Transport failures, non-2xx statuses, and parse failures all map to
    /// the corresponding `AppError` tagged with `stage`.
    async fn fetch_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        stage: Stage,
    ) -> Result<T, AppError> {
        let response = self.transport.get(url).await?;

        if !response.is_success() {
            return Err(AppError::UpstreamStatus {
                stage,
                status: response.status,
            });
        }

        serde_json::from_slice(&response.body).map_err(|e| AppError::MalformedResponse {
            stage,
            detail: e.to_string(),
        })
    }

    /// Resolve today's forecast for a coordinate.
    ///
    /// Performs the points lookup, follows the returned feed URL, and scans
    /// the feed's periods in upstream order for the first one named "Today".
    /// The feed URL from the points body is passed through unvalidated — a
    /// bad value fails at the second fetch.
    pub async fn resolve(&self, lat: &str, lon: &str) -> Result<DailyForecast, AppError> {
        let points_url = self.points_url(lat, lon);
        let points: PointsResponse = self.fetch_json(&points_url, Stage::Points).await?;

        let forecast: ForecastResponse = self
            .fetch_json(&points.properties.forecast, Stage::Forecast)
            .await?;

        let period = forecast
            .properties
            .periods
            .into_iter()
            .find(|p| p.name == TODAY_PERIOD_NAME)
            .ok_or(AppError::NoMatchingPeriod)?;

        tracing::debug!(
            "Resolved '{}' period: {}°{}, {}",
            period.name,
            period.temperature,
            period.temperature_unit,
            period.short_forecast
        );

        Ok(DailyForecast {
            short_forecast: period.short_forecast,
            temperature: period.temperature,
        })
    }
}
