// Daily Weather API v0.1
use axum::{routing::get, Router};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod config;
mod errors;
mod routes;
mod services;

use config::AppConfig;
use routes::weather::AppState;
use services::transport::HttpTransport;
use services::weather::WeatherService;

/// Daily Weather API — OpenAPI specification.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Daily Weather API",
        version = "0.1.0",
        description = "Current-day weather forecast for a latitude/longitude pair. \
            Resolves the coordinate through the National Weather Service points \
            endpoint to its forecast feed, returns today's short forecast, and \
            classifies the temperature as hot, cold, or moderate.",
    ),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Weather", description = "Current-day forecast retrieval"),
    ),
    paths(
        routes::health::health_check,
        routes::weather::get_weather,
    ),
    components(
        schemas(
            routes::health::HealthResponse,
            routes::weather::WeatherResponse,
            routes::weather::TemperatureReading,
            services::weather::TemperatureCategory,
            errors::ErrorResponse,
        )
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "daily_weather_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env();

    // Build the upstream transport and resolver
    let transport = HttpTransport::new(&config.user_agent);
    let weather = WeatherService::new(Arc::new(transport), &config.points_url_template);

    let state = AppState { weather };

    // CORS — read-only API, restrict methods to GET
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([axum::http::Method::GET])
        .allow_headers(Any);

    // Build router
    let health_routes = Router::new().route("/health", get(routes::health::health_check));

    let app = Router::new()
        .merge(routes::weather::router(state))
        .merge(health_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(cors);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("API server listening on {}", addr);
    tracing::info!(
        "Swagger UI available at http://localhost:{}/swagger-ui/",
        config.port
    );

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind TCP listener");
    axum::serve(listener, app)
        .await
        .expect("Server terminated unexpectedly");
}
