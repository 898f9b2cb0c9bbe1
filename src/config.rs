/// Application configuration, parsed from environment variables.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// URL template for the upstream points endpoint, with `{lat}` and
    /// `{lon}` placeholders (e.g. `https://api.weather.gov/points/{lat},{lon}`).
    pub points_url_template: String,
    /// User-Agent sent on upstream requests (api.weather.gov requires one).
    pub user_agent: String,
    pub port: u16,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            points_url_template: std::env::var("WEATHER_API_URL")
                .expect("WEATHER_API_URL must be set"),
            user_agent: std::env::var("WEATHER_USER_AGENT")
                .unwrap_or_else(|_| "DailyWeatherApi/0.1".to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .expect("PORT must be a valid u16"),
        }
    }
}
