use anyhow::{ensure, Context, Result};
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_token: String,
    pub weather_api_key: String,
    pub weather_base_url: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let config = Self {
            telegram_token: env::var("TELEGRAM_BOT_TOKEN")
                .context("TELEGRAM_BOT_TOKEN environment variable is required")?,
            weather_api_key: env::var("OPENWEATHER_API_KEY")
                .context("OPENWEATHER_API_KEY environment variable is required")?,
            weather_base_url: env::var("OPENWEATHER_BASE_URL")
                .unwrap_or_else(|_| "http://api.openweathermap.org/data/2.5/weather".to_string()),
        };

        ensure!(
            !config.telegram_token.is_empty(),
            "TELEGRAM_BOT_TOKEN must not be empty"
        );
        ensure!(
            !config.weather_api_key.is_empty(),
            "OPENWEATHER_API_KEY must not be empty"
        );

        Ok(config)
    }
}
