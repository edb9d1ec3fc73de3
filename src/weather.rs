use anyhow::{anyhow, Context};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Clone)]
pub struct WeatherReport {
    pub description: String,
    pub temperature_c: f64,
    pub humidity_pct: u8,
    pub wind_speed_mps: f64,
}

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("city not found")]
    CityNotFound,
    #[error("weather provider returned status {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

#[async_trait]
pub trait WeatherLookup: Send + Sync {
    async fn get_weather(&self, city: &str) -> Result<WeatherReport, WeatherError>;
}

#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    base_url: String,
    api_key: String,
    http: reqwest::Client,
}

impl OpenWeatherClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            base_url,
            api_key,
            http: reqwest::Client::new(),
        }
    }

    async fn fetch(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        let res = self
            .http
            .get(&self.base_url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", "metric"),
            ])
            .send()
            .await
            .context("Failed to send request to OpenWeather")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read OpenWeather response body")?;

        if !status.is_success() {
            return Err(WeatherError::Status {
                status,
                body: truncate_body(&body),
            });
        }

        let data: Value =
            serde_json::from_str(&body).context("Failed to parse OpenWeather JSON")?;

        // Unknown cities come back inside an HTTP 200 with a string "cod"
        // such as "404"; only a numeric 200 marks a real hit.
        if data.get("cod").and_then(Value::as_i64) != Some(200) {
            return Err(WeatherError::CityNotFound);
        }

        let parsed: OwResponse = serde_json::from_value(data)
            .context("OpenWeather response is missing expected fields")?;

        let description = parsed
            .weather
            .first()
            .map(|w| w.description.clone())
            .ok_or_else(|| anyhow!("OpenWeather response contained no weather entries"))?;

        Ok(WeatherReport {
            description,
            temperature_c: parsed.main.temp,
            humidity_pct: parsed.main.humidity,
            wind_speed_mps: parsed.wind.speed,
        })
    }
}

#[async_trait]
impl WeatherLookup for OpenWeatherClient {
    async fn get_weather(&self, city: &str) -> Result<WeatherReport, WeatherError> {
        let result = self.fetch(city).await;
        if let Err(err) = &result {
            if !matches!(err, WeatherError::CityNotFound) {
                error!("Error fetching weather for '{}': {}", city, err);
            }
        }
        result
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: f64,
}

#[derive(Debug, Deserialize)]
struct OwResponse {
    weather: Vec<OwWeather>,
    main: OwMain,
    wind: OwWind,
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        // Back off to a char boundary so multi-byte text cannot split.
        let mut cut = MAX;
        while !body.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}...", &body[..cut])
    } else {
        body.to_string()
    }
}
