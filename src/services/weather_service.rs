use std::env;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate};
use reqwest::Client;
use serde::Deserialize;

use crate::models::weather::WeatherDay;
use crate::services::itinerary_generation_service::PipelineError;

const WEATHER_API_URL: &str = "https://api.openweathermap.org/data/2.5/forecast";

// The provider reports one sample per 3 hours.
const SAMPLES_PER_DAY: u32 = 8;

/// Supplies a per-day forecast for a location and date window. The
/// production impl talks to OpenWeatherMap; tests substitute doubles.
#[async_trait]
pub trait ForecastSource: Send + Sync {
    async fn fetch_forecast(
        &self,
        location: &str,
        start_date: NaiveDate,
        days: u32,
    ) -> Result<Vec<WeatherDay>, PipelineError>;
}

#[derive(Debug, Deserialize)]
struct ForecastResponse {
    #[serde(default)]
    list: Vec<ForecastSample>,
}

#[derive(Debug, Deserialize)]
struct ForecastSample {
    dt: i64,
    main: SampleMain,
    #[serde(default)]
    weather: Vec<SampleCondition>,
    #[serde(default)]
    rain: Option<RainVolume>,
}

#[derive(Debug, Deserialize)]
struct SampleMain {
    temp: f64,
}

#[derive(Debug, Deserialize)]
struct SampleCondition {
    main: String,
}

#[derive(Debug, Deserialize)]
struct RainVolume {
    #[serde(rename = "3h")]
    three_hour: Option<f64>,
}

pub struct OpenWeatherService {
    client: Client,
    api_key: String,
}

impl OpenWeatherService {
    pub fn new() -> Result<Self, String> {
        let api_key = env::var("OPENWEATHERMAP_API_KEY")
            .map_err(|_| "OPENWEATHERMAP_API_KEY environment variable not set".to_string())?;

        Ok(Self {
            client: Client::new(),
            api_key,
        })
    }
}

#[async_trait]
impl ForecastSource for OpenWeatherService {
    async fn fetch_forecast(
        &self,
        location: &str,
        start_date: NaiveDate,
        days: u32,
    ) -> Result<Vec<WeatherDay>, PipelineError> {
        let sample_count = (days * SAMPLES_PER_DAY).to_string();

        let response = self
            .client
            .get(WEATHER_API_URL)
            .query(&[
                ("q", location),
                ("appid", self.api_key.as_str()),
                ("units", "imperial"),
                ("cnt", sample_count.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                PipelineError::WeatherUnavailable(format!("Forecast request failed: {}", e))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PipelineError::WeatherUnavailable(format!(
                "Forecast request returned {}: {}",
                status, body
            )));
        }

        let forecast: ForecastResponse = response.json().await.map_err(|e| {
            PipelineError::WeatherUnavailable(format!("Failed to parse forecast response: {}", e))
        })?;

        Ok(collapse_forecast(forecast.list, start_date, days as usize))
    }
}

/// Collapse 3-hourly samples into at most `days` per-day entries: drop
/// samples dated before `start_date` (UTC date of the sample timestamp),
/// keep the first sample seen for each remaining date in encounter order.
/// The rain figure is the provider's 3-hour precipitation volume scaled by
/// ten, kept for parity with the rest of the system.
fn collapse_forecast(
    samples: Vec<ForecastSample>,
    start_date: NaiveDate,
    days: usize,
) -> Vec<WeatherDay> {
    let mut collapsed: Vec<WeatherDay> = Vec::new();

    for sample in samples {
        let timestamp = match DateTime::from_timestamp(sample.dt, 0) {
            Some(timestamp) => timestamp,
            None => continue,
        };
        let date = timestamp.date_naive();
        if date < start_date {
            continue;
        }

        let date = date.format("%Y-%m-%d").to_string();
        if collapsed.iter().any(|day| day.date == date) {
            continue;
        }

        collapsed.push(WeatherDay {
            date,
            temperature: sample.main.temp,
            condition: sample
                .weather
                .first()
                .map(|w| w.main.clone())
                .unwrap_or_default(),
            rain_probability: sample
                .rain
                .and_then(|r| r.three_hour)
                .map(|volume| volume * 10.0)
                .unwrap_or(0.0),
        });
    }

    collapsed.truncate(days);
    collapsed
}
