use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use actix_web::{web, App};
use async_trait::async_trait;
use chrono::NaiveDate;

use wanderplan_api::models::weather::WeatherDay;
use wanderplan_api::routes;
use wanderplan_api::services::gemini_service::TextGenerator;
use wanderplan_api::services::itinerary_generation_service::{ItineraryGenerator, PipelineError};
use wanderplan_api::services::weather_service::ForecastSource;

/// Three forecast days starting on the Tokyo scenario's Saturday.
pub fn sample_forecast() -> Vec<WeatherDay> {
    vec![
        WeatherDay {
            date: "2025-06-14".to_string(),
            temperature: 75.0,
            condition: "Clear".to_string(),
            rain_probability: 20.0,
        },
        WeatherDay {
            date: "2025-06-15".to_string(),
            temperature: 72.0,
            condition: "Clouds".to_string(),
            rain_probability: 30.0,
        },
        WeatherDay {
            date: "2025-06-16".to_string(),
            temperature: 68.0,
            condition: "Rain".to_string(),
            rain_probability: 70.0,
        },
    ]
}

/// Forecast double that records how it was called.
pub struct StubForecast {
    calls: AtomicUsize,
    requested_days: Mutex<Option<u32>>,
    response: Option<Vec<WeatherDay>>,
}

impl StubForecast {
    pub fn returning(days: Vec<WeatherDay>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            requested_days: Mutex::new(None),
            response: Some(days),
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            requested_days: Mutex::new(None),
            response: None,
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requested_days(&self) -> Option<u32> {
        *self.requested_days.lock().unwrap()
    }
}

#[async_trait]
impl ForecastSource for StubForecast {
    async fn fetch_forecast(
        &self,
        _location: &str,
        _start_date: NaiveDate,
        days: u32,
    ) -> Result<Vec<WeatherDay>, PipelineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.requested_days.lock().unwrap() = Some(days);

        match &self.response {
            Some(forecast) => Ok(forecast.clone()),
            None => Err(PipelineError::WeatherUnavailable(
                "stubbed provider outage".to_string(),
            )),
        }
    }
}

pub enum StubReply {
    Text(String),
    Failure {
        message: String,
        details: Option<serde_json::Value>,
    },
}

/// Generator double that records every prompt it receives.
pub struct StubGenerator {
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
    reply: StubReply,
}

impl StubGenerator {
    pub fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            reply: StubReply::Text(text.to_string()),
        })
    }

    pub fn failing(message: &str, details: Option<serde_json::Value>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
            reply: StubReply::Failure {
                message: message.to_string(),
                details,
            },
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_prompt(&self) -> Option<String> {
        self.prompts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, PipelineError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());

        match &self.reply {
            StubReply::Text(text) => Ok(text.clone()),
            StubReply::Failure { message, details } => Err(PipelineError::Generation {
                message: message.clone(),
                details: details.clone(),
            }),
        }
    }
}

/// The generation endpoint mounted the way main mounts it, backed by the
/// supplied pipeline.
pub fn pipeline_app(
    generator: ItineraryGenerator,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    App::new().app_data(web::Data::new(generator)).route(
        "/api/generate-itinerary",
        web::post().to(routes::itinerary::generate_itinerary),
    )
}
