use std::error::Error;
use std::fmt;
use std::sync::Arc;

use chrono::NaiveDate;

use crate::models::itinerary::ItineraryOutcome;
use crate::models::preferences::TripPreferences;
use crate::services::crowd_service::estimate_crowd_level;
use crate::services::gemini_service::TextGenerator;
use crate::services::itinerary_parser::parse_itinerary;
use crate::services::prompt_service::build_generation_prompt;
use crate::services::weather_service::ForecastSource;

pub const MISSING_PREFERENCES_MESSAGE: &str = "Missing required preferences";

/// Failure taxonomy of the generation pipeline. A degraded parse is not an
/// error: the parser returns a raw-text fallback instead.
#[derive(Debug)]
pub enum PipelineError {
    /// Client-caused: incomplete or unusable preferences. No network calls
    /// have been made.
    Validation(String),
    /// The weather provider could not be reached or understood. Fatal: the
    /// pipeline never generates a weather-blind itinerary.
    WeatherUnavailable(String),
    /// Token acquisition for the generation API failed.
    Auth(String),
    /// The generation endpoint returned an error or an unusable envelope.
    /// Provider error bodies ride along as opaque details.
    Generation {
        message: String,
        details: Option<serde_json::Value>,
    },
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Validation(msg) => write!(f, "Validation error: {}", msg),
            PipelineError::WeatherUnavailable(msg) => write!(f, "Weather unavailable: {}", msg),
            PipelineError::Auth(msg) => write!(f, "Authentication error: {}", msg),
            PipelineError::Generation { message, .. } => write!(f, "Generation error: {}", message),
        }
    }
}

impl Error for PipelineError {}

/// Orchestrates one itinerary generation: crowd heuristics, weather fetch,
/// prompt construction, model invocation, parse/repair. Collaborators are
/// injected so tests can run the chain against doubles.
pub struct ItineraryGenerator {
    forecast: Arc<dyn ForecastSource>,
    generator: Arc<dyn TextGenerator>,
}

impl ItineraryGenerator {
    pub fn new(forecast: Arc<dyn ForecastSource>, generator: Arc<dyn TextGenerator>) -> Self {
        Self {
            forecast,
            generator,
        }
    }

    pub async fn generate(
        &self,
        preferences: &TripPreferences,
    ) -> Result<ItineraryOutcome, PipelineError> {
        let complete = preferences
            .complete()
            .ok_or_else(|| PipelineError::Validation(MISSING_PREFERENCES_MESSAGE.to_string()))?;

        // The forecast filter needs a real calendar date; reject garbage
        // before any network activity.
        let start_date = NaiveDate::parse_from_str(complete.departure_date, "%Y-%m-%d")
            .map_err(|_| PipelineError::Validation("Invalid departure date".to_string()))?;

        let estimate = estimate_crowd_level(complete.departure_date, complete.duration);

        let forecast = self
            .forecast
            .fetch_forecast(complete.destination, start_date, estimate.duration_days)
            .await?;

        let prompt = build_generation_prompt(&complete, &forecast, &estimate);

        let raw_text = self.generator.generate(&prompt).await?;

        Ok(parse_itinerary(&raw_text, &forecast, estimate.crowd_level))
    }
}
