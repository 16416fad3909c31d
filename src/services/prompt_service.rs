use crate::models::preferences::CompletePreferences;
use crate::models::weather::{CrowdEstimate, WeatherDay};

/// Target shape the model is instructed to return. These field names are a
/// contract with the itinerary parser: keep them in sync with the serde
/// renames in `models::itinerary`.
const ITINERARY_SCHEMA: &str = r#"{
  "destination": "string",
  "startDate": "string (YYYY-MM-DD)",
  "durationDays": number,
  "totalCost": number,
  "crowdLevel": "string",
  "dailyPlans": [
    {
      "day": number,
      "date": "string (YYYY-MM-DD)",
      "weather": {
        "temperature": number,
        "condition": "string",
        "rainProbability": number
      },
      "activities": [
        {
          "time": "string (e.g., 09:00 AM)",
          "description": "string",
          "location": "string",
          "cost": number
        }
      ]
    }
  ]
}"#;

/// Compose the generation prompt: trip parameters, the per-day forecast,
/// the hard weather constraints, crowd guidance, and the target schema.
pub fn build_generation_prompt(
    preferences: &CompletePreferences<'_>,
    forecast: &[WeatherDay],
    estimate: &CrowdEstimate,
) -> String {
    let forecast_summary = forecast
        .iter()
        .map(|day| {
            format!(
                "{}: {}°F, {}, {}% rain",
                day.date, day.temperature, day.condition, day.rain_probability
            )
        })
        .collect::<Vec<_>>()
        .join("; ");

    format!(
        "Generate a travel itinerary for a trip from {} to {} with a budget of {} dollars, \
departing on {} for a duration of {} ({} days).\n\
Consider the following constraints:\n\
- Weather forecast: {}.\n\
  - Avoid outdoor activities if rain probability > 50% or temperature < 32°F or > 90°F.\n\
- Crowd levels: {}. Prefer less crowded times or locations if high.\n\
Return a valid JSON object with this structure:\n{}",
        preferences.origin,
        preferences.destination,
        preferences.max_price,
        preferences.departure_date,
        preferences.duration,
        estimate.duration_days,
        forecast_summary,
        estimate.crowd_level,
        ITINERARY_SCHEMA,
    )
}
