use serde::{Deserialize, Serialize};

use crate::models::weather::WeatherDay;

/// A single scheduled activity inside a daily plan.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct PlannedActivity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cost: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct DailyPlan {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherDay>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub activities: Vec<PlannedActivity>,
}

/// The itinerary shape the generative model is asked to return. Every field
/// is optional: missing data is repaired by the parser's backfill step, so a
/// partial-but-well-formed response still round-trips as structured output.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct GeneratedItinerary {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, rename = "startDate", skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, rename = "durationDays", skip_serializing_if = "Option::is_none")]
    pub duration_days: Option<u32>,
    #[serde(default, rename = "totalCost", skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<f64>,
    #[serde(default, rename = "crowdLevel", skip_serializing_if = "Option::is_none")]
    pub crowd_level: Option<String>,
    #[serde(default, rename = "dailyPlans", skip_serializing_if = "Option::is_none")]
    pub daily_plans: Option<Vec<DailyPlan>>,
}

/// Raw-text wrapper returned when the model's output cannot be read as an
/// itinerary. Not an error: callers render the text instead of a structured
/// view.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct RawItinerary {
    #[serde(rename = "rawText")]
    pub raw_text: String,
}

/// Result of a generation run. Serialized untagged so the wire shape is
/// either the itinerary object or `{"rawText": ...}`.
#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(untagged)]
pub enum ItineraryOutcome {
    Structured(GeneratedItinerary),
    RawFallback(RawItinerary),
}

impl ItineraryOutcome {
    pub fn raw(text: impl Into<String>) -> Self {
        ItineraryOutcome::RawFallback(RawItinerary {
            raw_text: text.into(),
        })
    }

    pub fn as_structured(&self) -> Option<&GeneratedItinerary> {
        match self {
            ItineraryOutcome::Structured(itinerary) => Some(itinerary),
            ItineraryOutcome::RawFallback(_) => None,
        }
    }
}
