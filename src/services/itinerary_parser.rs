use regex::Regex;

use crate::models::itinerary::{GeneratedItinerary, ItineraryOutcome};
use crate::models::weather::{CrowdLevel, WeatherDay};

// Models wrap JSON replies in Markdown fences more often than not.
const CODE_FENCE_PATTERN: &str = "```json\n|\n```";

/// Read the model's reply into an itinerary. Formatting fences are
/// stripped, the text is parsed strictly, and the result is repaired with
/// data already computed upstream: per-day weather is assigned positionally
/// where absent, and the crowd level is filled in when the plans carry none.
/// Anything unparseable degrades to the raw-text wrapper; this function
/// never fails.
pub fn parse_itinerary(
    raw_text: &str,
    forecast: &[WeatherDay],
    crowd_level: CrowdLevel,
) -> ItineraryOutcome {
    let fence = Regex::new(CODE_FENCE_PATTERN).expect("code-fence pattern compiles");
    let clean = fence.replace_all(raw_text, "");
    let clean = clean.trim();

    let value: serde_json::Value = match serde_json::from_str(clean) {
        Ok(value) => value,
        Err(err) => {
            eprintln!(
                "Generation output is not valid JSON, falling back to raw text: {}",
                err
            );
            return ItineraryOutcome::raw(raw_text);
        }
    };

    let mut itinerary: GeneratedItinerary = match serde_json::from_value(value) {
        Ok(itinerary) => itinerary,
        Err(err) => {
            eprintln!(
                "Generation output does not fit the itinerary shape, falling back to raw text: {}",
                err
            );
            return ItineraryOutcome::raw(raw_text);
        }
    };

    if let Some(plans) = itinerary.daily_plans.as_mut() {
        for (index, plan) in plans.iter_mut().enumerate() {
            if plan.weather.is_none() {
                plan.weather = forecast.get(index).cloned();
            }
        }
        if itinerary.crowd_level.is_none() {
            itinerary.crowd_level = Some(crowd_level.as_str().to_string());
        }
    }

    ItineraryOutcome::Structured(itinerary)
}
