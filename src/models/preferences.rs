use serde::{Deserialize, Serialize};

/// Trip preferences as submitted by the client. Every field is optional at
/// the deserialization layer so that presence validation happens in the
/// pipeline, which owns the client-error contract.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct TripPreferences {
    pub origin: Option<String>,
    pub destination: Option<String>,
    #[serde(rename = "maxPrice")]
    pub max_price: Option<String>,
    #[serde(rename = "departureDate")]
    pub departure_date: Option<String>,
    pub duration: Option<String>,
}

/// Borrowed view of a fully-populated preference set.
#[derive(Debug, Clone, Copy)]
pub struct CompletePreferences<'a> {
    pub origin: &'a str,
    pub destination: &'a str,
    pub max_price: &'a str,
    pub departure_date: &'a str,
    pub duration: &'a str,
}

impl TripPreferences {
    /// All five fields present and non-empty, or nothing.
    pub fn complete(&self) -> Option<CompletePreferences<'_>> {
        fn filled(field: &Option<String>) -> Option<&str> {
            field.as_deref().filter(|value| !value.is_empty())
        }

        Some(CompletePreferences {
            origin: filled(&self.origin)?,
            destination: filled(&self.destination)?,
            max_price: filled(&self.max_price)?,
            departure_date: filled(&self.departure_date)?,
            duration: filled(&self.duration)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full() -> TripPreferences {
        TripPreferences {
            origin: Some("JFK".to_string()),
            destination: Some("Tokyo".to_string()),
            max_price: Some("1000".to_string()),
            departure_date: Some("2025-06-14".to_string()),
            duration: Some("weekend-getaway-(1-3-days)".to_string()),
        }
    }

    #[test]
    fn complete_requires_every_field() {
        assert!(full().complete().is_some());

        let mut missing = full();
        missing.max_price = None;
        assert!(missing.complete().is_none());

        let mut empty = full();
        empty.destination = Some(String::new());
        assert!(empty.complete().is_none());
    }

    #[test]
    fn deserializes_camel_case_fields() {
        let preferences: TripPreferences = serde_json::from_str(
            r#"{"origin":"JFK","destination":"Tokyo","maxPrice":"1000","departureDate":"2025-06-14","duration":"short-trip-(4-7-days)"}"#,
        )
        .unwrap();
        assert_eq!(preferences.max_price.as_deref(), Some("1000"));
        assert_eq!(preferences.departure_date.as_deref(), Some("2025-06-14"));
    }
}
