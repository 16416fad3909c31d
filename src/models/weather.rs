use std::fmt;

use serde::{Deserialize, Serialize};

/// One forecast entry per calendar day. Fields are defaulted because the
/// generative model echoes this shape back without the `date` field; the
/// fetcher always produces fully-populated values.
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct WeatherDay {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub date: String,
    pub temperature: f64,
    pub condition: String,
    #[serde(rename = "rainProbability")]
    pub rain_probability: f64,
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CrowdLevel {
    High,
    Moderate,
}

impl CrowdLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            CrowdLevel::High => "high",
            CrowdLevel::Moderate => "moderate",
        }
    }
}

impl fmt::Display for CrowdLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of the crowd heuristic: expected congestion at departure plus the
/// canonical day count for the requested duration category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrowdEstimate {
    pub crowd_level: CrowdLevel,
    pub duration_days: u32,
}
