use chrono::{Datelike, NaiveDate, Weekday};

use crate::models::weather::{CrowdEstimate, CrowdLevel};

/// Canonical day counts for the duration categories offered by the trip form.
const DURATION_DAY_COUNTS: [(&str, u32); 4] = [
    ("weekend-getaway-(1-3-days)", 3),
    ("short-trip-(4-7-days)", 7),
    ("medium-trip-(1-2-weeks)", 14),
    ("long-trip-(2+-weeks)", 21),
];

const DEFAULT_DURATION_DAYS: u32 = 3;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Resolve a duration-category label to its canonical day count.
/// Unrecognized labels fall back to the shortest trip.
pub fn duration_day_count(duration: &str) -> u32 {
    DURATION_DAY_COUNTS
        .iter()
        .find(|(label, _)| *label == duration)
        .map(|(_, days)| *days)
        .unwrap_or(DEFAULT_DURATION_DAYS)
}

/// Estimate congestion from the departure weekday alone: weekend departures
/// read as high, everything else as moderate. Only the start day is
/// considered, not the full trip span. Unparseable dates are read as
/// weekdays.
pub fn estimate_crowd_level(departure_date: &str, duration: &str) -> CrowdEstimate {
    let crowd_level = match NaiveDate::parse_from_str(departure_date, DATE_FORMAT) {
        Ok(date) => match date.weekday() {
            Weekday::Sat | Weekday::Sun => CrowdLevel::High,
            _ => CrowdLevel::Moderate,
        },
        Err(_) => CrowdLevel::Moderate,
    };

    CrowdEstimate {
        crowd_level,
        duration_days: duration_day_count(duration),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognized_duration_labels_map_to_fixed_day_counts() {
        assert_eq!(duration_day_count("weekend-getaway-(1-3-days)"), 3);
        assert_eq!(duration_day_count("short-trip-(4-7-days)"), 7);
        assert_eq!(duration_day_count("medium-trip-(1-2-weeks)"), 14);
        assert_eq!(duration_day_count("long-trip-(2+-weeks)"), 21);
    }

    #[test]
    fn unrecognized_duration_label_defaults_to_three_days() {
        assert_eq!(duration_day_count("sabbatical"), 3);
        assert_eq!(duration_day_count(""), 3);
        // Case matters: labels come from the form verbatim.
        assert_eq!(duration_day_count("Short-Trip-(4-7-Days)"), 3);
    }

    #[test]
    fn weekend_departures_read_as_high() {
        // 2025-06-14 is a Saturday, 2025-06-15 a Sunday.
        let saturday = estimate_crowd_level("2025-06-14", "weekend-getaway-(1-3-days)");
        assert_eq!(saturday.crowd_level, CrowdLevel::High);
        assert_eq!(saturday.duration_days, 3);

        let sunday = estimate_crowd_level("2025-06-15", "long-trip-(2+-weeks)");
        assert_eq!(sunday.crowd_level, CrowdLevel::High);
        assert_eq!(sunday.duration_days, 21);
    }

    #[test]
    fn weekday_departures_read_as_moderate() {
        for date in ["2025-06-16", "2025-06-17", "2025-06-18", "2025-06-19", "2025-06-20"] {
            let estimate = estimate_crowd_level(date, "short-trip-(4-7-days)");
            assert_eq!(estimate.crowd_level, CrowdLevel::Moderate, "{}", date);
        }
    }

    #[test]
    fn unparseable_dates_read_as_weekdays() {
        let estimate = estimate_crowd_level("not-a-date", "medium-trip-(1-2-weeks)");
        assert_eq!(estimate.crowd_level, CrowdLevel::Moderate);
        assert_eq!(estimate.duration_days, 14);
    }
}
