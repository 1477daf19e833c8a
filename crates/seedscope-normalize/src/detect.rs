//! Stress, season and state detection.

use serde_json::Value;

use seedscope_model::{Season, StressType, canonicalize_states};

/// Sentinel meaning "no information" in stress profiles.
const UNKNOWN_SENTINEL: &str = "unknown";

/// Profile sub-field inspected for each stress type, relative to
/// `stress_tolerance_profile`.
const PROFILE_FIELDS: [(StressType, &str); 6] = [
    (StressType::Drought, "/drought_tolerance/tolerance_level"),
    (StressType::Heat, "/heat_tolerance/temperature_thresholds"),
    (
        StressType::Salinity,
        "/salinity_tolerance/salt_concentration_tolerance",
    ),
    (StressType::Flood, "/flood_tolerance/waterlogging_duration"),
    (StressType::Disease, "/disease_resistance/specific_pathogens"),
    (StressType::Pest, "/pest_resistance/target_insects"),
];

/// Labels that mean "none" in compiled stress lists.
const NO_STRESS_LABELS: &[&str] = &["not specified", "none", "unknown", "standard variety"];

/// Stress types whose profile sub-field is present and not "unknown".
pub fn detect_stress_profile(profile: &Value) -> Vec<StressType> {
    PROFILE_FIELDS
        .iter()
        .filter(|(_, pointer)| profile.pointer(pointer).is_some_and(is_informative))
        .map(|(stress, _)| *stress)
        .collect()
}

fn is_informative(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => {
            let trimmed = s.trim();
            !trimmed.is_empty() && !trimmed.eq_ignore_ascii_case(UNKNOWN_SENTINEL)
        }
        Value::Array(items) => !items.is_empty(),
        Value::Object(map) => !map.is_empty(),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

/// Parse stress labels, dropping anything outside the vocabulary.
///
/// The result is deduplicated and in vocabulary order.
pub fn parse_stress_labels<I, S>(labels: I) -> Vec<StressType>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut found: Vec<StressType> = Vec::new();
    for label in labels {
        let label = label.as_ref().trim();
        if label.is_empty() || NO_STRESS_LABELS.contains(&label.to_lowercase().as_str()) {
            continue;
        }
        match label.parse::<StressType>() {
            Ok(stress) if !found.contains(&stress) => found.push(stress),
            Ok(_) => {}
            Err(_) => tracing::debug!(label, "dropping stress label outside vocabulary"),
        }
    }
    found.sort();
    found
}

/// Seasons mentioned in free text, in keyword scan order.
pub fn detect_seasons(text: &str) -> Vec<Season> {
    let lowered = text.to_lowercase();
    Season::ALL
        .into_iter()
        .filter(|season| lowered.contains(season.keyword()))
        .collect()
}

/// Canonical state names from a comma-delimited list.
pub fn split_states(text: &str) -> Vec<String> {
    canonicalize_states(text.split(','))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_detection_skips_unknown_and_missing() {
        let profile = json!({
            "drought_tolerance": {"tolerance_level": "high"},
            "heat_tolerance": {"temperature_thresholds": "Unknown "},
            "salinity_tolerance": {},
            "disease_resistance": {"specific_pathogens": ["blast", "bacterial blight"]},
            "pest_resistance": {"target_insects": []}
        });
        assert_eq!(
            detect_stress_profile(&profile),
            vec![StressType::Drought, StressType::Disease]
        );
    }

    #[test]
    fn test_parse_stress_labels() {
        let parsed = parse_stress_labels(["Salt", "Drought", "Cold", "drought", " "]);
        assert_eq!(parsed, vec![StressType::Drought, StressType::Salinity]);
        assert!(parse_stress_labels(["Not specified"]).is_empty());
    }

    #[test]
    fn test_detect_seasons_in_scan_order() {
        assert_eq!(
            detect_seasons("Suitable for RABI and late Kharif sowing"),
            vec![Season::Kharif, Season::Rabi]
        );
        assert!(detect_seasons("irrigated lowlands").is_empty());
    }

    #[test]
    fn test_split_states_canonicalizes() {
        assert_eq!(
            split_states("PB, Haryana, Not Specified, pb"),
            vec!["Punjab", "Haryana"]
        );
    }
}
