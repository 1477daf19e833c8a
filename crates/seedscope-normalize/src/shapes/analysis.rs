//! Per-variety analysis results: nested `original_data`, flattened
//! `seednet_raw_*` registry keys, `analysis_result` and `search_metadata`.

use serde_json::Value;

use seedscope_ingest::JsonObject;
use seedscope_model::{
    NO_ANALYSIS, NOT_SPECIFIED, ResearchEvidence, UNKNOWN, UNKNOWN_CROP, UNKNOWN_VARIETY,
    VarietyRecord, derive_record_id,
};

use super::{key_attributes_for, parse_evidence};
use crate::chain::{Accessor::Pointer, FieldChain, lookup};
use crate::detect::{detect_seasons, detect_stress_profile, split_states};
use crate::evidence::QuerySummary;
use crate::official::OfficialBuilder;

const DATA_SOURCE_DEFAULT: &str = "analysis";

const ID: FieldChain = FieldChain::new("variety_id", &[Pointer("/variety_id")], "");
const CROP: FieldChain = FieldChain::new(
    "crop",
    &[
        Pointer("/original_data/seednet_data/Crop Name"),
        Pointer("/seednet_raw_Crop Name"),
        Pointer("/original_data/crop"),
        Pointer("/original_data/crop_type"),
    ],
    UNKNOWN_CROP,
);
const VARIETY: FieldChain = FieldChain::new(
    "variety_name",
    &[
        Pointer("/original_data/seednet_data/Variety Name"),
        Pointer("/seednet_raw_Variety Name"),
        Pointer("/original_data/variety_name"),
        Pointer("/original_data/crop_variety"),
    ],
    UNKNOWN_VARIETY,
);
const YEAR: FieldChain = FieldChain::new(
    "year_of_release",
    &[
        Pointer("/original_data/seednet_data/Year of Release"),
        Pointer("/seednet_raw_Year of Release"),
        Pointer("/original_data/year"),
        Pointer("/original_data/extracted_year"),
    ],
    UNKNOWN,
);
const STATES: FieldChain = FieldChain::new(
    "states",
    &[
        Pointer("/original_data/seednet_data/Recommended States"),
        Pointer("/seednet_raw_Recommended States"),
        Pointer("/original_data/state_zone"),
        Pointer("/original_data/state_zone_standardized"),
    ],
    "",
);
const ADAPTATION: FieldChain = FieldChain::new(
    "seasons",
    &[
        Pointer("/original_data/seednet_data/Adaptation and recommended ecology"),
        Pointer("/seednet_raw_Adaptation and recommended ecology"),
        Pointer("/original_data/season"),
        Pointer("/original_data/crop_season"),
    ],
    "",
);
const NOTES: FieldChain = FieldChain::new(
    "notes",
    &[Pointer("/analysis_result/variety_analysis/overall_assessment")],
    NO_ANALYSIS,
);
const INSTITUTION: FieldChain = FieldChain::new(
    "institution",
    &[
        Pointer("/original_data/seednet_data/Institution Responsible for developing Breeder Seed"),
        Pointer("/seednet_raw_Institution Responsible for developing Breeder Seed"),
        Pointer("/original_data/institution"),
    ],
    NOT_SPECIFIED,
);
const VALUE_CHAIN: FieldChain = FieldChain::new(
    "value_chain",
    &[
        Pointer("/original_data/seednet_data/Group Name"),
        Pointer("/seednet_raw_Group Name"),
    ],
    NOT_SPECIFIED,
);
const MATURITY: FieldChain = FieldChain::new(
    "days_to_maturity",
    &[
        Pointer("/original_data/seednet_data/Maturity (in days)"),
        Pointer("/seednet_raw_Maturity (in days)"),
        Pointer("/original_data/maturity_days"),
    ],
    NOT_SPECIFIED,
);
const KEY_ATTRIBUTES: FieldChain =
    FieldChain::new("key_attributes", &[Pointer("/key_attributes")], "");
const EVIDENCE: FieldChain =
    FieldChain::new("evidence_quality", &[Pointer("/evidence_quality")], "");
const DATA_SOURCE: FieldChain = FieldChain::new(
    "data_source",
    &[Pointer("/original_data/data_source")],
    DATA_SOURCE_DEFAULT,
);
const REGISTRY_ID: FieldChain = FieldChain::new(
    "seednet_variety_id",
    &[
        Pointer("/seednet_raw_variety_id"),
        Pointer("/original_data/seednet_data/variety_id"),
    ],
    "",
);
const REGISTRY_URL: FieldChain =
    FieldChain::new("seednet_url", &[Pointer("/seednet_raw_source_url")], "");

/// Normalize a per-variety analysis result.
///
/// Stress types come from `analysis_result.stress_tolerance_profile` when
/// the record has one, otherwise from successful search queries.
pub fn normalize_analysis(object: &JsonObject) -> VarietyRecord {
    let crop = CROP.resolve_json(object);
    let variety_name = VARIETY.resolve_json(object);
    let year_of_release = YEAR.resolve_json(object);
    let queries = QuerySummary::from_results(lookup(object, "/search_metadata/query_results"));

    let stress_types = match lookup(object, "/analysis_result/stress_tolerance_profile") {
        Some(profile @ Value::Object(_)) => detect_stress_profile(profile),
        _ => queries.stress_signals.clone(),
    };

    let states = STATES
        .find_json(object)
        .map(|text| split_states(&text))
        .unwrap_or_default();
    let seasons = ADAPTATION
        .find_json(object)
        .map(|text| detect_seasons(&text))
        .unwrap_or_default();

    let evidence_quality = parse_evidence(EVIDENCE.find_json(object))
        .or_else(|| queries.grade())
        .unwrap_or_default();

    let official = OfficialBuilder::new()
        .url(REGISTRY_URL.find_json(object))
        .variety_id(REGISTRY_ID.find_json(object))
        .fields_from(lookup(object, "/original_data/seednet_data"))
        .prefixed_fields_from(object)
        .build();

    let notes = NOTES.resolve_json(object);
    let source_research = ResearchEvidence {
        total_results: queries.total_results,
        successful_queries: queries.successful,
        stress_signals: queries.stress_signals.clone(),
        disease_reports: queries.disease,
        pest_reports: queries.pest,
        field_trials: queries.field_trials,
        commercial_availability: queries.commercial_availability,
        data_source: DATA_SOURCE.resolve_json(object),
        summary: notes.clone(),
        enhancement_tags: Vec::new(),
    };

    VarietyRecord {
        id: ID
            .find_json(object)
            .unwrap_or_else(|| derive_record_id(&crop, &variety_name, &year_of_release)),
        key_attributes: KEY_ATTRIBUTES
            .find_json(object)
            .unwrap_or_else(|| key_attributes_for(&stress_types)),
        notes,
        institution: INSTITUTION.resolve_json(object),
        value_chain: VALUE_CHAIN.resolve_json(object),
        states,
        seasons,
        days_to_maturity: MATURITY.resolve_json(object),
        evidence_quality,
        source_official: official,
        source_research,
        crop,
        variety_name,
        year_of_release,
        stress_types,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedscope_model::{EvidenceQuality, Season, StressTolerance, StressType};
    use serde_json::json;

    fn object(value: Value) -> JsonObject {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn test_minimal_profile_record() {
        let record = normalize_analysis(&object(json!({
            "original_data": {"seednet_data": {"Variety Name": "IR64", "Crop Name": "Rice"}},
            "analysis_result": {
                "stress_tolerance_profile": {"drought_tolerance": {"tolerance_level": "high"}}
            }
        })));
        assert_eq!(record.variety_name, "IR64");
        assert_eq!(record.crop, "Rice");
        assert_eq!(record.stress_types, vec![StressType::Drought]);
        assert_eq!(record.stress_tolerance(), StressTolerance::Yes);
        assert_eq!(record.year_of_release, "Unknown");
        assert_eq!(record.id, "Rice_IR64_Unknown");
        assert_eq!(record.key_attributes, "Drought");
        assert_eq!(record.evidence_quality, EvidenceQuality::Medium);
        assert!(record.source_official.is_none());
    }

    #[test]
    fn test_registry_fields_and_seasons() {
        let record = normalize_analysis(&object(json!({
            "variety_id": "rice-0042",
            "original_data": {
                "seednet_data": {
                    "Variety Name": "Swarna Sub1",
                    "Crop Name": "Rice",
                    "Year of Release": 2009,
                    "Recommended States": "Odisha, WB, Not Specified",
                    "Adaptation and recommended ecology": "Kharif, flood prone lowlands",
                    "Group Name": "Cereals"
                }
            },
            "seednet_raw_variety_id": "5501",
            "seednet_raw_Notification Date": "2009-06-15",
            "analysis_result": {
                "variety_analysis": {"overall_assessment": "Tolerates 14 days submergence."},
                "stress_tolerance_profile": {
                    "flood_tolerance": {"waterlogging_duration": "14 days"},
                    "drought_tolerance": {"tolerance_level": "unknown"}
                }
            }
        })));
        assert_eq!(record.id, "rice-0042");
        assert_eq!(record.year_of_release, "2009");
        assert_eq!(record.states, vec!["Odisha", "West Bengal"]);
        assert_eq!(record.primary_state(), "Odisha");
        assert_eq!(record.seasons, vec![Season::Kharif]);
        assert_eq!(record.stress_types, vec![StressType::Flood]);
        assert_eq!(record.value_chain, "Cereals");
        assert_eq!(record.notes, "Tolerates 14 days submergence.");

        let official = record.source_official.expect("official source");
        assert_eq!(official.variety_id.as_deref(), Some("5501"));
        assert!(official.portal_url.ends_with("varietycd=5501"));
        assert_eq!(official.field("Notification Date"), Some("2009-06-15"));
        assert_eq!(official.field("Group Name"), Some("Cereals"));
    }

    #[test]
    fn test_query_results_drive_stress_and_evidence_without_profile() {
        let queries: Vec<Value> = (0..10)
            .map(|i| json!({"query": format!("HD 2967 heat tolerance study {i}"), "results_count": 6}))
            .collect();
        let record = normalize_analysis(&object(json!({
            "original_data": {"crop": "Wheat", "variety_name": "HD 2967", "extracted_year": 2011},
            "search_metadata": {"query_results": queries}
        })));
        assert_eq!(record.stress_types, vec![StressType::Heat]);
        assert_eq!(record.evidence_quality, EvidenceQuality::High);
        assert_eq!(record.source_research.total_results, 60);
        assert_eq!(record.source_research.successful_queries, 10);
        assert_eq!(record.source_research.data_source, "analysis");
        assert_eq!(record.year_of_release, "2011");
    }
}
