//! Compiled dashboard records: flat fields, `seednet_*` cross-reference
//! fields and a `research_data` block.

use serde_json::Value;

use seedscope_ingest::JsonObject;
use seedscope_model::{
    NO_ANALYSIS, NOT_SPECIFIED, ResearchEvidence, UNKNOWN, UNKNOWN_CROP, UNKNOWN_VARIETY,
    VarietyRecord, canonicalize_states, derive_record_id,
};

use super::{key_attributes_for, parse_evidence};
use crate::chain::{Accessor::Pointer, FieldChain, count_of, lookup, text_items};
use crate::detect::{detect_seasons, parse_stress_labels};
use crate::evidence::QuerySummary;
use crate::official::OfficialBuilder;

const DATA_SOURCE_DEFAULT: &str = "enhanced_batch";

const ID: FieldChain = FieldChain::new("variety_id", &[Pointer("/variety_id")], "");
const CROP: FieldChain = FieldChain::new(
    "crop",
    &[Pointer("/crop"), Pointer("/research_data/basic_info/crop")],
    UNKNOWN_CROP,
);
const VARIETY: FieldChain = FieldChain::new(
    "variety_name",
    &[
        Pointer("/variety_name"),
        Pointer("/research_data/basic_info/variety_name"),
    ],
    UNKNOWN_VARIETY,
);
const YEAR: FieldChain = FieldChain::new(
    "year_of_release",
    &[
        Pointer("/year_of_release"),
        Pointer("/research_data/basic_info/year"),
    ],
    UNKNOWN,
);
const KEY_ATTRIBUTES: FieldChain =
    FieldChain::new("key_attributes", &[Pointer("/key_attributes")], "");
const NOTES: FieldChain = FieldChain::new(
    "notes",
    &[
        Pointer("/notes"),
        Pointer("/analysis_result/variety_analysis/overall_assessment"),
    ],
    NO_ANALYSIS,
);
const INSTITUTION: FieldChain = FieldChain::new(
    "institution",
    &[
        Pointer("/institution"),
        Pointer("/research_data/basic_info/institution"),
        Pointer("/seednet_fields/Institution Responsible for developing Breeder Seed"),
    ],
    NOT_SPECIFIED,
);
const VALUE_CHAIN: FieldChain = FieldChain::new(
    "value_chain",
    &[Pointer("/crop_value_chain"), Pointer("/seednet_fields/Group Name")],
    NOT_SPECIFIED,
);
const MATURITY: FieldChain = FieldChain::new(
    "days_to_maturity",
    &[
        Pointer("/days_to_maturity"),
        Pointer("/seednet_fields/Maturity (in days)"),
    ],
    NOT_SPECIFIED,
);
const EVIDENCE: FieldChain =
    FieldChain::new("evidence_quality", &[Pointer("/evidence_quality")], "");
const DATA_SOURCE: FieldChain = FieldChain::new(
    "data_source",
    &[Pointer("/research_data/basic_info/data_source")],
    DATA_SOURCE_DEFAULT,
);
const REGISTRY_ID: FieldChain = FieldChain::new(
    "seednet_variety_id",
    &[
        Pointer("/seednet_variety_id"),
        Pointer("/seednet_fields/variety_id"),
    ],
    "",
);
const REGISTRY_URL: FieldChain = FieldChain::new(
    "seednet_url",
    &[Pointer("/seednet_url"), Pointer("/seednet_fields/source_url")],
    "",
);

/// Normalize a compiled dashboard record.
///
/// Pre-split lists (`states_full`, `stress_types`, `seednet_fields`) are
/// used directly. Search metadata, when carried along, fills whatever the
/// research block leaves out.
pub fn normalize_enhanced(object: &JsonObject) -> VarietyRecord {
    let crop = CROP.resolve_json(object);
    let variety_name = VARIETY.resolve_json(object);
    let year_of_release = YEAR.resolve_json(object);
    let queries = QuerySummary::from_results(lookup(object, "/search_metadata/query_results"));

    let stress_types = match lookup(object, "/stress_types") {
        Some(Value::Array(_)) => parse_stress_labels(text_items(lookup(object, "/stress_types"))),
        _ => queries.stress_signals.clone(),
    };

    let states = match lookup(object, "/states_full") {
        Some(full @ Value::Array(_)) => canonicalize_states(text_items(Some(full))),
        _ => canonicalize_states(text_items(lookup(object, "/states_acronyms"))),
    };

    let seasons = detect_seasons(&text_items(lookup(object, "/seasons")).join(", "));

    let evidence_quality = parse_evidence(EVIDENCE.find_json(object))
        .or_else(|| queries.grade())
        .unwrap_or_default();

    let flagged = lookup(object, "/seednet_available")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let official = OfficialBuilder::new()
        .url(REGISTRY_URL.find_json(object))
        .variety_id(REGISTRY_ID.find_json(object))
        .flagged(flagged)
        .fields_from(lookup(object, "/seednet_fields"))
        .build();

    let notes = NOTES.resolve_json(object);
    let source_research = research_evidence(object, &queries, &notes);

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

fn research_evidence(object: &JsonObject, queries: &QuerySummary, notes: &str) -> ResearchEvidence {
    let research = lookup(object, "/research_data");
    let count = |pointer: &str, fallback: u64| match research.and_then(|r| r.pointer(pointer)) {
        Some(value) => count_of(Some(value)),
        None => fallback,
    };

    let stress_signals = match research.and_then(|r| r.pointer("/stress_tolerance_evidence")) {
        Some(Value::Object(evidence)) => parse_stress_labels(evidence.keys()),
        _ => queries.stress_signals.clone(),
    };

    ResearchEvidence {
        total_results: count("/search_results_summary", queries.total_results),
        successful_queries: queries.successful,
        stress_signals,
        disease_reports: count("/disease_pest_resistance/disease/count", queries.disease),
        pest_reports: count("/disease_pest_resistance/pest/count", queries.pest),
        field_trials: count("/field_trials", queries.field_trials),
        commercial_availability: count(
            "/commercial_availability",
            queries.commercial_availability,
        ),
        data_source: DATA_SOURCE.resolve_json(object),
        summary: notes.to_string(),
        enhancement_tags: text_items(research.and_then(|r| r.pointer("/enhancement_features"))),
    }
}
