//! CSV rows in either compiled layout: the snake_case export
//! (`variety_name`, `states_acronyms`, `stress_types_list`, ...) or the
//! titled export (`Seed_Name`, `All_States`, `Stressors_Broadly_Defined`, ...).

use seedscope_ingest::TabularRow;
use seedscope_model::{
    NO_ANALYSIS, NOT_SPECIFIED, ResearchEvidence, UNKNOWN, UNKNOWN_CROP, UNKNOWN_VARIETY,
    VarietyRecord, derive_record_id,
};

use super::{key_attributes_for, parse_evidence};
use crate::chain::{Accessor::Column, FieldChain, count_text};
use crate::detect::{detect_seasons, parse_stress_labels, split_states};
use crate::official::OfficialBuilder;

const DATA_SOURCE_DEFAULT: &str = "csv";

const ID: FieldChain = FieldChain::new("variety_id", &[Column("variety_id")], "");
const CROP: FieldChain = FieldChain::new(
    "crop",
    &[Column("crop"), Column("Crop_Type")],
    UNKNOWN_CROP,
);
const VARIETY: FieldChain = FieldChain::new(
    "variety_name",
    &[Column("variety_name"), Column("Seed_Name"), Column("Variety")],
    UNKNOWN_VARIETY,
);
const YEAR: FieldChain = FieldChain::new(
    "year_of_release",
    &[Column("year_of_release"), Column("Year_of_Release")],
    UNKNOWN,
);
const STATES: FieldChain = FieldChain::new(
    "states",
    &[
        Column("states_acronyms"),
        Column("All_States"),
        Column("Primary_State"),
    ],
    "",
);
const PIPE_STRESSES: FieldChain =
    FieldChain::new("stress_types", &[Column("stress_types_list")], "");
const COMMA_STRESSES: FieldChain =
    FieldChain::new("stress_types", &[Column("Stressors_Broadly_Defined")], "");
const SEASONS: FieldChain = FieldChain::new(
    "seasons",
    &[Column("seasons"), Column("Crop_Season")],
    "",
);
const MATURITY: FieldChain = FieldChain::new(
    "days_to_maturity",
    &[Column("days_to_maturity"), Column("maturityDays")],
    NOT_SPECIFIED,
);
const KEY_ATTRIBUTES: FieldChain =
    FieldChain::new("key_attributes", &[Column("key_attributes")], "");
const NOTES: FieldChain = FieldChain::new(
    "notes",
    &[Column("In_Depth_Stress_Tolerance_Notes"), Column("notes")],
    NO_ANALYSIS,
);
const INSTITUTION: FieldChain = FieldChain::new(
    "institution",
    &[Column("institution"), Column("Breeder_Origin_Institution")],
    NOT_SPECIFIED,
);
const VALUE_CHAIN: FieldChain =
    FieldChain::new("value_chain", &[Column("Crop_Value_Chain")], NOT_SPECIFIED);
const EVIDENCE: FieldChain =
    FieldChain::new("evidence_quality", &[Column("evidence_quality")], "");
const DATA_SOURCE: FieldChain =
    FieldChain::new("data_source", &[Column("data_source")], DATA_SOURCE_DEFAULT);
const TOTAL_RESULTS: FieldChain =
    FieldChain::new("search_results_total", &[Column("search_results_total")], "");
const REGISTRY_ID: FieldChain =
    FieldChain::new("seednet_variety_id", &[Column("seednet_variety_id")], "");
const REGISTRY_URL: FieldChain = FieldChain::new("seednet_url", &[Column("seednet_url")], "");

/// Registry columns of the titled layout and the registry label they carry.
const REGISTRY_COLUMNS: [(&str, &str); 3] = [
    ("notificationDate", "Notification Date"),
    ("averageYield", "Average Yield (Kg/Ha)"),
    ("maturityDays", "Maturity (in days)"),
];

/// Normalize one CSV row.
pub fn normalize_tabular(row: &TabularRow) -> VarietyRecord {
    let crop = CROP.resolve_row(row);
    let variety_name = VARIETY.resolve_row(row);
    let year_of_release = YEAR.resolve_row(row);

    let stress_types = match PIPE_STRESSES.find_row(row) {
        Some(list) => parse_stress_labels(list.split('|')),
        None => COMMA_STRESSES
            .find_row(row)
            .map(|list| parse_stress_labels(list.split(',')))
            .unwrap_or_default(),
    };

    let states = STATES
        .find_row(row)
        .map(|text| split_states(&text))
        .unwrap_or_default();
    let seasons = SEASONS
        .find_row(row)
        .map(|text| detect_seasons(&text))
        .unwrap_or_default();

    let official = REGISTRY_COLUMNS
        .iter()
        .fold(
            OfficialBuilder::new()
                .url(REGISTRY_URL.find_row(row))
                .variety_id(REGISTRY_ID.find_row(row)),
            |builder, (column, label)| builder.text_field(label, row.get(column)),
        )
        .build();

    let notes = NOTES.resolve_row(row);
    let source_research = ResearchEvidence {
        total_results: TOTAL_RESULTS
            .find_row(row)
            .map_or(0, |text| count_text(&text)),
        stress_signals: stress_types.clone(),
        data_source: DATA_SOURCE.resolve_row(row),
        summary: notes.clone(),
        ..ResearchEvidence::default()
    };

    VarietyRecord {
        id: ID
            .find_row(row)
            .unwrap_or_else(|| derive_record_id(&crop, &variety_name, &year_of_release)),
        key_attributes: KEY_ATTRIBUTES
            .find_row(row)
            .unwrap_or_else(|| key_attributes_for(&stress_types)),
        notes,
        institution: INSTITUTION.resolve_row(row),
        value_chain: VALUE_CHAIN.resolve_row(row),
        states,
        seasons,
        days_to_maturity: MATURITY.resolve_row(row),
        evidence_quality: parse_evidence(EVIDENCE.find_row(row)).unwrap_or_default(),
        source_official: official,
        source_research,
        crop,
        variety_name,
        year_of_release,
        stress_types,
    }
}
