//! The canonical, post-normalization view of one seed variety.

use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

use crate::enums::{EvidenceQuality, Season, StressTolerance, StressType};
use crate::states::state_code;

/// Default crop when the source has none.
pub const UNKNOWN_CROP: &str = "Unknown";
/// Default variety name when the source has none.
pub const UNKNOWN_VARIETY: &str = "Unknown Variety";
/// Default for free-form fields that identify something (year, state).
pub const UNKNOWN: &str = "Unknown";
/// Default for descriptive free-form fields.
pub const NOT_SPECIFIED: &str = "Not specified";
/// Default assessment text.
pub const NO_ANALYSIS: &str = "No detailed analysis available";
/// Key attributes of a variety with no detected stress type.
pub const STANDARD_VARIETY: &str = "Standard variety";

/// One seed variety, flattened from any supported source shape.
///
/// Every text field is always populated; missing source data is replaced
/// by the documented defaults above. Stress tolerance is derived from
/// `stress_types` and therefore cannot disagree with it; it is still
/// written out as a `stress_tolerance` field when serialized.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VarietyRecord {
    pub id: String,
    pub crop: String,
    pub variety_name: String,
    pub year_of_release: String,
    pub stress_types: Vec<StressType>,
    pub key_attributes: String,
    pub notes: String,
    pub institution: String,
    pub value_chain: String,
    /// Canonical full state names, primary state first.
    pub states: Vec<String>,
    pub seasons: Vec<Season>,
    pub days_to_maturity: String,
    pub evidence_quality: EvidenceQuality,
    pub source_official: Option<OfficialSource>,
    pub source_research: ResearchEvidence,
}

impl Default for VarietyRecord {
    fn default() -> Self {
        Self {
            id: derive_record_id(UNKNOWN_CROP, UNKNOWN_VARIETY, UNKNOWN),
            crop: UNKNOWN_CROP.to_string(),
            variety_name: UNKNOWN_VARIETY.to_string(),
            year_of_release: UNKNOWN.to_string(),
            stress_types: Vec::new(),
            key_attributes: STANDARD_VARIETY.to_string(),
            notes: NO_ANALYSIS.to_string(),
            institution: NOT_SPECIFIED.to_string(),
            value_chain: NOT_SPECIFIED.to_string(),
            states: Vec::new(),
            seasons: Vec::new(),
            days_to_maturity: NOT_SPECIFIED.to_string(),
            evidence_quality: EvidenceQuality::default(),
            source_official: None,
            source_research: ResearchEvidence::default(),
        }
    }
}

impl VarietyRecord {
    /// "Yes" iff at least one stress type was detected.
    pub fn stress_tolerance(&self) -> StressTolerance {
        StressTolerance::from_flag(!self.stress_types.is_empty())
    }

    /// First listed state, or "Unknown".
    pub fn primary_state(&self) -> &str {
        self.states.first().map_or(UNKNOWN, String::as_str)
    }

    pub fn states_label(&self) -> String {
        if self.states.is_empty() {
            UNKNOWN.to_string()
        } else {
            self.states.join(", ")
        }
    }

    /// States as two-letter codes ("PB, HR"); names without a code pass through.
    pub fn state_codes_label(&self) -> String {
        if self.states.is_empty() {
            UNKNOWN.to_string()
        } else {
            join_labels(
                self.states
                    .iter()
                    .map(|name| state_code(name).unwrap_or(name.as_str())),
            )
        }
    }

    pub fn seasons_label(&self) -> String {
        if self.seasons.is_empty() {
            Season::NOT_SPECIFIED.to_string()
        } else {
            join_labels(self.seasons.iter().map(Season::as_str))
        }
    }

    pub fn stress_types_label(&self) -> String {
        if self.stress_types.is_empty() {
            NOT_SPECIFIED.to_string()
        } else {
            join_labels(self.stress_types.iter().map(StressType::as_str))
        }
    }

    pub fn has_official_source(&self) -> bool {
        self.source_official.is_some()
    }
}

impl Serialize for VarietyRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("VarietyRecord", 16)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("crop", &self.crop)?;
        state.serialize_field("variety_name", &self.variety_name)?;
        state.serialize_field("year_of_release", &self.year_of_release)?;
        state.serialize_field("stress_tolerance", &self.stress_tolerance())?;
        state.serialize_field("stress_types", &self.stress_types)?;
        state.serialize_field("key_attributes", &self.key_attributes)?;
        state.serialize_field("notes", &self.notes)?;
        state.serialize_field("institution", &self.institution)?;
        state.serialize_field("value_chain", &self.value_chain)?;
        state.serialize_field("states", &self.states)?;
        state.serialize_field("seasons", &self.seasons)?;
        state.serialize_field("days_to_maturity", &self.days_to_maturity)?;
        state.serialize_field("evidence_quality", &self.evidence_quality)?;
        state.serialize_field("source_official", &self.source_official)?;
        state.serialize_field("source_research", &self.source_research)?;
        state.end()
    }
}

/// Identifier used when the source carries none.
pub fn derive_record_id(crop: &str, variety_name: &str, year: &str) -> String {
    format!("{crop}_{variety_name}_{year}")
}

fn join_labels<'a>(labels: impl Iterator<Item = &'a str>) -> String {
    labels.collect::<Vec<_>>().join(", ")
}

/// Cross-reference to the official variety registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficialSource {
    /// Registry detail page for the variety.
    pub portal_url: String,
    /// Registry variety code, when known.
    pub variety_id: Option<String>,
    /// Registry fields keyed by their registry label (e.g. "Notification Date").
    pub fields: BTreeMap<String, String>,
}

impl OfficialSource {
    /// Returns a registry field if it is present and non-empty.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .get(name)
            .map(|value| value.trim())
            .filter(|value| !value.is_empty())
    }
}

/// Research-derived evidence aggregated from literature searches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResearchEvidence {
    /// Sum of result counts over all queries.
    pub total_results: u64,
    /// Queries that returned at least one result.
    pub successful_queries: u64,
    /// Stress types whose queries returned results, in detection order.
    pub stress_signals: Vec<StressType>,
    pub disease_reports: u64,
    pub pest_reports: u64,
    pub field_trials: u64,
    pub commercial_availability: u64,
    /// Where the research record came from (e.g. "enhanced_batch").
    pub data_source: String,
    /// Free-text assessment.
    pub summary: String,
    pub enhancement_tags: Vec<String>,
}
