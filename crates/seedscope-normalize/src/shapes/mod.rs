//! One normalization function per raw record shape.

mod analysis;
mod enhanced;
mod tabular;

pub use analysis::normalize_analysis;
pub use enhanced::normalize_enhanced;
pub use tabular::normalize_tabular;

use seedscope_ingest::RawRecord;
use seedscope_model::{EvidenceQuality, STANDARD_VARIETY, StressType, VarietyRecord};

/// Normalize any raw record.
pub fn normalize(raw: &RawRecord) -> VarietyRecord {
    match raw {
        RawRecord::Analysis(object) => normalize_analysis(object),
        RawRecord::Enhanced(object) => normalize_enhanced(object),
        RawRecord::Tabular(row) => normalize_tabular(row),
    }
}

/// Normalize a batch, keeping source order.
pub fn normalize_all(raw: &[RawRecord]) -> Vec<VarietyRecord> {
    raw.iter().map(normalize).collect()
}

/// Key attributes when the source gives none.
fn key_attributes_for(stress_types: &[StressType]) -> String {
    if stress_types.is_empty() {
        STANDARD_VARIETY.to_string()
    } else {
        stress_types
            .iter()
            .map(StressType::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn parse_evidence(value: Option<String>) -> Option<EvidenceQuality> {
    let value = value?;
    match value.parse() {
        Ok(quality) => Some(quality),
        Err(_) => {
            tracing::debug!(value, "ignoring unrecognised evidence grade");
            None
        }
    }
}
