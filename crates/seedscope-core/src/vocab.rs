//! Filter option vocabularies.

use std::collections::BTreeSet;

use serde::Serialize;

use seedscope_model::{EvidenceQuality, StressType, VarietyRecord, is_placeholder_state};

use crate::sort::compare_values;

/// Distinct values offered for each filter category.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Vocabulary {
    pub crops: Vec<String>,
    pub states: Vec<String>,
    /// Alphabetical by label.
    pub stress_types: Vec<StressType>,
    pub evidence: Vec<EvidenceQuality>,
    /// Numeric years first, then free-form values.
    pub years: Vec<String>,
}

impl Vocabulary {
    /// Collect vocabularies from any subset of records.
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a VarietyRecord>) -> Self {
        let mut crops = BTreeSet::new();
        let mut states = BTreeSet::new();
        let mut stress_types = BTreeSet::new();
        let mut evidence = BTreeSet::new();
        let mut years = BTreeSet::new();

        for record in records {
            if !record.crop.trim().is_empty() {
                crops.insert(record.crop.clone());
            }
            states.extend(
                record
                    .states
                    .iter()
                    .filter(|state| !is_placeholder_state(state))
                    .cloned(),
            );
            stress_types.extend(record.stress_types.iter().copied());
            evidence.insert(record.evidence_quality);
            if !record.year_of_release.trim().is_empty() {
                years.insert(record.year_of_release.clone());
            }
        }

        let mut years: Vec<String> = years.into_iter().collect();
        years.sort_by(|a, b| compare_values(a, b));
        let mut stress_types: Vec<StressType> = stress_types.into_iter().collect();
        stress_types.sort_by_key(StressType::as_str);

        Self {
            crops: crops.into_iter().collect(),
            states: states.into_iter().collect(),
            stress_types,
            evidence: evidence.into_iter().collect(),
            years,
        }
    }

    /// Vocabularies of the records touching any of `states`; all records
    /// when `states` is empty.
    pub fn within_states(records: &[VarietyRecord], states: &BTreeSet<String>) -> Self {
        Self::from_records(records.iter().filter(|record| {
            states.is_empty() || record.states.iter().any(|state| states.contains(state))
        }))
    }
}
