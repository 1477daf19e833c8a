//! Filter criteria and evaluation.
//!
//! Categories combine with AND; values inside a multi-select category
//! combine with OR. An empty category imposes no constraint.

use std::collections::BTreeSet;

use seedscope_model::{
    EvidenceQuality, StressTolerance, StressType, VarietyRecord, canonical_state_name,
};

/// The active filter selections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Criteria {
    query: String,
    crops: BTreeSet<String>,
    states: BTreeSet<String>,
    tolerance: BTreeSet<StressTolerance>,
    evidence: BTreeSet<EvidenceQuality>,
    stress_types: BTreeSet<StressType>,
}

impl Criteria {
    pub fn new() -> Self {
        Self::default()
    }

    /// Free-text query; whitespace-only text clears it.
    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.set_query(query);
        self
    }

    pub fn with_crop(mut self, crop: impl Into<String>) -> Self {
        self.crops.insert(crop.into());
        self
    }

    /// State criterion; codes and names are canonicalized, placeholders ignored.
    pub fn with_state(mut self, state: &str) -> Self {
        if let Some(name) = canonical_state_name(state) {
            self.states.insert(name);
        }
        self
    }

    pub fn with_tolerance(mut self, tolerance: StressTolerance) -> Self {
        self.tolerance.insert(tolerance);
        self
    }

    pub fn with_evidence(mut self, evidence: EvidenceQuality) -> Self {
        self.evidence.insert(evidence);
        self
    }

    pub fn with_stress_type(mut self, stress: StressType) -> Self {
        self.stress_types.insert(stress);
        self
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        let query = query.into();
        self.query = query.trim().to_string();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn crops(&self) -> &BTreeSet<String> {
        &self.crops
    }

    pub fn states(&self) -> &BTreeSet<String> {
        &self.states
    }

    pub fn tolerance(&self) -> &BTreeSet<StressTolerance> {
        &self.tolerance
    }

    pub fn evidence(&self) -> &BTreeSet<EvidenceQuality> {
        &self.evidence
    }

    pub fn stress_types(&self) -> &BTreeSet<StressType> {
        &self.stress_types
    }

    /// True when no category constrains the result.
    pub fn is_empty(&self) -> bool {
        self.query.is_empty()
            && self.crops.is_empty()
            && self.states.is_empty()
            && self.tolerance.is_empty()
            && self.evidence.is_empty()
            && self.stress_types.is_empty()
    }

    /// Whether a record satisfies every active category.
    pub fn matches(&self, record: &VarietyRecord) -> bool {
        self.matches_query(record)
            && (self.crops.is_empty() || self.crops.contains(&record.crop))
            && (self.states.is_empty() || record.states.iter().any(|s| self.states.contains(s)))
            && (self.tolerance.is_empty() || self.tolerance.contains(&record.stress_tolerance()))
            && (self.evidence.is_empty() || self.evidence.contains(&record.evidence_quality))
            && (self.stress_types.is_empty()
                || record
                    .stress_types
                    .iter()
                    .any(|s| self.stress_types.contains(s)))
    }

    fn matches_query(&self, record: &VarietyRecord) -> bool {
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        [
            &record.variety_name,
            &record.crop,
            &record.institution,
            &record.value_chain,
            &record.key_attributes,
            &record.notes,
        ]
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
    }
}

/// Indices of matching records, in collection order.
pub fn filter_indices(records: &[VarietyRecord], criteria: &Criteria) -> Vec<usize> {
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| criteria.matches(record))
        .map(|(index, _)| index)
        .collect()
}
