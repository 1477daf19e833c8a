//! Research evidence derived from literature search results.

use serde_json::Value;

use seedscope_model::{EvidenceQuality, StressType};

use crate::chain::count_of;

/// Query keywords signalling each stress type, in vocabulary order.
const STRESS_KEYWORDS: [(StressType, &[&str]); 6] = [
    (StressType::Drought, &["drought", "water stress"]),
    (StressType::Heat, &["heat", "temperature"]),
    (StressType::Salinity, &["salt", "salin"]),
    (
        StressType::Flood,
        &["flood", "waterlogging", "water logging", "submergence"],
    ),
    (StressType::Disease, &["disease", "pathogen"]),
    (StressType::Pest, &["pest", "insect", "borer"]),
];

/// Aggregate of `search_metadata.query_results`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuerySummary {
    /// Number of query entries seen.
    pub queries: u64,
    pub total_results: u64,
    /// Queries with at least one result.
    pub successful: u64,
    pub stress_signals: Vec<StressType>,
    pub disease: u64,
    pub pest: u64,
    pub field_trials: u64,
    pub commercial_availability: u64,
}

impl QuerySummary {
    /// Summarize a `query_results` array. Non-array input yields an empty summary.
    pub fn from_results(results: Option<&Value>) -> Self {
        let mut summary = QuerySummary::default();
        let Some(Value::Array(entries)) = results else {
            return summary;
        };

        for entry in entries {
            let count = count_of(entry.get("results_count"));
            let query = entry
                .get("query")
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_lowercase();

            summary.queries += 1;
            summary.total_results += count;
            if count == 0 {
                continue;
            }
            summary.successful += 1;

            for (stress, keywords) in STRESS_KEYWORDS {
                if keywords.iter().any(|k| query.contains(k))
                    && !summary.stress_signals.contains(&stress)
                {
                    summary.stress_signals.push(stress);
                }
            }
            if query.contains("disease") {
                summary.disease += 1;
            }
            if query.contains("pest") {
                summary.pest += 1;
            }
            if query.contains("trial") {
                summary.field_trials += 1;
            }
            if query.contains("seed") && query.contains("availability") {
                summary.commercial_availability += 1;
            }
        }

        summary.stress_signals.sort();
        summary
    }

    pub fn is_empty(&self) -> bool {
        self.queries == 0
    }

    /// Grade derived from the totals, or `None` when there were no queries.
    pub fn grade(&self) -> Option<EvidenceQuality> {
        (!self.is_empty()).then(|| grade_evidence(self.total_results, self.successful))
    }
}

/// Evidence grade from result totals.
pub fn grade_evidence(total_results: u64, successful_queries: u64) -> EvidenceQuality {
    if total_results >= 50 && successful_queries >= 10 {
        EvidenceQuality::High
    } else if total_results >= 20 && successful_queries >= 5 {
        EvidenceQuality::Medium
    } else {
        EvidenceQuality::Low
    }
}
