//! Headline counts over a record set.

use std::collections::HashSet;

use serde::Serialize;

use seedscope_model::{EvidenceQuality, StressTolerance, VarietyRecord};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct DatasetStats {
    pub total: usize,
    pub stress_tolerant: usize,
    pub high_evidence: usize,
    pub distinct_crops: usize,
    pub official_sources: usize,
}

impl DatasetStats {
    pub fn from_records<'a>(records: impl IntoIterator<Item = &'a VarietyRecord>) -> Self {
        let mut stats = DatasetStats::default();
        let mut crops = HashSet::new();
        for record in records {
            stats.total += 1;
            if record.stress_tolerance() == StressTolerance::Yes {
                stats.stress_tolerant += 1;
            }
            if record.evidence_quality == EvidenceQuality::High {
                stats.high_evidence += 1;
            }
            if record.has_official_source() {
                stats.official_sources += 1;
            }
            crops.insert(record.crop.as_str());
        }
        stats.distinct_crops = crops.len();
        stats
    }
}
