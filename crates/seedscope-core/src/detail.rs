//! Per-variety detail view: official registry data next to research evidence.

use serde::Serialize;

use seedscope_model::{NOT_SPECIFIED, StressType, VarietyRecord};

use crate::dataset::Dataset;
use crate::error::{CoreError, Result};

/// Shown when no stress signal was found in research results.
pub const NO_STRESS_EVIDENCE: &str = "No stress tolerance evidence detected";

/// Shown when a record carries no enhancement tags.
pub const STANDARD_PROCESSING: &str = "Standard processing applied";

const DEFAULT_DATA_SOURCE: &str = "enhanced_batch";

/// Registry fields shown in the official section, with their display label.
const OFFICIAL_FIELDS: [(&str, &str); 12] = [
    ("Variety Name", "Variety Name"),
    ("Notification Number", "Notification Number"),
    ("Notification Date", "Notification Date"),
    ("Year of Release", "Year of Release"),
    ("Institution", "Institution Responsible for developing Breeder Seed"),
    ("Parentage", "Parentage"),
    ("Maturity", "Maturity (in days)"),
    ("Average Yield", "Average Yield (Kg/Ha)"),
    ("Morphological Characteristics", "General Morphological Characteristics"),
    ("Disease Reaction", "Reaction to Major Diseases"),
    ("Pest Reaction", "Reaction to Major Pests"),
    ("Stress Reaction", "Reaction to Stress"),
];

/// A labelled value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailField {
    pub label: &'static str,
    pub value: String,
}

impl DetailField {
    fn new(label: &'static str, value: impl Into<String>) -> Self {
        Self {
            label,
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfficialSection {
    pub fields: Vec<DetailField>,
    pub portal_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResearchSection {
    pub fields: Vec<DetailField>,
    pub stress_evidence: Vec<StressType>,
    pub enhancement_tags: Vec<String>,
}

impl ResearchSection {
    pub fn stress_evidence_label(&self) -> String {
        if self.stress_evidence.is_empty() {
            NO_STRESS_EVIDENCE.to_string()
        } else {
            self.stress_evidence
                .iter()
                .map(StressType::as_str)
                .collect::<Vec<_>>()
                .join(", ")
        }
    }

    pub fn enhancement_label(&self) -> String {
        if self.enhancement_tags.is_empty() {
            STANDARD_PROCESSING.to_string()
        } else {
            self.enhancement_tags.join(", ")
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetailView {
    pub id: String,
    pub title: String,
    /// First listed state, or "Unknown".
    pub primary_state: String,
    /// Present only for records with a registry cross-reference.
    pub official: Option<OfficialSection>,
    pub research: ResearchSection,
}

impl DetailView {
    pub fn for_record(record: &VarietyRecord) -> Self {
        Self {
            id: record.id.clone(),
            title: format!("{} ({})", record.variety_name, record.crop),
            primary_state: record.primary_state().to_string(),
            official: official_section(record),
            research: research_section(record),
        }
    }

    /// Detail view of the first record with `id`.
    pub fn find(dataset: &Dataset, id: &str) -> Result<Self> {
        dataset
            .find(id)
            .map(Self::for_record)
            .ok_or_else(|| CoreError::RecordNotFound { id: id.to_string() })
    }
}

fn official_section(record: &VarietyRecord) -> Option<OfficialSection> {
    let source = record.source_official.as_ref()?;
    let fields = OFFICIAL_FIELDS
        .iter()
        .map(|&(label, key)| {
            let fallback = match key {
                "Variety Name" => record.variety_name.as_str(),
                "Year of Release" => record.year_of_release.as_str(),
                _ => NOT_SPECIFIED,
            };
            DetailField::new(label, source.field(key).unwrap_or(fallback))
        })
        .collect();
    Some(OfficialSection {
        fields,
        portal_url: source.portal_url.clone(),
    })
}

fn research_section(record: &VarietyRecord) -> ResearchSection {
    let research = &record.source_research;
    let data_source = if research.data_source.trim().is_empty() {
        DEFAULT_DATA_SOURCE
    } else {
        research.data_source.as_str()
    };
    ResearchSection {
        fields: vec![
            DetailField::new("Crop", record.crop.as_str()),
            DetailField::new("Variety", record.variety_name.as_str()),
            DetailField::new("Data Source", data_source),
            DetailField::new("Institution", record.institution.as_str()),
            DetailField::new("Total Research Results", research.total_results.to_string()),
            DetailField::new("Disease Resistance", research.disease_reports.to_string()),
            DetailField::new("Pest Resistance", research.pest_reports.to_string()),
            DetailField::new("Field Trials", research.field_trials.to_string()),
            DetailField::new(
                "Commercial Availability",
                research.commercial_availability.to_string(),
            ),
        ],
        stress_evidence: research.stress_signals.clone(),
        enhancement_tags: research.enhancement_tags.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedscope_model::OfficialSource;
    use std::collections::BTreeMap;

    fn value<'a>(fields: &'a [DetailField], label: &str) -> Option<&'a str> {
        fields
            .iter()
            .find(|field| field.label == label)
            .map(|field| field.value.as_str())
    }

    #[test]
    fn test_official_section_falls_back() {
        let record = VarietyRecord {
            variety_name: "Swarna Sub1".to_string(),
            year_of_release: "2009".to_string(),
            states: vec!["Odisha".to_string(), "West Bengal".to_string()],
            source_official: Some(OfficialSource {
                portal_url: "https://seednet.gov.in/v/77".to_string(),
                variety_id: Some("77".to_string()),
                fields: BTreeMap::from([
                    ("Parentage".to_string(), "Swarna x IR49830".to_string()),
                    ("Notification Number".to_string(), "  ".to_string()),
                ]),
            }),
            ..VarietyRecord::default()
        };
        let view = DetailView::for_record(&record);
        assert_eq!(view.primary_state, "Odisha");
        let official = view.official.unwrap();
        assert_eq!(value(&official.fields, "Variety Name"), Some("Swarna Sub1"));
        assert_eq!(value(&official.fields, "Year of Release"), Some("2009"));
        assert_eq!(value(&official.fields, "Parentage"), Some("Swarna x IR49830"));
        assert_eq!(value(&official.fields, "Notification Number"), Some("Not specified"));
        assert_eq!(official.portal_url, "https://seednet.gov.in/v/77");
    }

    #[test]
    fn test_research_section_placeholders() {
        let view = DetailView::for_record(&VarietyRecord::default());
        assert!(view.official.is_none());
        assert_eq!(view.research.stress_evidence_label(), NO_STRESS_EVIDENCE);
        assert_eq!(view.research.enhancement_label(), STANDARD_PROCESSING);
        assert_eq!(value(&view.research.fields, "Data Source"), Some("enhanced_batch"));
        assert_eq!(value(&view.research.fields, "Field Trials"), Some("0"));
    }

    #[test]
    fn test_find_missing_id() {
        let dataset = Dataset::new(vec![VarietyRecord::default()]);
        assert!(matches!(
            DetailView::find(&dataset, "nope"),
            Err(CoreError::RecordNotFound { .. })
        ));
        assert!(DetailView::find(&dataset, "Unknown_Unknown Variety_Unknown").is_ok());
    }
}
