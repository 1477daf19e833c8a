//! Loading a catalog from disk through a session.

use std::io::Write;

use seedscope_core::{
    CoreError, Criteria, DatasetStats, DetailView, Session, SessionOptions, SessionState,
    Vocabulary, export_csv,
};
use seedscope_ingest::{IngestError, SourceFormat};
use seedscope_model::{StressTolerance, StressType};
use tempfile::Builder;

const CATALOG: &str = r#"[
  {
    "variety_id": "rice-swarna-sub1",
    "crop": "Rice",
    "variety_name": "Swarna Sub1",
    "year_of_release": "2009",
    "states_full": ["Odisha", "WB"],
    "seasons": "Kharif",
    "stress_types": ["Flood"],
    "evidence_quality": "High",
    "seednet_available": true,
    "seednet_variety_id": "1234",
    "seednet_fields": {"Parentage": "Swarna x IR49830"},
    "research_data": {
      "search_results_summary": 64,
      "stress_tolerance_evidence": {"Flood": {"count": 12}},
      "enhancement_features": ["Multi-query Analysis"]
    }
  },
  {
    "variety_id": "wheat-hd2967",
    "crop": "Wheat",
    "variety_name": "HD 2967",
    "year_of_release": NaN,
    "states_acronyms": "PB, HR",
    "stress_types": []
  },
  "not a record"
]"#;

fn write_catalog(content: &str) -> tempfile::NamedTempFile {
    let mut file = Builder::new().suffix(".json").tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

#[test]
fn load_filter_detail_and_export() {
    let file = write_catalog(CATALOG);
    let mut session = Session::new(SessionOptions::default());
    session.load(file.path()).unwrap();

    assert_eq!(session.state(), SessionState::Ready);
    let report = session.report().unwrap();
    assert_eq!(report.format, SourceFormat::EnhancedJson);
    assert_eq!(report.records, 2);
    assert_eq!(report.skipped, 1);

    let explorer = session.explorer_mut().unwrap();
    let all = explorer.dataset().records();
    assert_eq!(all[0].states, vec!["Odisha", "West Bengal"]);
    assert_eq!(all[0].stress_tolerance(), StressTolerance::Yes);
    assert_eq!(all[1].states, vec!["Punjab", "Haryana"]);
    assert_eq!(all[1].year_of_release, "Unknown");
    assert_eq!(all[1].stress_tolerance(), StressTolerance::No);

    let stats = DatasetStats::from_records(all);
    assert_eq!(stats.total, 2);
    assert_eq!(stats.stress_tolerant, 1);
    assert_eq!(stats.high_evidence, 1);
    assert_eq!(stats.official_sources, 1);

    let vocab = Vocabulary::from_records(all);
    assert_eq!(vocab.crops, vec!["Rice", "Wheat"]);
    assert_eq!(vocab.stress_types, vec![StressType::Flood]);

    explorer.set_criteria(Criteria::new().with_state("WB"));
    assert_eq!(explorer.filtered_count(), 1);

    let detail = DetailView::find(explorer.dataset(), "rice-swarna-sub1").unwrap();
    let official = detail.official.unwrap();
    assert!(official.portal_url.ends_with("varietycd=1234"));
    assert_eq!(detail.research.stress_evidence, vec![StressType::Flood]);

    let mut out = Vec::new();
    let rows = export_csv(explorer.filtered(), &mut out).unwrap();
    assert_eq!(rows, 1);
    let text = String::from_utf8(out).unwrap();
    assert!(text.contains("\"Swarna Sub1\""));
    assert!(text.contains("\"Odisha, West Bengal\""));
    assert!(text.trim_end().ends_with("\"64\""));
}

#[test]
fn failed_load_discards_previous_catalog() {
    let good = write_catalog(CATALOG);
    let bad = write_catalog("{\"not\": \"an array\"}");
    let mut session = Session::default();
    session.load(good.path()).unwrap();
    assert!(session.explorer().is_ok());

    let err = session.load(bad.path()).unwrap_err();
    assert!(matches!(
        err,
        CoreError::Load(IngestError::UnexpectedShape { .. })
    ));
    assert!(matches!(session.state(), SessionState::LoadFailed { .. }));
    assert!(matches!(
        session.explorer(),
        Err(CoreError::NotReady { .. })
    ));
}

#[test]
fn reload_recovers_after_source_is_fixed() {
    let file = write_catalog("[");
    let mut session = Session::default();
    assert!(session.load(file.path()).is_err());

    std::fs::write(file.path(), CATALOG).unwrap();
    session.reload().unwrap();
    assert_eq!(session.explorer().unwrap().filtered_count(), 2);
}
