//! Tests for seedscope-model types.

use seedscope_model::{
    EvidenceQuality, OfficialSource, Season, StressTolerance, StressType, VarietyRecord,
};

#[test]
fn record_serializes_with_canonical_labels() {
    let record = VarietyRecord {
        id: "v-1".to_string(),
        crop: "Rice".to_string(),
        variety_name: "IR64".to_string(),
        stress_types: vec![StressType::Drought, StressType::Salinity],
        seasons: vec![Season::Kharif],
        evidence_quality: EvidenceQuality::High,
        ..VarietyRecord::default()
    };
    let json = serde_json::to_value(&record).expect("serialize record");
    assert_eq!(json["stress_types"], serde_json::json!(["Drought", "Salinity"]));
    assert_eq!(json["seasons"], serde_json::json!(["Kharif"]));
    assert_eq!(json["evidence_quality"], "High");
    assert_eq!(json["source_official"], serde_json::Value::Null);
    assert_eq!(json["stress_tolerance"], "Yes");

    let plain = serde_json::to_value(VarietyRecord::default()).expect("serialize record");
    assert_eq!(plain["stress_tolerance"], "No");
}

#[test]
fn record_round_trips_through_json() {
    let mut official = OfficialSource {
        portal_url: "https://example.org/variety/42".to_string(),
        variety_id: Some("42".to_string()),
        ..OfficialSource::default()
    };
    official
        .fields
        .insert("Parentage".to_string(), "IR5657 x IR2061".to_string());
    let record = VarietyRecord {
        crop: "Rice".to_string(),
        source_official: Some(official),
        ..VarietyRecord::default()
    };
    let json = serde_json::to_string(&record).expect("serialize record");
    let round: VarietyRecord = serde_json::from_str(&json).expect("deserialize record");
    assert_eq!(round, record);
    assert!(round.has_official_source());
}

#[test]
fn tolerance_cannot_disagree_with_stress_types() {
    let mut record = VarietyRecord::default();
    assert_eq!(record.stress_tolerance(), StressTolerance::No);
    record.stress_types.push(StressType::Flood);
    assert_eq!(record.stress_tolerance(), StressTolerance::Yes);
    record.stress_types.clear();
    assert_eq!(record.stress_tolerance(), StressTolerance::No);
}
