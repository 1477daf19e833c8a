//! CSV export of the filtered view.

use std::io;

use csv::{QuoteStyle, WriterBuilder};

use seedscope_model::VarietyRecord;

use crate::error::Result;

/// Column order of every export.
pub const EXPORT_HEADER: [&str; 12] = [
    "crop",
    "variety_name",
    "year_of_release",
    "stress_tolerance",
    "key_attributes",
    "states",
    "seasons",
    "days_to_maturity",
    "evidence_quality",
    "official_source_available",
    "official_source_url",
    "total_research_results",
];

fn export_row(record: &VarietyRecord) -> [String; 12] {
    let official = record.source_official.as_ref();
    [
        record.crop.clone(),
        record.variety_name.clone(),
        record.year_of_release.clone(),
        record.stress_tolerance().as_str().to_string(),
        record.key_attributes.clone(),
        record.states_label(),
        record.seasons_label(),
        record.days_to_maturity.clone(),
        record.evidence_quality.as_str().to_string(),
        if official.is_some() { "Yes" } else { "No" }.to_string(),
        official
            .map(|source| source.portal_url.clone())
            .unwrap_or_default(),
        record.source_research.total_results.to_string(),
    ]
}

/// Write `records` as CSV with every field quoted.
///
/// The header is written even when there are no records. Returns the
/// number of data rows written.
pub fn export_csv<'a, W: io::Write>(
    records: impl IntoIterator<Item = &'a VarietyRecord>,
    writer: W,
) -> Result<usize> {
    let mut csv = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(writer);
    csv.write_record(EXPORT_HEADER)?;
    let mut rows = 0;
    for record in records {
        csv.write_record(export_row(record))?;
        rows += 1;
    }
    csv.flush().map_err(csv::Error::from)?;
    tracing::debug!(rows, "exported records");
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedscope_model::{EvidenceQuality, OfficialSource, Season, StressType};

    fn export(records: &[VarietyRecord]) -> String {
        let mut out = Vec::new();
        export_csv(records, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_export_quotes_every_field() {
        let mut ir64 = VarietyRecord {
            crop: "Rice".to_string(),
            variety_name: "IR64 \"Mega\"".to_string(),
            year_of_release: "1985".to_string(),
            stress_types: vec![StressType::Drought],
            key_attributes: "Drought, high yield".to_string(),
            states: vec!["Punjab".to_string(), "Odisha".to_string()],
            seasons: vec![Season::Kharif],
            days_to_maturity: "110-115".to_string(),
            evidence_quality: EvidenceQuality::High,
            source_official: Some(OfficialSource {
                portal_url: "https://seednet.gov.in/v/1".to_string(),
                ..OfficialSource::default()
            }),
            ..VarietyRecord::default()
        };
        ir64.source_research.total_results = 42;

        insta::assert_snapshot!(export(&[ir64, VarietyRecord::default()]), @r#"
        "crop","variety_name","year_of_release","stress_tolerance","key_attributes","states","seasons","days_to_maturity","evidence_quality","official_source_available","official_source_url","total_research_results"
        "Rice","IR64 ""Mega""","1985","Yes","Drought, high yield","Punjab, Odisha","Kharif","110-115","High","Yes","https://seednet.gov.in/v/1","42"
        "Unknown","Unknown Variety","Unknown","No","Standard variety","Unknown","Not specified","Not specified","Medium","No","","0"
        "#);
    }

    #[test]
    fn test_header_written_for_empty_export() {
        let output = export(&[]);
        assert_eq!(output.lines().count(), 1);
        assert!(output.starts_with("\"crop\",\"variety_name\""));
    }
}
