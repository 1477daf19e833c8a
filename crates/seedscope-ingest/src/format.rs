//! Source format tags.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// Keys whose presence on the first JSON object marks the enhanced shape.
const ENHANCED_MARKERS: &[&str] = &[
    "research_data",
    "seednet_fields",
    "states_full",
    "states_acronyms",
];

/// How a source file should be interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SourceFormat {
    /// Decide once per file from its extension and, for JSON, its first object.
    #[default]
    Auto,
    /// Header row plus data rows.
    Csv,
    /// JSON array of per-variety analysis results.
    AnalysisJson,
    /// JSON array in the compiled dashboard shape.
    EnhancedJson,
}

impl SourceFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceFormat::Auto => "auto",
            SourceFormat::Csv => "csv",
            SourceFormat::AnalysisJson => "analysis-json",
            SourceFormat::EnhancedJson => "enhanced-json",
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, SourceFormat::AnalysisJson | SourceFormat::EnhancedJson)
    }

    /// Format implied by a file extension, if any.
    ///
    /// `.json` resolves to [`SourceFormat::AnalysisJson`]; use
    /// [`SourceFormat::for_json_object`] to refine it once content is parsed.
    pub fn from_extension(path: &Path) -> Option<SourceFormat> {
        let ext = path.extension()?.to_str()?;
        if ext.eq_ignore_ascii_case("csv") {
            Some(SourceFormat::Csv)
        } else if ext.eq_ignore_ascii_case("json") {
            Some(SourceFormat::AnalysisJson)
        } else {
            None
        }
    }

    /// JSON shape implied by a sample object.
    pub fn for_json_object(object: &Map<String, Value>) -> SourceFormat {
        if ENHANCED_MARKERS.iter().any(|key| object.contains_key(*key)) {
            SourceFormat::EnhancedJson
        } else {
            SourceFormat::AnalysisJson
        }
    }
}

impl fmt::Display for SourceFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "auto" => Ok(SourceFormat::Auto),
            "csv" | "tabular" => Ok(SourceFormat::Csv),
            "analysis-json" | "analysis" => Ok(SourceFormat::AnalysisJson),
            "enhanced-json" | "enhanced" => Ok(SourceFormat::EnhancedJson),
            _ => Err(format!(
                "unknown source format '{s}' (expected auto, csv, analysis-json or enhanced-json)"
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_extension() {
        assert_eq!(
            SourceFormat::from_extension(Path::new("data/varieties.CSV")),
            Some(SourceFormat::Csv)
        );
        assert_eq!(
            SourceFormat::from_extension(Path::new("batch.json")),
            Some(SourceFormat::AnalysisJson)
        );
        assert_eq!(SourceFormat::from_extension(Path::new("notes.txt")), None);
        assert_eq!(SourceFormat::from_extension(Path::new("README")), None);
    }

    #[test]
    fn test_json_object_detection() {
        let enhanced = json!({"variety_id": "v1", "states_full": ["Punjab"]});
        let analysis = json!({"variety_id": "v1", "original_data": {}});
        assert_eq!(
            SourceFormat::for_json_object(enhanced.as_object().unwrap()),
            SourceFormat::EnhancedJson
        );
        assert_eq!(
            SourceFormat::for_json_object(analysis.as_object().unwrap()),
            SourceFormat::AnalysisJson
        );
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!("Enhanced-JSON".parse(), Ok(SourceFormat::EnhancedJson));
        assert_eq!("csv".parse(), Ok(SourceFormat::Csv));
        assert!("xml".parse::<SourceFormat>().is_err());
        assert_eq!(SourceFormat::AnalysisJson.to_string(), "analysis-json");
    }
}
