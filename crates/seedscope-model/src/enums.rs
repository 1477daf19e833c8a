//! Closed vocabularies used by the variety catalog.
//!
//! Every enum here has a fixed canonical label (`as_str`) and a lenient,
//! case-insensitive `FromStr` that accepts the spellings found in the
//! compiled source files.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ModelError;

/// Abiotic and biotic stress categories a variety may tolerate.
///
/// The declaration order is the detection order and therefore the order in
/// which detected types appear on a record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StressType {
    Drought,
    Heat,
    Salinity,
    Flood,
    Disease,
    Pest,
}

impl StressType {
    /// All stress types in detection order.
    pub const ALL: [StressType; 6] = [
        StressType::Drought,
        StressType::Heat,
        StressType::Salinity,
        StressType::Flood,
        StressType::Disease,
        StressType::Pest,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StressType::Drought => "Drought",
            StressType::Heat => "Heat",
            StressType::Salinity => "Salinity",
            StressType::Flood => "Flood",
            StressType::Disease => "Disease",
            StressType::Pest => "Pest",
        }
    }
}

impl fmt::Display for StressType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StressType {
    type Err = ModelError;

    /// Parse a stress label. "Salt" is accepted as an alias for salinity.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "drought" => Ok(StressType::Drought),
            "heat" => Ok(StressType::Heat),
            "salinity" | "salt" => Ok(StressType::Salinity),
            "flood" => Ok(StressType::Flood),
            "disease" => Ok(StressType::Disease),
            "pest" => Ok(StressType::Pest),
            _ => Err(ModelError::unknown("stress type", s)),
        }
    }
}

/// Cropping seasons recognised in adaptation text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Season {
    Kharif,
    Rabi,
    Summer,
    Winter,
    Monsoon,
}

impl Season {
    /// All seasons in keyword scan order.
    pub const ALL: [Season; 5] = [
        Season::Kharif,
        Season::Rabi,
        Season::Summer,
        Season::Winter,
        Season::Monsoon,
    ];

    /// Label rendered when a record has no detected season.
    pub const NOT_SPECIFIED: &'static str = "Not specified";

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Kharif => "Kharif",
            Season::Rabi => "Rabi",
            Season::Summer => "Summer",
            Season::Winter => "Winter",
            Season::Monsoon => "Monsoon",
        }
    }

    /// Lowercase keyword searched for in free text.
    pub fn keyword(&self) -> &'static str {
        match self {
            Season::Kharif => "kharif",
            Season::Rabi => "rabi",
            Season::Summer => "summer",
            Season::Winter => "winter",
            Season::Monsoon => "monsoon",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        Season::ALL
            .into_iter()
            .find(|season| season.keyword() == normalized)
            .ok_or_else(|| ModelError::unknown("season", s))
    }
}

/// Whether a variety tolerates at least one stress type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum StressTolerance {
    Yes,
    No,
}

impl StressTolerance {
    pub fn from_flag(tolerant: bool) -> Self {
        if tolerant {
            StressTolerance::Yes
        } else {
            StressTolerance::No
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StressTolerance::Yes => "Yes",
            StressTolerance::No => "No",
        }
    }
}

impl fmt::Display for StressTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StressTolerance {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yes" | "y" | "true" => Ok(StressTolerance::Yes),
            "no" | "n" | "false" => Ok(StressTolerance::No),
            _ => Err(ModelError::unknown("stress tolerance", s)),
        }
    }
}

/// Coarse confidence attached to the research-derived part of a record.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum EvidenceQuality {
    Low,
    #[default]
    Medium,
    High,
}

impl EvidenceQuality {
    pub const ALL: [EvidenceQuality; 3] = [
        EvidenceQuality::Low,
        EvidenceQuality::Medium,
        EvidenceQuality::High,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EvidenceQuality::Low => "Low",
            EvidenceQuality::Medium => "Medium",
            EvidenceQuality::High => "High",
        }
    }
}

impl fmt::Display for EvidenceQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvidenceQuality {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "low" => Ok(EvidenceQuality::Low),
            "medium" => Ok(EvidenceQuality::Medium),
            "high" => Ok(EvidenceQuality::High),
            _ => Err(ModelError::unknown("evidence quality", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stress_type_from_str() {
        assert_eq!("drought".parse::<StressType>(), Ok(StressType::Drought));
        assert_eq!(" SALT ".parse::<StressType>(), Ok(StressType::Salinity));
        assert_eq!("Salinity".parse::<StressType>(), Ok(StressType::Salinity));
        assert!("Cold".parse::<StressType>().is_err());
    }

    #[test]
    fn test_stress_type_order_is_detection_order() {
        let mut shuffled = vec![StressType::Pest, StressType::Drought, StressType::Flood];
        shuffled.sort();
        assert_eq!(
            shuffled,
            vec![StressType::Drought, StressType::Flood, StressType::Pest]
        );
    }

    #[test]
    fn test_season_from_str() {
        assert_eq!("Kharif".parse::<Season>(), Ok(Season::Kharif));
        assert_eq!("monsoon".parse::<Season>(), Ok(Season::Monsoon));
        assert!("spring".parse::<Season>().is_err());
    }

    #[test]
    fn test_stress_tolerance_from_str() {
        assert_eq!("YES".parse::<StressTolerance>(), Ok(StressTolerance::Yes));
        assert_eq!("no".parse::<StressTolerance>(), Ok(StressTolerance::No));
        assert!("maybe".parse::<StressTolerance>().is_err());
    }

    #[test]
    fn test_evidence_quality_default_and_order() {
        assert_eq!(EvidenceQuality::default(), EvidenceQuality::Medium);
        assert!(EvidenceQuality::Low < EvidenceQuality::High);
        let err = "strong".parse::<EvidenceQuality>().unwrap_err();
        assert_eq!(err.to_string(), "unknown evidence quality: strong");
    }
}
