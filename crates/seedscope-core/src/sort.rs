//! Sort keys and the mixed numeric/text comparator.

use std::borrow::Cow;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use seedscope_model::VarietyRecord;

/// Sortable columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Crop,
    Variety,
    Year,
    Stress,
    Attributes,
    States,
    Seasons,
    Maturity,
    Evidence,
}

impl SortKey {
    pub const ALL: [SortKey; 9] = [
        SortKey::Crop,
        SortKey::Variety,
        SortKey::Year,
        SortKey::Stress,
        SortKey::Attributes,
        SortKey::States,
        SortKey::Seasons,
        SortKey::Maturity,
        SortKey::Evidence,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Crop => "crop",
            SortKey::Variety => "variety",
            SortKey::Year => "year",
            SortKey::Stress => "stress",
            SortKey::Attributes => "attributes",
            SortKey::States => "states",
            SortKey::Seasons => "seasons",
            SortKey::Maturity => "maturity",
            SortKey::Evidence => "evidence",
        }
    }

    /// The text a record is ordered by under this key.
    pub fn value<'a>(&self, record: &'a VarietyRecord) -> Cow<'a, str> {
        match self {
            SortKey::Crop => Cow::Borrowed(&record.crop),
            SortKey::Variety => Cow::Borrowed(&record.variety_name),
            SortKey::Year => Cow::Borrowed(&record.year_of_release),
            SortKey::Stress => Cow::Borrowed(record.stress_tolerance().as_str()),
            SortKey::Attributes => Cow::Borrowed(&record.key_attributes),
            SortKey::States => Cow::Owned(record.states.join(", ")),
            SortKey::Seasons => Cow::Owned(record.seasons_label()),
            SortKey::Maturity => Cow::Borrowed(&record.days_to_maturity),
            SortKey::Evidence => Cow::Borrowed(record.evidence_quality.as_str()),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        let normalized = match normalized.as_str() {
            "variety_name" | "name" => "variety",
            "year_of_release" => "year",
            "stress_tolerance" | "tolerance" => "stress",
            "key_attributes" => "attributes",
            "state" => "states",
            "season" => "seasons",
            "days_to_maturity" => "maturity",
            "evidence_quality" => "evidence",
            other => other,
        };
        SortKey::ALL
            .into_iter()
            .find(|key| key.as_str() == normalized)
            .ok_or_else(|| format!("unknown sort key '{s}'"))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// Current sort selection. No key means filter emission order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    pub key: Option<SortKey>,
    pub direction: SortDirection,
}

impl SortState {
    pub fn by(key: SortKey, direction: SortDirection) -> Self {
        Self {
            key: Some(key),
            direction,
        }
    }

    /// Select a column: the same key flips direction, a new key starts ascending.
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == Some(key) {
            self.direction = self.direction.flipped();
        } else {
            self.key = Some(key);
            self.direction = SortDirection::Ascending;
        }
    }

    pub fn clear(&mut self) {
        *self = SortState::default();
    }
}

/// A sort value with its comparison keys computed once.
struct SortValue<'a> {
    number: Option<f64>,
    folded: String,
    text: Cow<'a, str>,
}

impl<'a> SortValue<'a> {
    fn new(text: Cow<'a, str>) -> Self {
        Self {
            number: leading_number(&text),
            folded: collation_key(&text),
            text,
        }
    }

    fn compare(&self, other: &SortValue<'_>) -> Ordering {
        let by_number = match (self.number, other.number) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_number
            .then_with(|| self.folded.cmp(&other.folded))
            .then_with(|| self.text.cmp(&other.text))
    }
}

/// Leading decimal number of `value`, ignoring whatever follows it:
/// "95-100" reads as 95 and "2.5 t/ha" as 2.5.
fn leading_number(value: &str) -> Option<f64> {
    let text = value.trim_start();
    let bytes = text.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let integer = count_digits(&bytes[end..]);
    end += integer;
    let mut mantissa = integer;
    if bytes.get(end) == Some(&b'.') {
        let fraction = count_digits(&bytes[end + 1..]);
        if integer + fraction > 0 {
            mantissa += fraction;
            end += 1 + fraction;
        }
    }
    if mantissa == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exponent = end + 1;
        if matches!(bytes.get(exponent), Some(b'+' | b'-')) {
            exponent += 1;
        }
        let digits = count_digits(&bytes[exponent..]);
        if digits > 0 {
            end = exponent + digits;
        }
    }
    text[..end].parse::<f64>().ok().filter(|n| n.is_finite())
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Case- and accent-insensitive form of `text`: "Éclair" folds to "eclair".
fn collation_key(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Total order over sort values.
///
/// Values starting with a finite number come first, ordered by that
/// number; everything else follows. Ties compare case- and
/// accent-insensitively, then by exact text.
pub fn compare_values(a: &str, b: &str) -> Ordering {
    SortValue::new(Cow::Borrowed(a)).compare(&SortValue::new(Cow::Borrowed(b)))
}

/// Order record indices in place.
///
/// The sort is stable, so equal keys keep their filter order, and
/// descending is the exact reverse of ascending.
pub fn sort_indices(records: &[VarietyRecord], indices: &mut [usize], state: SortState) {
    let Some(key) = state.key else {
        return;
    };
    let mut keyed: Vec<(SortValue<'_>, usize)> = indices
        .iter()
        .map(|&index| (SortValue::new(key.value(&records[index])), index))
        .collect();
    keyed.sort_by(|(a, _), (b, _)| a.compare(b));
    if state.direction == SortDirection::Descending {
        keyed.reverse();
    }
    for (slot, (_, index)) in indices.iter_mut().zip(keyed) {
        *slot = index;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn years(values: &[&str]) -> Vec<VarietyRecord> {
        values
            .iter()
            .map(|year| VarietyRecord {
                year_of_release: (*year).to_string(),
                ..VarietyRecord::default()
            })
            .collect()
    }

    fn sorted_years(records: &[VarietyRecord], state: SortState) -> Vec<String> {
        let mut indices: Vec<usize> = (0..records.len()).collect();
        sort_indices(records, &mut indices, state);
        indices
            .into_iter()
            .map(|i| records[i].year_of_release.clone())
            .collect()
    }

    #[test]
    fn test_numbers_before_text() {
        let records = years(&["2015", "Unknown", "2003"]);
        assert_eq!(
            sorted_years(&records, SortState::by(SortKey::Year, SortDirection::Ascending)),
            vec!["2003", "2015", "Unknown"]
        );
        assert_eq!(
            sorted_years(&records, SortState::by(SortKey::Year, SortDirection::Descending)),
            vec!["Unknown", "2015", "2003"]
        );
    }

    #[test]
    fn test_compare_values() {
        assert_eq!(compare_values("9", "10"), Ordering::Less);
        assert_eq!(compare_values("2.5", "2.5"), Ordering::Equal);
        assert_eq!(compare_values(" 2.5", "2.50"), Ordering::Less);
        assert_eq!(compare_values("apple", "Banana"), Ordering::Less);
        assert_eq!(compare_values("Rice", "rice"), Ordering::Less);
        assert_eq!(compare_values("NaN", "1"), Ordering::Greater);
        assert_eq!(compare_values("110-115", "95"), Ordering::Greater);
        assert_eq!(compare_values("95-100", "105-110"), Ordering::Less);
        assert_eq!(compare_values("95-100", "120"), Ordering::Less);
        assert_eq!(compare_values("1e2 days", "99"), Ordering::Greater);
        assert_eq!(compare_values("-5", ".5"), Ordering::Less);
        assert_eq!(compare_values("Éclair", "Zebra"), Ordering::Less);
        assert_eq!(compare_values("éclair", "Eclair"), Ordering::Greater);
    }

    #[test]
    fn test_leading_number() {
        assert_eq!(leading_number("95-100"), Some(95.0));
        assert_eq!(leading_number("  2.5 t/ha"), Some(2.5));
        assert_eq!(leading_number("5."), Some(5.0));
        assert_eq!(leading_number("3e"), Some(3.0));
        assert_eq!(leading_number("-"), None);
        assert_eq!(leading_number("."), None);
        assert_eq!(leading_number("Unknown"), None);
        assert_eq!(leading_number("NaN"), None);
    }

    #[test]
    fn test_maturity_ranges_sort_by_first_number() {
        let records: Vec<VarietyRecord> = ["120", "105-110", "Not specified", "95-100"]
            .iter()
            .map(|days| VarietyRecord {
                days_to_maturity: (*days).to_string(),
                ..VarietyRecord::default()
            })
            .collect();
        let mut indices: Vec<usize> = (0..records.len()).collect();
        sort_indices(
            &records,
            &mut indices,
            SortState::by(SortKey::Maturity, SortDirection::Ascending),
        );
        let days: Vec<&str> = indices
            .iter()
            .map(|&i| records[i].days_to_maturity.as_str())
            .collect();
        assert_eq!(days, ["95-100", "105-110", "120", "Not specified"]);
    }

    #[test]
    fn test_accented_names_sort_with_their_base_letter() {
        let records: Vec<VarietyRecord> = ["Zebra", "Éclair", "apple"]
            .iter()
            .map(|name| VarietyRecord {
                variety_name: (*name).to_string(),
                ..VarietyRecord::default()
            })
            .collect();
        let mut indices: Vec<usize> = (0..records.len()).collect();
        sort_indices(
            &records,
            &mut indices,
            SortState::by(SortKey::Variety, SortDirection::Ascending),
        );
        let names: Vec<&str> = indices
            .iter()
            .map(|&i| records[i].variety_name.as_str())
            .collect();
        assert_eq!(names, ["apple", "Éclair", "Zebra"]);
    }

    #[test]
    fn test_toggle() {
        let mut state = SortState::default();
        state.toggle(SortKey::Crop);
        assert_eq!(state, SortState::by(SortKey::Crop, SortDirection::Ascending));
        state.toggle(SortKey::Crop);
        assert_eq!(state, SortState::by(SortKey::Crop, SortDirection::Descending));
        state.toggle(SortKey::Year);
        assert_eq!(state, SortState::by(SortKey::Year, SortDirection::Ascending));
    }

    #[test]
    fn test_no_key_keeps_order() {
        let records = years(&["2015", "2003"]);
        assert_eq!(sorted_years(&records, SortState::default()), vec!["2015", "2003"]);
    }

    #[test]
    fn test_parse_sort_key() {
        assert_eq!("Year".parse(), Ok(SortKey::Year));
        assert_eq!("variety_name".parse(), Ok(SortKey::Variety));
        assert!("colour".parse::<SortKey>().is_err());
    }
}
