//! Ordered fallback chains for field extraction.
//!
//! A chain lists accessors tried top to bottom and ends in a fixed default,
//! so resolution never fails. A value is present when it is a non-blank
//! string, a number or a boolean; `null`, blank strings, arrays and objects
//! are absent for scalar fields.

use serde_json::Value;

use seedscope_ingest::{JsonObject, TabularRow};

/// Where to look for a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessor {
    /// JSON pointer into a structured record (`/original_data/crop`).
    Pointer(&'static str),
    /// Column of a tabular record.
    Column(&'static str),
}

/// An ordered list of accessors plus the default used when all are absent.
#[derive(Debug, Clone, Copy)]
pub struct FieldChain {
    pub field: &'static str,
    pub accessors: &'static [Accessor],
    pub default: &'static str,
}

impl FieldChain {
    pub const fn new(
        field: &'static str,
        accessors: &'static [Accessor],
        default: &'static str,
    ) -> Self {
        Self {
            field,
            accessors,
            default,
        }
    }

    /// First present value in a JSON record.
    pub fn find_json(&self, object: &JsonObject) -> Option<String> {
        self.accessors.iter().find_map(|accessor| match accessor {
            Accessor::Pointer(pointer) => lookup(object, pointer).and_then(scalar_text),
            Accessor::Column(_) => None,
        })
    }

    /// First present value in a tabular record.
    pub fn find_row(&self, row: &TabularRow) -> Option<String> {
        self.accessors.iter().find_map(|accessor| match accessor {
            Accessor::Column(column) => row.get(column).and_then(present_text),
            Accessor::Pointer(_) => None,
        })
    }

    pub fn resolve_json(&self, object: &JsonObject) -> String {
        self.find_json(object).unwrap_or_else(|| self.fallback())
    }

    pub fn resolve_row(&self, row: &TabularRow) -> String {
        self.find_row(row).unwrap_or_else(|| self.fallback())
    }

    fn fallback(&self) -> String {
        tracing::debug!(field = self.field, default = self.default, "field defaulted");
        self.default.to_string()
    }
}

/// Follow a JSON pointer from the top-level object.
pub fn lookup<'a>(object: &'a JsonObject, pointer: &str) -> Option<&'a Value> {
    let path = pointer.strip_prefix('/')?;
    let (head, rest) = match path.find('/') {
        Some(idx) => (&path[..idx], &path[idx..]),
        None => (path, ""),
    };
    let value = object.get(head)?;
    if rest.is_empty() {
        Some(value)
    } else {
        value.pointer(rest)
    }
}

/// Text of a present scalar.
pub fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => present_text(s),
        Value::Number(n) => Some(number_text(n)),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Trimmed text, absent when blank.
pub fn present_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Non-negative count from a number or numeric string; anything else is zero.
pub fn count_of(value: Option<&Value>) -> u64 {
    match value {
        Some(Value::Number(n)) => n
            .as_u64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite() && *f > 0.0).map(|f| f as u64))
            .unwrap_or(0),
        Some(Value::String(s)) => count_text(s),
        _ => 0,
    }
}

/// Non-negative count from text; anything unparsable is zero.
pub fn count_text(raw: &str) -> u64 {
    raw.trim().parse::<f64>().map_or(0, |f| {
        if f.is_finite() && f > 0.0 {
            f as u64
        } else {
            0
        }
    })
}

/// Strings of a JSON list, or the comma-separated parts of a JSON string.
pub fn text_items(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
        Some(Value::String(s)) => s.split(',').filter_map(present_text).collect(),
        _ => Vec::new(),
    }
}

// Integral floats such as `2015.0` render without the fraction.
fn number_text(n: &serde_json::Number) -> String {
    if n.is_f64()
        && let Some(f) = n.as_f64()
        && f.fract() == 0.0
        && f.abs() < 1e15
    {
        return format!("{f:.0}");
    }
    n.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    const CROP: FieldChain = FieldChain::new(
        "crop",
        &[
            Accessor::Pointer("/original_data/seednet_data/Crop Name"),
            Accessor::Pointer("/original_data/crop"),
            Accessor::Column("Crop_Type"),
        ],
        "Unknown",
    );

    fn object(value: Value) -> JsonObject {
        match value {
            Value::Object(map) => map,
            other => panic!("not an object: {other}"),
        }
    }

    #[test]
    fn test_first_present_accessor_wins() {
        let record = object(json!({
            "original_data": {"seednet_data": {"Crop Name": "  "}, "crop": "Wheat"}
        }));
        assert_eq!(CROP.resolve_json(&record), "Wheat");
    }

    #[test]
    fn test_default_when_all_absent() {
        let record = object(json!({"original_data": {"crop": null, "seednet_data": []}}));
        assert_eq!(CROP.resolve_json(&record), "Unknown");
    }

    #[test]
    fn test_columns_only_apply_to_rows() {
        let headers: Arc<[String]> = vec!["Crop_Type".to_string()].into();
        let row = TabularRow::new(headers, vec!["Maize".to_string()]);
        assert_eq!(CROP.resolve_row(&row), "Maize");
    }

    #[test]
    fn test_scalar_text() {
        assert_eq!(scalar_text(&json!(2015)), Some("2015".to_string()));
        assert_eq!(scalar_text(&json!(2015.0)), Some("2015".to_string()));
        assert_eq!(scalar_text(&json!(112.5)), Some("112.5".to_string()));
        assert_eq!(scalar_text(&json!(true)), Some("true".to_string()));
        assert_eq!(scalar_text(&json!(["a"])), None);
        assert_eq!(scalar_text(&json!(" ")), None);
    }

    #[test]
    fn test_count_of() {
        assert_eq!(count_of(Some(&json!(12))), 12);
        assert_eq!(count_of(Some(&json!("7"))), 7);
        assert_eq!(count_of(Some(&json!(-3))), 0);
        assert_eq!(count_of(Some(&json!("many"))), 0);
        assert_eq!(count_of(None), 0);
    }

    #[test]
    fn test_lookup_handles_keys_with_spaces() {
        let record = object(json!({"seednet_raw_Variety Name": "IR64"}));
        assert_eq!(
            lookup(&record, "/seednet_raw_Variety Name"),
            Some(&json!("IR64"))
        );
    }
}
