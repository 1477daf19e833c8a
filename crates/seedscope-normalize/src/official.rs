//! Official registry cross-references.

use std::collections::BTreeMap;

use serde_json::Value;

use seedscope_model::OfficialSource;

use crate::chain::{present_text, scalar_text};

/// Prefix of flattened registry keys in analysis records.
pub const REGISTRY_PREFIX: &str = "seednet_raw_";

/// Registry detail page for a variety code.
pub fn portal_url(variety_id: &str) -> String {
    format!("https://seednet.gov.in/SeedVarieties/ssrsVarietydetail.aspx?varietycd={variety_id}")
}

/// Collects registry fields and identifiers before deciding whether a
/// cross-reference exists.
#[derive(Debug, Default)]
pub struct OfficialBuilder {
    url: Option<String>,
    variety_id: Option<String>,
    fields: BTreeMap<String, String>,
    flagged: bool,
}

impl OfficialBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url(mut self, url: Option<String>) -> Self {
        if self.url.is_none() {
            self.url = url;
        }
        self
    }

    pub fn variety_id(mut self, id: Option<String>) -> Self {
        if self.variety_id.is_none() {
            self.variety_id = id;
        }
        self
    }

    /// Marks the record as matched even without an id or url.
    pub fn flagged(mut self, flagged: bool) -> Self {
        self.flagged |= flagged;
        self
    }

    /// Add one field; blank values and names already present are ignored.
    pub fn field(mut self, name: &str, value: Option<&Value>) -> Self {
        let name = name.strip_prefix(REGISTRY_PREFIX).unwrap_or(name).trim();
        if name.is_empty() || self.fields.contains_key(name) {
            return self;
        }
        if let Some(text) = value.and_then(scalar_text) {
            self.fields.insert(name.to_string(), text);
        }
        self
    }

    pub fn text_field(self, name: &str, value: Option<&str>) -> Self {
        let value = value.and_then(present_text).map(Value::String);
        self.field(name, value.as_ref())
    }

    /// Add every entry of a JSON map.
    pub fn fields_from(self, map: Option<&Value>) -> Self {
        let Some(Value::Object(entries)) = map else {
            return self;
        };
        entries
            .iter()
            .fold(self, |builder, (name, value)| builder.field(name, Some(value)))
    }

    /// Add every `seednet_raw_*` key of a flat record.
    pub fn prefixed_fields_from(self, record: &serde_json::Map<String, Value>) -> Self {
        record
            .iter()
            .filter(|(name, _)| name.starts_with(REGISTRY_PREFIX))
            .fold(self, |builder, (name, value)| builder.field(name, Some(value)))
    }

    /// A source exists when the record carries a registry id, a portal url
    /// or an explicit match flag.
    pub fn build(mut self) -> Option<OfficialSource> {
        if self.variety_id.is_none() {
            self.variety_id = self.fields.get("variety_id").cloned();
        }
        if self.url.is_none() {
            self.url = self.fields.get("source_url").cloned();
        }
        if self.variety_id.is_none() && self.url.is_none() && !self.flagged {
            return None;
        }
        let portal_url = match (self.url, &self.variety_id) {
            (Some(url), _) => url,
            (None, Some(id)) => portal_url(id),
            (None, None) => String::new(),
        };
        Some(OfficialSource {
            portal_url,
            variety_id: self.variety_id,
            fields: self.fields,
        })
    }
}
