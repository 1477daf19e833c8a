//! The immutable, fully normalized collection.

use std::path::Path;
use std::sync::Arc;
use std::time::Instant;

use chrono::{DateTime, Utc};

use seedscope_ingest::{LoadOptions, LoadReport, load_source};
use seedscope_model::VarietyRecord;
use seedscope_normalize::normalize_all;

use crate::error::Result;

/// A loaded catalog.
///
/// Records are shared behind an `Arc` and never mutated after
/// construction; every derived view refers to them by index.
#[derive(Debug, Clone)]
pub struct Dataset {
    records: Arc<[VarietyRecord]>,
    loaded_at: DateTime<Utc>,
}

impl Dataset {
    pub fn new(records: Vec<VarietyRecord>) -> Self {
        Self {
            records: records.into(),
            loaded_at: Utc::now(),
        }
    }

    /// Read, parse and normalize a source file.
    pub fn load(path: &Path, options: LoadOptions) -> Result<(Dataset, LoadReport)> {
        let loaded = load_source(path, options)?;
        let started = Instant::now();
        let records = normalize_all(&loaded.records);
        tracing::info!(
            records = records.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "normalized catalog"
        );
        Ok((Dataset::new(records), loaded.report))
    }

    pub fn records(&self) -> &[VarietyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&VarietyRecord> {
        self.records.get(index)
    }

    /// First record with the given id.
    pub fn find(&self, id: &str) -> Option<&VarietyRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn loaded_at(&self) -> DateTime<Utc> {
        self.loaded_at
    }
}

impl From<Vec<VarietyRecord>> for Dataset {
    fn from(records: Vec<VarietyRecord>) -> Self {
        Dataset::new(records)
    }
}
