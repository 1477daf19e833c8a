//! Normalization of raw catalog records.
//!
//! Maps the three raw shapes read by `seedscope-ingest` onto one flat
//! [`VarietyRecord`](seedscope_model::VarietyRecord). Every function here is
//! pure and total: malformed or missing input falls back to documented
//! defaults instead of failing.
//!
//! # Example
//!
//! ```ignore
//! use seedscope_ingest::{LoadOptions, load_source};
//! use seedscope_normalize::normalize_all;
//!
//! let loaded = load_source(path, LoadOptions::default())?;
//! let records = normalize_all(&loaded.records);
//! ```

pub mod chain;
pub mod detect;
pub mod evidence;
pub mod official;
mod shapes;

pub use chain::{Accessor, FieldChain};
pub use detect::{detect_seasons, detect_stress_profile, parse_stress_labels, split_states};
pub use evidence::{QuerySummary, grade_evidence};
pub use official::{OfficialBuilder, portal_url};
pub use shapes::{normalize, normalize_all, normalize_analysis, normalize_enhanced, normalize_tabular};
