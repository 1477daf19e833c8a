//! Data model for the seed variety catalog.
//!
//! - [`VarietyRecord`]: the canonical flat record every source shape is normalized into
//! - Closed vocabularies: [`StressType`], [`Season`], [`StressTolerance`], [`EvidenceQuality`]
//! - [`states`]: canonical state names and code mapping

pub mod enums;
pub mod error;
pub mod record;
pub mod states;

pub use enums::{EvidenceQuality, Season, StressTolerance, StressType};
pub use error::ModelError;
pub use record::{
    NO_ANALYSIS, NOT_SPECIFIED, OfficialSource, ResearchEvidence, STANDARD_VARIETY, UNKNOWN,
    UNKNOWN_CROP, UNKNOWN_VARIETY, VarietyRecord, derive_record_id,
};
pub use states::{canonical_state_name, canonicalize_states, is_placeholder_state, state_code};
