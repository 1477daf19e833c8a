//! Variety catalog explorer core.
//!
//! Holds a loaded [`Dataset`] and the view state derived from it: filter
//! criteria, sort selection and pagination, gated by a [`Session`] that
//! tracks the load lifecycle.
//!
//! # Features
//!
//! - **Filtering**: AND across categories, OR within a category
//! - **Sorting**: numeric-before-text comparator, stable, exact reversal
//! - **Paging**: 1-based, clamped, default 25 rows
//! - **Outputs**: page snapshots, CSV export, vocabularies, statistics, detail views
//!
//! # Example
//!
//! ```ignore
//! use std::path::Path;
//! use seedscope_core::{Criteria, Session, SessionOptions};
//!
//! let mut session = Session::new(SessionOptions::default());
//! session.load(Path::new("data/varieties.json"))?;
//!
//! let explorer = session.explorer_mut()?;
//! explorer.set_criteria(Criteria::new().with_crop("Rice").with_state("PB"));
//! let page = explorer.snapshot();
//! println!("{} of {} varieties", page.filtered_count, page.total_count);
//! ```

mod dataset;
mod debounce;
mod detail;
mod error;
mod explorer;
mod export;
mod filter;
mod page;
mod session;
mod sort;
mod stats;
mod vocab;

// === Error Types ===
pub use error::{CoreError, Result};

// === Data ===
pub use dataset::Dataset;

// === View State ===
pub use explorer::{Explorer, PageSnapshot};
pub use filter::{Criteria, filter_indices};
pub use page::{DEFAULT_PAGE_SIZE, Pager};
pub use sort::{SortDirection, SortKey, SortState, compare_values, sort_indices};

// === Session ===
pub use debounce::{DEFAULT_DEBOUNCE, Debouncer};
pub use session::{LoadTicket, Session, SessionOptions, SessionState};

// === Outputs ===
pub use detail::{
    DetailField, DetailView, NO_STRESS_EVIDENCE, OfficialSection, ResearchSection,
    STANDARD_PROCESSING,
};
pub use export::{EXPORT_HEADER, export_csv};
pub use stats::DatasetStats;
pub use vocab::Vocabulary;
