//! Load lifecycle for one exploration session.
//!
//! `Idle → Loading → Ready | LoadFailed`. A new load may start from any
//! state; each load carries a [`LoadTicket`] and only the most recently
//! issued ticket can complete, so a slow earlier load never overwrites a
//! later one.

use std::fmt;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use seedscope_ingest::{LoadOptions, LoadReport};

use crate::dataset::Dataset;
use crate::error::{CoreError, Result};
use crate::explorer::Explorer;
use crate::page::DEFAULT_PAGE_SIZE;
use crate::sort::SortState;

/// Identifies one load attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LoadTicket(u64);

impl LoadTicket {
    pub fn id(&self) -> u64 {
        self.0
    }
}

/// Observable session state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Loading { ticket: LoadTicket },
    Ready,
    LoadFailed { message: String },
}

impl SessionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Loading { .. } => "loading",
            SessionState::Ready => "ready",
            SessionState::LoadFailed { .. } => "load failed",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Settings applied to every explorer the session creates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    pub load: LoadOptions,
    pub page_size: NonZeroUsize,
    pub sort: SortState,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            load: LoadOptions::default(),
            page_size: DEFAULT_PAGE_SIZE,
            sort: SortState::default(),
        }
    }
}

#[derive(Debug)]
enum Phase {
    Idle,
    Loading { ticket: LoadTicket },
    Ready { explorer: Box<Explorer> },
    LoadFailed { message: String },
}

/// Owns the explorer and gates view operations on a successful load.
#[derive(Debug)]
pub struct Session {
    options: SessionOptions,
    phase: Phase,
    issued: u64,
    source: Option<PathBuf>,
    report: Option<LoadReport>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionOptions::default())
    }
}

impl Session {
    pub fn new(options: SessionOptions) -> Self {
        Self {
            options,
            phase: Phase::Idle,
            issued: 0,
            source: None,
            report: None,
        }
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn state(&self) -> SessionState {
        match &self.phase {
            Phase::Idle => SessionState::Idle,
            Phase::Loading { ticket } => SessionState::Loading { ticket: *ticket },
            Phase::Ready { .. } => SessionState::Ready,
            Phase::LoadFailed { message } => SessionState::LoadFailed {
                message: message.clone(),
            },
        }
    }

    /// Report of the load that produced the current explorer.
    pub fn report(&self) -> Option<&LoadReport> {
        self.report.as_ref()
    }

    /// Enter `Loading` and issue a fresh ticket. Any earlier ticket is stale.
    pub fn begin_load(&mut self) -> LoadTicket {
        self.issued += 1;
        let ticket = LoadTicket(self.issued);
        self.phase = Phase::Loading { ticket };
        self.report = None;
        tracing::debug!(ticket = ticket.id(), "load started");
        ticket
    }

    /// Complete a load with its outcome.
    ///
    /// Returns `false` and leaves the session untouched when `ticket` is
    /// not the one currently loading.
    pub fn complete_load(
        &mut self,
        ticket: LoadTicket,
        outcome: Result<(Dataset, LoadReport)>,
    ) -> bool {
        match outcome {
            Ok((dataset, report)) => self.finish_load(ticket, dataset, report),
            Err(err) => self.fail_load(ticket, &err),
        }
    }

    /// Publish a loaded dataset.
    pub fn finish_load(&mut self, ticket: LoadTicket, dataset: Dataset, report: LoadReport) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        tracing::info!(
            ticket = ticket.id(),
            records = dataset.len(),
            format = %report.format,
            "catalog ready"
        );
        let explorer = Explorer::new(dataset)
            .with_page_size(self.options.page_size)
            .with_sort(self.options.sort);
        self.phase = Phase::Ready {
            explorer: Box::new(explorer),
        };
        self.report = Some(report);
        true
    }

    /// Record a failed load. No partial data is kept.
    pub fn fail_load(&mut self, ticket: LoadTicket, error: &CoreError) -> bool {
        if !self.is_current(ticket) {
            return false;
        }
        tracing::warn!(ticket = ticket.id(), error = %error, "load failed");
        self.phase = Phase::LoadFailed {
            message: error.to_string(),
        };
        true
    }

    /// Load `path` synchronously, replacing whatever the session held.
    pub fn load(&mut self, path: &Path) -> Result<()> {
        self.source = Some(path.to_path_buf());
        let ticket = self.begin_load();
        match Dataset::load(path, self.options.load) {
            Ok((dataset, report)) => {
                self.finish_load(ticket, dataset, report);
                Ok(())
            }
            Err(err) => {
                self.fail_load(ticket, &err);
                Err(err)
            }
        }
    }

    /// Re-run the last [`Session::load`]. The only way out of `LoadFailed`
    /// besides loading a new path.
    pub fn reload(&mut self) -> Result<()> {
        let Some(path) = self.source.clone() else {
            return Err(CoreError::NotReady {
                state: self.state_name(),
            });
        };
        self.load(&path)
    }

    pub fn explorer(&self) -> Result<&Explorer> {
        match &self.phase {
            Phase::Ready { explorer } => Ok(explorer),
            _ => Err(self.not_ready()),
        }
    }

    pub fn explorer_mut(&mut self) -> Result<&mut Explorer> {
        let state = self.state_name();
        match &mut self.phase {
            Phase::Ready { explorer } => Ok(explorer),
            _ => Err(CoreError::NotReady { state }),
        }
    }

    fn is_current(&self, ticket: LoadTicket) -> bool {
        let current = matches!(self.phase, Phase::Loading { ticket: active } if active == ticket);
        if !current {
            tracing::debug!(ticket = ticket.id(), "ignoring stale load result");
        }
        current
    }

    fn state_name(&self) -> &'static str {
        match self.phase {
            Phase::Idle => "idle",
            Phase::Loading { .. } => "loading",
            Phase::Ready { .. } => "ready",
            Phase::LoadFailed { .. } => "load failed",
        }
    }

    fn not_ready(&self) -> CoreError {
        CoreError::NotReady {
            state: self.state_name(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seedscope_ingest::{IngestError, SourceFormat};
    use seedscope_model::VarietyRecord;

    fn report() -> LoadReport {
        LoadReport {
            path: PathBuf::from("catalog.json"),
            format: SourceFormat::EnhancedJson,
            records: 1,
            skipped: 0,
        }
    }

    fn dataset(crop: &str) -> Dataset {
        Dataset::new(vec![VarietyRecord {
            crop: crop.to_string(),
            ..VarietyRecord::default()
        }])
    }

    #[test]
    fn test_view_requires_ready() {
        let mut session = Session::default();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(matches!(
            session.explorer(),
            Err(CoreError::NotReady { state: "idle" })
        ));
        let ticket = session.begin_load();
        assert!(matches!(
            session.explorer_mut(),
            Err(CoreError::NotReady { state: "loading" })
        ));
        assert!(session.finish_load(ticket, dataset("Rice"), report()));
        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(session.explorer().map(Explorer::filtered_count).ok(), Some(1));
    }

    #[test]
    fn test_last_load_wins() {
        let mut session = Session::default();
        let first = session.begin_load();
        let second = session.begin_load();
        assert!(session.finish_load(second, dataset("Wheat"), report()));
        assert!(!session.finish_load(first, dataset("Rice"), report()));
        let crop = session
            .explorer()
            .ok()
            .and_then(|e| e.dataset().get(0))
            .map(|r| r.crop.clone());
        assert_eq!(crop.as_deref(), Some("Wheat"));
    }

    #[test]
    fn test_failure_is_terminal_until_reload() {
        let mut session = Session::default();
        let ticket = session.begin_load();
        let err = CoreError::Load(IngestError::EmptySource {
            path: PathBuf::from("empty.csv"),
        });
        assert!(session.fail_load(ticket, &err));
        assert!(matches!(session.state(), SessionState::LoadFailed { .. }));
        assert!(!session.finish_load(ticket, dataset("Rice"), report()));
        assert!(session.explorer().is_err());

        let retry = session.begin_load();
        assert!(session.finish_load(retry, dataset("Rice"), report()));
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[test]
    fn test_reload_without_source() {
        let mut session = Session::default();
        assert!(session.reload().is_err());
    }
}
