//! # Daily Closing Workflow
//!
//! "Generar reporte y cerrar día": export the filtered sales to a
//! spreadsheet, then ask the POS backend to close the day.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   ┌──────┐ request_report ┌────────────┐  confirm  ┌───────────┐        │
//! │   │ Idle │ ─────────────► │ Confirming │ ────────► │ Exporting │        │
//! │   └──────┘ ◄───────────── └────────────┘           └─────┬─────┘        │
//! │      ▲  ▲      cancel                        writer ok   │   writer err │
//! │      │  │                                               ▼      │       │
//! │      │  │    ┌──────┐   close ok    ┌─────────┐                 │       │
//! │      │  └─── │ Done │ ◄──────────── │ Closing │                 │       │
//! │      │       └──────┘               └────┬────┘                 │       │
//! │      │                                   │ close err            │       │
//! │      │                                   ▼                      │       │
//! │      │   acknowledge_failure       ┌────────┐                   │       │
//! │      └──────────────────────────── │ Failed │ ◄─────────────────┘       │
//! │                                    └────────┘                           │
//! │                                                                         │
//! │  The close is never invoked before the spreadsheet exists, and never   │
//! │  retried. A failed close leaves the spreadsheet on disk.               │
//! │  acknowledge_failure also recovers from Closing when the confirm       │
//! │  future was dropped before the close call answered.                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, TimeZone};
use serde::Serialize;
use std::fmt;
use tracing::{error, info, warn};
use ventas_core::{Sale, SalesFilter};

use crate::collaborators::{DailyCloser, ReportArtifact, SpreadsheetWriter};
use crate::config::ExportSettings;
use crate::error::{ReportError, ReportResult};
use crate::export::{export_filtered, ExportedReport};

// =============================================================================
// Closing State
// =============================================================================

/// Where the workflow currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ClosingState {
    /// Nothing in progress.
    Idle,
    /// The confirmation modal is open.
    Confirming,
    /// Writing the spreadsheet.
    Exporting,
    /// Waiting on the close-day call.
    Closing,
    /// The day was closed; resets to Idle immediately.
    Done,
    /// Export or close failed; waits for acknowledgement.
    Failed,
}

impl ClosingState {
    /// True while `confirm` is running.
    pub fn is_busy(&self) -> bool {
        matches!(self, ClosingState::Exporting | ClosingState::Closing)
    }
}

impl fmt::Display for ClosingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ClosingState::Idle => "idle",
            ClosingState::Confirming => "confirming",
            ClosingState::Exporting => "exporting",
            ClosingState::Closing => "closing",
            ClosingState::Done => "done",
            ClosingState::Failed => "failed",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Workflow
// =============================================================================

/// Export-then-close coordinator.
///
/// `confirm` takes `&mut self`, so nothing else can touch the workflow
/// while the close call is pending.
pub struct DailyClosingWorkflow<W, C> {
    writer: W,
    closer: C,
    settings: ExportSettings,
    state: ClosingState,
    last_artifact: Option<ReportArtifact>,
}

impl<W, C> DailyClosingWorkflow<W, C>
where
    W: SpreadsheetWriter,
    C: DailyCloser,
{
    pub fn new(writer: W, closer: C, settings: ExportSettings) -> Self {
        DailyClosingWorkflow {
            writer,
            closer,
            settings,
            state: ClosingState::Idle,
            last_artifact: None,
        }
    }

    pub fn state(&self) -> ClosingState {
        self.state
    }

    /// The most recent spreadsheet written, kept even when the close failed.
    pub fn last_artifact(&self) -> Option<&ReportArtifact> {
        self.last_artifact.as_ref()
    }

    /// Opens the confirmation step.
    pub fn request_report(&mut self) -> ReportResult<()> {
        self.require(ClosingState::Idle, "request a report")?;
        self.transition(ClosingState::Confirming);
        Ok(())
    }

    /// Dismisses the confirmation step without exporting.
    pub fn cancel(&mut self) -> ReportResult<()> {
        self.require(ClosingState::Confirming, "cancel")?;
        self.transition(ClosingState::Idle);
        Ok(())
    }

    /// Returns to Idle after a failure has been shown.
    ///
    /// Also accepted in Closing: a `confirm` future dropped while the close
    /// call was pending leaves the workflow there with no way forward. The
    /// outcome of that close is unknown.
    pub fn acknowledge_failure(&mut self) -> ReportResult<()> {
        match self.state {
            ClosingState::Failed => {}
            ClosingState::Closing => {
                warn!(
                    artifact = ?self.last_artifact.as_ref().map(|a| &a.path),
                    "Abandoned close acknowledged; the day may or may not be closed"
                );
            }
            _ => self.require(ClosingState::Failed, "acknowledge a failure")?,
        }
        self.transition(ClosingState::Idle);
        Ok(())
    }

    /// Exports the sales matching `filter`, then closes the day.
    ///
    /// The file is named after `now`'s calendar date and timestamps are
    /// rendered in `now`'s time zone.
    pub async fn confirm<Tz>(
        &mut self,
        sales: &[Sale],
        filter: &SalesFilter,
        now: &DateTime<Tz>,
    ) -> ReportResult<ExportedReport>
    where
        Tz: TimeZone,
        Tz::Offset: fmt::Display,
    {
        self.require(ClosingState::Confirming, "confirm")?;
        self.transition(ClosingState::Exporting);

        let report = match export_filtered(&self.writer, &self.settings, sales, filter, now) {
            Ok(report) => report,
            Err(e) => {
                error!("Failed to write sales report: {}", e);
                self.transition(ClosingState::Failed);
                return Err(e);
            }
        };
        self.last_artifact = Some(report.artifact.clone());

        self.transition(ClosingState::Closing);

        match self.closer.close_daily_sales().await {
            Ok(()) => {
                info!(path = ?report.artifact.path, "Daily sales closed");
                self.transition(ClosingState::Done);
                self.transition(ClosingState::Idle);
                Ok(report)
            }
            Err(source) => {
                error!(path = ?report.artifact.path, "Closing the day failed: {}", source);
                self.transition(ClosingState::Failed);
                Err(ReportError::CloseFailed {
                    artifact: report.artifact.path,
                    source,
                })
            }
        }
    }

    fn require(&self, expected: ClosingState, action: &str) -> ReportResult<()> {
        if self.state == expected {
            Ok(())
        } else {
            Err(ReportError::InvalidTransition {
                state: self.state.to_string(),
                action: action.to_string(),
            })
        }
    }

    fn transition(&mut self, next: ClosingState) {
        info!(from = %self.state, to = %next, "Daily closing transition");
        self.state = next;
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
