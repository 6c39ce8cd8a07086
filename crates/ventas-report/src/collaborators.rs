//! # Collaborator Traits
//!
//! The seams between the report layer and the outside world.
//!
//! ```text
//! ┌──────────────────┐    current_sales()    ┌────────────────────────────┐
//! │   SaleHistory    │ ────────────────────► │                            │
//! │ (JsonFileHistory)│                       │  SalesDashboard            │
//! └──────────────────┘                       │  DailyClosingWorkflow      │
//!                                            │                            │
//! ┌──────────────────┐    write_report()     │                            │
//! │SpreadsheetWriter │ ◄──────────────────── │                            │
//! │(XlsxReportWriter)│                       │                            │
//! └──────────────────┘                       │                            │
//!                                            │                            │
//! ┌──────────────────┐  close_daily_sales()  │                            │
//! │   DailyCloser    │ ◄──────────────────── │                            │
//! │ (POS backend)    │                       └────────────────────────────┘
//! └──────────────────┘
//! ```

use async_trait::async_trait;
use serde::Serialize;
use std::path::PathBuf;
use ventas_core::{ExportRow, Sale};

use crate::error::{CloseError, ReportResult};

/// Source of recorded sales.
#[async_trait]
pub trait SaleHistory: Send + Sync {
    /// Snapshot of every sale currently known.
    fn current_sales(&self) -> Vec<Sale>;

    /// Re-reads the history from its backing store.
    async fn refresh(&self) -> ReportResult<()>;
}

/// Persists export rows as a single-sheet spreadsheet.
pub trait SpreadsheetWriter: Send + Sync {
    fn write_report(
        &self,
        sheet_name: &str,
        rows: &[ExportRow],
        file_name: &str,
    ) -> ReportResult<ReportArtifact>;
}

/// The external "close the day" operation.
#[async_trait]
pub trait DailyCloser: Send + Sync {
    async fn close_daily_sales(&self) -> Result<(), CloseError>;
}

/// A spreadsheet that was written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportArtifact {
    pub path: PathBuf,
    /// Data rows, header excluded.
    pub rows: usize,
}
