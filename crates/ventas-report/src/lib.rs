//! # ventas-report: Export & Daily Closing for Ventas POS
//!
//! The I/O shell around `ventas-core`: reads the sale history, composes the
//! dashboard, writes the end-of-day spreadsheet and drives the close-day
//! call.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Report Layer Architecture                        │
//! │                                                                         │
//! │  ┌──────────────────┐                                                  │
//! │  │ JsonFileHistory  │ ── current_sales() ──┐                           │
//! │  └──────────────────┘                      │                           │
//! │                                            ▼                           │
//! │  ┌──────────────────────────┐   ┌───────────────────────────────────┐  │
//! │  │ SalesDashboard::build    │   │ DailyClosingWorkflow              │  │
//! │  │ stats + chart + count    │   │ Idle → Confirming → Exporting     │  │
//! │  └──────────────────────────┘   │      → Closing → Done | Failed    │  │
//! │                                 └───────┬──────────────────┬────────┘  │
//! │                                         │                  │           │
//! │                                         ▼                  ▼           │
//! │                               ┌──────────────────┐ ┌───────────────┐   │
//! │                               │ XlsxReportWriter │ │ DailyCloser   │   │
//! │                               └──────────────────┘ └───────────────┘   │
//! │                                                                         │
//! │  Configuration: ReportConfig (report.toml + VENTAS_* environment)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`closing`] - The export-then-close state machine
//! - [`collaborators`] - `SaleHistory`, `SpreadsheetWriter`, `DailyCloser`
//! - [`config`] - Report configuration
//! - [`dashboard`] - Stats, chart and filtered count for one selection
//! - [`error`] - Report error types
//! - [`export`] - Filter, flatten and write one selection
//! - [`history`] - JSON file sale history
//! - [`xlsx`] - `.xlsx` spreadsheet writer

pub mod closing;
pub mod collaborators;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod export;
pub mod history;
pub mod xlsx;

pub use closing::{ClosingState, DailyClosingWorkflow};
pub use collaborators::{DailyCloser, ReportArtifact, SaleHistory, SpreadsheetWriter};
pub use config::{DashboardSettings, ExportSettings, ReportConfig};
pub use dashboard::SalesDashboard;
pub use error::{CloseError, ReportError, ReportResult};
pub use export::{export_filtered, ExportedReport};
pub use history::JsonFileHistory;
pub use xlsx::XlsxReportWriter;
