//! # Filtered Export
//!
//! The one path from a sale snapshot to a written spreadsheet, shared by the
//! closing workflow and the `sales-report` binary.
//!
//! ```text
//! sales ──► filter_sales ──► flatten_sales ──► write_report ──► ExportedReport
//!              ▲                  ▲                 ▲
//!           SalesFilter    timestamp_format   sheet_name + report_file_name(now)
//! ```

use chrono::{DateTime, TimeZone};
use serde::Serialize;
use std::fmt;
use tracing::debug;
use ventas_core::{filter_sales, flatten_sales, report_file_name, Sale, SalesFilter};

use crate::collaborators::{ReportArtifact, SpreadsheetWriter};
use crate::config::ExportSettings;
use crate::error::ReportResult;

/// A spreadsheet written for one selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedReport {
    pub artifact: ReportArtifact,
    pub file_name: String,
}

/// Writes the sales matching `filter` as a spreadsheet.
///
/// The file is named after `now`'s calendar date and timestamps are
/// rendered in `now`'s time zone.
pub fn export_filtered<W, Tz>(
    writer: &W,
    settings: &ExportSettings,
    sales: &[Sale],
    filter: &SalesFilter,
    now: &DateTime<Tz>,
) -> ReportResult<ExportedReport>
where
    W: SpreadsheetWriter + ?Sized,
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    let rows = flatten_sales(
        filter_sales(sales, filter, now),
        &now.timezone(),
        &settings.timestamp_format,
    );
    let file_name = report_file_name(&settings.file_prefix, now.date_naive());

    debug!(rows = rows.len(), file_name = %file_name, "Exporting sales");

    let artifact = writer.write_report(&settings.sheet_name, &rows, &file_name)?;
    Ok(ExportedReport {
        artifact,
        file_name,
    })
}
