//! # ventas-core: Pure Sales Analytics for Ventas POS
//!
//! This crate holds every piece of logic behind the sales history screen as
//! pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Ventas POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Sales History Screen (frontend)                 │   │
//! │  │    Stats cards ──► Bar chart ──► "Generar reporte" modal        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 ventas-report (I/O shell)                       │   │
//! │  │    SalesDashboard, DailyClosingWorkflow, XlsxReportWriter       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ ventas-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌──────────┐ ┌──────────┐ ┌──────────┐ ┌──────────┐          │   │
//! │  │   │  filter  │ │  chart   │ │  stats   │ │  export  │          │   │
//! │  │   │ DateRange│ │ Buckets  │ │ Totals   │ │ Rows     │          │   │
//! │  │   └──────────┘ └──────────┘ └──────────┘ └──────────┘          │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO LOGGING • PURE FUNCTIONS               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Sale records as they arrive from the sale history
//! - [`money`] - Money type for major-unit amounts
//! - [`filter`] - Date range and payment method filtering
//! - [`chart`] - Time bucket grouping for the sales trend chart
//! - [`stats`] - Headline statistics over the full history
//! - [`export`] - Flattening sales into spreadsheet rows
//! - [`validation`] - Checks for report settings
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::{FixedOffset, TimeZone};
//! use ventas_core::{chart_series, filter_sales, DateRange, PaymentFilter, Sale, SalesFilter};
//!
//! let sales: Vec<Sale> = serde_json::from_str(r#"[
//!     {"id": "v-1", "date": "2026-10-16T09:15:00-05:00", "paymentMethod": "CASH",
//!      "items": [{"name": "Empanada", "price": 2500, "quantity": 2}], "total": 5000}
//! ]"#).unwrap();
//!
//! let bogota = FixedOffset::west_opt(5 * 3600).unwrap();
//! let now = bogota.with_ymd_and_hms(2026, 10, 16, 18, 0, 0).unwrap();
//! let selection = SalesFilter::new(DateRange::Today, PaymentFilter::All);
//!
//! assert_eq!(filter_sales(&sales, &selection, &now).len(), 1);
//! assert_eq!(chart_series(&sales, &selection, &now).labels, vec!["9:00"]);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod chart;
pub mod error;
pub mod export;
pub mod filter;
pub mod money;
pub mod stats;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use chart::{chart_series, group_into_buckets, Bucket, BucketRule, ChartDataset, ChartSeries};
pub use error::{CoreError, CoreResult, ValidationError};
pub use export::{
    flatten_sales, report_file_name, ExportCell, ExportRow, DEFAULT_FILE_PREFIX,
    DEFAULT_SHEET_NAME, DEFAULT_TIMESTAMP_FORMAT, EXPORT_COLUMNS,
};
pub use filter::{filter_sales, start_boundary, DateRange, PaymentFilter, SalesFilter};
pub use money::Money;
pub use stats::{summarize, PaymentBreakdown, SalesStats};
pub use types::*;
