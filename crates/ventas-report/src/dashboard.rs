//! # Sales Dashboard
//!
//! Everything the sales history screen shows for one selection, computed in
//! a single pass over a snapshot of the history.
//!
//! The selection is owned by the caller and passed in on every build; the
//! dashboard keeps no state between renders.

use chrono::{DateTime, TimeZone};
use serde::Serialize;
use ventas_core::{chart_series, filter_sales, summarize, ChartSeries, Sale, SalesFilter, SalesStats};

/// One render of the sales history screen.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesDashboard {
    pub selection: SalesFilter,
    /// Stats cards, over the full history.
    pub stats: SalesStats,
    /// Bar chart, over the filtered sales.
    pub chart: ChartSeries,
    /// Number of sales matching the selection.
    pub filtered_sales: usize,
}

impl SalesDashboard {
    pub fn build<Tz: TimeZone>(sales: &[Sale], selection: SalesFilter, now: &DateTime<Tz>) -> Self {
        SalesDashboard {
            selection,
            stats: summarize(sales),
            chart: chart_series(sales, &selection, now),
            filtered_sales: filter_sales(sales, &selection, now).len(),
        }
    }
}
