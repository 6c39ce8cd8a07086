//! # Export Row Flattening
//!
//! Expands sales into one spreadsheet row per line item for the end-of-day
//! report.
//!
//! ## Row Layout
//! ```text
//! ┌──────────────────────────────────────────────────────────────────────────┐
//! │ Fecha │ Método de pago │ Producto │ Cantidad │ Precio unitario │         │
//! │       │                │          │          │                 │         │
//! │ Subtotal = Precio unitario × Cantidad   │ Total de venta = sale.total    │
//! └──────────────────────────────────────────────────────────────────────────┘
//!
//! Sale #1 (2 items) ──► row 1.1, row 1.2
//! Sale #2 (0 items) ──► (nothing)
//! Sale #3 (1 item)  ──► row 3.1
//! ```
//!
//! "Total de venta" repeats the sale's own total on each of its rows, even
//! when it disagrees with the sum of the subtotals.

use chrono::{DateTime, NaiveDate, TimeZone};
use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{PaymentMethod, Sale};
use crate::validation::is_valid_timestamp_format;

/// Header row of the report sheet.
pub const EXPORT_COLUMNS: [&str; 7] = [
    "Fecha",
    "Método de pago",
    "Producto",
    "Cantidad",
    "Precio unitario",
    "Subtotal",
    "Total de venta",
];

/// Worksheet name of the end-of-day report.
pub const DEFAULT_SHEET_NAME: &str = "Ventas del Día";

/// File name prefix; the date and extension are appended.
pub const DEFAULT_FILE_PREFIX: &str = "Reporte_Ventas";

/// Timestamp layout of the "Fecha" column.
pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%d/%m/%Y %H:%M:%S";

/// "Fecha" value for a sale whose date does not parse.
pub const INVALID_DATE_TEXT: &str = "Invalid Date";

// =============================================================================
// Export Row
// =============================================================================

/// One (sale, line item) pair ready for the sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    pub date: String,
    pub payment_method: PaymentMethod,
    pub product_name: String,
    pub quantity: f64,
    pub unit_price: Money,
    pub subtotal: Money,
    pub sale_total: Money,
}

/// A typed spreadsheet cell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExportCell<'a> {
    Text(&'a str),
    Number(f64),
}

impl ExportRow {
    /// Cell values in [`EXPORT_COLUMNS`] order.
    pub fn cells(&self) -> [ExportCell<'_>; 7] {
        [
            ExportCell::Text(&self.date),
            ExportCell::Text(self.payment_method.as_str()),
            ExportCell::Text(&self.product_name),
            ExportCell::Number(self.quantity),
            ExportCell::Number(self.unit_price.to_major()),
            ExportCell::Number(self.subtotal.to_major()),
            ExportCell::Number(self.sale_total.to_major()),
        ]
    }
}

// =============================================================================
// Flattening
// =============================================================================

/// Flattens sales into rows: sale order outer, item order inner.
///
/// Timestamps are rendered in `tz` with `timestamp_format`; an invalid
/// format falls back to [`DEFAULT_TIMESTAMP_FORMAT`].
///
/// ## Example
/// ```rust
/// use chrono::Utc;
/// use ventas_core::{flatten_sales, LineItem, PaymentMethod, Sale, DEFAULT_TIMESTAMP_FORMAT};
///
/// let sale = Sale::new(
///     "v-7",
///     "2026-10-16T09:00:00Z",
///     PaymentMethod::Card,
///     vec![LineItem::new("Arepa", 3000.0, 2), LineItem::new("Jugo", 4000.0, 1)],
///     10000.0,
/// );
///
/// let rows = flatten_sales([&sale], &Utc, DEFAULT_TIMESTAMP_FORMAT);
/// assert_eq!(rows.len(), 2);
/// assert_eq!(rows[0].date, "16/10/2026 09:00:00");
/// assert_eq!(rows[0].subtotal.to_major(), 6000.0);
/// assert_eq!(rows[1].sale_total.to_major(), 10000.0);
/// ```
pub fn flatten_sales<'a, Tz, I>(sales: I, tz: &Tz, timestamp_format: &str) -> Vec<ExportRow>
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
    I: IntoIterator<Item = &'a Sale>,
{
    let format = if is_valid_timestamp_format(timestamp_format) {
        timestamp_format
    } else {
        DEFAULT_TIMESTAMP_FORMAT
    };

    let mut rows = Vec::new();
    for sale in sales {
        if sale.items.is_empty() {
            continue;
        }

        let date = format_sale_date(sale.parsed_date(tz), format);
        let sale_total = sale.total_amount();

        rows.extend(sale.items.iter().map(|item| ExportRow {
            date: date.clone(),
            payment_method: sale.payment_method,
            product_name: item.name.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price(),
            subtotal: item.subtotal(),
            sale_total,
        }));
    }

    rows
}

/// `Reporte_Ventas_2026-10-16.xlsx` for the default prefix.
pub fn report_file_name(prefix: &str, date: NaiveDate) -> String {
    format!("{}_{}.xlsx", prefix, date.format("%Y-%m-%d"))
}

fn format_sale_date<Tz>(date: Option<DateTime<Tz>>, format: &str) -> String
where
    Tz: TimeZone,
    Tz::Offset: fmt::Display,
{
    match date {
        Some(date) => date.format(format).to_string(),
        None => INVALID_DATE_TEXT.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::LineItem;
    use chrono::{FixedOffset, Utc};

    fn sample_sales() -> Vec<Sale> {
        vec![
            Sale::new(
                "v-1",
                "2026-10-16T09:00:00Z",
                PaymentMethod::Cash,
                vec![LineItem::new("Tinto", 1500.0, 2), LineItem::new("Pandebono", 2000.0, 3)],
                9000.0,
            ),
            Sale::new("v-2", "2026-10-16T10:00:00Z", PaymentMethod::Card, vec![], 500.0),
            Sale::new(
                "v-3",
                "2026-10-16T11:00:00Z",
                PaymentMethod::Nequi,
                vec![LineItem::new("Almojábana", 2500.0, 0)],
                "2500",
            ),
        ]
    }

    #[test]
    fn test_single_item_scenario() {
        let sale = Sale::new(
            "v-1",
            "2026-10-16T09:00:00-05:00",
            PaymentMethod::Cash,
            vec![LineItem::new("A", 50.0, 2)],
            100.0,
        );

        let rows = flatten_sales([&sale], &Utc, DEFAULT_TIMESTAMP_FORMAT);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].product_name, "A");
        assert_eq!(rows[0].subtotal, Money::from_major(100.0));
        assert_eq!(rows[0].sale_total, Money::from_major(100.0));
    }

    #[test]
    fn test_row_count_matches_item_count() {
        let sales = sample_sales();
        let expected: usize = sales.iter().map(|s| s.items.len()).sum();

        let rows = flatten_sales(&sales, &Utc, DEFAULT_TIMESTAMP_FORMAT);
        assert_eq!(rows.len(), expected);
        assert_eq!(rows.len(), 3);
    }

    #[test]
    fn test_row_order_is_sale_then_item() {
        let rows = flatten_sales(&sample_sales(), &Utc, DEFAULT_TIMESTAMP_FORMAT);
        let names: Vec<&str> = rows.iter().map(|r| r.product_name.as_str()).collect();
        assert_eq!(names, vec!["Tinto", "Pandebono", "Almojábana"]);
    }

    #[test]
    fn test_zero_quantity_yields_zero_subtotal() {
        let rows = flatten_sales(&sample_sales(), &Utc, DEFAULT_TIMESTAMP_FORMAT);
        let last = &rows[2];
        assert_eq!(last.quantity, 0.0);
        assert!(last.subtotal.is_zero());
        assert_eq!(last.sale_total, Money::from_major(2500.0));
    }

    #[test]
    fn test_sale_total_is_not_reconciled() {
        let rows = flatten_sales(&sample_sales(), &Utc, DEFAULT_TIMESTAMP_FORMAT);
        let subtotals = rows[0].subtotal + rows[1].subtotal;

        assert_eq!(subtotals, Money::from_major(9000.0));
        assert_eq!(rows[0].sale_total, Money::from_major(9000.0));

        let mismatched = Sale::new(
            "v-9",
            "2026-10-16T09:00:00Z",
            PaymentMethod::Cash,
            vec![LineItem::new("Avena", 3000.0, 1)],
            2500.0,
        );
        let rows = flatten_sales([&mismatched], &Utc, DEFAULT_TIMESTAMP_FORMAT);
        assert_eq!(rows[0].subtotal, Money::from_major(3000.0));
        assert_eq!(rows[0].sale_total, Money::from_major(2500.0));
    }

    #[test]
    fn test_fractional_quantity_row() {
        let sale = Sale::new(
            "v-5",
            "2026-10-16T09:00:00Z",
            PaymentMethod::Cash,
            vec![LineItem::new("Queso por kilo", 10000.0, 1.5)],
            15000.0,
        );

        let rows = flatten_sales([&sale], &Utc, DEFAULT_TIMESTAMP_FORMAT);
        assert_eq!(rows[0].quantity, 1.5);
        assert_eq!(rows[0].subtotal.to_major(), 15000.0);
        assert_eq!(rows[0].cells()[3], ExportCell::Number(1.5));
    }

    #[test]
    fn test_huge_amounts_do_not_panic() {
        let sale = Sale::new(
            "v-6",
            "2026-10-16T09:00:00Z",
            PaymentMethod::Card,
            vec![LineItem::new("Lote", 1e15, 100000)],
            1e20,
        );

        let rows = flatten_sales([&sale], &Utc, DEFAULT_TIMESTAMP_FORMAT);
        assert_eq!(rows[0].subtotal.to_major(), 1e20);
        assert_eq!(rows[0].sale_total.to_major(), 1e20);
    }

    #[test]
    fn test_timestamp_rendered_in_zone() {
        let bogota = FixedOffset::west_opt(5 * 3600).unwrap();
        let rows = flatten_sales(&sample_sales(), &bogota, "%Y-%m-%d %H:%M");
        assert_eq!(rows[0].date, "2026-10-16 04:00");
    }

    #[test]
    fn test_invalid_date_and_invalid_format() {
        let sale = Sale::new(
            "v-4",
            "someday",
            PaymentMethod::Cash,
            vec![LineItem::new("Buñuelo", 800.0, 1)],
            800.0,
        );
        let rows = flatten_sales([&sale], &Utc, DEFAULT_TIMESTAMP_FORMAT);
        assert_eq!(rows[0].date, INVALID_DATE_TEXT);

        let rows = flatten_sales(&sample_sales(), &Utc, "%d/%m %");
        assert_eq!(rows[0].date, "16/10/2026 09:00:00");
    }

    #[test]
    fn test_empty_input() {
        let rows = flatten_sales(Vec::<&Sale>::new(), &Utc, DEFAULT_TIMESTAMP_FORMAT);
        assert!(rows.is_empty());
    }

    #[test]
    fn test_cells_follow_header_order() {
        let rows = flatten_sales(&sample_sales(), &Utc, DEFAULT_TIMESTAMP_FORMAT);
        let cells = rows[0].cells();

        assert_eq!(cells.len(), EXPORT_COLUMNS.len());
        assert_eq!(cells[1], ExportCell::Text("CASH"));
        assert_eq!(cells[3], ExportCell::Number(2.0));
        assert_eq!(cells[4], ExportCell::Number(1500.0));
        assert_eq!(cells[5], ExportCell::Number(3000.0));
        assert_eq!(cells[6], ExportCell::Number(9000.0));
    }

    #[test]
    fn test_report_file_name() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert_eq!(
            report_file_name(DEFAULT_FILE_PREFIX, date),
            "Reporte_Ventas_2026-10-16.xlsx"
        );
    }
}
