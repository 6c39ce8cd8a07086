//! # XLSX Report Writer
//!
//! Writes export rows into a single-sheet workbook.
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────────┐
//! │ Ventas del Día                                                        │
//! ├──────────┬──────────────┬──────────┬──────────┬─────────┬─────┬──────┤
//! │ Fecha    │ Método de p. │ Producto │ Cantidad │ Precio  │ Sub │ Tot  │ ◄ bold
//! ├──────────┼──────────────┼──────────┼──────────┼─────────┼─────┼──────┤
//! │ text     │ text         │ text     │ number   │ number  │ num │ num  │
//! └──────────┴──────────────┴──────────┴──────────┴─────────┴─────┴──────┘
//! ```

use rust_xlsxwriter::{Format, Workbook};
use std::path::PathBuf;
use tracing::info;
use ventas_core::{ExportCell, ExportRow, EXPORT_COLUMNS};

use crate::collaborators::{ReportArtifact, SpreadsheetWriter};
use crate::error::{ReportError, ReportResult};

const COLUMN_WIDTH: f64 = 18.0;

/// [`SpreadsheetWriter`] producing `.xlsx` files in a fixed directory.
#[derive(Debug, Clone)]
pub struct XlsxReportWriter {
    output_dir: PathBuf,
}

impl XlsxReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        XlsxReportWriter {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &PathBuf {
        &self.output_dir
    }
}

impl SpreadsheetWriter for XlsxReportWriter {
    fn write_report(
        &self,
        sheet_name: &str,
        rows: &[ExportRow],
        file_name: &str,
    ) -> ReportResult<ReportArtifact> {
        std::fs::create_dir_all(&self.output_dir)
            .map_err(|e| ReportError::io(&self.output_dir, e))?;

        let mut workbook = Workbook::new();
        let header = Format::new().set_bold();

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet_name)?;

        for (col, title) in EXPORT_COLUMNS.iter().enumerate() {
            let col = col as u16;
            worksheet.write_string_with_format(0, col, *title, &header)?;
            worksheet.set_column_width(col, COLUMN_WIDTH)?;
        }

        for (index, row) in rows.iter().enumerate() {
            let row_num = index as u32 + 1;
            for (col, cell) in row.cells().into_iter().enumerate() {
                let col = col as u16;
                match cell {
                    ExportCell::Text(text) => worksheet.write_string(row_num, col, text)?,
                    ExportCell::Number(value) => worksheet.write_number(row_num, col, value)?,
                };
            }
        }

        let path = self.output_dir.join(file_name);
        workbook.save(&path)?;

        info!(?path, rows = rows.len(), "Sales report written");

        Ok(ReportArtifact {
            path,
            rows: rows.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use ventas_core::{flatten_sales, LineItem, PaymentMethod, Sale, DEFAULT_TIMESTAMP_FORMAT};

    fn rows() -> Vec<ExportRow> {
        let sale = Sale::new(
            "v-1",
            "2026-10-16T09:00:00Z",
            PaymentMethod::Cash,
            vec![LineItem::new("Tinto", 1500.0, 2), LineItem::new("Pandebono", 2000.0, 1)],
            5000.0,
        );
        flatten_sales([&sale], &Utc, DEFAULT_TIMESTAMP_FORMAT)
    }

    #[test]
    fn test_writes_workbook() {
        let dir = tempfile::tempdir().unwrap();
        let writer = XlsxReportWriter::new(dir.path().join("reportes"));

        let artifact = writer
            .write_report("Ventas del Día", &rows(), "Reporte_Ventas_2026-10-16.xlsx")
            .unwrap();

        assert_eq!(artifact.rows, 2);
        assert_eq!(
            artifact.path,
            dir.path().join("reportes").join("Reporte_Ventas_2026-10-16.xlsx")
        );

        // .xlsx is a zip container
        let bytes = std::fs::read(&artifact.path).unwrap();
        assert!(bytes.starts_with(b"PK"));
    }

    #[test]
    fn test_empty_rows_still_write_header() {
        let dir = tempfile::tempdir().unwrap();
        let writer = XlsxReportWriter::new(dir.path());

        let artifact = writer
            .write_report("Ventas del Día", &[], "vacio.xlsx")
            .unwrap();
        assert_eq!(artifact.rows, 0);
        assert!(artifact.path.exists());
    }

    #[test]
    fn test_rejected_sheet_name() {
        let dir = tempfile::tempdir().unwrap();
        let writer = XlsxReportWriter::new(dir.path());

        let err = writer
            .write_report(&"x".repeat(40), &rows(), "largo.xlsx")
            .unwrap_err();
        assert!(matches!(err, ReportError::Spreadsheet(_)));
        assert!(!dir.path().join("largo.xlsx").exists());
    }
}
