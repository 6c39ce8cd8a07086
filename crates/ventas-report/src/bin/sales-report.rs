//! # Sales Report
//!
//! Prints the sales history dashboard for a JSON sale file and optionally
//! writes the end-of-day spreadsheet. The day is never closed from here.
//!
//! ## Usage
//! ```bash
//! # Dashboard for the configured default selection
//! cargo run -p ventas-report --bin sales-report -- --sales ./ventas.json
//!
//! # Today's cash sales, plus the spreadsheet
//! cargo run -p ventas-report --bin sales-report -- --sales ./ventas.json \
//!     --range today --payment CASH --export
//! ```

use chrono::Local;
use std::env;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;
use ventas_core::DateRange;
use ventas_report::{
    export_filtered, JsonFileHistory, ReportConfig, SaleHistory, SalesDashboard, XlsxReportWriter,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut sales_path: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut range: Option<String> = None;
    let mut payment: Option<String> = None;
    let mut export = false;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--sales" | "-s" => {
                if i + 1 < args.len() {
                    sales_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--config" | "-c" => {
                if i + 1 < args.len() {
                    config_path = Some(PathBuf::from(&args[i + 1]));
                    i += 1;
                }
            }
            "--range" | "-r" => {
                if i + 1 < args.len() {
                    range = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--payment" | "-p" => {
                if i + 1 < args.len() {
                    payment = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--export" | "-e" => export = true,
            "--help" | "-h" => {
                print_help();
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let Some(sales_path) = sales_path else {
        print_help();
        return Err("missing --sales <FILE>".into());
    };

    let config = ReportConfig::load(config_path)?;

    let mut selection = config.initial_selection();
    if let Some(range) = range {
        selection.range = DateRange::parse(&range);
    }
    if let Some(payment) = payment {
        selection.payment_filter = payment.parse()?;
    }

    let history = JsonFileHistory::open(&sales_path).await?;
    let sales = history.current_sales();
    let now = Local::now();

    let dashboard = SalesDashboard::build(&sales, selection, &now);
    println!("{}", serde_json::to_string_pretty(&dashboard)?);

    if export {
        let writer = XlsxReportWriter::new(&config.export.output_dir);
        let report = export_filtered(&writer, &config.export, &sales, &selection, &now)?;
        info!(path = ?report.artifact.path, rows = report.artifact.rows, "Spreadsheet exported");
    }

    Ok(())
}

fn print_help() {
    println!("Ventas POS Sales Report");
    println!();
    println!("Usage: sales-report --sales <FILE> [OPTIONS]");
    println!();
    println!("Options:");
    println!("  -s, --sales <FILE>      JSON array of sales (required)");
    println!("  -r, --range <RANGE>     today | week | month | all (default: from config)");
    println!("  -p, --payment <METHOD>  ALL | CASH | CARD | NEQUI (default: from config)");
    println!("  -c, --config <PATH>     Config file (default: platform config dir)");
    println!("  -e, --export            Also write the .xlsx report");
    println!("  -h, --help              Show this help message");
}

/// Logs go to stderr so stdout stays valid JSON.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - Default: INFO, debug for the ventas crates
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,ventas=debug"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
