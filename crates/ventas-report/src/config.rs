//! # Report Configuration
//!
//! Settings for the end-of-day spreadsheet and the dashboard's initial
//! selection.
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     VENTAS_OUTPUT_DIR=/srv/reportes                                    │
//! │     VENTAS_DATE_RANGE=today                                            │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     ~/.config/ventas-pos/report.toml (Linux)                           │
//! │     ~/Library/Application Support/com.ventas.pos/report.toml (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! │     "Ventas del Día" sheet, Reporte_Ventas prefix, week / ALL          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! # report.toml
//! [export]
//! output_dir = "/srv/reportes"
//! sheet_name = "Ventas del Día"
//! file_prefix = "Reporte_Ventas"
//! timestamp_format = "%d/%m/%Y %H:%M:%S"
//!
//! [dashboard]
//! date_range = "week"      # today | week | month | all
//! payment_filter = "ALL"   # ALL | CASH | CARD | NEQUI
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tracing::{debug, info, warn};
use ventas_core::validation::{
    validate_file_prefix, validate_sheet_name, validate_timestamp_format,
};
use ventas_core::{
    DateRange, PaymentFilter, SalesFilter, DEFAULT_FILE_PREFIX, DEFAULT_SHEET_NAME,
    DEFAULT_TIMESTAMP_FORMAT,
};

use crate::error::{ReportError, ReportResult};

// =============================================================================
// Export Settings
// =============================================================================

/// Where and how the end-of-day spreadsheet is written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSettings {
    /// Directory the .xlsx file is written into.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Worksheet name.
    #[serde(default = "default_sheet_name")]
    pub sheet_name: String,

    /// File name prefix; `_<YYYY-MM-DD>.xlsx` is appended.
    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// strftime layout of the "Fecha" column.
    #[serde(default = "default_timestamp_format")]
    pub timestamp_format: String,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_sheet_name() -> String {
    DEFAULT_SHEET_NAME.to_string()
}

fn default_file_prefix() -> String {
    DEFAULT_FILE_PREFIX.to_string()
}

fn default_timestamp_format() -> String {
    DEFAULT_TIMESTAMP_FORMAT.to_string()
}

impl Default for ExportSettings {
    fn default() -> Self {
        ExportSettings {
            output_dir: default_output_dir(),
            sheet_name: default_sheet_name(),
            file_prefix: default_file_prefix(),
            timestamp_format: default_timestamp_format(),
        }
    }
}

// =============================================================================
// Dashboard Settings
// =============================================================================

/// Selection the sales history screen opens with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSettings {
    #[serde(default = "default_date_range")]
    pub date_range: DateRange,

    #[serde(default)]
    pub payment_filter: PaymentFilter,
}

fn default_date_range() -> DateRange {
    DateRange::Week
}

impl Default for DashboardSettings {
    fn default() -> Self {
        DashboardSettings {
            date_range: default_date_range(),
            payment_filter: PaymentFilter::All,
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete report configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default)]
    pub export: ExportSettings,

    #[serde(default)]
    pub dashboard: DashboardSettings,
}

impl ReportConfig {
    /// Loads configuration from file and environment.
    ///
    /// ## Loading Order
    /// 1. Start with defaults
    /// 2. Load from TOML file (if exists)
    /// 3. Override with environment variables
    /// 4. Validate
    pub fn load(config_path: Option<PathBuf>) -> ReportResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading report config from file");
                let contents =
                    std::fs::read_to_string(&path).map_err(|e| ReportError::io(&path, e))?;
                config = toml::from_str(&contents)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load report config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Saves configuration to file.
    pub fn save(&self, config_path: Option<PathBuf>) -> ReportResult<()> {
        let path = config_path
            .or_else(Self::default_config_path)
            .ok_or_else(|| ReportError::ConfigSaveFailed("No config path available".into()))?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| ReportError::io(parent, e))?;
        }

        let contents = toml::to_string_pretty(self)?;
        std::fs::write(&path, contents).map_err(|e| ReportError::io(&path, e))?;

        info!(?path, "Report config saved");
        Ok(())
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ReportResult<()> {
        validate_sheet_name(&self.export.sheet_name)?;
        validate_file_prefix(&self.export.file_prefix)?;
        validate_timestamp_format(&self.export.timestamp_format)?;

        if self.export.output_dir.as_os_str().is_empty() {
            return Err(ReportError::InvalidConfig(
                "output_dir must not be empty".into(),
            ));
        }

        Ok(())
    }

    /// Applies environment variable overrides.
    fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| std::env::var(key).ok());
    }

    fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("VENTAS_OUTPUT_DIR") {
            debug!(output_dir = %dir, "Overriding output directory from environment");
            self.export.output_dir = PathBuf::from(dir);
        }

        if let Some(name) = lookup("VENTAS_SHEET_NAME") {
            self.export.sheet_name = name;
        }

        if let Some(prefix) = lookup("VENTAS_FILE_PREFIX") {
            self.export.file_prefix = prefix;
        }

        if let Some(format) = lookup("VENTAS_TIMESTAMP_FORMAT") {
            self.export.timestamp_format = format;
        }

        if let Some(range) = lookup("VENTAS_DATE_RANGE") {
            debug!(range = %range, "Overriding date range from environment");
            self.dashboard.date_range = DateRange::parse(&range);
        }

        if let Some(payment) = lookup("VENTAS_PAYMENT_FILTER") {
            match payment.parse() {
                Ok(parsed) => self.dashboard.payment_filter = parsed,
                Err(e) => warn!("Ignoring VENTAS_PAYMENT_FILTER: {}", e),
            }
        }
    }

    /// Returns the default config file path.
    fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "ventas", "pos")
            .map(|dirs| dirs.config_dir().join("report.toml"))
    }

    // =========================================================================
    // Convenience Methods
    // =========================================================================

    /// The selection the dashboard opens with.
    pub fn initial_selection(&self) -> SalesFilter {
        SalesFilter::new(self.dashboard.date_range, self.dashboard.payment_filter)
    }
}
