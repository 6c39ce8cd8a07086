//! # Report Error Types
//!
//! Error types for export and daily closing operations.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Report Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Sale History  │  │     Closing             │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidConfig  │  │  Io             │  │  InvalidTransition      │ │
//! │  │  ConfigLoad     │  │  InvalidHistory │  │  Spreadsheet            │ │
//! │  │  ConfigSave     │  │                 │  │  CloseFailed            │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;
use thiserror::Error;
use ventas_core::{CoreError, ValidationError};

/// Result type alias for report operations.
pub type ReportResult<T> = Result<T, ReportError>;

/// Failure reported by the external "close the day" operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct CloseError(pub String);

impl CloseError {
    pub fn new(message: impl Into<String>) -> Self {
        CloseError(message.into())
    }
}

/// Report error type covering configuration, I/O and the closing workflow.
#[derive(Debug, Error)]
pub enum ReportError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// Invalid report configuration.
    #[error("Invalid report configuration: {0}")]
    InvalidConfig(String),

    /// Failed to load config file.
    #[error("Failed to load config: {0}")]
    ConfigLoadFailed(String),

    /// Failed to save config file.
    #[error("Failed to save config: {0}")]
    ConfigSaveFailed(String),

    // =========================================================================
    // Sale History Errors
    // =========================================================================
    /// Reading or writing a file failed.
    #[error("I/O error on {}: {message}", .path.display())]
    Io { path: PathBuf, message: String },

    /// The sale history file is not a JSON array of sales.
    #[error("Invalid sale history: {0}")]
    InvalidHistory(String),

    // =========================================================================
    // Closing Errors
    // =========================================================================
    /// The spreadsheet could not be produced.
    #[error("Spreadsheet error: {0}")]
    Spreadsheet(String),

    /// Operation not allowed in the workflow's current state.
    #[error("Cannot {action} while the daily closing is {state}")]
    InvalidTransition { state: String, action: String },

    /// The report was written but the day could not be closed.
    #[error("Report saved to {} but closing the day failed: {source}", .artifact.display())]
    CloseFailed {
        artifact: PathBuf,
        #[source]
        source: CloseError,
    },

    // =========================================================================
    // Domain Errors
    // =========================================================================
    /// Error from ventas-core.
    #[error(transparent)]
    Core(#[from] CoreError),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<ValidationError> for ReportError {
    fn from(err: ValidationError) -> Self {
        ReportError::InvalidConfig(err.to_string())
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::InvalidHistory(err.to_string())
    }
}

impl From<toml::de::Error> for ReportError {
    fn from(err: toml::de::Error) -> Self {
        ReportError::ConfigLoadFailed(err.to_string())
    }
}

impl From<toml::ser::Error> for ReportError {
    fn from(err: toml::ser::Error) -> Self {
        ReportError::ConfigSaveFailed(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for ReportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ReportError::Spreadsheet(err.to_string())
    }
}

impl ReportError {
    /// Wraps an I/O error with the path it happened on.
    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        ReportError::Io {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            ReportError::InvalidConfig(_)
                | ReportError::ConfigLoadFailed(_)
                | ReportError::ConfigSaveFailed(_)
        )
    }

    /// The report left on disk, if the failure happened after writing it.
    pub fn artifact(&self) -> Option<&PathBuf> {
        match self {
            ReportError::CloseFailed { artifact, .. } => Some(artifact),
            _ => None,
        }
    }
}
