//! # Error Types
//!
//! Domain-specific error types for ventas-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  ventas-core errors (this file)                                        │
//! │  ├── CoreError        - Parsing user selections                        │
//! │  └── ValidationError  - Report setting validation failures             │
//! │                                                                         │
//! │  ventas-report errors (separate crate)                                 │
//! │  └── ReportError      - Config, files, spreadsheet, closing call       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ReportError → caller              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Note what is NOT here: malformed sale dates and totals. Those are coerced
//! (invalid date = excluded, non-numeric total = 0) and never surface as errors.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Payment method text that is not CASH, CARD or NEQUI.
    ///
    /// ## When This Occurs
    /// - A `--payment` CLI flag or config value with a typo
    /// - A payment filter coming from an outdated frontend build
    #[error("Unknown payment method: '{0}'. Valid options: ALL, CASH, CARD, NEQUI")]
    UnknownPaymentMethod(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors for report settings.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g., forbidden characters, bad strftime string).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::UnknownPaymentMethod("BITCOIN".to_string());
        assert_eq!(
            err.to_string(),
            "Unknown payment method: 'BITCOIN'. Valid options: ALL, CASH, CARD, NEQUI"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "sheet_name".to_string(),
        };
        assert_eq!(err.to_string(), "sheet_name is required");

        let err = ValidationError::TooLong {
            field: "sheet_name".to_string(),
            max: 31,
        };
        assert_eq!(err.to_string(), "sheet_name must be at most 31 characters");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "file_prefix".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
