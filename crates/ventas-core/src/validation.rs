//! # Validation Module
//!
//! Checks for the report settings a store can change (sheet name, file
//! prefix, timestamp layout).
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: report.toml / VENTAS_* environment                           │
//! │  └── Deserialized into ReportConfig                                    │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: ReportConfig::validate (ventas-report)                       │
//! │  └── THIS MODULE: sheet name, prefix and timestamp rules               │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Spreadsheet writer                                           │
//! │  └── Rejects anything the workbook format itself forbids               │
//! │                                                                         │
//! │  Catching bad settings at load time means the close-day flow never     │
//! │  discovers them halfway through.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use ventas_core::validation::{validate_sheet_name, validate_timestamp_format};
//!
//! assert!(validate_sheet_name("Ventas del Día").is_ok());
//! assert!(validate_sheet_name("Ventas [hoy]").is_err());
//! assert!(validate_timestamp_format("%d/%m/%Y %H:%M").is_ok());
//! ```

use chrono::format::{Item, StrftimeItems};

use crate::error::ValidationError;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest worksheet name a workbook accepts.
pub const MAX_SHEET_NAME_LEN: usize = 31;

const FORBIDDEN_SHEET_CHARS: &[char] = &['[', ']', ':', '*', '?', '/', '\\'];

/// Validates a worksheet name.
///
/// ## Rules
/// - Must not be empty
/// - At most 31 characters
/// - None of `[ ] : * ? / \`
/// - Must not start or end with an apostrophe
pub fn validate_sheet_name(name: &str) -> ValidationResult<()> {
    if name.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "sheet_name".to_string(),
        });
    }

    if name.chars().count() > MAX_SHEET_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "sheet_name".to_string(),
            max: MAX_SHEET_NAME_LEN,
        });
    }

    if name.contains(FORBIDDEN_SHEET_CHARS) {
        return Err(ValidationError::InvalidFormat {
            field: "sheet_name".to_string(),
            reason: "must not contain [ ] : * ? / \\".to_string(),
        });
    }

    if name.starts_with('\'') || name.ends_with('\'') {
        return Err(ValidationError::InvalidFormat {
            field: "sheet_name".to_string(),
            reason: "must not start or end with an apostrophe".to_string(),
        });
    }

    Ok(())
}

/// Validates the report file name prefix.
///
/// The prefix lands in a file name inside the output directory, so path
/// separators and parent references are rejected.
pub fn validate_file_prefix(prefix: &str) -> ValidationResult<()> {
    let prefix = prefix.trim();

    if prefix.is_empty() {
        return Err(ValidationError::Required {
            field: "file_prefix".to_string(),
        });
    }

    if prefix.contains(['/', '\\']) || prefix.contains("..") {
        return Err(ValidationError::InvalidFormat {
            field: "file_prefix".to_string(),
            reason: "must be a plain file name without path separators".to_string(),
        });
    }

    Ok(())
}

/// True when `format` is a strftime string chrono can render.
pub fn is_valid_timestamp_format(format: &str) -> bool {
    !format.is_empty() && !StrftimeItems::new(format).any(|item| matches!(item, Item::Error))
}

/// Validates the "Fecha" column layout.
pub fn validate_timestamp_format(format: &str) -> ValidationResult<()> {
    if format.is_empty() {
        return Err(ValidationError::Required {
            field: "timestamp_format".to_string(),
        });
    }

    if !is_valid_timestamp_format(format) {
        return Err(ValidationError::InvalidFormat {
            field: "timestamp_format".to_string(),
            reason: format!("'{}' is not a valid strftime format", format),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
