//! Error types for the shopport transformation pipelines.
//!
//! This module defines a hierarchy of error types:
//!
//! - [`CsvError`] - CSV reading/parsing errors
//! - [`ShapeError`] - product shaping errors
//! - [`SanitizeError`] - content sanitizer errors
//! - [`PipelineError`] - top-level orchestration errors
//!
//! Error conversion is automatic via `From` implementations,
//! allowing `?` to work across error boundaries. Every error is
//! file-scoped: the batch loops catch them, report, and move on to
//! the next input file.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// CSV Parsing Errors
// =============================================================================

/// Errors during CSV parsing.
#[derive(Debug, Error)]
pub enum CsvError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to decode content.
    #[error("Failed to decode content as {0}")]
    EncodingError(String),

    /// Invalid CSV format.
    #[error("Invalid CSV format: {0}")]
    ParseError(#[from] csv::Error),

    /// Empty file.
    #[error("CSV file is empty")]
    EmptyFile,

    /// No headers found.
    #[error("No headers found in CSV")]
    NoHeaders,
}

// =============================================================================
// Product Shaping Errors
// =============================================================================

/// Errors while assembling products from grouped rows.
#[derive(Debug, Error)]
pub enum ShapeError {
    /// A column the shaper requires is absent from the table.
    #[error("Missing column: {0}")]
    MissingColumn(String),

    /// A price cell could not be parsed as a number.
    #[error("Invalid price value '{value}' for handle '{handle}'")]
    InvalidPrice { handle: String, value: String },
}

// =============================================================================
// Sanitizer Errors
// =============================================================================

/// Errors from the content sanitizer.
#[derive(Debug, Error)]
pub enum SanitizeError {
    /// Input file does not exist.
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// The designated text column is absent.
    #[error("Column '{column}' not found. Available columns: {}", .available.join(", "))]
    MissingColumn {
        column: String,
        available: Vec<String>,
    },

    /// The configured element list does not form a valid selector.
    #[error("Invalid strip-tag selector: {0}")]
    Selector(String),

    /// CSV error while reading or rewriting the table.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// IO failure writing the file back.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level orchestration errors.
///
/// This is the main error type returned by the per-file entry points in
/// [`crate::transform::pipeline`] and [`crate::sanitize`].
#[derive(Debug, Error)]
pub enum PipelineError {
    /// CSV parsing error.
    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    /// Product shaping error.
    #[error("Shape error: {0}")]
    Shape(#[from] ShapeError),

    /// Sanitizer error.
    #[error("Sanitize error: {0}")]
    Sanitize(#[from] SanitizeError),

    /// IO failure outside of CSV parsing (output file, directory scan).
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for CSV operations.
pub type CsvResult<T> = Result<T, CsvError>;

/// Result type for shaping operations.
pub type ShapeResult<T> = Result<T, ShapeError>;

/// Result type for sanitizer operations.
pub type SanitizeResult<T> = Result<T, SanitizeError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_conversion_chain() {
        // CsvError -> PipelineError
        let csv_err = CsvError::EmptyFile;
        let pipeline_err: PipelineError = csv_err.into();
        assert!(pipeline_err.to_string().contains("empty"));

        // ShapeError -> PipelineError
        let shape_err = ShapeError::MissingColumn("Handle".into());
        let pipeline_err: PipelineError = shape_err.into();
        assert!(pipeline_err.to_string().contains("Handle"));
    }

    #[test]
    fn test_missing_column_lists_available() {
        let err = SanitizeError::MissingColumn {
            column: "Body (HTML)".into(),
            available: vec!["Handle".into(), "Title".into()],
        };
        let msg = err.to_string();
        assert!(msg.contains("Body (HTML)"));
        assert!(msg.contains("Handle, Title"));
    }

    #[test]
    fn test_invalid_price_format() {
        let err = ShapeError::InvalidPrice {
            handle: "blue-shirt".into(),
            value: "abc".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("blue-shirt"));
        assert!(msg.contains("abc"));
    }
}
