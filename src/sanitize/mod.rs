//! Content sanitizer: in-place cleanup of one HTML-bearing CSV column.
//!
//! The designated column of each row runs through four passes: tag
//! stripping ([`html`]), literal replacements, range removal, and cutoff
//! truncation ([`text`]). Every other cell is left byte-for-byte alone.
//! The whole table is transformed in memory and only then written back,
//! so any failure leaves the original file untouched.

pub mod html;
pub mod text;

use std::fs;
use std::path::Path;

use scraper::Selector;

use crate::config::SanitizerConfig;
use crate::error::{PipelineResult, SanitizeError, SanitizeResult};
use crate::logs::{log_error, log_info, log_success};
use crate::parser::read_table;
use crate::transform::pipeline::csv_inputs;

pub use html::{build_selector, strip_elements};
pub use text::{apply_replacements, remove_ranges, truncate_at_markers};

/// Result of sanitizing one file.
#[derive(Debug, Clone)]
pub struct SanitizeReport {
    /// Rows in the table.
    pub rows: usize,
    /// Rows whose designated cell changed.
    pub changed: usize,
}

/// Result of a directory batch.
#[derive(Debug, Clone)]
pub struct CleanBatchSummary {
    pub succeeded: usize,
    pub failed: usize,
}

/// Run the full cleanup chain over a single cell value.
pub fn sanitize_cell(value: &str, selector: &Selector, config: &SanitizerConfig) -> String {
    if value.is_empty() {
        return String::new();
    }

    let stripped = html::strip_elements(value, selector);
    if stripped.is_empty() {
        return stripped;
    }

    let replaced = text::apply_replacements(&stripped, &config.replacements);
    let removed = text::remove_ranges(&replaced, &config.remove_ranges);
    text::truncate_at_markers(&removed, &config.cutoff_markers)
}

/// Sanitize the designated column of a CSV file in place.
///
/// The rewrite happens only after every row has been transformed; a
/// missing column or any read error aborts with the file unmodified.
pub fn sanitize_file(path: &Path, config: &SanitizerConfig) -> SanitizeResult<SanitizeReport> {
    if !path.exists() {
        return Err(SanitizeError::FileNotFound(path.to_path_buf()));
    }

    let selector = html::build_selector(&config.strip_tags)?;
    let mut table = read_table(path)?;

    let column = table.column_index(&config.column).ok_or_else(|| {
        SanitizeError::MissingColumn {
            column: config.column.clone(),
            available: table.headers.clone(),
        }
    })?;

    log_info(format!(
        "Found {} rows; rewriting only '{}'",
        table.rows.len(),
        config.column
    ));

    let mut changed = 0;
    for row in &mut table.rows {
        // Short rows have no cell in this column; nothing to rewrite.
        let Some(cell) = row.get_mut(column) else {
            continue;
        };
        let cleaned = sanitize_cell(cell, &selector, config);
        if cleaned != *cell {
            *cell = cleaned;
            changed += 1;
        }
    }

    let output = table.to_csv_string()?;
    fs::write(path, output)?;

    log_success(format!("Rewrote {} of {} rows", changed, table.rows.len()));

    Ok(SanitizeReport {
        rows: table.rows.len(),
        changed,
    })
}

/// Sanitize every export in a directory, in place, continuing past
/// per-file failures.
pub fn sanitize_directory(
    dir: &Path,
    config: &SanitizerConfig,
) -> PipelineResult<CleanBatchSummary> {
    let inputs = csv_inputs(dir)?;

    let mut summary = CleanBatchSummary {
        succeeded: 0,
        failed: 0,
    };

    for input in inputs {
        log_info(format!("Cleaning: {}", input.display()));
        match sanitize_file(&input, config) {
            Ok(_) => summary.succeeded += 1,
            Err(e) => {
                summary.failed += 1;
                log_error(format!("Failed on {}: {}", input.display(), e));
            }
        }
    }

    Ok(summary)
}
