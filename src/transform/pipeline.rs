//! Shaper orchestration: per-file conversion and directory batches.
//!
//! One CSV in, one JSON array out. Batch runs scan a directory for
//! exports (skipping `.csv.backup` copies), write every converted file
//! into a freshly created timestamped directory, and keep going when a
//! single file fails: every error here is file-scoped.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::config::ShaperConfig;
use crate::error::PipelineResult;
use crate::logs::{log_error, log_info, log_success};
use crate::parser::parse_csv_file_auto;
use crate::rng::RandomSource;
use crate::transform::shaper::shape_products;

/// Result of converting one file.
#[derive(Debug, Clone)]
pub struct ShapeSummary {
    /// Products emitted.
    pub products: usize,
    /// Rows read from the source table.
    pub rows: usize,
    /// Where the JSON landed.
    pub output: PathBuf,
}

/// Result of a directory batch.
#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
    /// The timestamped directory holding the JSON files.
    pub output_dir: PathBuf,
}

/// Convert one export file to a product JSON array.
///
/// The output file is written only after the full product list has been
/// assembled, so a mid-transformation failure leaves no partial output.
pub fn shape_file(
    input: &Path,
    output: &Path,
    config: &ShaperConfig,
    rng: &mut dyn RandomSource,
) -> PipelineResult<ShapeSummary> {
    let parse_result = parse_csv_file_auto(input)?;
    log_info(format!(
        "Read {} rows ({}, '{}')",
        parse_result.records.len(),
        parse_result.encoding,
        format_delimiter(parse_result.delimiter),
    ));

    let records = shape_products(&parse_result.records, config, rng)?;

    let json = serde_json::to_string_pretty(&records)?;
    fs::write(output, json)?;

    log_success(format!("Generated {} products", records.len()));

    Ok(ShapeSummary {
        products: records.len(),
        rows: parse_result.records.len(),
        output: output.to_path_buf(),
    })
}

/// Convert every export in a directory, one JSON file per input, into a
/// new `product-<timestamp>` directory next to the inputs.
pub fn shape_directory(
    dir: &Path,
    config: &ShaperConfig,
    rng: &mut dyn RandomSource,
) -> PipelineResult<BatchSummary> {
    let inputs = csv_inputs(dir)?;

    let output_dir = dir.join(format!("product-{}", Local::now().format("%Y%m%d%H%M%S")));
    fs::create_dir_all(&output_dir)?;

    let mut summary = BatchSummary {
        succeeded: 0,
        failed: 0,
        output_dir: output_dir.clone(),
    };

    for input in inputs {
        let stem = input
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("output");
        let output = output_dir.join(format!("{}.json", stem));

        log_info(format!("Processing: {} -> {}", input.display(), output.display()));
        match shape_file(&input, &output, config, rng) {
            Ok(_) => summary.succeeded += 1,
            Err(e) => {
                summary.failed += 1;
                log_error(format!("Failed on {}: {}", input.display(), e));
            }
        }
    }

    Ok(summary)
}

/// Export files in a directory: `.csv`, excluding `.csv.backup` copies,
/// in directory-listing order.
pub fn csv_inputs(dir: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.ends_with(".csv") && !name.ends_with(".csv.backup") {
            inputs.push(entry.path());
        }
    }
    Ok(inputs)
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}
