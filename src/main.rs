//! Shopport CLI - Convert Shopify exports and clean product content
//!
//! # Main Commands
//!
//! ```bash
//! shopport export [dir]            # Convert every CSV in a directory
//! shopport shape input.csv         # Convert one CSV to product JSON
//! shopport clean-all [dir]         # Clean Body (HTML) in every CSV, in place
//! shopport clean input.csv         # Clean one CSV in place
//! ```
//!
//! # Debug Commands
//!
//! ```bash
//! shopport parse input.csv         # Just parse CSV to JSON rows
//! ```

use clap::{Parser, Subcommand};
use shopport::{
    parse_csv_file_auto, sanitize_directory, sanitize_file, shape_directory, shape_file,
    SanitizerConfig, ShaperConfig, ThreadRandom,
};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "shopport")]
#[command(about = "Convert Shopify CSV exports to WooCommerce product JSON", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a CSV file and output its rows as JSON
    Parse {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert one CSV export to a product JSON array
    Shape {
        /// Input CSV file
        input: PathBuf,

        /// Output file (default: input name with .json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert every CSV export in a directory into a timestamped output directory
    Export {
        /// Directory to scan (default: current directory)
        #[arg(default_value = ".")]
        dir: PathBuf,
    },

    /// Clean the Body (HTML) column of one CSV, in place
    Clean {
        /// Input CSV file
        input: PathBuf,
    },

    /// Clean the Body (HTML) column of every CSV in a directory, in place
    CleanAll {
        /// Directory to scan (default: current directory)
        #[arg(default_value = ".")]
        dir: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Parse { input, output } => cmd_parse(&input, output.as_deref()),
        Commands::Shape { input, output } => cmd_shape(&input, output.as_deref()),
        Commands::Export { dir } => cmd_export(&dir),
        Commands::Clean { input } => cmd_clean(&input),
        Commands::CleanAll { dir } => cmd_clean_all(&dir),
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_parse(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Parsing CSV: {}", input.display());

    let result = parse_csv_file_auto(input)?;

    eprintln!("   Encoding: {}", result.encoding);
    eprintln!("   Delimiter: '{}'", format_delimiter(result.delimiter));
    eprintln!("   Columns: {}", result.headers.join(", "));
    eprintln!("✅ Parsed {} records", result.records.len());

    let json = serde_json::to_string_pretty(&result.records)?;
    write_output(&json, output)?;

    Ok(())
}

fn cmd_shape(input: &Path, output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📄 Processing: {}", input.display());

    let output = match output {
        Some(p) => p.to_path_buf(),
        None => input.with_extension("json"),
    };

    let summary = shape_file(input, &output, &ShaperConfig::default(), &mut ThreadRandom)?;

    eprintln!(
        "✨ {} products from {} rows -> {}",
        summary.products,
        summary.rows,
        summary.output.display()
    );
    Ok(())
}

fn cmd_export(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("📦 Converting exports in: {}", dir.display());

    let summary = shape_directory(dir, &ShaperConfig::default(), &mut ThreadRandom)?;

    eprintln!(
        "✨ Done: {} converted, {} failed, output in {}",
        summary.succeeded,
        summary.failed,
        summary.output_dir.display()
    );
    Ok(())
}

fn cmd_clean(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("🧹 Cleaning: {}", input.display());

    let report = sanitize_file(input, &SanitizerConfig::default())?;

    eprintln!("✨ Rewrote {} of {} rows", report.changed, report.rows);
    Ok(())
}

fn cmd_clean_all(dir: &Path) -> Result<(), Box<dyn std::error::Error>> {
    eprintln!("🧹 Cleaning exports in: {}", dir.display());

    let summary = sanitize_directory(dir, &SanitizerConfig::default())?;

    eprintln!("✨ Done: {} cleaned, {} failed", summary.succeeded, summary.failed);
    Ok(())
}

fn format_delimiter(d: char) -> String {
    match d {
        '\t' => "\\t".to_string(),
        c => c.to_string(),
    }
}

fn write_output(content: &str, path: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    match path {
        Some(p) => {
            fs::write(p, content)?;
            eprintln!("💾 Output written to: {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
