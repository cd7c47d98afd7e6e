//! # Shopport - Shopify export conversion and cleanup
//!
//! Shopport turns Shopify product-export CSV files into the JSON product
//! schema consumed by a WooCommerce importer, and separately scrubs the
//! HTML-bearing description column of an export in place.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌──────────────┐
//! │  CSV export │────▶│   Parser    │────▶│   Shaper    │────▶│ product JSON │
//! │  (auto-enc) │     │ (row maps)  │     │ (by Handle) │     │  (1 file ea) │
//! └─────────────┘     └─────────────┘     └─────────────┘     └──────────────┘
//!
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌──────────────┐
//! │  CSV export │────▶│   Parser    │────▶│  Sanitizer  │────▶│  same file,  │
//! │             │     │  (table)    │     │ (one column)│     │   in place   │
//! └─────────────┘     └─────────────┘     └─────────────┘     └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use shopport::{shape_file, ShaperConfig, ThreadRandom};
//! use std::path::Path;
//!
//! fn main() {
//!     let summary = shape_file(
//!         Path::new("export.csv"),
//!         Path::new("export.json"),
//!         &ShaperConfig::default(),
//!         &mut ThreadRandom,
//!     )
//!     .unwrap();
//!     println!("{} products", summary.products);
//! }
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`config`] - Static configuration structures
//! - [`models`] - Product wire schema
//! - [`parser`] - CSV parsing with auto-detection
//! - [`transform`] - Grouping, price adjustment, shaping, pipeline
//! - [`sanitize`] - In-place HTML/text cleanup
//! - [`rng`] - Injectable randomness
//! - [`logs`] - Progress logging

// Core modules
pub mod config;
pub mod error;
pub mod logs;
pub mod models;
pub mod rng;

// Parsing
pub mod parser;

// Product shaping
pub mod transform;

// Content cleanup
pub mod sanitize;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{CsvError, PipelineError, SanitizeError, ShapeError};

// =============================================================================
// Re-exports - Configuration
// =============================================================================

pub use config::{SanitizerConfig, ShaperConfig};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{Attribute, Image, Product, ProductRecord, Variation, VariationAttribute};

// =============================================================================
// Re-exports - CSV Parsing
// =============================================================================

pub use parser::{
    detect_delimiter,
    detect_encoding,
    parse_bytes_auto,
    parse_csv,
    parse_csv_file_auto,
    read_table,
    ParseResult,
    Table,
};

// =============================================================================
// Re-exports - Shaper
// =============================================================================

pub use transform::{
    adjust_price,
    group_by_handle,
    shape_directory,
    shape_file,
    shape_products,
    slugify,
    BatchSummary,
    ShapeSummary,
};

// =============================================================================
// Re-exports - Sanitizer
// =============================================================================

pub use sanitize::{
    sanitize_cell,
    sanitize_directory,
    sanitize_file,
    CleanBatchSummary,
    SanitizeReport,
};

// =============================================================================
// Re-exports - Randomness
// =============================================================================

pub use rng::{FixedRandom, RandomSource, ThreadRandom};
