//! Static configuration for both pipelines.
//!
//! All tuning values are fixed at invocation as plain data structures,
//! not CLI flags. The defaults reproduce the stock behavior; callers
//! embedding the library can construct their own.

use serde::{Deserialize, Serialize};

// =============================================================================
// Product Shaper
// =============================================================================

/// Options for the product shaper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShaperConfig {
    /// Maximum number of products emitted per input file.
    pub max_products: usize,

    /// Prices above this decay by repeated 10% discounts until at or below it.
    pub price_ceiling: f64,

    /// Substitute for an empty price cell, fed through the same adjustment.
    pub default_price: f64,

    /// How many gallery images to keep per product (after dropping the cover).
    pub kept_images: usize,

    /// Inclusive bounds for randomized stock quantities.
    pub stock_min: u32,
    pub stock_max: u32,

    /// Prefix for generated SKUs when a variant row has none.
    pub sku_prefix: String,
}

impl Default for ShaperConfig {
    fn default() -> Self {
        Self {
            max_products: 50,
            price_ceiling: 200.0,
            default_price: 99.0,
            kept_images: 5,
            stock_min: 1000,
            stock_max: 5000,
            sku_prefix: "beauty".to_string(),
        }
    }
}

// =============================================================================
// Content Sanitizer
// =============================================================================

/// Options for the content sanitizer.
///
/// `replacements` is ordered: later pairs see the output of earlier ones,
/// which matters when replacement keys overlap.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SanitizerConfig {
    /// The column whose cells are rewritten.
    pub column: String,

    /// Element kinds removed together with all their descendants.
    pub strip_tags: Vec<String>,

    /// Literal substring replacements, applied sequentially in order.
    pub replacements: Vec<(String, String)>,

    /// (start-marker, end-marker) pairs whose spans are deleted, markers
    /// included. Pairs with an empty marker are skipped.
    pub remove_ranges: Vec<(String, String)>,

    /// Cutoff markers: everything from the earliest-occurring one onward
    /// is dropped.
    pub cutoff_markers: Vec<String>,
}

impl Default for SanitizerConfig {
    fn default() -> Self {
        Self {
            column: "Body (HTML)".to_string(),
            strip_tags: ["a", "video", "img", "button", "svg"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            replacements: Vec::new(),
            remove_ranges: vec![("<script".to_string(), "</script>".to_string())],
            cutoff_markers: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shaper_defaults() {
        let cfg = ShaperConfig::default();
        assert_eq!(cfg.max_products, 50);
        assert_eq!(cfg.price_ceiling, 200.0);
        assert_eq!(cfg.kept_images, 5);
        assert_eq!((cfg.stock_min, cfg.stock_max), (1000, 5000));
    }

    #[test]
    fn test_sanitizer_defaults() {
        let cfg = SanitizerConfig::default();
        assert_eq!(cfg.column, "Body (HTML)");
        assert!(cfg.strip_tags.contains(&"a".to_string()));
        assert!(cfg.strip_tags.contains(&"svg".to_string()));
        assert!(cfg.replacements.is_empty());
    }
}
