//! Product shaping.
//!
//! - Grouper: partition export rows by handle
//! - Price: price adjustment
//! - Shaper: per-group product assembly
//! - Pipeline: per-file and per-directory orchestration

pub mod grouper;
pub mod pipeline;
pub mod price;
pub mod shaper;

pub use grouper::group_by_handle;
pub use pipeline::{shape_directory, shape_file, BatchSummary, ShapeSummary};
pub use price::adjust_price;
pub use shaper::{shape_product, shape_products, slugify};
