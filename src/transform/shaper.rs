//! Per-group product assembly.
//!
//! Turns one product group (all rows sharing a `Handle`) into a
//! [`ProductRecord`]: gallery images are deduplicated, the cover dropped
//! and the tail kept; option columns become attributes with sorted value
//! lists; variant rows become variations with adjusted prices and
//! randomized stock.
//!
//! Column lookups mirror the export contract: shared fields and variant
//! prices/SKUs must exist (a missing column aborts the file), while the
//! `OptionN Name` columns are optional.

use std::collections::BTreeSet;

use indexmap::{IndexMap, IndexSet};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::config::ShaperConfig;
use crate::error::{ShapeError, ShapeResult};
use crate::models::{Attribute, Image, Product, ProductRecord, Variation, VariationAttribute};
use crate::rng::{generate_sku, RandomSource};
use crate::transform::grouper::group_by_handle;
use crate::transform::price::adjust_price;

// =============================================================================
// Column names
// =============================================================================

pub const TITLE: &str = "Title";
pub const BODY_HTML: &str = "Body (HTML)";
pub const VARIANT_PRICE: &str = "Variant Price";
pub const VARIANT_SKU: &str = "Variant SKU";
pub const TAGS: &str = "Tags";
pub const IMAGE_SRC: &str = "Image Src";

/// Option slots 1..=3, as exported.
const OPTION_SLOTS: [u8; 3] = [1, 2, 3];

fn option_name_key(slot: u8) -> String {
    format!("Option{} Name", slot)
}

fn option_value_key(slot: u8) -> String {
    format!("Option{} Value", slot)
}

// =============================================================================
// Row access
// =============================================================================

/// Strict lookup: the column must exist.
fn field<'a>(row: &'a Value, column: &str) -> ShapeResult<&'a str> {
    row.get(column)
        .and_then(|v| v.as_str())
        .ok_or_else(|| ShapeError::MissingColumn(column.to_string()))
}

/// Lenient lookup: an absent column reads as empty.
fn field_or_empty<'a>(row: &'a Value, column: &str) -> &'a str {
    row.get(column).and_then(|v| v.as_str()).unwrap_or("")
}

// =============================================================================
// Slugs
// =============================================================================

static NON_SLUG: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());

/// URL-safe lowercase identifier: non-alphanumeric runs collapse to a
/// single hyphen, trimmed at both ends.
pub fn slugify(name: &str) -> String {
    NON_SLUG
        .replace_all(&name.to_lowercase(), "-")
        .trim_matches('-')
        .to_string()
}

// =============================================================================
// Shaping
// =============================================================================

/// Shape every group in the table, stopping once `max_products` have been
/// accepted. Groups rejected over their images do not count toward the cap.
pub fn shape_products(
    rows: &[Value],
    config: &ShaperConfig,
    rng: &mut dyn RandomSource,
) -> ShapeResult<Vec<ProductRecord>> {
    let groups = group_by_handle(rows)?;

    let mut records = Vec::new();
    for (handle, group_rows) in &groups {
        if records.len() >= config.max_products {
            break;
        }
        if let Some(record) = shape_product(handle, group_rows, config, rng)? {
            records.push(record);
        }
    }

    Ok(records)
}

/// Shape a single product group. Returns `Ok(None)` when the group is
/// rejected (a kept gallery image without a source).
pub fn shape_product(
    handle: &str,
    rows: &[&Value],
    config: &ShaperConfig,
    rng: &mut dyn RandomSource,
) -> ShapeResult<Option<ProductRecord>> {
    let main = rows[0];

    let images = match select_images(rows, config)? {
        Some(images) => images,
        None => return Ok(None),
    };

    let price = adjusted(field(main, VARIANT_PRICE)?, handle, config)?;

    let categories: Vec<String> = field(main, TAGS)?
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect();

    let attributes = collect_attributes(main, rows)?;
    let variations = build_variations(handle, rows, &attributes, config, rng)?;

    let product = Product {
        title: field(main, TITLE)?.to_string(),
        product_type: "variable".to_string(),
        description: field(main, BODY_HTML)?.to_string(),
        price,
        regular_price: price,
        status: "publish".to_string(),
        managing_stock: true,
        in_stock: true,
        stock_quantity: rng.int_in_range(config.stock_min, config.stock_max),
        categories,
        images,
        attributes: attributes.into_values().collect(),
        variations,
    };

    Ok(Some(ProductRecord { product }))
}

/// Collect the group's gallery: unique non-empty sources in first-seen
/// order, cover (position 0) dropped, last `kept_images` kept and
/// renumbered from 0. `None` rejects the group.
fn select_images(rows: &[&Value], config: &ShaperConfig) -> ShapeResult<Option<Vec<Image>>> {
    let mut sources: IndexSet<&str> = IndexSet::new();
    for &row in rows {
        let src = field(row, IMAGE_SRC)?;
        if !src.is_empty() {
            sources.insert(src);
        }
    }

    // The first unique source is the cover image, already shown by the
    // destination platform; only the gallery tail is carried over.
    let mut kept: Vec<Image> = sources
        .iter()
        .skip(1)
        .map(|src| Image { src: src.to_string(), position: 0 })
        .collect();
    if kept.len() > config.kept_images {
        kept.drain(..kept.len() - config.kept_images);
    }
    for (i, image) in kept.iter_mut().enumerate() {
        image.position = i as u32;
    }

    // Emit only fully sourced galleries.
    if kept.iter().any(|image| image.src.is_empty()) {
        return Ok(None);
    }

    Ok(Some(kept))
}

/// Walk option slots 1..=3 on the first row, dedup attribute names by
/// first occurrence, and gather each recognized slot's distinct values
/// across the whole group, sorted. A named slot with no values is
/// discarded but its name still counts as seen.
fn collect_attributes(
    main: &Value,
    rows: &[&Value],
) -> ShapeResult<IndexMap<u8, Attribute>> {
    let mut attributes: IndexMap<u8, Attribute> = IndexMap::new();
    let mut seen_names: IndexSet<String> = IndexSet::new();

    for slot in OPTION_SLOTS {
        let raw_name = field_or_empty(main, &option_name_key(slot));
        if raw_name.is_empty() {
            continue;
        }

        let name = raw_name.trim().to_string();
        if !seen_names.insert(name.clone()) {
            continue;
        }

        let value_key = option_value_key(slot);
        let mut options: BTreeSet<String> = BTreeSet::new();
        for &row in rows {
            let value = field(row, &value_key)?;
            if !value.is_empty() {
                options.insert(value.trim().to_string());
            }
        }

        if options.is_empty() {
            continue;
        }

        attributes.insert(
            slot,
            Attribute {
                slug: slugify(&name),
                name,
                options: options.into_iter().collect(),
                visible: true,
                variation: true,
            },
        );
    }

    Ok(attributes)
}

/// Build variations from rows that declare a first option. Each carries
/// the adjusted row price, a randomized stock quantity, and one attribute
/// entry per recognized slot with a non-empty value on that row.
fn build_variations(
    handle: &str,
    rows: &[&Value],
    attributes: &IndexMap<u8, Attribute>,
    config: &ShaperConfig,
    rng: &mut dyn RandomSource,
) -> ShapeResult<Vec<Variation>> {
    let mut variations = Vec::new();

    for &row in rows {
        if field_or_empty(row, &option_name_key(1)).trim().is_empty() {
            continue;
        }

        let price = adjusted(field(row, VARIANT_PRICE)?, handle, config)?;

        let sku_cell = field(row, VARIANT_SKU)?;
        let sku = if sku_cell.is_empty() {
            generate_sku(&config.sku_prefix, rng)
        } else {
            sku_cell.to_string()
        };

        let mut variation_attributes = Vec::new();
        for (&slot, attribute) in attributes {
            let value = field(row, &option_value_key(slot))?;
            if !value.is_empty() {
                variation_attributes.push(VariationAttribute {
                    name: attribute.name.clone(),
                    slug: attribute.slug.clone(),
                    option: value.trim().to_string(),
                });
            }
        }

        variations.push(Variation {
            regular_price: price,
            price,
            sku,
            manage_stock: true,
            stock_quantity: rng.int_in_range(config.stock_min, config.stock_max),
            in_stock: true,
            attributes: variation_attributes,
            image: Vec::new(),
        });
    }

    Ok(variations)
}

/// Price adjustment with row context on failure.
fn adjusted(raw: &str, handle: &str, config: &ShaperConfig) -> ShapeResult<f64> {
    adjust_price(raw, config.price_ceiling, config.default_price).map_err(|_| {
        ShapeError::InvalidPrice {
            handle: handle.to_string(),
            value: raw.to_string(),
        }
    })
}
