//! Product schema for the import JSON.
//!
//! These structs define the wire format consumed by the destination
//! platform's product importer:
//!
//! - [`ProductRecord`] - `{"product": {...}}` wrapper, one per array element
//! - [`Product`] - the product aggregate
//! - [`Image`] - gallery image with 0-based position
//! - [`Attribute`] - option dimension with its sorted value list
//! - [`Variation`] - one purchasable option combination
//!
//! Field order and naming follow the importer contract, including the
//! `managing_stock` (product) vs `manage_stock` (variation) asymmetry.

use serde::{Deserialize, Serialize};

// =============================================================================
// Images
// =============================================================================

/// A gallery image. Positions are contiguous from 0 after filtering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Image {
    /// Image URL.
    pub src: String,
    /// 0-based gallery position.
    pub position: u32,
}

// =============================================================================
// Attributes
// =============================================================================

/// An option dimension of a variable product (e.g. "Size", "Color").
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attribute {
    /// Display name, as it appears in the source table.
    pub name: String,
    /// URL-safe lowercase identifier derived from the name.
    pub slug: String,
    /// Distinct option values, sorted lexicographically.
    pub options: Vec<String>,
    /// Shown on the product page.
    pub visible: bool,
    /// Used to build variations.
    pub variation: bool,
}

/// One attribute choice on a variation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariationAttribute {
    pub name: String,
    pub slug: String,
    /// The selected option value.
    pub option: String,
}

// =============================================================================
// Variations
// =============================================================================

/// A purchasable option combination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variation {
    pub regular_price: f64,
    pub price: f64,
    pub sku: String,
    pub manage_stock: bool,
    pub stock_quantity: u32,
    pub in_stock: bool,
    pub attributes: Vec<VariationAttribute>,
    /// Variation-specific images. Always serialized, even when empty.
    pub image: Vec<Image>,
}

// =============================================================================
// Products
// =============================================================================

/// A complete variable product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub title: String,
    /// Always `"variable"`.
    #[serde(rename = "type")]
    pub product_type: String,
    pub description: String,
    pub price: f64,
    pub regular_price: f64,
    /// Always `"publish"`.
    pub status: String,
    pub managing_stock: bool,
    pub in_stock: bool,
    pub stock_quantity: u32,
    /// Trimmed, non-empty tag tokens.
    pub categories: Vec<String>,
    pub images: Vec<Image>,
    pub attributes: Vec<Attribute>,
    pub variations: Vec<Variation>,
}

/// Wire wrapper: the output file is a JSON array of these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    pub product: Product,
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample_product() -> Product {
        Product {
            title: "Linen Shirt".into(),
            product_type: "variable".into(),
            description: "<p>Soft.</p>".into(),
            price: 9.99,
            regular_price: 9.99,
            status: "publish".into(),
            managing_stock: true,
            in_stock: true,
            stock_quantity: 1000,
            categories: vec!["shirts".into()],
            images: vec![Image { src: "https://cdn/x.jpg".into(), position: 0 }],
            attributes: vec![],
            variations: vec![],
        }
    }

    #[test]
    fn test_type_field_renamed() {
        let value = serde_json::to_value(sample_product()).unwrap();
        assert_eq!(value["type"], "variable");
        assert!(value.get("product_type").is_none());
    }

    #[test]
    fn test_record_wrapper_shape() {
        let record = ProductRecord { product: sample_product() };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["product"]["title"], "Linen Shirt");
        assert_eq!(value["product"]["status"], "publish");
    }

    #[test]
    fn test_empty_variation_image_serialized() {
        let variation = Variation {
            regular_price: 4.99,
            price: 4.99,
            sku: "sku-1".into(),
            manage_stock: true,
            stock_quantity: 1500,
            in_stock: true,
            attributes: vec![VariationAttribute {
                name: "Size".into(),
                slug: "size".into(),
                option: "M".into(),
            }],
            image: vec![],
        };
        let value = serde_json::to_value(&variation).unwrap();
        assert_eq!(value["image"], json!([]));
        assert_eq!(value["manage_stock"], true);
    }

    #[test]
    fn test_stock_field_name_asymmetry() {
        // The importer expects managing_stock on products but manage_stock
        // on variations.
        let product = serde_json::to_value(sample_product()).unwrap();
        assert!(product.get("managing_stock").is_some());
        assert!(product.get("manage_stock").is_none());
    }
}
