//! Sanity checks run on a product before it is written to the catalog.

use crate::types::Product;

/// Minimum length of a product name, in characters.
pub const MIN_NAME_LEN: usize = 3;

/// List every reason `product` should not be persisted. Empty means valid.
pub fn validate_product_data(product: &Product) -> Vec<String> {
    let mut problems = Vec::new();

    if product.name.trim().chars().count() < MIN_NAME_LEN {
        problems.push(format!(
            "name too short (minimum {MIN_NAME_LEN} characters): '{}'",
            product.name
        ));
    }
    if product.reference.trim().is_empty() {
        problems.push("missing reference".to_string());
    }
    if product.slug.trim().is_empty() {
        problems.push("missing slug".to_string());
    }
    if product.main_image.trim().is_empty() {
        problems.push("missing main image".to_string());
    }
    if product.main_category.trim().is_empty() {
        problems.push("missing main category".to_string());
    }
    if !product.initial_price.is_finite() || product.initial_price <= 0.0 {
        problems.push("missing or invalid price".to_string());
    }
    if product.gallery.iter().any(|g| *g == product.main_image) {
        problems.push("gallery contains the main image".to_string());
    }

    problems
}
