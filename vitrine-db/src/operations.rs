//! Write operations for products, galleries, categories and import logs.

use rusqlite::{Connection, params};
use thiserror::Error;
use vitrine_catalog::types::*;

#[derive(Debug, Error)]
pub enum OperationError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Entity not found: {entity_type} with id '{id}'")]
    NotFound { entity_type: String, id: String },
}

// ── Product Operations ──────────────────────────────────────────────────────

/// Insert a new product and its gallery. Returns the new row id.
pub fn insert_product(conn: &Connection, product: &Product) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO products (ref, slug, name, description, size, size_code, main_image,
             initial_price, promo_price, is_article_rouge, main_category, sub_category, store,
             is_active, weight, quantity, chocolate_type, ingredients, allergens, tags, stock,
             sku, expiration_days, is_gift_box, is_premium, material, shape)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17,
             ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26, ?27)",
        params![
            product.reference,
            product.slug,
            product.name,
            product.description,
            product.size,
            product.size_code.map(|s| s.as_str()),
            product.main_image,
            product.initial_price,
            product.promo_price,
            product.is_article_rouge,
            product.main_category,
            product.sub_category,
            product.store,
            product.is_active,
            product.weight,
            product.quantity,
            product.chocolate_type,
            product.ingredients,
            product.allergens,
            serde_json::to_string(&product.tags)?,
            product.stock,
            product.sku,
            product.expiration_days,
            product.is_gift_box,
            product.is_premium,
            product.material,
            product.shape,
        ],
    )?;
    let id = conn.last_insert_rowid();
    replace_gallery(conn, id, &product.gallery)?;
    Ok(id)
}

/// Overwrite every scalar field of product `id` and recreate its gallery.
///
/// The stored reference and slug are kept: they identify the product.
pub fn update_product(conn: &Connection, id: i64, product: &Product) -> Result<(), OperationError> {
    let changed = conn.execute(
        "UPDATE products SET
             name = ?2, description = ?3, size = ?4, size_code = ?5, main_image = ?6,
             initial_price = ?7, promo_price = ?8, is_article_rouge = ?9, main_category = ?10,
             sub_category = ?11, store = ?12, is_active = ?13, weight = ?14, quantity = ?15,
             chocolate_type = ?16, ingredients = ?17, allergens = ?18, tags = ?19, stock = ?20,
             sku = ?21, expiration_days = ?22, is_gift_box = ?23, is_premium = ?24,
             material = ?25, shape = ?26, updated_at = datetime('now')
         WHERE id = ?1",
        params![
            id,
            product.name,
            product.description,
            product.size,
            product.size_code.map(|s| s.as_str()),
            product.main_image,
            product.initial_price,
            product.promo_price,
            product.is_article_rouge,
            product.main_category,
            product.sub_category,
            product.store,
            product.is_active,
            product.weight,
            product.quantity,
            product.chocolate_type,
            product.ingredients,
            product.allergens,
            serde_json::to_string(&product.tags)?,
            product.stock,
            product.sku,
            product.expiration_days,
            product.is_gift_box,
            product.is_premium,
            product.material,
            product.shape,
        ],
    )?;
    if changed == 0 {
        return Err(OperationError::NotFound {
            entity_type: "product".to_string(),
            id: id.to_string(),
        });
    }
    replace_gallery(conn, id, &product.gallery)?;
    Ok(())
}

/// Delete and recreate the gallery rows of a product, in the given order.
pub fn replace_gallery(
    conn: &Connection,
    product_id: i64,
    gallery: &[String],
) -> Result<(), OperationError> {
    conn.execute(
        "DELETE FROM product_images WHERE product_id = ?1",
        params![product_id],
    )?;
    let mut stmt = conn.prepare(
        "INSERT INTO product_images (product_id, position, path) VALUES (?1, ?2, ?3)",
    )?;
    for (position, path) in gallery.iter().enumerate() {
        stmt.execute(params![product_id, position as i64, path])?;
    }
    Ok(())
}

/// Set the price (and optionally the promotional price) of the product with
/// the given reference. Returns `false` if no product has that reference.
pub fn update_product_price(
    conn: &Connection,
    reference: &str,
    initial_price: f64,
    promo_price: Option<f64>,
) -> Result<bool, OperationError> {
    let changed = conn.execute(
        "UPDATE products SET initial_price = ?2, promo_price = ?3, updated_at = datetime('now')
         WHERE ref = ?1",
        params![reference, initial_price, promo_price],
    )?;
    Ok(changed > 0)
}

// ── Category Operations ─────────────────────────────────────────────────────

/// What [`ensure_category`] had to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryChange {
    /// The category did not exist; it was created with the subcategory.
    Created,
    /// The category existed; the subcategory was new.
    SubcategoryAdded,
    /// Both were already known.
    Unchanged,
}

/// Make sure `category` exists and lists `subcategory`.
///
/// Never removes anything, so the subcategory set only grows.
pub fn ensure_category(
    conn: &Connection,
    category: &str,
    subcategory: &str,
) -> Result<CategoryChange, OperationError> {
    let created = conn.execute(
        "INSERT OR IGNORE INTO categories (name) VALUES (?1)",
        params![category],
    )? > 0;

    let added = conn.execute(
        "INSERT OR IGNORE INTO category_subcategories (category, subcategory) VALUES (?1, ?2)",
        params![category, subcategory],
    )? > 0;

    Ok(match (created, added) {
        (true, _) => CategoryChange::Created,
        (false, true) => CategoryChange::SubcategoryAdded,
        (false, false) => CategoryChange::Unchanged,
    })
}

// ── Import Log Operations ───────────────────────────────────────────────────

/// Insert an import log entry.
pub fn insert_import_log(conn: &Connection, log: &ImportLog) -> Result<i64, OperationError> {
    conn.execute(
        "INSERT INTO import_log (source, imported_at, records_created, records_updated,
             records_skipped, records_failed)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            log.source,
            log.imported_at,
            log.records_created,
            log.records_updated,
            log.records_skipped,
            log.records_failed,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}
