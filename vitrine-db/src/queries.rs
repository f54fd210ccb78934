//! Read queries for the catalog database.
//!
//! Provides product lookup by reference or slug, identifier snapshots for
//! import runs, category listing and summary statistics.

use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, params};
use vitrine_catalog::ExistingIdent;
use vitrine_catalog::types::*;

use crate::operations::OperationError;

const PRODUCT_COLUMNS: &str = "id, ref, slug, name, description, size, size_code, main_image,
    initial_price, promo_price, is_article_rouge, main_category, sub_category, store, is_active,
    weight, quantity, chocolate_type, ingredients, allergens, tags, stock, sku, expiration_days,
    is_gift_box, is_premium, material, shape, created_at, updated_at";

// ── Product Lookups ─────────────────────────────────────────────────────────

/// Find a product by its catalog reference, gallery included.
pub fn find_product_by_ref(
    conn: &Connection,
    reference: &str,
) -> Result<Option<Product>, OperationError> {
    find_product_where(conn, "ref", reference)
}

/// Find a product by its slug, gallery included.
pub fn find_product_by_slug(
    conn: &Connection,
    slug: &str,
) -> Result<Option<Product>, OperationError> {
    find_product_where(conn, "slug", slug)
}

fn find_product_where(
    conn: &Connection,
    column: &str,
    value: &str,
) -> Result<Option<Product>, OperationError> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {PRODUCT_COLUMNS} FROM products WHERE {column} = ?1 LIMIT 1"
    ))?;
    let product = stmt.query_row(params![value], row_to_product).optional()?;
    match product {
        Some(mut p) => {
            p.gallery = gallery_for_product(conn, p.id)?;
            Ok(Some(p))
        }
        None => Ok(None),
    }
}

/// Gallery paths of a product, in display order.
pub fn gallery_for_product(
    conn: &Connection,
    product_id: i64,
) -> Result<Vec<String>, OperationError> {
    let mut stmt = conn.prepare(
        "SELECT path FROM product_images WHERE product_id = ?1 ORDER BY position",
    )?;
    let rows = stmt.query_map(params![product_id], |row| row.get::<_, String>(0))?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

/// List products, optionally restricted to one main category, ordered by name.
pub fn list_products(
    conn: &Connection,
    main_category: Option<&str>,
) -> Result<Vec<Product>, OperationError> {
    let mut products = match main_category {
        Some(category) => {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PRODUCT_COLUMNS} FROM products WHERE main_category = ?1 ORDER BY name"
            ))?;
            let rows = stmt.query_map(params![category], row_to_product)?;
            rows.collect::<Result<Vec<_>, _>>()?
        }
        None => {
            let mut stmt = conn.prepare(&format!(
                "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY name"
            ))?;
            let rows = stmt.query_map([], row_to_product)?;
            rows.collect::<Result<Vec<_>, _>>()?
        }
    };
    for product in &mut products {
        product.gallery = gallery_for_product(conn, product.id)?;
    }
    Ok(products)
}

// ── Identifier Snapshots ────────────────────────────────────────────────────

/// Reference, slug and price of every product in the catalog.
pub fn existing_idents(conn: &Connection) -> Result<Vec<ExistingIdent>, OperationError> {
    let mut stmt = conn.prepare("SELECT ref, slug, initial_price FROM products ORDER BY id")?;
    let rows = stmt.query_map([], |row| {
        Ok(ExistingIdent {
            reference: row.get(0)?,
            slug: row.get(1)?,
            price: row.get(2)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Category Queries ────────────────────────────────────────────────────────

/// All categories with their subcategories, both sorted by name.
pub fn list_categories(conn: &Connection) -> Result<Vec<Category>, OperationError> {
    let mut stmt = conn.prepare("SELECT name FROM categories ORDER BY name")?;
    let names = stmt
        .query_map([], |row| row.get::<_, String>(0))?
        .collect::<Result<Vec<_>, _>>()?;

    let mut sub_stmt = conn.prepare(
        "SELECT subcategory FROM category_subcategories WHERE category = ?1 ORDER BY subcategory",
    )?;
    let mut categories = Vec::with_capacity(names.len());
    for name in names {
        let subcategories = sub_stmt
            .query_map(params![name], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        categories.push(Category {
            name,
            subcategories,
        });
    }
    Ok(categories)
}

// ── Statistics ──────────────────────────────────────────────────────────────

/// Get summary statistics for the catalog.
pub fn catalog_stats(conn: &Connection) -> Result<CatalogStats, OperationError> {
    let products: i64 = conn.query_row("SELECT COUNT(*) FROM products", [], |r| r.get(0))?;
    let active: i64 = conn.query_row(
        "SELECT COUNT(*) FROM products WHERE is_active = 1",
        [],
        |r| r.get(0),
    )?;
    let gallery_images: i64 =
        conn.query_row("SELECT COUNT(*) FROM product_images", [], |r| r.get(0))?;
    let categories: i64 = conn.query_row("SELECT COUNT(*) FROM categories", [], |r| r.get(0))?;
    let subcategories: i64 = conn.query_row(
        "SELECT COUNT(*) FROM category_subcategories",
        [],
        |r| r.get(0),
    )?;
    let import_runs: i64 = conn.query_row("SELECT COUNT(*) FROM import_log", [], |r| r.get(0))?;

    Ok(CatalogStats {
        products,
        active_products: active,
        gallery_images,
        categories,
        subcategories,
        import_runs,
    })
}

/// Summary statistics for the catalog.
#[derive(Debug)]
pub struct CatalogStats {
    pub products: i64,
    pub active_products: i64,
    pub gallery_images: i64,
    pub categories: i64,
    pub subcategories: i64,
    pub import_runs: i64,
}

// ── Import Log Queries ──────────────────────────────────────────────────────

/// List recent import logs, newest first.
pub fn list_import_logs(
    conn: &Connection,
    limit: Option<u32>,
) -> Result<Vec<ImportLog>, OperationError> {
    let limit = limit.unwrap_or(20);
    let mut stmt = conn.prepare(&format!(
        "SELECT id, source, imported_at, records_created, records_updated,
                records_skipped, records_failed
         FROM import_log ORDER BY imported_at DESC, id DESC LIMIT {limit}"
    ))?;
    let rows = stmt.query_map([], |row| {
        Ok(ImportLog {
            id: row.get(0)?,
            source: row.get(1)?,
            imported_at: row.get(2)?,
            records_created: row.get(3)?,
            records_updated: row.get(4)?,
            records_skipped: row.get(5)?,
            records_failed: row.get(6)?,
        })
    })?;
    rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
}

// ── Row Mapping Helpers ─────────────────────────────────────────────────────

/// Map a `PRODUCT_COLUMNS` row. The gallery is loaded separately.
fn row_to_product(row: &rusqlite::Row<'_>) -> rusqlite::Result<Product> {
    let size_code: Option<String> = row.get(6)?;
    let tags_json: String = row.get(20)?;
    let tags: Vec<String> = serde_json::from_str(&tags_json)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(20, Type::Text, Box::new(e)))?;

    Ok(Product {
        id: row.get(0)?,
        reference: row.get(1)?,
        slug: row.get(2)?,
        name: row.get(3)?,
        description: row.get(4)?,
        size: row.get(5)?,
        size_code: size_code.and_then(|s| s.parse().ok()),
        main_image: row.get(7)?,
        gallery: Vec::new(),
        initial_price: row.get(8)?,
        promo_price: row.get(9)?,
        is_article_rouge: row.get(10)?,
        main_category: row.get(11)?,
        sub_category: row.get(12)?,
        store: row.get(13)?,
        is_active: row.get(14)?,
        weight: row.get(15)?,
        quantity: row.get(16)?,
        chocolate_type: row.get(17)?,
        ingredients: row.get(18)?,
        allergens: row.get(19)?,
        tags,
        stock: row.get(21)?,
        sku: row.get(22)?,
        expiration_days: row.get(23)?,
        is_gift_box: row.get(24)?,
        is_premium: row.get(25)?,
        material: row.get(26)?,
        shape: row.get(27)?,
        created_at: row.get(28)?,
        updated_at: row.get(29)?,
    })
}
