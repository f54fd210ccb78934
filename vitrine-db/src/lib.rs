//! SQLite persistence layer for the product catalog.
//!
//! Provides schema creation, write operations and read queries
//! backed by SQLite (via rusqlite with bundled feature).

pub mod operations;
pub mod queries;
pub mod schema;

pub use operations::{
    CategoryChange, OperationError, ensure_category, insert_import_log, insert_product,
    replace_gallery, update_product, update_product_price,
};
pub use queries::{
    CatalogStats, catalog_stats, existing_idents, find_product_by_ref,
    find_product_by_slug, gallery_for_product, list_categories, list_import_logs, list_products,
};
pub use schema::{open_database, open_memory};
