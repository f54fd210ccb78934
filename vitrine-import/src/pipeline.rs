//! Import a directory of product images into the catalog.
//!
//! The pipeline scans the directory, groups files per product, derives
//! metadata from the main image filename, assigns refs and slugs through an
//! [`IdentRegistry`] seeded from the database, and then upserts each product
//! inside its own transaction. A failing product is rolled back and recorded
//! as an error outcome; the rest of the batch carries on.

use std::path::PathBuf;

use rusqlite::Connection;
use serde::Serialize;
use thiserror::Error;
use vitrine_catalog::types::*;
use vitrine_catalog::{
    FileGroup, IdentRegistry, group_files_by_product, parse_filename, validate_product_data,
};
use vitrine_db::{CategoryChange, OperationError, operations, queries};

use crate::progress::ImportProgress;
use crate::scan::scan_image_files;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Cannot read directory {path}: {source}")]
    ReadDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid product data: {}", .0.join("; "))]
    Validation(Vec<String>),
}

/// Options for a directory import.
#[derive(Debug, Clone)]
pub struct ImportOptions {
    /// Directory containing the product images.
    pub directory: PathBuf,
    /// Prefix joined with each filename to form the stored image path.
    pub image_prefix: String,
    /// Only import products whose main category matches (case-insensitive).
    pub category: Option<String>,
    /// Overwrite products that already exist instead of skipping them.
    pub update_existing: bool,
    /// Run lookups and report outcomes without writing anything.
    pub dry_run: bool,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            image_prefix: "/images/products".to_string(),
            category: None,
            update_existing: false,
            dry_run: false,
        }
    }
}

/// Terminal outcome of one product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ImportStatus {
    Created,
    Updated,
    Skipped,
    Error,
}

impl ImportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Updated => "updated",
            Self::Skipped => "skipped",
            Self::Error => "error",
        }
    }
}

impl std::fmt::Display for ImportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the import result.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportItem {
    #[serde(rename = "ref")]
    pub reference: String,
    pub name: String,
    pub price: Option<f64>,
    pub category: String,
    pub sub_category: String,
    pub status: ImportStatus,
    pub message: String,
    /// Filename of the main image.
    pub filename: String,
    pub gallery_count: usize,
}

/// A product that could not be imported.
#[derive(Debug, Clone, Serialize)]
pub struct ImportErrorEntry {
    pub filename: String,
    pub message: String,
}

/// Outcome counts of an import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportCounts {
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub errors: usize,
}

impl ImportCounts {
    pub fn record(&mut self, status: ImportStatus) {
        match status {
            ImportStatus::Created => self.created += 1,
            ImportStatus::Updated => self.updated += 1,
            ImportStatus::Skipped => self.skipped += 1,
            ImportStatus::Error => self.errors += 1,
        }
    }
}

impl std::fmt::Display for ImportCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} created, {} updated, {} skipped, {} errors",
            self.created, self.updated, self.skipped, self.errors
        )
    }
}

/// Everything an import run produced, in processing order.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub source: String,
    pub started_at: String,
    pub dry_run: bool,
    pub files_scanned: usize,
    pub product_groups: usize,
    /// Groups left out by the category filter.
    pub filtered_out: usize,
    pub counts: ImportCounts,
    pub items: Vec<ImportItem>,
    pub errors: Vec<ImportErrorEntry>,
}

impl ImportResult {
    /// Items with the given status, in processing order.
    pub fn items_with_status(&self, status: ImportStatus) -> impl Iterator<Item = &ImportItem> {
        self.items.iter().filter(move |item| item.status == status)
    }

    fn push(&mut self, item: ImportItem) {
        self.counts.record(item.status);
        if item.status == ImportStatus::Error {
            self.errors.push(ImportErrorEntry {
                filename: item.filename.clone(),
                message: item.message.clone(),
            });
        }
        self.items.push(item);
    }
}

/// How a single product was handled, before it becomes an [`ImportItem`].
#[derive(Debug, Clone, PartialEq)]
pub struct ProductOutcome {
    pub status: ImportStatus,
    /// The ref stored in the catalog. Differs from the generated ref when an
    /// existing product was matched by slug.
    pub reference: String,
    pub message: String,
}

/// Scan `options.directory` and import every product group found in it.
///
/// Fails only when the directory cannot be read or the identifier snapshot
/// cannot be loaded. Per-product failures are recorded in the result.
pub fn import_directory(
    conn: &Connection,
    options: &ImportOptions,
    progress: &dyn ImportProgress,
) -> Result<ImportResult, ImportError> {
    let started_at = chrono::Utc::now().to_rfc3339();

    let files = scan_image_files(&options.directory).map_err(|source| ImportError::ReadDir {
        path: options.directory.clone(),
        source,
    })?;
    let groups = group_files_by_product(&files);

    let mut registry = IdentRegistry::new(queries::existing_idents(conn)?);
    let mut result = ImportResult {
        source: options.directory.display().to_string(),
        started_at,
        dry_run: options.dry_run,
        files_scanned: files.len(),
        product_groups: groups.len(),
        ..Default::default()
    };

    progress.on_scanned(&options.directory, files.len(), groups.len());
    let total = groups.len();
    for (i, group) in groups.iter().enumerate() {
        let meta = parse_filename(group.main_image());

        if let Some(ref wanted) = options.category
            && !meta.main_category.eq_ignore_ascii_case(wanted)
        {
            log::debug!(
                "Skipping {} (category {} != {})",
                group.main_image(),
                meta.main_category,
                wanted
            );
            result.filtered_out += 1;
            continue;
        }

        let product = build_product(&mut registry, &meta, group, &options.image_prefix);
        let item = match import_product(conn, &product, options) {
            Ok(outcome) => {
                log::debug!("{} {} ({})", outcome.status, product.name, outcome.reference);
                make_item(&product, &meta, group, outcome)
            }
            Err(e) => {
                log::warn!("Failed to import {}: {}", group.main_image(), e);
                make_item(
                    &product,
                    &meta,
                    group,
                    ProductOutcome {
                        status: ImportStatus::Error,
                        reference: product.reference.clone(),
                        message: e.to_string(),
                    },
                )
            }
        };
        progress.on_product(i + 1, total, &item);
        result.push(item);
    }

    if !options.dry_run {
        log_import(conn, &result)?;
    }

    progress.on_complete(&result);
    Ok(result)
}

/// Upsert one product inside its own transaction.
///
/// The product is validated first; a malformed product is rejected with
/// [`ImportError::Validation`] before the database is touched. The existing
/// product is looked up by ref, then by slug. The category side table is
/// ensured whether the product is created, updated or skipped.
pub fn import_product(
    conn: &Connection,
    product: &Product,
    options: &ImportOptions,
) -> Result<ProductOutcome, ImportError> {
    let problems = validate_product_data(product);
    if !problems.is_empty() {
        return Err(ImportError::Validation(problems));
    }

    // Dropping the transaction without commit rolls it back.
    let tx = conn.unchecked_transaction()?;

    let existing = match queries::find_product_by_ref(&tx, &product.reference)? {
        Some(found) => Some((found, "ref")),
        None => queries::find_product_by_slug(&tx, &product.slug)?.map(|found| (found, "slug")),
    };

    let prefix = if options.dry_run { "[dry run] " } else { "" };
    let outcome = match existing {
        None => {
            if !options.dry_run {
                operations::insert_product(&tx, product)?;
            }
            ProductOutcome {
                status: ImportStatus::Created,
                reference: product.reference.clone(),
                message: format!(
                    "{prefix}created with {} gallery image(s)",
                    product.gallery.len()
                ),
            }
        }
        Some((found, matched_by)) if options.update_existing => {
            if !options.dry_run {
                operations::update_product(&tx, found.id, product)?;
            }
            ProductOutcome {
                status: ImportStatus::Updated,
                reference: found.reference,
                message: format!("{prefix}updated (matched by {matched_by})"),
            }
        }
        Some((found, matched_by)) => ProductOutcome {
            status: ImportStatus::Skipped,
            reference: found.reference,
            message: format!("already in catalog (matched by {matched_by})"),
        },
    };

    if !options.dry_run {
        let change =
            operations::ensure_category(&tx, &product.main_category, &product.sub_category)?;
        match change {
            CategoryChange::Created => log::info!(
                "New category {} / {}",
                product.main_category,
                product.sub_category
            ),
            CategoryChange::SubcategoryAdded => log::info!(
                "New subcategory {} / {}",
                product.main_category,
                product.sub_category
            ),
            CategoryChange::Unchanged => {}
        }
        tx.commit()?;
    }

    Ok(outcome)
}

/// Record a finished run in the import log.
pub fn log_import(conn: &Connection, result: &ImportResult) -> Result<i64, ImportError> {
    let log = ImportLog {
        id: 0,
        source: result.source.clone(),
        imported_at: result.started_at.clone(),
        records_created: result.counts.created as i64,
        records_updated: result.counts.updated as i64,
        records_skipped: result.counts.skipped as i64,
        records_failed: result.counts.errors as i64,
    };
    Ok(operations::insert_import_log(conn, &log)?)
}

fn build_product(
    registry: &mut IdentRegistry,
    meta: &ParsedMetadata,
    group: &FileGroup,
    image_prefix: &str,
) -> Product {
    let reference = registry.assign_ref(meta);
    let slug = registry.assign_slug(meta);
    let main_image = image_path(image_prefix, group.main_image());
    let gallery = group
        .gallery()
        .iter()
        .map(|f| image_path(image_prefix, f))
        .collect();
    Product::from_parsed(meta, reference, slug, main_image, gallery)
}

fn make_item(
    product: &Product,
    meta: &ParsedMetadata,
    group: &FileGroup,
    outcome: ProductOutcome,
) -> ImportItem {
    ImportItem {
        reference: outcome.reference,
        name: product.name.clone(),
        price: meta.price,
        category: product.main_category.clone(),
        sub_category: product.sub_category.clone(),
        status: outcome.status,
        message: outcome.message,
        filename: group.main_image().to_string(),
        gallery_count: product.gallery.len(),
    }
}

/// Join an image prefix and a filename into the stored image path.
pub fn image_path(prefix: &str, filename: &str) -> String {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        filename.to_string()
    } else {
        format!("{prefix}/{filename}")
    }
}
