use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

use super::{format_price, open_existing_catalog, truncate_str};

/// List products, optionally restricted to one main category.
pub(crate) fn run_products(db_path: &Path, category: Option<&str>) -> Result<(), CliError> {
    let Some(conn) = open_existing_catalog(db_path)? else {
        return Ok(());
    };
    let products = vitrine_db::list_products(&conn, category)
        .map_err(|e| CliError::database(format!("Failed to list products: {}", e)))?;

    if products.is_empty() {
        log::info!("No products found.");
        return Ok(());
    }

    for p in &products {
        let status = if p.is_active {
            String::new()
        } else {
            format!(" {}", "(inactive)".if_supports_color(Stdout, |t| t.dimmed()))
        };
        log::info!(
            "  {:<22} {:<50} {:>12}  {}{}",
            p.reference.if_supports_color(Stdout, |t| t.cyan()),
            truncate_str(&p.name, 50),
            format_price(p.initial_price),
            p.main_category,
            status,
        );
    }
    crate::log_blank();
    log::info!("{} product(s)", products.len());
    Ok(())
}

/// Show catalog statistics.
pub(crate) fn run_stats(db_path: &Path) -> Result<(), CliError> {
    let Some(conn) = open_existing_catalog(db_path)? else {
        return Ok(());
    };
    let stats = vitrine_db::catalog_stats(&conn)
        .map_err(|e| CliError::database(format!("Failed to query catalog stats: {}", e)))?;

    log::info!(
        "{}",
        "Catalog Database Statistics".if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Database: {}", db_path.display());
    crate::log_blank();
    log::info!("  Products:       {:>8}", stats.products);
    log::info!("  Active:         {:>8}", stats.active_products);
    log::info!("  Gallery images: {:>8}", stats.gallery_images);
    log::info!("  Categories:     {:>8}", stats.categories);
    log::info!("  Subcategories:  {:>8}", stats.subcategories);
    log::info!("  Import runs:    {:>8}", stats.import_runs);
    Ok(())
}

/// List categories with their subcategories.
pub(crate) fn run_categories(db_path: &Path) -> Result<(), CliError> {
    let Some(conn) = open_existing_catalog(db_path)? else {
        return Ok(());
    };
    let categories = vitrine_db::list_categories(&conn)
        .map_err(|e| CliError::database(format!("Failed to list categories: {}", e)))?;

    if categories.is_empty() {
        log::info!("No categories yet.");
        return Ok(());
    }
    for category in &categories {
        log::info!("{}", category.name.if_supports_color(Stdout, |t| t.bold()));
        for sub in &category.subcategories {
            log::info!("  {}", sub);
        }
    }
    Ok(())
}

/// Show recent import runs, newest first.
pub(crate) fn run_history(db_path: &Path, limit: u32) -> Result<(), CliError> {
    let Some(conn) = open_existing_catalog(db_path)? else {
        return Ok(());
    };
    let logs = vitrine_db::list_import_logs(&conn, Some(limit))
        .map_err(|e| CliError::database(format!("Failed to read import log: {}", e)))?;

    if logs.is_empty() {
        log::info!("No imports recorded.");
        return Ok(());
    }
    for entry in &logs {
        let failed = if entry.records_failed > 0 {
            format!("{} failed", entry.records_failed)
                .if_supports_color(Stdout, |t| t.red())
                .to_string()
        } else {
            "0 failed".to_string()
        };
        log::info!(
            "  {}  {} created, {} updated, {} skipped, {}  {}",
            entry.imported_at.if_supports_color(Stdout, |t| t.dimmed()),
            entry.records_created,
            entry.records_updated,
            entry.records_skipped,
            failed,
            entry.source,
        );
    }
    Ok(())
}
