use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use crate::CliError;

/// Update catalog prices from a CSV file.
pub(crate) fn run_prices(db_path: &Path, file: &Path, dry_run: bool) -> Result<(), CliError> {
    let reader = std::fs::File::open(file).map_err(|e| {
        CliError::other(format!("Failed to open {}: {}", file.display(), e))
    })?;
    let (rows, issues) = vitrine_import::read_price_rows(reader)
        .map_err(|e| CliError::other(format!("{}: {}", file.display(), e)))?;

    let conn = super::open_catalog(db_path)?;
    let stats = vitrine_import::sync_prices(&conn, &rows, dry_run)
        .map_err(|e| CliError::database(e.to_string()))?;

    for issue in &issues {
        log::warn!("line {}: {}", issue.line, issue.message);
    }

    log::info!(
        "{}",
        if dry_run {
            "Price sync (dry run)"
        } else {
            "Price sync complete"
        }
        .if_supports_color(Stdout, |t| t.bold()),
    );
    log::info!("  Rows:      {:>6}", stats.rows);
    log::info!(
        "  {}:   {:>6}",
        if dry_run { "Matched" } else { "Updated" },
        stats.updated
    );
    log::info!("  Not found: {:>6}", stats.not_found.len());
    log::info!("  Invalid:   {:>6}", issues.len());
    for reference in &stats.not_found {
        log::info!(
            "    {} {}",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            reference
        );
    }
    Ok(())
}
