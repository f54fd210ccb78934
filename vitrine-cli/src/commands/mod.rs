pub(crate) mod catalog;
pub(crate) mod config;
pub(crate) mod import;
pub(crate) mod parse;
pub(crate) mod prices;

use std::path::Path;

use rusqlite::Connection;

use crate::CliError;

/// Open the catalog database, creating it if needed.
pub(crate) fn open_catalog(db_path: &Path) -> Result<Connection, CliError> {
    vitrine_db::open_database(db_path).map_err(|e| {
        CliError::database(format!(
            "Failed to open catalog database at {}: {}",
            db_path.display(),
            e
        ))
    })
}

/// Open an existing catalog database. `None` when there is none yet.
pub(crate) fn open_existing_catalog(db_path: &Path) -> Result<Option<Connection>, CliError> {
    if !db_path.exists() {
        log::warn!("No catalog database found at {}", db_path.display());
        log::info!("Run 'vitrine import --dir <images>' to create one.");
        return Ok(None);
    }
    open_catalog(db_path).map(Some)
}

/// Truncate a string to a maximum width in characters, appending "..." if needed.
pub(crate) fn truncate_str(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else if max > 3 {
        let head: String = s.chars().take(max - 3).collect();
        format!("{head}...")
    } else {
        s.chars().take(max).collect()
    }
}

/// Format a price in MAD, dropping a zero fractional part.
pub(crate) fn format_price(price: f64) -> String {
    if price.fract() == 0.0 {
        format!("{price:.0} MAD")
    } else {
        format!("{price:.2} MAD")
    }
}
