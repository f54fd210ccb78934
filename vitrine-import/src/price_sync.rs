//! Bulk price updates from a CSV file.
//!
//! The file needs a `REF` column and a `Price` column; a `Promo Price`
//! column is optional. Header names are matched case-insensitively and a few
//! French spellings are accepted. Prices may use a comma as decimal separator
//! and carry a `MAD` suffix.

use std::io::Read;

use rusqlite::Connection;
use serde::Serialize;
use thiserror::Error;
use vitrine_db::{OperationError, operations, queries};

#[derive(Debug, Error)]
pub enum PriceSyncError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("Database error: {0}")]
    Db(#[from] OperationError),
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("Missing required column: {0}")]
    MissingColumn(&'static str),
}

const REF_HEADERS: &[&str] = &["ref", "reference", "référence"];
const PRICE_HEADERS: &[&str] = &["price", "price (mad)", "prix", "prix (mad)"];
const PROMO_HEADERS: &[&str] = &["promo price", "promo_price", "promo", "prix promo"];

/// A price update for one product.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceRow {
    pub reference: String,
    pub price: f64,
    pub promo_price: Option<f64>,
}

/// A row that could not be turned into a [`PriceRow`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RowIssue {
    /// 1-based line number in the file, header included.
    pub line: u64,
    pub message: String,
}

/// Outcome of a price sync.
#[derive(Debug, Default, Serialize)]
pub struct PriceSyncStats {
    pub rows: usize,
    pub updated: usize,
    pub not_found: Vec<String>,
    pub invalid: Vec<RowIssue>,
}

/// Read price rows from CSV. Malformed rows are returned as issues.
pub fn read_price_rows<R: Read>(reader: R) -> Result<(Vec<PriceRow>, Vec<RowIssue>), PriceSyncError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let find = |names: &[&str]| {
        headers
            .iter()
            .position(|h| names.iter().any(|n| h.to_lowercase() == *n))
    };
    let ref_col = find(REF_HEADERS).ok_or(PriceSyncError::MissingColumn("REF"))?;
    let price_col = find(PRICE_HEADERS).ok_or(PriceSyncError::MissingColumn("Price"))?;
    let promo_col = find(PROMO_HEADERS);

    let mut rows = Vec::new();
    let mut issues = Vec::new();
    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let reference = record.get(ref_col).unwrap_or("");
        if reference.is_empty() {
            issues.push(RowIssue {
                line,
                message: "missing REF".to_string(),
            });
            continue;
        }

        let raw_price = record.get(price_col).unwrap_or("");
        let Some(price) = parse_price(raw_price) else {
            issues.push(RowIssue {
                line,
                message: format!("{reference}: invalid price '{raw_price}'"),
            });
            continue;
        };

        let raw_promo = promo_col.and_then(|c| record.get(c)).unwrap_or("");
        let promo_price = if raw_promo.is_empty() {
            None
        } else {
            match parse_price(raw_promo) {
                Some(p) => Some(p),
                None => {
                    issues.push(RowIssue {
                        line,
                        message: format!("{reference}: invalid promo price '{raw_promo}'"),
                    });
                    continue;
                }
            }
        };

        rows.push(PriceRow {
            reference: reference.to_string(),
            price,
            promo_price,
        });
    }

    Ok((rows, issues))
}

/// Apply price rows to the catalog in one transaction.
///
/// Refs that are not in the catalog are collected in
/// [`PriceSyncStats::not_found`]. With `dry_run` the rows are only checked.
pub fn sync_prices(
    conn: &Connection,
    rows: &[PriceRow],
    dry_run: bool,
) -> Result<PriceSyncStats, PriceSyncError> {
    let tx = conn.unchecked_transaction()?;
    let mut stats = PriceSyncStats {
        rows: rows.len(),
        ..Default::default()
    };

    for row in rows {
        let found = if dry_run {
            queries::find_product_by_ref(&tx, &row.reference)?.is_some()
        } else {
            operations::update_product_price(&tx, &row.reference, row.price, row.promo_price)?
        };
        if found {
            stats.updated += 1;
        } else {
            log::warn!("No product with ref {}", row.reference);
            stats.not_found.push(row.reference.clone());
        }
    }

    if !dry_run {
        tx.commit()?;
    }
    Ok(stats)
}

/// Parse `"1 200,50 MAD"`-style prices. Zero and negative values are rejected.
fn parse_price(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    let trimmed = trimmed
        .strip_suffix("MAD")
        .or_else(|| trimmed.strip_suffix("mad"))
        .unwrap_or(trimmed);
    let cleaned: String = trimmed
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|p| p.is_finite() && *p > 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_price_variants() {
        assert_eq!(parse_price("1000"), Some(1000.0));
        assert_eq!(parse_price("1 200,50 MAD"), Some(1200.5));
        assert_eq!(parse_price(" 99.9 mad "), Some(99.9));
        assert_eq!(parse_price("-5"), None);
        assert_eq!(parse_price("0"), None);
        assert_eq!(parse_price("0,00 MAD"), None);
        assert_eq!(parse_price("abc"), None);
        assert_eq!(parse_price(""), None);
    }
}
