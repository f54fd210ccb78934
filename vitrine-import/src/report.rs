//! Render import results as CSV, plain text and JSON.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::{DateTime, TimeZone};
use thiserror::Error;

use crate::pipeline::{ImportResult, ImportStatus};

/// Number of example entries listed per status in the text summary.
pub const EXAMPLES_PER_STATUS: usize = 10;

pub const CSV_HEADER: [&str; 6] = ["REF", "Name", "Price (MAD)", "Category", "Status", "Message"];

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Render one CSV row per imported item.
pub fn render_csv(result: &ImportResult) -> Result<String, ReportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for item in &result.items {
        writer.write_record([
            item.reference.as_str(),
            item.name.as_str(),
            format_price(item.price).as_str(),
            item.category.as_str(),
            item.status.as_str(),
            item.message.as_str(),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| ReportError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Serialize the result as pretty-printed JSON.
pub fn render_json(result: &ImportResult) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Human-readable summary of an import run.
///
/// ```
/// use vitrine_import::{ImportResult, TextSummary};
///
/// let text = TextSummary(&ImportResult::default()).to_string();
/// assert!(text.contains("Created: 0"));
/// ```
pub struct TextSummary<'a>(pub &'a ImportResult);

impl fmt::Display for TextSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let result = self.0;
        writeln!(f, "Product Import Summary")?;
        writeln!(f, "======================")?;
        writeln!(f, "Source:   {}", result.source)?;
        writeln!(f, "Started:  {}", result.started_at)?;
        if result.dry_run {
            writeln!(f, "Mode:     dry run (nothing written)")?;
        }
        writeln!(f)?;
        writeln!(f, "Files scanned:  {}", result.files_scanned)?;
        writeln!(f, "Product groups: {}", result.product_groups)?;
        if result.filtered_out > 0 {
            writeln!(f, "Filtered out:   {}", result.filtered_out)?;
        }
        writeln!(f)?;
        writeln!(f, "Created: {}", result.counts.created)?;
        writeln!(f, "Updated: {}", result.counts.updated)?;
        writeln!(f, "Skipped: {}", result.counts.skipped)?;
        writeln!(f, "Errors:  {}", result.counts.errors)?;

        for (status, title) in [
            (ImportStatus::Created, "Created"),
            (ImportStatus::Updated, "Updated"),
            (ImportStatus::Skipped, "Skipped"),
        ] {
            let total = result.items_with_status(status).count();
            if total == 0 {
                continue;
            }
            writeln!(f)?;
            writeln!(f, "{title} ({total}):")?;
            for item in result.items_with_status(status).take(EXAMPLES_PER_STATUS) {
                writeln!(
                    f,
                    "  {}  {} ({} MAD)",
                    item.reference,
                    item.name,
                    format_price(item.price)
                )?;
            }
            if total > EXAMPLES_PER_STATUS {
                writeln!(f, "  ... and {} more", total - EXAMPLES_PER_STATUS)?;
            }
        }

        if !result.errors.is_empty() {
            writeln!(f)?;
            writeln!(f, "Errors ({}):", result.errors.len())?;
            for error in &result.errors {
                writeln!(f, "  {}: {}", error.filename, error.message)?;
            }
        }
        Ok(())
    }
}

/// Paths of the report files written by [`write_reports`].
#[derive(Debug, Clone)]
pub struct ReportPaths {
    pub csv: PathBuf,
    pub text: PathBuf,
    pub json: PathBuf,
}

/// Timestamp used in report filenames, e.g. `2026-10-17_143005`.
pub fn report_stamp<Tz: TimeZone>(now: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    now.format("%Y-%m-%d_%H%M%S").to_string()
}

/// Write the CSV, text and JSON reports into `dir`, creating it if needed.
pub fn write_reports(
    result: &ImportResult,
    dir: &Path,
    stamp: &str,
) -> Result<ReportPaths, ReportError> {
    std::fs::create_dir_all(dir)?;

    let paths = ReportPaths {
        csv: dir.join(format!("product-import-{stamp}.csv")),
        text: dir.join(format!("product-import-summary-{stamp}.txt")),
        json: dir.join(format!("product-import-{stamp}.json")),
    };

    std::fs::write(&paths.csv, render_csv(result)?)?;
    std::fs::write(&paths.text, TextSummary(result).to_string())?;
    std::fs::write(&paths.json, render_json(result)?)?;

    log::debug!("Reports written to {}", dir.display());
    Ok(paths)
}

fn format_price(price: Option<f64>) -> String {
    price.map(|p| p.to_string()).unwrap_or_default()
}
