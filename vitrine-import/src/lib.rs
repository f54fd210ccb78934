//! Import product images into the catalog database.
//!
//! This crate owns the ETL side of the catalog: scanning an image directory,
//! grouping files per product, upserting products one transaction at a time,
//! rendering import reports, and syncing prices from a CSV file.

pub mod pipeline;
pub mod price_sync;
pub mod progress;
pub mod report;
pub mod scan;
pub mod settings;

pub use pipeline::{
    ImportCounts, ImportError, ImportErrorEntry, ImportItem, ImportOptions, ImportResult,
    ImportStatus, ProductOutcome, image_path, import_directory, import_product, log_import,
};
pub use price_sync::{
    PriceRow, PriceSyncError, PriceSyncStats, RowIssue, read_price_rows, sync_prices,
};
pub use progress::{ImportProgress, LogProgress, ProgressTally, SilentProgress};
pub use report::{
    ReportError, ReportPaths, TextSummary, render_csv, render_json, report_stamp, write_reports,
};
pub use scan::{is_image_file, scan_image_files};
pub use settings::{
    DEFAULT_IMAGE_PREFIX, Settings, SettingsError, default_database_path, load_settings,
    load_settings_from, save_settings_to, settings_path,
};
