//! Progress reporting for directory imports.
//!
//! [`import_directory`](crate::import_directory) reports the scan, then every
//! handled product group with its outcome, then the finished run. Reporters
//! keep a [`ProgressTally`] so they can show created/updated/skipped/error
//! counts while the run is still going.

use std::cell::Cell;
use std::path::Path;

use crate::pipeline::{ImportCounts, ImportItem, ImportResult, ImportStatus};

/// Receiver of import progress events.
pub trait ImportProgress {
    /// The directory was scanned; `groups` product groups will be processed.
    fn on_scanned(&self, directory: &Path, files: usize, groups: usize);

    /// A product group was handled. `current` runs from 1 to `total`; groups
    /// left out by the category filter advance it without being reported.
    fn on_product(&self, current: usize, total: usize, item: &ImportItem);

    fn on_complete(&self, result: &ImportResult);
}

/// Running outcome counts, updated through a shared reference.
#[derive(Debug, Default)]
pub struct ProgressTally(Cell<ImportCounts>);

impl ProgressTally {
    /// Count one outcome and return the updated totals.
    pub fn record(&self, status: ImportStatus) -> ImportCounts {
        let mut counts = self.0.get();
        counts.record(status);
        self.0.set(counts);
        counts
    }

    pub fn counts(&self) -> ImportCounts {
        self.0.get()
    }
}

/// Discards every event. Used with `--quiet` and in tests.
pub struct SilentProgress;

impl ImportProgress for SilentProgress {
    fn on_scanned(&self, _directory: &Path, _files: usize, _groups: usize) {}
    fn on_product(&self, _current: usize, _total: usize, _item: &ImportItem) {}
    fn on_complete(&self, _result: &ImportResult) {}
}

/// Reports progress as log lines, for output teed into a log file.
///
/// A tally line is written every [`LogProgress::EVERY`] products and for the
/// last one. Failures are already logged by the pipeline.
#[derive(Debug, Default)]
pub struct LogProgress {
    tally: ProgressTally,
}

impl LogProgress {
    pub const EVERY: usize = 50;

    pub fn counts(&self) -> ImportCounts {
        self.tally.counts()
    }
}

impl ImportProgress for LogProgress {
    fn on_scanned(&self, directory: &Path, files: usize, groups: usize) {
        log::info!(
            "Found {} image(s) in {} product group(s) under {}",
            files,
            groups,
            directory.display()
        );
    }

    fn on_product(&self, current: usize, total: usize, item: &ImportItem) {
        let counts = self.tally.record(item.status);
        if current.is_multiple_of(Self::EVERY) || current == total {
            log::info!("  [{}/{}] {}", current, total, counts);
        }
    }

    fn on_complete(&self, result: &ImportResult) {
        log::info!("Import complete: {}", result.counts);
        if result.filtered_out > 0 {
            log::info!("{} group(s) left out by the category filter", result.filtered_out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tally_accumulates_outcomes() {
        let tally = ProgressTally::default();
        tally.record(ImportStatus::Created);
        tally.record(ImportStatus::Created);
        tally.record(ImportStatus::Error);
        let counts = tally.record(ImportStatus::Skipped);
        assert_eq!(counts.created, 2);
        assert_eq!(counts.skipped, 1);
        assert_eq!(counts.errors, 1);
        assert_eq!(counts, tally.counts());
        assert_eq!(counts.to_string(), "2 created, 0 updated, 1 skipped, 1 errors");
    }
}
