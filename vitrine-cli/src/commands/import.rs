use std::path::{Path, PathBuf};

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use vitrine_import::{
    ImportItem, ImportOptions, ImportProgress, ImportResult, ImportStatus, LogProgress,
    ProgressTally, Settings, SilentProgress, TextSummary,
};

use crate::CliError;

/// Arguments of `vitrine import`.
pub(crate) struct ImportArgs {
    pub dir: Option<PathBuf>,
    pub category: Option<String>,
    pub update_existing: bool,
    pub dry_run: bool,
    pub reports_dir: Option<PathBuf>,
    pub no_reports: bool,
    pub image_prefix: Option<String>,
    pub fail_on_error: bool,
    pub quiet: bool,
    /// Log output is teed into a file; report progress as log lines.
    pub log_to_file: bool,
}

/// Import a directory of product images into the catalog.
pub(crate) fn run_import(
    settings: &Settings,
    db_path: &Path,
    args: ImportArgs,
) -> Result<(), CliError> {
    let options = ImportOptions {
        directory: settings.resolve_images_dir(args.dir),
        image_prefix: settings.resolve_image_prefix(args.image_prefix),
        category: args.category,
        update_existing: args.update_existing,
        dry_run: args.dry_run,
    };
    let conn = super::open_catalog(db_path)?;

    log::info!(
        "{}",
        format!(
            "Importing {} into {}{}",
            options.directory.display(),
            db_path.display(),
            if options.dry_run { " (dry run)" } else { "" },
        )
        .if_supports_color(Stdout, |t| t.bold()),
    );

    let bar = CliImportProgress::new();
    let log_progress = LogProgress::default();
    let progress: &dyn ImportProgress = if args.quiet {
        &SilentProgress
    } else if args.log_to_file {
        &log_progress
    } else {
        &bar
    };
    let result = vitrine_import::import_directory(&conn, &options, progress)
        .map_err(|e| CliError::import(e.to_string()))?;
    bar.finish();

    print_outcomes(&result);
    crate::log_blank();
    for line in TextSummary(&result).to_string().lines() {
        log::info!("{}", line);
    }

    if !args.no_reports {
        let dir = settings.resolve_reports_dir(args.reports_dir);
        let stamp = vitrine_import::report_stamp(&chrono::Local::now());
        let paths = vitrine_import::write_reports(&result, &dir, &stamp)
            .map_err(|e| CliError::report(format!("{}: {}", dir.display(), e)))?;
        crate::log_blank();
        log::info!("Reports:");
        for path in [&paths.csv, &paths.text, &paths.json] {
            log::info!(
                "  {}",
                path.display().if_supports_color(Stdout, |t| t.cyan())
            );
        }
    }

    if args.fail_on_error && result.counts.errors > 0 {
        return Err(CliError::ImportFailures(result.counts.errors));
    }
    Ok(())
}

/// One line per product, only with `--verbose`.
fn print_outcomes(result: &ImportResult) {
    for item in &result.items {
        let mark = match item.status {
            ImportStatus::Created => "\u{2714}".if_supports_color(Stdout, |t| t.green()).to_string(),
            ImportStatus::Updated => "\u{21BB}".if_supports_color(Stdout, |t| t.cyan()).to_string(),
            ImportStatus::Skipped => "-".if_supports_color(Stdout, |t| t.dimmed()).to_string(),
            ImportStatus::Error => "\u{2718}".if_supports_color(Stdout, |t| t.red()).to_string(),
        };
        log::debug!(
            "  {} {:<20} {} ({})",
            mark,
            item.reference,
            item.name,
            item.message
        );
    }
}

/// Progress bar for directory imports, with the running outcome counts as
/// prefix.
struct CliImportProgress {
    pb: ProgressBar,
    tally: ProgressTally,
}

impl CliImportProgress {
    fn new() -> Self {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::with_template("  {bar:30.cyan/blue} {pos}/{len} {prefix} {wide_msg}")
                .expect("static pattern")
                .progress_chars("=> "),
        );
        Self {
            pb,
            tally: ProgressTally::default(),
        }
    }

    fn finish(&self) {
        self.pb.finish_and_clear();
    }
}

impl ImportProgress for CliImportProgress {
    fn on_scanned(&self, directory: &Path, files: usize, groups: usize) {
        self.pb.set_length(groups as u64);
        self.pb.suspend(|| {
            log::debug!(
                "{} image(s), {} product group(s) in {}",
                files,
                groups,
                directory.display()
            )
        });
    }

    fn on_product(&self, current: usize, total: usize, item: &ImportItem) {
        let counts = self.tally.record(item.status);
        self.pb.set_length(total as u64);
        self.pb.set_position(current as u64);
        self.pb.set_prefix(format!(
            "+{} ~{} ={} !{}",
            counts.created, counts.updated, counts.skipped, counts.errors
        ));
        self.pb.set_message(super::truncate_str(&item.name, 50));
    }

    fn on_complete(&self, result: &ImportResult) {
        self.pb
            .suspend(|| log::debug!("Import complete: {}", result.counts));
    }
}
