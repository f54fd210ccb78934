//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(about = "Import product images into the storefront catalog", long_about = None)]
pub(crate) struct Cli {
    /// Catalog database path (default: settings file, then the data directory)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Import a directory of product images into the catalog
    Import {
        /// Directory containing the images (default: settings file, then current directory)
        #[arg(short, long)]
        dir: Option<PathBuf>,

        /// Only import products of this main category (e.g., Plateaux)
        #[arg(short, long)]
        category: Option<String>,

        /// Overwrite products that already exist instead of skipping them
        #[arg(short, long)]
        update_existing: bool,

        /// Show what would be imported without writing to the database
        #[arg(short = 'n', long)]
        dry_run: bool,

        /// Directory for the CSV/TXT/JSON reports (default: ./reports)
        #[arg(long)]
        reports_dir: Option<PathBuf>,

        /// Do not write report files
        #[arg(long)]
        no_reports: bool,

        /// Prefix for stored image paths (default: /images/products)
        #[arg(long)]
        image_prefix: Option<String>,

        /// Exit with status 1 if any product fails to import
        #[arg(long)]
        fail_on_error: bool,
    },

    /// Show the metadata parsed from image filenames
    Parse {
        /// Filenames to parse (the files do not need to exist)
        #[arg(required = true)]
        filenames: Vec<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Update prices from a CSV file with REF and Price columns
    Prices {
        /// CSV file (columns: REF, Price, optional Promo Price)
        file: PathBuf,

        /// Check the file against the catalog without writing
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// List products in the catalog
    Products {
        /// Only list products of this main category
        #[arg(short, long)]
        category: Option<String>,
    },

    /// Show catalog statistics
    Stats,

    /// List categories and their subcategories
    Categories,

    /// Show recent import runs
    History {
        /// Maximum number of runs to show
        #[arg(short, long, default_value = "20")]
        limit: u32,
    },

    /// Manage the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show current settings and where each value comes from
    Show,

    /// Set a value (database, images_dir, reports_dir, image_prefix); empty clears it
    Set { key: String, value: String },

    /// Print the settings file path
    Path,
}
