//! vitrine CLI
//!
//! Command-line interface for importing product images into the storefront
//! catalog and inspecting the result.

mod cli_types;
mod commands;
mod error;
mod logger;

use clap::Parser;

use cli_types::{Cli, Commands, ConfigAction};
pub(crate) use error::CliError;

/// Log an empty line at info level.
pub(crate) fn log_blank() {
    log::info!("");
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = logger::init(cli.quiet, cli.verbose, cli.logfile.as_deref()) {
        eprintln!("Failed to open log file: {e}");
        std::process::exit(1);
    }

    let settings = match vitrine_import::load_settings() {
        Ok(s) => s,
        Err(e) => {
            log::warn!("{e}; using defaults");
            vitrine_import::Settings::default()
        }
    };
    let db_path = settings.resolve_database(cli.db);

    let result = match cli.command {
        Commands::Import {
            dir,
            category,
            update_existing,
            dry_run,
            reports_dir,
            no_reports,
            image_prefix,
            fail_on_error,
        } => commands::import::run_import(
            &settings,
            &db_path,
            commands::import::ImportArgs {
                dir,
                category,
                update_existing,
                dry_run,
                reports_dir,
                no_reports,
                image_prefix,
                fail_on_error,
                quiet: cli.quiet,
                log_to_file: cli.logfile.is_some(),
            },
        ),
        Commands::Parse { filenames, json } => commands::parse::run_parse(&filenames, json),
        Commands::Prices { file, dry_run } => {
            commands::prices::run_prices(&db_path, &file, dry_run)
        }
        Commands::Products { category } => {
            commands::catalog::run_products(&db_path, category.as_deref())
        }
        Commands::Stats => commands::catalog::run_stats(&db_path),
        Commands::Categories => commands::catalog::run_categories(&db_path),
        Commands::History { limit } => commands::catalog::run_history(&db_path, limit),
        Commands::Config { action } => match action {
            ConfigAction::Show => commands::config::run_config_show(&settings),
            ConfigAction::Set { key, value } => {
                commands::config::run_config_set(settings, &key, &value)
            }
            ConfigAction::Path => commands::config::run_config_path(),
        },
    };

    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}
