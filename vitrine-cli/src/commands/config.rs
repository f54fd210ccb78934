use std::path::PathBuf;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use vitrine_import::Settings;

use crate::CliError;

/// Show the resolved settings and where each value comes from.
pub(crate) fn run_config_show(settings: &Settings) -> Result<(), CliError> {
    let path = vitrine_import::settings_path();

    log::info!(
        "{}",
        "Vitrine Configuration".if_supports_color(Stdout, |t| t.bold()),
    );
    crate::log_blank();
    if path.exists() {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(exists)".if_supports_color(Stdout, |t| t.green()),
        );
    } else {
        log::info!(
            "  Settings file: {} {}",
            path.display().if_supports_color(Stdout, |t| t.cyan()),
            "(not found)".if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    crate::log_blank();

    let rows: [(&str, String, bool); 4] = [
        (
            "database",
            settings.resolve_database(None).display().to_string(),
            settings.database.is_some(),
        ),
        (
            "images_dir",
            settings.resolve_images_dir(None).display().to_string(),
            settings.images_dir.is_some(),
        ),
        (
            "reports_dir",
            settings.resolve_reports_dir(None).display().to_string(),
            settings.reports_dir.is_some(),
        ),
        (
            "image_prefix",
            settings.resolve_image_prefix(None),
            settings.image_prefix.is_some(),
        ),
    ];
    for (key, value, from_file) in rows {
        let source = if from_file { "settings file" } else { "default" };
        log::info!(
            "  {:<13} {} {}",
            key,
            value,
            format!("({source})").if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}

/// Set one key in the settings file.
pub(crate) fn run_config_set(
    mut settings: Settings,
    key: &str,
    value: &str,
) -> Result<(), CliError> {
    settings
        .set(key, value)
        .map_err(|e| CliError::config(e.to_string()))?;
    let path: PathBuf = vitrine_import::settings_path();
    vitrine_import::save_settings_to(&path, &settings)
        .map_err(|e| CliError::config(e.to_string()))?;

    if value.is_empty() {
        log::info!("Cleared {} in {}", key, path.display());
    } else {
        log::info!("Set {} = {} in {}", key, value, path.display());
    }
    Ok(())
}

/// Print the settings file path.
pub(crate) fn run_config_path() -> Result<(), CliError> {
    println!("{}", vitrine_import::settings_path().display());
    Ok(())
}
