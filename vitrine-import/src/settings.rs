//! Application settings (database path, image directory, reports directory).
//!
//! The settings file lives at `~/.config/vitrine/settings.toml`. Every value
//! can be overridden on the command line; the `resolve_*` functions apply the
//! priority chain CLI flag → settings file → built-in default.
//!
//! ```toml
//! database = "/srv/vitrine/catalog.db"
//! images_dir = "/srv/vitrine/uploads"
//! reports_dir = "/srv/vitrine/reports"
//! image_prefix = "/images/products"
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Stored image paths are `<image_prefix>/<filename>` unless configured otherwise.
pub const DEFAULT_IMAGE_PREFIX: &str = "/images/products";

/// Keys accepted in `settings.toml`.
pub const SETTING_KEYS: &[&str] = &["database", "images_dir", "reports_dir", "image_prefix"];

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid settings file {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("Cannot serialize settings: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Unknown setting '{0}' (expected one of: {keys})", keys = SETTING_KEYS.join(", "))]
    UnknownKey(String),
}

/// Values read from `settings.toml`. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub database: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub images_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reports_dir: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_prefix: Option<String>,
}

impl Settings {
    /// Database path: CLI override, then settings, then the data directory.
    pub fn resolve_database(&self, cli_override: Option<PathBuf>) -> PathBuf {
        cli_override
            .or_else(|| self.database.clone())
            .unwrap_or_else(default_database_path)
    }

    /// Image directory: CLI override, then settings, then the current directory.
    pub fn resolve_images_dir(&self, cli_override: Option<PathBuf>) -> PathBuf {
        cli_override
            .or_else(|| self.images_dir.clone())
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }

    /// Reports directory: CLI override, then settings, then `./reports`.
    pub fn resolve_reports_dir(&self, cli_override: Option<PathBuf>) -> PathBuf {
        cli_override
            .or_else(|| self.reports_dir.clone())
            .unwrap_or_else(|| PathBuf::from("reports"))
    }

    /// Image path prefix: CLI override, then settings, then [`DEFAULT_IMAGE_PREFIX`].
    pub fn resolve_image_prefix(&self, cli_override: Option<String>) -> String {
        cli_override
            .or_else(|| self.image_prefix.clone())
            .unwrap_or_else(|| DEFAULT_IMAGE_PREFIX.to_string())
    }

    /// Set one key from its string form. An empty value clears the key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), SettingsError> {
        let value = (!value.is_empty()).then(|| value.to_string());
        match key {
            "database" => self.database = value.map(PathBuf::from),
            "images_dir" => self.images_dir = value.map(PathBuf::from),
            "reports_dir" => self.reports_dir = value.map(PathBuf::from),
            "image_prefix" => self.image_prefix = value,
            other => return Err(SettingsError::UnknownKey(other.to_string())),
        }
        Ok(())
    }
}

/// Canonical path to the settings file: `~/.config/vitrine/settings.toml`.
pub fn settings_path() -> PathBuf {
    let config = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    config.join("vitrine").join("settings.toml")
}

/// Default catalog database: `~/.local/share/vitrine/catalog.db`.
pub fn default_database_path() -> PathBuf {
    let data = dirs::data_dir().unwrap_or_else(|| PathBuf::from("."));
    data.join("vitrine").join("catalog.db")
}

/// Load settings from [`settings_path`]. A missing file yields defaults.
pub fn load_settings() -> Result<Settings, SettingsError> {
    load_settings_from(&settings_path())
}

/// Load settings from `path`. A missing file yields defaults.
pub fn load_settings_from(path: &Path) -> Result<Settings, SettingsError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(source) => {
            return Err(SettingsError::Io {
                path: path.to_path_buf(),
                source,
            });
        }
    };
    toml::from_str(&contents).map_err(|source| SettingsError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Write settings to `path`, creating parent directories as needed.
pub fn save_settings_to(path: &Path, settings: &Settings) -> Result<(), SettingsError> {
    let io_err = |source| SettingsError::Io {
        path: path.to_path_buf(),
        source,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(io_err)?;
    }
    let serialized = toml::to_string_pretty(settings)?;
    // Write atomically
    let tmp = path.with_extension("toml.tmp");
    std::fs::write(&tmp, serialized).map_err(io_err)?;
    std::fs::rename(&tmp, path).map_err(io_err)?;
    Ok(())
}
